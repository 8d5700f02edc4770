//! Free-text search and game tabs over the listing.

use std::{fmt, iter};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::model::{Game, TranslationRecord};

/// Label of the tab that shows every game.
pub const ALL_TAB_LABEL: &str = "Все";

/// A category tab above the results.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    All,
    Game(Game),
}

impl Tab {
    /// Every tab in display order: [`Tab::All`] first, then one per game.
    pub fn iter() -> impl Iterator<Item = Tab> {
        iter::once(Tab::All).chain(Game::iter().map(Tab::Game))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::All => ALL_TAB_LABEL,
            Tab::Game(game) => game.name(),
        }
    }

    pub fn matches(&self, record: &TranslationRecord) -> bool {
        match self {
            Tab::All => true,
            Tab::Game(game) => record.game() == game,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Option<Game>> for Tab {
    fn from(game: Option<Game>) -> Self {
        game.map_or(Tab::All, Tab::Game)
    }
}

/// What the user is currently looking for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub tab: Tab,
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>, tab: Tab) -> Self {
        Self {
            query: query.into(),
            tab,
        }
    }

    /// Whether `record` should be shown. The query is matched case-insensitively as a substring
    /// of the mod name or the author, and must agree with the tab.
    pub fn matches(&self, record: &TranslationRecord) -> bool {
        self.tab.matches(record) && matches_query(&self.query.to_lowercase(), record)
    }
}

/// Records passing `criteria`, in listing order.
pub fn filter<'a>(
    records: &'a [TranslationRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a TranslationRecord> {
    let query = criteria.query.to_lowercase();

    records
        .iter()
        .filter(|record| criteria.tab.matches(record) && matches_query(&query, record))
        .collect()
}

/// `query` must already be lowercased.
fn matches_query(query: &str, record: &TranslationRecord) -> bool {
    query.is_empty()
        || record.mod_name().to_lowercase().contains(query)
        || record.author().to_lowercase().contains(query)
}

#[cfg(test)]
mod test {
    use crate::model::NewTranslation;

    use super::*;

    fn record(id: &str, game: Game, mod_name: &str, author: &str) -> TranslationRecord {
        NewTranslation {
            game,
            mod_name: mod_name.into(),
            author: author.into(),
            version: "1.0".into(),
            download_url: "https://example.org".into(),
        }
        .into_record(id)
    }

    fn sample() -> Vec<TranslationRecord> {
        vec![
            record("1", Game::Skyrim, "Falskaar", "Kvno"),
            record("2", Game::Witcher3, "W3EE", "Ashe"),
            record("3", Game::Skyrim, "Beyond Reach", "Falco"),
            record("4", Game::Witcher3, "Ghost Mode", "Команда Переводчиков"),
        ]
    }

    fn ids(records: &[&TranslationRecord]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_query_matches_mod_name() {
        let records = sample();

        let result = filter(&records, &FilterCriteria::new("fal", Tab::All));

        // "Falskaar" by name, "Falco" by author
        assert_eq!(ids(&result), ["1", "3"]);
    }

    #[test]
    fn test_example_listing() {
        let records = vec![
            record("1", Game::Skyrim, "Falskaar", "Kvno"),
            record("2", Game::Witcher3, "W3EE", "Ashe"),
        ];

        let result = filter(&records, &FilterCriteria::new("fal", Tab::All));

        assert_eq!(ids(&result), ["1"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let records = sample();

        assert_eq!(
            ids(&filter(&records, &FilterCriteria::new("ASHE", Tab::All))),
            ["2"]
        );
        assert_eq!(
            ids(&filter(&records, &FilterCriteria::new("команда", Tab::All))),
            ["4"]
        );
    }

    #[test]
    fn test_empty_query_passes_everything() {
        let records = sample();

        let result = filter(&records, &FilterCriteria::default());

        assert_eq!(ids(&result), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_tab_keeps_only_that_game_in_order() {
        let records = sample();

        let skyrim = filter(&records, &FilterCriteria::new("", Tab::Game(Game::Skyrim)));
        let witcher = filter(&records, &FilterCriteria::new("", Tab::Game(Game::Witcher3)));

        assert_eq!(ids(&skyrim), ["1", "3"]);
        assert_eq!(ids(&witcher), ["2", "4"]);
        assert!(skyrim.iter().all(|r| *r.game() == Game::Skyrim));
    }

    #[test]
    fn test_query_and_tab_are_combined() {
        let records = sample();

        let result = filter(&records, &FilterCriteria::new("fal", Tab::Game(Game::Witcher3)));

        assert!(result.is_empty());
    }

    #[test]
    fn test_criteria_matches_agrees_with_filter() {
        let records = sample();
        let criteria = FilterCriteria::new("e", Tab::Game(Game::Witcher3));

        let expected: Vec<&TranslationRecord> =
            records.iter().filter(|r| criteria.matches(r)).collect();

        assert_eq!(filter(&records, &criteria), expected);
    }

    #[test]
    fn test_tabs() {
        let labels: Vec<&str> = Tab::iter().map(|t| t.label()).collect();

        assert_eq!(labels, ["Все", "TES V SKYRIM", "The Witcher Wild Hunt"]);
        assert_eq!(Tab::from(None), Tab::All);
        assert_eq!(Tab::from(Some(Game::Witcher3)), Tab::Game(Game::Witcher3));
    }
}
