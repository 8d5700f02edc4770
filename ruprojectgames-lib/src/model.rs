//! Catalogue entries and the games they belong to.

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::ValueEnum;
use derive_more::{Display, From};
use getset::Getters;
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{EnumIter, EnumString};

use crate::{Field, ValidationError};

/// A game the catalogue carries translations for.
///
/// The declaration order is the order games are presented in, and the first one is the default
/// selection of the creation form.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    strum::Display,
    ValueEnum,
)]
pub enum Game {
    #[default]
    #[serde(rename = "TES V SKYRIM")]
    #[strum(to_string = "TES V SKYRIM", serialize = "skyrim")]
    #[value(name = "skyrim")]
    Skyrim,
    #[serde(rename = "The Witcher Wild Hunt")]
    #[strum(to_string = "The Witcher Wild Hunt", serialize = "witcher3")]
    #[value(name = "witcher3")]
    Witcher3,
}

impl Game {
    /// Display name, exactly as the API stores it.
    pub fn name(&self) -> &'static str {
        match self {
            Game::Skyrim => "TES V SKYRIM",
            Game::Witcher3 => "The Witcher Wild Hunt",
        }
    }

    /// Steps for installing a translation of a mod for this game.
    pub fn install_steps(&self) -> [&'static str; 3] {
        match self {
            Game::Skyrim => [
                "Скачайте архив с русификатором",
                "Распакуйте содержимое в папку Data игры",
                "Активируйте ESP файл в лаунчере",
            ],
            Game::Witcher3 => [
                "Скачайте русификатор мода",
                "Скопируйте файлы в папку Mods",
                "Запустите игру через Script Merger",
            ],
        }
    }
}

/// Server assigned identifier of a [`TranslationRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct TranslationId(String);

impl AsRef<str> for TranslationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TranslationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A published translation, as returned by the listing endpoint.
///
/// Records are read-only: they only change by being deleted and recreated on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
#[getset(get = "pub")]
pub struct TranslationRecord {
    id: TranslationId,
    game: Game,
    mod_name: String,
    author: String,
    version: String,
    download_url: String,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<DateTime<Utc>>,
}

/// The fields of a translation that an admin submits. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTranslation {
    pub game: Game,
    pub mod_name: String,
    pub author: String,
    pub version: String,
    pub download_url: String,
}

impl NewTranslation {
    /// Check that every field is filled in and that the download link is an absolute http(s)
    /// URL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            (Field::ModName, &self.mod_name),
            (Field::Author, &self.author),
            (Field::Version, &self.version),
            (Field::DownloadUrl, &self.download_url),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Empty(field));
            }
        }

        match Url::parse(self.download_url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
            _ => Err(ValidationError::InvalidUrl(self.download_url.clone())),
        }
    }

    /// Attach a server assigned id.
    pub fn into_record(self, id: impl Into<TranslationId>) -> TranslationRecord {
        TranslationRecord {
            id: id.into(),
            game: self.game,
            mod_name: self.mod_name,
            author: self.author,
            version: self.version,
            download_url: self.download_url,
            created_at: None,
        }
    }
}

/// Accepts RFC 3339 timestamps as well as offset-less ISO 8601 ones (read as UTC). Anything
/// else is dropped rather than failing the whole listing.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    match NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(ts) => Ok(Some(ts.and_utc())),
        Err(e) => {
            tracing::debug!("Ignoring unparsable createdAt '{raw}': {e}");
            Ok(None)
        }
    }
}
