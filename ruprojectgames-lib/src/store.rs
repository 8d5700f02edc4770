use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
    Error, Result,
    api::Backend,
    model::{Game, TranslationId, TranslationRecord},
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Identifies one load request. Only the result of the newest ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// What [`ListingStore::finish_load`] did with a result.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { count: usize },
    Failed(Error),
    /// A newer load was started after this one; its result was dropped
    Stale,
}

/// The published translations, in server order, as of the last successful load.
#[derive(Debug, Default)]
pub struct ListingStore {
    records: Vec<TranslationRecord>,
    state: LoadState,
    generation: u64,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TranslationRecord] {
        &self.records
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn get(&self, id: &TranslationId) -> Option<&TranslationRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.saturating_add(1);
        self.state = LoadState::Loading;

        LoadTicket(self.generation)
    }

    /// Apply the result of the load identified by `ticket`.
    ///
    /// Success replaces the records wholesale. Failure keeps the previous records and is only
    /// logged here; the caller decides whether to tell the user.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<TranslationRecord>>,
    ) -> LoadOutcome {
        if ticket.0 != self.generation {
            debug!("Dropping result of superseded load {}", ticket.0);
            return LoadOutcome::Stale;
        }

        match result {
            Ok(records) => {
                self.records = dedup_by_id(records);
                self.state = LoadState::Loaded;
                debug!("Listing holds {} translations", self.records.len());
                LoadOutcome::Loaded {
                    count: self.records.len(),
                }
            }
            Err(e) => {
                warn!("Failed to load translations: {e}");
                self.state = LoadState::Failed(e.to_string());
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Fetch every translation from `backend`.
    pub async fn load<B: Backend + ?Sized>(&mut self, backend: &B) -> Result<usize> {
        self.load_game(backend, None).await
    }

    /// Fetch the translations of `game` only, or all of them for `None`. The server does the
    /// filtering.
    pub async fn load_game<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        game: Option<Game>,
    ) -> Result<usize> {
        let ticket = self.begin_load();
        let result = backend.list(game).await;

        match self.finish_load(ticket, result) {
            LoadOutcome::Loaded { count } => Ok(count),
            LoadOutcome::Failed(e) => Err(e),
            LoadOutcome::Stale => Ok(self.records.len()),
        }
    }
}

/// Ids are unique in the listing. Should the server ever repeat one, the first occurrence wins.
fn dedup_by_id(records: Vec<TranslationRecord>) -> Vec<TranslationRecord> {
    let mut seen = HashSet::with_capacity(records.len());

    records
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.id().clone());
            if !fresh {
                warn!("Duplicate translation id {} in listing", r.id());
            }
            fresh
        })
        .collect()
}
