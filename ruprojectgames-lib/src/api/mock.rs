use std::{
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    Error, Result,
    api::Backend,
    model::{Game, NewTranslation, TranslationId, TranslationRecord},
    session::Credentials,
};

/// In-memory stand-in for the remote functions, counting every call it receives.
#[derive(Debug, Default)]
pub(crate) struct MockBackend {
    pub records: Mutex<Vec<TranslationRecord>>,
    pub password: String,
    /// Every call fails as if the server were unreachable
    pub offline: AtomicBool,
    /// Authorized writes fail with a server error
    pub reject_writes: AtomicBool,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl MockBackend {
    pub fn new(password: &str) -> Self {
        Self {
            password: password.into(),
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    pub fn with_records(self, records: Vec<TranslationRecord>) -> Self {
        let next = records.len().saturating_add(1);
        *self.records.lock() = records;
        self.next_id.store(next, Ordering::SeqCst);
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(Error::Timeout(Duration::from_secs(1)))
        } else {
            Ok(())
        }
    }

    fn check_write(&self, credentials: &Credentials) -> Result<()> {
        self.check_online()?;

        if credentials.expose() != self.password {
            return Err(Error::ServerRejected {
                status: 403,
                message: "Неверный пароль администратора".into(),
            });
        }

        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(Error::ServerRejected {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn list(&self, game: Option<Game>) -> Result<Vec<TranslationRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        Ok(self
            .records
            .lock()
            .iter()
            .filter(|r| game.is_none_or(|g| *r.game() == g))
            .cloned()
            .collect())
    }

    async fn validate_password(&self, credentials: &Credentials) -> Result<bool> {
        self.check_online()?;
        Ok(credentials.expose() == self.password)
    }

    async fn create(&self, credentials: &Credentials, translation: &NewTranslation) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_write(credentials)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .push(translation.clone().into_record(id.to_string()));

        Ok(())
    }

    async fn delete(&self, credentials: &Credentials, id: &TranslationId) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_write(credentials)?;

        // Deleting something that is already gone is not an error
        self.records.lock().retain(|r| r.id() != id);

        Ok(())
    }
}
