use tracing::info;

use crate::{
    Error, Result,
    api::Backend,
    filter::{FilterCriteria, Tab, filter},
    gateway::SubmissionGateway,
    model::{Game, TranslationId, TranslationRecord},
    notify::{Action, Notification},
    session::AdminSession,
    store::ListingStore,
};

/// The whole catalogue page: listing, search, admin session and writes, wired to a [`Backend`].
///
/// Every flow records a [`Notification`] for the user and also returns its result, so a caller
/// can pick whichever it needs. Successful writes are followed by exactly one reload.
pub struct Catalog<B> {
    backend: B,
    store: ListingStore,
    criteria: FilterCriteria,
    session: AdminSession,
    gateway: SubmissionGateway,
    notifications: Vec<Notification>,
}

impl<B: Backend> Catalog<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            store: ListingStore::new(),
            criteria: FilterCriteria::default(),
            session: AdminSession::new(),
            gateway: SubmissionGateway::new(),
            notifications: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.criteria.tab = tab;
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AdminSession {
        &mut self.session
    }

    pub fn gateway(&self) -> &SubmissionGateway {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut SubmissionGateway {
        &mut self.gateway
    }

    /// Records matching the current search and tab.
    pub fn visible(&self) -> Vec<&TranslationRecord> {
        filter(self.store.records(), &self.criteria)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Replace the listing with the server's current one.
    pub async fn load(&mut self) -> Result<usize> {
        self.load_game(None).await
    }

    /// Like [`Catalog::load`], but asks the server for the translations of one game only.
    pub async fn load_game(&mut self, game: Option<Game>) -> Result<usize> {
        let result = self.store.load_game(&self.backend, game).await;
        if let Err(e) = &result {
            self.notifications.push(Notification::failed(Action::Load, e));
        }

        result
    }

    /// Log in with the password currently typed into the session.
    pub async fn authenticate(&mut self) -> Result<()> {
        let result = self.session.authenticate(&self.backend).await;
        self.notify(Action::Login, &result);

        result
    }

    /// Submit the creation form, then reload the listing if the server accepted it.
    pub async fn create(&mut self) -> Result<()> {
        let credentials = self
            .session
            .credentials()
            .cloned()
            .ok_or(Error::NotAuthenticated);

        let result = match credentials {
            Ok(credentials) => self.gateway.create(&self.backend, &credentials).await,
            Err(e) => Err(e),
        };
        self.notify(Action::Create, &result);

        if result.is_ok() {
            self.reload_after_write().await;
        }

        result
    }

    /// Delete `id`, then reload the listing if the server accepted it.
    ///
    /// `id` does not have to be in the local listing; the server decides what happens to ids it
    /// no longer knows.
    pub async fn delete(&mut self, id: &TranslationId) -> Result<()> {
        let credentials = self
            .session
            .credentials()
            .cloned()
            .ok_or(Error::NotAuthenticated);

        let result = match credentials {
            Ok(credentials) => self.gateway.delete(&self.backend, &credentials, id).await,
            Err(e) => Err(e),
        };
        self.notify(Action::Delete, &result);

        if result.is_ok() {
            self.reload_after_write().await;
        }

        result
    }

    async fn reload_after_write(&mut self) {
        // A failed reload is already reported by `load`; the write itself stands
        if let Ok(count) = self.load().await {
            info!("Listing reloaded with {count} translations");
        }
    }

    fn notify(&mut self, action: Action, result: &Result<()>) {
        let notification = match result {
            Ok(()) => Notification::succeeded(action),
            Err(e) => Notification::failed(action, e),
        };

        self.notifications.push(notification);
    }
}

#[cfg(test)]
mod test {
    use crate::{
        api::mock::MockBackend,
        gateway::CreateForm,
        model::NewTranslation,
        notify::Level,
        session::AuthState,
    };

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

    fn catalog() -> Catalog<MockBackend> {
        Catalog::new(MockBackend::new("hunter2").with_records(vec![
            record("1", Game::Skyrim, "Falskaar", "Kvno"),
            record("2", Game::Witcher3, "W3EE", "Ashe"),
        ]))
    }

    async fn logged_in() -> Catalog<MockBackend> {
        let mut catalog = catalog();
        catalog.load().await.unwrap();
        catalog.session_mut().toggle_panel();
        catalog.session_mut().set_password("hunter2");
        catalog.authenticate().await.unwrap();
        catalog.take_notifications();
        catalog
    }

    fn fill(form: &mut CreateForm) {
        form.game = Game::Witcher3;
        form.mod_name = "Ghost Mode".into();
        form.author = "Ashe".into();
        form.version = "2.0".into();
        form.download_url = "https://example.org/ghost.zip".into();
    }

    fn visible_ids<B: Backend>(catalog: &Catalog<B>) -> Vec<String> {
        catalog
            .visible()
            .iter()
            .map(|r| r.id().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_search_example() {
        let mut catalog = catalog();
        catalog.load().await.unwrap();

        catalog.set_query("fal");
        catalog.set_tab(Tab::All);

        assert_eq!(visible_ids(&catalog), ["1"]);
    }

    #[tokio::test]
    async fn test_create_reloads_exactly_once() {
        let mut catalog = logged_in().await;
        let loads_before = catalog.backend().list_calls();
        fill(catalog.gateway_mut().form_mut());

        catalog.create().await.unwrap();

        assert_eq!(catalog.backend().list_calls(), loads_before + 1);
        assert_eq!(catalog.gateway().form(), &CreateForm::default());
        assert_eq!(catalog.store().records().len(), 3);
        assert_eq!(
            catalog.take_notifications(),
            [Notification::succeeded(Action::Create)]
        );
    }

    #[tokio::test]
    async fn test_failed_create_keeps_form_and_notifies_once() {
        let mut catalog = logged_in().await;
        catalog.backend().set_reject_writes(true);
        let loads_before = catalog.backend().list_calls();
        fill(catalog.gateway_mut().form_mut());
        let entered = catalog.gateway().form().clone();

        assert!(catalog.create().await.is_err());

        assert_eq!(catalog.gateway().form(), &entered);
        assert_eq!(catalog.backend().list_calls(), loads_before);
        let toasts = catalog.take_notifications();
        assert_eq!(toasts.len(), 1);
        assert!(toasts.iter().all(Notification::is_error));
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let mut catalog = catalog();
        catalog.session_mut().set_password("wrong");

        let result = catalog.authenticate().await;

        assert!(matches!(result, Err(Error::InvalidCredentials)));
        assert_eq!(catalog.session().password(), "");
        assert_eq!(catalog.session().auth(), &AuthState::LoggedOut);
        assert_eq!(
            catalog.notifications().first().map(|n| n.body.as_str()),
            Some("Неверный пароль администратора")
        );
    }

    #[tokio::test]
    async fn test_writes_require_login() {
        let mut catalog = catalog();
        fill(catalog.gateway_mut().form_mut());

        let result = catalog.create().await;

        assert!(matches!(result, Err(Error::NotAuthenticated)));
        assert_eq!(
            catalog
                .backend()
                .create_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_delete_then_reload() {
        let mut catalog = logged_in().await;

        catalog.delete(&TranslationId::from("1")).await.unwrap();

        assert_eq!(visible_ids(&catalog), ["2"]);
    }

    #[tokio::test]
    async fn test_delete_of_already_removed_id() {
        let mut catalog = logged_in().await;
        catalog.delete(&TranslationId::from("1")).await.unwrap();
        let loads_before = catalog.backend().list_calls();

        catalog.delete(&TranslationId::from("1")).await.unwrap();

        assert_eq!(catalog.backend().list_calls(), loads_before + 1);
        assert_eq!(visible_ids(&catalog), ["2"]);
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let mut catalog = catalog();
        catalog.load().await.unwrap();
        catalog.backend().set_offline(true);

        assert!(catalog.load().await.is_err());

        assert_eq!(catalog.store().records().len(), 2);
        let toast = catalog.notifications().first().unwrap();
        assert_eq!(toast.level, Level::Error);
        assert_eq!(toast.body, "Проблема с подключением к серверу");
    }
}
