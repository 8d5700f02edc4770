use iced::{
    Alignment, Element,
    Length::Fill,
    Task,
    widget::{button, column, container, row, space, text, text_input},
};
use ruprojectgames_lib::{
    Error, Game, Result, TranslationId,
    gateway::SubmissionGateway,
    notify::{self, Notification},
    session::AdminSession,
};

use crate::components::SharedBackend;

mod create_form;

#[derive(Debug, Clone)]
pub enum Message {
    PasswordChanged(String),
    LoginButtonPressed,
    Authenticated(Result<bool>),
    GameSelected(Game),
    ModNameChanged(String),
    AuthorChanged(String),
    VersionChanged(String),
    DownloadUrlChanged(String),
    SubmitButtonPressed,
    Created(Result<()>),
    Deleted(TranslationId, Result<()>),
    CloseButtonPressed,
}

/// Action used for communicating with the parent component
pub enum Action {
    None,
    Run(Task<Message>),
    Notify(Notification),
    /// A write went through; show the toast and reload the listing
    Reload(Notification),
}

/// Password gated panel for publishing and removing translations.
pub struct AdminPanel {
    backend: SharedBackend,
    session: AdminSession,
    gateway: SubmissionGateway,
}

impl AdminPanel {
    pub fn new(backend: SharedBackend) -> Self {
        Self {
            backend,
            session: AdminSession::new(),
            gateway: SubmissionGateway::new(),
        }
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn is_visible(&self) -> bool {
        self.session.is_panel_visible()
    }

    pub fn toggle(&mut self) {
        self.session.toggle_panel();
    }

    /// The gateway, but only while logged in. Rows use it to offer delete buttons.
    pub fn writable_gateway(&self) -> Option<&SubmissionGateway> {
        self.session.credentials().map(|_| &self.gateway)
    }

    /// Ask the server to delete `id`. Deleting is not offered before a successful login.
    pub fn delete(&mut self, id: TranslationId) -> Action {
        let Some(credentials) = self.session.credentials().cloned() else {
            return failed(notify::Action::Delete, &Error::NotAuthenticated);
        };

        if let Err(e) = self.gateway.begin_delete(&id) {
            return failed(notify::Action::Delete, &e);
        }

        let backend = self.backend.clone();
        Action::Run(Task::perform(
            async move {
                let result = backend.delete(&credentials, &id).await;
                (id, result)
            },
            |(id, result)| Message::Deleted(id, result),
        ))
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::PasswordChanged(password) => {
                self.session.set_password(password);
                Action::None
            }
            Message::LoginButtonPressed => {
                if self.session.is_authenticated() {
                    return Action::None;
                }

                match self.session.begin_authenticate() {
                    Ok(credentials) => {
                        let backend = self.backend.clone();
                        Action::Run(Task::perform(
                            async move { backend.validate_password(&credentials).await },
                            Message::Authenticated,
                        ))
                    }
                    Err(e) => failed(notify::Action::Login, &e),
                }
            }
            Message::Authenticated(result) => match self.session.finish_authenticate(result) {
                Ok(()) => Action::Notify(Notification::succeeded(notify::Action::Login)),
                Err(e) => failed(notify::Action::Login, &e),
            },
            Message::GameSelected(game) => {
                self.gateway.form_mut().game = game;
                Action::None
            }
            Message::ModNameChanged(value) => {
                self.gateway.form_mut().mod_name = value;
                Action::None
            }
            Message::AuthorChanged(value) => {
                self.gateway.form_mut().author = value;
                Action::None
            }
            Message::VersionChanged(value) => {
                self.gateway.form_mut().version = value;
                Action::None
            }
            Message::DownloadUrlChanged(value) => {
                self.gateway.form_mut().download_url = value;
                Action::None
            }
            Message::SubmitButtonPressed => {
                let Some(credentials) = self.session.credentials().cloned() else {
                    return failed(notify::Action::Create, &Error::NotAuthenticated);
                };

                match self.gateway.begin_create() {
                    Ok(translation) => {
                        let backend = self.backend.clone();
                        Action::Run(Task::perform(
                            async move { backend.create(&credentials, &translation).await },
                            Message::Created,
                        ))
                    }
                    Err(e) => failed(notify::Action::Create, &e),
                }
            }
            Message::Created(result) => match self.gateway.finish_create(result) {
                Ok(()) => Action::Reload(Notification::succeeded(notify::Action::Create)),
                Err(e) => failed(notify::Action::Create, &e),
            },
            Message::Deleted(id, result) => match self.gateway.finish_delete(&id, result) {
                Ok(()) => Action::Reload(Notification::succeeded(notify::Action::Delete)),
                Err(e) => failed(notify::Action::Delete, &e),
            },
            Message::CloseButtonPressed => {
                self.toggle();
                Action::None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Панель администратора").size(20),
            space::horizontal(),
            button("Закрыть")
                .style(button::subtle)
                .on_press(Message::CloseButtonPressed)
        ]
        .align_y(Alignment::Center);

        let body = if self.session.is_authenticated() {
            create_form::view(&self.gateway)
        } else {
            self.login_form()
        };

        container(column![header, body].spacing(15))
            .padding(20)
            .width(Fill)
            .style(container::bordered_box)
            .into()
    }

    fn login_form(&self) -> Element<'_, Message> {
        let mut password = text_input("Пароль администратора", self.session.password()).secure(true);
        let mut login = button(if self.session.is_authenticating() {
            "Проверка..."
        } else {
            "Войти"
        })
        .style(button::primary);

        if !self.session.is_authenticating() {
            password = password
                .on_input(Message::PasswordChanged)
                .on_submit(Message::LoginButtonPressed);
            login = login.on_press(Message::LoginButtonPressed);
        }

        row![password, login].spacing(10).into()
    }
}

fn failed(action: notify::Action, err: &Error) -> Action {
    Action::Notify(Notification::failed(action, err))
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use async_trait::async_trait;
    use ruprojectgames_lib::{
        NewTranslation, TranslationRecord, gateway::SubmitState, session::Credentials,
    };

    use super::*;

    /// Requests never get answered in these tests; results are fed in as messages.
    struct Silent;

    #[async_trait]
    impl ruprojectgames_lib::Backend for Silent {
        async fn list(&self, _game: Option<Game>) -> Result<Vec<TranslationRecord>> {
            Ok(Vec::new())
        }

        async fn validate_password(&self, _credentials: &Credentials) -> Result<bool> {
            Ok(true)
        }

        async fn create(&self, _: &Credentials, _: &NewTranslation) -> Result<()> {
            Ok(())
        }

        async fn delete(&self, _: &Credentials, _: &TranslationId) -> Result<()> {
            Ok(())
        }
    }

    fn panel() -> AdminPanel {
        AdminPanel::new(Arc::new(Silent))
    }

    fn logged_in() -> AdminPanel {
        let mut panel = panel();
        panel.update(Message::PasswordChanged("hunter2".into()));
        assert!(matches!(
            panel.update(Message::LoginButtonPressed),
            Action::Run(_)
        ));
        panel.update(Message::Authenticated(Ok(true)));
        panel
    }

    fn fill_form(panel: &mut AdminPanel) {
        panel.update(Message::GameSelected(Game::Witcher3));
        panel.update(Message::ModNameChanged("W3EE".into()));
        panel.update(Message::AuthorChanged("Ashe".into()));
        panel.update(Message::VersionChanged("7.0".into()));
        panel.update(Message::DownloadUrlChanged("https://example.org/w3ee.zip".into()));
    }

    #[test]
    fn test_toggle_keeps_login() {
        let mut panel = logged_in();
        assert!(!panel.is_visible());

        panel.toggle();
        panel.update(Message::CloseButtonPressed);

        assert!(!panel.is_visible());
        assert!(panel.session().is_authenticated());
    }

    #[test]
    fn test_empty_password_is_refused_locally() {
        let mut panel = panel();

        match panel.update(Message::LoginButtonPressed) {
            Action::Notify(toast) => assert!(toast.is_error()),
            _ => panic!("expected an error toast"),
        }
        assert!(!panel.session().is_authenticating());
    }

    #[test]
    fn test_wrong_password_clears_input() {
        let mut panel = panel();
        panel.update(Message::PasswordChanged("wrong".into()));
        panel.update(Message::LoginButtonPressed);

        let action = panel.update(Message::Authenticated(Ok(false)));

        assert!(matches!(action, Action::Notify(ref toast) if toast.is_error()));
        assert_eq!(panel.session().password(), "");
        assert!(panel.writable_gateway().is_none());
    }

    #[test]
    fn test_delete_requires_login() {
        let mut panel = panel();

        let action = panel.delete(TranslationId::from("1"));

        assert!(matches!(action, Action::Notify(ref toast) if toast.is_error()));
    }

    #[test]
    fn test_successful_create_requests_reload() {
        let mut panel = logged_in();
        fill_form(&mut panel);

        assert!(matches!(
            panel.update(Message::SubmitButtonPressed),
            Action::Run(_)
        ));
        // A second press while the first is in flight is refused
        assert!(matches!(
            panel.update(Message::SubmitButtonPressed),
            Action::Notify(_)
        ));

        let action = panel.update(Message::Created(Ok(())));

        assert!(matches!(action, Action::Reload(ref toast) if !toast.is_error()));
        assert_eq!(panel.gateway.state(), &SubmitState::Succeeded);
        assert!(panel.gateway.form().mod_name.is_empty());
    }

    #[test]
    fn test_failed_create_keeps_form() {
        let mut panel = logged_in();
        fill_form(&mut panel);
        panel.update(Message::SubmitButtonPressed);

        let action = panel.update(Message::Created(Err(Error::ServerRejected {
            status: 500,
            message: "Ошибка базы данных".into(),
        })));

        match action {
            Action::Notify(toast) => assert_eq!(toast.body, "Ошибка базы данных"),
            _ => panic!("expected an error toast"),
        }
        assert_eq!(panel.gateway.form().mod_name, "W3EE");
    }

    #[test]
    fn test_form_error_matches_toast() {
        let mut panel = logged_in();
        fill_form(&mut panel);
        panel.gateway.form_mut().download_url = "example.org/file.zip".into();

        let action = panel.update(Message::SubmitButtonPressed);

        let Action::Notify(toast) = action else {
            panic!("expected an error toast");
        };
        assert_eq!(panel.gateway.state(), &SubmitState::Failed(toast.body));
    }

    #[test]
    fn test_delete_round_trip() {
        let mut panel = logged_in();
        let id = TranslationId::from("1");

        assert!(matches!(panel.delete(id.clone()), Action::Run(_)));
        assert!(panel.writable_gateway().unwrap().is_deleting(&id));

        let action = panel.update(Message::Deleted(id.clone(), Ok(())));

        assert!(matches!(action, Action::Reload(_)));
        assert!(!panel.writable_gateway().unwrap().is_deleting(&id));
    }
}
