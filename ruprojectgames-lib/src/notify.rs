//! Short toast messages describing how a user action went.

use crate::{Error, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// The user action a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Login,
    Create,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub body: String,
}

const ERROR_TITLE: &str = "Ошибка";
const CONNECTION_PROBLEM: &str = "Проблема с подключением к серверу";
const INVALID_PASSWORD: &str = "Неверный пароль администратора";

impl Notification {
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: ERROR_TITLE.into(),
            body: body.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// The toast shown after `action` completed successfully.
    pub fn succeeded(action: Action) -> Self {
        match action {
            Action::Load => Self::success("Готово", "Список русификаторов обновлён"),
            Action::Login => Self::success("Вход выполнен", "Добро пожаловать в админ-панель"),
            Action::Create => Self::success("Успешно!", "Русификатор добавлен на сайт"),
            Action::Delete => Self::success("Успешно!", "Русификатор удалён"),
        }
    }

    /// The toast shown after `action` failed with `err`.
    pub fn failed(action: Action, err: &Error) -> Self {
        let body = match err {
            Error::Network(_) | Error::Timeout(_) => CONNECTION_PROBLEM.to_string(),
            Error::InvalidCredentials | Error::NotAuthenticated => INVALID_PASSWORD.to_string(),
            Error::Validation(ValidationError::InvalidUrl(_)) => {
                "Ссылка на скачивание должна быть полным http(s) адресом".to_string()
            }
            Error::Validation(ValidationError::Empty(_)) => {
                "Все поля обязательны для заполнения".to_string()
            }
            Error::AlreadyInFlight => "Запрос уже выполняется".to_string(),
            Error::ServerRejected { message, .. } if action != Action::Load => message.clone(),
            _ => fallback(action).to_string(),
        };

        Self::error(body)
    }
}

fn fallback(action: Action) -> &'static str {
    match action {
        Action::Load => "Не удалось загрузить список русификаторов",
        Action::Login => CONNECTION_PROBLEM,
        Action::Create => "Не удалось добавить русификатор",
        Action::Delete => "Не удалось удалить русификатор",
    }
}
