//! Admin login and the visibility of the admin panel.
//!
//! Being logged in only decides what the front end shows. The server checks the password again
//! on every privileged request, so nothing here is a security boundary.

use std::fmt;

use tracing::{debug, info, warn};

use crate::{Error, Field, Result, ValidationError, api::Backend};

/// The admin password, as sent with privileged requests. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(***)")
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Visible,
}

impl PanelVisibility {
    pub fn toggled(self) -> Self {
        match self {
            PanelVisibility::Hidden => PanelVisibility::Visible,
            PanelVisibility::Visible => PanelVisibility::Hidden,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    LoggedOut,
    /// A validation request for these credentials is in flight
    Authenticating(Credentials),
    LoggedIn(Credentials),
}

#[derive(Debug, Default)]
pub struct AdminSession {
    password: String,
    auth: AuthState,
    panel: PanelVisibility,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the password input.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Edit the password input. Ignored once a login attempt is under way or has succeeded.
    pub fn set_password(&mut self, password: impl Into<String>) {
        if self.auth == AuthState::LoggedOut {
            self.password = password.into();
        }
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthState::LoggedIn(_))
    }

    pub fn is_authenticating(&self) -> bool {
        matches!(self.auth, AuthState::Authenticating(_))
    }

    /// Validated credentials, present only while logged in.
    pub fn credentials(&self) -> Option<&Credentials> {
        match &self.auth {
            AuthState::LoggedIn(credentials) => Some(credentials),
            _ => None,
        }
    }

    pub fn panel(&self) -> PanelVisibility {
        self.panel
    }

    pub fn is_panel_visible(&self) -> bool {
        self.panel == PanelVisibility::Visible
    }

    /// Show or hide the admin panel. Authentication is left as it is.
    pub fn toggle_panel(&mut self) {
        self.panel = self.panel.toggled();
    }

    /// Start a login attempt with the current password input and return the credentials to
    /// validate.
    pub fn begin_authenticate(&mut self) -> Result<Credentials> {
        match self.auth {
            AuthState::LoggedOut => {}
            AuthState::Authenticating(_) => return Err(Error::AlreadyInFlight),
            AuthState::LoggedIn(ref credentials) => return Ok(credentials.clone()),
        }

        if self.password.is_empty() {
            return Err(ValidationError::Empty(Field::Password).into());
        }

        let credentials = Credentials::new(self.password.clone());
        self.auth = AuthState::Authenticating(credentials.clone());

        Ok(credentials)
    }

    /// Apply the server's verdict on the pending login attempt.
    ///
    /// A rejected password clears the input and returns [`Error::InvalidCredentials`]; a
    /// request that failed for any other reason keeps the input so the user can retry.
    pub fn finish_authenticate(&mut self, result: Result<bool>) -> Result<()> {
        let credentials = match std::mem::take(&mut self.auth) {
            AuthState::Authenticating(credentials) => credentials,
            AuthState::LoggedIn(credentials) => {
                self.auth = AuthState::LoggedIn(credentials);
                return Ok(());
            }
            AuthState::LoggedOut => {
                debug!("Login result arrived without a pending attempt");
                return match result {
                    Ok(true) => Ok(()),
                    Ok(false) => Err(Error::InvalidCredentials),
                    Err(e) => Err(e),
                };
            }
        };

        match result {
            Ok(true) => {
                info!("Admin login succeeded");
                self.password.clear();
                self.auth = AuthState::LoggedIn(credentials);
                Ok(())
            }
            Ok(false) | Err(Error::InvalidCredentials) => {
                info!("Admin login rejected");
                self.password.clear();
                Err(Error::InvalidCredentials)
            }
            Err(e) => {
                warn!("Admin login failed: {e}");
                Err(e)
            }
        }
    }

    /// Validate the current password input against `backend`.
    pub async fn authenticate<B: Backend + ?Sized>(&mut self, backend: &B) -> Result<()> {
        if self.is_authenticated() {
            return Ok(());
        }

        let credentials = self.begin_authenticate()?;
        let result = backend.validate_password(&credentials).await;
        self.finish_authenticate(result)
    }
}
