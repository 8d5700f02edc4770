//! The network seam between the catalogue and the remote functions that own its data.

use async_trait::async_trait;

use crate::{
    Result,
    model::{Game, NewTranslation, TranslationId, TranslationRecord},
    session::Credentials,
};

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpBackend;

/// Header that carries the admin password on every privileged request.
pub const PASSWORD_HEADER: &str = "X-Admin-Password";

/// Remote catalogue API.
///
/// Every privileged call carries the admin [`Credentials`]; the server is the only place where
/// they are actually enforced.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the published translations, optionally only those of `game`, in server order.
    async fn list(&self, game: Option<Game>) -> Result<Vec<TranslationRecord>>;

    /// Ask the server whether `credentials` grant admin access.
    async fn validate_password(&self, credentials: &Credentials) -> Result<bool>;

    async fn create(&self, credentials: &Credentials, translation: &NewTranslation) -> Result<()>;

    async fn delete(&self, credentials: &Credentials, id: &TranslationId) -> Result<()>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    async fn list(&self, game: Option<Game>) -> Result<Vec<TranslationRecord>> {
        (**self).list(game).await
    }

    async fn validate_password(&self, credentials: &Credentials) -> Result<bool> {
        (**self).validate_password(credentials).await
    }

    async fn create(&self, credentials: &Credentials, translation: &NewTranslation) -> Result<()> {
        (**self).create(credentials, translation).await
    }

    async fn delete(&self, credentials: &Credentials, id: &TranslationId) -> Result<()> {
        (**self).delete(credentials, id).await
    }
}
