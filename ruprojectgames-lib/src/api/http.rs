use std::{future::Future, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    Error, Result,
    api::{Backend, PASSWORD_HEADER},
    config::{CoreConfig, Endpoints},
    model::{Game, NewTranslation, TranslationId, TranslationRecord},
    session::Credentials,
};

/// [`Backend`] talking JSON over HTTP to the catalogue functions.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoints: ParsedEndpoints,
    timeout: Duration,
}

#[derive(Debug, Clone)]
struct ParsedEndpoints {
    list: Url,
    auth: Url,
    create: Url,
    delete: Url,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    valid: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpBackend {
    pub fn new(cfg: &CoreConfig) -> Result<Self> {
        Self::with_client(Client::new(), cfg)
    }

    /// Reuse an existing [`Client`] and its connection pool.
    pub fn with_client(client: Client, cfg: &CoreConfig) -> Result<Self> {
        Ok(Self {
            client,
            endpoints: ParsedEndpoints::parse(&cfg.endpoints)?,
            timeout: cfg.request_timeout(),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `request`, bounding the whole exchange (body included) by the configured timeout.
    async fn exchange<T, F, Fut>(&self, request: RequestBuilder, read: F) -> Result<T>
    where
        F: FnOnce(Response) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let exchange = async {
            let response = request.send().await.map_err(|e| self.request_error(e))?;
            read(response).await
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| Error::Timeout(self.timeout))?
    }

    fn request_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::from(err)
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self))]
    async fn list(&self, game: Option<Game>) -> Result<Vec<TranslationRecord>> {
        let mut request = self.client.get(self.endpoints.list.clone());
        if let Some(game) = game {
            request = request.query(&[("game", game.name())]);
        }

        let records: Vec<TranslationRecord> = self
            .exchange(request, |response| async {
                let body = ensure_success(response).await?.bytes().await.map_err(Error::from)?;
                Ok(serde_json::from_slice(&body)?)
            })
            .await?;

        debug!("Fetched {} translations", records.len());

        Ok(records)
    }

    #[instrument(skip_all)]
    async fn validate_password(&self, credentials: &Credentials) -> Result<bool> {
        let request = self
            .client
            .post(self.endpoints.auth.clone())
            .header(PASSWORD_HEADER, credentials.expose());

        self.exchange(request, |response| async {
            match response.status() {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
                _ => {
                    let body = ensure_success(response)
                        .await?
                        .bytes()
                        .await
                        .map_err(Error::from)?;
                    let auth: AuthResponse = serde_json::from_slice(&body)?;
                    Ok(auth.valid)
                }
            }
        })
        .await
    }

    #[instrument(skip(self, credentials), fields(mod_name = %translation.mod_name))]
    async fn create(&self, credentials: &Credentials, translation: &NewTranslation) -> Result<()> {
        let request = self
            .client
            .post(self.endpoints.create.clone())
            .header(PASSWORD_HEADER, credentials.expose())
            .json(translation);

        self.exchange(request, |response| async {
            ensure_success(response).await?;
            Ok(())
        })
        .await?;

        debug!("Created translation");

        Ok(())
    }

    #[instrument(skip(self, credentials))]
    async fn delete(&self, credentials: &Credentials, id: &TranslationId) -> Result<()> {
        let request = self
            .client
            .post(self.endpoints.delete.clone())
            .header(PASSWORD_HEADER, credentials.expose())
            .json(&serde_json::json!({ "id": id }));

        self.exchange(request, |response| async {
            ensure_success(response).await?;
            Ok(())
        })
        .await?;

        debug!("Deleted translation");

        Ok(())
    }
}

impl ParsedEndpoints {
    fn parse(endpoints: &Endpoints) -> Result<Self> {
        Ok(Self {
            list: parse_endpoint(&endpoints.list)?,
            auth: parse_endpoint(&endpoints.auth)?,
            create: parse_endpoint(&endpoints.create)?,
            delete: parse_endpoint(&endpoints.delete)?,
        })
    }
}

fn parse_endpoint(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidEndpoint {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Turn a non-2xx response into [`Error::ServerRejected`], keeping the server's own message when
/// it sent one.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    Err(Error::ServerRejected {
        status: status.as_u16(),
        message,
    })
}
