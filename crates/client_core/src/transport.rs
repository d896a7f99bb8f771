//! HTTP access to the activities API.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{ActivityCatalog, SignupRequest},
    error::ApiError,
    protocol::{SignupResponse, ACTIVITIES_SEGMENT, EMAIL_QUERY_KEY, SIGNUP_SEGMENT},
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

#[async_trait]
pub trait ActivitiesApi: Send + Sync {
    /// Single attempt; the caller decides whether to retry.
    async fn fetch_catalog(&self) -> Result<ActivityCatalog, ClientError>;

    /// Returns the server's confirmation message.
    async fn sign_up(&self, request: &SignupRequest) -> Result<String, ClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidServerUrl {
    #[error("invalid server url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("server url {0} cannot carry a path")]
    NotABase(String),
}

pub struct HttpActivitiesApi {
    http: Client,
    base_url: Url,
}

impl HttpActivitiesApi {
    pub fn new(base_url: Url) -> Result<Self, InvalidServerUrl> {
        if base_url.cannot_be_a_base() {
            return Err(InvalidServerUrl::NotABase(base_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    pub fn from_server_url(server_url: &str) -> Result<Self, InvalidServerUrl> {
        Self::new(Url::parse(server_url.trim())?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn catalog_url(&self) -> Url {
        self.endpoint(&[ACTIVITIES_SEGMENT])
    }

    /// `/activities/{activity}/signup?email={email}`, both parts percent-encoded.
    pub fn signup_url(&self, request: &SignupRequest) -> Url {
        let mut url = self.endpoint(&[
            ACTIVITIES_SEGMENT,
            request.activity.as_str(),
            SIGNUP_SEGMENT,
        ]);
        url.query_pairs_mut()
            .append_pair(EMAIL_QUERY_KEY, &request.email);
        url
    }
}

fn transport_error(url: &Url) -> impl FnOnce(reqwest::Error) -> ClientError + '_ {
    move |source| ClientError::Transport {
        url: url.to_string(),
        source,
    }
}

#[async_trait]
impl ActivitiesApi for HttpActivitiesApi {
    async fn fetch_catalog(&self) -> Result<ActivityCatalog, ClientError> {
        let url = self.catalog_url();
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error(&url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
                detail: None,
            });
        }

        let body = response.bytes().await.map_err(transport_error(&url))?;
        let catalog: ActivityCatalog =
            serde_json::from_slice(&body).map_err(|err| ClientError::MalformedResponse {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        debug!(activities = catalog.len(), "fetched activity catalog");
        Ok(catalog)
    }

    async fn sign_up(&self, request: &SignupRequest) -> Result<String, ClientError> {
        let url = self.signup_url(request);
        let response = self
            .http
            .post(url.clone())
            .send()
            .await
            .map_err(transport_error(&url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let detail = match ApiError::parse_detail(&body) {
                Ok(detail) => Some(detail),
                Err(error) => {
                    debug!(%status, %error, "signup failure body unusable; using fallback");
                    None
                }
            };
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
                detail,
            });
        }

        let body = response.bytes().await.map_err(transport_error(&url))?;
        let parsed: SignupResponse =
            serde_json::from_slice(&body).map_err(|err| ClientError::MalformedResponse {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        Ok(parsed.message)
    }
}
