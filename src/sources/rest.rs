//! REST backend client.
//!
//! Requests carry the session's bearer token. A `401` triggers one session
//! refresh through `POST /auth/refresh` followed by a single retry of the
//! original request. Refreshes are serialized: requests rejected with a token
//! that has since been replaced reuse the new session instead of spending the
//! refresh token again. Transient failures are retried with backoff.

use super::RecordSource;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::models::{Client, Event, FollowUp, Note, Task, User};
use crate::utils::logging::log_request;
use crate::utils::retry::{retry_with_exponential_backoff, RetryConfig};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};
use std::time::Instant;
use tokio::sync::Mutex;
use url::Url;

const TASKS: &str = "tasks";
const FOLLOW_UPS: &str = "follow-ups";
const NOTES: &str = "notes";
const EVENTS: &str = "events";
const CLIENTS: &str = "clients";
const USERS: &str = "users";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

pub struct RestSource {
    client: reqwest::Client,
    base: Url,
    session: RwLock<Option<Session>>,
    refresh_lock: Mutex<()>,
    retry: RetryConfig,
}

impl RestSource {
    pub fn new(base: Url, session: Option<Session>, http: &HttpConfig) -> AppResult<Self> {
        if base.cannot_be_a_base() {
            return Err(AppError::config(format!("'{}' cannot be used as an API base URL", base)));
        }
        Ok(Self {
            client: http.build_client()?,
            base,
            session: RwLock::new(session),
            refresh_lock: Mutex::new(()),
            retry: http.to_retry_config(),
        })
    }

    pub fn from_config(config: &AppConfig, http: &HttpConfig) -> AppResult<Self> {
        let base = config
            .api_base()?
            .ok_or_else(|| AppError::config("CRM_API_URL is not set"))?;
        let session = config.api_token.clone().map(|access_token| Session {
            access_token,
            refresh_token: config.refresh_token.clone(),
        });
        Self::new(base, session, http)
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn access_token(&self) -> Option<String> {
        self.session().map(|s| s.access_token)
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config(format!("'{}' cannot be used as an API base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> AppResult<T> {
        let url = self.endpoint(segments)?;
        retry_with_exponential_backoff(&self.retry, || self.get_authorized(url.clone())).await
    }

    async fn get_collection<T: DeserializeOwned>(&self, collection: &str) -> AppResult<Vec<T>> {
        self.get_json(&[collection]).await
    }

    async fn get_client_collection<T: DeserializeOwned>(&self, client_id: i64, collection: &str) -> AppResult<Vec<T>> {
        let id = client_id.to_string();
        self.get_json(&[CLIENTS, id.as_str(), collection]).await
    }

    async fn get_authorized<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        let sent_with = self.access_token();
        let response = self.send(&url, sent_with.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return decode(response).await;
        }

        warn!("Request to {} was unauthorized; refreshing session", url.path());
        self.refresh_rejected(sent_with.as_deref()).await?;
        decode(self.send(&url, self.access_token().as_deref()).await?).await
    }

    async fn send(&self, url: &Url, token: Option<&str>) -> AppResult<Response> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let started = Instant::now();
        let response = request.send().await?;
        log_request("GET", url.path(), response.status().as_u16(), started.elapsed().as_millis() as u64);
        Ok(response)
    }

    /// Refreshes after a `401` for a request sent with `rejected`. Skipped when
    /// another request already replaced that token while this one waited.
    async fn refresh_rejected(&self, rejected: Option<&str>) -> AppResult<()> {
        let _guard = self.refresh_lock.lock().await;
        if self.access_token().as_deref() != rejected {
            debug!("Session was refreshed by a concurrent request");
            return Ok(());
        }
        self.exchange_refresh_token().await
    }

    /// Exchanges the refresh token for a new session.
    pub async fn refresh_session(&self) -> AppResult<()> {
        let _guard = self.refresh_lock.lock().await;
        self.exchange_refresh_token().await
    }

    async fn exchange_refresh_token(&self) -> AppResult<()> {
        let refresh_token = self
            .session()
            .and_then(|s| s.refresh_token)
            .ok_or_else(|| AppError::auth("Session expired and no refresh token is available"))?;

        let url = self.endpoint(&["auth", "refresh"])?;
        let response = self
            .client
            .post(url)
            .json(&RefreshRequest {
                refresh_token: &refresh_token,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::auth(format!("Session refresh rejected with status {}", status.as_u16())));
        }

        let mut refreshed: Session = serde_json::from_str(&response.text().await?)?;
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = Some(refresh_token);
        }
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(refreshed);

        info!("Session refreshed");
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(AppError::auth("Request unauthorized after session refresh"));
    }
    if !status.is_success() {
        return Err(AppError::http(status.as_u16(), body));
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl RecordSource for RestSource {
    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        self.get_collection(TASKS).await
    }

    async fn list_tasks_by_client(&self, client_id: i64) -> AppResult<Vec<Task>> {
        self.get_client_collection(client_id, TASKS).await
    }

    async fn list_followups(&self) -> AppResult<Vec<FollowUp>> {
        self.get_collection(FOLLOW_UPS).await
    }

    async fn list_followups_by_client(&self, client_id: i64) -> AppResult<Vec<FollowUp>> {
        self.get_client_collection(client_id, FOLLOW_UPS).await
    }

    async fn list_notes(&self) -> AppResult<Vec<Note>> {
        self.get_collection(NOTES).await
    }

    async fn list_notes_by_client(&self, client_id: i64) -> AppResult<Vec<Note>> {
        self.get_client_collection(client_id, NOTES).await
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.get_collection(EVENTS).await
    }

    async fn list_events_by_client(&self, client_id: i64) -> AppResult<Vec<Event>> {
        self.get_client_collection(client_id, EVENTS).await
    }

    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.get_collection(CLIENTS).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.get_collection(USERS).await
    }
}
