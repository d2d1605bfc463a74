//! Authenticated session with the VSD controller
//!
//! Every REST call of the entity models goes through a [`Session`]: it
//! builds the URLs from the entities' identities, authenticates with the
//! API key obtained by [`Session::start`], and maps controller error replies
//! to [`RestError::Controller`].
//!
//! ## Configuration
//!
//! [`SessionConfig::from_env`] reads:
//!
//! ```text
//! VSD_API_URL=https://vsd.example.net:8443
//! VSD_API_VERSION=v5_0
//! VSD_USERNAME=csproot
//! VSD_PASSWORD=csproot
//! VSD_ORGANIZATION=csp
//! VSD_INSECURE_TLS=true
//! VSD_TIMEOUT_SECS=30
//! ```

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};
use vsdk_core::config::{get_config, get_config_bool, get_config_int, load_environment};

use crate::entity::RestEntity;
use crate::error::{RestError, Result};
use crate::fetching::FetchingInfo;
use crate::models::Me;

pub const DEFAULT_URL: &str = "https://localhost:8443";
pub const DEFAULT_API_VERSION: &str = "v5_0";
pub const ORGANIZATION_HEADER: &str = "X-Nuage-Organization";

const RESPONSE_CHOICE: [(&str, &str); 1] = [("responseChoice", "1")];
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Session the entity models delegate to
static CURRENT_SESSION: OnceLock<RwLock<Option<Arc<Session>>>> = OnceLock::new();

fn current_slot() -> &'static RwLock<Option<Arc<Session>>> {
    CURRENT_SESSION.get_or_init(|| RwLock::new(None))
}

/// The session installed with [`Session::set_current`]
pub fn current_session() -> Result<Arc<Session>> {
    current_slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(RestError::NoCurrentSession)
}

/// Uninstall the current session, returning it
pub fn clear_current_session() -> Option<Arc<Session>> {
    current_slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

/// Controller endpoint and credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Controller URL without the API path, e.g. `https://vsd:8443`
    pub url: String,
    pub api_version: String,
    pub username: String,
    pub password: String,
    pub organization: String,
    /// Accept self-signed controller certificates
    pub insecure_tls: bool,
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            username: "csproot".to_string(),
            password: "csproot".to_string(),
            organization: "csp".to_string(),
            insecure_tls: true,
            timeout: Duration::from_secs(30),
        }
    }
}

impl SessionConfig {
    /// Build the config from the `VSD_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout_secs = get_config_int("VSD_TIMEOUT_SECS", defaults.timeout.as_secs() as i64);

        Self {
            url: get_config("VSD_API_URL", &defaults.url),
            api_version: get_config("VSD_API_VERSION", &defaults.api_version),
            username: get_config("VSD_USERNAME", &defaults.username),
            password: get_config("VSD_PASSWORD", &defaults.password),
            organization: get_config("VSD_ORGANIZATION", &defaults.organization),
            insecure_tls: get_config_bool("VSD_INSECURE_TLS", defaults.insecure_tls),
            timeout: Duration::from_secs(timeout_secs.max(1) as u64),
        }
    }

    /// `{url}/nuage/api/{api_version}`
    pub fn base_url(&self) -> String {
        format!(
            "{}/nuage/api/{}",
            self.url.trim_end_matches('/'),
            self.api_version
        )
    }
}

/// Session with one controller
pub struct Session {
    client: Client,
    config: SessionConfig,
    base_url: String,
    api_key: RwLock<Option<String>>,
    root: RwLock<Option<Me>>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(RestError::Config("controller URL is empty".to_string()));
        }
        if config.username.is_empty() || config.organization.is_empty() {
            return Err(RestError::Config(
                "username and organization are required".to_string(),
            ));
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(config.insecure_tls)
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            config,
            api_key: RwLock::new(None),
            root: RwLock::new(None),
        })
    }

    /// Create a session from the `VSD_*` environment variables, after
    /// merging in the environment file.
    pub fn from_env() -> Result<Self> {
        load_environment();
        Self::new(SessionConfig::from_env())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticate with the password and keep the API key for later calls
    pub async fn start(&self) -> Result<()> {
        let url = format!("{}/{}", self.base_url, Me::IDENTITY.category);
        info!(
            "Starting session for {}@{} at {}",
            self.config.username, self.config.organization, self.base_url
        );

        let request = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(ORGANIZATION_HEADER, &self.config.organization);
        let response = check(request.send().await?).await?;

        let me: Me = first(decode_list(response).await?, Me::IDENTITY.name)?;
        if me.api_key.is_empty() {
            return Err(RestError::MissingApiKey);
        }

        debug!("Session started for user {}", me.id);
        *self.api_key.write().unwrap_or_else(PoisonError::into_inner) = Some(me.api_key.clone());
        *self.root.write().unwrap_or_else(PoisonError::into_inner) = Some(me);
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The authenticated user, root of the object graph
    pub fn root(&self) -> Result<Me> {
        self.root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(RestError::NotStarted)
    }

    /// Install this session as the one entity methods delegate to
    pub fn set_current(self: &Arc<Self>) {
        *current_slot().write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(self));
    }

    // =========================================================================
    // Entity operations
    // =========================================================================

    /// Reload `entity` from the controller
    pub async fn fetch_entity<E: RestEntity>(&self, entity: &mut E) -> Result<()> {
        let url = self.entity_url(entity)?;
        debug!("GET {}", url);

        let response = self.send(self.request(Method::GET, &url)?).await?;
        *entity = first(decode_list(response).await?, E::IDENTITY.name)?;
        Ok(())
    }

    /// Push the local state of `entity` to the controller
    pub async fn save_entity<E: RestEntity>(&self, entity: &mut E) -> Result<()> {
        let url = self.entity_url(entity)?;
        debug!("PUT {}", url);

        let request = self
            .request(Method::PUT, &url)?
            .query(&RESPONSE_CHOICE)
            .json(entity);
        let response = self.send(request).await?;

        if let Some(saved) = decode_list::<E>(response).await?.into_iter().next() {
            *entity = saved;
        }
        info!("Saved {} {}", E::IDENTITY, entity.identifier());
        Ok(())
    }

    pub async fn delete_entity<E: RestEntity>(&self, entity: &E) -> Result<()> {
        let url = self.entity_url(entity)?;
        debug!("DELETE {}", url);

        let request = self.request(Method::DELETE, &url)?.query(&RESPONSE_CHOICE);
        self.send(request).await?;

        info!("Deleted {} {}", E::IDENTITY, entity.identifier());
        Ok(())
    }

    /// List the `C` children of `parent`. When `info` is given its paging,
    /// filter and grouping options are sent and the reported count is
    /// written back into it.
    pub async fn fetch_children<P: RestEntity, C: RestEntity>(
        &self,
        parent: &P,
        info: Option<&mut FetchingInfo>,
    ) -> Result<Vec<C>> {
        let url = self.children_url::<P, C>(parent)?;
        debug!("GET {}", url);

        let mut request = self.request(Method::GET, &url)?;
        if let Some(info) = info.as_deref() {
            request = info.apply(request);
        }

        let response = self.send(request).await?;
        if let Some(info) = info {
            info.record(response.headers());
        }
        decode_list(response).await
    }

    /// Create `child` under `parent`; the controller's reply, which carries
    /// the new ID, replaces `child`.
    pub async fn create_child<P: RestEntity, C: RestEntity>(
        &self,
        parent: &P,
        child: &mut C,
    ) -> Result<()> {
        let url = self.children_url::<P, C>(parent)?;
        debug!("POST {}", url);

        let request = self
            .request(Method::POST, &url)?
            .query(&RESPONSE_CHOICE)
            .json(child);
        let response = self.send(request).await?;

        *child = first(decode_list(response).await?, C::IDENTITY.name)?;
        info!(
            "Created {} {} under {} {}",
            C::IDENTITY,
            child.identifier(),
            P::IDENTITY,
            parent.identifier()
        );
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn entity_url<E: RestEntity>(&self, entity: &E) -> Result<String> {
        let id = entity.identifier();
        if id.is_empty() {
            return Err(RestError::MissingIdentifier(E::IDENTITY.name));
        }

        if entity.is_root() {
            Ok(format!("{}/{}", self.base_url, E::IDENTITY.category))
        } else {
            Ok(format!("{}/{}/{}", self.base_url, E::IDENTITY.category, id))
        }
    }

    fn children_url<P: RestEntity, C: RestEntity>(&self, parent: &P) -> Result<String> {
        if parent.is_root() {
            return Ok(format!("{}/{}", self.base_url, C::IDENTITY.category));
        }

        let id = parent.identifier();
        if id.is_empty() {
            return Err(RestError::MissingIdentifier(P::IDENTITY.name));
        }
        Ok(format!(
            "{}/{}/{}/{}",
            self.base_url,
            P::IDENTITY.category,
            id,
            C::IDENTITY.category
        ))
    }

    /// Request authenticated with the API key
    fn request(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let api_key = self
            .api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(RestError::NotStarted)?;

        Ok(self
            .client
            .request(method, url)
            .basic_auth(&self.config.username, Some(api_key))
            .header(ORGANIZATION_HEADER, &self.config.organization))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        check(request.send().await?).await
    }
}

/// Turn a non-success reply into [`RestError::Controller`]
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = status.canonical_reason().unwrap_or("");
    let body = response.text().await.unwrap_or_default();
    warn!("Controller request failed: {} - {}", status, body);
    Err(RestError::from_reply(status.as_u16(), reason, &body))
}

/// Decode a JSON array reply; an empty body or 204 is an empty list.
async fn decode_list<T: DeserializeOwned>(response: Response) -> Result<Vec<T>> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(Vec::new());
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&body)?)
}

fn first<T>(items: Vec<T>, name: &'static str) -> Result<T> {
    items.into_iter().next().ok_or(RestError::EmptyResponse(name))
}
