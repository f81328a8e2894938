use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::error::{LegitrackError, Result};

const API_BASE: &str = "https://dadosabertos.camara.leg.br/api/v2";
const ARCHIVE_BASE: &str = "https://dadosabertos.camara.leg.br/arquivos/proposicoes/json";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API (`/api/v2`)
    pub api_base: String,
    /// Base URL of the yearly bulk archives
    pub archive_base: String,
    /// Timeout for REST calls, in seconds
    pub rest_timeout: u64,
    /// Timeout for bulk archive downloads, in seconds
    pub archive_timeout: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            archive_base: ARCHIVE_BASE.to_string(),
            rest_timeout: 25,
            archive_timeout: 40,
            user_agent: format!("legitrack/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blocking client for the Câmara dos Deputados open-data API.
///
/// Stateless aside from the injected configuration: every call is a single
/// attempt with a fixed timeout, and failures on the primary paths always
/// surface as [`LegitrackError::Fetch`].
pub struct CamaraClient {
    config: ClientConfig,
    http: Client,
}

impl CamaraClient {
    pub fn new(config: ClientConfig) -> Self {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, http }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET `api_base + path` with query parameters and decode the JSON body.
    pub(crate) fn get_api(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = Url::parse_with_params(&format!("{}{}", self.config.api_base, path), params)
            .map_err(|e| LegitrackError::Parse(e.to_string()))?;

        self.get_json(url, Duration::from_secs(self.config.rest_timeout))
    }

    /// GET an absolute archive URL with the longer archive timeout.
    pub(crate) fn get_archive(&self, url: &str) -> Result<Value> {
        let url = Url::parse(url).map_err(|e| LegitrackError::Parse(e.to_string()))?;

        self.get_json(url, Duration::from_secs(self.config.archive_timeout))
    }

    /// Best-effort GET against a caller-supplied absolute URL.
    ///
    /// Contract: any failure (malformed URL, transport error, non-2xx
    /// status, undecodable body) returns `None` instead of an error. Used
    /// for non-critical fallback links embedded in upstream records.
    pub fn fetch_uri(&self, uri: &str) -> Option<Value> {
        let url = match Url::parse(uri) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping malformed fallback URI {}: {}", uri, e);
                return None;
            }
        };

        match self.get_json(url, Duration::from_secs(self.config.rest_timeout)) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!("Fallback fetch failed: {}", e);
                None
            }
        }
    }

    fn get_json(&self, url: Url, timeout: Duration) -> Result<Value> {
        debug!("GET {}", url);
        let target = url.to_string();

        let response = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| LegitrackError::Fetch {
                url: target.clone(),
                source: e,
            })?;

        response.json().map_err(|e| LegitrackError::Fetch {
            url: target,
            source: e,
        })
    }
}
