//! Egress proxy selection for transcript requests.

use crate::config::{ProxyMode, ProxySettings};
use crate::error::{NotesError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use url::Url;

/// Proxy URLs for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRoute {
    pub http: String,
    pub https: String,
}

/// The configured pool of egress proxies.
///
/// Selection is stateless: every call picks independently, with no
/// stickiness and no health tracking.
#[derive(Debug, Clone)]
pub enum ProxyPool {
    /// Connect directly.
    Direct,
    /// A single proxy pair, typically from `HTTP_PROXY`/`HTTPS_PROXY`.
    Single(ProxyRoute),
    /// A fixed list of `host:port` endpoints sharing one set of credentials.
    Rotating {
        endpoints: Vec<String>,
        username: String,
        password: String,
    },
}

impl ProxyPool {
    /// Build the pool from settings, reading credentials from the environment.
    ///
    /// Fails when the selected mode is missing any of its required values.
    pub fn from_settings(settings: &ProxySettings) -> Result<Self> {
        match settings.mode {
            ProxyMode::None => Ok(ProxyPool::Direct),
            ProxyMode::Single => {
                let http = settings
                    .http_url
                    .clone()
                    .or_else(|| env_var("HTTP_PROXY"))
                    .ok_or_else(|| {
                        NotesError::Config(
                            "proxy.mode is 'single' but neither proxy.http_url nor HTTP_PROXY is set"
                                .to_string(),
                        )
                    })?;
                let https = settings
                    .https_url
                    .clone()
                    .or_else(|| env_var("HTTPS_PROXY"))
                    .unwrap_or_else(|| http.clone());

                validate_proxy_url(&http)?;
                validate_proxy_url(&https)?;

                Ok(ProxyPool::Single(ProxyRoute { http, https }))
            }
            ProxyMode::Rotating => {
                if settings.endpoints.is_empty() {
                    return Err(NotesError::Config(
                        "proxy.mode is 'rotating' but proxy.endpoints is empty".to_string(),
                    ));
                }
                let username = env_var(&settings.username_env).ok_or_else(|| {
                    NotesError::Config(format!("{} not set", settings.username_env))
                })?;
                let password = env_var(&settings.password_env).ok_or_else(|| {
                    NotesError::Config(format!("{} not set", settings.password_env))
                })?;

                let pool = ProxyPool::Rotating {
                    endpoints: settings.endpoints.clone(),
                    username,
                    password,
                };
                // Surface malformed endpoints at startup rather than per fetch.
                for endpoint in &settings.endpoints {
                    pool.route_for(endpoint)?;
                }
                Ok(pool)
            }
        }
    }

    /// Pick a route for the next request, or `None` for a direct connection.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<ProxyRoute>> {
        match self {
            ProxyPool::Direct => Ok(None),
            ProxyPool::Single(route) => Ok(Some(route.clone())),
            ProxyPool::Rotating { endpoints, .. } => match endpoints.choose(rng) {
                Some(endpoint) => self.route_for(endpoint).map(Some),
                None => Ok(None),
            },
        }
    }

    /// Number of distinct routes in the pool.
    pub fn len(&self) -> usize {
        match self {
            ProxyPool::Direct => 0,
            ProxyPool::Single(_) => 1,
            ProxyPool::Rotating { endpoints, .. } => endpoints.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn route_for(&self, endpoint: &str) -> Result<ProxyRoute> {
        let ProxyPool::Rotating {
            username, password, ..
        } = self
        else {
            return Err(NotesError::Config("not a rotating proxy pool".to_string()));
        };

        let mut url = Url::parse(&format!("http://{}", endpoint))
            .map_err(|e| NotesError::Config(format!("Invalid proxy endpoint {}: {}", endpoint, e)))?;
        url.set_username(username)
            .and_then(|_| url.set_password(Some(password)))
            .map_err(|_| NotesError::Config(format!("Invalid proxy endpoint {}", endpoint)))?;

        let url = url.to_string();
        Ok(ProxyRoute {
            http: url.clone(),
            https: url,
        })
    }
}

fn validate_proxy_url(raw: &str) -> Result<()> {
    Url::parse(raw)
        .map(|_| ())
        .map_err(|e| NotesError::Config(format!("Invalid proxy URL {}: {}", raw, e)))
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
