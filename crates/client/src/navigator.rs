//! Page loads against the guarded site
//!
//! Requests carry whatever the shared cookie jar holds, so the route guard
//! sees the same access cookie the session store wrote. Redirects are not
//! followed; the guard's decision is reported in [`PageLoad`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;

use crate::ApiError;

/// Result of a single page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoad {
    pub path: String,
    pub status: u16,
    /// `Location` of a redirect response
    pub location: Option<String>,
    pub body: String,
}

impl PageLoad {
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status) && self.location.is_some()
    }

    /// Redirect target, or the requested path when the page was served.
    pub fn landed_on(&self) -> &str {
        match &self.location {
            Some(location) if self.is_redirect() => location,
            _ => &self.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteNavigator {
    http: reqwest::Client,
    site_url: String,
}

impl SiteNavigator {
    pub fn new(site_url: &str, jar: Arc<Jar>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_provider(jar)
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            site_url: site_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub async fn navigate(&self, path: &str) -> Result<PageLoad, ApiError> {
        let url = format!("{}/{}", self.site_url, path.trim_start_matches('/'));

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::error!(path, error = %e, "Page load failed");
            ApiError::NetworkOrServer {
                status: None,
                message: e.to_string(),
            }
        })?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();

        tracing::debug!(path, status, location = ?location, "Page loaded");

        Ok(PageLoad {
            path: path.to_string(),
            status,
            location,
            body,
        })
    }
}
