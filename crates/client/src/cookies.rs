//! Cookie jar shared between the session store and page loads

use std::sync::Arc;

use recipehub_auth::cookie::{clear_cookie_value, cookie_value, set_cookie_value};
use recipehub_session::CookieJar;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, COOKIE};
use reqwest::Url;

use crate::ApiError;

/// [`CookieJar`] over a reqwest jar scoped to the site URL.
///
/// Hand [`SiteCookieJar::jar`] to the HTTP client making page loads so the
/// route guard receives exactly the cookie the session wrote.
#[derive(Debug, Clone)]
pub struct SiteCookieJar {
    jar: Arc<Jar>,
    site: Url,
}

impl SiteCookieJar {
    pub fn new(site_url: &str) -> Result<Self, ApiError> {
        let site = Url::parse(site_url)
            .map_err(|e| ApiError::Configuration(format!("Invalid site URL {site_url}: {e}")))?;

        Ok(Self {
            jar: Arc::new(Jar::default()),
            site,
        })
    }

    pub fn jar(&self) -> Arc<Jar> {
        self.jar.clone()
    }
}

impl CookieJar for SiteCookieJar {
    fn set(&self, name: &str, value: &str, path: &str) {
        self.jar
            .add_cookie_str(&set_cookie_value(name, value, path), &self.site);
    }

    fn remove(&self, name: &str, path: &str) {
        self.jar
            .add_cookie_str(&clear_cookie_value(name, path), &self.site);
    }

    fn get(&self, name: &str) -> Option<String> {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, self.jar.cookies(&self.site)?);
        cookie_value(&headers, name)
    }
}
