//! Access-cookie seam
//!
//! The session writes the token cookie through this trait; whatever jar
//! backs it is what page loads present to the route guard.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

pub trait CookieJar: Send + Sync {
    /// Set a session cookie (no expiry) scoped to `path`.
    fn set(&self, name: &str, value: &str, path: &str);

    /// Delete the cookie; deleting a missing cookie is a no-op.
    fn remove(&self, name: &str, path: &str);

    fn get(&self, name: &str) -> Option<String>;
}

/// In-memory jar recording cookie paths for assertions
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: Mutex<HashMap<String, (String, String)>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path the cookie was set with
    pub fn path_of(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies.get(name).map(|(_, path)| path.clone())
    }
}

impl CookieJar for MemoryCookieJar {
    fn set(&self, name: &str, value: &str, path: &str) {
        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies.insert(name.to_string(), (value.to_string(), path.to_string()));
    }

    fn remove(&self, name: &str, path: &str) {
        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        if cookies.get(name).is_some_and(|(_, p)| p == path) {
            cookies.remove(name);
        }
    }

    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies.get(name).map(|(value, _)| value.clone())
    }
}
