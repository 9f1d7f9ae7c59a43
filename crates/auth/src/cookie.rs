//! Access-cookie helpers shared by the route guard and the session store

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Name of the cookie carrying the raw bearer token
pub const TOKEN_COOKIE: &str = "token";

/// Path scope of the access cookie
pub const TOKEN_COOKIE_PATH: &str = "/";

/// Value of cookie `name` across every `Cookie` header in `headers`.
///
/// Empty values count as absent: a cleared cookie is `token=`.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for a session cookie (no expiry) scoped to `path`.
pub fn set_cookie_value(name: &str, value: &str, path: &str) -> String {
    Cookie::build((name, value)).path(path).build().to_string()
}

/// `Set-Cookie` value deleting `name` by expiring it in the past.
pub fn clear_cookie_value(name: &str, path: &str) -> String {
    let mut cookie = Cookie::build((name, "")).path(path).build();
    cookie.make_removal();
    cookie.to_string()
}
