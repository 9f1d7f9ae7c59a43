//! Route guard integration tests
//!
//! Drives the composed site router with access cookies minted by the test
//! harness and checks each navigation outcome.

mod common;

use axum::http::StatusCode;
use recipehub_auth::Role;

use crate::common::{load_page, site_router, TestConfig};

mod test_navigation_scenarios {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_no_cookie_redirects_to_signin() {
        let router = site_router(&TestConfig::from_env());

        let (status, location) = load_page(&router, "/dashboard", None).await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/signin"));
    }

    #[test_log::test(tokio::test)]
    async fn test_viewer_on_admin_page_redirects_to_unauthorized() {
        let config = TestConfig::from_env();
        let router = site_router(&config);
        let token = config.token("viewer-1", Role::Viewer, 3600);

        let (status, location) = load_page(&router, "/admin/users", Some(&token)).await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/unauthorized"));
    }

    #[test_log::test(tokio::test)]
    async fn test_admin_with_fresh_token_reaches_admin_page() {
        let config = TestConfig::from_env();
        let router = site_router(&config);
        let token = config.token("admin-1", Role::Admin, 3600);

        let (status, location) = load_page(&router, "/admin/users", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(location, None);
    }

    #[test_log::test(tokio::test)]
    async fn test_just_expired_token_redirects_to_signin() {
        let config = TestConfig::from_env();
        let router = site_router(&config);
        let token = config.token("viewer-2", Role::Viewer, -1);

        let (status, location) = load_page(&router, "/dashboard", Some(&token)).await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/signin"));
    }

    #[test_log::test(tokio::test)]
    async fn test_signed_in_visitor_may_still_open_signin() {
        let config = TestConfig::from_env();
        let router = site_router(&config);
        let token = config.token("viewer-3", Role::Viewer, 3600);

        let (status, location) = load_page(&router, "/signin", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(location, None);
    }
}

mod test_token_validation {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_forged_signature_is_rejected() {
        let config = TestConfig::from_env();
        let router = site_router(&config);
        let token = config.forged_token("admin-2", Role::Admin);

        let (status, location) = load_page(&router, "/admin/users", Some(&token)).await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/signin"));
    }

    #[test_log::test(tokio::test)]
    async fn test_malformed_cookie_redirects_to_signin() {
        let router = site_router(&TestConfig::from_env());

        let (status, location) = load_page(&router, "/recipe-catalog", Some("garbage")).await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/signin"));
    }

    #[test_log::test(tokio::test)]
    async fn test_every_role_reaches_member_pages() {
        let config = TestConfig::from_env();
        let router = site_router(&config);

        for role in [Role::Admin, Role::Contributor, Role::Viewer] {
            let token = config.token("member", role, 60);
            for path in ["/dashboard", "/recipe-catalog", "/recipe-detail", "/recipe-editor"] {
                let (status, _) = load_page(&router, path, Some(&token)).await;
                assert_eq!(status, StatusCode::OK, "{role} on {path}");
            }
        }
    }
}

mod test_public_and_excluded_paths {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_public_pages_ignore_invalid_tokens() {
        let router = site_router(&TestConfig::from_env());

        for path in ["/", "/signin", "/signup", "/forgot-password", "/reset-password"] {
            let (status, _) = load_page(&router, path, Some("garbage")).await;
            assert_eq!(status, StatusCode::OK, "{path}");
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_excluded_prefixes_skip_guard() {
        let router = site_router(&TestConfig::from_env());

        assert_eq!(load_page(&router, "/robots.txt", None).await.0, StatusCode::OK);
        assert_eq!(
            load_page(&router, "/favicon.ico", None).await.0,
            StatusCode::NO_CONTENT
        );
        // Not hosted by the site, but never redirected
        assert_eq!(
            load_page(&router, "/api/recipes", None).await.0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            load_page(&router, "/static/app.js", None).await.0,
            StatusCode::NOT_FOUND
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_admin_prefix_matches_raw_prefix() {
        let config = TestConfig::from_env();
        let router = site_router(&config);
        let token = config.token("contributor-1", Role::Contributor, 3600);

        let (status, location) = load_page(&router, "/administrator", Some(&token)).await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/unauthorized"));
    }
}
