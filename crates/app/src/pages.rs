//! Site pages
//!
//! Placeholder shells for the pages the route guard protects; the recipe UI
//! renders client-side against the API.

use axum::{http::StatusCode, response::Html};

fn shell(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>{title} | RecipeHub</title></head>\
         <body><main><h1>{title}</h1>{body}</main></body></html>"
    ))
}

pub async fn home() -> Html<String> {
    shell("RecipeHub", "<p>Share and discover recipes.</p>")
}

pub async fn sign_in() -> Html<String> {
    shell("Sign in", r#"<form id="signin"></form>"#)
}

pub async fn sign_up() -> Html<String> {
    shell("Sign up", r#"<form id="signup"></form>"#)
}

pub async fn forgot_password() -> Html<String> {
    shell("Forgot password", r#"<form id="forgot-password"></form>"#)
}

pub async fn reset_password() -> Html<String> {
    shell("Reset password", r#"<form id="reset-password"></form>"#)
}

pub async fn dashboard() -> Html<String> {
    shell("Dashboard", "<p>Your recipes and categories.</p>")
}

pub async fn recipe_catalog() -> Html<String> {
    shell("Recipe catalog", r#"<section id="recipes"></section>"#)
}

pub async fn recipe_detail() -> Html<String> {
    shell("Recipe", r#"<article id="recipe"></article>"#)
}

pub async fn recipe_editor() -> Html<String> {
    shell("Recipe editor", r#"<form id="recipe-editor"></form>"#)
}

pub async fn admin_users() -> Html<String> {
    shell("Users", r#"<table id="users"></table>"#)
}

pub async fn unauthorized() -> Html<String> {
    shell(
        "Unauthorized",
        "<p>You do not have access to this page.</p>",
    )
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, shell("Not found", ""))
}

pub async fn robots() -> &'static str {
    "User-agent: *\nDisallow: /admin\n"
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
