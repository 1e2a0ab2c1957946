use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use deck_service::Card;
use serde::de::DeserializeOwned;

// ============================================================================
// Request builders
// ============================================================================

fn builder(method: &str, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(id) => builder.header(header::COOKIE, format!("session={}", id)),
        None => builder,
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    builder("GET", uri, cookie).body(Body::empty()).unwrap()
}

pub fn post(uri: &str, cookie: Option<&str>) -> Request<Body> {
    builder("POST", uri, cookie).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    builder("POST", uri, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Response helpers
// ============================================================================

/// Session id from the response's Set-Cookie header, if one was issued.
pub fn cookie_from(response: &Response) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let (pair, _) = value.split_once(';')?;
    let (name, id) = pair.split_once('=')?;
    (name == "session").then(|| id.to_string())
}

pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_cards(response: Response) -> Vec<Card> {
    body_json(response).await
}
