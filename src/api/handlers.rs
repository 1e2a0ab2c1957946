use axum::{
    extract::{rejection::JsonRejection, Query},
    response::Response,
    Json,
};
use tracing::{debug, info, instrument, warn};

use super::{
    session::CurrentSession,
    types::{CardPayload, ReturnCardQuery},
};
use crate::game::Card;
use crate::session::Session;
use crate::shared::AppError;

const USAGE: &str = "\
deck-service: a personal deck of 52 cards per session cookie

GET  /cards                 show the deck, top card first
POST /cards/shuffle         shuffle the deck
POST /cards/deal            deal the top card
POST /cards/return          return a card to the bottom, body {\"value\": \"ace\", \"suit\": \"clubs\"}
GET  /cards/return?card=ac  return a card by long (\"ace of clubs\") or short (\"ac\") name

GET /cards/shuffle and GET /cards/deal are browser-friendly aliases.
";

/// HTTP handler for the usage page
///
/// GET /
pub async fn index() -> &'static str {
    USAGE
}

/// HTTP handler for showing the current deck
///
/// GET /cards
#[instrument(name = "show_deck", skip_all, fields(new_session = current.is_new()))]
pub async fn show_deck(current: CurrentSession) -> Response {
    let cards = current.session().deck().cards().to_vec();
    debug!(cards = cards.len(), "Showing deck");

    current.respond(Ok(Json(cards)))
}

/// HTTP handler for shuffling the deck
///
/// POST /cards/shuffle (GET is accepted for in-browser testing)
#[instrument(name = "shuffle_deck", skip_all, fields(new_session = current.is_new()))]
pub async fn shuffle_deck(current: CurrentSession) -> Response {
    let cards = current.session().with_deck(|deck| {
        deck.shuffle();
        deck.cards().to_vec()
    });
    info!(cards = cards.len(), "Deck shuffled");

    current.respond(Ok(Json(cards)))
}

/// HTTP handler for dealing the top card
///
/// POST /cards/deal (GET is accepted for in-browser testing)
/// Returns 409 when the deck is empty
#[instrument(name = "deal_card", skip_all, fields(new_session = current.is_new()))]
pub async fn deal_card(current: CurrentSession) -> Response {
    let result = current.session().with_deck(|deck| deck.deal_card());

    match &result {
        Ok(card) => info!(card = %card, "Card dealt"),
        Err(err) => warn!(error = %err, "Could not deal card"),
    }

    current.respond(result.map(Json).map_err(AppError::from))
}

/// HTTP handler for returning a card described by a JSON body
///
/// POST /cards/return
/// Returns the deck after the card was put at the bottom
#[instrument(name = "return_card", skip_all, fields(new_session = current.is_new()))]
pub async fn return_card(
    current: CurrentSession,
    payload: Result<Json<CardPayload>, JsonRejection>,
) -> Response {
    let result = payload
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
        .and_then(|Json(payload)| payload.to_card())
        .and_then(|card| return_to_deck(current.session(), card));

    current.respond(result)
}

/// HTTP handler for returning a card named in the query string
///
/// GET /cards/return?card={card}
#[instrument(name = "return_card_by_name", skip_all, fields(new_session = current.is_new()))]
pub async fn return_card_by_name(
    current: CurrentSession,
    Query(query): Query<ReturnCardQuery>,
) -> Response {
    let result = query
        .card
        .ok_or_else(|| {
            AppError::BadRequest("the required url parameter 'card' is missing".to_string())
        })
        .and_then(|name| Card::parse(&name).map_err(AppError::from))
        .and_then(|card| return_to_deck(current.session(), card));

    current.respond(result)
}

fn return_to_deck(session: &Session, card: Card) -> Result<Json<Vec<Card>>, AppError> {
    session
        .with_deck(|deck| -> Result<_, AppError> {
            deck.return_card(card)?;
            Ok(Json(deck.cards().to_vec()))
        })
        .inspect(|_| info!(card = %card, "Card returned"))
        .inspect_err(|err| warn!(error = %err, card = %card, "Could not return card"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionManager;
    use crate::shared::AppState;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    fn app(sessions: Arc<SessionManager>) -> Router {
        Router::new()
            .route("/cards", get(show_deck))
            .route("/cards/deal", post(deal_card))
            .route("/cards/return", post(return_card).get(return_card_by_name))
            .with_state(AppState::new(sessions))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_show_deck_handler_issues_cookie() {
        let sessions = Arc::new(SessionManager::new());
        let request = Request::builder()
            .uri("/cards")
            .body(Body::empty())
            .unwrap();

        let response = app(Arc::clone(&sessions)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));

        let cards: Vec<Card> = body_json(response).await;
        assert_eq!(cards, Card::all_cards());
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_known_cookie_reuses_session() {
        let sessions = Arc::new(SessionManager::new());
        sessions
            .get_or_create("abc")
            .with_deck(|deck| deck.deal_card())
            .unwrap();

        let request = Request::builder()
            .uri("/cards")
            .header(header::COOKIE, "session=abc")
            .body(Body::empty())
            .unwrap();
        let response = app(Arc::clone(&sessions)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let cards: Vec<Card> = body_json(response).await;
        assert_eq!(cards.len(), 51);
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_deal_card_handler_empty_deck() {
        let sessions = Arc::new(SessionManager::new());
        let session = sessions.get_or_create("abc");
        session.with_deck(|deck| while deck.deal_card().is_ok() {});

        let request = Request::builder()
            .method("POST")
            .uri("/cards/deal")
            .header(header::COOKIE, "session=abc")
            .body(Body::empty())
            .unwrap();
        let response = app(sessions).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body["error"], "the deck is empty");
    }

    #[tokio::test]
    async fn test_return_card_handler_bad_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/cards/return")
            .header(header::COOKIE, "session=abc")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"value": "ace"}"#))
            .unwrap();
        let response = app(Arc::new(SessionManager::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_return_card_by_name_missing_parameter() {
        let request = Request::builder()
            .uri("/cards/return")
            .header(header::COOKIE, "session=abc")
            .body(Body::empty())
            .unwrap();
        let response = app(Arc::new(SessionManager::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body["error"], "the required url parameter 'card' is missing");
    }

    #[tokio::test]
    async fn test_index_lists_routes() {
        assert!(index().await.contains("/cards/deal"));
    }
}
