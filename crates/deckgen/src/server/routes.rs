use super::AppState;
use crate::prelude::{Error, Operation};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use deckgen_core::deck::{GenerationRequest, SlideEditRequest, SlideImageRequest};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the HTTP surface: three POST endpoints plus a health probe.
///
/// Pre-flight `OPTIONS` requests are answered by the CORS layer; any other
/// method on a POST route gets a 405 in the standard error envelope.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .route(
            "/generate-ppt-content",
            post(generate_deck).fallback(method_not_allowed),
        )
        .route(
            "/regenerate-slide",
            post(regenerate_slide).fallback(method_not_allowed),
        )
        .route(
            "/generate-slide-image",
            post(generate_slide_image).fallback(method_not_allowed),
        )
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

async fn generate_deck(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Response {
    let operation = Operation::GenerateDeck;
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(operation, rejection),
    };

    match crate::generate::generate_deck_data(&state.invoker, &request).await {
        Ok(deck) => Json(json!({ "content": deck })).into_response(),
        Err(e) => failure(operation, e, json!({})),
    }
}

async fn regenerate_slide(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SlideEditRequest>, JsonRejection>,
) -> Response {
    let operation = Operation::RegenerateSlide;
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(operation, rejection),
    };

    match crate::regenerate::regenerate_slide_data(&state.invoker, &request).await {
        Ok(slide) => Json(json!({ "slide": slide })).into_response(),
        Err(e) => failure(operation, e, json!({})),
    }
}

async fn generate_slide_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SlideImageRequest>, JsonRejection>,
) -> Response {
    let operation = Operation::GenerateImage;
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(operation, rejection),
    };

    match crate::image::generate_image_data(&state.invoker, &request).await {
        Ok(url) => Json(json!({ "success": true, "imageUrl": url })).into_response(),
        Err(e) => failure(operation, e, json!({ "success": false })),
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

fn rejected(operation: Operation, rejection: JsonRejection) -> Response {
    failure(
        operation,
        Error::InvalidRequest(rejection.body_text()),
        if operation == Operation::GenerateImage {
            json!({ "success": false })
        } else {
            json!({})
        },
    )
}

/// Render an error as `{ "error": message }`, merged into `extra`.
fn failure(operation: Operation, error: Error, mut extra: Value) -> Response {
    log::error!("Error in {}: {}", operation.name(), error);

    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if let Value::Object(map) = &mut extra {
        map.insert(
            "error".to_string(),
            Value::String(error.client_message(operation)),
        );
    }

    (status, Json(extra)).into_response()
}
