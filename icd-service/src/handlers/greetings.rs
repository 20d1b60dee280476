use crate::dtos::MessageResponse;
use axum::{extract::Path, response::IntoResponse, Json};

pub async fn root() -> impl IntoResponse {
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}

/// Echoes the path segment verbatim into the greeting.
pub async fn say_hello(Path(name): Path<String>) -> impl IntoResponse {
    Json(MessageResponse {
        message: format!("Hello {}", name),
    })
}
