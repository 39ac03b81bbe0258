use axum::http::StatusCode;

pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

pub async fn root_handler() -> &'static str {
    "Hello from the Jokes API!"
}
