use std::time::Duration;

use axum::http::{header, HeaderName, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_joke_handler, delete_joke_handler, get_joke_handler, health_handler,
    list_jokes_handler, not_found_handler, random_joke_handler, root_handler,
    update_joke_handler,
};
use crate::middleware::{
    enforce_request_timeout, panic_response, require_admin_key, ADMIN_API_KEY_HEADER,
};
use crate::state::AppState;

const CORS_MAX_AGE: Duration = Duration::from_secs(300);

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        let public = Router::new()
            .route("/", get(root_handler))
            .route("/healthz", get(health_handler))
            .route("/api/joke", get(list_jokes_handler))
            .route("/api/joke/", get(list_jokes_handler))
            .route("/api/joke/random", get(random_joke_handler))
            .route("/api/joke/{id}", get(get_joke_handler));

        // route_layer: the gate only runs for matched admin routes.
        let admin = Router::new()
            .route("/api/admin/joke", post(create_joke_handler))
            .route(
                "/api/admin/joke/{id}",
                put(update_joke_handler).delete(delete_joke_handler),
            )
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                require_admin_key,
            ));

        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(Self::cors())
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                enforce_request_timeout,
            ));

        Router::new()
            .merge(public)
            .merge(admin)
            .fallback(not_found_handler)
            .layer(middleware)
            .with_state(state)
    }

    fn cors() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::ACCEPT,
                header::CONTENT_TYPE,
                HeaderName::from_static(ADMIN_API_KEY_HEADER),
            ])
            .expose_headers([header::LOCATION])
            .max_age(CORS_MAX_AGE)
    }
}
