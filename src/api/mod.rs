use anyhow::Result;
use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::routing::{get, post, put};
use axum::{middleware, Extension, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::set_header::SetRequestHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::user::{gate, profile, sign_in, sign_out, sign_up, AuthState};
use crate::api::handlers::{health, root};

pub mod handlers;
mod openapi;

pub use openapi::openapi;

/// Start the server
///
/// # Errors
///
/// Return error if failed to bind the port or serve requests
pub async fn new(port: u16, state: Arc<AuthState>) -> Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the application router.
///
/// The session gate wraps only the profile route; the trace and request-id
/// layers wrap everything. Unmatched routes fall through without error
/// logging (the failure classifier only flags server errors).
#[must_use]
pub fn router(state: Arc<AuthState>) -> Router {
    let protected = Router::new()
        .route("/profile", get(profile::profile))
        .route_layer(middleware::from_fn(gate::session_gate));

    let user_routes = Router::new()
        .route("/sign-up", put(sign_up::sign_up))
        .route("/sign-in", post(sign_in::sign_in))
        .route("/sign-out", get(sign_out::sign_out))
        .merge(protected);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .route("/", get(root::root))
        .route("/health", get(health::health).options(health::health))
        .nest("/user", user_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Gracefully shutdown");
    }
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
