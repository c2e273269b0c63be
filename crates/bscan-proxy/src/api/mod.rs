mod lookup;
mod search;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;
use crate::upstream::{UpstreamClient, UpstreamError};

#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// Error envelope shared by every failure response.
///
/// Callers branch on `success`, not HTTP status alone: `NOT_FOUND` rides a
/// 404 but is still a well-formed response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    code: &'static str,
}

/// A failure translated into the proxy's response envelope.
#[derive(Debug)]
pub(super) struct ApiFailure {
    status: StatusCode,
    code: &'static str,
    error: String,
}

impl ApiFailure {
    fn new(status: StatusCode, code: &'static str, error: impl Into<String>) -> Self {
        Self {
            status,
            code,
            error: error.into(),
        }
    }

    pub(super) fn invalid_barcode() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "INVALID_BARCODE",
            "Barcode parameter is required",
        )
    }

    pub(super) fn invalid_query() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "INVALID_QUERY",
            "Query parameter \"q\" is required",
        )
    }

    pub(super) fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "No product found for this barcode",
        )
    }

    /// Translates an upstream fault: non-2xx statuses are relayed as
    /// `API_ERROR`, unreachable/timed-out upstreams become 503, anything
    /// else is an internal fault.
    pub(super) fn from_upstream(err: &UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, message } => Self::new(
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "API_ERROR",
                message.clone(),
            ),
            UpstreamError::Http(e) if e.is_timeout() || e.is_connect() => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "BarcodeLookup API is not responding",
            ),
            UpstreamError::Http(_) | UpstreamError::Deserialize { .. }
            | UpstreamError::InvalidUrl { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            ),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                success: false,
                error: self.error,
                code: self.code,
            }),
        )
            .into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/health", get(health))
        .route("/api/lookup/{barcode}", get(lookup::lookup_barcode))
        .route("/api/search", get(search::search_products))
        .fallback(unknown_route)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

fn route_listing() -> Value {
    json!({
        "health": "GET /health",
        "lookup": "GET /api/lookup/{barcode}",
        "search": "GET /api/search?q=keyword&page=1",
    })
}

async fn info() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "BarcodeLookup proxy service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": route_listing(),
    }))
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

async fn health() -> impl IntoResponse {
    Json(HealthData {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

async fn unknown_route() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found",
            "code": "NOT_FOUND",
            "availableEndpoints": route_listing(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(upstream_url: &str) -> Router {
        let upstream = UpstreamClient::with_endpoint(upstream_url, "test-key", 10, "test-agent")
            .expect("upstream client construction should not fail");
        build_app(AppState { upstream })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[tokio::test]
    async fn lookup_returns_product_for_known_barcode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("barcode", "049000050103"))
            .and(query_param("formatted", "y"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [ { "title": "Coca-Cola" } ]
            })))
            .mount(&server)
            .await;

        let (status, body) = get_json(test_app(&server.uri()), "/api/lookup/049000050103").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["product"]["title"], "Coca-Cola");
        assert_eq!(body["totalProducts"], 1);
        assert!(body["data"]["products"].is_array());
    }

    #[tokio::test]
    async fn lookup_with_empty_products_returns_404_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
            .mount(&server)
            .await;

        let (status, body) = get_json(test_app(&server.uri()), "/api/lookup/xyz").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn lookup_with_blank_barcode_returns_400_without_upstream_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
            .expect(0)
            .mount(&server)
            .await;

        let (status, body) = get_json(test_app(&server.uri()), "/api/lookup/%20%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_BARCODE");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn search_without_query_returns_400_invalid_query() {
        let server = MockServer::start().await;
        let (status, body) = get_json(test_app(&server.uri()), "/api/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn search_forwards_query_and_defaults_page_to_1() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("search", "iPhone"))
            .and(query_param("page", "1"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [ { "title": "iPhone 15" }, { "title": "iPhone case" } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get_json(test_app(&server.uri()), "/api/search?q=iPhone").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["totalProducts"], 2);
        assert_eq!(body["products"][0]["title"], "iPhone 15");
    }

    #[tokio::test]
    async fn search_allows_an_empty_result_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
            .mount(&server)
            .await;

        let (status, body) =
            get_json(test_app(&server.uri()), "/api/search?q=nosuchthing&page=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["totalProducts"], 0);
        assert_eq!(body["products"], json!([]));
    }

    #[tokio::test]
    async fn upstream_error_status_is_relayed_with_api_error_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({ "message": "Invalid API key" })),
            )
            .mount(&server)
            .await;

        let (status, body) = get_json(test_app(&server.uri()), "/api/lookup/049000050103").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "API_ERROR");
        assert_eq!(body["error"], "Invalid API key");
    }

    #[tokio::test]
    async fn unreachable_upstream_returns_503_service_unavailable() {
        // Nothing listens on port 1; the connect fails immediately.
        let (status, body) = get_json(test_app("http://127.0.0.1:1"), "/api/lookup/123").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unknown_route_returns_404_with_route_listing() {
        let server = MockServer::start().await;
        let (status, body) = get_json(test_app(&server.uri()), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body["availableEndpoints"]["lookup"].is_string());
    }

    #[tokio::test]
    async fn health_reports_healthy_with_timestamp() {
        let server = MockServer::start().await;
        let (status, body) = get_json(test_app(&server.uri()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn info_route_lists_endpoints() {
        let server = MockServer::start().await;
        let (status, body) = get_json(test_app(&server.uri()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["endpoints"]["search"].is_string());
    }

    #[tokio::test]
    async fn responses_echo_the_inbound_request_id() {
        let server = MockServer::start().await;
        let app = test_app(&server.uri());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("req-42")
        );
    }
}
