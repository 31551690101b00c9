//! HTTP API routes
//!
//! The JSON endpoints the page calls back into. Everything else is served
//! from the `static/` directory.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::geo::device::Geolocator;
use crate::geo::GeoBackend;
use crate::server::state::AppState;
use crate::widget::state::LocationSnapshot;
use crate::widget::view::{MapStatus, PageConfig, View};

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Locate the static files directory
///
/// `static/` under the working directory wins, then `static/` next to the
/// executable.
fn static_dir() -> PathBuf {
    let local = Path::new("static");
    if local.exists() {
        return local.to_path_buf();
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
        .filter(|path| path.exists())
        .unwrap_or_else(|| local.to_path_buf())
}

/// Create the API router
pub fn create_router<B, L>(state: Arc<AppState<B, L>>) -> Router
where
    B: GeoBackend + 'static,
    L: Geolocator + 'static,
{
    Router::new()
        .route("/api/view", get(view_handler::<B, L>))
        .route("/api/page", get(page_handler::<B, L>))
        .route("/api/state", get(state_handler::<B, L>))
        .route(
            "/api/search",
            put(search_text_handler::<B, L>).post(search_handler::<B, L>),
        )
        .route("/api/marker", post(marker_handler::<B, L>))
        .route("/api/map/status", post(map_status_handler::<B, L>))
        .route("/api/status", get(status_handler::<B, L>))
        .route("/api/formats", get(formats_handler))
        .fallback_service(ServeDir::new(static_dir()).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Config(_) | Error::MissingApiKey(_) => "CONFIG_ERROR",
            Error::Geocoding(_) | Error::GeocodingRejected { .. } => "GEOCODING_ERROR",
            Error::Geolocation(_) => "LOCATION_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Render model
///
/// GET /api/view
async fn view_handler<B, L>(State(state): State<Arc<AppState<B, L>>>) -> Json<View>
where
    B: GeoBackend + 'static,
    L: Geolocator + 'static,
{
    state.start_bootstrap();
    Json(state.widget.render().await)
}

/// Settings the page needs before it can draw the map
///
/// GET /api/page
async fn page_handler<B, L>(State(state): State<Arc<AppState<B, L>>>) -> Json<PageConfig>
where
    B: GeoBackend + 'static,
    L: Geolocator + 'static,
{
    Json(state.page_config())
}

/// Current location state
///
/// GET /api/state
async fn state_handler<B, L>(State(state): State<Arc<AppState<B, L>>>) -> Json<LocationSnapshot>
where
    B: GeoBackend + 'static,
    L: Geolocator + 'static,
{
    Json(state.widget.snapshot().await)
}

/// Search box text
#[derive(Debug, Deserialize)]
pub struct SearchTextRequest {
    pub query: String,
}

/// Update the search box text
///
/// PUT /api/search
async fn search_text_handler<B, L>(
    State(state): State<Arc<AppState<B, L>>>,
    Json(req): Json<SearchTextRequest>,
) -> Json<LocationSnapshot>
where
    B: GeoBackend + 'static,
    L: Geolocator + 'static,
{
    state.widget.set_search_query(req.query).await;
    Json(state.widget.snapshot().await)
}

/// Search submission; `query` replaces the search text first when present
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Submit a search
///
/// POST /api/search
async fn search_handler<B, L>(
    State(state): State<Arc<AppState<B, L>>>,
    Json(req): Json<SearchRequest>,
) -> Json<LocationSnapshot>
where
    B: GeoBackend + 'static,
    L: Geolocator + 'static,
{
    if let Some(query) = req.query {
        state.widget.set_search_query(query).await;
    }
    state.widget.submit_search().await;
    Json(state.widget.snapshot().await)
}

/// Marker drag end position
#[derive(Debug, Deserialize)]
pub struct MarkerRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Marker drag end
///
/// POST /api/marker
async fn marker_handler<B, L>(
    State(state): State<Arc<AppState<B, L>>>,
    Json(req): Json<MarkerRequest>,
) -> Result<Json<LocationSnapshot>, ApiError>
where
    B: GeoBackend + 'static,
    L: Geolocator + 'static,
{
    let coords = Coordinates::new(req.lat, req.lng);
    coords.validate().map_err(ApiError::from)?;

    state.widget.marker_drag_end(coords).await;
    Ok(Json(state.widget.snapshot().await))
}

/// Map widget load report
#[derive(Debug, Deserialize)]
pub struct MapStatusRequest {
    pub loaded: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Report whether the map widget loaded
///
/// POST /api/map/status
async fn map_status_handler<B, L>(
    State(state): State<Arc<AppState<B, L>>>,
    Json(req): Json<MapStatusRequest>,
) -> Json<MapStatus>
where
    B: GeoBackend + 'static,
    L: Geolocator + 'static,
{
    if req.loaded {
        state.widget.map_loaded().await;
    } else {
        let reason = req.error.unwrap_or_else(|| "unknown error".to_string());
        state.widget.map_load_failed(reason).await;
    }
    Json(state.widget.map_status().await)
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Geocoding provider
    pub provider: String,
    /// Whether the geolocation bootstrap has started
    pub bootstrapped: bool,
    /// Map widget load state
    pub map: MapStatus,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<B, L>(State(state): State<Arc<AppState<B, L>>>) -> Json<StatusResponse>
where
    B: GeoBackend + 'static,
    L: Geolocator + 'static,
{
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.widget.backend().name().to_string(),
        bootstrapped: state.widget.bootstrap_started(),
        map: state.widget.map_status().await,
    })
}

/// Formats response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::device::{FixedLocator, Unsupported};
    use crate::geo::{GeocodeResponse, GeocodeResult};
    use crate::widget::view::MapPane;
    use crate::widget::LocationWidget;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Backend that only knows Paris and names any coordinate "Near ..."
    struct StubBackend;

    impl GeoBackend for StubBackend {
        fn name(&self) -> &str {
            "stub"
        }

        async fn geocode(&self, query: &str) -> crate::error::Result<GeocodeResponse> {
            if query == "Paris" {
                Ok(GeocodeResponse::ok(vec![GeocodeResult {
                    formatted_address: "Paris, France".to_string(),
                    location: Coordinates::new(48.8566, 2.3522),
                }]))
            } else {
                Ok(GeocodeResponse::ok(vec![]))
            }
        }

        async fn reverse_geocode(
            &self,
            coords: Coordinates,
        ) -> crate::error::Result<GeocodeResponse> {
            Ok(GeocodeResponse::ok(vec![GeocodeResult {
                formatted_address: format!("Near {}", coords),
                location: coords,
            }]))
        }
    }

    fn create_test_state() -> Arc<AppState<StubBackend, Unsupported>> {
        Arc::new(AppState::new(
            LocationWidget::new(StubBackend, Unsupported),
            Some("test-key".to_string()),
            300,
        ))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let status: StatusResponse = body_json(response).await;
        assert!(status.running);
        assert_eq!(status.provider, "stub");
        assert!(!status.bootstrapped);
        assert_eq!(status.map, MapStatus::Loading);
    }

    #[tokio::test]
    async fn test_index_page() {
        let state = create_test_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(html.contains("id=\"address-label\""));
        assert!(html.contains("/api/page"));
        // the page is static; it is its call to /api/view that starts things
        assert!(!state.widget.bootstrap_started());
    }

    #[tokio::test]
    async fn test_page_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/api/page").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page: PageConfig = body_json(response).await;
        assert!(page.maps_script_url.unwrap().contains("key=test-key"));
        assert_eq!(page.zoom, 14);
        assert_eq!(page.height_px, 300);
    }

    #[tokio::test]
    async fn test_formats_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/api/formats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let formats: FormatsResponse = body_json(response).await;
        let names: Vec<_> = formats.formats.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["json", "text", "url"]);
    }

    #[tokio::test]
    async fn test_view_keeps_search_text_verbatim() {
        let state = create_test_state();
        state.widget.set_search_query("{{ZOOM}} {{HEIGHT}} <i>").await;

        let response = create_router(state)
            .oneshot(Request::builder().uri("/api/view").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let view: View = body_json(response).await;
        assert_eq!(view.search_query, "{{ZOOM}} {{HEIGHT}} <i>");
    }

    #[tokio::test]
    async fn test_view_triggers_bootstrap() {
        let state = Arc::new(AppState::new(
            LocationWidget::new(StubBackend, FixedLocator(Coordinates::new(40.0, -74.0))),
            None,
            300,
        ));

        let app = create_router(state.clone());
        let response = app
            .oneshot(Request::builder().uri("/api/view").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // bootstrap runs in the background
        while state.widget.snapshot().await.address.is_empty() {
            tokio::task::yield_now().await;
        }
        let snapshot = state.widget.snapshot().await;
        assert_eq!(snapshot.coordinates, Coordinates::new(40.0, -74.0));
        assert!(snapshot.address.starts_with("Near 40.000000, -74.000000"));
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/search",
                serde_json::json!({ "query": "Paris" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let snapshot: LocationSnapshot = body_json(response).await;
        assert_eq!(snapshot.search_query, "Paris");
        assert_eq!(snapshot.coordinates, Coordinates::new(48.8566, 2.3522));
        assert_eq!(snapshot.address, "Paris, France");
    }

    #[tokio::test]
    async fn test_search_text_then_submit() {
        let state = create_test_state();

        let response = create_router(state.clone())
            .oneshot(json_request(
                "PUT",
                "/api/search",
                serde_json::json!({ "query": "Atlantis" }),
            ))
            .await
            .unwrap();
        let snapshot: LocationSnapshot = body_json(response).await;
        assert_eq!(snapshot.search_query, "Atlantis");

        let response = create_router(state)
            .oneshot(json_request("POST", "/api/search", serde_json::json!({})))
            .await
            .unwrap();
        let snapshot: LocationSnapshot = body_json(response).await;

        // no match: state unchanged
        assert_eq!(snapshot.coordinates, Coordinates::new(0.0, 0.0));
        assert_eq!(snapshot.address, "");
    }

    #[tokio::test]
    async fn test_marker_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/marker",
                serde_json::json!({ "lat": 10.0, "lng": 20.0 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let snapshot: LocationSnapshot = body_json(response).await;
        assert_eq!(snapshot.coordinates, Coordinates::new(10.0, 20.0));
        assert_eq!(snapshot.address, "Near 10.000000, 20.000000");
    }

    #[tokio::test]
    async fn test_marker_invalid_coordinates() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/marker",
                serde_json::json!({ "lat": 91.0, "lng": 20.0 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_map_status_switches_view() {
        let state = create_test_state();

        let response = create_router(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/map/status",
                serde_json::json!({ "loaded": true }),
            ))
            .await
            .unwrap();
        let status: MapStatus = body_json(response).await;
        assert_eq!(status, MapStatus::Loaded);

        let response = create_router(state.clone())
            .oneshot(Request::builder().uri("/api/view").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let view: View = body_json(response).await;
        assert!(matches!(view.pane, MapPane::Map { zoom: 14, .. }));

        let response = create_router(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/map/status",
                serde_json::json!({ "loaded": false, "error": "authentication failed" }),
            ))
            .await
            .unwrap();
        let status: MapStatus = body_json(response).await;
        assert_eq!(status, MapStatus::Failed("authentication failed".to_string()));

        let view = state.widget.render().await;
        assert!(!view.pane.is_map());
    }

    #[tokio::test]
    async fn test_state_endpoint() {
        let state = create_test_state();
        state.widget.set_search_query("Rome").await;

        let response = create_router(state)
            .oneshot(Request::builder().uri("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let snapshot: LocationSnapshot = body_json(response).await;
        assert_eq!(snapshot.search_query, "Rome");
    }
}
