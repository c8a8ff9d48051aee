//! Axum mock API server.
//!
//! Serves the endpoints the map front-end consumes: mock temperature/NDVI
//! sampling, the randomized zone list, cooling advice, aggregate stats, plus
//! server-side access to the recommendation engine and the seed zones.
//!
//! All responses use the `{success, data}` / `{success, error}` envelope the
//! front-end expects.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::engine::recommendation::derive_recommendation;
use crate::engine::seasonal::{zone_display_ndvi, zone_growth, zone_growth_visible, MONTHS_PER_YEAR};
use crate::mockdata::{cooling_advice, mock_ndvi, mock_temperature, synthetic_zones, CITY_STATS};
use crate::models::PlantingZone;
use crate::zones::load_predefined_zones;

/// Advice temperature when the query carries none, °C.
const DEFAULT_ADVICE_TEMPERATURE_C: f64 = 30.0;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    /// Seed zones loaded at startup; empty when no seed file is configured.
    pub zones: Arc<Vec<PlantingZone>>,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Build server state. A fixed `seed` pins every random sample for
    /// reproducible runs and tests.
    pub fn new(zones_path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<Self> {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let zones = match zones_path {
            Some(path) => {
                tracing::info!("Loading predefined zones from {:?}...", path);
                load_predefined_zones(path, &mut rng)?
            }
            None => {
                tracing::warn!("No zone seed file configured; /api/predefined-zones will be empty");
                Vec::new()
            }
        };

        Ok(Self {
            zones: Arc::new(zones),
            rng: Arc::new(Mutex::new(rng)),
        })
    }

    fn rng(&self) -> Result<MutexGuard<'_, StdRng>, AppError> {
        self.rng
            .lock()
            .map_err(|_| AppError::Internal("rng lock poisoned".to_string()))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Mock front-end API
        .route("/api/temperature", get(get_temperature))
        .route("/api/planting-zones", get(get_planting_zones))
        .route("/api/recommendations", get(get_recommendations))
        .route("/api/stats", get(get_stats))
        // Engine and seed data, server-side
        .route("/api/predefined-zones", get(get_predefined_zones))
        .route("/api/recommendation", get(get_recommendation))
        .route("/api/simulation", get(get_simulation))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Deserialize)]
struct PointQuery {
    lat: Option<String>,
    lng: Option<String>,
}

async fn get_temperature(
    State(state): State<AppState>,
    Query(query): Query<PointQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (lat, lng) = parse_point(&query)?;

    let temperature = mock_temperature(lat, lng);
    let ndvi = {
        let mut rng = state.rng()?;
        mock_ndvi(&mut *rng)
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "lat": lat,
            "lng": lng,
            "temperature": round_to(temperature, 1),
            "ndvi": round_to(ndvi, 2),
            "timestamp": Utc::now().to_rfc3339(),
        }
    })))
}

async fn get_planting_zones(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let zones = {
        let mut rng = state.rng()?;
        synthetic_zones(&mut *rng)
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "data": zones,
    })))
}

#[derive(Debug, Deserialize)]
struct AdviceQuery {
    // lat/lng are accepted for interface compatibility but the advice only
    // branches on temperature.
    #[allow(dead_code)]
    lat: Option<String>,
    #[allow(dead_code)]
    lng: Option<String>,
    temperature: Option<String>,
}

async fn get_recommendations(
    Query(query): Query<AdviceQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let temperature = query
        .temperature
        .as_deref()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(DEFAULT_ADVICE_TEMPERATURE_C);

    Ok(Json(serde_json::json!({
        "success": true,
        "data": cooling_advice(temperature),
    })))
}

async fn get_stats() -> Result<Json<serde_json::Value>, AppError> {
    let mut data =
        serde_json::to_value(CITY_STATS).map_err(|e| AppError::Internal(e.to_string()))?;
    data["lastUpdated"] = serde_json::Value::String(Utc::now().to_rfc3339());

    Ok(Json(serde_json::json!({
        "success": true,
        "data": data,
    })))
}

async fn get_predefined_zones(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(serde_json::json!({
        "success": true,
        "data": &*state.zones,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationQuery {
    area: Option<String>,
    polygon_id: Option<String>,
}

async fn get_recommendation(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let area = query
        .area
        .as_deref()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| AppError::BadRequest("A numeric area is required".to_string()))?;
    let polygon_id = query.polygon_id.unwrap_or_else(|| "adhoc".to_string());

    let recommendation = {
        let mut rng = state.rng()?;
        derive_recommendation(&polygon_id, area, &mut *rng)
            .map_err(|e| AppError::BadRequest(e.to_string()))?
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "data": recommendation,
    })))
}

#[derive(Debug, Deserialize)]
struct SimulationQuery {
    month: Option<String>,
}

async fn get_simulation(
    State(state): State<AppState>,
    Query(query): Query<SimulationQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let month = query
        .month
        .as_deref()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|m| *m < MONTHS_PER_YEAR)
        .ok_or_else(|| AppError::BadRequest("A month index in 0..=11 is required".to_string()))?;

    let growth = zone_growth(month);
    let visible = zone_growth_visible(month);
    let data: Vec<serde_json::Value> = state
        .zones
        .iter()
        .map(|zone| {
            serde_json::json!({
                "zoneId": zone.id,
                "month": month,
                "growth": growth,
                "visible": visible,
                "ndvi": zone_display_ndvi(zone.ndvi, month),
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "success": true,
        "data": data,
    })))
}

fn parse_point(query: &PointQuery) -> Result<(f64, f64), AppError> {
    let lat = query.lat.as_deref().and_then(|s| s.parse::<f64>().ok());
    let lng = query.lng.as_deref().and_then(|s| s.parse::<f64>().ok());
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok((lat, lng)),
        _ => Err(AppError::BadRequest(
            "Latitude and longitude are required".to_string(),
        )),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
