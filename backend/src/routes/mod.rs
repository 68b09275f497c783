//! Route definitions for the AgriSynch gateway

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Advisory core
        .route("/insights", post(handlers::generate_insights))
        .route("/stages/resolve", post(handlers::resolve_stage))
        // Static reference data
        .nest("/reference", reference_routes())
        .route("/regions/locate", get(handlers::locate))
        // Weather
        .route("/weather/forecast", get(handlers::get_weather_forecast))
        // Remote assistant
        .route("/diagnostics", post(handlers::diagnose))
        .nest("/assistant", assistant_routes())
}

fn reference_routes() -> Router<AppState> {
    Router::new()
        .route("/crops", get(handlers::list_crops))
        .route("/crops/:crop/:stage", get(handlers::get_crop_advisory))
        .route("/soils", get(handlers::list_soils))
        .route("/regions", get(handlers::list_regions))
}

fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route("/transcribe", post(handlers::transcribe))
        .route("/intent", post(handlers::parse_intent))
        .route("/speech", post(handlers::synthesize_speech))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::services::{DiagnosticService, WeatherService};
    use crate::{create_app, AppState, Config};

    fn app() -> Router {
        let state = AppState {
            config: Arc::new(Config::default()),
            diagnostics: DiagnosticService::new(None, Duration::from_secs(1)),
            weather: WeatherService::new(None, 4),
        };
        create_app(state)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["assistant"], "fallback");
        assert_eq!(body["weather_provider"], "simulated");
    }

    #[tokio::test]
    async fn test_insights_endpoint() {
        let (status, body) = send(post(
            "/api/v1/insights",
            json!({
                "crops": [{
                    "id": "p8x2m4k1q",
                    "type": "wheat",
                    "sowingDate": "2026-10-12",
                    "soilType": "black",
                    "region": "pune",
                    "nickname": "Upper Field"
                }],
                "weather": [
                    {"date": "18/10/2026", "temp": 30, "condition": "sunny", "precipChance": 5},
                    {"date": "19/10/2026", "temp": 29, "condition": "sunny", "precipChance": 60}
                ],
                "now": "2026-10-18T06:00:00Z"
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Critical: Waterlogging Risk", "Delay Fertilizer"]);
        assert_eq!(body[0]["priority"], "critical");
        assert_eq!(body[0]["actionDate"], "Today");
        assert_eq!(body[0]["cropId"], "p8x2m4k1q");
        assert_eq!(body[1]["actionDate"], "19/10/2026");
    }

    #[tokio::test]
    async fn test_resolve_stage_endpoint() {
        let (status, body) = send(post(
            "/api/v1/stages/resolve",
            json!({"crop_type": "rice", "sowing_date": "2026-09-08", "now": "2026-10-18T06:00:00Z"}),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stage"], "vegetative");

        let (status, body) = send(post(
            "/api/v1/stages/resolve",
            json!({"crop_type": "banana", "sowing_date": "2026-09-08"}),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNKNOWN_CROP_TYPE");
    }

    #[tokio::test]
    async fn test_reference_endpoints() {
        let (status, body) = send(get("/api/v1/reference/crops")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 7);

        let (status, body) = send(get("/api/v1/reference/crops/cotton/vegetative")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stage"], "vegetative");

        let (status, body) = send(get("/api/v1/reference/soils")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_locate_region() {
        let (status, body) = send(get("/api/v1/regions/locate?latitude=18.52&longitude=73.85")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "pune");

        let (status, _) = send(get("/api/v1/regions/locate?latitude=51.5&longitude=-0.12")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_forecast_is_simulated_without_provider() {
        let (status, body) = send(get("/api/v1/weather/forecast")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_diagnostics_without_assistant_returns_fallback() {
        let (status, body) = send(post(
            "/api/v1/diagnostics",
            json!({"crop_name": "General Crop", "stage": null, "description": "yellow leaves"}),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["degraded"], true);

        let (status, body) = send(post("/api/v1/assistant/intent", json!({"text": "open crops"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["action"], "SPEAK");
    }

    #[tokio::test]
    async fn test_empty_diagnosis_is_rejected() {
        let (status, body) = send(post(
            "/api/v1/diagnostics",
            json!({"crop_name": "rice", "stage": "flowering"}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
