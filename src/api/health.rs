//! Health check endpoint

use crate::server::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime_secs: u64,
    pub message: String,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_secs: state.uptime().as_secs(),
        message: "Gateway is running correctly".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            uptime_secs: 12,
            message: "Gateway is running correctly".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("uptime_secs"));
    }

    #[test]
    fn test_health_response_deserialization() {
        let json = r#"{"status": "ok", "timestamp": "t", "uptime_secs": 0, "message": "m"}"#;
        let response: HealthResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.status, "ok");
        assert_eq!(response.uptime_secs, 0);
    }
}
