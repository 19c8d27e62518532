// crates/agenticops-app/src/api.rs
// HTTP API functions for the console backend

use agenticops_core::StatsError;
use agenticops_types::{EntityStats, HealthResponse};

/// `GET /api/health`
pub async fn fetch_health(api_base: &str) -> Result<HealthResponse, String> {
    let url = get_api_url(&format!("{}/health", api_base.trim_end_matches('/')))?;
    let resp = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Fetch error: {:?}", e))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<HealthResponse>()
        .await
        .map_err(|e| format!("Decode error: {:?}", e))
}

/// Live stats for a table row; every failure is reported as a `StatsError`
pub async fn fetch_entity_stats(path: &str) -> Result<EntityStats, StatsError> {
    let url = get_api_url(path).map_err(StatsError::Network)?;
    let resp = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| StatsError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(StatsError::Status(resp.status()));
    }

    resp.json::<EntityStats>()
        .await
        .map_err(|e| StatsError::Decode(e.to_string()))
}

pub fn get_api_url(path: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("No window")?;
    let location = window.location();
    let host = location.host().map_err(|_| "No host")?;
    let protocol = location.protocol().map_err(|_| "No protocol")?;
    Ok(format!("{}//{}{}", protocol, host, path))
}
