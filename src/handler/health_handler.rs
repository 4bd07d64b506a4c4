use crate::config::database::{Database, DatabaseTrait};
use crate::response::app_response::SuccessResponse;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStatus {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub database: DatabaseHealth,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DatabaseHealth {
    pub reachable: bool,
    pub response_time_ms: Option<u128>,
    pub error: Option<String>,
}

static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

pub fn init_start_time() {
    START_TIME.set(Instant::now()).ok();
}

pub fn get_uptime_seconds() -> u64 {
    START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}

pub async fn health_check(
    State(db): State<Arc<Database>>,
) -> SuccessResponse<HealthStatus> {
    let started = Instant::now();
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(db.get_pool())
        .await
    {
        Ok(_) => DatabaseHealth {
            reachable: true,
            response_time_ms: Some(started.elapsed().as_millis()),
            error: None,
        },
        Err(e) => DatabaseHealth {
            reachable: false,
            response_time_ms: None,
            error: Some(e.to_string()),
        },
    };

    SuccessResponse::send(HealthStatus {
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: get_uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_zero_before_init() {
        // START_TIME may already be set by another test; only assert the
        // accessor never panics and is monotone.
        let first = get_uptime_seconds();
        let second = get_uptime_seconds();
        assert!(second >= first);
    }
}
