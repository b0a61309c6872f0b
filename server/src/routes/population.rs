use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use chrono::{DateTime, Utc};
use ecoworld_shared::{
    AllocationVector, AllocationView, ConsumptionSnapshot, PopulationAllocator, recompute,
    validate_submission,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::MAX_NATION_NAME_LEN;
use crate::error::ApiError;
use crate::routes::api::json_bytes_response;
use crate::state::{AppState, NationRecord};

/// Population page state for one nation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationPayload {
    pub nation: String,
    pub allocation: AllocationVector,
    pub consumption: ConsumptionSnapshot,
    pub view: AllocationView,
    pub updated_at: DateTime<Utc>,
}

impl PopulationPayload {
    fn from_record(nation: String, record: &NationRecord) -> Self {
        Self {
            nation,
            allocation: record.allocation,
            consumption: record.consumption,
            view: recompute(&record.allocation),
            updated_at: record.updated_at,
        }
    }
}

pub async fn get_population(
    State(state): State<AppState>,
    Path(raw_name): Path<String>,
) -> Result<Json<PopulationPayload>, ApiError> {
    let name = normalize_nation_name(&raw_name)?.to_owned();
    state.observability.record_population_request();

    let record = state.touch_nation(&name);
    Ok(Json(PopulationPayload::from_record(name, &record)))
}

pub async fn submit_population(
    State(state): State<AppState>,
    Path(raw_name): Path<String>,
    Json(allocation): Json<AllocationVector>,
) -> Result<Json<PopulationPayload>, ApiError> {
    let name = normalize_nation_name(&raw_name)?.to_owned();
    state.observability.record_submission();

    if let Err(rejection) = validate_submission(&allocation) {
        state.observability.record_rejected_submission();
        info!(
            nation = %name,
            total = allocation.total(),
            %rejection,
            "rejected population distribution"
        );
        return Err(ApiError::unprocessable(rejection.to_string()));
    }

    let record = state.update_nation(&name, |record| {
        record.allocation = allocation;
        record.updated_at = Utc::now();
    });
    info!(nation = %name, total = allocation.total(), "population distribution updated");
    Ok(Json(PopulationPayload::from_record(name, &record)))
}

pub async fn put_consumption(
    State(state): State<AppState>,
    Path(raw_name): Path<String>,
    Json(consumption): Json<ConsumptionSnapshot>,
) -> Result<Json<PopulationPayload>, ApiError> {
    let name = normalize_nation_name(&raw_name)?.to_owned();
    state.observability.record_consumption_update();

    let sanitized = consumption.sanitized();
    if sanitized != consumption {
        warn!(
            nation = %name,
            "consumption snapshot contained negative or non-finite figures; zeroed"
        );
    }

    let record = state.update_nation(&name, |record| {
        record.consumption = sanitized;
        record.updated_at = Utc::now();
    });
    Ok(Json(PopulationPayload::from_record(name, &record)))
}

/// Suggestion for a nation's stored consumption. Nothing is saved.
pub async fn get_suggestion(
    State(state): State<AppState>,
    Path(raw_name): Path<String>,
) -> Result<Json<AllocationView>, ApiError> {
    let name = normalize_nation_name(&raw_name)?;
    state.observability.record_optimize_request();

    let record = state.touch_nation(name);
    Ok(Json(suggest(&record.consumption)))
}

/// Stateless optimize for arbitrary consumption figures.
pub async fn optimize(
    State(state): State<AppState>,
    Json(consumption): Json<ConsumptionSnapshot>,
) -> Json<AllocationView> {
    state.observability.record_optimize_request();
    Json(suggest(&consumption.sanitized()))
}

pub async fn get_presets(State(state): State<AppState>) -> Response {
    json_bytes_response((*state.presets_json).clone(), "public, max-age=3600")
}

fn suggest(consumption: &ConsumptionSnapshot) -> AllocationView {
    let mut allocator = PopulationAllocator::default();
    allocator.optimize(consumption)
}

fn normalize_nation_name(name: &str) -> Result<&str, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NATION_NAME_LEN {
        return Err(ApiError::bad_request("nation name must be 1-64 characters"));
    }

    if trimmed
        .chars()
        .any(|ch| ch.is_control() || matches!(ch, '/' | '\\' | '?' | '#'))
    {
        return Err(ApiError::bad_request("nation name contains invalid characters"));
    }

    Ok(trimmed)
}
