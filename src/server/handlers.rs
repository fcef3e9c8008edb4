//! HTTP request handlers.
//!
//! Each handler validates its input, drives the generation pipeline, and
//! maps failures to `ApiError`. A failed generation never creates a store
//! entry.

use super::AppState;
use crate::error::ApiError;
use crate::types::*;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Upper bound on variations per batch request. The router sizes the
/// variations route's timeout to fit a full batch of sequential calls.
pub const MAX_VARIATIONS: u32 = 10;

/// GET / — service index.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Procedural Religion Generator API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate_religion": "POST /religions/generate",
            "get_religion": "GET /religions/{religion_id}",
            "list_religions": "GET /religions",
            "religion_summary": "GET /religions/{religion_id}/summary",
            "delete_religion": "DELETE /religions/{religion_id}",
            "generate_component": "POST /components/generate",
            "generate_variations": "POST /religions/variations",
            "expand_religion": "POST /religions/{religion_id}/expand"
        }
    }))
}

/// GET /health — liveness probe.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "generated_religions_count": state.store.len().await,
    }))
}

/// POST /religions/generate — synthesize and store a new religion.
pub async fn generate_religion(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<StoredReligion>, ApiError> {
    info!("Religion generation request: {:?}", request);
    let started = Instant::now();

    let religion = state.generator.generate(&request).await?;
    let generation_time = started.elapsed().as_secs_f64();

    let stored = state.store.put("religion", religion, generation_time).await;
    info!("Religion generated and stored: {}", stored.id);
    Ok(Json(stored))
}

/// GET /religions — list all stored religions as summaries.
pub async fn list_religions(State(state): State<AppState>) -> Json<Value> {
    let entries = state.store.list().await;
    let summaries: Vec<ReligionSummary> = entries.iter().map(ReligionSummary::from).collect();
    Json(json!({
        "religions": summaries,
        "total_count": summaries.len(),
    }))
}

/// GET /religions/{id} — fetch one stored religion.
pub async fn get_religion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredReligion>, ApiError> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// GET /religions/{id}/summary — counts and highlights for one religion.
pub async fn religion_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let stored = state.store.get(&id).await.ok_or(ApiError::NotFound(id))?;
    let religion = &stored.religion;
    Ok(Json(json!({
        "id": stored.id,
        "name": religion.name,
        "description": religion.description,
        "deity_type": religion.deity_type,
        "deity_count": religion.deities.len(),
        "ritual_count": religion.rituals.len(),
        "legend_count": religion.legends.len(),
        "moral_rule_count": religion.moral_rules.len(),
        "symbol_count": religion.symbols.len(),
        "core_beliefs": religion.core_beliefs,
        "holy_places": religion.holy_places,
    })))
}

/// DELETE /religions/{id} — remove one stored religion.
pub async fn delete_religion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.store.remove(&id).await.ok_or(ApiError::NotFound(id))?;
    info!("Religion deleted: {}", removed.id);
    Ok(Json(json!({
        "message": "Religion deleted",
        "deleted_religion": removed.religion.name,
    })))
}

/// POST /components/generate — generate a standalone component.
///
/// When a `religion_id` is supplied and known, that religion's identity is
/// spliced into the generation context; an unknown id is simply ignored.
pub async fn generate_component(
    State(state): State<AppState>,
    Json(request): Json<ComponentRequest>,
) -> Result<Json<Value>, ApiError> {
    let component_type = ComponentType::parse(&request.component_type).ok_or_else(|| {
        ApiError::Validation(format!(
            "Unsupported component type: {}",
            request.component_type
        ))
    })?;

    let existing = match &request.religion_id {
        Some(id) => state.store.get(id).await.map(|s| s.religion),
        None => None,
    };

    let component = state
        .generator
        .generate_component(component_type, &request.context, existing.as_ref())
        .await?;

    Ok(Json(json!({
        "component": component,
        "component_type": component_type,
    })))
}

/// POST /religions/variations — batch generation on a shared theme.
pub async fn generate_variations(
    State(state): State<AppState>,
    Json(request): Json<VariationRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.base_theme.trim().is_empty() {
        return Err(ApiError::Validation("base_theme must not be empty".into()));
    }
    if request.count == 0 || request.count > MAX_VARIATIONS {
        return Err(ApiError::Validation(format!(
            "count must be between 1 and {MAX_VARIATIONS}"
        )));
    }

    let variations = state
        .generator
        .variations(&request.base_theme, request.count)
        .await;

    let prefix = format!("variation_{}", request.base_theme);
    let mut responses = Vec::with_capacity(variations.len());
    for religion in variations {
        let stored = state.store.put(&prefix, religion, 0.0).await;
        responses.push(json!({
            "id": stored.id,
            "religion": stored.religion,
        }));
    }

    Ok(Json(json!({
        "base_theme": request.base_theme,
        "variations": responses,
        "count": responses.len(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct ExpandParams {
    pub component_type: String,
}

/// POST /religions/{id}/expand?component_type=.. — append one component to an
/// existing religion and re-store it under the same id.
pub async fn expand_religion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ExpandParams>,
) -> Result<Json<Value>, ApiError> {
    let component_type = ComponentType::parse(&params.component_type).ok_or_else(|| {
        ApiError::Validation(format!(
            "Unsupported component type: {}",
            params.component_type
        ))
    })?;

    let stored = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(id.clone()))?;

    let expanded = state.generator.expand(stored.religion, component_type).await?;

    let updated = state
        .store
        .update(&id, expanded)
        .await
        .ok_or(ApiError::NotFound(id))?;

    Ok(Json(json!({
        "message": "Religion expanded",
        "religion_id": updated.id,
        "added_component": component_type,
        "religion": updated.religion,
    })))
}
