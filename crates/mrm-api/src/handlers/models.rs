//! Model registry HTTP handlers.
//!
//! REST endpoints for registering models, listing/searching the inventory,
//! fetching and updating individual records, and serving the catalog choice
//! lists that populate the registration form.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{ApiError, AppState};
use mrm_core::{
    Catalog, CatalogEntry, CatalogRepository, ChoiceOption, ClassificationResolver,
    EnumValuesResponse, ModelRecord, ModelRepository, ModelRequest, ModelSearch, NewModel,
    ResolvedClassifications, SearchModelsRequest,
};

/// Query parameters for listing/searching models.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text filter matched case-insensitively across name, version,
    /// sponsor, the four classification display names, and the record id.
    pub term: Option<String>,
    /// Sort key; unrecognized or absent keys fall back to newest-first.
    pub sort_key: Option<String>,
    /// "asc" or "desc" (case-insensitive).
    pub sort_direction: Option<String>,
}

impl From<SearchParams> for SearchModelsRequest {
    fn from(params: SearchParams) -> Self {
        SearchModelsRequest {
            term: params.term,
            sort_key: params.sort_key,
            sort_direction: params.sort_direction,
        }
    }
}

fn new_model(req: ModelRequest, classifications: ResolvedClassifications) -> NewModel {
    NewModel {
        model_name: req.model_name,
        model_version: req.model_version,
        model_sponsor: req.model_sponsor,
        classifications,
    }
}

/// Register a new model.
#[utoipa::path(
    post,
    path = "/api/models",
    tag = "models",
    request_body = ModelRequest,
    responses(
        (status = 201, description = "Model successfully registered", body = ModelRecord),
        (status = 400, description = "Missing field or unknown classification code"),
    )
)]
pub async fn register_model(
    State(state): State<AppState>,
    Json(req): Json<ModelRequest>,
) -> Result<(StatusCode, Json<ModelRecord>), ApiError> {
    req.validate()?;

    let resolver = ClassificationResolver::new(&state.db.catalogs);
    let classifications = resolver.resolve(&req).await?;
    let record = state.db.models.insert(new_model(req, classifications)).await?;

    info!(
        subsystem = "api",
        component = "models",
        op = "register",
        model_id = record.id,
        model_name = %record.model_name,
        "Registered model"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// List all models, optionally filtered and sorted.
///
/// A blank `term` behaves exactly like no term. Without an explicit sort
/// key the listing is ordered by descending id (newest first).
#[utoipa::path(
    get,
    path = "/api/models",
    tag = "models",
    params(
        ("term" = Option<String>, Query, description = "Free-text filter term"),
        ("sortKey" = Option<String>, Query, description = "Sort key token"),
        ("sortDirection" = Option<String>, Query, description = "asc or desc"),
    ),
    responses(
        (status = 200, description = "Matching models", body = [ModelRecord]),
    )
)]
pub async fn list_models(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ModelRecord>>, ApiError> {
    let records = state.db.search.search(params.into()).await?;
    Ok(Json(records))
}

/// Get a model by id.
#[utoipa::path(
    get,
    path = "/api/models/{id}",
    tag = "models",
    params(("id" = i64, Path, description = "Model record id")),
    responses(
        (status = 200, description = "Model found", body = ModelRecord),
        (status = 404, description = "Model not found"),
    )
)]
pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ModelRecord>, ApiError> {
    let record = state.db.models.fetch(id).await?;
    Ok(Json(record))
}

/// Update an existing model (full-record replacement).
#[utoipa::path(
    put,
    path = "/api/models/{id}",
    tag = "models",
    params(("id" = i64, Path, description = "Model record id")),
    request_body = ModelRequest,
    responses(
        (status = 200, description = "Model successfully updated", body = ModelRecord),
        (status = 400, description = "Missing field or unknown classification code"),
        (status = 404, description = "Model not found"),
    )
)]
pub async fn update_model(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ModelRequest>,
) -> Result<Json<ModelRecord>, ApiError> {
    req.validate()?;

    // Reject an unknown id before any catalog lookups, so a request that is
    // wrong on both counts surfaces the missing record, not a bad code.
    if !state.db.models.exists(id).await? {
        return Err(mrm_core::Error::ModelNotFound(id).into());
    }

    let resolver = ClassificationResolver::new(&state.db.catalogs);
    let classifications = resolver.resolve(&req).await?;
    let record = state
        .db
        .models
        .update(id, new_model(req, classifications))
        .await?;

    info!(
        subsystem = "api",
        component = "models",
        op = "update",
        model_id = record.id,
        model_name = %record.model_name,
        "Updated model"
    );
    Ok(Json(record))
}

/// Get the choice lists for all four classification catalogs.
#[utoipa::path(
    get,
    path = "/api/models/enums",
    tag = "models",
    responses(
        (status = 200, description = "Choice lists per catalog", body = EnumValuesResponse),
    )
)]
pub async fn get_enum_values(
    State(state): State<AppState>,
) -> Result<Json<EnumValuesResponse>, ApiError> {
    fn to_choices(entries: Vec<CatalogEntry>) -> Vec<ChoiceOption> {
        entries.into_iter().map(Into::into).collect()
    }

    let catalogs = &state.db.catalogs;
    let response = EnumValuesResponse {
        business_lines: to_choices(catalogs.list(Catalog::BusinessLine).await?),
        model_types: to_choices(catalogs.list(Catalog::ModelType).await?),
        risk_ratings: to_choices(catalogs.list(Catalog::RiskRating).await?),
        statuses: to_choices(catalogs.list(Catalog::Status).await?),
    };
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_accept_camel_case_keys() {
        let params: SearchParams =
            serde_json::from_str(r#"{"term":"Banking","sortKey":"businessLine","sortDirection":"asc"}"#)
                .unwrap();
        assert_eq!(params.term.as_deref(), Some("Banking"));
        assert_eq!(params.sort_key.as_deref(), Some("businessLine"));
        assert_eq!(params.sort_direction.as_deref(), Some("asc"));
    }

    #[test]
    fn test_search_params_all_optional() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(params.term.is_none());
        assert!(params.sort_key.is_none());
        assert!(params.sort_direction.is_none());
    }

    #[test]
    fn test_search_params_convert_to_request() {
        let params = SearchParams {
            term: Some("var".to_string()),
            sort_key: Some("createdAt".to_string()),
            sort_direction: Some("desc".to_string()),
        };
        let req: SearchModelsRequest = params.into();
        assert_eq!(req.term.as_deref(), Some("var"));
        assert_eq!(req.sort_key.as_deref(), Some("createdAt"));
        assert_eq!(req.sort_direction.as_deref(), Some("desc"));
    }
}
