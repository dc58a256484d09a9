//! Model record repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::info;

use mrm_core::{Error, ModelRecord, ModelRepository, NewModel, Result};

/// Joined projection shared by fetch and search: one row per model record
/// with the `{code, display_name}` pair of each of its four catalogs.
/// Inner joins enforce that a record with a dangling classification
/// reference can never appear in a result set.
pub(crate) const MODEL_SELECT: &str = "SELECT m.id, m.model_name, m.model_version, m.model_sponsor, \
     m.created_at, m.updated_at, \
     bl.code AS business_line_code, bl.display_name AS business_line_display, \
     mt.code AS model_type_code, mt.display_name AS model_type_display, \
     rr.code AS risk_rating_code, rr.display_name AS risk_rating_display, \
     s.code AS status_code, s.display_name AS status_display \
     FROM models m \
     JOIN business_lines bl ON m.business_line_id = bl.id \
     JOIN model_types mt ON m.model_type_id = mt.id \
     JOIN risk_ratings rr ON m.risk_rating_id = rr.id \
     JOIN statuses s ON m.status_id = s.id";

/// Flatten a joined result row into the wire-shaped model record.
pub(crate) fn map_model_row(row: PgRow) -> ModelRecord {
    ModelRecord {
        id: row.get("id"),
        model_name: row.get("model_name"),
        model_version: row.get("model_version"),
        model_sponsor: row.get("model_sponsor"),
        business_line: row.get("business_line_code"),
        business_line_display_name: row.get("business_line_display"),
        model_type: row.get("model_type_code"),
        model_type_display_name: row.get("model_type_display"),
        risk_rating: row.get("risk_rating_code"),
        risk_rating_display_name: row.get("risk_rating_display"),
        status: row.get("status_code"),
        status_display_name: row.get("status_display"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Build the flat record from a persisted row's identity columns and the
/// already-resolved classifications, avoiding a second joined round-trip.
fn record_from_parts(
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    model: NewModel,
) -> ModelRecord {
    let c = model.classifications;
    ModelRecord {
        id,
        model_name: model.model_name,
        model_version: model.model_version,
        model_sponsor: model.model_sponsor,
        business_line: c.business_line.code,
        business_line_display_name: c.business_line.display_name,
        model_type: c.model_type.code,
        model_type_display_name: c.model_type.display_name,
        risk_rating: c.risk_rating.code,
        risk_rating_display_name: c.risk_rating.display_name,
        status: c.status.code,
        status_display_name: c.status.display_name,
        created_at,
        updated_at,
    }
}

/// PostgreSQL implementation of ModelRepository.
#[derive(Clone)]
pub struct PgModelRepository {
    pool: Pool<Postgres>,
}

impl PgModelRepository {
    /// Create a new PgModelRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModelRepository for PgModelRepository {
    async fn insert(&self, model: NewModel) -> Result<ModelRecord> {
        let row = sqlx::query(
            "INSERT INTO models \
             (model_name, model_version, model_sponsor, \
              business_line_id, model_type_id, risk_rating_id, status_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, created_at, updated_at",
        )
        .bind(&model.model_name)
        .bind(&model.model_version)
        .bind(&model.model_sponsor)
        .bind(model.classifications.business_line.id)
        .bind(model.classifications.model_type.id)
        .bind(model.classifications.risk_rating.id)
        .bind(model.classifications.status.id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let id: i64 = row.get("id");
        info!(
            subsystem = "database",
            component = "records",
            op = "insert",
            model_id = id,
            model_name = %model.model_name,
            "Registered model record"
        );

        Ok(record_from_parts(
            id,
            row.get("created_at"),
            row.get("updated_at"),
            model,
        ))
    }

    async fn update(&self, id: i64, model: NewModel) -> Result<ModelRecord> {
        let row = sqlx::query(
            "UPDATE models SET \
             model_name = $1, model_version = $2, model_sponsor = $3, \
             business_line_id = $4, model_type_id = $5, \
             risk_rating_id = $6, status_id = $7, \
             updated_at = now() \
             WHERE id = $8 \
             RETURNING id, created_at, updated_at",
        )
        .bind(&model.model_name)
        .bind(&model.model_version)
        .bind(&model.model_sponsor)
        .bind(model.classifications.business_line.id)
        .bind(model.classifications.model_type.id)
        .bind(model.classifications.risk_rating.id)
        .bind(model.classifications.status.id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::ModelNotFound(id))?;

        info!(
            subsystem = "database",
            component = "records",
            op = "update",
            model_id = id,
            model_name = %model.model_name,
            "Updated model record"
        );

        Ok(record_from_parts(
            id,
            row.get("created_at"),
            row.get("updated_at"),
            model,
        ))
    }

    async fn fetch(&self, id: i64) -> Result<ModelRecord> {
        let sql = format!("{} WHERE m.id = $1", MODEL_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::ModelNotFound(id))?;
        Ok(map_model_row(row))
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM models WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }
}
