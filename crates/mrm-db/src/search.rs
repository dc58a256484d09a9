//! Dynamic search and sort query builder for model records.
//!
//! The builder always starts from the same join skeleton
//! ([`MODEL_SELECT`](crate::records)), conditionally appends a
//! parameterized `WHERE` clause when a filter term is present, and always
//! appends an `ORDER BY` clause. Filter and sort are independent and
//! compose in any pairing.
//!
//! Sort keys come from a closed token map; caller text is never
//! interpolated into the query. The filter term is bound as a single
//! parameter referenced by every predicate.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::{debug, info};

use mrm_core::{Error, ModelRecord, ModelSearch, Result, SearchModelsRequest};

use crate::records::{map_model_row, MODEL_SELECT};

/// Filter clause ORing the eight searchable projections: the three record
/// strings, the four joined display names, and the textual form of the id.
/// Every slot references the same bound `%term%` pattern; the term is
/// lowercased once by the caller before binding.
const FILTER_CLAUSE: &str = " WHERE (LOWER(m.model_name) LIKE $1 \
     OR LOWER(m.model_version) LIKE $1 \
     OR LOWER(m.model_sponsor) LIKE $1 \
     OR LOWER(bl.display_name) LIKE $1 \
     OR LOWER(mt.display_name) LIKE $1 \
     OR LOWER(rr.display_name) LIKE $1 \
     OR LOWER(s.display_name) LIKE $1 \
     OR CAST(m.id AS TEXT) LIKE $1)";

/// Map a recognized sort-key token to its physical column.
///
/// Classification keys sort by the joined display name, not the code, so
/// alphabetical ordering follows the human-readable labels.
fn sort_column(key: &str) -> Option<&'static str> {
    match key {
        "id" => Some("m.id"),
        "modelName" => Some("m.model_name"),
        "modelVersion" => Some("m.model_version"),
        "modelSponsor" => Some("m.model_sponsor"),
        "businessLine" => Some("bl.display_name"),
        "modelType" => Some("mt.display_name"),
        "riskRating" => Some("rr.display_name"),
        "status" => Some("s.display_name"),
        "createdAt" => Some("m.created_at"),
        _ => None,
    }
}

/// Validate the sort direction token, defaulting to ascending.
fn sort_direction(direction: Option<&str>) -> &'static str {
    match direction.map(str::to_uppercase).as_deref() {
        Some("DESC") => "DESC",
        _ => "ASC",
    }
}

/// Build the ORDER BY clause for a recognized sort key, or the default
/// descending-id order (newest first) when the key is absent or unknown.
fn order_by_clause(sort_key: Option<&str>, sort_direction_token: Option<&str>) -> String {
    match sort_key.and_then(sort_column) {
        Some(column) => format!(
            " ORDER BY {} {}",
            column,
            sort_direction(sort_direction_token)
        ),
        None => " ORDER BY m.id DESC".to_string(),
    }
}

/// Normalize the filter term: trim, reject blank, lowercase, and wrap in
/// `%` wildcards. `None` means the WHERE clause is skipped entirely.
fn search_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    Some(format!("%{}%", term.to_lowercase()))
}

/// Assemble the full query text: join skeleton, optional filter, sort.
fn build_search_query(
    has_filter: bool,
    sort_key: Option<&str>,
    sort_direction_token: Option<&str>,
) -> String {
    let mut sql = String::from(MODEL_SELECT);
    if has_filter {
        sql.push_str(FILTER_CLAUSE);
    }
    sql.push_str(&order_by_clause(sort_key, sort_direction_token));
    sql
}

/// PostgreSQL implementation of ModelSearch.
#[derive(Clone)]
pub struct PgModelSearch {
    pool: Pool<Postgres>,
}

impl PgModelSearch {
    /// Create a new PgModelSearch with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModelSearch for PgModelSearch {
    async fn search(&self, req: SearchModelsRequest) -> Result<Vec<ModelRecord>> {
        let start = Instant::now();
        let pattern = search_pattern(req.term.as_deref());
        let sql = build_search_query(
            pattern.is_some(),
            req.sort_key.as_deref(),
            req.sort_direction.as_deref(),
        );

        debug!(
            subsystem = "database",
            component = "search",
            op = "build_query",
            filtered = pattern.is_some(),
            sort_key = req.sort_key.as_deref().unwrap_or("<default>"),
            "Built model search query"
        );

        let mut query = sqlx::query(&sql);
        if let Some(pattern) = &pattern {
            query = query.bind(pattern);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        let records: Vec<ModelRecord> = rows.into_iter().map(map_model_row).collect();

        info!(
            subsystem = "database",
            component = "search",
            op = "search",
            filtered = pattern.is_some(),
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Model search completed"
        );
        Ok(records)
    }
}
