//! Shared builds
//!
//! A saved build is looked up by an 8-character share code. Component ids
//! are stored as submitted (including ids the catalog no longer knows) and
//! resolved against the catalog when the build is read back.

use crate::catalog::Catalog;
use crate::Result;
use rand::Rng;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

pub const SHARE_CODE_LEN: usize = 8;
const SHARE_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Name used when a build is saved without one
pub const UNTITLED_BUILD: &str = "Untitled Build";

/// Random share code of uppercase letters and digits.
///
/// Collisions are not checked; the UNIQUE constraint rejects the insert.
pub fn generate_share_code() -> String {
    let mut rng = rand::thread_rng();
    (0..SHARE_CODE_LEN)
        .map(|_| SHARE_CODE_CHARSET[rng.gen_range(0..SHARE_CODE_CHARSET.len())] as char)
        .collect()
}

/// Build to be saved
#[derive(Debug, Clone, Default)]
pub struct NewBuild {
    pub name: String,
    pub description: Option<String>,
    pub component_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedBuild {
    pub id: i64,
    pub share_code: String,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredBuild {
    pub id: i64,
    pub share_code: String,
    pub name: String,
    pub description: String,
    pub total_price: f64,
    /// RFC 3339
    pub created_at: String,
    pub updated_at: String,
    pub component_ids: Vec<i64>,
}

/// Persist a build and return its share code.
///
/// The total price sums every id the catalog knows; unknown ids cost nothing.
pub async fn save_build(pool: &SqlitePool, catalog: &Catalog, build: NewBuild) -> Result<SavedBuild> {
    let name = match build.name.trim() {
        "" => UNTITLED_BUILD.to_string(),
        trimmed => trimmed.to_string(),
    };
    let description = build.description.unwrap_or_default();
    let total_price: f64 = build
        .component_ids
        .iter()
        .filter_map(|id| catalog.get(*id))
        .map(|c| c.price)
        .sum();
    let share_code = generate_share_code();
    let now = chrono::Utc::now().to_rfc3339();

    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO builds (share_code, name, description, total_price, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&share_code)
    .bind(&name)
    .bind(&description)
    .bind(total_price)
    .bind(&now)
    .bind(&now)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for (position, component_id) in build.component_ids.iter().enumerate() {
        sqlx::query(
            "INSERT INTO build_components (build_id, position, component_id) VALUES (?, ?, ?)",
        )
        .bind(id)
        .bind(position as i64)
        .bind(*component_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        id,
        share_code = %share_code,
        components = build.component_ids.len(),
        total_price,
        "Build saved"
    );

    Ok(SavedBuild {
        id,
        share_code,
        total_price,
    })
}

/// Load a build by share code. Unknown codes yield `Ok(None)`.
pub async fn load_build(pool: &SqlitePool, share_code: &str) -> Result<Option<StoredBuild>> {
    let row = sqlx::query_as::<_, (i64, String, String, String, f64, String, String)>(
        r#"
        SELECT id, share_code, name, description, total_price, created_at, updated_at
        FROM builds
        WHERE share_code = ?
        "#,
    )
    .bind(share_code)
    .fetch_optional(pool)
    .await?;

    let Some((id, share_code, name, description, total_price, created_at, updated_at)) = row else {
        debug!(share_code, "No build with this share code");
        return Ok(None);
    };

    let component_ids: Vec<i64> = sqlx::query_scalar(
        "SELECT component_id FROM build_components WHERE build_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(StoredBuild {
        id,
        share_code,
        name,
        description,
        total_price,
        created_at,
        updated_at,
        component_ids,
    }))
}
