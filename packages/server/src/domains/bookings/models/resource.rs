use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::ResourceCategory;

/// A bookable resource: a room, a vehicle, or a parking slot
///
/// `category` is stored as lowercase text; use [`Resource::category`] to get
/// the typed value. Rows with text no current build understands still load.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub hourly_rate_cents: i64,
    pub capacity: Option<i32>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Resource {
    pub fn category(&self) -> Option<ResourceCategory> {
        ResourceCategory::parse(&self.category)
    }

    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let resource = sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(resource)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let resources = sqlx::query_as::<_, Resource>("SELECT * FROM resources ORDER BY id")
            .fetch_all(pool)
            .await?;

        Ok(resources)
    }

    pub async fn find_by_category(category: ResourceCategory, pool: &PgPool) -> Result<Vec<Self>> {
        let resources = sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources WHERE category = $1 ORDER BY id",
        )
        .bind(category.as_str())
        .fetch_all(pool)
        .await?;

        Ok(resources)
    }

    /// Insert a resource, replacing any previous row with the same id.
    /// Provisioning is operational (seeds, admin tooling), so last write wins.
    pub async fn upsert(&self, pool: &PgPool) -> Result<Self> {
        let resource = sqlx::query_as::<_, Resource>(
            "INSERT INTO resources (id, name, category, location, description, hourly_rate_cents, capacity, details)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET
                 name = EXCLUDED.name,
                 category = EXCLUDED.category,
                 location = EXCLUDED.location,
                 description = EXCLUDED.description,
                 hourly_rate_cents = EXCLUDED.hourly_rate_cents,
                 capacity = EXCLUDED.capacity,
                 details = EXCLUDED.details
             RETURNING *",
        )
        .bind(&self.id)
        .bind(&self.name)
        .bind(&self.category)
        .bind(&self.location)
        .bind(&self.description)
        .bind(self.hourly_rate_cents)
        .bind(self.capacity)
        .bind(&self.details)
        .fetch_one(pool)
        .await?;

        Ok(resource)
    }
}
