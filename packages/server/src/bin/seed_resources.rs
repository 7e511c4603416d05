// Seed the resources catalog from a JSON file.
//
// Usage: seed_resources [path]   (defaults to data/resources_seed.json)
//
// Upserts by resource id, so re-running after editing the file updates
// rates and details in place without touching bookings.

use anyhow::{Context, Result};
use serde::Deserialize;
use server_core::domains::bookings::Resource;
use server_core::Config;
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
struct SeedData {
    resources: Vec<ResourceInput>,
}

#[derive(Debug, Deserialize)]
struct ResourceInput {
    id: String,
    name: String,
    category: String,
    location: Option<String>,
    description: Option<String>,
    hourly_rate_cents: i64,
    capacity: Option<i32>,
    details: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    println!("✓ Connected to database");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/resources_seed.json".to_string());
    let json_data =
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
    let seed_data: SeedData =
        serde_json::from_str(&json_data).context("Failed to parse seed data")?;

    println!("✓ Loaded {} resources from {path}", seed_data.resources.len());

    for (idx, input) in seed_data.resources.iter().enumerate() {
        println!(
            "[{}/{}] Upserting: {} ({})",
            idx + 1,
            seed_data.resources.len(),
            input.name,
            input.id
        );

        let resource = Resource {
            id: input.id.clone(),
            name: input.name.clone(),
            category: input.category.clone(),
            location: input.location.clone(),
            description: input.description.clone(),
            hourly_rate_cents: input.hourly_rate_cents,
            capacity: input.capacity,
            details: input.details.clone(),
            created_at: chrono::Utc::now(),
        };

        resource
            .upsert(&pool)
            .await
            .with_context(|| format!("Failed to upsert resource {}", input.id))?;
    }

    println!("\n✨ Seed complete: {} resources", seed_data.resources.len());

    Ok(())
}
