//! Villa (rental property) listing model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full villa row as shown on the detail page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Villa {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub location: String,
    pub description: String,
    pub price_per_night_cents: i64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Condensed villa row for listing cards.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VillaSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub location: String,
    pub price_per_night_cents: i64,
    pub bedrooms: i32,
    pub max_guests: i32,
}

/// Listing filters accepted as query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VillaFilters {
    pub location: Option<String>,
    pub guests: Option<i32>,
}
