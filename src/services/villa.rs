//! Public villa listings.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::villa::{Villa, VillaFilters, VillaSummary};

/// Bound parameter for a dynamically built listing query.
#[derive(Debug, PartialEq)]
enum FilterArg {
    Text(String),
    Int(i32),
}

/// Build the WHERE clause and its bind arguments for listing filters.
fn build_filters(filters: &VillaFilters) -> (String, Vec<FilterArg>) {
    let mut conditions = vec!["is_published = true".to_string()];
    let mut args = Vec::new();

    if let Some(location) = filters.location.as_deref().map(str::trim) {
        if !location.is_empty() {
            args.push(FilterArg::Text(format!("%{location}%")));
            conditions.push(format!("location ILIKE ${}", args.len()));
        }
    }
    if let Some(guests) = filters.guests {
        args.push(FilterArg::Int(guests));
        conditions.push(format!("max_guests >= ${}", args.len()));
    }

    (format!("WHERE {}", conditions.join(" AND ")), args)
}

/// List published villas with optional location and capacity filters.
pub async fn list(
    pool: &PgPool,
    filters: &VillaFilters,
    pagination: &Pagination,
) -> Result<PagedResult<VillaSummary>, AppError> {
    let (where_clause, args) = build_filters(filters);

    let count_sql = format!("SELECT COUNT(*) FROM villas {where_clause}");
    let data_sql = format!(
        "SELECT id, name, slug, location, price_per_night_cents, bedrooms, max_guests \
         FROM villas {where_clause} ORDER BY name ASC LIMIT {} OFFSET {}",
        pagination.limit(),
        pagination.offset(),
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    let mut data_query = sqlx::query_as::<_, VillaSummary>(&data_sql);
    for arg in &args {
        match arg {
            FilterArg::Text(value) => {
                count_query = count_query.bind(value);
                data_query = data_query.bind(value);
            }
            FilterArg::Int(value) => {
                count_query = count_query.bind(*value);
                data_query = data_query.bind(*value);
            }
        }
    }

    let total = count_query.fetch_one(pool).await?;
    let items = data_query.fetch_all(pool).await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Find a published villa by its URL slug.
pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Villa, AppError> {
    sqlx::query_as::<_, Villa>(
        r#"
        SELECT id, name, slug, location, description, price_per_night_cents,
               bedrooms, bathrooms, max_guests, created_at, updated_at
        FROM villas
        WHERE slug = $1 AND is_published = true
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Villa '{slug}' not found")))
}
