//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use villahub::models::booking::BookingStatus;
use villahub::models::support_ticket::TicketStatus;
use villahub::models::transaction::{TransactionStatus, TransactionType};
use villahub::models::user::UserRole;

const ADMIN_PASSWORD: &str = "Admin123!";
const GUEST_PASSWORD: &str = "Guest123!";

/// (name, slug, location, nightly price in cents, bedrooms, max guests)
const VILLAS: &[(&str, &str, &str, i64, i32, i32)] = &[
    ("Villa Kembang", "villa-kembang", "Ubud, Bali", 32_000, 3, 6),
    ("Casa Azul", "casa-azul", "Seminyak, Bali", 45_000, 4, 8),
    ("Rumah Sawah", "rumah-sawah", "Ubud, Bali", 18_500, 2, 4),
    ("Cliffside Retreat", "cliffside-retreat", "Uluwatu, Bali", 72_000, 5, 10),
    ("Lotus Pond House", "lotus-pond-house", "Canggu, Bali", 27_500, 2, 4),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = villahub::db::create_pool(&db_url, 5).await?;

    villahub::db::migrate(&pool).await?;

    println!("=== VillaHub Seed Script ===");

    let (_admin_id, guest_id) = seed_users(&pool).await?;
    let villa_ids = seed_villas(&pool).await?;
    seed_bookings(&pool, guest_id, &villa_ids).await?;
    seed_support_tickets(&pool, guest_id).await?;

    println!("\n=== Seed complete! ===");
    println!("Admin login: admin@villahub.local / {ADMIN_PASSWORD}");
    println!("Guest login: guest@villahub.local / {GUEST_PASSWORD}");

    Ok(())
}

async fn upsert_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password: &str,
    role: UserRole,
) -> anyhow::Result<Uuid> {
    let hash = villahub::services::auth::hash_password(password)?;
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (email, password_hash, name, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(&hash)
    .bind(name)
    .bind(role)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn seed_users(pool: &PgPool) -> anyhow::Result<(Uuid, Uuid)> {
    let admin = upsert_user(
        pool,
        "admin@villahub.local",
        "Platform Administrator",
        ADMIN_PASSWORD,
        UserRole::SuperAdmin,
    )
    .await?;
    let guest = upsert_user(
        pool,
        "guest@villahub.local",
        "Sample Guest",
        GUEST_PASSWORD,
        UserRole::User,
    )
    .await?;
    println!("[done] Admin and guest users");
    Ok((admin, guest))
}

async fn seed_villas(pool: &PgPool) -> anyhow::Result<Vec<Uuid>> {
    let mut ids = Vec::with_capacity(VILLAS.len());
    for &(name, slug, location, price, bedrooms, max_guests) in VILLAS {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO villas (name, slug, location, description, price_per_night_cents,
                                bedrooms, bathrooms, max_guests)
            VALUES ($1, $2, $3, $4, $5, $6, $6, $7)
            ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(location)
        .bind(format!("{name} in {location}."))
        .bind(price)
        .bind(bedrooms)
        .bind(max_guests)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }
    println!("[done] {} villas", ids.len());
    Ok(ids)
}

async fn seed_bookings(pool: &PgPool, guest_id: Uuid, villa_ids: &[Uuid]) -> anyhow::Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("[skip] Bookings already present ({existing})");
        return Ok(());
    }

    let now = Utc::now();
    // (villa index, start offset days, nights, status, paid days ago)
    let plan: &[(usize, i64, i64, BookingStatus, Option<i64>)] = &[
        (0, -2, 5, BookingStatus::Confirmed, Some(10)),
        (1, 0, 3, BookingStatus::Confirmed, Some(3)),
        (2, -4, 4, BookingStatus::Confirmed, Some(40)),
        (3, 7, 7, BookingStatus::Pending, None),
        (4, -30, 3, BookingStatus::Completed, Some(45)),
        (1, 14, 2, BookingStatus::Cancelled, None),
    ];

    for &(villa, start_offset, nights, status, paid_days_ago) in plan {
        let start = now + Duration::days(start_offset);
        let end = start + Duration::days(nights);
        let total = VILLAS[villa].3 * nights;

        let booking_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO bookings (villa_id, user_id, start_date, end_date, status, total_price_cents)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(villa_ids[villa])
        .bind(guest_id)
        .bind(start)
        .bind(end)
        .bind(status)
        .bind(total)
        .fetch_one(pool)
        .await?;

        if let Some(days_ago) = paid_days_ago {
            sqlx::query(
                r#"
                INSERT INTO transactions (booking_id, type, status, amount_in_cents, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(booking_id)
            .bind(TransactionType::BookingPayment)
            .bind(TransactionStatus::Paid)
            .bind(total)
            .bind(now - Duration::days(days_ago))
            .execute(pool)
            .await?;
        }
    }

    println!("[done] {} bookings with payments", plan.len());
    Ok(())
}

async fn seed_support_tickets(pool: &PgPool, guest_id: Uuid) -> anyhow::Result<()> {
    let tickets = [
        ("Late check-in", "We land at 23:00, can someone meet us?", TicketStatus::Open),
        ("Airport transfer", "Is a transfer included for 6 guests?", TicketStatus::Open),
        ("Pool heating", "Resolved with the host.", TicketStatus::Resolved),
    ];

    for (subject, message, status) in tickets {
        sqlx::query(
            "INSERT INTO support_tickets (user_id, subject, message, status) VALUES ($1, $2, $3, $4)",
        )
        .bind(guest_id)
        .bind(subject)
        .bind(message)
        .bind(status)
        .execute(pool)
        .await?;
    }

    println!("[done] {} support tickets", tickets.len());
    Ok(())
}
