//! Read-only aggregate queries backing the admin dashboard.
//!
//! The dashboard talks to [`StatsGateway`] rather than to the pool directly so
//! request handlers can run against an in-memory double in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::booking::BookingStatus;
use crate::models::reporting::TimeWindow;
use crate::models::support_ticket::TicketStatus;
use crate::models::transaction::{TransactionStatus, TransactionType};

/// Row counts the dashboard can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountQuery {
    Users,
    Villas,
    Bookings,
    /// Confirmed bookings whose stay starts inside the window.
    CheckIns(TimeWindow),
    /// Confirmed bookings whose stay ends inside the window.
    CheckOuts(TimeWindow),
    /// Bookings of any status created inside the window.
    NewBookings(TimeWindow),
    OpenTickets,
    /// Confirmed bookings whose stay covers the instant (inclusive on both ends).
    OccupiedAt(DateTime<Utc>),
}

/// Sums the dashboard can ask for. All results are integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SumQuery {
    /// Paid booking payments created inside the window.
    PaidBookingRevenue(TimeWindow),
}

/// Aggregate read access to the booking store.
#[async_trait]
pub trait StatsGateway: Send + Sync {
    async fn count(&self, query: CountQuery) -> Result<i64, AppError>;

    /// `None` when no rows match, mirroring SQL `SUM` over an empty set.
    async fn sum(&self, query: SumQuery) -> Result<Option<i64>, AppError>;
}

/// [`StatsGateway`] backed by the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStatsGateway {
    pool: PgPool,
}

impl PgStatsGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_all(&self, sql: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_bookings_in(
        &self,
        column: BookingDateColumn,
        status: Option<BookingStatus>,
        window: TimeWindow,
    ) -> Result<i64, AppError> {
        let column = column.as_sql();
        let count = match status {
            Some(status) => {
                let sql = format!(
                    "SELECT COUNT(*) FROM bookings \
                     WHERE status = $1 AND {column} >= $2 AND {column} < $3"
                );
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(status)
                    .bind(window.start)
                    .bind(window.end)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT COUNT(*) FROM bookings WHERE {column} >= $1 AND {column} < $2"
                );
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(window.start)
                    .bind(window.end)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }
}

/// Booking timestamp columns a window filter may target.
#[derive(Debug, Clone, Copy)]
enum BookingDateColumn {
    StartDate,
    EndDate,
    CreatedAt,
}

impl BookingDateColumn {
    fn as_sql(self) -> &'static str {
        match self {
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::CreatedAt => "created_at",
        }
    }
}

#[async_trait]
impl StatsGateway for PgStatsGateway {
    async fn count(&self, query: CountQuery) -> Result<i64, AppError> {
        match query {
            CountQuery::Users => self.count_all("SELECT COUNT(*) FROM users").await,
            CountQuery::Villas => self.count_all("SELECT COUNT(*) FROM villas").await,
            CountQuery::Bookings => self.count_all("SELECT COUNT(*) FROM bookings").await,
            CountQuery::CheckIns(window) => {
                self.count_bookings_in(
                    BookingDateColumn::StartDate,
                    Some(BookingStatus::Confirmed),
                    window,
                )
                .await
            }
            CountQuery::CheckOuts(window) => {
                self.count_bookings_in(
                    BookingDateColumn::EndDate,
                    Some(BookingStatus::Confirmed),
                    window,
                )
                .await
            }
            CountQuery::NewBookings(window) => {
                self.count_bookings_in(BookingDateColumn::CreatedAt, None, window)
                    .await
            }
            CountQuery::OpenTickets => {
                let count = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM support_tickets WHERE status = $1",
                )
                .bind(TicketStatus::Open)
                .fetch_one(&self.pool)
                .await?;
                Ok(count)
            }
            CountQuery::OccupiedAt(instant) => {
                let count = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM bookings \
                     WHERE status = $1 AND start_date <= $2 AND end_date >= $2",
                )
                .bind(BookingStatus::Confirmed)
                .bind(instant)
                .fetch_one(&self.pool)
                .await?;
                Ok(count)
            }
        }
    }

    async fn sum(&self, query: SumQuery) -> Result<Option<i64>, AppError> {
        match query {
            SumQuery::PaidBookingRevenue(window) => {
                // SUM(BIGINT) is NUMERIC in Postgres; cents fit comfortably in BIGINT.
                let total = sqlx::query_scalar::<_, Option<i64>>(
                    r#"
                    SELECT SUM(amount_in_cents)::BIGINT
                    FROM transactions
                    WHERE type = $1
                      AND status = $2
                      AND created_at >= $3
                      AND created_at < $4
                    "#,
                )
                .bind(TransactionType::BookingPayment)
                .bind(TransactionStatus::Paid)
                .bind(window.start)
                .bind(window.end)
                .fetch_one(&self.pool)
                .await?;
                Ok(total)
            }
        }
    }
}
