//! Admin dashboard statistics aggregation.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::db::stats::{CountQuery, StatsGateway, SumQuery};
use crate::errors::AppError;
use crate::models::reporting::ReportingWindows;

/// Client-facing message for any dashboard failure.
pub const DASHBOARD_FAILURE: &str = "Failed to fetch dashboard statistics";

/// Flat statistics record rendered by the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Paid booking revenue for the current month, in cents.
    pub total_revenue: i64,
    pub total_bookings: i64,
    pub total_properties: i64,
    pub total_users: i64,
    pub check_ins: i64,
    pub check_outs: i64,
    pub new_bookings: i64,
    pub pending_inquiries: i64,
    /// Whole percent of properties under an active confirmed booking.
    pub occupancy_rate: i64,
    /// Current-month revenue per booking, in whole cents.
    pub average_booking_value: i64,
    /// Month-over-month revenue change in percent, two decimals.
    #[serde(serialize_with = "serialize_percent")]
    pub revenue_change: f64,
}

/// Whole percentages go out as integers (`25`, not `25.0`).
fn serialize_percent<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Raw query results before derivation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawCounts {
    pub total_users: i64,
    pub total_properties: i64,
    pub total_bookings: i64,
    pub current_revenue: Option<i64>,
    pub previous_revenue: Option<i64>,
    pub check_ins: i64,
    pub check_outs: i64,
    pub new_bookings: i64,
    pub pending_inquiries: i64,
    pub occupied: i64,
}

/// Fetch all dashboard statistics as of `now`, with calendar windows on `tz`.
///
/// The ten aggregate queries run concurrently; the first failure aborts the
/// whole batch and nothing partial is returned.
pub async fn get_stats(
    gateway: &dyn StatsGateway,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<DashboardStats, AppError> {
    let windows = ReportingWindows::at(now, tz);

    let (
        total_users,
        total_properties,
        total_bookings,
        current_revenue,
        previous_revenue,
        check_ins,
        check_outs,
        new_bookings,
        pending_inquiries,
        occupied,
    ) = tokio::try_join!(
        gateway.count(CountQuery::Users),
        gateway.count(CountQuery::Villas),
        gateway.count(CountQuery::Bookings),
        gateway.sum(SumQuery::PaidBookingRevenue(windows.current_month)),
        gateway.sum(SumQuery::PaidBookingRevenue(windows.previous_month)),
        gateway.count(CountQuery::CheckIns(windows.today)),
        gateway.count(CountQuery::CheckOuts(windows.today)),
        gateway.count(CountQuery::NewBookings(windows.today)),
        gateway.count(CountQuery::OpenTickets),
        gateway.count(CountQuery::OccupiedAt(windows.now)),
    )?;

    Ok(derive_stats(RawCounts {
        total_users,
        total_properties,
        total_bookings,
        current_revenue,
        previous_revenue,
        check_ins,
        check_outs,
        new_bookings,
        pending_inquiries,
        occupied,
    }))
}

/// Combine raw counts into the dashboard record.
pub fn derive_stats(raw: RawCounts) -> DashboardStats {
    let current_revenue = raw.current_revenue.unwrap_or(0);
    let previous_revenue = raw.previous_revenue.unwrap_or(0);

    DashboardStats {
        total_revenue: current_revenue,
        total_bookings: raw.total_bookings,
        total_properties: raw.total_properties,
        total_users: raw.total_users,
        check_ins: raw.check_ins,
        check_outs: raw.check_outs,
        new_bookings: raw.new_bookings,
        pending_inquiries: raw.pending_inquiries,
        occupancy_rate: occupancy_rate(raw.occupied, raw.total_properties),
        average_booking_value: average_booking_value(current_revenue, raw.total_bookings),
        revenue_change: revenue_change(current_revenue, previous_revenue),
    }
}

/// Percent change from `previous` to `current`, or 0 when there is no baseline.
pub fn revenue_change(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    let percent = ((current - previous) as f64 / previous as f64) * 100.0;
    round_half_up(percent * 100.0) / 100.0
}

pub fn average_booking_value(revenue: i64, bookings: i64) -> i64 {
    if bookings == 0 {
        return 0;
    }
    round_half_up(revenue as f64 / bookings as f64) as i64
}

pub fn occupancy_rate(occupied: i64, properties: i64) -> i64 {
    if properties == 0 {
        return 0;
    }
    round_half_up((occupied as f64 / properties as f64) * 100.0) as i64
}

/// Round to the nearest integer with halves going towards positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
