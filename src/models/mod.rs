//! Database models and DTOs for all domain entities.

pub mod booking;
pub mod pagination;
pub mod reporting;
pub mod support_ticket;
pub mod transaction;
pub mod user;
pub mod villa;
