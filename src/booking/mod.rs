//! Training booking recording and commission splits.
//!
//! Handles the post-payment half of a training purchase: serializing slot
//! ownership, computing the trainer/platform split, and persisting the
//! booking row in one transaction.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{group_multiplier, split_commission, CommissionSplit};
pub use models::{Booking, BookingStatus, NewBooking, PaymentStatus, TrainerRate};
pub use routes::router;
