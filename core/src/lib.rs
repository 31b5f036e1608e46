//! Card rewards engine: which card to use for a purchase category, and
//! which bonuses are about to expire.
//!
//! The pure core is `activity`, `category`, `ranking` and `expiry`. It
//! takes dates as parameters and touches no I/O. `store` and `wallet`
//! are the persistence and request layers around it.

pub mod activity;
pub mod category;
pub mod clock;
pub mod config;
pub mod error;
pub mod expiry;
pub mod favorites;
pub mod model;
pub mod ranking;
pub mod store;
pub mod types;
pub mod validation;
pub mod wallet;
