//! # Storage Module
//!
//! Handles all data persistence for the sente tracker backend.
//!
//! The domain layer only ever talks to the traits defined here; the concrete
//! backend (CSV files in this build, a managed document store in the original
//! deployment) can be swapped without touching business logic.

pub mod csv;
pub mod traits;

pub use traits::{Connection, LoanStore, TransactionStore};
