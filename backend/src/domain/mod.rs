//! # Domain Module
//!
//! Contains all business logic for the sente tracker backend.
//!
//! ## Module Organization
//!
//! - **balance_sheet_service**: The core aggregation: transaction set in,
//!   balance sheet and ratios out
//! - **balance_feed**: Publishes recomputed reports to snapshot consumers,
//!   with last-write-wins ordering and stale-data signalling
//! - **transaction_service**: Recording, listing and searching transactions
//! - **loan_service**: Loan record management
//! - **transaction_form**: Form-boundary validation and amount parsing
//! - **report_service**: Dashboard summary and full-report formatting
//! - **export_service**: Balance sheet CSV rendering for the share sink
//!
//! ## Business Rules
//!
//! - Transactions must have non-empty descriptions and numeric amounts
//! - Income and Expense move cash at hand and retained earnings; Investment
//!   moves investments and capital; anything else is ignored by the sheet
//! - Category totals are always derived from their leaf fields
//! - Ratios with a zero denominator are reported as not applicable, never as
//!   an infinite or NaN value

pub mod balance_feed;
pub mod balance_sheet_service;
pub mod export_service;
pub mod loan_service;
pub mod report_service;
pub mod transaction_form;
pub mod transaction_service;

pub use balance_feed::*;
pub use balance_sheet_service::*;
pub use export_service::*;
pub use loan_service::*;
pub use report_service::*;
pub use transaction_form::*;
pub use transaction_service::*;
