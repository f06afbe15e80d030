//! # Sente Tracker Backend
//!
//! Contains all non-UI logic for the sente tracker: transaction logging,
//! loan records and the computed balance sheet.
//!
//! The backend follows a layered architecture:
//!
//! ```text
//! Presentation layer (screens, charts)
//!     |
//! Domain layer (services, balance feed)
//!     |
//! Storage layer (repository traits, CSV backend)
//! ```
//!
//! The presentation layer is out of scope here; it consumes the services and
//! subscribes to the balance feed. The storage layer stands in for the
//! managed document store of the original deployment.

pub mod config;
pub mod domain;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use log::info;
use shared::TrackerConfig;

use crate::domain::{
    BalanceFeed, ExportService, LoanService, ReportService, TransactionFormService,
    TransactionService,
};
use crate::storage::csv::CsvConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: TransactionService<CsvConnection>,
    pub loan_service: LoanService<CsvConnection>,
    pub form_service: TransactionFormService,
    pub report_service: ReportService,
    pub export_service: ExportService,
    pub balance_feed: Arc<BalanceFeed>,
}

/// Initialize the backend with all required services
pub fn initialize_backend<P: AsRef<Path>>(
    data_dir: P,
    config: TrackerConfig,
) -> Result<AppState> {
    info!("Setting up storage");
    let connection = Arc::new(CsvConnection::new(data_dir)?);

    info!("Setting up domain services");
    let balance_feed = Arc::new(BalanceFeed::new());
    let transaction_service =
        TransactionService::new(connection.clone(), balance_feed.clone(), config.clone());
    let loan_service = LoanService::new(connection);
    let form_service = TransactionFormService::with_config(config.clone());
    let report_service = ReportService::with_config(config);
    let export_service = ExportService::new();

    Ok(AppState {
        transaction_service,
        loan_service,
        form_service,
        report_service,
        export_service,
        balance_feed,
    })
}
