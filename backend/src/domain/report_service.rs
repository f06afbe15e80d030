//! Dashboard and full-report presentation logic.

use chrono::DateTime;
use shared::{
    group_thousands, BalanceReport, DashboardSummary, FormattedTransaction, FullReportResponse,
    TrackerConfig, Transaction,
};

/// Service producing display-ready report data from raw records
#[derive(Clone)]
pub struct ReportService {
    config: TrackerConfig,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
        }
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Headline dashboard figures from the latest balance report.
    ///
    /// Dashboard assets count cash and debtors only (investments are shown
    /// separately), and liabilities count loans only.
    pub fn dashboard_summary(
        &self,
        report: &BalanceReport,
        recent_transactions: Vec<Transaction>,
    ) -> DashboardSummary {
        let assets = &report.sheet.assets;
        let total_assets = assets.cash_at_hand + assets.cash_at_bank + assets.debtors;
        let total_liabilities = report.sheet.liabilities.loans;

        DashboardSummary {
            total_assets,
            total_liabilities,
            net_worth: total_assets - total_liabilities,
            recent_transactions,
        }
    }

    /// Every transaction formatted for the full report view, newest first
    pub fn full_report(&self, transactions: &[Transaction]) -> FullReportResponse {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));

        let entries = sorted
            .into_iter()
            .map(|t| FormattedTransaction {
                id: t.id.clone(),
                transaction_type: t.transaction_type.label().to_string(),
                formatted_amount: format!(
                    "{} {}",
                    self.config.currency_symbol,
                    group_thousands(t.amount)
                ),
                formatted_date: self.format_date(&t.date),
                description: t.description.clone(),
            })
            .collect();

        FullReportResponse { entries }
    }

    /// Render an RFC 3339 date for display, falling back to the raw string
    /// when it cannot be parsed
    fn format_date(&self, date: &str) -> String {
        match DateTime::parse_from_rfc3339(date) {
            Ok(parsed) => parsed.format("%d %b %Y").to_string(),
            Err(_) => date.to_string(),
        }
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
