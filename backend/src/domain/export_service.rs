//! Balance sheet export for the sente tracker.
//!
//! Renders a balance report into the flat row-based CSV layout the share
//! sink expects: one section per category, `field,value` rows, totals last.
//! Writing the file and handing it to the share sheet belong to the sink
//! collaborator, not to this service.

use chrono::Utc;
use log::info;
use shared::{group_thousands, BalanceReport, ExportBalanceSheetResponse};

/// The export itself is a pure rendering; no internal state is needed
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render a balance report as CSV rows grouped by category.
    ///
    /// Formatted values contain thousands separators, so they are quoted.
    pub fn balance_sheet_csv(&self, report: &BalanceReport) -> ExportBalanceSheetResponse {
        let sheet = &report.sheet;
        let date = Utc::now().format("%Y-%m-%d").to_string();

        let mut rows: Vec<String> = Vec::new();
        rows.push(format!("Balance Sheet Summary - {}", date));
        rows.push(String::new());

        rows.push("ASSETS".to_string());
        for (field, value) in [
            ("cashAtHand", sheet.assets.cash_at_hand),
            ("cashAtBank", sheet.assets.cash_at_bank),
            ("debtors", sheet.assets.debtors),
            ("investments", sheet.assets.investments),
            ("totalAssets", sheet.assets.total_assets),
        ] {
            rows.push(Self::value_row(field, value));
        }
        rows.push(String::new());

        rows.push("LIABILITIES".to_string());
        for (field, value) in [
            ("loans", sheet.liabilities.loans),
            ("accounts_payable", sheet.liabilities.accounts_payable),
            ("short_term_debt", sheet.liabilities.short_term_debt),
            ("totalLiabilities", sheet.liabilities.total_liabilities),
        ] {
            rows.push(Self::value_row(field, value));
        }
        rows.push(String::new());

        rows.push("EQUITY".to_string());
        for (field, value) in [
            ("capital", sheet.equity.capital),
            ("retainedEarnings", sheet.equity.retained_earnings),
            ("reserves", sheet.equity.reserves),
            ("totalEquity", sheet.equity.total_equity),
        ] {
            rows.push(Self::value_row(field, value));
        }

        let row_count = rows.len();
        let csv_content = format!("{}\n", rows.join("\n"));
        let filename = format!("balance_sheet_{}.csv", date);

        info!(
            "Exported balance sheet: {} rows, {} bytes, filename {}",
            row_count,
            csv_content.len(),
            filename
        );

        ExportBalanceSheetResponse {
            csv_content,
            filename,
            row_count,
        }
    }

    fn value_row(field: &str, value: f64) -> String {
        format!("{},\"{}\"", field, group_thousands(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{BalanceSheet, FinancialMetrics, Ratio};

    fn create_test_report() -> BalanceReport {
        let mut sheet = BalanceSheet::default();
        sheet.assets.cash_at_hand = 1500000.0;
        sheet.assets.investments = 400000.0;
        sheet.assets.total_assets = 1900000.0;
        sheet.liabilities.loans = 200000.0;
        sheet.liabilities.total_liabilities = 200000.0;
        sheet.equity.capital = 400000.0;
        sheet.equity.retained_earnings = 1300000.0;
        sheet.equity.total_equity = 1700000.0;

        BalanceReport {
            sheet,
            metrics: FinancialMetrics {
                current_ratio: Ratio::Value(9.5),
                quick_ratio: Ratio::Value(7.5),
                debt_to_equity: Ratio::Value(200000.0 / 1700000.0),
                working_capital: 1700000.0,
            },
            generated_at: "2025-06-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_export_contains_all_sections_in_order() {
        let service = ExportService::new();
        let response = service.balance_sheet_csv(&create_test_report());

        let assets_pos = response.csv_content.find("ASSETS").unwrap();
        let liabilities_pos = response.csv_content.find("LIABILITIES").unwrap();
        let equity_pos = response.csv_content.find("EQUITY").unwrap();

        assert!(assets_pos < liabilities_pos);
        assert!(liabilities_pos < equity_pos);
        assert!(response.csv_content.starts_with("Balance Sheet Summary - "));
    }

    #[test]
    fn test_export_formats_values_with_grouping() {
        let service = ExportService::new();
        let response = service.balance_sheet_csv(&create_test_report());

        assert!(response.csv_content.contains("cashAtHand,\"1,500,000\""));
        assert!(response.csv_content.contains("totalAssets,\"1,900,000\""));
        assert!(response.csv_content.contains("loans,\"200,000\""));
        assert!(response.csv_content.contains("accounts_payable,\"0\""));
        assert!(response.csv_content.contains("retainedEarnings,\"1,300,000\""));
    }

    #[test]
    fn test_export_filename_and_row_count() {
        let service = ExportService::new();
        let response = service.balance_sheet_csv(&create_test_report());

        assert!(response.filename.starts_with("balance_sheet_"));
        assert!(response.filename.ends_with(".csv"));
        // Title + 3 blank separators + 3 section headers + 13 value rows
        assert_eq!(response.row_count, 20);
        assert!(response.csv_content.ends_with('\n'));
    }
}
