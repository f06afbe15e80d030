//! Balance sheet aggregation for the sente tracker.
//!
//! This service turns the complete set of known transactions into a
//! point-in-time balance sheet plus the ratios derived from it. It is pure
//! and stateless: every emission from the transaction feed is replayed from
//! scratch, so the result never depends on the order transactions arrive in.

use chrono::Utc;
use shared::{BalanceReport, BalanceSheet, FinancialMetrics, Ratio, Transaction, TransactionType};

/// Service responsible for computing balance sheets from transaction sets
#[derive(Clone, Default)]
pub struct BalanceSheetService;

impl BalanceSheetService {
    pub fn new() -> Self {
        Self
    }

    /// Apply one transaction's effect onto an in-progress sheet.
    ///
    /// Unrecognized transaction types have no effect; the record is skipped,
    /// not reported as an error. Negative amounts are accepted and simply
    /// subtract.
    pub fn fold_transaction(&self, sheet: &mut BalanceSheet, transaction: &Transaction) {
        match transaction.transaction_type {
            TransactionType::Income => {
                sheet.assets.cash_at_hand += transaction.amount;
                sheet.equity.retained_earnings += transaction.amount;
            }
            TransactionType::Expense => {
                sheet.assets.cash_at_hand -= transaction.amount;
                sheet.equity.retained_earnings -= transaction.amount;
            }
            TransactionType::Investment => {
                sheet.assets.investments += transaction.amount;
                sheet.equity.capital += transaction.amount;
            }
            TransactionType::Other(_) => {}
        }
    }

    /// Recompute every category total from its leaf fields.
    ///
    /// The totals themselves are never part of the sum, so calling this
    /// repeatedly yields the same result.
    pub fn compute_totals(&self, sheet: &mut BalanceSheet) {
        sheet.assets.total_assets = sheet.assets.cash_at_hand
            + sheet.assets.cash_at_bank
            + sheet.assets.debtors
            + sheet.assets.investments;

        sheet.liabilities.total_liabilities = sheet.liabilities.loans
            + sheet.liabilities.accounts_payable
            + sheet.liabilities.short_term_debt;

        sheet.equity.total_equity =
            sheet.equity.capital + sheet.equity.retained_earnings + sheet.equity.reserves;
    }

    /// Derive financial ratios from a sheet whose totals are up to date.
    ///
    /// A zero denominator produces `Ratio::NotApplicable` rather than an
    /// infinite or NaN value.
    pub fn derive_metrics(&self, sheet: &BalanceSheet) -> FinancialMetrics {
        FinancialMetrics {
            current_ratio: Ratio::of(
                sheet.assets.total_assets,
                sheet.liabilities.total_liabilities,
            ),
            quick_ratio: Ratio::of(
                sheet.assets.cash_at_hand + sheet.assets.cash_at_bank,
                sheet.liabilities.total_liabilities,
            ),
            debt_to_equity: Ratio::of(
                sheet.liabilities.total_liabilities,
                sheet.equity.total_equity,
            ),
            working_capital: sheet.assets.total_assets - sheet.liabilities.total_liabilities,
        }
    }

    /// Build a complete report from the current transaction set.
    ///
    /// Starts from a zeroed sheet, folds every transaction (the fold is
    /// commutative and associative per type, so input order is irrelevant),
    /// recomputes the totals and derives the metrics.
    pub fn build_report(&self, transactions: &[Transaction]) -> BalanceReport {
        let mut sheet = BalanceSheet::default();
        for transaction in transactions {
            self.fold_transaction(&mut sheet, transaction);
        }
        self.compute_totals(&mut sheet);
        let metrics = self.derive_metrics(&sheet);

        BalanceReport {
            sheet,
            metrics,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn create_test_transaction(transaction_type: TransactionType, amount: f64) -> Transaction {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;

        Transaction {
            id: Transaction::generate_id(&transaction_type, now_millis),
            transaction_type,
            amount,
            date: "2025-01-10T10:00:00+03:00".to_string(),
            description: "Test transaction".to_string(),
            status: "completed".to_string(),
            created_at: "2025-01-10T10:00:00+03:00".to_string(),
        }
    }

    #[test]
    fn test_build_report_is_order_independent() {
        let service = BalanceSheetService::new();
        let transactions = vec![
            create_test_transaction(TransactionType::Income, 1000.0),
            create_test_transaction(TransactionType::Expense, 250.0),
            create_test_transaction(TransactionType::Investment, 400.0),
            create_test_transaction(TransactionType::Other("Transfer".to_string()), 999.0),
            create_test_transaction(TransactionType::Income, -50.0),
        ];

        let baseline = service.build_report(&transactions).sheet;

        // Every rotation and the full reversal must produce bit-identical totals
        let mut rotated = transactions.clone();
        for _ in 0..transactions.len() {
            rotated.rotate_left(1);
            assert_eq!(service.build_report(&rotated).sheet, baseline);
        }

        let reversed: Vec<_> = transactions.iter().rev().cloned().collect();
        assert_eq!(service.build_report(&reversed).sheet, baseline);
    }

    #[test]
    fn test_empty_input_yields_zeroes_and_na_metrics() {
        let service = BalanceSheetService::new();
        let report = service.build_report(&[]);

        assert_eq!(report.sheet, BalanceSheet::default());
        assert_eq!(report.metrics.current_ratio, Ratio::NotApplicable);
        assert_eq!(report.metrics.quick_ratio, Ratio::NotApplicable);
        assert_eq!(report.metrics.debt_to_equity, Ratio::NotApplicable);
        assert_eq!(report.metrics.working_capital, 0.0);
    }

    #[test]
    fn test_compute_totals_is_idempotent() {
        let service = BalanceSheetService::new();
        let mut sheet = BalanceSheet::default();
        sheet.assets.cash_at_hand = 300.0;
        sheet.assets.cash_at_bank = 700.0;
        sheet.liabilities.loans = 200.0;
        sheet.equity.capital = 800.0;

        service.compute_totals(&mut sheet);
        let once = sheet;
        service.compute_totals(&mut sheet);

        assert_eq!(sheet, once);
        assert_eq!(sheet.assets.total_assets, 1000.0);
        assert_eq!(sheet.liabilities.total_liabilities, 200.0);
        assert_eq!(sheet.equity.total_equity, 800.0);
    }

    #[test]
    fn test_single_income_transaction() {
        let service = BalanceSheetService::new();
        let report =
            service.build_report(&[create_test_transaction(TransactionType::Income, 1000.0)]);

        assert_eq!(report.sheet.assets.cash_at_hand, 1000.0);
        assert_eq!(report.sheet.equity.retained_earnings, 1000.0);
        assert_eq!(report.sheet.assets.total_assets, 1000.0);
        assert_eq!(report.sheet.equity.total_equity, 1000.0);
        assert_eq!(report.sheet.liabilities.total_liabilities, 0.0);
        assert_eq!(report.metrics.current_ratio, Ratio::NotApplicable);
        assert_eq!(report.metrics.working_capital, 1000.0);
    }

    #[test]
    fn test_income_then_expense() {
        let service = BalanceSheetService::new();
        let report = service.build_report(&[
            create_test_transaction(TransactionType::Income, 500.0),
            create_test_transaction(TransactionType::Expense, 200.0),
        ]);

        assert_eq!(report.sheet.assets.cash_at_hand, 300.0);
        assert_eq!(report.sheet.equity.retained_earnings, 300.0);
        assert_eq!(report.sheet.assets.total_assets, 300.0);
    }

    #[test]
    fn test_investment() {
        let service = BalanceSheetService::new();
        let report =
            service.build_report(&[create_test_transaction(TransactionType::Investment, 400.0)]);

        assert_eq!(report.sheet.assets.investments, 400.0);
        assert_eq!(report.sheet.equity.capital, 400.0);
        assert_eq!(report.sheet.assets.total_assets, 400.0);
        assert_eq!(report.sheet.equity.total_equity, 400.0);
        assert_eq!(report.metrics.debt_to_equity, Ratio::Value(0.0));
    }

    #[test]
    fn test_unknown_type_is_ignored() {
        let service = BalanceSheetService::new();
        let report = service.build_report(&[create_test_transaction(
            TransactionType::Other("Transfer".to_string()),
            999.0,
        )]);

        assert_eq!(report.sheet, service.build_report(&[]).sheet);
    }

    #[test]
    fn test_ratios_with_external_liabilities() {
        let service = BalanceSheetService::new();
        let mut sheet = BalanceSheet::default();
        service.fold_transaction(
            &mut sheet,
            &create_test_transaction(TransactionType::Income, 1000.0),
        );
        // Liabilities come from outside the transaction fold (e.g. loan records)
        sheet.liabilities.loans = 200.0;
        service.compute_totals(&mut sheet);

        let metrics = service.derive_metrics(&sheet);
        assert_eq!(metrics.current_ratio, Ratio::Value(1000.0 / 200.0));
        assert_eq!(metrics.quick_ratio, Ratio::Value(5.0));
        assert_eq!(metrics.debt_to_equity, Ratio::Value(0.2));
        assert_eq!(metrics.working_capital, 800.0);
    }

    #[test]
    fn test_fold_does_not_touch_other_categories() {
        let service = BalanceSheetService::new();
        let mut sheet = BalanceSheet::default();
        service.fold_transaction(
            &mut sheet,
            &create_test_transaction(TransactionType::Income, 750.0),
        );

        assert_eq!(sheet.assets.cash_at_bank, 0.0);
        assert_eq!(sheet.assets.debtors, 0.0);
        assert_eq!(sheet.assets.investments, 0.0);
        assert_eq!(sheet.liabilities, BalanceSheet::default().liabilities);
        assert_eq!(sheet.equity.capital, 0.0);
        assert_eq!(sheet.equity.reserves, 0.0);
    }
}
