//! Transaction service domain logic for the sente tracker.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use shared::{
    RecordTransactionRequest, RecordTransactionResponse, TrackerConfig, Transaction,
    TransactionListRequest, TransactionListResponse, TransactionType,
};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::balance_feed::BalanceFeed;
use crate::storage::{Connection, TransactionStore};

#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    feed: Arc<BalanceFeed>,
    config: TrackerConfig,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(connection: Arc<C>, feed: Arc<BalanceFeed>, config: TrackerConfig) -> Self {
        let transaction_repository = connection.create_transaction_repository();
        Self {
            transaction_repository,
            feed,
            config,
        }
    }

    /// Record a new transaction and push the updated set to the balance feed.
    ///
    /// The request is expected to come from the validated form boundary, but
    /// the business rules are re-checked here so the service stays safe when
    /// called directly.
    pub async fn record_transaction(
        &self,
        request: RecordTransactionRequest,
    ) -> Result<RecordTransactionResponse> {
        let description = request.description.trim().to_string();
        if description.is_empty() || description.len() > self.config.max_description_length {
            return Err(anyhow!(
                "Description must be between 1 and {} characters",
                self.config.max_description_length
            ));
        }
        if !request.amount.is_finite() {
            return Err(anyhow!("Amount must be a number"));
        }
        if matches!(request.transaction_type, TransactionType::Other(ref tag) if tag.is_empty()) {
            return Err(anyhow!("Transaction type is required"));
        }

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let now = Utc::now().to_rfc3339();
        let transaction = Transaction {
            id: Transaction::generate_id(&request.transaction_type, now_millis),
            transaction_type: request.transaction_type,
            amount: request.amount,
            date: request.date.unwrap_or_else(|| now.clone()),
            description,
            status: "completed".to_string(),
            created_at: now,
        };

        self.transaction_repository
            .store_transaction(&transaction)
            .await?;
        info!(
            "Recorded {} transaction {} for {} {}",
            transaction.transaction_type,
            transaction.id,
            self.config.currency_symbol,
            shared::group_thousands(transaction.amount)
        );

        self.notify_feed().await?;

        Ok(RecordTransactionResponse {
            transaction,
            success_message: "Transaction recorded successfully!".to_string(),
        })
    }

    /// List transactions, newest first, optionally filtered by description
    pub async fn list_transactions(
        &self,
        request: TransactionListRequest,
    ) -> Result<TransactionListResponse> {
        let mut transactions = self.transaction_repository.list_transactions().await?;

        if let Some(search) = request.search.filter(|s| !s.trim().is_empty()) {
            let needle = search.trim().to_lowercase();
            transactions.retain(|t| t.description.to_lowercase().contains(&needle));
        }

        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(limit) = request.limit {
            transactions.truncate(limit as usize);
        }

        Ok(TransactionListResponse { transactions })
    }

    /// The newest transactions for the dashboard
    pub async fn recent_transactions(&self) -> Result<Vec<Transaction>> {
        let response = self
            .list_transactions(TransactionListRequest {
                search: None,
                limit: Some(self.config.recent_limit as u32),
            })
            .await?;
        Ok(response.transactions)
    }

    /// Reload the full transaction set and hand it to the balance feed,
    /// mirroring the store's own change notifications.
    async fn notify_feed(&self) -> Result<()> {
        let transactions = self.transaction_repository.list_transactions().await?;
        self.feed.on_transaction_set_changed(&transactions);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::CsvConnection;
    use shared::FeedStatus;
    use tempfile::TempDir;

    async fn create_test_service() -> (TransactionService<CsvConnection>, Arc<BalanceFeed>, TempDir)
    {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        let feed = Arc::new(BalanceFeed::new());
        let service =
            TransactionService::new(connection, feed.clone(), TrackerConfig::default());
        (service, feed, temp_dir)
    }

    fn income_request(description: &str, amount: f64) -> RecordTransactionRequest {
        RecordTransactionRequest {
            transaction_type: TransactionType::Income,
            amount,
            date: None,
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_transaction_basic() {
        let (service, _feed, _temp_dir) = create_test_service().await;

        let response = service
            .record_transaction(income_request("Interest earned", 50000.0))
            .await
            .unwrap();

        assert_eq!(response.transaction.amount, 50000.0);
        assert_eq!(response.transaction.description, "Interest earned");
        assert_eq!(response.transaction.transaction_type, TransactionType::Income);
        assert_eq!(response.transaction.status, "completed");
        assert!(response.transaction.id.starts_with("transaction::income::"));
    }

    #[tokio::test]
    async fn test_record_transaction_rejects_empty_description() {
        let (service, _feed, _temp_dir) = create_test_service().await;

        let result = service.record_transaction(income_request("   ", 100.0)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_record_transaction_rejects_non_finite_amount() {
        let (service, _feed, _temp_dir) = create_test_service().await;

        let result = service
            .record_transaction(income_request("Bad amount", f64::NAN))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_record_transaction_updates_feed() {
        let (service, feed, _temp_dir) = create_test_service().await;

        service
            .record_transaction(income_request("Member deposit", 500.0))
            .await
            .unwrap();
        service
            .record_transaction(RecordTransactionRequest {
                transaction_type: TransactionType::Expense,
                amount: 200.0,
                date: None,
                description: "Stationery".to_string(),
            })
            .await
            .unwrap();

        let update = feed.latest();
        assert_eq!(update.status, FeedStatus::Live);
        assert_eq!(update.report.sheet.assets.cash_at_hand, 300.0);
        assert_eq!(update.report.sheet.equity.retained_earnings, 300.0);
        assert_eq!(update.revision, 2);
    }

    #[tokio::test]
    async fn test_list_transactions_search_is_case_insensitive() {
        let (service, _feed, _temp_dir) = create_test_service().await;

        service
            .record_transaction(income_request("School fees payment", 1000.0))
            .await
            .unwrap();
        service
            .record_transaction(income_request("Market day sales", 2000.0))
            .await
            .unwrap();

        let response = service
            .list_transactions(TransactionListRequest {
                search: Some("SCHOOL".to_string()),
                limit: None,
            })
            .await
            .unwrap();

        assert_eq!(response.transactions.len(), 1);
        assert_eq!(response.transactions[0].description, "School fees payment");
    }

    #[tokio::test]
    async fn test_list_transactions_sorted_newest_first_with_limit() {
        let (service, _feed, _temp_dir) = create_test_service().await;

        for (day, description) in [(10, "First"), (15, "Second"), (20, "Third")] {
            service
                .record_transaction(RecordTransactionRequest {
                    transaction_type: TransactionType::Income,
                    amount: 100.0,
                    date: Some(format!("2025-01-{:02}T10:00:00+03:00", day)),
                    description: description.to_string(),
                })
                .await
                .unwrap();
        }

        let response = service
            .list_transactions(TransactionListRequest {
                search: None,
                limit: Some(2),
            })
            .await
            .unwrap();

        assert_eq!(response.transactions.len(), 2);
        assert_eq!(response.transactions[0].description, "Third");
        assert_eq!(response.transactions[1].description, "Second");
    }

    #[tokio::test]
    async fn test_recent_transactions_respects_configured_limit() {
        let (service, _feed, _temp_dir) = create_test_service().await;

        for day in 1..=8 {
            service
                .record_transaction(RecordTransactionRequest {
                    transaction_type: TransactionType::Income,
                    amount: 100.0,
                    date: Some(format!("2025-02-{:02}T10:00:00+03:00", day)),
                    description: format!("Deposit {}", day),
                })
                .await
                .unwrap();
        }

        let recent = service.recent_transactions().await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].description, "Deposit 8");
    }
}
