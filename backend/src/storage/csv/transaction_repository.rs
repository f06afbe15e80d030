use anyhow::Result;
use async_trait::async_trait;
use csv::{Reader, Writer};
use shared::{Transaction, TransactionType};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::storage::traits::TransactionStore;

/// CSV-based transaction repository
#[derive(Clone)]
pub struct TransactionRepository {
    connection: CsvConnection,
}

impl TransactionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all transactions from the CSV file.
    ///
    /// Malformed numeric fields fall back to zero rather than failing the
    /// whole read.
    fn read_transactions(&self) -> Result<Vec<Transaction>> {
        self.connection.ensure_transactions_file_exists()?;

        let file = File::open(self.connection.transactions_file_path())?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut transactions = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            transactions.push(Transaction {
                id: record.get(0).unwrap_or("").to_string(),
                transaction_type: TransactionType::from(
                    record.get(1).unwrap_or("").to_string(),
                ),
                amount: record.get(2).unwrap_or("0").parse::<f64>().unwrap_or(0.0),
                date: record.get(3).unwrap_or("").to_string(),
                description: record.get(4).unwrap_or("").to_string(),
                status: record.get(5).unwrap_or("completed").to_string(),
                created_at: record.get(6).unwrap_or("").to_string(),
            });
        }

        Ok(transactions)
    }

    /// Write all transactions to the CSV file via an atomic temp-file rename
    fn write_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        let file_path = self.connection.transactions_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record([
                "id",
                "transactionType",
                "amount",
                "date",
                "description",
                "status",
                "createdAt",
            ])?;

            for transaction in transactions {
                let amount = transaction.amount.to_string();
                csv_writer.write_record([
                    transaction.id.as_str(),
                    transaction.transaction_type.label(),
                    amount.as_str(),
                    transaction.date.as_str(),
                    transaction.description.as_str(),
                    transaction.status.as_str(),
                    transaction.created_at.as_str(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.read_transactions()?;
        transactions.push(transaction.clone());
        self.write_transactions(&transactions)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.read_transactions()
    }
}
