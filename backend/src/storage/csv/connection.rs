use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::Connection;

/// CsvConnection manages file paths and ensures the CSV files exist
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Get the file path for the transactions file
    pub fn transactions_file_path(&self) -> PathBuf {
        self.base_directory.join("transactions.csv")
    }

    /// Get the file path for the loans file
    pub fn loans_file_path(&self) -> PathBuf {
        self.base_directory.join("loans.csv")
    }

    /// Ensure the transactions CSV file exists with its header
    pub fn ensure_transactions_file_exists(&self) -> Result<()> {
        let file_path = self.transactions_file_path();
        if !file_path.exists() {
            let header = "id,transactionType,amount,date,description,status,createdAt\n";
            fs::write(&file_path, header)?;
        }
        Ok(())
    }

    /// Ensure the loans CSV file exists with its header
    pub fn ensure_loans_file_exists(&self) -> Result<()> {
        let file_path = self.loans_file_path();
        if !file_path.exists() {
            let header =
                "id,loanType,loanAmount,interestRate,repaymentDate,borrowerName,aging,status,createdAt\n";
            fs::write(&file_path, header)?;
        }
        Ok(())
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}

impl Connection for CsvConnection {
    type TransactionRepository = super::transaction_repository::TransactionRepository;
    type LoanRepository = super::loan_repository::LoanRepository;

    fn create_transaction_repository(&self) -> Self::TransactionRepository {
        super::transaction_repository::TransactionRepository::new(self.clone())
    }

    fn create_loan_repository(&self) -> Self::LoanRepository {
        super::loan_repository::LoanRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("tracker").join("data");

        let connection = CsvConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_ensure_files_write_headers_once() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        connection.ensure_transactions_file_exists().unwrap();
        connection.ensure_loans_file_exists().unwrap();

        let transactions_header =
            fs::read_to_string(connection.transactions_file_path()).unwrap();
        assert!(transactions_header.starts_with("id,transactionType,amount"));

        // A second call must not truncate existing content
        fs::write(
            connection.transactions_file_path(),
            format!("{}some,row\n", transactions_header),
        )
        .unwrap();
        connection.ensure_transactions_file_exists().unwrap();
        let after = fs::read_to_string(connection.transactions_file_path()).unwrap();
        assert!(after.contains("some,row"));
    }
}
