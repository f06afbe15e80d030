//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer. The
//! original deployment delegates persistence to a managed document store;
//! these traits are that collaborator seam.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Loan, Transaction};

/// Trait defining the interface for transaction storage operations
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Store a new transaction
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// All known transactions, in storage order
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;
}

/// Trait defining the interface for loan storage operations
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// Store a new loan record
    async fn store_loan(&self, loan: &Loan) -> Result<()>;

    /// All known loans, in storage order
    async fn list_loans(&self) -> Result<Vec<Loan>>;
}

/// Trait defining the interface for storage connections
///
/// Abstracts away the specific connection type and provides factory methods
/// for creating repositories, so the domain layer can work with any storage
/// backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    /// The type of TransactionStore this connection creates
    type TransactionRepository: TransactionStore + Clone;

    /// The type of LoanStore this connection creates
    type LoanRepository: LoanStore + Clone;

    /// Create a new transaction repository for this connection
    fn create_transaction_repository(&self) -> Self::TransactionRepository;

    /// Create a new loan repository for this connection
    fn create_loan_repository(&self) -> Self::LoanRepository;
}
