//! CSV-file storage backend

pub mod connection;
pub mod loan_repository;
pub mod transaction_repository;

pub use connection::CsvConnection;
pub use loan_repository::LoanRepository;
pub use transaction_repository::TransactionRepository;
