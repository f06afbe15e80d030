//! Loan record management for the sente tracker.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use shared::{AddLoanRequest, AddLoanResponse, Loan, LoanListRequest, LoanListResponse, LoanType};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::storage::{Connection, LoanStore};

#[derive(Clone)]
pub struct LoanService<C: Connection> {
    loan_repository: C::LoanRepository,
}

impl<C: Connection> LoanService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let loan_repository = connection.create_loan_repository();
        Self { loan_repository }
    }

    /// Add a new loan record. New loans always start out active.
    pub async fn add_loan(&self, request: AddLoanRequest) -> Result<AddLoanResponse> {
        let borrower_name = request.borrower_name.trim().to_string();
        if borrower_name.is_empty() {
            return Err(anyhow!("Borrower name is required"));
        }
        if matches!(request.loan_type, LoanType::Other(ref tag) if tag.is_empty()) {
            return Err(anyhow!("Loan type is required"));
        }
        if !request.loan_amount.is_finite() || request.loan_amount <= 0.0 {
            return Err(anyhow!("Loan amount must be a positive number"));
        }
        if !request.interest_rate.is_finite() || request.interest_rate < 0.0 {
            return Err(anyhow!("Interest rate must be a number"));
        }
        if request.repayment_date.trim().is_empty() {
            return Err(anyhow!("Repayment date is required"));
        }

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let loan = Loan {
            id: Loan::generate_id(now_millis),
            loan_type: request.loan_type,
            loan_amount: request.loan_amount,
            interest_rate: request.interest_rate,
            repayment_date: request.repayment_date,
            borrower_name,
            aging: request.aging,
            status: "active".to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        self.loan_repository.store_loan(&loan).await?;
        info!(
            "Added {} loan {} for borrower {} at {}% interest",
            loan.loan_type, loan.id, loan.borrower_name, loan.interest_rate
        );

        Ok(AddLoanResponse {
            loan,
            success_message: "Loan added successfully!".to_string(),
        })
    }

    /// List loans, newest first, optionally filtered by borrower name
    pub async fn list_loans(&self, request: LoanListRequest) -> Result<LoanListResponse> {
        let mut loans = self.loan_repository.list_loans().await?;

        if let Some(search) = request.search.filter(|s| !s.trim().is_empty()) {
            let needle = search.trim().to_lowercase();
            loans.retain(|l| l.borrower_name.to_lowercase().contains(&needle));
        }

        loans.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(LoanListResponse { loans })
    }
}
