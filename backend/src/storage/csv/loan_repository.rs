use anyhow::Result;
use async_trait::async_trait;
use csv::{Reader, Writer};
use shared::{Loan, LoanType};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::storage::traits::LoanStore;

/// CSV-based loan repository
#[derive(Clone)]
pub struct LoanRepository {
    connection: CsvConnection,
}

impl LoanRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_loans(&self) -> Result<Vec<Loan>> {
        self.connection.ensure_loans_file_exists()?;

        let file = File::open(self.connection.loans_file_path())?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut loans = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            // An empty aging column means the bucket was never set
            let aging = match record.get(6).unwrap_or("") {
                "" => None,
                value => Some(value.to_string()),
            };

            loans.push(Loan {
                id: record.get(0).unwrap_or("").to_string(),
                loan_type: LoanType::from(record.get(1).unwrap_or("").to_string()),
                loan_amount: record.get(2).unwrap_or("0").parse::<f64>().unwrap_or(0.0),
                interest_rate: record.get(3).unwrap_or("0").parse::<f64>().unwrap_or(0.0),
                repayment_date: record.get(4).unwrap_or("").to_string(),
                borrower_name: record.get(5).unwrap_or("").to_string(),
                aging,
                status: record.get(7).unwrap_or("active").to_string(),
                created_at: record.get(8).unwrap_or("").to_string(),
            });
        }

        Ok(loans)
    }

    fn write_loans(&self, loans: &[Loan]) -> Result<()> {
        let file_path = self.connection.loans_file_path();
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
                "loanType",
                "loanAmount",
                "interestRate",
                "repaymentDate",
                "borrowerName",
                "aging",
                "status",
                "createdAt",
            ])?;

            for loan in loans {
                let loan_amount = loan.loan_amount.to_string();
                let interest_rate = loan.interest_rate.to_string();
                csv_writer.write_record([
                    loan.id.as_str(),
                    loan.loan_type.label(),
                    loan_amount.as_str(),
                    interest_rate.as_str(),
                    loan.repayment_date.as_str(),
                    loan.borrower_name.as_str(),
                    loan.aging.as_deref().unwrap_or(""),
                    loan.status.as_str(),
                    loan.created_at.as_str(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

#[async_trait]
impl LoanStore for LoanRepository {
    async fn store_loan(&self, loan: &Loan) -> Result<()> {
        let mut loans = self.read_loans()?;
        loans.push(loan.clone());
        self.write_loans(&loans)
    }

    async fn list_loans(&self) -> Result<Vec<Loan>> {
        self.read_loans()
    }
}
