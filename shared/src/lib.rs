use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Transaction ID in format: "transaction::<income|expense|investment|other>::epoch_millis"
///
/// Field names follow the stored document shape (camelCase), which is why the
/// serde renames differ from the Rust field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Categorical tag; anything other than Income/Expense/Investment is
    /// carried through untouched and ignored by the balance sheet.
    #[serde(default)]
    pub transaction_type: TransactionType,
    /// Transaction amount in whole UGX. Missing on the wire means zero.
    #[serde(default)]
    pub amount: f64,
    /// Event timestamp (RFC 3339)
    #[serde(default)]
    pub date: String,
    /// Free-text label (max 256 characters at the form boundary)
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_transaction_status")]
    pub status: String,
    /// Record creation timestamp (RFC 3339)
    #[serde(default)]
    pub created_at: String,
}

fn default_transaction_status() -> String {
    "completed".to_string()
}

/// Type of transaction as recorded by the store. The set is open-ended:
/// unknown tags deserialize into `Other` rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Income,
    Expense,
    Investment,
    Other(String),
}

impl TransactionType {
    pub fn label(&self) -> &str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
            TransactionType::Investment => "Investment",
            TransactionType::Other(tag) => tag.as_str(),
        }
    }

    /// Lowercase tag used in generated IDs
    pub fn id_tag(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Investment => "investment",
            TransactionType::Other(_) => "other",
        }
    }
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Other(String::new())
    }
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Income" => TransactionType::Income,
            "Expense" => TransactionType::Expense,
            "Investment" => TransactionType::Investment,
            _ => TransactionType::Other(value),
        }
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Transaction {
    /// Generate transaction ID from type and timestamp
    pub fn generate_id(transaction_type: &TransactionType, epoch_millis: u64) -> String {
        format!("transaction::{}::{}", transaction_type.id_tag(), epoch_millis)
    }

    /// Parse transaction ID to extract components
    pub fn parse_id(id: &str) -> Result<(String, u64), TransactionIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "transaction" {
            return Err(TransactionIdError::InvalidFormat);
        }

        let tag = parts[1];
        if !matches!(tag, "income" | "expense" | "investment" | "other") {
            return Err(TransactionIdError::InvalidType);
        }

        let epoch_millis = parts[2]
            .parse::<u64>()
            .map_err(|_| TransactionIdError::InvalidTimestamp)?;

        Ok((tag.to_string(), epoch_millis))
    }

    /// Extract epoch timestamp from transaction ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, TransactionIdError> {
        Self::parse_id(&self.id).map(|(_, timestamp)| timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransactionIdError {
    #[error("Invalid transaction ID format")]
    InvalidFormat,
    #[error("Invalid transaction type tag")]
    InvalidType,
    #[error("Invalid timestamp in transaction ID")]
    InvalidTimestamp,
}

/// A loan record as captured from the loans form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    #[serde(default)]
    pub loan_type: LoanType,
    #[serde(default)]
    pub loan_amount: f64,
    /// Annual interest rate in percent
    #[serde(default)]
    pub interest_rate: f64,
    /// Agreed repayment date (RFC 3339)
    #[serde(default)]
    pub repayment_date: String,
    #[serde(default)]
    pub borrower_name: String,
    /// Optional aging bucket, free text (e.g. "30-60 days")
    #[serde(default)]
    pub aging: Option<String>,
    #[serde(default = "default_loan_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
}

fn default_loan_status() -> String {
    "active".to_string()
}

/// Loan category. Open-ended like transaction types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanType {
    Personal,
    Business,
    Education,
    Other(String),
}

impl LoanType {
    pub fn label(&self) -> &str {
        match self {
            LoanType::Personal => "Personal",
            LoanType::Business => "Business",
            LoanType::Education => "Education",
            LoanType::Other(tag) => tag.as_str(),
        }
    }
}

impl Default for LoanType {
    fn default() -> Self {
        LoanType::Other(String::new())
    }
}

impl From<String> for LoanType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Personal" => LoanType::Personal,
            "Business" => LoanType::Business,
            "Education" => LoanType::Education,
            _ => LoanType::Other(value),
        }
    }
}

impl From<LoanType> for String {
    fn from(value: LoanType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Loan {
    /// Generate a loan ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("loan::{}", epoch_millis)
    }

    /// Parse a loan ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, LoanIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "loan" {
            return Err(LoanIdError::InvalidFormat);
        }

        parts[1].parse::<u64>().map_err(|_| LoanIdError::InvalidTimestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanIdError {
    #[error("Invalid loan ID format")]
    InvalidFormat,
    #[error("Invalid timestamp in loan ID")]
    InvalidTimestamp,
}

/// Asset side of the balance sheet. Leaf fields plus a derived total that is
/// always recomputed from the leaves, never set independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assets {
    pub cash_at_hand: f64,
    pub cash_at_bank: f64,
    pub debtors: f64,
    pub investments: f64,
    pub total_assets: f64,
}

/// Liability side. The stored document uses snake_case for these leaves
/// (unlike the other two categories), so only the total is renamed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Liabilities {
    pub loans: f64,
    pub accounts_payable: f64,
    pub short_term_debt: f64,
    #[serde(rename = "totalLiabilities")]
    pub total_liabilities: f64,
}

/// Equity side of the balance sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equity {
    pub capital: f64,
    pub retained_earnings: f64,
    pub reserves: f64,
    pub total_equity: f64,
}

/// A point-in-time balance sheet, rebuilt from scratch on every transaction
/// set emission. Has no persistent identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub equity: Equity,
}

/// A financial ratio, or an explicit marker that the ratio is undefined
/// because its denominator was zero. Downstream display code must never see
/// an Infinity or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ratio {
    Value(f64),
    NotApplicable,
}

impl Ratio {
    /// Divide, mapping a zero denominator to the not-applicable sentinel
    pub fn of(numerator: f64, denominator: f64) -> Ratio {
        if denominator == 0.0 {
            Ratio::NotApplicable
        } else {
            Ratio::Value(numerator / denominator)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            Ratio::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Ratio::Value(_))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{:.2}", v),
            Ratio::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// Ratios derived from a computed balance sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub current_ratio: Ratio,
    pub quick_ratio: Ratio,
    pub debt_to_equity: Ratio,
    pub working_capital: f64,
}

/// Balance sheet plus derived metrics, the unit published by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub sheet: BalanceSheet,
    pub metrics: FinancialMetrics,
    /// When this report was computed (RFC 3339)
    pub generated_at: String,
}

/// Health of the transaction feed as seen by snapshot consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeedStatus {
    /// Reports reflect the latest emission from the store
    Live,
    /// The feed reported an error; the last good report is retained
    Stale,
}

/// What snapshot subscribers receive. `revision` increases with every
/// published recomputation, so consumers can detect missed updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceUpdate {
    pub revision: u64,
    pub status: FeedStatus,
    pub report: BalanceReport,
}

/// Request for recording a new transaction. Produced by the form layer only
/// after validation, so the fields here are already well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordTransactionRequest {
    pub transaction_type: TransactionType,
    pub amount: f64,
    /// Optional date override (RFC 3339) - uses current time if not provided
    pub date: Option<String>,
    pub description: String,
}

/// Response after recording a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordTransactionResponse {
    pub transaction: Transaction,
    pub success_message: String,
}

/// Request for listing transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionListRequest {
    /// Case-insensitive description filter
    pub search: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
}

/// Request for adding a loan record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddLoanRequest {
    pub loan_type: LoanType,
    pub loan_amount: f64,
    pub interest_rate: f64,
    /// Agreed repayment date (RFC 3339)
    pub repayment_date: String,
    pub borrower_name: String,
    pub aging: Option<String>,
}

/// Response after adding a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddLoanResponse {
    pub loan: Loan,
    pub success_message: String,
}

/// Request for listing loans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanListRequest {
    /// Case-insensitive borrower name filter
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanListResponse {
    pub loans: Vec<Loan>,
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub recent_transactions: Vec<Transaction>,
}

/// A transaction formatted for display in the full report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTransaction {
    pub id: String,
    pub transaction_type: String,
    pub formatted_amount: String,
    pub formatted_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullReportResponse {
    pub entries: Vec<FormattedTransaction>,
}

/// Response carrying a rendered balance sheet export. Writing the file and
/// sharing it belong to the export sink, not to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBalanceSheetResponse {
    pub csv_content: String,
    pub filename: String,
    pub row_count: usize,
}

/// State for the record-transaction form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormState {
    pub transaction_type_input: String,
    pub amount_input: String,
    pub description: String,
    pub date_input: Option<String>,
    pub is_submitting: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

/// Validation result for the record-transaction form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormValidation {
    pub is_valid: bool,
    pub errors: Vec<TransactionFormError>,
    pub cleaned_amount: Option<f64>,
    pub suggestions: Vec<String>,
}

/// Specific validation errors for the transaction form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransactionFormError {
    MissingTransactionType,
    EmptyDescription,
    DescriptionTooLong(usize),
    EmptyAmount,
    InvalidAmountFormat(String),
    AmountTooLarge(f64),
}

/// Validation result for the add-loan form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanFormValidation {
    pub is_valid: bool,
    pub errors: Vec<LoanFormError>,
    pub cleaned_amount: Option<f64>,
    pub cleaned_interest_rate: Option<f64>,
}

/// Specific validation errors for the loan form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanFormError {
    MissingLoanType,
    EmptyBorrowerName,
    EmptyRepaymentDate,
    EmptyAmount,
    InvalidAmountFormat(String),
    InvalidInterestRate(String),
}

/// Configuration for forms and display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub currency_symbol: String,
    pub max_description_length: usize,
    pub max_amount: f64,
    pub recent_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "UGX".to_string(),
            max_description_length: 256,
            max_amount: 1_000_000_000.0,
            recent_limit: 5,
        }
    }
}

/// Format an amount with thousands separators, rounded to whole units.
/// UGX has no minor unit, so `1234567.0` becomes `"1,234,567"`.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = (rounded.abs() as i64).to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", out)
    } else {
        out
    }
}
