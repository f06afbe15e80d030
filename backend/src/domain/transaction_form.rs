//! Form-boundary validation for the sente tracker.
//!
//! Raw screen input (type selection, amount text, description) is validated
//! and parsed here into typed, already-valid requests. The aggregator and the
//! services never see unparsed strings, so there is no implicit numeric
//! coercion anywhere downstream.

use shared::{
    group_thousands, LoanFormError, LoanFormValidation, RecordTransactionRequest, TrackerConfig,
    TransactionFormError, TransactionFormState, TransactionFormValidation, TransactionType,
};

/// Service handling transaction and loan form validation and formatting
#[derive(Clone)]
pub struct TransactionFormService {
    config: TrackerConfig,
}

impl TransactionFormService {
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
        }
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Create a fresh form state
    pub fn create_form_state() -> TransactionFormState {
        TransactionFormState::default()
    }

    /// Validate the record-transaction form input
    pub fn validate_transaction_form(
        &self,
        transaction_type_input: &str,
        amount_input: &str,
        description: &str,
    ) -> TransactionFormValidation {
        let mut errors = Vec::new();
        let mut suggestions = Vec::new();

        if transaction_type_input.trim().is_empty() {
            errors.push(TransactionFormError::MissingTransactionType);
            suggestions.push("Select Income, Expense or Investment".to_string());
        }

        let description_trimmed = description.trim();
        if description_trimmed.is_empty() {
            errors.push(TransactionFormError::EmptyDescription);
            suggestions.push("Describe the transaction, e.g. Member savings deposit".to_string());
        } else if description_trimmed.len() > self.config.max_description_length {
            errors.push(TransactionFormError::DescriptionTooLong(
                description_trimmed.len(),
            ));
        }

        let cleaned_amount = if amount_input.trim().is_empty() {
            errors.push(TransactionFormError::EmptyAmount);
            suggestions.push("Enter an amount like 50000".to_string());
            None
        } else {
            match self.clean_and_parse_amount(amount_input) {
                Ok(amount) => {
                    if amount.abs() > self.config.max_amount {
                        errors.push(TransactionFormError::AmountTooLarge(self.config.max_amount));
                        suggestions.push(format!(
                            "Maximum amount is {}",
                            self.format_amount(self.config.max_amount)
                        ));
                        None
                    } else {
                        Some(amount)
                    }
                }
                Err(parse_error) => {
                    errors.push(TransactionFormError::InvalidAmountFormat(parse_error));
                    suggestions.push("Enter a valid number like 50000 or 50,000".to_string());
                    None
                }
            }
        };

        TransactionFormValidation {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
            suggestions,
        }
    }

    /// Validate the add-loan form input
    pub fn validate_loan_form(
        &self,
        loan_type_input: &str,
        borrower_name: &str,
        amount_input: &str,
        interest_rate_input: &str,
        repayment_date: &str,
    ) -> LoanFormValidation {
        let mut errors = Vec::new();

        if loan_type_input.trim().is_empty() {
            errors.push(LoanFormError::MissingLoanType);
        }
        if borrower_name.trim().is_empty() {
            errors.push(LoanFormError::EmptyBorrowerName);
        }
        if repayment_date.trim().is_empty() {
            errors.push(LoanFormError::EmptyRepaymentDate);
        }

        let cleaned_amount = if amount_input.trim().is_empty() {
            errors.push(LoanFormError::EmptyAmount);
            None
        } else {
            match self.clean_and_parse_amount(amount_input) {
                Ok(amount) => Some(amount),
                Err(parse_error) => {
                    errors.push(LoanFormError::InvalidAmountFormat(parse_error));
                    None
                }
            }
        };

        let cleaned_interest_rate = match interest_rate_input.trim().trim_end_matches('%').parse::<f64>()
        {
            Ok(rate) => Some(rate),
            Err(e) => {
                errors.push(LoanFormError::InvalidInterestRate(format!(
                    "Invalid number format: {}",
                    e
                )));
                None
            }
        };

        LoanFormValidation {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
            cleaned_interest_rate,
        }
    }

    /// Clean and parse amount input, stripping the currency symbol, commas
    /// and spaces
    pub fn clean_and_parse_amount(&self, amount_input: &str) -> Result<f64, String> {
        let cleaned = amount_input
            .trim()
            .replace(&self.config.currency_symbol, "")
            .replace(',', "")
            .replace(' ', "");

        if cleaned.is_empty() {
            return Err("Empty amount after cleaning".to_string());
        }

        cleaned
            .parse::<f64>()
            .map_err(|e| format!("Invalid number format: {}", e))
    }

    /// Build a typed record request from validated form values
    pub fn to_record_request(
        &self,
        transaction_type_input: &str,
        amount: f64,
        description: &str,
        date: Option<String>,
    ) -> RecordTransactionRequest {
        RecordTransactionRequest {
            transaction_type: TransactionType::from(transaction_type_input.to_string()),
            amount,
            date,
            description: description.trim().to_string(),
        }
    }

    /// Format an amount for display, e.g. `UGX 1,500,000`
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{} {}", self.config.currency_symbol, group_thousands(amount))
    }

    /// User-facing message for a validation error
    pub fn get_error_message(&self, error: &TransactionFormError) -> String {
        match error {
            TransactionFormError::MissingTransactionType => {
                "Please select a transaction type".to_string()
            }
            TransactionFormError::EmptyDescription => "Please enter a description".to_string(),
            TransactionFormError::DescriptionTooLong(len) => format!(
                "Description is too long ({} characters). Maximum is {}.",
                len, self.config.max_description_length
            ),
            TransactionFormError::EmptyAmount => "Please enter an amount".to_string(),
            TransactionFormError::InvalidAmountFormat(msg) => {
                format!("Amount must be a number: {}", msg)
            }
            TransactionFormError::AmountTooLarge(max) => {
                format!("Amount is too large. Maximum is {}", self.format_amount(*max))
            }
        }
    }

    /// The first error message, for single-error displays
    pub fn get_first_error_message(&self, errors: &[TransactionFormError]) -> Option<String> {
        errors.first().map(|e| self.get_error_message(e))
    }

    /// Set form state to submitting
    pub fn set_form_submitting(&self, mut state: TransactionFormState) -> TransactionFormState {
        state.is_submitting = true;
        state.error_message = None;
        state
    }

    /// Set form state with an error
    pub fn set_form_error(
        &self,
        mut state: TransactionFormState,
        error_message: String,
    ) -> TransactionFormState {
        state.is_submitting = false;
        state.error_message = Some(error_message);
        state
    }

    /// Clear form state after a successful submission
    pub fn clear_form_after_success(
        &self,
        mut state: TransactionFormState,
        success_message: String,
    ) -> TransactionFormState {
        state.transaction_type_input = String::new();
        state.amount_input = String::new();
        state.description = String::new();
        state.date_input = None;
        state.is_submitting = false;
        state.error_message = None;
        state.success_message = Some(success_message);
        state
    }

    pub fn get_config(&self) -> &TrackerConfig {
        &self.config
    }
}

impl Default for TransactionFormService {
    fn default() -> Self {
        Self::new()
    }
}
