//! Controller behind the bill creation form.
//!
//! A receipt is uploaded as soon as it is selected. The bill record itself is
//! created on submit and references the uploaded file's URL.

use std::{str::FromStr, sync::Arc};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{BillStatus, ExpenseType},
    protocol::{BillRecord, NewBillPayload},
};
use thiserror::Error;
use tracing::{error, info};

use crate::{
    navigation::{NavigationTarget, Navigator},
    session::{SessionAccessor, SessionError},
    store::{CreateRequest, CreateResponse, ReceiptUpload, Store, StoreError, UploadedFile},
};

pub const ALLOWED_RECEIPT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
/// Percentage used when the form's pct field yields nothing usable.
pub const DEFAULT_PCT: i64 = 20;

pub fn has_allowed_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_RECEIPT_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}

/// How the form's numeric fields are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericParsing {
    /// Takes the leading number of the field and falls back silently.
    #[default]
    Lenient,
    /// Rejects anything that is not entirely a number.
    Strict,
}

impl FromStr for NumericParsing {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown numeric parsing mode '{other}'")),
        }
    }
}

#[derive(Debug, Error)]
pub enum NewBillError {
    #[error("Invalid file extension")]
    InvalidFileExtension { file_name: String },
    #[error("no receipt staged; select a jpg, jpeg or png file first")]
    MissingReceipt,
    #[error("malformed {field}: '{value}'")]
    MalformedInput { field: &'static str, value: String },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Values typed into the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBillForm {
    expense_type: ExpenseType,
    name: String,
    date: String,
    amount: String,
    vat: String,
    pct: String,
    commentary: String,
}

impl NewBillForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expense_type(mut self, expense_type: ExpenseType) -> Self {
        self.expense_type = expense_type;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn with_vat(mut self, vat: impl Into<String>) -> Self {
        self.vat = vat.into();
        self
    }

    pub fn with_pct(mut self, pct: impl Into<String>) -> Self {
        self.pct = pct.into();
        self
    }

    pub fn with_commentary(mut self, commentary: impl Into<String>) -> Self {
        self.commentary = commentary.into();
        self
    }

    pub fn expense_type(&self) -> ExpenseType {
        self.expense_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn vat(&self) -> &str {
        &self.vat
    }

    pub fn pct(&self) -> &str {
        &self.pct
    }

    pub fn commentary(&self) -> &str {
        &self.commentary
    }

    fn parse_amount(&self, mode: NumericParsing) -> Result<f64, NewBillError> {
        match mode {
            NumericParsing::Lenient => Ok(leading_number(&self.amount, true).unwrap_or(0.0)),
            NumericParsing::Strict => strict_number("amount", &self.amount),
        }
    }

    fn parse_pct(&self, mode: NumericParsing) -> Result<i64, NewBillError> {
        match mode {
            // Zero falls back too: the form has always treated it as "unset".
            NumericParsing::Lenient => Ok(leading_number(&self.pct, false)
                .map(|pct| pct as i64)
                .filter(|pct| *pct != 0)
                .unwrap_or(DEFAULT_PCT)),
            NumericParsing::Strict => strict_number("pct", &self.pct).map(|pct| pct.trunc() as i64),
        }
    }

    fn check_date(&self, mode: NumericParsing) -> Result<(), NewBillError> {
        if mode == NumericParsing::Strict
            && NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err()
        {
            return Err(NewBillError::MalformedInput {
                field: "date",
                value: self.date.clone(),
            });
        }
        Ok(())
    }
}

/// Parses the longest base-10 number at the start of `raw`.
fn leading_number(raw: &str, allow_fraction: bool) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - digits_start;
    if allow_fraction && bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        if fraction_end > fraction_start {
            digits += fraction_end - fraction_start;
            end = fraction_end;
        }
    }
    if digits == 0 {
        return None;
    }
    text.get(..end)?.parse().ok()
}

fn strict_number(field: &'static str, raw: &str) -> Result<f64, NewBillError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| NewBillError::MalformedInput {
            field,
            value: raw.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedReceipt {
    pub file_name: String,
    pub file_url: String,
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewBillPhase {
    Idle,
    Rejected,
    FileStaged,
    Submitting,
    Navigated,
}

pub struct NewBillController {
    store: Arc<dyn Store>,
    navigator: Arc<dyn Navigator>,
    session: SessionAccessor,
    numeric_parsing: NumericParsing,
    staged: Option<StagedReceipt>,
    phase: NewBillPhase,
}

impl NewBillController {
    pub fn new(
        store: Arc<dyn Store>,
        navigator: Arc<dyn Navigator>,
        session: SessionAccessor,
    ) -> Self {
        Self {
            store,
            navigator,
            session,
            numeric_parsing: NumericParsing::default(),
            staged: None,
            phase: NewBillPhase::Idle,
        }
    }

    pub fn with_numeric_parsing(mut self, numeric_parsing: NumericParsing) -> Self {
        self.numeric_parsing = numeric_parsing;
        self
    }

    pub fn phase(&self) -> NewBillPhase {
        self.phase
    }

    pub fn staged_receipt(&self) -> Option<&StagedReceipt> {
        self.staged.as_ref()
    }

    /// Validates the selected receipt and uploads it right away.
    ///
    /// On an invalid extension nothing is uploaded and the caller is expected
    /// to clear its file input.
    pub async fn handle_change_file(
        &mut self,
        file: UploadedFile,
    ) -> Result<&StagedReceipt, NewBillError> {
        self.staged = None;
        if !has_allowed_extension(&file.name) {
            error!(file_name = %file.name, "Invalid file extension");
            self.phase = NewBillPhase::Rejected;
            return Err(NewBillError::InvalidFileExtension {
                file_name: file.name,
            });
        }
        self.phase = NewBillPhase::Idle;

        let email = self.session.require_email()?;
        let file_name = file.name.clone();
        let request = CreateRequest::Receipt(ReceiptUpload { file, email });
        let kind = request.kind();
        let response = self.store.bills().create(request).await.map_err(|err| {
            error!(%file_name, %err, "new bill: receipt upload failed");
            err
        })?;
        let CreateResponse::Receipt(stored) = response else {
            error!(kind, "new bill: store answered with the wrong record");
            return Err(StoreError::UnexpectedResponse(kind).into());
        };

        info!(%file_name, key = %stored.key, "new bill: receipt staged");
        self.phase = NewBillPhase::FileStaged;
        Ok(&*self.staged.insert(StagedReceipt {
            file_name,
            file_url: stored.file_url,
            key: stored.key,
        }))
    }

    /// Creates the bill from `form` and the staged receipt, then returns to
    /// the bills list.
    pub async fn handle_submit(&mut self, form: &NewBillForm) -> Result<BillRecord, NewBillError> {
        let email = self.session.require_email()?;
        let staged = self.staged.clone().ok_or(NewBillError::MissingReceipt)?;
        let mode = self.numeric_parsing;
        form.check_date(mode)?;
        let payload = NewBillPayload {
            email,
            expense_type: form.expense_type(),
            name: form.name().to_string(),
            amount: form.parse_amount(mode)?,
            date: form.date().to_string(),
            vat: form.vat().to_string(),
            pct: form.parse_pct(mode)?,
            commentary: form.commentary().to_string(),
            file_url: staged.file_url,
            file_name: staged.file_name,
            status: BillStatus::Pending,
        };

        self.phase = NewBillPhase::Submitting;
        let request = CreateRequest::Bill(payload);
        let kind = request.kind();
        let response = match self.store.bills().create(request).await {
            Ok(response) => response,
            Err(err) => {
                error!(%err, "new bill: create failed");
                self.phase = NewBillPhase::FileStaged;
                return Err(err.into());
            }
        };
        let CreateResponse::Bill(bill) = response else {
            error!(kind, "new bill: store answered with the wrong record");
            self.phase = NewBillPhase::FileStaged;
            return Err(StoreError::UnexpectedResponse(kind).into());
        };

        info!(bill_id = %bill.id, "new bill: created");
        self.staged = None;
        self.phase = NewBillPhase::Navigated;
        self.navigator.on_navigate(NavigationTarget::Bills);
        Ok(bill)
    }
}

#[cfg(test)]
#[path = "tests/new_bill_tests.rs"]
mod tests;
