use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{BillId, BillStatus, ExpenseType, UserType};

/// A bill as the backend stores and lists it.
///
/// Records written by older clients may carry `null` where a number or text
/// is expected, or a `type` label outside [`ExpenseType`]. Those read as the
/// field's default (the raw label for `type`) so one bad record never hides
/// the rest of a listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: BillId,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    /// Expense label as stored, normally one of [`ExpenseType::label`].
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub expense_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vat: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pct: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub commentary: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: BillStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl BillRecord {
    /// The known expense category, if the stored label is one.
    pub fn expense_kind(&self) -> Option<ExpenseType> {
        self.expense_type.parse().ok()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body sent when creating a bill record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBillPayload {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: String,
    pub pct: i64,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: BillStatus,
}

/// Response to a receipt upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReceipt {
    pub file_url: String,
    pub key: String,
}

/// The signed-in user as persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
}
