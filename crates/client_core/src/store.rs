//! Remote store seam: the `bills()` resource the controllers list and create through.

use async_trait::async_trait;
use shared::protocol::{BillRecord, NewBillPayload, StoredReceipt};
use thiserror::Error;

/// A file picked by the user, held until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            content,
        }
    }
}

/// Multipart upload of a receipt, stamped with the submitter's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptUpload {
    pub file: UploadedFile,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateRequest {
    Receipt(ReceiptUpload),
    Bill(NewBillPayload),
}

impl CreateRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Receipt(_) => "receipt",
            Self::Bill(_) => "bill",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateResponse {
    Receipt(StoredReceipt),
    Bill(BillRecord),
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend answered with a failure status. Displays the backend's
    /// message verbatim.
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("store transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode store response: {0}")]
    Decode(String),
    #[error("unexpected store response to {0} create")]
    UnexpectedResponse(&'static str),
    #[error("bill store is unavailable")]
    Unavailable,
}

impl StoreError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait BillsResource: Send + Sync {
    async fn list(&self) -> Result<Vec<BillRecord>, StoreError>;
    async fn create(&self, request: CreateRequest) -> Result<CreateResponse, StoreError>;
}

pub trait Store: Send + Sync {
    fn bills(&self) -> &dyn BillsResource;
}

pub struct MissingStore;

#[async_trait]
impl BillsResource for MissingStore {
    async fn list(&self) -> Result<Vec<BillRecord>, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn create(&self, _request: CreateRequest) -> Result<CreateResponse, StoreError> {
        Err(StoreError::Unavailable)
    }
}

impl Store for MissingStore {
    fn bills(&self) -> &dyn BillsResource {
        self
    }
}
