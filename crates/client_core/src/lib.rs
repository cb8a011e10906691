//! Controllers for the employee side of the bills app: the bills list and
//! the bill creation form, wired to a remote store, a persisted session and
//! an injected navigator.

pub mod bills;
pub mod config;
pub mod format;
pub mod http_store;
pub mod navigation;
pub mod new_bill;
pub mod session;
pub mod store;
pub mod view;

pub use bills::{BillRow, BillsController, IconEye, ReceiptModal};
pub use config::{load_settings, ClientSettings};
pub use http_store::HttpStore;
pub use navigation::{NavigationTarget, Navigator, Router};
pub use new_bill::{
    NewBillController, NewBillError, NewBillForm, NewBillPhase, NumericParsing, StagedReceipt,
};
pub use session::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SessionAccessor, SessionError,
};
pub use store::{
    BillsResource, CreateRequest, CreateResponse, MissingStore, ReceiptUpload, Store, StoreError,
    UploadedFile,
};
pub use view::{compose_bills_view, render_bills_view, render_receipt_modal, BillsView};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
