//! Controller behind the employee's bills list.

use std::sync::Arc;

use shared::protocol::BillRecord;
use tracing::{debug, error, warn};

use crate::{
    format::{format_date, format_status},
    navigation::{NavigationTarget, Navigator},
    store::{Store, StoreError},
};

pub const DEFAULT_PREVIEW_WIDTH: u32 = 1000;

/// A bill prepared for display. `bill` is left untouched so the view can
/// still order rows by the ISO date.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub bill: BillRecord,
    pub display_date: String,
    pub display_status: &'static str,
}

impl BillRow {
    fn from_record(bill: BillRecord) -> Self {
        let display_date = match format_date(&bill.date) {
            Ok(formatted) => formatted,
            Err(err) => {
                warn!(bill_id = %bill.id, date = %bill.date, %err, "bills: unparsable date kept as-is");
                bill.date.clone()
            }
        };
        Self {
            display_status: format_status(bill.status),
            display_date,
            bill,
        }
    }
}

/// The eye icon next to a bill, carrying the receipt URL it previews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconEye {
    bill_url: Option<String>,
}

impl IconEye {
    pub fn new(bill_url: Option<String>) -> Self {
        Self { bill_url }
    }

    pub fn for_bill(bill: &BillRecord) -> Self {
        Self::new(bill.file_url.clone())
    }

    pub fn bill_url(&self) -> Option<&str> {
        self.bill_url.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptModal {
    pub image_url: Option<String>,
    pub image_width: u32,
}

pub struct BillsController {
    store: Arc<dyn Store>,
    navigator: Arc<dyn Navigator>,
    preview_width: u32,
    modal: Option<ReceiptModal>,
}

impl BillsController {
    pub fn new(store: Arc<dyn Store>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            preview_width: DEFAULT_PREVIEW_WIDTH,
            modal: None,
        }
    }

    pub fn with_preview_width(mut self, preview_width: u32) -> Self {
        self.preview_width = preview_width;
        self
    }

    /// Lists the bills in store order with display formatting applied.
    pub async fn get_bills(&self) -> Result<Vec<BillRow>, StoreError> {
        let bills = self.store.bills().list().await.map_err(|err| {
            error!(%err, "bills: list failed");
            err
        })?;
        debug!(count = bills.len(), "bills: listed");
        Ok(bills.into_iter().map(BillRow::from_record).collect())
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.on_navigate(NavigationTarget::NewBill);
    }

    /// Opens the receipt preview for `icon`, replacing any preview already open.
    pub fn handle_click_icon_eye(&mut self, icon: &IconEye) -> &ReceiptModal {
        let modal = ReceiptModal {
            image_url: icon.bill_url().map(str::to_string),
            image_width: self.preview_width / 2,
        };
        debug!(url = ?modal.image_url, width = modal.image_width, "bills: opening receipt preview");
        self.modal.insert(modal)
    }

    pub fn modal(&self) -> Option<&ReceiptModal> {
        self.modal.as_ref()
    }
}

#[cfg(test)]
#[path = "tests/bills_tests.rs"]
mod tests;
