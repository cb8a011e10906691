//! Text views composed from the controllers' results.

use std::fmt::Write as _;

use crate::{
    bills::{BillRow, BillsController, ReceiptModal},
    store::StoreError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum BillsView {
    Error(String),
    Bills(Vec<BillRow>),
}

impl BillsView {
    /// Builds the page from a list result, newest bill first.
    pub fn from_result(result: Result<Vec<BillRow>, StoreError>) -> Self {
        match result {
            Ok(mut rows) => {
                rows.sort_by(|a, b| b.bill.date.cmp(&a.bill.date));
                Self::Bills(rows)
            }
            Err(err) => Self::Error(err.to_string()),
        }
    }

    pub fn rows(&self) -> &[BillRow] {
        match self {
            Self::Bills(rows) => rows,
            Self::Error(_) => &[],
        }
    }
}

pub async fn compose_bills_view(controller: &BillsController) -> BillsView {
    BillsView::from_result(controller.get_bills().await)
}

pub fn render_bills_view(view: &BillsView) -> String {
    let mut out = String::new();
    match view {
        BillsView::Error(message) => {
            let _ = writeln!(out, "Erreur");
            let _ = writeln!(out, "{message}");
        }
        BillsView::Bills(rows) => {
            let _ = writeln!(out, "Mes notes de frais");
            if rows.is_empty() {
                let _ = writeln!(out, "Aucune note de frais");
                return out;
            }
            let _ = writeln!(out, "Type | Nom | Date | Montant | Statut | Justificatif");
            for row in rows {
                let _ = writeln!(
                    out,
                    "{} | {} | {} | {} € | {} | {}",
                    row.bill.expense_type,
                    row.bill.name,
                    row.display_date,
                    row.bill.amount,
                    row.display_status,
                    row.bill.file_url.as_deref().unwrap_or("-"),
                );
            }
        }
    }
    out
}

pub fn render_receipt_modal(modal: &ReceiptModal) -> String {
    format!(
        "Justificatif\n{} (largeur {}px)\n",
        modal.image_url.as_deref().unwrap_or("(aucun fichier)"),
        modal.image_width
    )
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
