use std::sync::Arc;

use super::*;
use crate::{
    bills::IconEye,
    navigation::Router,
    test_support::{fixture_bills, FakeStore},
};

fn bills_controller(store: Arc<FakeStore>) -> BillsController {
    BillsController::new(store, Arc::new(Router::default()))
}

#[tokio::test]
async fn bills_are_rendered_newest_first() {
    let view = compose_bills_view(&bills_controller(FakeStore::with_bills(fixture_bills()))).await;

    let dates: Vec<&str> = view.rows().iter().map(|row| row.bill.date.as_str()).collect();
    let mut anti_chrono = dates.clone();
    anti_chrono.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, anti_chrono);
    assert_eq!(dates, vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]);

    let rendered = render_bills_view(&view);
    let first = rendered.find("4 Avr. 04").expect("newest row");
    let last = rendered.find("1 Jan. 01").expect("oldest row");
    assert!(first < last);
}

#[tokio::test]
async fn list_failure_404_renders_error_page() {
    let view = compose_bills_view(&bills_controller(FakeStore::failing_list("Erreur 404"))).await;

    assert_eq!(view, BillsView::Error("Erreur 404".into()));
    assert!(render_bills_view(&view).contains("Erreur 404"));
}

#[tokio::test]
async fn list_failure_500_renders_error_page() {
    let view = compose_bills_view(&bills_controller(FakeStore::failing_list("Erreur 500"))).await;

    assert!(view.rows().is_empty());
    assert!(render_bills_view(&view).contains("Erreur 500"));
}

#[tokio::test]
async fn empty_list_renders_placeholder() {
    let view = compose_bills_view(&bills_controller(FakeStore::with_bills(Vec::new()))).await;
    assert!(render_bills_view(&view).contains("Aucune note de frais"));
}

#[test]
fn receipt_modal_renders_url_and_width() {
    let mut controller = bills_controller(FakeStore::with_bills(Vec::new()));
    let modal = controller.handle_click_icon_eye(&IconEye::new(Some("https://files.test/a.jpg".into())));
    assert_eq!(
        render_receipt_modal(modal),
        "Justificatif\nhttps://files.test/a.jpg (largeur 500px)\n"
    );

    let modal = controller.handle_click_icon_eye(&IconEye::default());
    assert!(render_receipt_modal(modal).contains("(aucun fichier)"));
}
