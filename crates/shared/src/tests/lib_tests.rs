use crate::{
    domain::{BillId, BillStatus, ExpenseType, NavigationTarget, UserType},
    error::ApiError,
    protocol::{BillRecord, NewBillPayload, Session},
};

#[test]
fn bill_record_reads_backend_json() {
    let raw = r#"{
        "id": "47qAXb6fIm2zOKkLzMro",
        "vat": "80",
        "fileUrl": "https://example.test/receipt.jpg",
        "status": "pending",
        "type": "Hôtel et logement",
        "commentary": "séminaire billed",
        "name": "encore",
        "fileName": "preview-facture-free-201801-pdf-1.jpg",
        "date": "2004-04-04",
        "amount": 400,
        "commentAdmin": "ok",
        "email": "a@a",
        "pct": 20
    }"#;

    let bill: BillRecord = serde_json::from_str(raw).expect("bill");
    assert_eq!(bill.id, BillId("47qAXb6fIm2zOKkLzMro".into()));
    assert_eq!(bill.expense_type, "Hôtel et logement");
    assert_eq!(bill.expense_kind(), Some(ExpenseType::HotelAndLodging));
    assert_eq!(bill.status, BillStatus::Pending);
    assert_eq!(bill.amount, 400.0);
    assert_eq!(bill.pct, 20);
    assert_eq!(bill.comment_admin.as_deref(), Some("ok"));
    assert_eq!(bill.file_url.as_deref(), Some("https://example.test/receipt.jpg"));
}

#[test]
fn bill_record_tolerates_missing_optional_fields() {
    let bill: BillRecord =
        serde_json::from_str(r#"{"id":"x","date":"2001-01-01","fileUrl":null}"#).expect("bill");
    assert_eq!(bill.file_url, None);
    assert_eq!(bill.file_name, None);
    assert_eq!(bill.status, BillStatus::Pending);
}

#[test]
fn bill_listing_keeps_records_with_nulls_and_unknown_types() {
    let raw = r#"[
        {"id":"ok","type":"Transports","name":"vol","amount":120,"pct":20,"date":"2004-04-04","vat":"20","status":"accepted"},
        {"id":"nulls","type":"Transports","name":"taxi","amount":null,"pct":null,"date":null,"vat":null,"status":null},
        {"id":"taxi","type":"Taxi","name":"course","amount":18.5,"pct":10,"date":"2003-03-03","vat":"3"}
    ]"#;

    let bills: Vec<BillRecord> = serde_json::from_str(raw).expect("bills");
    let ids: Vec<&str> = bills.iter().map(|bill| bill.id.0.as_str()).collect();
    assert_eq!(ids, ["ok", "nulls", "taxi"]);

    assert_eq!(bills[0].status, BillStatus::Accepted);
    assert_eq!(bills[1].amount, 0.0);
    assert_eq!(bills[1].pct, 0);
    assert!(bills[1].date.is_empty());
    assert_eq!(bills[1].status, BillStatus::Pending);
    assert_eq!(bills[2].expense_type, "Taxi");
    assert_eq!(bills[2].expense_kind(), None);
    assert_eq!(bills[2].amount, 18.5);
}

#[test]
fn new_bill_payload_uses_wire_field_names() {
    let payload = NewBillPayload {
        email: "a@a".into(),
        expense_type: ExpenseType::Transports,
        name: "Vol Paris-Brest".into(),
        amount: 42.0,
        date: "2024-02-10".into(),
        vat: "10".into(),
        pct: 15,
        commentary: "test bill".into(),
        file_url: "https://example.test/image.jpg".into(),
        file_name: "image.jpg".into(),
        status: BillStatus::Pending,
    };

    let value = serde_json::to_value(&payload).expect("json");
    assert_eq!(value["type"], "Transports");
    assert_eq!(value["fileName"], "image.jpg");
    assert_eq!(value["fileUrl"], "https://example.test/image.jpg");
    assert_eq!(value["status"], "pending");
}

#[test]
fn session_without_email_still_parses() {
    let session: Session = serde_json::from_str(r#"{"type":"Employee"}"#).expect("session");
    assert_eq!(session.user_type, UserType::Employee);
    assert!(session.email.is_empty());
}

#[test]
fn expense_type_parses_labels_case_insensitively() {
    assert_eq!(
        "restaurants et bars".parse::<ExpenseType>(),
        Ok(ExpenseType::RestaurantsAndBars)
    );
    assert!("Taxi".parse::<ExpenseType>().is_err());
    for kind in ExpenseType::ALL {
        assert_eq!(kind.label().parse::<ExpenseType>(), Ok(kind));
    }
}

#[test]
fn navigation_paths_resolve_back_to_targets() {
    assert_eq!(NavigationTarget::Bills.path(), "#employee/bills");
    assert_eq!(NavigationTarget::NewBill.path(), "#employee/bill/new");
    assert_eq!(
        NavigationTarget::from_path("#admin/dashboard"),
        Some(NavigationTarget::Dashboard)
    );
    assert_eq!(NavigationTarget::from_path("/"), Some(NavigationTarget::Login));
    assert_eq!(NavigationTarget::from_path("#nowhere"), None);
}

#[test]
fn api_error_for_status_matches_backend_wording() {
    assert_eq!(ApiError::for_status(404).to_string(), "Erreur 404");
}
