//! Store double and fixtures shared by the controller tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::{
    domain::{BillId, BillStatus, ExpenseType, UserType},
    protocol::{BillRecord, Session, StoredReceipt},
};

use crate::{
    session::{MemoryKeyValueStore, SessionAccessor},
    store::{BillsResource, CreateRequest, CreateResponse, Store, StoreError},
};

pub(crate) struct FakeStore {
    bills: Vec<BillRecord>,
    list_failure: Option<String>,
    create_failure: Option<String>,
    creates: Mutex<Vec<CreateRequest>>,
}

impl FakeStore {
    pub(crate) fn with_bills(bills: Vec<BillRecord>) -> Arc<Self> {
        Arc::new(Self {
            bills,
            list_failure: None,
            create_failure: None,
            creates: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing_list(message: &str) -> Arc<Self> {
        Arc::new(Self {
            bills: Vec::new(),
            list_failure: Some(message.to_string()),
            create_failure: None,
            creates: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing_create(message: &str) -> Arc<Self> {
        Arc::new(Self {
            bills: Vec::new(),
            list_failure: None,
            create_failure: Some(message.to_string()),
            creates: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn creates(&self) -> Vec<CreateRequest> {
        self.creates.lock().expect("creates lock").clone()
    }
}

#[async_trait]
impl BillsResource for FakeStore {
    async fn list(&self) -> Result<Vec<BillRecord>, StoreError> {
        match &self.list_failure {
            Some(message) => Err(StoreError::remote(500, message.clone())),
            None => Ok(self.bills.clone()),
        }
    }

    async fn create(&self, request: CreateRequest) -> Result<CreateResponse, StoreError> {
        self.creates
            .lock()
            .expect("creates lock")
            .push(request.clone());
        if let Some(message) = &self.create_failure {
            return Err(StoreError::remote(500, message.clone()));
        }
        Ok(match request {
            CreateRequest::Receipt(_) => CreateResponse::Receipt(StoredReceipt {
                file_url: "https://localhost:3456/images/test.jpg".into(),
                key: "1234".into(),
            }),
            CreateRequest::Bill(payload) => CreateResponse::Bill(BillRecord {
                id: BillId("1234".into()),
                email: payload.email,
                expense_type: payload.expense_type.label().into(),
                name: payload.name,
                amount: payload.amount,
                date: payload.date,
                vat: payload.vat,
                pct: payload.pct,
                commentary: payload.commentary,
                file_url: Some(payload.file_url),
                file_name: Some(payload.file_name),
                status: payload.status,
                comment_admin: None,
            }),
        })
    }
}

impl Store for FakeStore {
    fn bills(&self) -> &dyn BillsResource {
        self
    }
}

pub(crate) fn employee_session(email: &str) -> SessionAccessor {
    let accessor = SessionAccessor::new(Arc::new(MemoryKeyValueStore::new()));
    accessor
        .store_user(&Session {
            user_type: UserType::Employee,
            email: email.into(),
        })
        .expect("store user");
    accessor
}

fn fixture_bill(id: &str, date: &str, status: BillStatus, file_url: Option<&str>) -> BillRecord {
    BillRecord {
        id: BillId(id.into()),
        email: "a@a".into(),
        expense_type: ExpenseType::HotelAndLodging.label().into(),
        name: format!("bill {id}"),
        amount: 400.0,
        date: date.into(),
        vat: "80".into(),
        pct: 20,
        commentary: "séminaire billed".into(),
        file_url: file_url.map(str::to_string),
        file_name: file_url.map(|_| format!("{id}.jpg")),
        status,
        comment_admin: None,
    }
}

/// Four bills deliberately out of date order.
pub(crate) fn fixture_bills() -> Vec<BillRecord> {
    vec![
        fixture_bill(
            "qcCK3SzECmaZAGRrHjaC",
            "2003-03-03",
            BillStatus::Refused,
            Some("https://firebasestorage.test/justificatifs/qc.jpg"),
        ),
        fixture_bill(
            "47qAXb6fIm2zOKkLzMro",
            "2004-04-04",
            BillStatus::Pending,
            Some("https://firebasestorage.test/justificatifs/47.jpg"),
        ),
        fixture_bill("UIUZtnPQvnbFnB0ozvJh", "2001-01-01", BillStatus::Accepted, None),
        fixture_bill(
            "BeKy5Mo4jkmdfPGYpTxZ",
            "2002-02-02",
            BillStatus::Refused,
            Some("https://firebasestorage.test/justificatifs/be.jpg"),
        ),
    ]
}
