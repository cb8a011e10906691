//! REST implementation of [`Store`] backed by reqwest.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use shared::{
    error::ApiError,
    protocol::{BillRecord, StoredReceipt},
};
use tracing::{debug, error};
use url::Url;

use crate::store::{BillsResource, CreateRequest, CreateResponse, ReceiptUpload, Store, StoreError};

const BILLS_PATH: &str = "bills";

pub struct HttpStore {
    http: Client,
    base_url: Url,
    jwt: Option<String>,
}

impl HttpStore {
    pub fn new(base_url: &str, jwt: Option<String>) -> Result<Self, url::ParseError> {
        let mut raw = base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(&raw)?,
            jwt,
        })
    }

    fn bills_url(&self) -> Result<Url, StoreError> {
        self.base_url
            .join(BILLS_PATH)
            .map_err(|err| StoreError::Decode(format!("invalid bills url: {err}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.jwt {
            Some(jwt) => request.bearer_auth(jwt),
            None => request,
        }
    }

    async fn upload_receipt(&self, upload: ReceiptUpload) -> Result<StoredReceipt, StoreError> {
        let ReceiptUpload { file, email } = upload;
        let mut part = Part::bytes(file.content).file_name(file.name.clone());
        if let Some(mime_type) = &file.mime_type {
            part = part.mime_str(mime_type)?;
        }
        let form = Form::new().part("file", part).text("email", email);

        debug!(file_name = %file.name, "store: uploading receipt");
        let response = self
            .authorize(self.http.post(self.bills_url()?))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }
}

#[async_trait]
impl BillsResource for HttpStore {
    async fn list(&self) -> Result<Vec<BillRecord>, StoreError> {
        debug!(url = %self.base_url, "store: listing bills");
        let response = self
            .authorize(self.http.get(self.bills_url()?))
            .send()
            .await?;
        read_json(response).await
    }

    async fn create(&self, request: CreateRequest) -> Result<CreateResponse, StoreError> {
        match request {
            CreateRequest::Receipt(upload) => {
                self.upload_receipt(upload).await.map(CreateResponse::Receipt)
            }
            CreateRequest::Bill(payload) => {
                debug!(email = %payload.email, "store: creating bill");
                let response = self
                    .authorize(self.http.post(self.bills_url()?))
                    .json(&payload)
                    .send()
                    .await?;
                read_json(response).await.map(CreateResponse::Bill)
            }
        }
    }
}

impl Store for HttpStore {
    fn bills(&self) -> &dyn BillsResource {
        self
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .unwrap_or_else(|_| ApiError::for_status(status.as_u16()))
            .message;
        error!(status = status.as_u16(), %message, "store: request rejected");
        return Err(StoreError::remote(status.as_u16(), message));
    }

    response
        .json::<T>()
        .await
        .map_err(|err| StoreError::Decode(err.to_string()))
}

#[cfg(test)]
#[path = "tests/http_store_tests.rs"]
mod tests;
