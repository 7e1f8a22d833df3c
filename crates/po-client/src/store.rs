//! # Order Store
//!
//! The backend boundary: create, update, list, fetch and delete purchase
//! orders.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        /api/orders                                      │
//! │                                                                         │
//! │  GET     /api/orders               → [PurchaseOrderPayload]            │
//! │  POST    /api/orders    (payload)  → { confirmed_po, message }         │
//! │  PUT     /api/orders    (payload)  → { confirmed_po, message }         │
//! │  DELETE  /api/orders?po_no=<id>    → { success, message }              │
//! │                                                                         │
//! │  Status mapping                                                        │
//! │  ──────────────                                                        │
//! │  2xx            → decoded body                                         │
//! │  404            → StoreError::NotFound                                 │
//! │  422            → StoreError::Rejected (FastAPI `detail`)              │
//! │  other non-2xx  → StoreError::Api { status, message }                  │
//! │  no response    → StoreError::Unavailable                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here retries. A failed call is reported once and the caller
//! decides what to do with the draft.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{StoreError, StoreResult};
use po_core::{ConfirmResponse, DeleteResponse, PurchaseOrderPayload};

const ORDERS_PATH: &str = "api/orders";

// =============================================================================
// Order Store Trait
// =============================================================================

/// Persistence boundary for purchase orders.
///
/// Object-safe so the editor session can hold a `Box<dyn OrderStore>` and
/// tests can substitute an in-memory store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Submits a new order; the backend confirms its identifier.
    async fn create(&self, order: &PurchaseOrderPayload) -> StoreResult<ConfirmResponse>;

    /// Replaces the order whose identifier `order.po_no()` carries.
    async fn update(&self, order: &PurchaseOrderPayload) -> StoreResult<ConfirmResponse>;

    /// Every stored order.
    async fn list(&self) -> StoreResult<Vec<PurchaseOrderPayload>>;

    /// One order, found client-side in [`OrderStore::list`].
    async fn get(&self, po_no: &str) -> StoreResult<Option<PurchaseOrderPayload>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|order| order.po_no() == po_no))
    }

    /// Deletes an order. A missing order is `success: false`, not an error.
    async fn delete(&self, po_no: &str) -> StoreResult<DeleteResponse>;
}

// =============================================================================
// HTTP Order Store
// =============================================================================

/// [`OrderStore`] over the backend's JSON API.
#[derive(Debug, Clone)]
pub struct HttpOrderStore {
    client: Client,
    orders_url: Url,
}

impl HttpOrderStore {
    /// Creates a store for `base_url` (e.g. `http://127.0.0.1:8000`).
    ///
    /// A path on the base URL is kept: `http://host/erp` serves
    /// `http://host/erp/api/orders`.
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let orders_url = base.join(ORDERS_PATH)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        debug!(url = %orders_url, timeout_secs = timeout.as_secs(), "Order store configured");
        Ok(HttpOrderStore { client, orders_url })
    }

    /// Creates a store from the `[api]` section of the configuration.
    pub fn from_config(config: &ClientConfig) -> StoreResult<Self> {
        Self::new(&config.api.base_url, config.timeout())
    }

    /// The resolved `/api/orders` endpoint.
    pub fn orders_url(&self) -> &Url {
        &self.orders_url
    }

    async fn submit(
        &self,
        method: reqwest::Method,
        order: &PurchaseOrderPayload,
    ) -> StoreResult<ConfirmResponse> {
        let po_no = order.po_no();
        debug!(%method, po_no = %po_no, items = order.items.len(), "Submitting order");

        let response = self
            .client
            .request(method, self.orders_url.clone())
            .json(order)
            .send()
            .await?;

        let confirmed: ConfirmResponse = decode(response, Some(po_no)).await?;
        info!(confirmed_po = %confirmed.confirmed_po, "Order confirmed by backend");
        Ok(confirmed)
    }
}

#[async_trait]
impl OrderStore for HttpOrderStore {
    async fn create(&self, order: &PurchaseOrderPayload) -> StoreResult<ConfirmResponse> {
        self.submit(reqwest::Method::POST, order).await
    }

    async fn update(&self, order: &PurchaseOrderPayload) -> StoreResult<ConfirmResponse> {
        self.submit(reqwest::Method::PUT, order).await
    }

    async fn list(&self) -> StoreResult<Vec<PurchaseOrderPayload>> {
        let response = self.client.get(self.orders_url.clone()).send().await?;
        let orders: Vec<PurchaseOrderPayload> = decode(response, None).await?;

        debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    async fn delete(&self, po_no: &str) -> StoreResult<DeleteResponse> {
        debug!(po_no = %po_no, "Deleting order");

        let response = self
            .client
            .delete(self.orders_url.clone())
            .query(&[("po_no", po_no)])
            .send()
            .await?;

        let reply: DeleteResponse = decode(response, Some(po_no)).await?;
        if !reply.success {
            warn!(po_no = %po_no, message = %reply.message, "Backend refused delete");
        }
        Ok(reply)
    }
}

// =============================================================================
// Response Handling
// =============================================================================

/// Decodes a 2xx body or maps the status to a [`StoreError`].
async fn decode<T: DeserializeOwned>(response: Response, po_no: Option<&str>) -> StoreResult<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let message = detail_message(&body);
    warn!(status = status.as_u16(), message = %message, "Backend returned an error");

    Err(match (status, po_no) {
        (StatusCode::NOT_FOUND, Some(po_no)) => StoreError::NotFound {
            po_no: po_no.to_string(),
        },
        (StatusCode::UNPROCESSABLE_ENTITY, _) => StoreError::Rejected(message),
        _ => StoreError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

/// Human text from a FastAPI error body.
///
/// `detail` is either a string or a list of `{loc, msg, type}` objects;
/// anything else falls back to the raw body.
fn detail_message(body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());

    match detail {
        Some(Value::String(text)) => text,
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| match (entry.get("loc"), entry.get("msg")) {
                (Some(Value::Array(loc)), Some(Value::String(msg))) => {
                    let field = loc
                        .iter()
                        .filter_map(|part| part.as_str())
                        .filter(|part| *part != "body")
                        .collect::<Vec<_>>()
                        .join(".");
                    if field.is_empty() {
                        msg.clone()
                    } else {
                        format!("{}: {}", field, msg)
                    }
                }
                (_, Some(Value::String(msg))) => msg.clone(),
                _ => entry.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use po_core::{HeaderField, LineField, OrderDraft};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> HttpOrderStore {
        HttpOrderStore::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn payload(po_no: &str) -> PurchaseOrderPayload {
        let draft = OrderDraft::new()
            .with_header(HeaderField::PoNo(po_no.to_string()))
            .with_header(HeaderField::PartyName("Acme Polymers".to_string()))
            .with_row_added()
            .with_cell(0, LineField::Quantity(2.0))
            .unwrap()
            .with_cell(0, LineField::Rate(100.0))
            .unwrap();
        PurchaseOrderPayload::from_draft(&draft)
    }

    #[test]
    fn test_orders_url_keeps_base_path() {
        let store = HttpOrderStore::new("http://erp.local:8000", Duration::from_secs(1)).unwrap();
        assert_eq!(store.orders_url().as_str(), "http://erp.local:8000/api/orders");

        let store = HttpOrderStore::new("http://erp.local/po", Duration::from_secs(1)).unwrap();
        assert_eq!(store.orders_url().as_str(), "http://erp.local/po/api/orders");

        assert!(matches!(
            HttpOrderStore::new("::nope::", Duration::from_secs(1)),
            Err(StoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_detail_message() {
        assert_eq!(detail_message(r#"{"detail": "Order X not found"}"#), "Order X not found");
        assert_eq!(
            detail_message(
                r#"{"detail": [{"loc": ["body", "date"], "msg": "field required", "type": "missing"}]}"#
            ),
            "date: field required"
        );
        assert_eq!(detail_message("Internal Server Error\n"), "Internal Server Error");
    }

    #[tokio::test]
    async fn test_create_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .and(body_partial_json(json!({
                "po_no": "PO/1",
                "party_name": "Acme Polymers",
                "gross_amount": 200.0,
                "net_amount": 236.0,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "confirmed_po": "PO/1",
                "message": "Order saved successfully",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = store(&server).create(&payload("PO/1")).await.unwrap();
        assert_eq!(reply.confirmed_po, "PO/1");
        assert_eq!(reply.message, "Order saved successfully");
    }

    #[tokio::test]
    async fn test_update_puts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/orders"))
            .and(body_partial_json(json!({ "po_no": "PO/1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "confirmed_po": "PO/1",
                "message": "Order updated successfully",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = store(&server).update(&payload("PO/1")).await.unwrap();
        assert_eq!(reply.message, "Order updated successfully");
    }

    #[tokio::test]
    async fn test_update_missing_order_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/orders"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "detail": "Order PO/9 not found" })),
            )
            .mount(&server)
            .await;

        let err = store(&server).update(&payload("PO/9")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref po_no } if po_no == "PO/9"));
    }

    #[tokio::test]
    async fn test_validation_failure_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "detail": [{ "loc": ["body", "items"], "msg": "field required", "type": "missing" }]
            })))
            .mount(&server)
            .await;

        let err = store(&server).create(&payload("PO/1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(ref m) if m == "items: field required"));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let err = store(&server).list().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Api { status: 500, ref message } if message == "Internal Server Error"
        ));
    }

    #[tokio::test]
    async fn test_list_and_get_coerce_numbers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "po_no": "PO/1",
                    "party_name": "Acme Polymers",
                    "items": [{ "qty": "2", "rate": 100 }],
                    "net_amount": "236.00",
                    "gst_type": "intra-state",
                },
                { "po_no": "PO/2", "items": null, "net_amount": null },
            ])))
            .mount(&server)
            .await;

        let store = store(&server);
        let orders = store.list().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].net_amount, 236.0);
        assert_eq!(orders[0].items[0].qty, 2.0);
        assert!(orders[1].items.is_empty());

        let found = store.get("PO/2").await.unwrap().unwrap();
        assert_eq!(found.po_no(), "PO/2");
        assert!(store.get("PO/3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_sends_po_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/orders"))
            .and(query_param("po_no", "PO/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Order PO/1 deleted successfully",
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/orders"))
            .and(query_param("po_no", "PO/404"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Order PO/404 not found",
            })))
            .mount(&server)
            .await;

        let store = store(&server);
        assert!(store.delete("PO/1").await.unwrap().success);

        let missing = store.delete("PO/404").await.unwrap();
        assert!(!missing.success);
        assert_eq!(missing.message, "Order PO/404 not found");
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
            .mount(&server)
            .await;

        assert!(matches!(
            store(&server).list().await,
            Err(StoreError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_backend_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let store = HttpOrderStore::new(&server.uri(), Duration::from_millis(200)).unwrap();
        let err = store.list().await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
