//! Order endpoints (`/api/v1/orders`).

use shop_front_core::{OrderId, OrderStatus};
use tracing::instrument;

use super::types::{CreateOrder, MessageResponse, Order, UpdateOrderStatus};
use super::{ApiClient, ApiError, RequestDescriptor};

impl ApiClient {
    /// List orders visible to the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.request_list(RequestDescriptor::get("/api/v1/orders"))
            .await
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self, payload), fields(user_id = %payload.user_id, lines = payload.items.len()))]
    pub async fn create_order(&self, payload: &CreateOrder) -> Result<Order, ApiError> {
        self.request(RequestDescriptor::post("/api/v1/orders").json(payload)?)
            .await
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<MessageResponse, ApiError> {
        self.request(
            RequestDescriptor::patch(format!("/api/v1/orders/{id}/status"))
                .json(&UpdateOrderStatus { status })?,
        )
        .await
    }
}
