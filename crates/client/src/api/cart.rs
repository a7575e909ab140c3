//! Cart endpoints (`/api/v1/cart`).

use shop_front_core::CartItemId;
use tracing::instrument;

use super::types::{AddCartItem, CartItem, MessageResponse, UpdateCartItem};
use super::{ApiClient, ApiError, RequestDescriptor};

impl ApiClient {
    /// List the current user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self))]
    pub async fn list_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.request_list(RequestDescriptor::get("/api/v1/cart"))
            .await
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self), fields(product_id = %payload.product_id, quantity = payload.quantity))]
    pub async fn add_cart_item(&self, payload: &AddCartItem) -> Result<CartItem, ApiError> {
        self.request(RequestDescriptor::post("/api/v1/cart/items").json(payload)?)
            .await
    }

    /// Change the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self), fields(item_id = %id, quantity = payload.quantity))]
    pub async fn update_cart_item(
        &self,
        id: CartItemId,
        payload: &UpdateCartItem,
    ) -> Result<MessageResponse, ApiError> {
        self.request(RequestDescriptor::patch(format!("/api/v1/cart/items/{id}")).json(payload)?)
            .await
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete_cart_item(&self, id: CartItemId) -> Result<MessageResponse, ApiError> {
        self.request(RequestDescriptor::delete(format!("/api/v1/cart/items/{id}")))
            .await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<MessageResponse, ApiError> {
        self.request(RequestDescriptor::delete("/api/v1/cart")).await
    }
}
