//! Shop and product endpoints (`/api/v2`).

use shop_front_core::{ProductId, ShopId};
use tracing::instrument;

use super::types::{CreateShop, NewProduct, Product, Shop};
use super::{ApiClient, ApiError, RequestDescriptor};

impl ApiClient {
    /// List all shops.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self))]
    pub async fn list_shops(&self) -> Result<Vec<Shop>, ApiError> {
        self.request_list(RequestDescriptor::get("/api/v2/shops"))
            .await
    }

    /// Get one shop.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the shop does not exist.
    #[instrument(skip(self), fields(shop_id = %id))]
    pub async fn get_shop(&self, id: ShopId) -> Result<Shop, ApiError> {
        self.request(RequestDescriptor::get(format!("/api/v2/shops/{id}")))
            .await
    }

    /// Create a shop, optionally with an initial product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self, payload), fields(name = %payload.name, owner_id = %payload.owner_id))]
    pub async fn create_shop(&self, payload: &CreateShop) -> Result<Shop, ApiError> {
        self.request(RequestDescriptor::post("/api/v2/shops").json(payload)?)
            .await
    }

    /// List the products of a shop.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn list_products_by_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, ApiError> {
        self.request_list(RequestDescriptor::get(format!(
            "/api/v2/shops/{shop_id}/products"
        )))
        .await
    }

    /// Add a product to a shop.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip(self, payload), fields(shop_id = %shop_id, name = %payload.name))]
    pub async fn create_product(
        &self,
        shop_id: ShopId,
        payload: &NewProduct,
    ) -> Result<Product, ApiError> {
        self.request(
            RequestDescriptor::post(format!("/api/v2/shops/{shop_id}/products")).json(payload)?,
        )
        .await
    }

    /// Get one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.request(RequestDescriptor::get(format!("/api/v2/products/{id}")))
            .await
    }
}
