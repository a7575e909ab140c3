//! Request payloads and response models for the remote service.
//!
//! Payloads use the service's snake_case JSON field names. Response models
//! follow the service's default entity encoding (PascalCase fields, `ID`
//! suffixes) and default every field, so partially populated responses still
//! decode.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use shop_front_core::{
    CartItemId, Email, OrderId, OrderStatus, Price, ProductId, SessionRecord, ShopId, UserId,
    UserRole,
};

/// The service encodes empty collections as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Auth
// =============================================================================

/// Account registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterUser {
    pub username: String,
    pub email: Email,
    pub password: String,
    pub role: UserRole,
}

/// Registration response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterResponse {
    pub user: User,
}

/// Credentials for `POST /api/v0/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload for `POST /api/v0/auth/refresh`.
#[derive(Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

impl std::fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshRequest")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Tokens issued by login and refresh.
///
/// Refresh responses omit `user_id` and `role`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl From<AuthTokens> for SessionRecord {
    fn from(tokens: AuthTokens) -> Self {
        use secrecy::ExposeSecret;

        let mut record = Self::from_access_token(tokens.access_token.expose_secret())
            .with_claim(
                shop_front_core::session::REFRESH_TOKEN,
                tokens.refresh_token.expose_secret(),
            );
        if let Some(user_id) = tokens.user_id {
            record = record.with_claim(shop_front_core::session::USER_ID, user_id.as_u64());
        }
        if let Some(role) = tokens.role {
            record = record.with_claim(shop_front_core::session::ROLE, role.code());
        }
        record
    }
}

/// Logout response.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoutResponse {
    pub ok: bool,
}

/// Generic acknowledgement (`{"message": "..."}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: String,
}

/// Account as returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "ID")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Raw role code; see [`User::role`].
    #[serde(rename = "Role")]
    pub role_code: u8,
    pub user_img: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// The account role, if the code is a known one.
    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        UserRole::try_from(self.role_code).ok()
    }
}

// =============================================================================
// Shops & products
// =============================================================================

/// Product fields for creation, standalone or nested in [`CreateShop`].
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock: u32,
    pub product_img: String,
}

/// Shop creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct CreateShop {
    pub name: String,
    pub description: String,
    pub owner_id: UserId,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<NewProduct>,
}

/// Shop as returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Shop {
    #[serde(rename = "ID")]
    pub id: ShopId,
    pub name: String,
    pub description: String,
    #[serde(rename = "OwnerID")]
    pub owner_id: UserId,
    #[serde(deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product as returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: ProductId,
    #[serde(rename = "ShopID")]
    pub shop_id: ShopId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock: i64,
    pub product_img: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Orders
// =============================================================================

/// Line of an order creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_img: String,
    pub price: Price,
    pub quantity: u32,
}

/// Order creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrder {
    pub user_id: UserId,
    pub items: Vec<NewOrderItem>,
}

impl CreateOrder {
    /// Sum of `price * quantity` over all lines, as the service computes it.
    /// `None` when the total does not fit a decimal.
    #[must_use]
    pub fn expected_total(&self) -> Option<Price> {
        self.items.iter().try_fold(Price::ZERO, |total, item| {
            total.checked_add(item.price.times(item.quantity)?)
        })
    }
}

/// Payload for `PATCH /api/v1/orders/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// Order as returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Order {
    #[serde(rename = "ID")]
    pub id: OrderId,
    /// Human-facing order number.
    #[serde(rename = "OrderID")]
    pub order_no: String,
    #[serde(rename = "UserID")]
    pub user_id: UserId,
    pub total_amount: Price,
    pub discount_amount: Price,
    pub shipping_fee: Price,
    pub actual_amount: Price,
    pub status: OrderStatus,
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    pub shipping_zip_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order_items: Vec<OrderItem>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Order line as returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OrderItem {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "OrderID")]
    pub order_id: OrderId,
    #[serde(rename = "ProductID")]
    pub product_id: ProductId,
    pub product_name: String,
    pub product_img: String,
    pub price: Price,
    pub quantity: u32,
    pub subtotal: Price,
}

// =============================================================================
// Cart
// =============================================================================

/// Payload for `POST /api/v1/cart/items`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AddCartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for `PATCH /api/v1/cart/items/{id}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdateCartItem {
    pub quantity: u32,
}

/// Cart line as returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CartItem {
    #[serde(rename = "ID")]
    pub id: CartItemId,
    #[serde(rename = "UserID")]
    pub user_id: UserId,
    #[serde(rename = "ProductID")]
    pub product_id: ProductId,
    pub product_name: String,
    pub product_img: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartItem {
    /// `price * quantity` for this line, `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price.times(self.quantity)
    }
}
