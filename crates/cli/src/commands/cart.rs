//! Cart commands.

use shop_front_client::api::types::{AddCartItem, UpdateCartItem};
use shop_front_core::{CartItemId, ProductId};

use super::{CommandError, Context, print_json};

pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    print_json(&ctx.api.list_cart().await?)
}

pub async fn add(ctx: &Context, product_id: ProductId, quantity: u32) -> Result<(), CommandError> {
    let item = ctx
        .api
        .add_cart_item(&AddCartItem {
            product_id,
            quantity,
        })
        .await?;
    print_json(&item)
}

pub async fn update(ctx: &Context, id: CartItemId, quantity: u32) -> Result<(), CommandError> {
    print_json(&ctx.api.update_cart_item(id, &UpdateCartItem { quantity }).await?)
}

pub async fn remove(ctx: &Context, id: CartItemId) -> Result<(), CommandError> {
    print_json(&ctx.api.delete_cart_item(id).await?)
}

pub async fn clear(ctx: &Context) -> Result<(), CommandError> {
    print_json(&ctx.api.clear_cart().await?)
}
