//! Shop and product commands.

use shop_front_client::api::types::{CreateShop, NewProduct};
use shop_front_core::{ProductId, ShopId, UserId};

use super::{CommandError, Context, print_json};

pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    print_json(&ctx.api.list_shops().await?)
}

pub async fn get(ctx: &Context, id: ShopId) -> Result<(), CommandError> {
    print_json(&ctx.api.get_shop(id).await?)
}

pub async fn create(
    ctx: &Context,
    name: String,
    description: String,
    owner_id: UserId,
) -> Result<(), CommandError> {
    let shop = ctx
        .api
        .create_shop(&CreateShop {
            name,
            description,
            owner_id,
            products: Vec::new(),
        })
        .await?;
    tracing::info!(shop_id = %shop.id, "Shop created");
    print_json(&shop)
}

pub async fn list_products(ctx: &Context, shop_id: ShopId) -> Result<(), CommandError> {
    print_json(&ctx.api.list_products_by_shop(shop_id).await?)
}

pub async fn get_product(ctx: &Context, id: ProductId) -> Result<(), CommandError> {
    print_json(&ctx.api.get_product(id).await?)
}

pub async fn create_product(
    ctx: &Context,
    shop_id: ShopId,
    product: &NewProduct,
) -> Result<(), CommandError> {
    let created = ctx.api.create_product(shop_id, product).await?;
    tracing::info!(product_id = %created.id, %shop_id, "Product created");
    print_json(&created)
}
