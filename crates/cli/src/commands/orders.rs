//! Order commands.

use shop_front_client::api::types::{CreateOrder, NewOrderItem};
use shop_front_core::{OrderId, OrderStatus, UserId};

use super::{CommandError, Context, print_json};

pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    print_json(&ctx.api.list_orders().await?)
}

/// Place an order from `product_id:quantity:price[:name]` item specs.
pub async fn create(ctx: &Context, user_id: UserId, items: &[String]) -> Result<(), CommandError> {
    let order = build_order(user_id, items)?;
    print_json(&ctx.api.create_order(&order).await?)
}

fn build_order(user_id: UserId, items: &[String]) -> Result<CreateOrder, CommandError> {
    let items = items
        .iter()
        .map(|spec| parse_item(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let order = CreateOrder { user_id, items };
    let total = order
        .expected_total()
        .ok_or_else(|| CommandError::InvalidArgument("order total is too large".to_string()))?;
    tracing::info!(%total, "Placing order");
    Ok(order)
}

pub async fn update_status(
    ctx: &Context,
    id: OrderId,
    status: OrderStatus,
) -> Result<(), CommandError> {
    print_json(&ctx.api.update_order_status(id, status).await?)
}

/// Parse `product_id:quantity:price[:name]`. The name may itself contain `:`.
fn parse_item(spec: &str) -> Result<NewOrderItem, CommandError> {
    let invalid = |reason: &str| CommandError::InvalidArgument(format!("item '{spec}': {reason}"));

    let mut parts = spec.splitn(4, ':');
    let product_id = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| invalid("bad product id"))?;
    let quantity = parts
        .next()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|q| *q > 0)
        .ok_or_else(|| invalid("quantity must be a positive integer"))?;
    let price = parts
        .next()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| invalid("bad price"))?;
    let product_name = parts.next().unwrap_or_default().to_string();

    Ok(NewOrderItem {
        product_id,
        product_name,
        product_img: String::new(),
        price,
        quantity,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shop_front_core::{Price, ProductId};

    use super::*;

    #[test]
    fn test_parse_item() {
        let item = parse_item("12:2:19.90:Tea: green").unwrap();
        assert_eq!(item.product_id, ProductId::new(12));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, "19.90".parse::<Price>().unwrap());
        assert_eq!(item.product_name, "Tea: green");
    }

    #[test]
    fn test_parse_item_without_name() {
        let item = parse_item("3:1:5").unwrap();
        assert!(item.product_name.is_empty());
    }

    #[test]
    fn test_build_order() {
        let order = build_order(UserId::new(7), &["1:2:1.50".into(), "2:1:3".into()]).unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.expected_total(), Some(Price::from_cents(600)));
    }

    #[test]
    fn test_build_order_rejects_overflowing_total() {
        let result = build_order(
            UserId::new(7),
            &["1:2:79228162514264337593543950335".into()],
        );
        assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_item_rejects_bad_specs() {
        for spec in ["", "x:1:1", "3", "3:0:1", "3:1", "3:1:cheap"] {
            assert!(
                matches!(parse_item(spec), Err(CommandError::InvalidArgument(_))),
                "{spec}"
            );
        }
    }
}
