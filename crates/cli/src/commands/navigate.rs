//! Navigation guard command.

use shop_front_client::Navigator;

use super::{CommandError, Context, print_json};

/// Run one transition and print where it landed.
pub fn navigate(ctx: &Context, path: &str) -> Result<(), CommandError> {
    let mut navigator = Navigator::new(ctx.session.clone());
    print_json(navigator.navigate(path))
}
