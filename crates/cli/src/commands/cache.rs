//! Local cache commands.

use serde_json::Value;

use super::{CommandError, Context, print_json};

/// Print a cached value, or `null`.
pub fn get(ctx: &Context, key: &str) -> Result<(), CommandError> {
    print_json(&ctx.cache.get(key, Value::Null))
}

/// Store a JSON value.
pub fn set(ctx: &Context, key: &str, raw: &str) -> Result<(), CommandError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CommandError::InvalidArgument(format!("value is not JSON: {e}")))?;
    ctx.cache.set(key, &value)?;
    tracing::info!(key, "Cached");
    Ok(())
}
