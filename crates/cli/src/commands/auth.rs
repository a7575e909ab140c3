//! Account and session commands.

use serde_json::json;
use shop_front_client::api::types::RegisterUser;
use shop_front_client::services::AuthService;
use shop_front_core::{Email, UserRole};

use super::{CommandError, Context, print_json};

/// Sign in and persist the session.
pub async fn login(ctx: &Context, username: &str, password: &str) -> Result<(), CommandError> {
    let record = AuthService::new(&ctx.api).login(username, password).await?;
    print_json(&json!({
        "signed_in": true,
        "user_id": record.user_id(),
        "role": record.role().map(|role| role.to_string()),
    }))
}

/// Sign out. The local session is cleared even if the service cannot be reached.
pub async fn logout(ctx: &Context) -> Result<(), CommandError> {
    AuthService::new(&ctx.api).logout().await?;
    print_json(&json!({ "signed_in": false }))
}

/// Refresh the stored tokens.
pub async fn refresh(ctx: &Context) -> Result<(), CommandError> {
    let record = AuthService::new(&ctx.api).refresh().await?;
    print_json(&json!({
        "signed_in": record.has_access_token(),
        "user_id": record.user_id(),
    }))
}

/// Show the stored session without its tokens.
pub fn whoami(ctx: &Context) -> Result<(), CommandError> {
    let Some(record) = ctx.session.read() else {
        return print_json(&json!({ "signed_in": false }));
    };

    print_json(&json!({
        "signed_in": record.has_access_token(),
        "user_id": record.user_id(),
        "role": record.role().map(|role| role.to_string()),
        "has_refresh_token": record.refresh_token().is_some(),
    }))
}

/// Register a new account.
pub async fn register(
    ctx: &Context,
    username: String,
    email: Email,
    password: String,
    role: UserRole,
) -> Result<(), CommandError> {
    let response = ctx
        .api
        .register_user(&RegisterUser {
            username,
            email,
            password,
            role,
        })
        .await?;
    print_json(&response)
}
