use bookstore_shared::types::{
    ChangePasswordData, JwtClaims, LoginData, RegistrationData, UpdateDetailsData, UserSummary,
};
use tracing::{error, info, warn};

use crate::AppState;
use crate::auth::SignedToken;
use crate::auth::validation::{validate_email, validate_password, validate_username};
use crate::database::users::{self, NewUser};
use crate::database::{is_unique_violation, tokens, utils};
use crate::error::{ApiError, ApiResult};
use crate::messages;

/// Identity of a caller whose token is signed, unrevoked and recorded for an
/// active user.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub token: String,
    pub claims: JwtClaims,
}

// ---------------------------------------------------------------------------
// Token checks
// ---------------------------------------------------------------------------

/// Verify signature and expiry, then consult the revocation registry.
pub fn authenticate(state: &AppState, token: &str) -> ApiResult<JwtClaims> {
    let claims = state.tokens.decode(token).map_err(|e| {
        warn!("Token rejected: {}", e);
        ApiError::auth(messages::AUTH_REQUIRED)
    })?;

    if state.revocations.is_revoked(token) {
        warn!("Revoked token presented for user_id={}", claims.user_id);
        return Err(ApiError::auth(messages::AUTH_REQUIRED));
    }

    Ok(claims)
}

/// [`authenticate`] plus a store lookup: the token must still be on record
/// for an active user matching its claims.
pub async fn authenticate_session(state: &AppState, token: &str) -> ApiResult<AuthContext> {
    let claims = authenticate(state, token)?;

    match tokens::find_user_by_token(&state.db, token).await? {
        Some(user_id) if user_id == claims.user_id => Ok(AuthContext {
            user_id,
            token: token.to_string(),
            claims,
        }),
        _ => {
            warn!("Token not on record for user_id={}", claims.user_id);
            Err(ApiError::auth(messages::AUTH_REQUIRED))
        }
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Format checks in a fixed order, first failure wins.
fn validate_registration(data: &RegistrationData) -> ApiResult<()> {
    if data.username.trim().is_empty()
        || data.email.trim().is_empty()
        || data.password.is_empty()
    {
        return Err(ApiError::validation(messages::ALL_FIELDS_REQUIRED));
    }

    validate_email(data.email.trim())?;
    validate_username(data.username.trim())?;
    validate_password(&data.password)
}

async fn check_identity_available(
    state: &AppState,
    username: Option<&str>,
    email: Option<&str>,
    exclude_id: Option<i64>,
) -> ApiResult<()> {
    let username_taken = match username {
        Some(u) => users::username_exists(&state.db, u, exclude_id).await?,
        None => false,
    };
    let email_taken = match email {
        Some(e) => users::email_exists(&state.db, e, exclude_id).await?,
        None => false,
    };

    match (username_taken, email_taken) {
        (true, true) => Err(ApiError::conflict(messages::EMAIL_AND_USERNAME_EXIST)),
        (true, false) => Err(ApiError::conflict(messages::USERNAME_EXISTS)),
        (false, true) => Err(ApiError::conflict(messages::EMAIL_EXISTS)),
        (false, false) => Ok(()),
    }
}

async fn create_account(state: &AppState, data: &RegistrationData, is_admin: bool) -> ApiResult<i64> {
    validate_registration(data)?;

    let username = data.username.trim();
    let email = data.email.trim();
    check_identity_available(state, Some(username), Some(email), None).await?;

    let password_hash = utils::hash_password(&data.password)?;

    let inserted = users::insert_user(
        &state.db,
        NewUser {
            username,
            email,
            password_hash: &password_hash,
            is_admin,
        },
    )
    .await;

    match inserted {
        Ok(user_id) => {
            info!("User registered: {} (ID: {}, admin: {})", username, user_id, is_admin);
            Ok(user_id)
        }
        // Lost a race with a concurrent registration; report which identifier.
        Err(e) if is_unique_violation(&e) => {
            check_identity_available(state, Some(username), Some(email), None).await?;
            Err(ApiError::conflict(messages::USERNAME_EXISTS))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn register(state: &AppState, data: &RegistrationData) -> ApiResult<i64> {
    create_account(state, data, false).await
}

/// Anyone may create the first admin. Once one exists, only admins may add more.
pub async fn register_admin(
    state: &AppState,
    data: &RegistrationData,
    caller: Option<&JwtClaims>,
) -> ApiResult<i64> {
    if users::admin_exists(&state.db).await? {
        match caller {
            None => return Err(ApiError::auth(messages::AUTH_REQUIRED)),
            Some(claims) if !claims.is_admin() => {
                warn!("Non-admin user_id={} tried to register an admin", claims.user_id);
                return Err(ApiError::forbidden(messages::ADMIN_REQUIRED));
            }
            Some(_) => {}
        }
    } else {
        info!("No admin exists yet, allowing bootstrap registration");
    }

    create_account(state, data, true).await
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

pub async fn login(state: &AppState, data: &LoginData) -> ApiResult<SignedToken> {
    let identifier = data.identifier.trim();
    if identifier.is_empty() {
        return Err(ApiError::validation(messages::IDENTIFIER_REQUIRED));
    }
    if data.password.is_empty() {
        return Err(ApiError::validation(messages::PASSWORD_REQUIRED));
    }

    let Some(user) = users::find_by_identifier(&state.db, identifier).await? else {
        warn!("Login attempt for unknown identifier");
        return Err(ApiError::auth(messages::INVALID_CREDENTIALS));
    };

    if !utils::verify_password(&user.password_hash, &data.password)? {
        warn!("Invalid password for user ID {}", user.id);
        return Err(ApiError::auth(messages::INVALID_CREDENTIALS));
    }

    if !user.is_active {
        warn!("Deactivated user ID {} attempted login", user.id);
        return Err(ApiError::auth(messages::ACCOUNT_DEACTIVATED));
    }

    users::set_logged_in(&state.db, user.id, true).await?;
    let signed = state.tokens.issue(&state.db, &user).await?;

    info!("User logged in: {} (ID: {})", user.username, user.id);
    Ok(signed)
}

/// Revoke `token` and drop its record.
async fn revoke_token(state: &AppState, token: &str) -> ApiResult<()> {
    let expires_at = match state.tokens.decode(token) {
        Ok(claims) => claims.exp as i64,
        // Already expired or malformed; keep it blocked for one validity window.
        Err(_) => utils::get_timestamp().saturating_add(state.tokens.validity_secs() as i64),
    };
    state.revocations.revoke(token, expires_at);
    tokens::delete_token(&state.db, token).await?;
    Ok(())
}

/// Revoke every outstanding token of a user.
async fn revoke_all_tokens(state: &AppState, user_id: i64) -> ApiResult<usize> {
    let outstanding = tokens::tokens_for_user(&state.db, user_id).await?;
    for issued in &outstanding {
        state.revocations.revoke(&issued.token, issued.expires_at);
    }
    tokens::delete_tokens_for_user(&state.db, user_id).await?;
    Ok(outstanding.len())
}

pub async fn logout(state: &AppState, token: &str) -> ApiResult<()> {
    let Some(user_id) = tokens::find_user_by_token(&state.db, token).await? else {
        return Err(ApiError::auth(messages::NOT_LOGGED_IN));
    };

    revoke_token(state, token).await?;

    // Other devices may still hold live tokens.
    if tokens::tokens_for_user(&state.db, user_id).await?.is_empty() {
        users::set_logged_in(&state.db, user_id, false).await?;
    }

    info!("User ID {} logged out", user_id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Account updates
// ---------------------------------------------------------------------------

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub async fn update_details(
    state: &AppState,
    user_id: i64,
    data: &UpdateDetailsData,
) -> ApiResult<()> {
    let username = non_empty(&data.username);
    let email = non_empty(&data.email);

    if username.is_none() && email.is_none() {
        return Err(ApiError::validation(messages::NOTHING_TO_UPDATE));
    }
    if let Some(e) = email {
        validate_email(e)?;
    }
    if let Some(u) = username {
        validate_username(u)?;
    }

    if users::find_by_id(&state.db, user_id).await?.is_none() {
        return Err(ApiError::not_found(messages::USER_NOT_FOUND));
    }
    check_identity_available(state, username, email, Some(user_id)).await?;

    users::update_details(&state.db, user_id, username, email)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict(messages::USERNAME_EXISTS)
            } else {
                e.into()
            }
        })?;

    info!("Details updated for user ID {}", user_id);
    Ok(())
}

/// Change the password, then end the caller's session.
pub async fn update_password(
    state: &AppState,
    user_id: i64,
    token: &str,
    data: &ChangePasswordData,
) -> ApiResult<()> {
    if data.old_password.is_empty() {
        return Err(ApiError::validation(messages::OLD_PASSWORD_EMPTY));
    }
    if data.new_password.is_empty() {
        return Err(ApiError::validation(messages::NEW_PASSWORD_EMPTY));
    }

    let Some(user) = users::find_by_id(&state.db, user_id).await? else {
        return Err(ApiError::not_found(messages::USER_NOT_FOUND));
    };

    if !utils::verify_password(&user.password_hash, &data.old_password)? {
        warn!("Wrong current password for user ID {}", user_id);
        return Err(ApiError::auth(messages::INVALID_CREDENTIALS));
    }

    validate_password(&data.new_password)?;
    if data.new_password == data.old_password {
        return Err(ApiError::validation(messages::PASSWORD_UNCHANGED));
    }

    let password_hash = utils::hash_password(&data.new_password)?;
    users::update_password_hash(&state.db, user_id, &password_hash).await?;
    revoke_token(state, token).await?;

    info!("Password updated for user ID {}", user_id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// Activate or deactivate `user_id`. Deactivation ends every session of that user.
pub async fn set_user_active(
    state: &AppState,
    admin_id: i64,
    user_id: i64,
    active: bool,
) -> ApiResult<()> {
    if !active && admin_id == user_id {
        return Err(ApiError::forbidden(messages::CANNOT_DEACTIVATE_SELF));
    }

    if !users::set_active(&state.db, user_id, active).await? {
        return Err(ApiError::not_found(messages::USER_NOT_FOUND));
    }

    if active {
        info!("Admin {} activated user ID {}", admin_id, user_id);
    } else {
        let revoked = revoke_all_tokens(state, user_id).await?;
        info!(
            "Admin {} deactivated user ID {} ({} tokens revoked)",
            admin_id, user_id, revoked
        );
    }
    Ok(())
}

pub async fn delete_user(state: &AppState, admin_id: i64, user_id: i64) -> ApiResult<()> {
    if admin_id == user_id {
        return Err(ApiError::forbidden(messages::CANNOT_DELETE_SELF));
    }

    if users::find_by_id(&state.db, user_id).await?.is_none() {
        return Err(ApiError::not_found(messages::USER_NOT_FOUND));
    }

    revoke_all_tokens(state, user_id).await?;
    if !users::delete_user(&state.db, user_id).await? {
        error!("User ID {} vanished during deletion", user_id);
        return Err(ApiError::not_found(messages::USER_NOT_FOUND));
    }

    info!("Admin {} deleted user ID {}", admin_id, user_id);
    Ok(())
}

pub async fn logged_in_users(state: &AppState) -> ApiResult<Vec<UserSummary>> {
    Ok(users::list_logged_in(&state.db)
        .await?
        .iter()
        .map(users::User::summary)
        .collect())
}

pub async fn registered_users(state: &AppState) -> ApiResult<Vec<UserSummary>> {
    Ok(users::list_users(&state.db)
        .await?
        .iter()
        .map(users::User::summary)
        .collect())
}
