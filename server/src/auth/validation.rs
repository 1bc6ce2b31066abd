use crate::error::{ApiError, ApiResult};
use crate::messages;

/// Characters that satisfy the "special character" password rule.
pub const SPECIAL_CHARACTERS: &str = "~!@#$%^&*()-_=+[]{}|;:,.<>?/";

pub fn validate_email(email: &str) -> ApiResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::validation(messages::INVALID_EMAIL))
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    if email.chars().any(char::is_whitespace)
        || email.contains("..")
        || email.contains(|c| matches!(c, ',' | '#' | '*' | '~' | '$' | '"'))
    {
        return false;
    }

    if domain.starts_with(['-', '.']) || domain.ends_with(['-', '.']) || local.starts_with('.') {
        return false;
    }

    domain
        .rsplit('.')
        .next()
        .map(|tld| tld.len() >= 2)
        .unwrap_or(false)
}

/// 3 to 20 ASCII letters or digits.
pub fn validate_username(username: &str) -> ApiResult<()> {
    let len = username.chars().count();
    if (3..=20).contains(&len) && username.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ApiError::validation(messages::INVALID_USERNAME))
    }
}

/// Rules are checked in order and the first failure is reported.
pub fn validate_password(password: &str) -> ApiResult<()> {
    if password.chars().count() < 5 {
        return Err(ApiError::validation(messages::PASSWORD_TOO_SHORT));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ApiError::validation(messages::PASSWORD_NEEDS_LOWERCASE));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ApiError::validation(messages::PASSWORD_NEEDS_UPPERCASE));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ApiError::validation(messages::PASSWORD_NEEDS_DIGIT));
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(ApiError::validation(messages::PASSWORD_NEEDS_SPECIAL));
    }
    Ok(())
}
