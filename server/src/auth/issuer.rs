use std::sync::Arc;

use anyhow::{Context, anyhow};
use bookstore_shared::types::{ADMIN_ROLE, JwtClaims};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::database::tokens;
use crate::database::users::User;
use crate::database::utils::get_timestamp;
use crate::error::ApiResult;

/// HMAC keys derived once from the configured secret.
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Signs and verifies session JWTs (HS256).
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<Keys>,
    validity_secs: i64,
    issuer: Option<String>,
}

/// A freshly signed token and the claims inside it.
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: i64,
    pub claims: JwtClaims,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("validity_secs", &self.validity_secs)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, validity_secs: u64, issuer: Option<String>) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            validity_secs: i64::try_from(validity_secs).unwrap_or(i64::MAX),
            issuer,
        }
    }

    pub fn validity_secs(&self) -> u64 {
        self.validity_secs as u64
    }

    /// Sign claims for `user`. Each call yields a distinct token.
    pub fn sign(&self, user: &User) -> anyhow::Result<SignedToken> {
        let now = get_timestamp();
        let expires_at = now.saturating_add(self.validity_secs);

        let claims = JwtClaims {
            sub: user.username.clone(),
            user_id: user.id,
            email: user.email.clone(),
            role: user.is_admin.then(|| ADMIN_ROLE.to_string()),
            jti: uuid::Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            iat: now as usize,
            exp: expires_at as usize,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .context("Failed to sign JWT")?;

        Ok(SignedToken {
            token,
            expires_at,
            claims,
        })
    }

    /// Sign a token for `user` and record it so it can later be resolved and revoked.
    pub async fn issue(&self, db: &SqlitePool, user: &User) -> ApiResult<SignedToken> {
        let signed = self.sign(user)?;
        tokens::record_token(db, user.id, &signed.token, signed.expires_at).await?;
        info!("Issued token for user {} (ID: {})", user.username, user.id);
        Ok(signed)
    }

    /// Verify signature, expiry and (when configured) issuer.
    pub fn decode(&self, token: &str) -> anyhow::Result<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        if let Some(iss) = &self.issuer {
            validation.set_issuer(&[iss]);
        }

        let data = decode::<JwtClaims>(token, &self.keys.decoding, &validation)
            .map_err(|e| anyhow!("JWT rejected: {}", e))?;

        debug!("JWT verified for user_id={}", data.claims.user_id);
        Ok(data.claims)
    }
}
