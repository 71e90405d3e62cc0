use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::{AccountId, Role, TenantId};

/// Claims carried in a bearer token. The role and tenant are informational;
/// authorization always re-reads the live account record.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign token")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("invalid or expired token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// HS256 signer/verifier for bearer credentials.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::seconds(config.token_ttl_seconds),
        }
    }

    pub fn issue(
        &self,
        account_id: &AccountId,
        role: Role,
        tenant_id: Option<&TenantId>,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.0.clone(),
            role,
            tid: tenant_id.map(|tenant| tenant.0.clone()),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Sign)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}
