//! JWT service for bearer token issuance and verification
//!
//! Tokens are signed with HS256 using the shared secret from the service
//! configuration. Expiry is configurable; an expiry of 0 issues tokens
//! without an `exp` claim.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// Issued at time
    pub iat: u64,
    /// Expiration time; absent when tokens are configured not to expire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(secret: &str, token_expiry: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if token_expiry == 0 {
            validation.validate_exp = false;
            validation.set_required_spec_claims::<&str>(&[]);
        }

        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_expiry,
        }
    }

    /// Issue a token bound to a user id
    pub fn issue(&self, user_id: i64) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: (self.token_expiry > 0).then(|| now + self.token_expiry),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
