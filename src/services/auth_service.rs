use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::time::now;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub nivel_acesso: Option<String>,
}

/// Issues access tokens for authenticated users.
#[derive(Clone)]
pub struct AuthService {
    secret: String,
    algorithm: Algorithm,
    expire_minutes: i64,
}

impl AuthService {
    pub fn from_config(config: &Config) -> Result<Self> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| {
            Error::Config(format!("Unsupported token algorithm: {}", config.algorithm))
        })?;
        Ok(Self {
            secret: config.secret_key.clone(),
            algorithm,
            expire_minutes: config.access_token_expire_minutes,
        })
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        let expires_at = now() + Duration::minutes(self.expire_minutes);
        let claims = Claims {
            sub: user.email.clone(),
            exp: usize::try_from(expires_at.timestamp()).unwrap_or(0),
            nivel_acesso: Some(user.access_level.as_str().to_string()),
        };
        let token = encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }
}
