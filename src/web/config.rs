use anyhow::{Context, Result};
use std::env;

/// A pre-registered gateway credential, parsed from `DEV_TOKENS`.
#[derive(Debug, Clone)]
pub struct DevToken {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub dev_tokens: Vec<DevToken>,
}

impl AppConfig {
    /// Reads configuration from the environment (and `.env` if present).
    ///
    /// `DEV_TOKENS` seeds the token registry with static credentials,
    /// formatted `token:user_id:email`, comma-separated.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("APP_PORT must be a valid u16")?;

        let dev_tokens = match env::var("DEV_TOKENS") {
            Ok(raw) => parse_dev_tokens(&raw)?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            host,
            port,
            dev_tokens,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_dev_tokens(raw: &str) -> Result<Vec<DevToken>> {
    raw.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let mut parts = entry.trim().splitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(token), Some(user_id), Some(email)) => Ok(DevToken {
                    token: token.to_string(),
                    user_id: user_id.to_string(),
                    email: email.to_string(),
                }),
                _ => Err(anyhow::anyhow!(
                    "DEV_TOKENS entries must be token:user_id:email, got '{entry}'"
                )),
            }
        })
        .collect()
}
