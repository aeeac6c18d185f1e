use anyhow::{Context, Result};
use std::env;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Tenant provisioned with the default rate table at startup
    pub seed_default_company_id: Option<Uuid>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let seed_default_company_id = match env::var("SEED_DEFAULT_COMPANY_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                Uuid::parse_str(raw.trim())
                    .context("SEED_DEFAULT_COMPANY_ID must be a UUID")?,
            ),
            _ => None,
        };

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            seed_default_company_id,
        })
    }

    /// Settings for in-process tests; no environment lookups.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            seed_default_company_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_names() {
        assert_eq!(Environment::from_str("PRODUCTION"), Environment::Prod);
        assert_eq!(Environment::from_str("prod"), Environment::Prod);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("anything"), Environment::Dev);
    }
}
