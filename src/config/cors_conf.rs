use std::env;
use tracing::warn;

/// Browser origin allowlist. The platform serves exactly one development and
/// one production frontend.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub dev_origin: String,
    pub prod_origin: String,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let dev_origin = env::var("CORS_DEV_ORIGIN").unwrap_or_else(|_| {
            warn!("CORS_DEV_ORIGIN not set, using default: http://localhost:5173");
            "http://localhost:5173".to_string()
        });
        let prod_origin = env::var("CORS_PROD_ORIGIN").unwrap_or_else(|_| {
            warn!("CORS_PROD_ORIGIN not set, using default: https://donorlink.web.app");
            "https://donorlink.web.app".to_string()
        });
        CorsConfig { dev_origin, prod_origin }
    }

    pub fn origins(&self) -> Vec<String> {
        vec![self.dev_origin.clone(), self.prod_origin.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origins_pair() {
        let config = CorsConfig {
            dev_origin: "http://localhost:5173".to_string(),
            prod_origin: "https://donorlink.web.app".to_string(),
        };
        assert_eq!(config.origins().len(), 2);
    }
}
