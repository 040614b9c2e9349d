//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno del servidor HTTP.

use std::env;

use anyhow::{Context, Result};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Orígenes permitidos para CORS. Vacío permite cualquier origen.
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno, con valores por
    /// defecto de desarrollo para las que no estén definidas
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{}'", port))?,
            Err(_) => defaults.port,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|origins| parse_origins(&origins))
            .unwrap_or_default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins,
        })
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://localhost:3000, http://localhost:4200,,");
        assert_eq!(origins, vec!["http://localhost:3000", "http://localhost:4200"]);
    }

    #[test]
    fn test_default_is_development() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.environment, "development");
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }
}
