// config.rs
// Configuración del servidor HTTP. La del almacenamiento la resuelve
// `clinic_persistence::new_from_env`.
use axum::http::HeaderValue;
use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("CLINIC_BIND_ADDR inválida '{value}': {source}")]
  InvalidBindAddr {
    value: String,
    #[source]
    source: std::net::AddrParseError,
  },
  #[error("CLINIC_CORS_ORIGIN inválido: '{0}'")]
  InvalidCorsOrigin(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub bind_addr: SocketAddr,
  /// Único origen admitido por CORS.
  pub cors_origin: HeaderValue,
}

impl ServerConfig {
  /// Lee `CLINIC_BIND_ADDR` y `CLINIC_CORS_ORIGIN` del entorno.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|k| std::env::var(k).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let bind = lookup("CLINIC_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    let bind_addr = bind.trim()
                        .parse::<SocketAddr>()
                        .map_err(|source| ConfigError::InvalidBindAddr { value: bind.clone(), source })?;
    let origin = lookup("CLINIC_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
    let cors_origin = HeaderValue::from_str(origin.trim()).map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?;
    Ok(Self { bind_addr, cors_origin })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_when_unset() {
    let cfg = ServerConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg.bind_addr.port(), 3000);
    assert_eq!(cfg.cors_origin, "http://localhost:8080");
  }

  #[test]
  fn overrides_are_parsed() {
    let cfg = ServerConfig::from_lookup(|k| match k {
                "CLINIC_BIND_ADDR" => Some("127.0.0.1:8081".into()),
                "CLINIC_CORS_ORIGIN" => Some("https://clinic.example".into()),
                _ => None,
              }).unwrap();
    assert_eq!(cfg.bind_addr, "127.0.0.1:8081".parse().unwrap());
    assert_eq!(cfg.cors_origin, "https://clinic.example");
  }

  #[test]
  fn bad_bind_addr_is_reported() {
    let err = ServerConfig::from_lookup(|k| (k == "CLINIC_BIND_ADDR").then(|| "localhost".to_string())).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
  }
}
