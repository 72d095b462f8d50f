// errors.rs
use thiserror::Error;

/// Errores del dominio de la clínica.
///
/// - `NotFound`: la fila buscada (o la referenciada durante una escritura) no
///   existe. El mensaje es el que ve el cliente.
/// - `Validation`: el payload no cumple el esquema de la operación.
/// - `Storage`: cualquier fallo del almacenamiento; el detalle nunca sale al
///   cliente.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
  #[error("{0}")]
  NotFound(String),
  #[error("{0}")]
  Validation(String),
  #[error("Error de almacenamiento: {0}")]
  Storage(String),
}

impl DomainError {
  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::NotFound(msg.into())
  }

  pub fn storage(detail: impl std::fmt::Display) -> Self {
    Self::Storage(detail.to_string())
  }
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, DomainError>;
