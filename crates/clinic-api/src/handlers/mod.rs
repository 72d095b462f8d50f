//! HTTP handlers, one submodule per resource.
//!
//! Handlers stay thin: parse the path id, extract the typed JSON body and
//! hand off to `ClinicService` through `AppState::run`.

pub mod appointments;
pub mod people;
pub mod pets;
pub mod vets;

use crate::errors::ApiError;

/// Ids de ruta no numéricos se rechazan con 400 antes de tocar el
/// almacenamiento.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
  raw.parse::<i32>().map_err(|_| ApiError::BadRequest(format!("Invalid id: {}.", raw)))
}
