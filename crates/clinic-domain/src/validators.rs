// validators.rs
// Comprobaciones previas a una escritura: campos de texto obligatorios e
// integridad referencial contra `people`. Sólo lectura.
use crate::errors::{DomainError, Result};
use crate::repository::ClinicRepository;

/// Escritura que referencia a una persona. Determina el mensaje devuelto
/// cuando la persona no existe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonReference {
  /// `personId` de una mascota nueva.
  PetOwner,
  /// `personId` nuevo en la actualización de una mascota.
  NewPetOwner,
  /// `id` compartido de un veterinario nuevo.
  VetIdentity,
}

impl PersonReference {
  pub const fn missing_message(self) -> &'static str {
    match self {
      Self::PetOwner => "Cannot create Pet: Person not found.",
      Self::NewPetOwner => "New tutor (Person) not found.",
      Self::VetIdentity => "Cannot create Vet: Person not found.",
    }
  }
}

/// Verifica que `person_id` exista en el almacenamiento.
pub fn ensure_person_exists(repo: &dyn ClinicRepository, person_id: i32, reference: PersonReference) -> Result<()> {
  match repo.find_person(person_id)? {
    Some(_) => Ok(()),
    None => Err(DomainError::not_found(reference.missing_message())),
  }
}

/// Un campo de texto obligatorio no puede estar vacío ni ser sólo espacios.
pub fn require_text(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(DomainError::Validation(format!("Field '{}' must not be empty.", field)));
  }
  Ok(())
}

/// Igual que `require_text` pero sólo si el campo viene en el payload.
pub fn require_text_if_present(field: &str, value: Option<&str>) -> Result<()> {
  value.map_or(Ok(()), |v| require_text(field, v))
}
