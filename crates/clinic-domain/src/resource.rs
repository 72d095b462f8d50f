// resource.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Los cuatro recursos expuestos por la API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
  Person,
  Pet,
  Vet,
  Appointment,
}

impl Resource {
  pub const fn label(self) -> &'static str {
    match self {
      Self::Person => "Person",
      Self::Pet => "Pet",
      Self::Vet => "Vet",
      Self::Appointment => "Appointment",
    }
  }

  /// Mensaje devuelto cuando la fila objetivo no existe.
  pub fn not_found_message(self) -> String {
    format!("{} not found.", self.label())
  }

  pub fn deleted_message(self) -> String {
    format!("{} deleted successfully.", self.label())
  }
}

impl fmt::Display for Resource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Confirmación de borrado: `{"msg": "Pet deleted successfully."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
  pub msg: String,
}

impl Deleted {
  pub fn of(resource: Resource) -> Self {
    Self { msg: resource.deleted_message() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_name_the_resource() {
    assert_eq!(Resource::Pet.not_found_message(), "Pet not found.");
    assert_eq!(Resource::Appointment.deleted_message(), "Appointment deleted successfully.");
    assert_eq!(Deleted::of(Resource::Vet).msg, "Vet deleted successfully.");
  }
}
