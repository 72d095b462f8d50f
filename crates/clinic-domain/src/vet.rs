// vet.rs
use crate::appointment::Appointment;
use crate::errors::Result;
use crate::person::Person;
use crate::validators::{require_text, require_text_if_present};
use serde::{Deserialize, Serialize};

/// Perfil de veterinario. `id` es el de la persona que especializa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
  pub id: i32,
  pub crmv: String,
  pub specialty: String,
}

/// Esquema de `POST /vets`. El `id` lo aporta el cliente y debe ser el de una
/// persona existente.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewVet {
  pub id: i32,
  pub crmv: String,
  pub specialty: String,
}

impl NewVet {
  pub fn validate(&self) -> Result<()> {
    require_text("crmv", &self.crmv)?;
    require_text("specialty", &self.specialty)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VetChanges {
  pub crmv: Option<String>,
  pub specialty: Option<String>,
}

impl VetChanges {
  pub fn validate(&self) -> Result<()> {
    require_text_if_present("crmv", self.crmv.as_deref())?;
    require_text_if_present("specialty", self.specialty.as_deref())
  }

  pub fn is_empty(&self) -> bool {
    self.crmv.is_none() && self.specialty.is_none()
  }

  pub fn apply_to(self, vet: &mut Vet) {
    if let Some(crmv) = self.crmv {
      vet.crmv = crmv;
    }
    if let Some(specialty) = self.specialty {
      vet.specialty = specialty;
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetDetails {
  #[serde(flatten)]
  pub vet: Vet,
  pub person: Person,
  pub appointments: Vec<Appointment>,
}

/// Veterinario con su persona; forma usada dentro de una cita.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetWithPerson {
  #[serde(flatten)]
  pub vet: Vet,
  pub person: Person,
}
