// pet.rs
use crate::appointment::Appointment;
use crate::errors::Result;
use crate::patch::apply_nullable;
use crate::person::Person;
use crate::validators::{require_text, require_text_if_present};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
  pub id: i32,
  pub name: String,
  pub species: String,
  pub breed: Option<String>,
  pub person_id: i32,
}

/// Esquema de `POST /pets`. `personId` debe existir antes de insertar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPet {
  pub name: String,
  pub species: String,
  pub breed: Option<String>,
  pub person_id: i32,
}

impl NewPet {
  pub fn validate(&self) -> Result<()> {
    require_text("name", &self.name)?;
    require_text("species", &self.species)
  }
}

/// Esquema de `PUT /pets/:id`. Un `personId` presente se valida igual que en
/// la creación.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PetChanges {
  pub name: Option<String>,
  pub species: Option<String>,
  /// `null` borra la raza.
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub breed: Option<Option<String>>,
  pub person_id: Option<i32>,
}

impl PetChanges {
  pub fn validate(&self) -> Result<()> {
    require_text_if_present("name", self.name.as_deref())?;
    require_text_if_present("species", self.species.as_deref())
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.species.is_none() && self.breed.is_none() && self.person_id.is_none()
  }

  pub fn apply_to(self, pet: &mut Pet) {
    if let Some(name) = self.name {
      pet.name = name;
    }
    if let Some(species) = self.species {
      pet.species = species;
    }
    apply_nullable(self.breed, &mut pet.breed);
    if let Some(person_id) = self.person_id {
      pet.person_id = person_id;
    }
  }
}

/// Mascota con su tutor y sus citas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetDetails {
  #[serde(flatten)]
  pub pet: Pet,
  pub person: Person,
  pub appointments: Vec<Appointment>,
}
