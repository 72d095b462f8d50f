// person.rs
use crate::errors::Result;
use crate::patch::apply_nullable;
use crate::pet::Pet;
use crate::validators::{require_text, require_text_if_present};
use crate::vet::Vet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id: i32,
  pub name: String,
  pub email: Option<String>,
  pub phone: Option<String>,
}

/// Esquema de `POST /people`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPerson {
  pub name: String,
  pub email: Option<String>,
  pub phone: Option<String>,
}

impl NewPerson {
  pub fn validate(&self) -> Result<()> {
    require_text("name", &self.name)
  }
}

/// Esquema de `PUT /people/:id`; sólo cambian los campos presentes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonChanges {
  pub name: Option<String>,
  /// `null` borra el valor.
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub email: Option<Option<String>>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub phone: Option<Option<String>>,
}

impl PersonChanges {
  pub fn validate(&self) -> Result<()> {
    require_text_if_present("name", self.name.as_deref())
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.email.is_none() && self.phone.is_none()
  }

  pub fn apply_to(self, person: &mut Person) {
    if let Some(name) = self.name {
      person.name = name;
    }
    apply_nullable(self.email, &mut person.email);
    apply_nullable(self.phone, &mut person.phone);
  }
}

/// Persona con sus mascotas y su perfil de veterinario, si lo tiene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetails {
  #[serde(flatten)]
  pub person: Person,
  pub pets: Vec<Pet>,
  pub vet: Option<Vet>,
}
