// appointment.rs
use crate::patch::apply_nullable;
use crate::pet::Pet;
use crate::vet::VetWithPerson;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cita entre una mascota y un veterinario. `petId` y `vetId` no se validan
/// en el dominio; las claves foráneas de la base de datos son las que
/// rechazan referencias colgantes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
  pub id: i32,
  pub date: DateTime<Utc>,
  pub reason: Option<String>,
  pub pet_id: i32,
  pub vet_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAppointment {
  pub date: DateTime<Utc>,
  pub reason: Option<String>,
  pub pet_id: i32,
  pub vet_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppointmentChanges {
  pub date: Option<DateTime<Utc>>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub reason: Option<Option<String>>,
  pub pet_id: Option<i32>,
  pub vet_id: Option<i32>,
}

impl AppointmentChanges {
  pub fn is_empty(&self) -> bool {
    self.date.is_none() && self.reason.is_none() && self.pet_id.is_none() && self.vet_id.is_none()
  }

  pub fn apply_to(self, appointment: &mut Appointment) {
    if let Some(date) = self.date {
      appointment.date = date;
    }
    apply_nullable(self.reason, &mut appointment.reason);
    if let Some(pet_id) = self.pet_id {
      appointment.pet_id = pet_id;
    }
    if let Some(vet_id) = self.vet_id {
      appointment.vet_id = vet_id;
    }
  }
}

/// Cita con la mascota y el veterinario (incluida su persona).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetails {
  #[serde(flatten)]
  pub appointment: Appointment,
  pub pet: Pet,
  pub vet: VetWithPerson,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn payload_uses_camel_case_and_rfc3339() {
    let input: NewAppointment = serde_json::from_value(json!({
      "date": "2025-03-01T09:30:00Z",
      "petId": 3,
      "vetId": 1
    })).expect("valid payload");
    assert_eq!(input.pet_id, 3);
    assert_eq!(input.reason, None);

    let appt = Appointment { id: 7, date: input.date, reason: None, pet_id: 3, vet_id: 1 };
    let v = serde_json::to_value(&appt).expect("serialize");
    assert_eq!(v["petId"], json!(3));
    assert_eq!(v["date"], json!("2025-03-01T09:30:00Z"));
  }

  #[test]
  fn unknown_fields_are_rejected() {
    let res = serde_json::from_value::<AppointmentChanges>(json!({"status": "done"}));
    assert!(res.is_err());
  }

  #[test]
  fn null_reason_is_a_change_but_absent_reason_is_not() {
    let cleared: AppointmentChanges = serde_json::from_value(json!({"reason": null})).expect("null reason");
    assert_eq!(cleared.reason, Some(None));
    assert!(!cleared.is_empty());

    let untouched: AppointmentChanges = serde_json::from_value(json!({"petId": 2})).expect("no reason");
    assert_eq!(untouched.reason, None);
  }
}
