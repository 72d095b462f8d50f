// Filas Diesel de las tablas de la clínica y su conversión a entidades del
// dominio. El orden de los campos de cada `Queryable` sigue al de `schema.rs`.
use crate::schema::{appointments, people, pets, vets};
use chrono::NaiveDateTime;
use clinic_domain::{Appointment, AppointmentChanges, NewAppointment, NewPerson, NewPet, NewVet, Person, PersonChanges,
                    Pet, PetChanges, Vet, VetChanges};
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable)]
pub(crate) struct PersonRow {
  pub id: i32,
  pub name: String,
  pub email: Option<String>,
  pub phone: Option<String>,
}
#[derive(Debug, Insertable)]
#[diesel(table_name = people)]
pub(crate) struct NewPersonRow<'a> {
  pub name: &'a str,
  pub email: Option<&'a str>,
  pub phone: Option<&'a str>,
}
// `AsChangeset` omite los campos `None`; `Some(None)` escribe NULL.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = people)]
pub(crate) struct PersonChangeset<'a> {
  pub name: Option<&'a str>,
  pub email: Option<Option<&'a str>>,
  pub phone: Option<Option<&'a str>>,
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct PetRow {
  pub id: i32,
  pub name: String,
  pub species: String,
  pub breed: Option<String>,
  pub person_id: i32,
}
#[derive(Debug, Insertable)]
#[diesel(table_name = pets)]
pub(crate) struct NewPetRow<'a> {
  pub name: &'a str,
  pub species: &'a str,
  pub breed: Option<&'a str>,
  pub person_id: i32,
}
#[derive(Debug, AsChangeset)]
#[diesel(table_name = pets)]
pub(crate) struct PetChangeset<'a> {
  pub name: Option<&'a str>,
  pub species: Option<&'a str>,
  pub breed: Option<Option<&'a str>>,
  pub person_id: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = vets)]
pub(crate) struct VetRow {
  pub id: i32,
  pub crmv: String,
  pub specialty: String,
}
#[derive(Debug, AsChangeset)]
#[diesel(table_name = vets)]
pub(crate) struct VetChangeset<'a> {
  pub crmv: Option<&'a str>,
  pub specialty: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct AppointmentRow {
  pub id: i32,
  pub date: NaiveDateTime,
  pub reason: Option<String>,
  pub pet_id: i32,
  pub vet_id: i32,
}
// Las fechas se guardan como TIMESTAMP sin zona, siempre en UTC.
#[derive(Debug, Insertable)]
#[diesel(table_name = appointments)]
pub(crate) struct NewAppointmentRow<'a> {
  pub date: NaiveDateTime,
  pub reason: Option<&'a str>,
  pub pet_id: i32,
  pub vet_id: i32,
}
#[derive(Debug, AsChangeset)]
#[diesel(table_name = appointments)]
pub(crate) struct AppointmentChangeset<'a> {
  pub date: Option<NaiveDateTime>,
  pub reason: Option<Option<&'a str>>,
  pub pet_id: Option<i32>,
  pub vet_id: Option<i32>,
}

fn nullable_str(field: &Option<Option<String>>) -> Option<Option<&str>> {
  field.as_ref().map(|v| v.as_deref())
}

impl From<PersonRow> for Person {
  fn from(r: PersonRow) -> Self {
    Person { id: r.id, name: r.name, email: r.email, phone: r.phone }
  }
}
impl From<PetRow> for Pet {
  fn from(r: PetRow) -> Self {
    Pet { id: r.id, name: r.name, species: r.species, breed: r.breed, person_id: r.person_id }
  }
}
impl From<VetRow> for Vet {
  fn from(r: VetRow) -> Self {
    Vet { id: r.id, crmv: r.crmv, specialty: r.specialty }
  }
}
impl From<AppointmentRow> for Appointment {
  fn from(r: AppointmentRow) -> Self {
    Appointment { id: r.id, date: r.date.and_utc(), reason: r.reason, pet_id: r.pet_id, vet_id: r.vet_id }
  }
}

impl<'a> From<&'a NewPerson> for NewPersonRow<'a> {
  fn from(p: &'a NewPerson) -> Self {
    NewPersonRow { name: &p.name, email: p.email.as_deref(), phone: p.phone.as_deref() }
  }
}
impl<'a> From<&'a PersonChanges> for PersonChangeset<'a> {
  fn from(c: &'a PersonChanges) -> Self {
    PersonChangeset { name: c.name.as_deref(), email: nullable_str(&c.email), phone: nullable_str(&c.phone) }
  }
}
impl<'a> From<&'a NewPet> for NewPetRow<'a> {
  fn from(p: &'a NewPet) -> Self {
    NewPetRow { name: &p.name, species: &p.species, breed: p.breed.as_deref(), person_id: p.person_id }
  }
}
impl<'a> From<&'a PetChanges> for PetChangeset<'a> {
  fn from(c: &'a PetChanges) -> Self {
    PetChangeset { name: c.name.as_deref(),
                   species: c.species.as_deref(),
                   breed: nullable_str(&c.breed),
                   person_id: c.person_id }
  }
}
impl From<NewVet> for VetRow {
  fn from(v: NewVet) -> Self {
    VetRow { id: v.id, crmv: v.crmv, specialty: v.specialty }
  }
}
impl<'a> From<&'a VetChanges> for VetChangeset<'a> {
  fn from(c: &'a VetChanges) -> Self {
    VetChangeset { crmv: c.crmv.as_deref(), specialty: c.specialty.as_deref() }
  }
}
impl<'a> From<&'a NewAppointment> for NewAppointmentRow<'a> {
  fn from(a: &'a NewAppointment) -> Self {
    NewAppointmentRow { date: a.date.naive_utc(), reason: a.reason.as_deref(), pet_id: a.pet_id, vet_id: a.vet_id }
  }
}
impl<'a> From<&'a AppointmentChanges> for AppointmentChangeset<'a> {
  fn from(c: &'a AppointmentChanges) -> Self {
    AppointmentChangeset { date: c.date.map(|d| d.naive_utc()),
                           reason: nullable_str(&c.reason),
                           pet_id: c.pet_id,
                           vet_id: c.vet_id }
  }
}
