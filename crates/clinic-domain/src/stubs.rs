use crate::errors::Result;
use crate::repository::{ClinicRepository, InMemoryClinicRepository};
use crate::{NewAppointment, NewPerson, NewPet, NewVet};
use chrono::{TimeZone, Utc};

pub struct ClinicStubs;

impl ClinicStubs {
    /// Crea un repositorio en memoria pre-poblado:
    /// - persona 1 "Ana Costa" con la mascota 1 "Rex"
    /// - persona 2 "Dra. Beatriz Silva", también veterinaria (id 2)
    /// - cita 1 entre Rex y la veterinaria 2
    pub fn sample_repo() -> Result<InMemoryClinicRepository> {
        let repo = InMemoryClinicRepository::new();

        let owner = repo.insert_person(NewPerson { name: "Ana Costa".into(),
                                                   email: Some("ana@example.com".into()),
                                                   phone: Some("+55 11 99999-0001".into()) })?;
        let doctor = repo.insert_person(NewPerson { name: "Dra. Beatriz Silva".into(),
                                                    email: Some("beatriz@example.com".into()),
                                                    phone: None })?;
        let rex = repo.insert_pet(NewPet { name: "Rex".into(),
                                           species: "dog".into(),
                                           breed: Some("Labrador".into()),
                                           person_id: owner.id })?;
        let vet = repo.insert_vet(NewVet { id: doctor.id, crmv: "SP-12345".into(), specialty: "Surgery".into() })?;
        // Fecha fija para que los tests puedan compararla.
        let date = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0)
                      .single()
                      .ok_or_else(|| crate::DomainError::Validation("fecha de ejemplo inválida".into()))?;
        repo.insert_appointment(NewAppointment { date,
                                                 reason: Some("Annual check-up".into()),
                                                 pet_id: rex.id,
                                                 vet_id: vet.id })?;
        Ok(repo)
    }
}
