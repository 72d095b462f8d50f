// Archivo: service.rs
// Propósito: implementar `ClinicService`, la capa que orquesta cada operación
// de los cuatro recursos: validar el payload, comprobar existencia e
// integridad referencial y delegar la consulta/mutación al repositorio. La
// invocan los handlers HTTP.
use crate::errors::{DomainError, Result};
use crate::repository::ClinicRepository;
use crate::resource::{Deleted, Resource};
use crate::validators::{ensure_person_exists, PersonReference};
use crate::{Appointment, AppointmentChanges, AppointmentDetails, NewAppointment, NewPerson, NewPet, NewVet, Person,
            PersonChanges, PersonDetails, Pet, PetChanges, PetDetails, Vet, VetChanges, VetDetails};
use std::sync::Arc;

/// Servicio de alto nivel sobre el repositorio de la clínica.
///
/// Las llamadas al repositorio dentro de una operación son secuenciales
/// (comprobación y después escritura) y no forman una transacción.
#[derive(Clone)]
pub struct ClinicService {
    repo: Arc<dyn ClinicRepository>,
}

fn found<T>(row: Option<T>, resource: Resource) -> Result<T> {
    row.ok_or_else(|| DomainError::NotFound(resource.not_found_message()))
}

impl ClinicService {
    /// Crea el servicio inyectando el repositorio.
    pub fn new(repo: Arc<dyn ClinicRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &dyn ClinicRepository {
        self.repo.as_ref()
    }

    // --- people ---

    pub fn list_people(&self) -> Result<Vec<PersonDetails>> {
        self.repo.list_people()
    }

    pub fn get_person(&self, id: i32) -> Result<PersonDetails> {
        found(self.repo.get_person_details(id)?, Resource::Person)
    }

    pub fn create_person(&self, input: NewPerson) -> Result<Person> {
        input.validate()?;
        self.repo.insert_person(input)
    }

    pub fn update_person(&self, id: i32, changes: PersonChanges) -> Result<Person> {
        let current = found(self.repo.find_person(id)?, Resource::Person)?;
        changes.validate()?;
        if changes.is_empty() {
            return Ok(current);
        }
        self.repo.update_person(id, changes)
    }

    /// No comprueba dependientes: si la persona tiene mascotas o perfil de
    /// veterinario el almacenamiento rechaza el borrado.
    pub fn delete_person(&self, id: i32) -> Result<Deleted> {
        found(self.repo.find_person(id)?, Resource::Person)?;
        self.repo.delete_person(id)?;
        Ok(Deleted::of(Resource::Person))
    }

    // --- pets ---

    pub fn list_pets(&self) -> Result<Vec<PetDetails>> {
        self.repo.list_pets()
    }

    pub fn get_pet(&self, id: i32) -> Result<PetDetails> {
        found(self.repo.get_pet_details(id)?, Resource::Pet)
    }

    /// El tutor debe existir antes de insertar; si no, no se escribe nada.
    pub fn create_pet(&self, input: NewPet) -> Result<Pet> {
        input.validate()?;
        ensure_person_exists(self.repository(), input.person_id, PersonReference::PetOwner)?;
        self.repo.insert_pet(input)
    }

    pub fn update_pet(&self, id: i32, changes: PetChanges) -> Result<Pet> {
        let current = found(self.repo.find_pet(id)?, Resource::Pet)?;
        changes.validate()?;
        if let Some(person_id) = changes.person_id {
            ensure_person_exists(self.repository(), person_id, PersonReference::NewPetOwner)?;
        }
        if changes.is_empty() {
            return Ok(current);
        }
        self.repo.update_pet(id, changes)
    }

    pub fn delete_pet(&self, id: i32) -> Result<Deleted> {
        found(self.repo.find_pet(id)?, Resource::Pet)?;
        self.repo.delete_pet(id)?;
        Ok(Deleted::of(Resource::Pet))
    }

    // --- vets ---

    pub fn list_vets(&self) -> Result<Vec<VetDetails>> {
        self.repo.list_vets()
    }

    pub fn get_vet(&self, id: i32) -> Result<VetDetails> {
        found(self.repo.get_vet_details(id)?, Resource::Vet)
    }

    /// El `id` del veterinario es el de una persona existente.
    pub fn create_vet(&self, input: NewVet) -> Result<Vet> {
        input.validate()?;
        ensure_person_exists(self.repository(), input.id, PersonReference::VetIdentity)?;
        self.repo.insert_vet(input)
    }

    pub fn update_vet(&self, id: i32, changes: VetChanges) -> Result<Vet> {
        let current = found(self.repo.find_vet(id)?, Resource::Vet)?;
        changes.validate()?;
        if changes.is_empty() {
            return Ok(current);
        }
        self.repo.update_vet(id, changes)
    }

    pub fn delete_vet(&self, id: i32) -> Result<Deleted> {
        found(self.repo.find_vet(id)?, Resource::Vet)?;
        self.repo.delete_vet(id)?;
        Ok(Deleted::of(Resource::Vet))
    }

    // --- appointments ---

    pub fn list_appointments(&self) -> Result<Vec<AppointmentDetails>> {
        self.repo.list_appointments()
    }

    pub fn get_appointment(&self, id: i32) -> Result<AppointmentDetails> {
        found(self.repo.get_appointment_details(id)?, Resource::Appointment)
    }

    /// `petId` y `vetId` no se validan aquí.
    pub fn create_appointment(&self, input: NewAppointment) -> Result<Appointment> {
        self.repo.insert_appointment(input)
    }

    pub fn update_appointment(&self, id: i32, changes: AppointmentChanges) -> Result<Appointment> {
        let current = found(self.repo.find_appointment(id)?, Resource::Appointment)?;
        if changes.is_empty() {
            return Ok(current);
        }
        self.repo.update_appointment(id, changes)
    }

    pub fn delete_appointment(&self, id: i32) -> Result<Deleted> {
        found(self.repo.find_appointment(id)?, Resource::Appointment)?;
        self.repo.delete_appointment(id)?;
        Ok(Deleted::of(Resource::Appointment))
    }
}
