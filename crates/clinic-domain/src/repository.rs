use crate::errors::{DomainError, Result};
use crate::{Appointment, AppointmentChanges, AppointmentDetails, NewAppointment, NewPerson, NewPet, NewVet, Person,
            PersonChanges, PersonDetails, Pet, PetChanges, PetDetails, Vet, VetChanges, VetDetails, VetWithPerson};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Contrato del almacenamiento relacional de la clínica.
///
/// Cada método es una única consulta o mutación. Las comprobaciones de
/// existencia y de integridad referencial del dominio las hace
/// `ClinicService`; las implementaciones sólo deben respetar las claves
/// foráneas del esquema (restrict), devolviendo `DomainError::Storage` cuando
/// una escritura las rompe.
pub trait ClinicRepository: Send + Sync {
    /// Todas las personas, ordenadas por id, con `pets` y `vet`.
    fn list_people(&self) -> Result<Vec<PersonDetails>>;
    /// Búsqueda por clave sin relaciones (comprobaciones de existencia).
    fn find_person(&self, id: i32) -> Result<Option<Person>>;
    fn get_person_details(&self, id: i32) -> Result<Option<PersonDetails>>;
    fn insert_person(&self, input: NewPerson) -> Result<Person>;
    fn update_person(&self, id: i32, changes: PersonChanges) -> Result<Person>;
    fn delete_person(&self, id: i32) -> Result<()>;

    fn list_pets(&self) -> Result<Vec<PetDetails>>;
    fn find_pet(&self, id: i32) -> Result<Option<Pet>>;
    fn get_pet_details(&self, id: i32) -> Result<Option<PetDetails>>;
    fn insert_pet(&self, input: NewPet) -> Result<Pet>;
    fn update_pet(&self, id: i32, changes: PetChanges) -> Result<Pet>;
    fn delete_pet(&self, id: i32) -> Result<()>;

    fn list_vets(&self) -> Result<Vec<VetDetails>>;
    fn find_vet(&self, id: i32) -> Result<Option<Vet>>;
    fn get_vet_details(&self, id: i32) -> Result<Option<VetDetails>>;
    /// Inserta con el id explícito de la persona.
    fn insert_vet(&self, input: NewVet) -> Result<Vet>;
    fn update_vet(&self, id: i32, changes: VetChanges) -> Result<Vet>;
    fn delete_vet(&self, id: i32) -> Result<()>;

    fn list_appointments(&self) -> Result<Vec<AppointmentDetails>>;
    fn find_appointment(&self, id: i32) -> Result<Option<Appointment>>;
    fn get_appointment_details(&self, id: i32) -> Result<Option<AppointmentDetails>>;
    fn insert_appointment(&self, input: NewAppointment) -> Result<Appointment>;
    fn update_appointment(&self, id: i32, changes: AppointmentChanges) -> Result<Appointment>;
    fn delete_appointment(&self, id: i32) -> Result<()>;
}

#[derive(Debug, Default)]
struct Tables {
    people: BTreeMap<i32, Person>,
    pets: BTreeMap<i32, Pet>,
    vets: BTreeMap<i32, Vet>,
    appointments: BTreeMap<i32, Appointment>,
    next_person_id: i32,
    next_pet_id: i32,
    next_appointment_id: i32,
}

fn fk_violation(constraint: &str) -> DomainError {
    DomainError::Storage(format!("FOREIGN KEY constraint failed ({})", constraint))
}

fn missing_row(table: &str, id: i32) -> DomainError {
    DomainError::Storage(format!("no row in {} with id {}", table, id))
}

impl Tables {
    fn person_details(&self, person: &Person) -> PersonDetails {
        PersonDetails { person: person.clone(),
                        pets: self.pets.values().filter(|p| p.person_id == person.id).cloned().collect(),
                        vet: self.vets.get(&person.id).cloned() }
    }

    fn pet_details(&self, pet: &Pet) -> Result<PetDetails> {
        let person = self.people.get(&pet.person_id).cloned().ok_or_else(|| fk_violation("pets.person_id"))?;
        Ok(PetDetails { pet: pet.clone(),
                        person,
                        appointments: self.appointments.values().filter(|a| a.pet_id == pet.id).cloned().collect() })
    }

    fn vet_with_person(&self, vet: &Vet) -> Result<VetWithPerson> {
        let person = self.people.get(&vet.id).cloned().ok_or_else(|| fk_violation("vets.id"))?;
        Ok(VetWithPerson { vet: vet.clone(), person })
    }

    fn vet_details(&self, vet: &Vet) -> Result<VetDetails> {
        let VetWithPerson { vet, person } = self.vet_with_person(vet)?;
        let appointments = self.appointments.values().filter(|a| a.vet_id == vet.id).cloned().collect();
        Ok(VetDetails { vet, person, appointments })
    }

    fn appointment_details(&self, appointment: &Appointment) -> Result<AppointmentDetails> {
        let pet = self.pets.get(&appointment.pet_id).cloned().ok_or_else(|| fk_violation("appointments.pet_id"))?;
        let vet = self.vets.get(&appointment.vet_id).ok_or_else(|| fk_violation("appointments.vet_id"))?;
        Ok(AppointmentDetails { appointment: appointment.clone(), pet, vet: self.vet_with_person(vet)? })
    }

    fn check_appointment_refs(&self, pet_id: i32, vet_id: i32) -> Result<()> {
        if !self.pets.contains_key(&pet_id) {
            return Err(fk_violation("appointments.pet_id"));
        }
        if !self.vets.contains_key(&vet_id) {
            return Err(fk_violation("appointments.vet_id"));
        }
        Ok(())
    }
}

/// Implementación en memoria para tests y desarrollo.
///
/// Imita al almacenamiento relacional: ids autoincrementales, listados en
/// orden de id y claves foráneas con semántica restrict.
#[derive(Debug, Default)]
pub struct InMemoryClinicRepository {
    tables: Mutex<Tables>,
}

impl InMemoryClinicRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Helper to map poisoned mutex errors into DomainError
    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|e| DomainError::Storage(format!("Mutex 'tables' poisoned: {}", e)))
    }

    /// Número de filas por tabla: (people, pets, vets, appointments).
    pub fn row_counts(&self) -> Result<(usize, usize, usize, usize)> {
        let t = self.lock()?;
        Ok((t.people.len(), t.pets.len(), t.vets.len(), t.appointments.len()))
    }
}

impl ClinicRepository for InMemoryClinicRepository {
    fn list_people(&self) -> Result<Vec<PersonDetails>> {
        let t = self.lock()?;
        Ok(t.people.values().map(|p| t.person_details(p)).collect())
    }

    fn find_person(&self, id: i32) -> Result<Option<Person>> {
        Ok(self.lock()?.people.get(&id).cloned())
    }

    fn get_person_details(&self, id: i32) -> Result<Option<PersonDetails>> {
        let t = self.lock()?;
        Ok(t.people.get(&id).map(|p| t.person_details(p)))
    }

    fn insert_person(&self, input: NewPerson) -> Result<Person> {
        let mut t = self.lock()?;
        t.next_person_id += 1;
        let person = Person { id: t.next_person_id, name: input.name, email: input.email, phone: input.phone };
        t.people.insert(person.id, person.clone());
        Ok(person)
    }

    fn update_person(&self, id: i32, changes: PersonChanges) -> Result<Person> {
        let mut t = self.lock()?;
        let person = t.people.get_mut(&id).ok_or_else(|| missing_row("people", id))?;
        changes.apply_to(person);
        Ok(person.clone())
    }

    fn delete_person(&self, id: i32) -> Result<()> {
        let mut t = self.lock()?;
        if t.pets.values().any(|p| p.person_id == id) {
            return Err(fk_violation("pets.person_id"));
        }
        if t.vets.contains_key(&id) {
            return Err(fk_violation("vets.id"));
        }
        t.people.remove(&id).map(|_| ()).ok_or_else(|| missing_row("people", id))
    }

    fn list_pets(&self) -> Result<Vec<PetDetails>> {
        let t = self.lock()?;
        t.pets.values().map(|p| t.pet_details(p)).collect()
    }

    fn find_pet(&self, id: i32) -> Result<Option<Pet>> {
        Ok(self.lock()?.pets.get(&id).cloned())
    }

    fn get_pet_details(&self, id: i32) -> Result<Option<PetDetails>> {
        let t = self.lock()?;
        t.pets.get(&id).map(|p| t.pet_details(p)).transpose()
    }

    fn insert_pet(&self, input: NewPet) -> Result<Pet> {
        let mut t = self.lock()?;
        if !t.people.contains_key(&input.person_id) {
            return Err(fk_violation("pets.person_id"));
        }
        t.next_pet_id += 1;
        let pet = Pet { id: t.next_pet_id,
                        name: input.name,
                        species: input.species,
                        breed: input.breed,
                        person_id: input.person_id };
        t.pets.insert(pet.id, pet.clone());
        Ok(pet)
    }

    fn update_pet(&self, id: i32, changes: PetChanges) -> Result<Pet> {
        let mut t = self.lock()?;
        if let Some(person_id) = changes.person_id {
            if !t.people.contains_key(&person_id) {
                return Err(fk_violation("pets.person_id"));
            }
        }
        let pet = t.pets.get_mut(&id).ok_or_else(|| missing_row("pets", id))?;
        changes.apply_to(pet);
        Ok(pet.clone())
    }

    fn delete_pet(&self, id: i32) -> Result<()> {
        let mut t = self.lock()?;
        if t.appointments.values().any(|a| a.pet_id == id) {
            return Err(fk_violation("appointments.pet_id"));
        }
        t.pets.remove(&id).map(|_| ()).ok_or_else(|| missing_row("pets", id))
    }

    fn list_vets(&self) -> Result<Vec<VetDetails>> {
        let t = self.lock()?;
        t.vets.values().map(|v| t.vet_details(v)).collect()
    }

    fn find_vet(&self, id: i32) -> Result<Option<Vet>> {
        Ok(self.lock()?.vets.get(&id).cloned())
    }

    fn get_vet_details(&self, id: i32) -> Result<Option<VetDetails>> {
        let t = self.lock()?;
        t.vets.get(&id).map(|v| t.vet_details(v)).transpose()
    }

    fn insert_vet(&self, input: NewVet) -> Result<Vet> {
        let mut t = self.lock()?;
        if !t.people.contains_key(&input.id) {
            return Err(fk_violation("vets.id"));
        }
        if t.vets.contains_key(&input.id) {
            return Err(DomainError::Storage(format!("UNIQUE constraint failed: vets.id ({})", input.id)));
        }
        let vet = Vet { id: input.id, crmv: input.crmv, specialty: input.specialty };
        t.vets.insert(vet.id, vet.clone());
        Ok(vet)
    }

    fn update_vet(&self, id: i32, changes: VetChanges) -> Result<Vet> {
        let mut t = self.lock()?;
        let vet = t.vets.get_mut(&id).ok_or_else(|| missing_row("vets", id))?;
        changes.apply_to(vet);
        Ok(vet.clone())
    }

    fn delete_vet(&self, id: i32) -> Result<()> {
        let mut t = self.lock()?;
        if t.appointments.values().any(|a| a.vet_id == id) {
            return Err(fk_violation("appointments.vet_id"));
        }
        t.vets.remove(&id).map(|_| ()).ok_or_else(|| missing_row("vets", id))
    }

    fn list_appointments(&self) -> Result<Vec<AppointmentDetails>> {
        let t = self.lock()?;
        t.appointments.values().map(|a| t.appointment_details(a)).collect()
    }

    fn find_appointment(&self, id: i32) -> Result<Option<Appointment>> {
        Ok(self.lock()?.appointments.get(&id).cloned())
    }

    fn get_appointment_details(&self, id: i32) -> Result<Option<AppointmentDetails>> {
        let t = self.lock()?;
        t.appointments.get(&id).map(|a| t.appointment_details(a)).transpose()
    }

    fn insert_appointment(&self, input: NewAppointment) -> Result<Appointment> {
        let mut t = self.lock()?;
        t.check_appointment_refs(input.pet_id, input.vet_id)?;
        t.next_appointment_id += 1;
        let appointment = Appointment { id: t.next_appointment_id,
                                        date: input.date,
                                        reason: input.reason,
                                        pet_id: input.pet_id,
                                        vet_id: input.vet_id };
        t.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    fn update_appointment(&self, id: i32, changes: AppointmentChanges) -> Result<Appointment> {
        let mut t = self.lock()?;
        let mut updated = t.appointments.get(&id).cloned().ok_or_else(|| missing_row("appointments", id))?;
        changes.apply_to(&mut updated);
        t.check_appointment_refs(updated.pet_id, updated.vet_id)?;
        t.appointments.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete_appointment(&self, id: i32) -> Result<()> {
        let mut t = self.lock()?;
        t.appointments.remove(&id).map(|_| ()).ok_or_else(|| missing_row("appointments", id))
    }
}
