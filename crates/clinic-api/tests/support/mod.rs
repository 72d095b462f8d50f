use clinic_domain::{Appointment, AppointmentChanges, AppointmentDetails, ClinicRepository, DomainError, NewAppointment,
                    NewPerson, NewPet, NewVet, Person, PersonChanges, PersonDetails, Pet, PetChanges, PetDetails,
                    Result, Vet, VetChanges, VetDetails};

/// Repositorio que falla en todas las operaciones, como una base de datos
/// caída.
pub struct FaultyRepository {
  detail: String,
}

impl FaultyRepository {
  pub fn new(detail: &str) -> Self {
    Self { detail: detail.to_string() }
  }

  fn fail<T>(&self) -> Result<T> {
    Err(DomainError::Storage(self.detail.clone()))
  }
}

impl ClinicRepository for FaultyRepository {
  fn list_people(&self) -> Result<Vec<PersonDetails>> { self.fail() }
  fn find_person(&self, _id: i32) -> Result<Option<Person>> { self.fail() }
  fn get_person_details(&self, _id: i32) -> Result<Option<PersonDetails>> { self.fail() }
  fn insert_person(&self, _input: NewPerson) -> Result<Person> { self.fail() }
  fn update_person(&self, _id: i32, _changes: PersonChanges) -> Result<Person> { self.fail() }
  fn delete_person(&self, _id: i32) -> Result<()> { self.fail() }

  fn list_pets(&self) -> Result<Vec<PetDetails>> { self.fail() }
  fn find_pet(&self, _id: i32) -> Result<Option<Pet>> { self.fail() }
  fn get_pet_details(&self, _id: i32) -> Result<Option<PetDetails>> { self.fail() }
  fn insert_pet(&self, _input: NewPet) -> Result<Pet> { self.fail() }
  fn update_pet(&self, _id: i32, _changes: PetChanges) -> Result<Pet> { self.fail() }
  fn delete_pet(&self, _id: i32) -> Result<()> { self.fail() }

  fn list_vets(&self) -> Result<Vec<VetDetails>> { self.fail() }
  fn find_vet(&self, _id: i32) -> Result<Option<Vet>> { self.fail() }
  fn get_vet_details(&self, _id: i32) -> Result<Option<VetDetails>> { self.fail() }
  fn insert_vet(&self, _input: NewVet) -> Result<Vet> { self.fail() }
  fn update_vet(&self, _id: i32, _changes: VetChanges) -> Result<Vet> { self.fail() }
  fn delete_vet(&self, _id: i32) -> Result<()> { self.fail() }

  fn list_appointments(&self) -> Result<Vec<AppointmentDetails>> { self.fail() }
  fn find_appointment(&self, _id: i32) -> Result<Option<Appointment>> { self.fail() }
  fn get_appointment_details(&self, _id: i32) -> Result<Option<AppointmentDetails>> { self.fail() }
  fn insert_appointment(&self, _input: NewAppointment) -> Result<Appointment> { self.fail() }
  fn update_appointment(&self, _id: i32, _changes: AppointmentChanges) -> Result<Appointment> { self.fail() }
  fn delete_appointment(&self, _id: i32) -> Result<()> { self.fail() }
}
