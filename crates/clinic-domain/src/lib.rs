//! Crate `clinic-domain` — entidades, esquemas de entrada y reglas de la
//! clínica veterinaria.
//!
//! Expone los cuatro recursos (`Person`, `Pet`, `Vet`, `Appointment`), el
//! contrato de almacenamiento `ClinicRepository` con una implementación en
//! memoria (`InMemoryClinicRepository`), los validadores de integridad
//! referencial y `ClinicService`, que orquesta validar → consultar/mutar.
//!
//! Ejemplo rápido:
//! ```rust
//! use clinic_domain::{ClinicService, InMemoryClinicRepository, NewPerson};
//! use std::sync::Arc;
//! let service = ClinicService::new(Arc::new(InMemoryClinicRepository::new()));
//! let ana = service.create_person(NewPerson { name: "Ana".into(), email: None, phone: None }).unwrap();
//! assert_eq!(service.get_person(ana.id).unwrap().pets.len(), 0);
//! ```
mod appointment;
mod errors;
mod patch;
mod person;
mod pet;
mod repository;
mod resource;
mod service;
mod stubs;
mod vet;
pub mod validators;

pub use appointment::{Appointment, AppointmentChanges, AppointmentDetails, NewAppointment};
pub use errors::{DomainError, Result};
pub use person::{NewPerson, Person, PersonChanges, PersonDetails};
pub use pet::{NewPet, Pet, PetChanges, PetDetails};
pub use repository::{ClinicRepository, InMemoryClinicRepository};
pub use resource::{Deleted, Resource};
pub use service::ClinicService;
pub use stubs::ClinicStubs;
pub use vet::{NewVet, Vet, VetChanges, VetDetails, VetWithPerson};
