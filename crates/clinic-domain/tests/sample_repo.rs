use clinic_domain::{ClinicService, ClinicStubs, DomainError, NewPet, PetChanges};
use std::sync::Arc;

#[test]
fn sample_repo_relations_are_consistent() -> Result<(), DomainError> {
  let repo = Arc::new(ClinicStubs::sample_repo()?);
  let svc = ClinicService::new(repo.clone());

  let people = svc.list_people()?;
  assert_eq!(people.len(), 2);
  assert_eq!(people[0].pets.len(), 1);
  assert!(people[0].vet.is_none());
  assert_eq!(people[1].vet.as_ref().map(|v| v.id), Some(people[1].person.id));

  let appt = svc.get_appointment(1)?;
  assert_eq!(appt.pet.name, "Rex");
  assert_eq!(appt.vet.person.name, "Dra. Beatriz Silva");

  let vet = svc.get_vet(2)?;
  assert_eq!(vet.appointments.len(), 1);
  assert_eq!(vet.person.id, 2);
  Ok(())
}

#[test]
fn moving_a_pet_between_owners() -> Result<(), DomainError> {
  let repo = Arc::new(ClinicStubs::sample_repo()?);
  let svc = ClinicService::new(repo.clone());

  let luna = svc.create_pet(NewPet { name: "Luna".into(), species: "cat".into(), breed: None, person_id: 1 })?;
  assert_eq!(svc.get_person(1)?.pets.len(), 2);

  let moved = svc.update_pet(luna.id, PetChanges { person_id: Some(2), ..PetChanges::default() })?;
  assert_eq!(moved.person_id, 2);
  assert_eq!(moved.name, "Luna");
  assert_eq!(svc.get_person(1)?.pets.len(), 1);
  assert_eq!(svc.get_pet(luna.id)?.person.id, 2);
  Ok(())
}

#[test]
fn deleting_a_person_with_pets_is_a_storage_fault() -> Result<(), DomainError> {
  let svc = ClinicService::new(Arc::new(ClinicStubs::sample_repo()?));
  match svc.delete_person(1) {
    Err(DomainError::Storage(_)) => {}
    other => panic!("expected storage error from restrict foreign key, got: {:?}", other),
  }
  assert!(svc.get_person(1).is_ok());
  Ok(())
}
