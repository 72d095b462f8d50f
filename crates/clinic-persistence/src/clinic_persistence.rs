use crate::rows::{AppointmentChangeset, AppointmentRow, NewAppointmentRow, NewPersonRow, NewPetRow, PersonChangeset,
                  PersonRow, PetChangeset, PetRow, VetChangeset, VetRow};
use crate::schema::{appointments, people, pets, vets};
use clinic_domain::{Appointment, AppointmentChanges, AppointmentDetails, ClinicRepository, DomainError, NewAppointment,
                    NewPerson, NewPet, NewVet, Person, PersonChanges, PersonDetails, Pet, PetChanges, PetDetails, Vet,
                    VetChanges, VetDetails, VetWithPerson};
#[cfg(not(feature = "pg"))]
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::Error as DieselError;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

#[cfg(feature = "pg")]
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations/postgres");
#[cfg(not(feature = "pg"))]
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations/sqlite");
#[cfg(feature = "pg")]
type DbConn = PgConnection;
#[cfg(not(feature = "pg"))]
type DbConn = SqliteConnection;
type DbPool = Pool<ConnectionManager<DbConn>>;

type Result<T> = std::result::Result<T, DomainError>;

pub const DEFAULT_POOL_SIZE: u32 = 4;

// SQLite no aplica claves foráneas salvo que se pida en cada conexión.
#[cfg(not(feature = "pg"))]
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;
#[cfg(not(feature = "pg"))]
impl diesel::r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
    conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
        .map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Repo Diesel que implementa `ClinicRepository`.
#[derive(Clone)]
pub struct DieselClinicRepository {
  pool: Arc<DbPool>,
}
impl DieselClinicRepository {
  /// Crea el pool, aplica las migraciones embebidas y devuelve el repo.
  pub fn connect(database_url: &str, pool_size: u32) -> Result<Self> {
    let manager = ConnectionManager::<DbConn>::new(database_url);
    let builder = Pool::builder().max_size(pool_size);
    #[cfg(not(feature = "pg"))]
    let builder = builder.connection_customizer(Box::new(SqlitePragmas));
    let pool = builder.build(manager).map_err(|e| DomainError::Storage(format!("pool: {}", e)))?;
    let repo = DieselClinicRepository { pool: Arc::new(pool) };
    repo.prepare()?;
    Ok(repo)
  }
  fn prepare(&self) -> Result<()> {
    let mut c = self.conn()?;
    enable_wal(&mut c);
    let applied = c.run_pending_migrations(MIGRATIONS)
                   .map_err(|e| DomainError::Storage(format!("migrations: {}", e)))?;
    if !applied.is_empty() {
      log::info!("clinic-persistence: {} migración(es) aplicada(s)", applied.len());
    }
    Ok(())
  }
  fn conn(&self) -> Result<PooledConnection<ConnectionManager<DbConn>>> {
    self.pool.get().map_err(|e| DomainError::Storage(format!("pool: {}", e)))
  }
}

#[cfg(not(feature = "pg"))]
fn enable_wal(conn: &mut DbConn) {
  if let Err(e) = conn.batch_execute("PRAGMA journal_mode = WAL;") {
    log::warn!("clinic-persistence: no se pudo activar WAL: {}", e);
  }
}
#[cfg(feature = "pg")]
fn enable_wal(_conn: &mut DbConn) {}

fn map_db_err<T>(res: std::result::Result<T, DieselError>) -> Result<T> {
  res.map_err(|e| DomainError::Storage(format!("db: {}", e)))
}
fn missing_row(table: &str, id: i32) -> DomainError {
  DomainError::Storage(format!("no row in {} with id {}", table, id))
}
fn group_by<T, K: Hash + Eq>(items: Vec<T>, key: impl Fn(&T) -> K) -> HashMap<K, Vec<T>> {
  let mut out: HashMap<K, Vec<T>> = HashMap::new();
  for item in items {
    out.entry(key(&item)).or_default().push(item);
  }
  out
}
fn into_domain<R, T: From<R>>(rows: Option<Vec<R>>) -> Vec<T> {
  rows.unwrap_or_default().into_iter().map(T::from).collect()
}
fn load_people_by_id(conn: &mut DbConn, ids: &[i32]) -> Result<HashMap<i32, Person>> {
  let rows = map_db_err(people::table.filter(people::id.eq_any(ids)).load::<PersonRow>(conn))?;
  Ok(rows.into_iter().map(|r| (r.id, Person::from(r))).collect())
}

// Relaciones ansiosas: una consulta por tabla relacionada, agrupada en memoria.
fn people_details(conn: &mut DbConn, rows: Vec<PersonRow>) -> Result<Vec<PersonDetails>> {
  let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
  let pet_rows =
    map_db_err(pets::table.filter(pets::person_id.eq_any(&ids)).order(pets::id.asc()).load::<PetRow>(conn))?;
  let mut pets_by_owner = group_by(pet_rows, |p| p.person_id);
  let vet_rows = map_db_err(vets::table.filter(vets::id.eq_any(&ids)).load::<VetRow>(conn))?;
  let mut vets_by_id: HashMap<i32, VetRow> = vet_rows.into_iter().map(|v| (v.id, v)).collect();
  Ok(rows.into_iter()
         .map(|r| PersonDetails { pets: into_domain(pets_by_owner.remove(&r.id)),
                                  vet: vets_by_id.remove(&r.id).map(Vet::from),
                                  person: Person::from(r) })
         .collect())
}
fn pet_details(conn: &mut DbConn, rows: Vec<PetRow>) -> Result<Vec<PetDetails>> {
  let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
  let owner_ids: Vec<i32> = rows.iter().map(|r| r.person_id).collect();
  let owners = load_people_by_id(conn, &owner_ids)?;
  let appt_rows = map_db_err(appointments::table.filter(appointments::pet_id.eq_any(&ids))
                                                .order(appointments::id.asc())
                                                .load::<AppointmentRow>(conn))?;
  let mut appts_by_pet = group_by(appt_rows, |a| a.pet_id);
  rows.into_iter()
      .map(|r| -> Result<PetDetails> {
        let person = owners.get(&r.person_id).cloned().ok_or_else(|| missing_row("people", r.person_id))?;
        Ok(PetDetails { appointments: into_domain(appts_by_pet.remove(&r.id)), person, pet: Pet::from(r) })
      })
      .collect()
}
fn vet_details(conn: &mut DbConn, rows: Vec<VetRow>) -> Result<Vec<VetDetails>> {
  let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
  let persons = load_people_by_id(conn, &ids)?;
  let appt_rows = map_db_err(appointments::table.filter(appointments::vet_id.eq_any(&ids))
                                                .order(appointments::id.asc())
                                                .load::<AppointmentRow>(conn))?;
  let mut appts_by_vet = group_by(appt_rows, |a| a.vet_id);
  rows.into_iter()
      .map(|r| -> Result<VetDetails> {
        let person = persons.get(&r.id).cloned().ok_or_else(|| missing_row("people", r.id))?;
        Ok(VetDetails { appointments: into_domain(appts_by_vet.remove(&r.id)), person, vet: Vet::from(r) })
      })
      .collect()
}
fn appointment_details(conn: &mut DbConn, rows: Vec<AppointmentRow>) -> Result<Vec<AppointmentDetails>> {
  let pet_ids: Vec<i32> = rows.iter().map(|r| r.pet_id).collect();
  let vet_ids: Vec<i32> = rows.iter().map(|r| r.vet_id).collect();
  let pets_by_id: HashMap<i32, Pet> =
    map_db_err(pets::table.filter(pets::id.eq_any(&pet_ids)).load::<PetRow>(conn))?.into_iter()
                                                                                  .map(|p| (p.id, Pet::from(p)))
                                                                                  .collect();
  let vets_by_id: HashMap<i32, Vet> =
    map_db_err(vets::table.filter(vets::id.eq_any(&vet_ids)).load::<VetRow>(conn))?.into_iter()
                                                                                  .map(|v| (v.id, Vet::from(v)))
                                                                                  .collect();
  let vet_people = load_people_by_id(conn, &vet_ids)?;
  rows.into_iter()
      .map(|r| -> Result<AppointmentDetails> {
        let pet = pets_by_id.get(&r.pet_id).cloned().ok_or_else(|| missing_row("pets", r.pet_id))?;
        let vet = vets_by_id.get(&r.vet_id).cloned().ok_or_else(|| missing_row("vets", r.vet_id))?;
        let person = vet_people.get(&r.vet_id).cloned().ok_or_else(|| missing_row("people", r.vet_id))?;
        Ok(AppointmentDetails { appointment: Appointment::from(r), pet, vet: VetWithPerson { vet, person } })
      })
      .collect()
}
fn deleted(affected: usize, table: &str, id: i32) -> Result<()> {
  if affected == 0 {
    return Err(missing_row(table, id));
  }
  Ok(())
}

impl ClinicRepository for DieselClinicRepository {
  fn list_people(&self) -> Result<Vec<PersonDetails>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(people::table.order(people::id.asc()).load::<PersonRow>(&mut conn))?;
    people_details(&mut conn, rows)
  }
  fn find_person(&self, id: i32) -> Result<Option<Person>> {
    let mut conn = self.conn()?;
    let opt = map_db_err(people::table.find(id).first::<PersonRow>(&mut conn).optional())?;
    Ok(opt.map(Person::from))
  }
  fn get_person_details(&self, id: i32) -> Result<Option<PersonDetails>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(people::table.find(id).load::<PersonRow>(&mut conn))?;
    Ok(people_details(&mut conn, rows)?.pop())
  }
  fn insert_person(&self, input: NewPerson) -> Result<Person> {
    let mut conn = self.conn()?;
    let row = map_db_err(diesel::insert_into(people::table).values(NewPersonRow::from(&input))
                                                           .get_result::<PersonRow>(&mut conn))?;
    Ok(row.into())
  }
  fn update_person(&self, id: i32, changes: PersonChanges) -> Result<Person> {
    let mut conn = self.conn()?;
    // Un changeset vacío no es SQL válido para Diesel.
    let row = if changes.is_empty() {
      map_db_err(people::table.find(id).first::<PersonRow>(&mut conn))?
    } else {
      map_db_err(diesel::update(people::table.find(id)).set(PersonChangeset::from(&changes))
                                                        .get_result::<PersonRow>(&mut conn))?
    };
    Ok(row.into())
  }
  fn delete_person(&self, id: i32) -> Result<()> {
    let mut conn = self.conn()?;
    deleted(map_db_err(diesel::delete(people::table.find(id)).execute(&mut conn))?, "people", id)
  }

  fn list_pets(&self) -> Result<Vec<PetDetails>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(pets::table.order(pets::id.asc()).load::<PetRow>(&mut conn))?;
    pet_details(&mut conn, rows)
  }
  fn find_pet(&self, id: i32) -> Result<Option<Pet>> {
    let mut conn = self.conn()?;
    let opt = map_db_err(pets::table.find(id).first::<PetRow>(&mut conn).optional())?;
    Ok(opt.map(Pet::from))
  }
  fn get_pet_details(&self, id: i32) -> Result<Option<PetDetails>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(pets::table.find(id).load::<PetRow>(&mut conn))?;
    Ok(pet_details(&mut conn, rows)?.pop())
  }
  fn insert_pet(&self, input: NewPet) -> Result<Pet> {
    let mut conn = self.conn()?;
    let row =
      map_db_err(diesel::insert_into(pets::table).values(NewPetRow::from(&input)).get_result::<PetRow>(&mut conn))?;
    Ok(row.into())
  }
  fn update_pet(&self, id: i32, changes: PetChanges) -> Result<Pet> {
    let mut conn = self.conn()?;
    let row = if changes.is_empty() {
      map_db_err(pets::table.find(id).first::<PetRow>(&mut conn))?
    } else {
      map_db_err(diesel::update(pets::table.find(id)).set(PetChangeset::from(&changes))
                                                      .get_result::<PetRow>(&mut conn))?
    };
    Ok(row.into())
  }
  fn delete_pet(&self, id: i32) -> Result<()> {
    let mut conn = self.conn()?;
    deleted(map_db_err(diesel::delete(pets::table.find(id)).execute(&mut conn))?, "pets", id)
  }

  fn list_vets(&self) -> Result<Vec<VetDetails>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(vets::table.order(vets::id.asc()).load::<VetRow>(&mut conn))?;
    vet_details(&mut conn, rows)
  }
  fn find_vet(&self, id: i32) -> Result<Option<Vet>> {
    let mut conn = self.conn()?;
    let opt = map_db_err(vets::table.find(id).first::<VetRow>(&mut conn).optional())?;
    Ok(opt.map(Vet::from))
  }
  fn get_vet_details(&self, id: i32) -> Result<Option<VetDetails>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(vets::table.find(id).load::<VetRow>(&mut conn))?;
    Ok(vet_details(&mut conn, rows)?.pop())
  }
  fn insert_vet(&self, input: NewVet) -> Result<Vet> {
    let mut conn = self.conn()?;
    let row =
      map_db_err(diesel::insert_into(vets::table).values(VetRow::from(input)).get_result::<VetRow>(&mut conn))?;
    Ok(row.into())
  }
  fn update_vet(&self, id: i32, changes: VetChanges) -> Result<Vet> {
    let mut conn = self.conn()?;
    let row = if changes.is_empty() {
      map_db_err(vets::table.find(id).first::<VetRow>(&mut conn))?
    } else {
      map_db_err(diesel::update(vets::table.find(id)).set(VetChangeset::from(&changes))
                                                      .get_result::<VetRow>(&mut conn))?
    };
    Ok(row.into())
  }
  fn delete_vet(&self, id: i32) -> Result<()> {
    let mut conn = self.conn()?;
    deleted(map_db_err(diesel::delete(vets::table.find(id)).execute(&mut conn))?, "vets", id)
  }

  fn list_appointments(&self) -> Result<Vec<AppointmentDetails>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(appointments::table.order(appointments::id.asc()).load::<AppointmentRow>(&mut conn))?;
    appointment_details(&mut conn, rows)
  }
  fn find_appointment(&self, id: i32) -> Result<Option<Appointment>> {
    let mut conn = self.conn()?;
    let opt = map_db_err(appointments::table.find(id).first::<AppointmentRow>(&mut conn).optional())?;
    Ok(opt.map(Appointment::from))
  }
  fn get_appointment_details(&self, id: i32) -> Result<Option<AppointmentDetails>> {
    let mut conn = self.conn()?;
    let rows = map_db_err(appointments::table.find(id).load::<AppointmentRow>(&mut conn))?;
    Ok(appointment_details(&mut conn, rows)?.pop())
  }
  fn insert_appointment(&self, input: NewAppointment) -> Result<Appointment> {
    let mut conn = self.conn()?;
    let row = map_db_err(diesel::insert_into(appointments::table).values(NewAppointmentRow::from(&input))
                                                                 .get_result::<AppointmentRow>(&mut conn))?;
    Ok(row.into())
  }
  fn update_appointment(&self, id: i32, changes: AppointmentChanges) -> Result<Appointment> {
    let mut conn = self.conn()?;
    let row = if changes.is_empty() {
      map_db_err(appointments::table.find(id).first::<AppointmentRow>(&mut conn))?
    } else {
      map_db_err(diesel::update(appointments::table.find(id)).set(AppointmentChangeset::from(&changes))
                                                              .get_result::<AppointmentRow>(&mut conn))?
    };
    Ok(row.into())
  }
  fn delete_appointment(&self, id: i32) -> Result<()> {
    let mut conn = self.conn()?;
    deleted(map_db_err(diesel::delete(appointments::table.find(id)).execute(&mut conn))?, "appointments", id)
  }
}

/// Crear repo desde las variables de entorno.
///
/// Lee `CLINIC_DB_URL` (o `DATABASE_URL` como alternativa) y
/// `CLINIC_DB_POOL_SIZE`. Con SQLite, sin URL se usa `clinic.db` en el
/// directorio de trabajo; con `pg` la URL es obligatoria.
pub fn new_from_env() -> Result<DieselClinicRepository> {
  dotenvy::dotenv().ok();
  let url = database_url_from(|k| std::env::var(k).ok())?;
  let pool_size = pool_size_from(|k| std::env::var(k).ok())?;
  log::info!("clinic-persistence: backend {} (pool {})", backend_name(), pool_size);
  DieselClinicRepository::connect(&url, pool_size)
}

pub const fn backend_name() -> &'static str {
  if cfg!(feature = "pg") {
    "postgres"
  } else {
    "sqlite"
  }
}

/// Resuelve la URL de la base de datos a partir de un lookup de variables.
pub fn database_url_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
  let url = lookup("CLINIC_DB_URL").or_else(|| lookup("DATABASE_URL"));
  if cfg!(feature = "pg") {
    let url = url.ok_or_else(|| DomainError::Storage("CLINIC_DB_URL / DATABASE_URL not set".into()))?;
    let l = url.to_lowercase();
    if !(l.starts_with("postgres://") || l.starts_with("postgresql://") || url.contains('@')) {
      return Err(DomainError::Storage("CLINIC_DB_URL / DATABASE_URL does not look like Postgres URL".into()));
    }
    Ok(url)
  } else {
    Ok(url.unwrap_or_else(|| "clinic.db".into()))
  }
}

pub fn pool_size_from(lookup: impl Fn(&str) -> Option<String>) -> Result<u32> {
  match lookup("CLINIC_DB_POOL_SIZE") {
    None => Ok(DEFAULT_POOL_SIZE),
    Some(raw) => match raw.trim().parse::<u32>() {
      Ok(n) if n > 0 => Ok(n),
      _ => Err(DomainError::Storage(format!("CLINIC_DB_POOL_SIZE must be a positive integer, got '{}'", raw))),
    },
  }
}
