//! Persistencia Diesel para `ClinicRepository`.
//! Este archivo expone el módulo `schema` y reexporta el repositorio Diesel
//! que implementa el contrato de almacenamiento del dominio. La
//! implementación detallada está en `clinic_persistence.rs`; SQLite por
//! defecto, Postgres con la feature `pg`.

mod clinic_persistence;
mod rows;
pub mod schema;

pub use clinic_persistence::{backend_name, database_url_from, new_from_env, pool_size_from, DieselClinicRepository,
                             DEFAULT_POOL_SIZE, MIGRATIONS};
