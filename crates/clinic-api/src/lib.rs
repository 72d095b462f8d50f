//! Crate `clinic-api` — superficie HTTP (axum) de la clínica.
//!
//! `routes::router` monta `/people`, `/pets`, `/vets` y `/appointments` con
//! list/get/create/update/delete. Los errores del dominio se traducen en
//! `errors::ApiError` (`{"msg": ...}`); las rutas desconocidas responden
//! `404 {"error": "Route does not exist."}`.
pub mod config;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use errors::ApiError;
pub use routes::{app, router};
pub use server::serve;
pub use state::AppState;
