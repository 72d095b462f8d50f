// routes.rs
// Tabla de rutas: cinco operaciones por recurso y el fallback 404.
use crate::config::ServerConfig;
use crate::errors::route_not_found;
use crate::handlers::{appointments, people, pets, vets};
use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

/// Router sin capas, útil en tests.
pub fn router(state: AppState) -> Router {
  Router::new().route("/people", get(people::get_people).post(people::create_person))
               .route("/people/:id",
                      get(people::get_person_by_id).put(people::update_person).delete(people::delete_person))
               .route("/pets", get(pets::get_pets).post(pets::create_pet))
               .route("/pets/:id", get(pets::get_pet_by_id).put(pets::update_pet).delete(pets::delete_pet))
               .route("/vets", get(vets::get_vets).post(vets::create_vet))
               .route("/vets/:id", get(vets::get_vet_by_id).put(vets::update_vet).delete(vets::delete_vet))
               .route("/appointments",
                      get(appointments::get_appointments).post(appointments::create_appointment))
               .route("/appointments/:id",
                      get(appointments::get_appointment_by_id).put(appointments::update_appointment)
                                                              .delete(appointments::delete_appointment))
               .fallback(route_not_found)
               .with_state(state)
}

pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
  CorsLayer::new().allow_origin(origin)
                  .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                  .allow_headers([header::CONTENT_TYPE])
}

/// Router completo tal como lo sirve el binario.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
  router(state).layer(cors_layer(config.cors_origin.clone()))
}
