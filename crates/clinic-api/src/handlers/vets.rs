// Handlers de /vets. El id no lo genera la base de datos: llega en el cuerpo
// del POST y es el de la persona que se especializa.
use super::parse_id;
use crate::errors::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_domain::{Deleted, NewVet, Vet, VetChanges, VetDetails};

pub async fn get_vets(State(state): State<AppState>) -> Result<Json<Vec<VetDetails>>, ApiError> {
  Ok(Json(state.run(|svc| svc.list_vets()).await?))
}

pub async fn get_vet_by_id(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<VetDetails>, ApiError> {
  let id = parse_id(&raw)?;
  Ok(Json(state.run(move |svc| svc.get_vet(id)).await?))
}

pub async fn create_vet(State(state): State<AppState>,
                        payload: Result<Json<NewVet>, JsonRejection>)
                        -> Result<(StatusCode, Json<Vet>), ApiError> {
  let Json(input) = payload?;
  let created = state.run(move |svc| svc.create_vet(input)).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_vet(State(state): State<AppState>,
                        Path(raw): Path<String>,
                        payload: Result<Json<VetChanges>, JsonRejection>)
                        -> Result<Json<Vet>, ApiError> {
  let id = parse_id(&raw)?;
  let Json(changes) = payload?;
  Ok(Json(state.run(move |svc| svc.update_vet(id, changes)).await?))
}

pub async fn delete_vet(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<Deleted>, ApiError> {
  let id = parse_id(&raw)?;
  Ok(Json(state.run(move |svc| svc.delete_vet(id)).await?))
}
