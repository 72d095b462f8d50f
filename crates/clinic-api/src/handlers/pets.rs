// Handlers de /pets. La validación del tutor la hace `ClinicService::create_pet`
// y `ClinicService::update_pet`.
use super::parse_id;
use crate::errors::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_domain::{Deleted, NewPet, Pet, PetChanges, PetDetails};

pub async fn get_pets(State(state): State<AppState>) -> Result<Json<Vec<PetDetails>>, ApiError> {
  Ok(Json(state.run(|svc| svc.list_pets()).await?))
}

pub async fn get_pet_by_id(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<PetDetails>, ApiError> {
  let id = parse_id(&raw)?;
  Ok(Json(state.run(move |svc| svc.get_pet(id)).await?))
}

pub async fn create_pet(State(state): State<AppState>,
                        payload: Result<Json<NewPet>, JsonRejection>)
                        -> Result<(StatusCode, Json<Pet>), ApiError> {
  let Json(input) = payload?;
  let created = state.run(move |svc| svc.create_pet(input)).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_pet(State(state): State<AppState>,
                        Path(raw): Path<String>,
                        payload: Result<Json<PetChanges>, JsonRejection>)
                        -> Result<Json<Pet>, ApiError> {
  let id = parse_id(&raw)?;
  let Json(changes) = payload?;
  Ok(Json(state.run(move |svc| svc.update_pet(id, changes)).await?))
}

pub async fn delete_pet(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<Deleted>, ApiError> {
  let id = parse_id(&raw)?;
  Ok(Json(state.run(move |svc| svc.delete_pet(id)).await?))
}
