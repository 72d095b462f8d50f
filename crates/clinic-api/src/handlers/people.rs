use super::parse_id;
use crate::errors::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_domain::{Deleted, NewPerson, Person, PersonChanges, PersonDetails};

pub async fn get_people(State(state): State<AppState>) -> Result<Json<Vec<PersonDetails>>, ApiError> {
  Ok(Json(state.run(|svc| svc.list_people()).await?))
}

pub async fn get_person_by_id(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<PersonDetails>, ApiError> {
  let id = parse_id(&raw)?;
  Ok(Json(state.run(move |svc| svc.get_person(id)).await?))
}

pub async fn create_person(State(state): State<AppState>,
                           payload: Result<Json<NewPerson>, JsonRejection>)
                           -> Result<(StatusCode, Json<Person>), ApiError> {
  let Json(input) = payload?;
  let created = state.run(move |svc| svc.create_person(input)).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_person(State(state): State<AppState>,
                           Path(raw): Path<String>,
                           payload: Result<Json<PersonChanges>, JsonRejection>)
                           -> Result<Json<Person>, ApiError> {
  let id = parse_id(&raw)?;
  let Json(changes) = payload?;
  Ok(Json(state.run(move |svc| svc.update_person(id, changes)).await?))
}

pub async fn delete_person(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<Deleted>, ApiError> {
  let id = parse_id(&raw)?;
  Ok(Json(state.run(move |svc| svc.delete_person(id)).await?))
}
