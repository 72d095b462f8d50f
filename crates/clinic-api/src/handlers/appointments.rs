use super::parse_id;
use crate::errors::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_domain::{Deleted, NewAppointment, Appointment, AppointmentChanges, AppointmentDetails};

pub async fn get_appointments(State(state): State<AppState>) -> Result<Json<Vec<AppointmentDetails>>, ApiError> {
  Ok(Json(state.run(|svc| svc.list_appointments()).await?))
}

pub async fn get_appointment_by_id(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<AppointmentDetails>, ApiError> {
  let id = parse_id(&raw)?;
  Ok(Json(state.run(move |svc| svc.get_appointment(id)).await?))
}

pub async fn create_appointment(State(state): State<AppState>,
                                payload: Result<Json<NewAppointment>, JsonRejection>)
                                -> Result<(StatusCode, Json<Appointment>), ApiError> {
  let Json(input) = payload?;
  let created = state.run(move |svc| svc.create_appointment(input)).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_appointment(State(state): State<AppState>,
                                Path(raw): Path<String>,
                                payload: Result<Json<AppointmentChanges>, JsonRejection>)
                                -> Result<Json<Appointment>, ApiError> {
  let id = parse_id(&raw)?;
  let Json(changes) = payload?;
  Ok(Json(state.run(move |svc| svc.update_appointment(id, changes)).await?))
}

pub async fn delete_appointment(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<Deleted>, ApiError> {
  let id = parse_id(&raw)?;
  Ok(Json(state.run(move |svc| svc.delete_appointment(id)).await?))
}
