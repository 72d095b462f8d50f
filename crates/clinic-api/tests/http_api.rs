use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use clinic_api::{router, AppState};
use clinic_domain::{ClinicRepository, ClinicStubs, InMemoryClinicRepository};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

mod support;
use support::FaultyRepository;

fn app_with(repo: Arc<dyn ClinicRepository>) -> Router {
  router(AppState::new(repo))
}

fn sample_app() -> (Arc<InMemoryClinicRepository>, Router) {
  let repo = Arc::new(ClinicStubs::sample_repo().expect("sample repo"));
  (repo.clone(), app_with(repo))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(v) => builder.header(header::CONTENT_TYPE, "application/json").body(Body::from(v.to_string())),
    None => builder.body(Body::empty()),
  }.expect("request");
  let res = app.clone().oneshot(req).await.expect("response");
  let status = res.status();
  let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("body");
  let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, json)
}

#[tokio::test]
async fn list_people_includes_pets_and_vet() {
  let (_repo, app) = sample_app();
  let (status, body) = send(&app, Method::GET, "/people", None).await;
  assert_eq!(status, StatusCode::OK);
  let people = body.as_array().expect("array");
  assert_eq!(people.len(), 2);
  assert_eq!(people[0]["name"], "Ana Costa");
  assert_eq!(people[0]["pets"][0]["name"], "Rex");
  assert_eq!(people[0]["vet"], Value::Null);
  assert_eq!(people[1]["vet"]["crmv"], "SP-12345");
}

#[tokio::test]
async fn get_by_id_returns_requested_row_with_relations() {
  let (_repo, app) = sample_app();
  let (status, pet) = send(&app, Method::GET, "/pets/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(pet["id"], 1);
  assert_eq!(pet["personId"], 1);
  assert_eq!(pet["person"]["id"], 1);
  assert_eq!(pet["appointments"][0]["vetId"], 2);

  let (status, appt) = send(&app, Method::GET, "/appointments/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(appt["pet"]["name"], "Rex");
  assert_eq!(appt["vet"]["person"]["name"], "Dra. Beatriz Silva");
  assert_eq!(appt["date"], "2025-03-01T09:30:00Z");

  let (status, vet) = send(&app, Method::GET, "/vets/2", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(vet["person"]["id"], 2);
  assert_eq!(vet["appointments"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn missing_ids_are_not_found_for_get_update_delete() {
  let (_repo, app) = sample_app();
  for (resource, label) in [("people", "Person"), ("pets", "Pet"), ("vets", "Vet"), ("appointments", "Appointment")] {
    let uri = format!("/{}/999", resource);
    let expected = json!({ "msg": format!("{} not found.", label) });
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!((status, &body), (StatusCode::NOT_FOUND, &expected));
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!((status, &body), (StatusCode::NOT_FOUND, &expected));
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!((status, &body), (StatusCode::NOT_FOUND, &expected));
  }
}

#[tokio::test]
async fn create_pet_for_missing_person_writes_nothing() {
  let (repo, app) = sample_app();
  let before = repo.row_counts().unwrap();
  let (status, body) =
    send(&app, Method::POST, "/pets", Some(json!({"name": "Luna", "species": "cat", "personId": 42}))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({"msg": "Cannot create Pet: Person not found."}));
  assert_eq!(repo.row_counts().unwrap(), before);
}

#[tokio::test]
async fn create_pet_returns_201_and_is_retrievable() {
  let (_repo, app) = sample_app();
  let (status, created) =
    send(&app, Method::POST, "/pets", Some(json!({"name": "Luna", "species": "cat", "personId": 1}))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["personId"], 1);
  assert!(created.get("person").is_none(), "create returns the bare row");

  let uri = format!("/pets/{}", created["id"]);
  let (status, fetched) = send(&app, Method::GET, &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched["name"], "Luna");
  assert_eq!(fetched["person"]["name"], "Ana Costa");
}

#[tokio::test]
async fn reassigning_pet_to_missing_person_keeps_owner() {
  let (_repo, app) = sample_app();
  let (status, body) = send(&app, Method::PUT, "/pets/1", Some(json!({"personId": 77}))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({"msg": "New tutor (Person) not found."}));
  let (_, pet) = send(&app, Method::GET, "/pets/1", None).await;
  assert_eq!(pet["personId"], 1);

  let (status, moved) = send(&app, Method::PUT, "/pets/1", Some(json!({"personId": 2, "breed": "Mixed"}))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(moved["personId"], 2);
  assert_eq!(moved["breed"], "Mixed");
  assert_eq!(moved["name"], "Rex");
}

#[tokio::test]
async fn create_vet_requires_existing_person() {
  let (_repo, app) = sample_app();
  let payload = json!({"id": 50, "crmv": "RJ-9", "specialty": "Dermatology"});
  let (status, body) = send(&app, Method::POST, "/vets", Some(payload)).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({"msg": "Cannot create Vet: Person not found."}));

  let payload = json!({"id": 1, "crmv": "RJ-9", "specialty": "Dermatology"});
  let (status, vet) = send(&app, Method::POST, "/vets", Some(payload)).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(vet, json!({"id": 1, "crmv": "RJ-9", "specialty": "Dermatology"}));
}

#[tokio::test]
async fn delete_twice_returns_not_found() {
  let (_repo, app) = sample_app();
  let (status, body) = send(&app, Method::DELETE, "/appointments/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"msg": "Appointment deleted successfully."}));
  let (status, body) = send(&app, Method::DELETE, "/appointments/1", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({"msg": "Appointment not found."}));
}

#[tokio::test]
async fn appointments_are_not_validated_but_storage_rejects_dangling_keys() {
  let (repo, app) = sample_app();
  let before = repo.row_counts().unwrap();
  let payload = json!({"date": "2025-04-01T10:00:00Z", "petId": 99, "vetId": 2});
  let (status, body) = send(&app, Method::POST, "/appointments", Some(payload)).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({"msg": "Something went wrong."}));
  assert_eq!(repo.row_counts().unwrap(), before);

  let payload = json!({"date": "2025-04-01T10:00:00Z", "reason": "follow-up", "petId": 1, "vetId": 2});
  let (status, created) = send(&app, Method::POST, "/appointments", Some(payload)).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["reason"], "follow-up");
}

#[tokio::test]
async fn unknown_route_uses_error_shape() {
  let (_repo, app) = sample_app();
  let (status, body) = send(&app, Method::GET, "/unknown", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({"error": "Route does not exist."}));
}

#[tokio::test]
async fn malformed_ids_and_payloads_are_bad_requests() {
  let (_repo, app) = sample_app();
  let (status, body) = send(&app, Method::GET, "/people/abc", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body, json!({"msg": "Invalid id: abc."}));

  let (status, body) = send(&app, Method::POST, "/people", Some(json!({"name": "Ana", "nickname": "A"}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["msg"].as_str().unwrap_or_default().contains("nickname"));

  let (status, _) = send(&app, Method::POST, "/pets", Some(json!({"name": "Luna", "species": "cat"}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send(&app, Method::POST, "/people", Some(json!({"name": "  "}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_faults_are_opaque_500s() {
  let app = app_with(Arc::new(FaultyRepository::new("connection refused: db.internal:5432")));
  let requests = [(Method::GET, "/people", None),
                  (Method::GET, "/pets/1", None),
                  (Method::POST, "/vets", Some(json!({"id": 1, "crmv": "X", "specialty": "Y"}))),
                  (Method::PUT, "/appointments/1", Some(json!({"reason": "x"}))),
                  (Method::DELETE, "/people/1", None)];
  for (method, uri, body) in requests {
    let (status, body) = send(&app, method, uri, body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
    assert_eq!(body, json!({"msg": "Something went wrong."}));
    assert!(!body.to_string().contains("db.internal"));
  }
}

#[tokio::test]
async fn person_crud_round_trip() {
  let app = app_with(Arc::new(InMemoryClinicRepository::new()));
  let (status, created) =
    send(&app, Method::POST, "/people", Some(json!({"name": "Carla", "email": "carla@example.com"}))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created, json!({"id": 1, "name": "Carla", "email": "carla@example.com", "phone": null}));

  let (status, updated) = send(&app, Method::PUT, "/people/1", Some(json!({"phone": "555-0101"}))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["email"], "carla@example.com");
  assert_eq!(updated["phone"], "555-0101");

  let (status, listed) = send(&app, Method::GET, "/people", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(listed[0]["pets"], json!([]));

  let (status, body) = send(&app, Method::DELETE, "/people/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"msg": "Person deleted successfully."}));
}

#[tokio::test]
async fn null_clears_a_nullable_field() {
  let (_repo, app) = sample_app();
  let (status, person) = send(&app, Method::PUT, "/people/1", Some(json!({"email": null}))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(person["email"], Value::Null);
  assert_eq!(person["phone"], "+55 11 99999-0001");

  let (status, pet) = send(&app, Method::PUT, "/pets/1", Some(json!({"breed": null}))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(pet["breed"], Value::Null);
  assert_eq!(pet["species"], "dog");
}

#[tokio::test]
async fn update_of_missing_row_is_not_found_even_when_invalid() {
  let (_repo, app) = sample_app();
  let (status, body) = send(&app, Method::PUT, "/people/999", Some(json!({"name": " "}))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({"msg": "Person not found."}));
}
