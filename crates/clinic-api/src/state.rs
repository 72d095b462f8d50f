use crate::errors::ApiError;
use clinic_domain::{ClinicRepository, ClinicService};
use std::sync::Arc;

/// Estado compartido por los handlers: el servicio con el repositorio
/// inyectado.
#[derive(Clone)]
pub struct AppState {
  service: ClinicService,
}

impl AppState {
  pub fn new(repo: Arc<dyn ClinicRepository>) -> Self {
    Self { service: ClinicService::new(repo) }
  }

  /// Ejecuta una operación del servicio en el pool bloqueante de tokio
  /// (Diesel es síncrono) y traduce el resultado a `ApiError`.
  pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where F: FnOnce(&ClinicService) -> clinic_domain::Result<T> + Send + 'static,
          T: Send + 'static
  {
    let service = self.service.clone();
    match tokio::task::spawn_blocking(move || op(&service)).await {
      Ok(res) => res.map_err(ApiError::from),
      Err(e) => Err(ApiError::Internal(format!("blocking task failed: {}", e))),
    }
  }
}
