use crate::config::ServerConfig;
use crate::routes::app;
use crate::state::AppState;
use clinic_domain::ClinicRepository;
use std::sync::Arc;

/// Sirve la API hasta recibir Ctrl-C.
pub async fn serve(config: ServerConfig, repo: Arc<dyn ClinicRepository>) -> std::io::Result<()> {
  let router = app(AppState::new(repo), &config);
  let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
  log::info!("clinic-api: escuchando en {} (CORS: {:?})", config.bind_addr, config.cors_origin);
  axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    log::warn!("clinic-api: no se pudo escuchar Ctrl-C: {}", e);
    std::future::pending::<()>().await;
  }
  log::info!("clinic-api: apagando");
}
