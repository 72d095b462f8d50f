use clinic_domain::ClinicRepository;
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Servidor HTTP de la clínica veterinaria.
///
/// Lee la configuración del entorno (y de `.env` si existe), aplica las
/// migraciones embebidas y sirve la API hasta recibir Ctrl-C.
fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = clinic_api::ServerConfig::from_env()?;
    let repo: Arc<dyn ClinicRepository> = Arc::new(clinic_persistence::new_from_env()?);
    log::info!("clinic-server: almacenamiento listo ({})", clinic_persistence::backend_name());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(clinic_api::serve(config, repo))?;
    Ok(())
}

/// `RUST_LOG` controla el filtro; por defecto `info`. Los `log::` de las
/// crates llegan al subscriber a través del puente de `tracing-log`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter)
                                  .with(tracing_subscriber::fmt::layer())
                                  .init();
}
