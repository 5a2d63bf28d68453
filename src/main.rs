// --- SIOH: generador de horarios - Archivo principal ---

use sioh::config::ServerConfig;
use sioh::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // .env primero para que RUST_LOG también pueda venir de ahí
    let _ = dotenv::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("=== SIOH - Sistema de optimización de horarios (API) ===");
    run_server(ServerConfig::from_env()).await
}
