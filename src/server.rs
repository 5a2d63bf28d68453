use actix_web::{middleware, web, App, HttpServer};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::catalogo::Catalogo;
use crate::config::ServerConfig;
use crate::guardados::HorariosGuardados;
use crate::server_handlers;

const LIMITE_JSON_BYTES: usize = 4 * 1024 * 1024;

/// Estado compartido por los handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// `None` si no se pudo leer el catálogo: las rutas /catalogo responden 503.
    pub catalogo: Option<Catalogo>,
    pub guardados: Mutex<HorariosGuardados>,
    /// Limita cuántas generaciones corren a la vez en el pool bloqueante.
    pub trabajos: Arc<Semaphore>,
}

impl AppState {
    pub fn new(config: ServerConfig, catalogo: Option<Catalogo>, guardados: HorariosGuardados) -> Self {
        let permisos = std::cmp::max(1, num_cpus::get());
        Self {
            config,
            catalogo,
            guardados: Mutex::new(guardados),
            trabajos: Arc::new(Semaphore::new(permisos)),
        }
    }

    /// Carga catálogo y horarios guardados desde las rutas de la configuración.
    /// Un catálogo ilegible no impide arrancar; un archivo de guardados ilegible sí.
    pub fn desde_config(config: ServerConfig) -> crate::error::Result<Self> {
        let catalogo = match Catalogo::desde_archivo(&config.catalogo_path) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!(
                    "no se pudo leer el catálogo '{}': {}. Rutas /catalogo deshabilitadas.",
                    config.catalogo_path.display(), e
                );
                None
            }
        };
        let guardados = HorariosGuardados::cargar(&config.guardados_path)?;
        Ok(Self::new(config, catalogo, guardados))
    }
}

/// Registra todas las rutas de la API (también usado por los tests).
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(LIMITE_JSON_BYTES))
        .route("/horarios/generar", web::post().to(server_handlers::generar_handler))
        .route("/horarios/generar/catalogo", web::post().to(server_handlers::generar_catalogo_handler))
        .route("/horarios/estadisticas", web::post().to(server_handlers::estadisticas_handler))
        .route("/horarios/guardados", web::get().to(server_handlers::listar_guardados_handler))
        .route("/horarios/guardados", web::post().to(server_handlers::guardar_handler))
        .route("/horarios/guardados/{id}", web::delete().to(server_handlers::eliminar_guardado_handler))
        .route("/catalogo/carreras", web::get().to(server_handlers::carreras_handler))
        .route("/catalogo/materias", web::get().to(server_handlers::materias_handler))
        .route("/catalogo/grupos", web::get().to(server_handlers::grupos_handler))
        .route("/help", web::get().to(server_handlers::help_handler));
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let estado = AppState::desde_config(config).map_err(|e| std::io::Error::other(e.to_string()))?;
    let estado = web::Data::new(estado);

    log::info!("Iniciando servidor en http://{}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(estado.clone())
            .wrap(middleware::Logger::default())
            .configure(configurar_rutas)
    })
    .bind(bind_addr)?
    .run()
    .await
}
