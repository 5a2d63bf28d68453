// Biblioteca raíz del crate `sioh`: optimizador de horarios de clase.
//
// `algorithm` contiene el núcleo (combinaciones, traslapes, puntuación);
// `catalogo` y `guardados` son los colaboradores que alimentan y conservan
// sus resultados; `server` expone todo como API JSON.
pub mod models;
pub mod algorithm;
pub mod catalogo;
pub mod guardados;
pub mod api_json;
pub mod config;
pub mod error;
pub mod server;
mod server_handlers;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
pub use algorithm::{generar_horarios, obtener_estadisticas_horario, OpcionesOptimizador};
pub use error::{Result, SiohError};
