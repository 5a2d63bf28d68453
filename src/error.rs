// Errores del crate.
//
// Sólo la entrada mal formada (horas, rangos, sesiones, opciones) y los fallos
// de I/O o JSON se propagan como error. "Sin horarios válidos" y los topes de
// combinaciones NO son errores: se devuelven como listas vacías o truncadas.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiohError {
    /// Hora que no cumple el formato "HH:MM" (00:00 - 23:59)
    #[error("hora inválida '{0}': se esperaba HH:MM")]
    HoraInvalida(String),

    /// Rango "HH:MM-HH:MM" mal formado o con inicio >= fin
    #[error("rango horario inválido '{0}'")]
    RangoInvalido(String),

    #[error("sesión inválida: {0}")]
    SesionInvalida(String),

    #[error("opciones inválidas: {0}")]
    OpcionesInvalidas(String),

    #[error("catálogo: {0}")]
    Catalogo(String),

    #[error("no encontrado: {0}")]
    NoEncontrado(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SiohError>;
