pub mod horarios;
pub mod catalogo;
pub mod guardados;
pub mod docs;

pub use horarios::*;
pub use catalogo::*;
pub use guardados::*;
pub use docs::*;

use actix_web::HttpResponse;
use serde_json::json;

use crate::error::SiohError;

/// Traduce un error del dominio a una respuesta JSON `{"error": ...}`.
pub(crate) fn respuesta_error(e: &SiohError) -> HttpResponse {
    let cuerpo = json!({"error": e.to_string()});
    match e {
        SiohError::NoEncontrado(_) => HttpResponse::NotFound().json(cuerpo),
        SiohError::Io(_) | SiohError::Json(_) => HttpResponse::InternalServerError().json(cuerpo),
        _ => HttpResponse::BadRequest().json(cuerpo),
    }
}
