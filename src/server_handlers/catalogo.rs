use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::catalogo::Catalogo;
use crate::error::SiohError;
use crate::models::Turno;
use crate::server::AppState;
use crate::server_handlers::respuesta_error;

struct ConsultaCatalogo {
    carrera: String,
    turno: Turno,
    semestres: Vec<u8>,
}

/// Lee `carrera`, `turno` y `semestres` (lista separada por comas) del query string.
fn leer_consulta(qm: &HashMap<String, String>) -> Result<ConsultaCatalogo, SiohError> {
    let carrera = qm
        .get("carrera")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SiohError::Catalogo("carrera is required in query".into()))?;
    let turno = qm
        .get("turno")
        .ok_or_else(|| SiohError::Catalogo("turno is required in query".into()))?
        .parse::<Turno>()?;
    let semestres = match qm.get("semestres") {
        Some(s) if !s.trim().is_empty() => s
            .split(',')
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<u8>().map_err(|_| SiohError::Catalogo(format!("semestre inválido '{}'", p))))
            .collect::<Result<Vec<u8>, SiohError>>()?,
        _ => Vec::new(),
    };
    Ok(ConsultaCatalogo { carrera, turno, semestres })
}

fn catalogo_o_503(estado: &AppState) -> Result<&Catalogo, HttpResponse> {
    estado
        .catalogo
        .as_ref()
        .ok_or_else(|| HttpResponse::ServiceUnavailable().json(json!({"error": "catálogo no disponible"})))
}

/// GET /catalogo/carreras
pub async fn carreras_handler(estado: web::Data<AppState>) -> impl Responder {
    match catalogo_o_503(&estado) {
        Ok(c) => HttpResponse::Ok().json(json!({"carreras": c.carreras()})),
        Err(resp) => resp,
    }
}

/// GET /catalogo/materias?carrera=ciencia_de_datos&turno=matutino&semestres=1,2
/// Sin `semestres` devuelve los semestres disponibles y ninguna materia.
pub async fn materias_handler(
    estado: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let catalogo = match catalogo_o_503(&estado) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let consulta = match leer_consulta(&query) {
        Ok(c) => c,
        Err(e) => return respuesta_error(&e),
    };

    let semestres_disponibles = catalogo.semestres_disponibles(&consulta.carrera, consulta.turno);
    let materias = catalogo.materias_disponibles(&consulta.carrera, consulta.turno, &consulta.semestres);
    HttpResponse::Ok().json(json!({
        "semestres_disponibles": semestres_disponibles,
        "materias": materias
    }))
}

/// GET /catalogo/grupos?carrera=...&turno=...&semestres=1&materia=Cálculo-1
pub async fn grupos_handler(
    estado: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let catalogo = match catalogo_o_503(&estado) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let consulta = match leer_consulta(&query) {
        Ok(c) => c,
        Err(e) => return respuesta_error(&e),
    };
    let Some(materia_id) = query.get("materia").filter(|s| !s.trim().is_empty()) else {
        return HttpResponse::BadRequest().json(json!({"error": "materia is required in query"}));
    };

    match catalogo.grupos_por_materia(&consulta.carrera, consulta.turno, &consulta.semestres, std::slice::from_ref(materia_id)) {
        Ok(mut grupos) => HttpResponse::Ok().json(json!({"materia": materia_id, "grupos": grupos.pop().unwrap_or_default()})),
        Err(e) => respuesta_error(&e),
    }
}
