use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashSet;

use crate::algorithm::{generar_horarios, obtener_estadisticas_horario, OpcionesOptimizador};
use crate::api_json::{parse_generar_request, GenerarCatalogoRequest, GenerarResponse};
use crate::models::{Grupo, Horario};
use crate::server::AppState;
use crate::server_handlers::respuesta_error;

/// Corre el optimizador fuera del executor async. La generación es atómica:
/// no hay resultados parciales ni cancelación a mitad de camino.
async fn ejecutar_optimizador(
    estado: &AppState,
    grupos_por_materia: Vec<Vec<Grupo>>,
    fijados: HashSet<String>,
    opciones: OpcionesOptimizador,
) -> Result<Vec<Horario>, String> {
    let permiso = estado
        .trabajos
        .clone()
        .acquire_owned()
        .await
        .map_err(|_| "failed to acquire semaphore".to_string())?;

    let inicio = std::time::Instant::now();
    let materias = grupos_por_materia.len();
    let handle = tokio::task::spawn_blocking(move || {
        let _permiso = permiso;
        generar_horarios(&grupos_por_materia, &fijados, &opciones)
    });

    let horarios = handle.await.map_err(|e| format!("task join error: {}", e))?;
    log::info!(
        "[generar] {} materias -> {} horarios en {} ms",
        materias,
        horarios.len(),
        inicio.elapsed().as_millis()
    );
    Ok(horarios)
}

/// POST /horarios/generar
/// Cuerpo: `GenerarRequest`. Responde `GenerarResponse`; una lista vacía
/// significa "no hay combinación sin traslapes", no es un error.
pub async fn generar_handler(estado: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let json_str = match serde_json::to_string(&body.into_inner()) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid JSON body: {}", e)})),
    };
    let req = match parse_generar_request(&json_str) {
        Ok(r) => r,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };
    let opciones = match req.opciones.sobre(estado.config.opciones_por_defecto()) {
        Ok(op) => op,
        Err(e) => return respuesta_error(&e),
    };

    let fijados = req.fijados();
    match ejecutar_optimizador(&estado, req.grupos_por_materia, fijados, opciones).await {
        Ok(horarios) => HttpResponse::Ok().json(GenerarResponse::from(horarios)),
        Err(msg) => HttpResponse::InternalServerError().json(json!({"error": msg})),
    }
}

/// POST /horarios/generar/catalogo
/// Igual que `/horarios/generar`, pero los grupos salen del catálogo cargado.
pub async fn generar_catalogo_handler(estado: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let req: GenerarCatalogoRequest = match serde_json::from_value(body.into_inner()) {
        Ok(r) => r,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };
    let opciones = match req.opciones.sobre(estado.config.opciones_por_defecto()) {
        Ok(op) => op,
        Err(e) => return respuesta_error(&e),
    };
    let Some(catalogo) = estado.catalogo.as_ref() else {
        return HttpResponse::ServiceUnavailable().json(json!({"error": "catálogo no disponible"}));
    };

    let grupos_por_materia = match catalogo.grupos_por_materia(&req.carrera, req.turno, &req.semestres, &req.materias) {
        Ok(g) => g,
        Err(e) => return respuesta_error(&e),
    };

    let fijados = req.fijados();
    match ejecutar_optimizador(&estado, grupos_por_materia, fijados, opciones).await {
        Ok(horarios) => HttpResponse::Ok().json(GenerarResponse::from(horarios)),
        Err(msg) => HttpResponse::InternalServerError().json(json!({"error": msg})),
    }
}

/// POST /horarios/estadisticas
/// Cuerpo: un `Horario`. Devuelve sus estadísticas.
pub async fn estadisticas_handler(body: web::Json<Horario>) -> impl Responder {
    HttpResponse::Ok().json(obtener_estadisticas_horario(&body))
}
