use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::error::{Result, SiohError};
use crate::guardados::HorariosGuardados;
use crate::models::Horario;
use crate::server::AppState;
use crate::server_handlers::respuesta_error;

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({"error": "saved schedules store is poisoned"}))
}

/// Ejecuta `op` sobre la colección en el pool bloqueante (escribe a disco).
/// Devuelve el resultado de `op` y el tamaño de la colección después.
async fn con_guardados<T, F>(estado: web::Data<AppState>, op: F) -> std::result::Result<Result<(T, usize)>, HttpResponse>
where
    T: Send + 'static,
    F: FnOnce(&mut HorariosGuardados) -> Result<T> + Send + 'static,
{
    let resultado = web::block(move || -> Result<(T, usize)> {
        let mut guardados = estado
            .guardados
            .lock()
            .map_err(|_| SiohError::Io(std::io::Error::other("saved schedules store is poisoned")))?;
        let valor = op(&mut *guardados)?;
        Ok((valor, guardados.listar().len()))
    })
    .await;

    resultado.map_err(|e| {
        log::error!("[guardados] blocking task failed: {}", e);
        HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)}))
    })
}

/// GET /horarios/guardados
pub async fn listar_guardados_handler(estado: web::Data<AppState>) -> impl Responder {
    let Ok(guardados) = estado.guardados.lock() else {
        return lock_error();
    };
    HttpResponse::Ok().json(json!({"count": guardados.listar().len(), "horarios": guardados.listar()}))
}

/// POST /horarios/guardados
/// Guarda una copia del horario si su id no existe. `guardado: false` indica
/// que ya estaba guardado.
pub async fn guardar_handler(estado: web::Data<AppState>, body: web::Json<Horario>) -> impl Responder {
    let horario = body.into_inner();
    match con_guardados(estado, move |g| g.guardar(&horario)).await {
        Ok(Ok((guardado, count))) => HttpResponse::Ok().json(json!({"status": "ok", "guardado": guardado, "count": count})),
        Ok(Err(e)) => respuesta_error(&e),
        Err(resp) => resp,
    }
}

/// DELETE /horarios/guardados/{id}
pub async fn eliminar_guardado_handler(estado: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let buscado = id.clone();
    match con_guardados(estado, move |g| g.eliminar(&buscado)).await {
        Ok(Ok((true, count))) => HttpResponse::Ok().json(json!({"status": "ok", "count": count})),
        Ok(Ok((false, _))) => HttpResponse::NotFound().json(json!({"error": format!("horario '{}' no está guardado", id)})),
        Ok(Err(e)) => respuesta_error(&e),
        Err(resp) => resp,
    }
}
