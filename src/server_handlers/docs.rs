use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{GenerarRequest, OpcionesParciales};
use crate::models::{Dia, Grupo, Sesion};

/// GET /help
pub async fn help_handler() -> impl Responder {
    let sesion = |dia, inicio, fin| Sesion { dia, hora_inicio: inicio, hora_fin: fin, salon: "101".into(), edificio: "A".into() };
    let example = GenerarRequest {
        grupos_por_materia: vec![vec![Grupo {
            id: "Cálculo-1/1CM1".to_string(),
            numero: "1CM1".to_string(),
            materia_id: "Cálculo-1".to_string(),
            materia_nombre: "Cálculo".to_string(),
            profesor: "Laura Méndez".to_string(),
            sesiones: vec![sesion(Dia::Lunes, 420, 510), sesion(Dia::Miercoles, 420, 510)],
        }]],
        grupos_fijados: vec![],
        opciones: OpcionesParciales { hora_inicio_preferida: Some(480), ..Default::default() },
    };

    let help = json!({
        "description": "API del optimizador de horarios. Horas en minutos desde medianoche (420 = 07:00). Los campos de `opciones` que no se envían toman los valores configurados en el servidor.",
        "post_generar_example": example,
        "post_generar_catalogo_example": {
            "carrera": "ciencia_de_datos",
            "turno": "matutino",
            "semestres": [1],
            "materias": ["Cálculo-1", "Fundamentos de Programación-1"],
            "grupos_fijados": []
        },
        "routes": [
            "POST /horarios/generar",
            "POST /horarios/generar/catalogo",
            "POST /horarios/estadisticas",
            "GET /horarios/guardados",
            "POST /horarios/guardados",
            "DELETE /horarios/guardados/{id}",
            "GET /catalogo/carreras",
            "GET /catalogo/materias?carrera=&turno=&semestres=1,2",
            "GET /catalogo/grupos?carrera=&turno=&semestres=&materia="
        ],
        "note": "Una lista de horarios vacía significa que no existe combinación sin traslapes: pruebe con otras materias o quite grupos fijados."
    });

    HttpResponse::Ok().json(help)
}
