// Formato crudo del catálogo de horarios (horarios.json) y su conversión a
// `Grupo`/`Sesion`.
//
// {
//   "horarios": {
//     "<carrera>": {
//       "turno_matutino_semestre_1": [
//         { "grupo": "1CV1", "asignatura": "Cálculo", "profesor": "...",
//           "edificio": "A", "salon": "101",
//           "horarios": { "lun": "07:00-08:30", "vie": ["11:30-13:00", "17:30-19:00"] } }
//       ]
//     }
//   }
// }

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algorithm::tiempo::parsear_rango;
use crate::error::Result;
use crate::models::{Dia, Grupo, Materia, Sesion, Turno};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorariosJson {
    pub horarios: BTreeMap<String, BTreeMap<String, Vec<ClaseJson>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaseJson {
    pub grupo: String,
    pub asignatura: String,
    #[serde(default)]
    pub profesor: String,
    #[serde(default)]
    pub edificio: String,
    #[serde(default)]
    pub salon: String,
    pub horarios: BTreeMap<String, RangosDia>,
}

/// Un día puede traer un rango o varios.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangosDia {
    Uno(String),
    Varios(Vec<String>),
}

impl RangosDia {
    pub fn rangos(&self) -> Vec<&str> {
        match self {
            RangosDia::Uno(r) => vec![r.as_str()],
            RangosDia::Varios(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

/// "turno_matutino_semestre_3" -> (Matutino, 3)
pub fn parsear_clave_semestre(clave: &str) -> Option<(Turno, u8)> {
    let resto = clave.strip_prefix("turno_")?;
    let (turno, semestre) = resto.split_once("_semestre_")?;
    let turno = turno.parse::<Turno>().ok()?;
    let semestre = semestre.parse::<u8>().ok()?;
    Some((turno, semestre))
}

/// Convierte una fila del catálogo en un `Grupo`. Un rango mal formado hace
/// fallar la carga; días desconocidos (p. ej. "dom") se omiten.
pub fn clase_a_grupo(clase: &ClaseJson, grupo_id: String, materia: &Materia) -> Result<Grupo> {
    let mut sesiones = Vec::new();
    for (abrev, valor) in clase.horarios.iter() {
        let Some(dia) = Dia::desde_abreviatura(abrev) else {
            log::warn!("[catalogo] día desconocido '{}' en grupo {}, se omite", abrev, clase.grupo);
            continue;
        };
        for rango in valor.rangos() {
            let (inicio, fin) = parsear_rango(rango)?;
            sesiones.push(Sesion::nueva(dia, inicio, fin, &clase.salon, &clase.edificio)?);
        }
    }

    Ok(Grupo {
        id: grupo_id,
        numero: clase.grupo.clone(),
        materia_id: materia.id.clone(),
        materia_nombre: materia.nombre.clone(),
        profesor: clase.profesor.clone(),
        sesiones,
    })
}
