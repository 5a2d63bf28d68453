use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::algorithm::OpcionesOptimizador;
use crate::error::Result;
use crate::models::{Grupo, Horario, Turno};

/// Pesos enviados por el cliente; los ausentes se toman del servidor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PesosParciales {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horas_muertas: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dias_libres: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hora_temprana: Option<f64>,
}

/// Opciones tal como llegan en la petición. Cada campo ausente conserva el
/// valor configurado en el servidor (`ServerConfig::opciones_por_defecto`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpcionesParciales {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimizar_horas_muertas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximizar_dias_libres: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hora_inicio_preferida: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hora_fin_preferida: Option<u16>,
    pub pesos: PesosParciales,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_horarios: Option<usize>,
}

impl OpcionesParciales {
    /// Superpone lo enviado sobre `base` y valida el resultado.
    pub fn sobre(&self, base: OpcionesOptimizador) -> Result<OpcionesOptimizador> {
        let pesos = base.pesos;
        let opciones = OpcionesOptimizador {
            minimizar_horas_muertas: self.minimizar_horas_muertas.unwrap_or(base.minimizar_horas_muertas),
            maximizar_dias_libres: self.maximizar_dias_libres.unwrap_or(base.maximizar_dias_libres),
            hora_inicio_preferida: self.hora_inicio_preferida.unwrap_or(base.hora_inicio_preferida),
            hora_fin_preferida: self.hora_fin_preferida.unwrap_or(base.hora_fin_preferida),
            pesos: crate::config::Pesos {
                horas_muertas: self.pesos.horas_muertas.unwrap_or(pesos.horas_muertas),
                dias_libres: self.pesos.dias_libres.unwrap_or(pesos.dias_libres),
                hora_temprana: self.pesos.hora_temprana.unwrap_or(pesos.hora_temprana),
            },
            max_horarios: self.max_horarios.unwrap_or(base.max_horarios),
        };
        opciones.validar()?;
        Ok(opciones)
    }
}

/// Petición de generación con los grupos ya resueltos por el cliente.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "grupos_por_materia": [
///     [ { "id": "calc-1", "numero": "1CM1", "materia_id": "calc",
///         "sesiones": [ { "dia": "Lunes", "hora_inicio": 420, "hora_fin": 540 } ] } ]
///   ],
///   "grupos_fijados": ["calc-1"],
///   "opciones": { "minimizar_horas_muertas": true, "hora_inicio_preferida": 420 }
/// }
/// ```
/// `grupos_fijados` y `opciones` (o cualquiera de sus campos) son opcionales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerarRequest {
    pub grupos_por_materia: Vec<Vec<Grupo>>,
    #[serde(default)]
    pub grupos_fijados: Vec<String>,
    #[serde(default)]
    pub opciones: OpcionesParciales,
}

impl GenerarRequest {
    /// Valida cada sesión en la frontera. El optimizador no vuelve a validar
    /// sesiones por combinación.
    pub fn validar(&self) -> Result<()> {
        for grupo in self.grupos_por_materia.iter().flatten() {
            for sesion in &grupo.sesiones {
                sesion.validar()?;
            }
        }
        Ok(())
    }

    pub fn fijados(&self) -> HashSet<String> {
        self.grupos_fijados.iter().cloned().collect()
    }
}

/// Petición de generación a partir del catálogo del servidor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerarCatalogoRequest {
    pub carrera: String,
    pub turno: Turno,
    pub semestres: Vec<u8>,
    /// Ids de materia tal como los devuelve `/catalogo/materias`.
    pub materias: Vec<String>,
    #[serde(default)]
    pub grupos_fijados: Vec<String>,
    #[serde(default)]
    pub opciones: OpcionesParciales,
}

impl GenerarCatalogoRequest {
    pub fn fijados(&self) -> HashSet<String> {
        self.grupos_fijados.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerarResponse {
    pub horarios_count: usize,
    pub horarios: Vec<Horario>,
}

impl From<Vec<Horario>> for GenerarResponse {
    fn from(horarios: Vec<Horario>) -> Self {
        Self { horarios_count: horarios.len(), horarios }
    }
}

pub fn parse_generar_request(json_str: &str) -> Result<GenerarRequest> {
    let req = serde_json::from_str::<GenerarRequest>(json_str)?;
    req.validar()?;
    Ok(req)
}
