// Configuración global de SIOH: constantes del optimizador y parámetros del
// servidor leídos desde el entorno (`.env` vía dotenv).

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Límite máximo de horarios devueltos por una generación.
pub const MAX_HORARIOS_GENERADOS: usize = 100;

/// Tope duro de combinaciones evaluadas por llamada (explosión combinatoria).
pub const LIMITE_COMBINACIONES: usize = 10_000;

/// 07:00 en minutos desde medianoche.
pub const HORA_INICIO_DIA: u16 = 420;

/// 22:00 en minutos desde medianoche.
pub const HORA_FIN_DIA: u16 = 1320;

pub const PESO_HORAS_MUERTAS: f64 = -10.0;
pub const PESO_DIAS_LIBRES: f64 = 20.0;
pub const PESO_HORA_TEMPRANA: f64 = -5.0;

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_CATALOGO: &str = "datafiles/horarios.json";
const DEFAULT_GUARDADOS: &str = "data/horarios_guardados.json";

/// Pesos de la función de puntuación.
///
/// `horas_muertas` y `hora_temprana` son negativos (penalizan), `dias_libres`
/// es positivo (bonifica).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pesos {
    pub horas_muertas: f64,
    pub dias_libres: f64,
    pub hora_temprana: f64,
}

impl Default for Pesos {
    fn default() -> Self {
        Self {
            horas_muertas: PESO_HORAS_MUERTAS,
            dias_libres: PESO_DIAS_LIBRES,
            hora_temprana: PESO_HORA_TEMPRANA,
        }
    }
}

/// Parámetros del servidor HTTP.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub catalogo_path: PathBuf,
    pub guardados_path: PathBuf,
    pub max_horarios: usize,
    pub pesos: Pesos,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            catalogo_path: PathBuf::from(DEFAULT_CATALOGO),
            guardados_path: PathBuf::from(DEFAULT_GUARDADOS),
            max_horarios: MAX_HORARIOS_GENERADOS,
            pesos: Pesos::default(),
        }
    }
}

impl ServerConfig {
    /// Construye la configuración a partir de variables de entorno.
    /// Carga `.env` si existe. Valores inválidos caen al default con un warning.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        let defaults = Self::default();

        let max_horarios = match leer_var::<usize>("SIOH_MAX_HORARIOS") {
            Some(0) => {
                log::warn!("SIOH_MAX_HORARIOS=0 no es válido, usando {}", defaults.max_horarios);
                defaults.max_horarios
            }
            Some(n) => n,
            None => defaults.max_horarios,
        };

        Self {
            bind_addr: env::var("SIOH_BIND").unwrap_or(defaults.bind_addr),
            catalogo_path: env::var("SIOH_CATALOGO").map(PathBuf::from).unwrap_or(defaults.catalogo_path),
            guardados_path: env::var("SIOH_GUARDADOS").map(PathBuf::from).unwrap_or(defaults.guardados_path),
            max_horarios,
            pesos: Pesos {
                horas_muertas: leer_peso("SIOH_PESO_HORAS_MUERTAS").unwrap_or(defaults.pesos.horas_muertas),
                dias_libres: leer_peso("SIOH_PESO_DIAS_LIBRES").unwrap_or(defaults.pesos.dias_libres),
                hora_temprana: leer_peso("SIOH_PESO_HORA_TEMPRANA").unwrap_or(defaults.pesos.hora_temprana),
            },
        }
    }

    /// Opciones usadas cuando una petición no trae las suyas.
    pub fn opciones_por_defecto(&self) -> crate::algorithm::OpcionesOptimizador {
        crate::algorithm::OpcionesOptimizador {
            pesos: self.pesos,
            max_horarios: self.max_horarios,
            ..Default::default()
        }
    }
}

fn leer_var<T: FromStr>(nombre: &str) -> Option<T> {
    let raw = env::var(nombre).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("valor inválido para {}: '{}', usando default", nombre, raw);
            None
        }
    }
}

/// Como `leer_var`, pero sólo acepta pesos finitos (ni NaN ni inf).
fn leer_peso(nombre: &str) -> Option<f64> {
    let raw = env::var(nombre).ok()?;
    let peso = parsear_peso(&raw);
    if peso.is_none() {
        log::warn!("valor inválido para {}: '{}', usando default", nombre, raw);
    }
    peso
}

fn parsear_peso(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}
