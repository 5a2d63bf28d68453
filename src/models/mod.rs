// Estructuras de datos principales

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, SiohError};

/// Último minuto representable de un día (23:59).
pub const MINUTO_MAXIMO: u16 = 1439;

/// Días hábiles de la semana. El orden de las variantes es el orden fijo de
/// recorrido usado por el validador (Lunes..Sábado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dia {
    Lunes,
    Martes,
    #[serde(rename = "Miércoles")]
    Miercoles,
    Jueves,
    Viernes,
    #[serde(rename = "Sábado")]
    Sabado,
}

impl Dia {
    pub const TODOS: [Dia; 6] = [
        Dia::Lunes,
        Dia::Martes,
        Dia::Miercoles,
        Dia::Jueves,
        Dia::Viernes,
        Dia::Sabado,
    ];

    /// Posición 0..6 dentro de `Dia::TODOS`.
    pub fn indice(self) -> usize {
        self as usize
    }

    /// Abreviaturas usadas por el catálogo de horarios ("lun", "mar", ...).
    pub fn desde_abreviatura(abrev: &str) -> Option<Dia> {
        match abrev.trim().to_lowercase().as_str() {
            "lun" => Some(Dia::Lunes),
            "mar" => Some(Dia::Martes),
            "mie" | "mié" => Some(Dia::Miercoles),
            "jue" => Some(Dia::Jueves),
            "vie" => Some(Dia::Viernes),
            "sab" | "sáb" => Some(Dia::Sabado),
            _ => None,
        }
    }

    pub fn nombre(self) -> &'static str {
        match self {
            Dia::Lunes => "Lunes",
            Dia::Martes => "Martes",
            Dia::Miercoles => "Miércoles",
            Dia::Jueves => "Jueves",
            Dia::Viernes => "Viernes",
            Dia::Sabado => "Sábado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turno {
    Matutino,
    Vespertino,
}

impl Turno {
    pub fn clave(self) -> &'static str {
        match self {
            Turno::Matutino => "matutino",
            Turno::Vespertino => "vespertino",
        }
    }
}

impl std::str::FromStr for Turno {
    type Err = SiohError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "matutino" => Ok(Turno::Matutino),
            "vespertino" => Ok(Turno::Vespertino),
            other => Err(SiohError::Catalogo(format!("turno desconocido '{}'", other))),
        }
    }
}

/// Una sesión semanal de un grupo. Horas en minutos desde medianoche,
/// intervalo semiabierto [hora_inicio, hora_fin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sesion {
    pub dia: Dia,
    pub hora_inicio: u16,
    pub hora_fin: u16,
    #[serde(default)]
    pub salon: String,
    #[serde(default)]
    pub edificio: String,
}

impl Sesion {
    /// Constructor validado: rechaza horas fuera de 0..=1439 o inicio >= fin.
    pub fn nueva(dia: Dia, hora_inicio: u16, hora_fin: u16, salon: &str, edificio: &str) -> Result<Self> {
        let s = Sesion {
            dia,
            hora_inicio,
            hora_fin,
            salon: salon.to_string(),
            edificio: edificio.to_string(),
        };
        s.validar()?;
        Ok(s)
    }

    pub fn validar(&self) -> Result<()> {
        if self.hora_inicio > MINUTO_MAXIMO || self.hora_fin > MINUTO_MAXIMO {
            return Err(SiohError::SesionInvalida(format!(
                "{} {}-{}: fuera de rango 0..={}",
                self.dia.nombre(), self.hora_inicio, self.hora_fin, MINUTO_MAXIMO
            )));
        }
        if self.hora_inicio >= self.hora_fin {
            return Err(SiohError::SesionInvalida(format!(
                "{} {}-{}: el inicio debe ser anterior al fin",
                self.dia.nombre(), self.hora_inicio, self.hora_fin
            )));
        }
        Ok(())
    }

    pub fn duracion(&self) -> u16 {
        self.hora_fin.saturating_sub(self.hora_inicio)
    }
}

/// Un grupo (sección) de una materia. No se muta tras cargarse; la fijación
/// se lleva aparte como conjunto de ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grupo {
    pub id: String,
    pub numero: String,
    pub materia_id: String,
    #[serde(default)]
    pub materia_nombre: String,
    #[serde(default)]
    pub profesor: String,
    pub sesiones: Vec<Sesion>,
}

impl Grupo {
    pub fn esta_fijado(&self, fijados: &HashSet<String>) -> bool {
        fijados.contains(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Materia {
    pub id: String,
    pub nombre: String,
    pub codigo: String,
    pub semestre: u8,
    pub turno: Turno,
}

/// Una combinación válida (sin traslapes) con un grupo por materia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horario {
    pub id: String,
    pub nombre: String,
    pub grupos: Vec<Grupo>,
    pub sesiones: Vec<Sesion>,
    pub horas_muertas: u32,
    pub puntuacion: f64,
    pub creado_en: DateTime<Utc>,
}

/// Resumen de solo lectura de un horario para la capa de presentación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstadisticasHorario {
    pub total_materias: usize,
    pub dias_con_clases: usize,
    pub horas_muertas: u32,
    pub horas_muertas_texto: String,
    pub hora_inicio: u16,
    pub hora_fin: u16,
    pub puntuacion: f64,
}
