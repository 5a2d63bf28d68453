// Optimizador de horarios: genera combinaciones, descarta traslapes,
// puntúa y devuelve los mejores.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::algorithm::combinaciones::{aplicar_fijados, generar_combinaciones};
use crate::algorithm::conflict::analizar_sesiones;
use crate::algorithm::puntuacion::{calcular_puntuacion, seleccionar_mejores};
use crate::algorithm::tiempo::formatear_duracion;
use crate::config::{Pesos, HORA_FIN_DIA, HORA_INICIO_DIA, LIMITE_COMBINACIONES, MAX_HORARIOS_GENERADOS};
use crate::error::{Result, SiohError};
use crate::models::{EstadisticasHorario, Grupo, Horario, MINUTO_MAXIMO};

/// Opciones de una generación. Todos los campos tienen default, por lo que
/// `{}` es un JSON válido.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpcionesOptimizador {
    pub minimizar_horas_muertas: bool,
    pub maximizar_dias_libres: bool,
    /// Minutos desde medianoche; antes de esta hora se penaliza.
    pub hora_inicio_preferida: u16,
    /// Se acepta y valida, pero no participa en la puntuación.
    pub hora_fin_preferida: u16,
    pub pesos: Pesos,
    /// Cantidad máxima de horarios devueltos (K).
    pub max_horarios: usize,
}

impl Default for OpcionesOptimizador {
    fn default() -> Self {
        Self {
            minimizar_horas_muertas: true,
            maximizar_dias_libres: true,
            hora_inicio_preferida: HORA_INICIO_DIA,
            hora_fin_preferida: HORA_FIN_DIA,
            pesos: Pesos::default(),
            max_horarios: MAX_HORARIOS_GENERADOS,
        }
    }
}

impl OpcionesOptimizador {
    pub fn validar(&self) -> Result<()> {
        if self.hora_inicio_preferida > MINUTO_MAXIMO || self.hora_fin_preferida > MINUTO_MAXIMO {
            return Err(SiohError::OpcionesInvalidas("horas preferidas fuera de 0..=1439".into()));
        }
        if self.hora_inicio_preferida >= self.hora_fin_preferida {
            return Err(SiohError::OpcionesInvalidas(
                "hora_inicio_preferida debe ser anterior a hora_fin_preferida".into(),
            ));
        }
        let p = &self.pesos;
        if ![p.horas_muertas, p.dias_libres, p.hora_temprana].iter().all(|w| w.is_finite()) {
            return Err(SiohError::OpcionesInvalidas("los pesos deben ser finitos".into()));
        }
        if self.max_horarios == 0 {
            return Err(SiohError::OpcionesInvalidas("max_horarios debe ser mayor a 0".into()));
        }
        Ok(())
    }
}

/// Genera los mejores horarios posibles, ordenados de mejor a peor.
///
/// - Un grupo fijado elimina las demás alternativas de su materia.
/// - Se evalúan a lo sumo `LIMITE_COMBINACIONES` combinaciones y la búsqueda se
///   corta al juntar `2 * max_horarios` horarios válidos; con entradas muy
///   grandes el resultado puede no ser el óptimo global.
/// - Selección top-K: se devuelven los `max_horarios` de mayor puntuación.
///
/// Sin materias, o si todas las combinaciones tienen traslapes, devuelve una
/// lista vacía.
pub fn generar_horarios(
    grupos_por_materia: &[Vec<Grupo>],
    fijados: &HashSet<String>,
    opciones: &OpcionesOptimizador,
) -> Vec<Horario> {
    if grupos_por_materia.is_empty() {
        return Vec::new();
    }

    let candidatos = aplicar_fijados(grupos_por_materia, fijados);
    let tope_validos = opciones.max_horarios.saturating_mul(2);

    let mut validos: Vec<Horario> = Vec::new();
    let mut evaluadas = 0usize;
    for combinacion in generar_combinaciones(&candidatos, LIMITE_COMBINACIONES) {
        evaluadas += 1;
        if let Some(horario) = ensamblar_horario(&combinacion, validos.len() + 1, opciones) {
            validos.push(horario);
            if validos.len() >= tope_validos {
                break;
            }
        }
    }

    log::debug!(
        "[optimizer] {} materias, {} combinaciones evaluadas, {} válidas",
        grupos_por_materia.len(), evaluadas, validos.len()
    );

    seleccionar_mejores(validos, opciones.max_horarios)
}

/// Construye un `Horario` a partir de una combinación, o `None` si tiene traslapes.
///
/// Las horas muertas guardadas y las usadas en la puntuación salen del mismo
/// recorrido. `ordinal` es la posición en el orden de construcción (no el ranking).
pub fn ensamblar_horario(combinacion: &[&Grupo], ordinal: usize, opciones: &OpcionesOptimizador) -> Option<Horario> {
    let metricas = analizar_sesiones(combinacion.iter().flat_map(|g| g.sesiones.iter()))?;
    let puntuacion = calcular_puntuacion(
        metricas.horas_muertas,
        metricas.dias_con_clases,
        metricas.hora_inicio,
        opciones,
    );

    Some(Horario {
        id: Uuid::new_v4().to_string(),
        nombre: format!("Horario {}", ordinal),
        grupos: combinacion.iter().map(|g| (*g).clone()).collect(),
        sesiones: combinacion.iter().flat_map(|g| g.sesiones.iter().cloned()).collect(),
        horas_muertas: metricas.horas_muertas,
        puntuacion,
        creado_en: Utc::now(),
    })
}

/// Estadísticas de un horario ya construido (sin efectos secundarios).
pub fn obtener_estadisticas_horario(horario: &Horario) -> EstadisticasHorario {
    use crate::algorithm::conflict::{contar_dias_con_clases, hora_mas_tardia, hora_mas_temprana};

    EstadisticasHorario {
        total_materias: horario.grupos.len(),
        dias_con_clases: contar_dias_con_clases(&horario.sesiones),
        horas_muertas: horario.horas_muertas,
        horas_muertas_texto: formatear_duracion(horario.horas_muertas),
        hora_inicio: hora_mas_temprana(&horario.sesiones),
        hora_fin: hora_mas_tardia(&horario.sesiones),
        puntuacion: horario.puntuacion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opciones_por_defecto_son_validas() {
        assert!(OpcionesOptimizador::default().validar().is_ok());
    }

    #[test]
    fn opciones_invalidas() {
        let invertidas = OpcionesOptimizador {
            hora_inicio_preferida: 900,
            hora_fin_preferida: 800,
            ..Default::default()
        };
        assert!(invertidas.validar().is_err());

        let sin_cupo = OpcionesOptimizador { max_horarios: 0, ..Default::default() };
        assert!(sin_cupo.validar().is_err());

        let mut peso_nan = OpcionesOptimizador::default();
        peso_nan.pesos.dias_libres = f64::NAN;
        assert!(peso_nan.validar().is_err());
    }

    #[test]
    fn opciones_desde_json_vacio() {
        let op: OpcionesOptimizador = serde_json::from_str("{}").unwrap();
        assert_eq!(op, OpcionesOptimizador::default());
    }
}
