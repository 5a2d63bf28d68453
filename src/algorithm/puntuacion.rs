// Puntuación de horarios y selección de los mejores.

use crate::algorithm::optimizer::OpcionesOptimizador;
use crate::models::{Dia, Horario};

const PUNTUACION_BASE: f64 = 100.0;

/// Calcula la puntuación de un horario (mayor = mejor).
///
/// Partiendo de 100:
/// - `+ horas_muertas/60 * pesos.horas_muertas` si `minimizar_horas_muertas`
/// - `+ (6 - dias_con_clases) * pesos.dias_libres` si `maximizar_dias_libres`
/// - `+ (hora_inicio_preferida - hora_temprana)/60 * pesos.hora_temprana` si la
///   primera clase empieza antes de la hora preferida
///
/// El resultado se redondea a 2 decimales. No tiene cota: sólo sirve para ordenar.
pub fn calcular_puntuacion(
    horas_muertas: u32,
    dias_con_clases: usize,
    hora_temprana: u16,
    opciones: &OpcionesOptimizador,
) -> f64 {
    let pesos = &opciones.pesos;
    let mut puntuacion = PUNTUACION_BASE;

    if opciones.minimizar_horas_muertas {
        puntuacion += f64::from(horas_muertas) / 60.0 * pesos.horas_muertas;
    }

    if opciones.maximizar_dias_libres {
        let dias_libres = Dia::TODOS.len().saturating_sub(dias_con_clases) as f64;
        puntuacion += dias_libres * pesos.dias_libres;
    }

    if hora_temprana < opciones.hora_inicio_preferida {
        let horas_temprano = f64::from(opciones.hora_inicio_preferida - hora_temprana) / 60.0;
        puntuacion += horas_temprano * pesos.hora_temprana;
    }

    (puntuacion * 100.0).round() / 100.0
}

/// Política de selección: top-K simple. Ordena de mayor a menor puntuación
/// (orden estable: en empate se conserva el orden de construcción) y trunca a `max`.
pub fn seleccionar_mejores(mut horarios: Vec<Horario>, max: usize) -> Vec<Horario> {
    horarios.sort_by(|a, b| b.puntuacion.total_cmp(&a.puntuacion));
    horarios.truncate(max);
    horarios
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_con_pesos_por_defecto() {
        let op = OpcionesOptimizador::default();
        // 90 min muertos, 2 días con clases, empieza 06:00
        // 100 - 15 + 80 - 5 = 160
        assert_eq!(calcular_puntuacion(90, 2, 360, &op), 160.0);
    }

    #[test]
    fn sin_criterios_solo_penaliza_temprano() {
        let op = OpcionesOptimizador {
            minimizar_horas_muertas: false,
            maximizar_dias_libres: false,
            ..Default::default()
        };
        assert_eq!(calcular_puntuacion(600, 6, 420, &op), 100.0);
        assert_eq!(calcular_puntuacion(600, 6, 390, &op), 97.5);
    }

    #[test]
    fn redondea_a_dos_decimales() {
        let op = OpcionesOptimizador::default();
        // 7 min => -1.1666..
        assert_eq!(calcular_puntuacion(7, 6, 420, &op), 98.83);
    }
}
