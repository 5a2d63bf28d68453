// Funciones para detectar traslapes y medir un conjunto de sesiones.
//
// Todas agrupan por día (Lunes..Sábado), ordenan cada día por hora de inicio
// y recorren pares adyacentes: O(n log n).

use crate::algorithm::tiempo::intervalos_se_solapan;
use crate::models::{Dia, Sesion};

/// Métricas de un conjunto de sesiones sin traslapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricasSesiones {
    pub horas_muertas: u32,
    pub dias_con_clases: usize,
    pub hora_inicio: u16,
    pub hora_fin: u16,
}

type SesionesPorDia<'a> = [Vec<&'a Sesion>; 6];

fn agrupar_por_dia<'a, I>(sesiones: I) -> SesionesPorDia<'a>
where
    I: IntoIterator<Item = &'a Sesion>,
{
    let mut por_dia: SesionesPorDia<'a> = std::array::from_fn(|_| Vec::new());
    for s in sesiones {
        por_dia[s.dia.indice()].push(s);
    }
    for dia in por_dia.iter_mut() {
        if dia.len() > 1 {
            dia.sort_by_key(|s| s.hora_inicio);
        }
    }
    por_dia
}

/// Recorre el conjunto una sola vez: `None` si hay traslape, si no todas las métricas.
pub fn analizar_sesiones<'a, I>(sesiones: I) -> Option<MetricasSesiones>
where
    I: IntoIterator<Item = &'a Sesion>,
{
    let por_dia = agrupar_por_dia(sesiones);
    let mut horas_muertas: u32 = 0;
    let mut dias_con_clases = 0usize;
    let mut hora_inicio: Option<u16> = None;
    let mut hora_fin: u16 = 0;

    for dia in Dia::TODOS {
        let ordenadas = &por_dia[dia.indice()];
        let (Some(primera), Some(ultima)) = (ordenadas.first(), ordenadas.last()) else {
            continue;
        };
        dias_con_clases += 1;
        hora_inicio = Some(hora_inicio.map_or(primera.hora_inicio, |h| h.min(primera.hora_inicio)));
        // sin traslapes, la última por inicio es también la que termina más tarde
        hora_fin = hora_fin.max(ultima.hora_fin);

        for par in ordenadas.windows(2) {
            let (prev, actual) = (par[0], par[1]);
            if actual.hora_inicio < prev.hora_fin {
                return None;
            }
            horas_muertas += u32::from(actual.hora_inicio - prev.hora_fin);
        }
    }

    Some(MetricasSesiones {
        horas_muertas,
        dias_con_clases,
        hora_inicio: hora_inicio.unwrap_or(0),
        hora_fin,
    })
}

/// True si dos sesiones comparten día y sus intervalos se solapan.
pub fn hay_traslape(a: &Sesion, b: &Sesion) -> bool {
    a.dia == b.dia && intervalos_se_solapan(a.hora_inicio, a.hora_fin, b.hora_inicio, b.hora_fin)
}

/// True si ningún par de sesiones del conjunto se traslapa.
pub fn validar_sin_traslapes(sesiones: &[Sesion]) -> bool {
    let por_dia = agrupar_por_dia(sesiones);
    Dia::TODOS.iter().all(|dia| {
        por_dia[dia.indice()]
            .windows(2)
            .all(|par| par[1].hora_inicio >= par[0].hora_fin)
    })
}

/// Minutos de huecos entre clases consecutivas del mismo día. No cuenta el
/// tiempo antes de la primera ni después de la última clase.
pub fn calcular_horas_muertas(sesiones: &[Sesion]) -> u32 {
    let por_dia = agrupar_por_dia(sesiones);
    por_dia
        .iter()
        .flat_map(|dia| dia.windows(2))
        .map(|par| u32::from(par[1].hora_inicio.saturating_sub(par[0].hora_fin)))
        .sum()
}

pub fn contar_dias_con_clases(sesiones: &[Sesion]) -> usize {
    let mut vistos = [false; 6];
    for s in sesiones {
        vistos[s.dia.indice()] = true;
    }
    vistos.iter().filter(|v| **v).count()
}

/// Hora de inicio más temprana; 0 para un conjunto vacío.
pub fn hora_mas_temprana(sesiones: &[Sesion]) -> u16 {
    sesiones.iter().map(|s| s.hora_inicio).min().unwrap_or(0)
}

/// Hora de fin más tardía; 0 para un conjunto vacío.
pub fn hora_mas_tardia(sesiones: &[Sesion]) -> u16 {
    sesiones.iter().map(|s| s.hora_fin).max().unwrap_or(0)
}
