// Generación de combinaciones: un grupo por materia (producto cartesiano),
// con grupos fijados y un tope duro de combinaciones.

use std::collections::HashSet;
use std::iter::Take;

use crate::models::Grupo;

/// Reduce la lista de candidatos de cada materia al grupo fijado, si existe.
///
/// Si por error hay varios grupos fijados de la misma materia, gana el de
/// menor id (determinista, independiente del orden de entrada).
pub fn aplicar_fijados<'a>(grupos_por_materia: &'a [Vec<Grupo>], fijados: &HashSet<String>) -> Vec<Vec<&'a Grupo>> {
    grupos_por_materia
        .iter()
        .map(|grupos| {
            let fijados_materia: Vec<&Grupo> = grupos.iter().filter(|g| g.esta_fijado(fijados)).collect();
            if fijados_materia.len() > 1 {
                log::warn!(
                    "[combinaciones] {} grupos fijados en la materia '{}', se usa el de menor id",
                    fijados_materia.len(),
                    fijados_materia[0].materia_id
                );
            }
            match fijados_materia.into_iter().min_by(|a, b| a.id.cmp(&b.id)) {
                Some(fijado) => vec![fijado],
                None => grupos.iter().collect(),
            }
        })
        .collect()
}

/// Iterador perezoso sobre el producto cartesiano de los candidatos.
///
/// Orden: la primera materia es la más significativa (igual que un producto
/// recursivo). Sin materias produce una única combinación vacía; si alguna
/// materia no tiene candidatos no produce nada.
pub struct Combinaciones<'a, 'g> {
    candidatos: &'a [Vec<&'g Grupo>],
    indices: Vec<usize>,
    terminado: bool,
}

impl<'a, 'g> Combinaciones<'a, 'g> {
    pub fn new(candidatos: &'a [Vec<&'g Grupo>]) -> Self {
        Self {
            candidatos,
            indices: vec![0; candidatos.len()],
            terminado: candidatos.iter().any(|c| c.is_empty()),
        }
    }

    /// Total teórico de combinaciones (saturado en `usize::MAX`).
    pub fn total(&self) -> usize {
        self.candidatos
            .iter()
            .fold(1usize, |acc, c| acc.saturating_mul(c.len()))
    }
}

impl<'a, 'g> Iterator for Combinaciones<'a, 'g> {
    type Item = Vec<&'g Grupo>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.terminado {
            return None;
        }
        let actual: Vec<&'g Grupo> = self
            .indices
            .iter()
            .enumerate()
            .map(|(m, &i)| self.candidatos[m][i])
            .collect();

        // avanzar el "odómetro" desde la última materia
        let mut pos = self.indices.len();
        loop {
            if pos == 0 {
                self.terminado = true;
                break;
            }
            pos -= 1;
            self.indices[pos] += 1;
            if self.indices[pos] < self.candidatos[pos].len() {
                break;
            }
            self.indices[pos] = 0;
        }
        Some(actual)
    }
}

/// Combinaciones perezosas, a lo sumo `limite`. Lo que exceda el límite
/// simplemente nunca se considera.
pub fn generar_combinaciones<'a, 'g>(candidatos: &'a [Vec<&'g Grupo>], limite: usize) -> Take<Combinaciones<'a, 'g>> {
    let iter = Combinaciones::new(candidatos);
    let total = iter.total();
    if total > limite {
        log::warn!(
            "[combinaciones] {} combinaciones posibles, se evaluarán sólo las primeras {}",
            total, limite
        );
    }
    iter.take(limite)
}
