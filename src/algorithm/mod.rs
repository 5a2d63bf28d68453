// Núcleo del optimizador de horarios.
//
// Flujo: grupos por materia + fijados -> combinaciones -> validación de
// traslapes -> puntuación -> selección top-K -> `Horario`s.
pub mod tiempo;
pub mod conflict;
pub mod combinaciones;
pub mod puntuacion;
pub mod optimizer;

pub use optimizer::{generar_horarios, obtener_estadisticas_horario, OpcionesOptimizador};
