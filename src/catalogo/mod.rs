// Catálogo de materias y grupos leído desde horarios.json.
//
// Es el colaborador externo que alimenta al optimizador: resuelve
// (carrera, turno, semestres) a materias y cada materia a sus grupos.

mod oferta;

pub use oferta::{parsear_clave_semestre, ClaseJson, HorariosJson, RangosDia};

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::error::{Result, SiohError};
use crate::models::{Grupo, Materia, Turno};

#[derive(Debug, Clone)]
pub struct Catalogo {
    datos: HorariosJson,
}

impl Catalogo {
    pub fn desde_str(json: &str) -> Result<Self> {
        let datos: HorariosJson = serde_json::from_str(json)?;
        Ok(Self { datos })
    }

    pub fn desde_archivo<P: AsRef<Path>>(ruta: P) -> Result<Self> {
        let ruta = ruta.as_ref();
        let contenido = std::fs::read_to_string(ruta)?;
        let catalogo = Self::desde_str(&contenido)?;
        log::info!(
            "[catalogo] '{}' cargado: {} carreras",
            ruta.display(),
            catalogo.datos.horarios.len()
        );
        Ok(catalogo)
    }

    pub fn carreras(&self) -> Vec<String> {
        self.datos.horarios.keys().cloned().collect()
    }

    /// Bloques (semestre, clases) de una carrera para un turno.
    fn bloques<'a>(&'a self, carrera: &str, turno: Turno) -> Vec<(u8, &'a [ClaseJson])> {
        let Some(por_clave) = self.datos.horarios.get(carrera) else {
            log::warn!("[catalogo] carrera desconocida '{}'", carrera);
            return Vec::new();
        };
        por_clave
            .iter()
            .filter_map(|(clave, clases)| match parsear_clave_semestre(clave) {
                Some((t, semestre)) if t == turno => Some((semestre, clases.as_slice())),
                _ => None,
            })
            .collect()
    }

    pub fn semestres_disponibles(&self, carrera: &str, turno: Turno) -> Vec<u8> {
        let mut semestres: Vec<u8> = self.bloques(carrera, turno).into_iter().map(|(s, _)| s).collect();
        semestres.sort_unstable();
        semestres.dedup();
        semestres
    }

    /// Materias únicas por (asignatura, semestre), ordenadas por semestre y nombre.
    pub fn materias_disponibles(&self, carrera: &str, turno: Turno, semestres: &[u8]) -> Vec<Materia> {
        let mut vistas: HashSet<String> = HashSet::new();
        let mut materias: Vec<Materia> = Vec::new();

        for (semestre, clases) in self.bloques(carrera, turno) {
            if !semestres.contains(&semestre) {
                continue;
            }
            for clase in clases {
                let id = format!("{}-{}", clase.asignatura, semestre);
                if vistas.insert(id.clone()) {
                    materias.push(Materia {
                        id,
                        nombre: clase.asignatura.clone(),
                        codigo: clase.grupo.chars().take(2).collect(),
                        semestre,
                        turno,
                    });
                }
            }
        }

        materias.sort_by(|a, b| a.semestre.cmp(&b.semestre).then_with(|| a.nombre.cmp(&b.nombre)));
        materias
    }

    /// Grupos de una materia. Los ids son deterministas ("{materia}/{grupo}",
    /// con sufijo "#n" si el mismo grupo se repite) para que los fijados
    /// sobrevivan a una recarga del catálogo.
    pub fn grupos_de_materia(&self, carrera: &str, turno: Turno, materia: &Materia) -> Result<Vec<Grupo>> {
        let mut repetidos: HashMap<&str, usize> = HashMap::new();
        let mut grupos = Vec::new();

        for (semestre, clases) in self.bloques(carrera, turno) {
            if semestre != materia.semestre {
                continue;
            }
            for clase in clases.iter().filter(|c| c.asignatura == materia.nombre) {
                let n = repetidos.entry(clase.grupo.as_str()).or_insert(0);
                *n += 1;
                let id = if *n == 1 {
                    format!("{}/{}", materia.id, clase.grupo)
                } else {
                    format!("{}/{}#{}", materia.id, clase.grupo, n)
                };
                grupos.push(oferta::clase_a_grupo(clase, id, materia)?);
            }
        }
        Ok(grupos)
    }

    /// Todos los grupos, indexados por id de materia.
    pub fn todos_los_grupos(&self, carrera: &str, turno: Turno, semestres: &[u8]) -> Result<BTreeMap<String, Vec<Grupo>>> {
        let mut out = BTreeMap::new();
        for materia in self.materias_disponibles(carrera, turno, semestres) {
            let grupos = self.grupos_de_materia(carrera, turno, &materia)?;
            out.insert(materia.id, grupos);
        }
        Ok(out)
    }

    /// Entrada del optimizador para las materias elegidas, en el orden pedido.
    /// Un id desconocido da `SiohError::NoEncontrado`; un id repetido se resuelve
    /// igual las dos veces.
    pub fn grupos_por_materia(
        &self,
        carrera: &str,
        turno: Turno,
        semestres: &[u8],
        materia_ids: &[String],
    ) -> Result<Vec<Vec<Grupo>>> {
        let todos = self.todos_los_grupos(carrera, turno, semestres)?;
        materia_ids
            .iter()
            .map(|id| {
                todos
                    .get(id)
                    .cloned()
                    .ok_or_else(|| SiohError::NoEncontrado(format!("materia '{}' en {} / {}", id, carrera, turno.clave())))
            })
            .collect()
    }
}
