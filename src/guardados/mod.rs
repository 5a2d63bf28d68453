// Colección de horarios guardados por el usuario, persistida como JSON.
//
// El optimizador nunca lee ni escribe aquí: quien llama copia los `Horario`
// generados que quiera conservar.

use chrono::Utc;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Horario;

#[derive(Debug, Default)]
pub struct HorariosGuardados {
    horarios: Vec<Horario>,
    ruta: Option<PathBuf>,
}

impl HorariosGuardados {
    /// Colección sin archivo asociado.
    pub fn en_memoria() -> Self {
        Self::default()
    }

    /// Carga desde `ruta`. Archivo inexistente o vacío => colección vacía;
    /// archivo corrupto => colección vacía con un warning (se sobrescribe al guardar).
    pub fn cargar<P: AsRef<Path>>(ruta: P) -> Result<Self> {
        let ruta = ruta.as_ref().to_path_buf();
        let mut horarios: Vec<Horario> = Vec::new();
        if ruta.exists() {
            let contenido = std::fs::read_to_string(&ruta)?;
            if !contenido.trim().is_empty() {
                match serde_json::from_str::<Vec<Horario>>(&contenido) {
                    Ok(v) => horarios = v,
                    Err(e) => log::warn!(
                        "[guardados] '{}' no es válido ({}), se empieza vacío",
                        ruta.display(), e
                    ),
                }
            }
        }
        log::info!("[guardados] {} horarios cargados de '{}'", horarios.len(), ruta.display());
        Ok(Self { horarios, ruta: Some(ruta) })
    }

    /// Agrega una copia del horario si su id no está guardado todavía.
    /// La copia guardada recibe una nueva fecha `creado_en` (momento del guardado).
    /// Devuelve `false` si ya existía.
    pub fn guardar(&mut self, horario: &Horario) -> Result<bool> {
        if self.horarios.iter().any(|h| h.id == horario.id) {
            return Ok(false);
        }
        let mut copia = horario.clone();
        copia.creado_en = Utc::now();
        self.horarios.push(copia);
        self.persistir()?;
        Ok(true)
    }

    /// Elimina por id. Devuelve `false` si no existía.
    pub fn eliminar(&mut self, id: &str) -> Result<bool> {
        let antes = self.horarios.len();
        self.horarios.retain(|h| h.id != id);
        if self.horarios.len() == antes {
            return Ok(false);
        }
        self.persistir()?;
        Ok(true)
    }

    pub fn obtener(&self, id: &str) -> Option<&Horario> {
        self.horarios.iter().find(|h| h.id == id)
    }

    pub fn listar(&self) -> &[Horario] {
        &self.horarios
    }

    fn persistir(&self) -> Result<()> {
        let Some(ruta) = &self.ruta else {
            return Ok(());
        };
        if let Some(dir) = ruta.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_dir_all(dir)?;
        }
        let texto = serde_json::to_string_pretty(&self.horarios)?;
        let mut f = OpenOptions::new().write(true).create(true).truncate(true).open(ruta)?;
        f.write_all(texto.as_bytes())?;
        Ok(())
    }
}
