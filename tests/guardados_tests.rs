use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use sioh::guardados::HorariosGuardados;
use sioh::models::{Dia, Grupo, Horario, Sesion};
use sioh::{generar_horarios, OpcionesOptimizador};

fn ruta_temporal(nombre: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("sioh_test_{}", uuid::Uuid::new_v4()))
        .join(nombre)
}

fn horarios_generados() -> Vec<Horario> {
    let grupo = |id: &str, dia| Grupo {
        id: id.to_string(),
        numero: id.to_string(),
        materia_id: "M".to_string(),
        materia_nombre: "Materia".to_string(),
        profesor: String::new(),
        sesiones: vec![Sesion::nueva(dia, 420, 540, "101", "A").unwrap()],
    };
    let entrada = vec![vec![grupo("M1", Dia::Lunes), grupo("M2", Dia::Martes)]];
    generar_horarios(&entrada, &HashSet::new(), &OpcionesOptimizador::default())
}

#[test]
fn test_guardar_solo_si_no_existe() {
    let mut g = HorariosGuardados::en_memoria();
    let horarios = horarios_generados();

    assert!(g.guardar(&horarios[0]).unwrap());
    assert!(!g.guardar(&horarios[0]).unwrap());
    assert!(g.guardar(&horarios[1]).unwrap());
    assert_eq!(g.listar().len(), 2);

    let guardado = g.obtener(&horarios[0].id).unwrap();
    assert_eq!(guardado.grupos, horarios[0].grupos);
}

#[test]
fn test_guardar_renueva_creado_en() {
    let mut g = HorariosGuardados::en_memoria();
    let mut horario = horarios_generados().remove(0);
    let ayer = Utc::now() - Duration::days(1);
    horario.creado_en = ayer;

    let antes_de_guardar = Utc::now();
    assert!(g.guardar(&horario).unwrap());
    let guardado = g.obtener(&horario.id).unwrap();
    assert!(guardado.creado_en > ayer);
    assert!(guardado.creado_en >= antes_de_guardar);
    // el horario de quien llama no se modifica
    assert_eq!(horario.creado_en, ayer);
}

#[test]
fn test_eliminar() {
    let mut g = HorariosGuardados::en_memoria();
    let horarios = horarios_generados();
    g.guardar(&horarios[0]).unwrap();

    assert!(!g.eliminar("no-existe").unwrap());
    assert!(g.eliminar(&horarios[0].id).unwrap());
    assert!(g.listar().is_empty());
    assert!(g.obtener(&horarios[0].id).is_none());
}

#[test]
fn test_persistencia_y_recarga() {
    let ruta = ruta_temporal("guardados.json");
    let horarios = horarios_generados();

    // archivo inexistente: colección vacía
    let mut g = HorariosGuardados::cargar(&ruta).unwrap();
    assert!(g.listar().is_empty());

    g.guardar(&horarios[0]).unwrap();
    g.guardar(&horarios[1]).unwrap();
    g.eliminar(&horarios[1].id).unwrap();

    let recargado = HorariosGuardados::cargar(&ruta).unwrap();
    assert_eq!(recargado.listar().len(), 1);
    assert_eq!(recargado.listar()[0].id, horarios[0].id);
    assert_eq!(recargado.listar()[0].puntuacion, horarios[0].puntuacion);

    if let Some(dir) = ruta.parent() {
        let _ = fs::remove_dir_all(dir);
    }
}

#[test]
fn test_archivo_corrupto_o_vacio() {
    let ruta = ruta_temporal("corrupto.json");
    fs::create_dir_all(ruta.parent().unwrap()).unwrap();

    fs::write(&ruta, "").unwrap();
    assert!(HorariosGuardados::cargar(&ruta).unwrap().listar().is_empty());

    fs::write(&ruta, "[{ roto").unwrap();
    let mut g = HorariosGuardados::cargar(&ruta).unwrap();
    assert!(g.listar().is_empty());

    // el siguiente guardado reemplaza el contenido corrupto
    let horarios = horarios_generados();
    g.guardar(&horarios[0]).unwrap();
    assert_eq!(HorariosGuardados::cargar(&ruta).unwrap().listar().len(), 1);

    let _ = fs::remove_dir_all(ruta.parent().unwrap());
}
