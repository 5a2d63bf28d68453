use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::path::PathBuf;

use sioh::catalogo::Catalogo;
use sioh::config::{Pesos, ServerConfig};
use sioh::guardados::HorariosGuardados;
use sioh::server::{configurar_rutas, AppState};

fn estado(con_catalogo: bool) -> web::Data<AppState> {
    let catalogo = con_catalogo.then(|| {
        let ruta = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("datafiles").join("horarios.json");
        Catalogo::desde_archivo(ruta).unwrap()
    });
    web::Data::new(AppState::new(ServerConfig::default(), catalogo, HorariosGuardados::en_memoria()))
}

fn cuerpo_dos_por_dos() -> Value {
    let grupo = |id: &str, materia: &str, dia: &str, ini: u16, fin: u16| {
        json!({ "id": id, "numero": id, "materia_id": materia,
                "sesiones": [ { "dia": dia, "hora_inicio": ini, "hora_fin": fin } ] })
    };
    json!({
        "grupos_por_materia": [
            [ grupo("A1", "A", "Lunes", 420, 540), grupo("A2", "A", "Martes", 420, 540) ],
            [ grupo("B1", "B", "Lunes", 420, 540), grupo("B2", "B", "Lunes", 540, 660) ]
        ]
    })
}

#[actix_web::test]
async fn test_generar() {
    let app = test::init_service(App::new().app_data(estado(false)).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/horarios/generar").set_json(cuerpo_dos_por_dos()).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["horarios_count"], 3);
    assert_eq!(resp["horarios"][0]["puntuacion"], 200.0);

    let mut fijado = cuerpo_dos_por_dos();
    fijado["grupos_fijados"] = json!(["B1"]);
    let req = test::TestRequest::post().uri("/horarios/generar").set_json(fijado).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["horarios_count"], 1);
}

#[actix_web::test]
async fn test_opciones_parciales_respetan_pesos_del_servidor() {
    let config = ServerConfig {
        pesos: Pesos { dias_libres: 1.0, ..Default::default() },
        ..Default::default()
    };
    let estado = web::Data::new(AppState::new(config, None, HorariosGuardados::en_memoria()));
    let app = test::init_service(App::new().app_data(estado).configure(configurar_rutas)).await;

    let un_lunes = json!({
        "grupos_por_materia": [[ { "id": "A1", "numero": "A1", "materia_id": "A",
            "sesiones": [ { "dia": "Lunes", "hora_inicio": 420, "hora_fin": 540 } ] } ]]
    });
    let puntuacion = |resp: &Value| resp["horarios"][0]["puntuacion"].clone();

    let req = test::TestRequest::post().uri("/horarios/generar").set_json(&un_lunes).to_request();
    let sin_opciones: Value = test::call_and_read_body_json(&app, req).await;
    // 100 + 5 días libres * 1
    assert_eq!(puntuacion(&sin_opciones), json!(105.0));

    let mut con_opciones = un_lunes.clone();
    con_opciones["opciones"] = json!({"hora_fin_preferida": 1300});
    let req = test::TestRequest::post().uri("/horarios/generar").set_json(&con_opciones).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(puntuacion(&resp), json!(105.0));

    con_opciones["opciones"] = json!({"pesos": {"horas_muertas": -20}});
    let req = test::TestRequest::post().uri("/horarios/generar").set_json(&con_opciones).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(puntuacion(&resp), json!(105.0));

    con_opciones["opciones"] = json!({"pesos": {"dias_libres": 2}});
    let req = test::TestRequest::post().uri("/horarios/generar").set_json(&con_opciones).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(puntuacion(&resp), json!(110.0));
}

#[actix_web::test]
async fn test_generar_rechaza_entradas_invalidas() {
    let app = test::init_service(App::new().app_data(estado(false)).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/horarios/generar").set_json(json!({"otra": 1})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let mut mala = cuerpo_dos_por_dos();
    mala["grupos_por_materia"][0][0]["sesiones"][0]["hora_fin"] = json!(400);
    let req = test::TestRequest::post().uri("/horarios/generar").set_json(mala).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());

    let mut opciones_malas = cuerpo_dos_por_dos();
    opciones_malas["opciones"] = json!({"max_horarios": 0});
    let req = test::TestRequest::post().uri("/horarios/generar").set_json(opciones_malas).to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_catalogo() {
    let app = test::init_service(App::new().app_data(estado(true)).configure(configurar_rutas)).await;

    let req = test::TestRequest::get().uri("/catalogo/carreras").to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["carreras"], json!(["ciencia_de_datos"]));

    let req = test::TestRequest::get()
        .uri("/catalogo/materias?carrera=ciencia_de_datos&turno=matutino&semestres=1,2")
        .to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["semestres_disponibles"], json!([1, 2]));
    assert_eq!(resp["materias"].as_array().unwrap().len(), 4);

    let req = test::TestRequest::get()
        .uri("/catalogo/grupos?carrera=ciencia_de_datos&turno=matutino&semestres=1&materia=C%C3%A1lculo-1")
        .to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["grupos"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/catalogo/materias?carrera=ciencia_de_datos&turno=nocturno")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);

    let req = test::TestRequest::get()
        .uri("/catalogo/grupos?carrera=ciencia_de_datos&turno=matutino&semestres=1&materia=Qu%C3%ADmica-1")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_generar_desde_catalogo() {
    let app = test::init_service(App::new().app_data(estado(true)).configure(configurar_rutas)).await;
    let cuerpo = json!({
        "carrera": "ciencia_de_datos",
        "turno": "matutino",
        "semestres": [1],
        "materias": ["Cálculo-1", "Fundamentos de Programación-1"]
    });
    let req = test::TestRequest::post().uri("/horarios/generar/catalogo").set_json(&cuerpo).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["horarios_count"], 4);

    // sin catálogo cargado
    let app = test::init_service(App::new().app_data(estado(false)).configure(configurar_rutas)).await;
    let req = test::TestRequest::post().uri("/horarios/generar/catalogo").set_json(&cuerpo).to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 503);
    let req = test::TestRequest::get().uri("/catalogo/carreras").to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 503);
}

#[actix_web::test]
async fn test_guardados_y_estadisticas() {
    let app = test::init_service(App::new().app_data(estado(false)).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/horarios/generar").set_json(cuerpo_dos_por_dos()).to_request();
    let generado: Value = test::call_and_read_body_json(&app, req).await;
    let horario = generado["horarios"][0].clone();
    let id = horario["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post().uri("/horarios/estadisticas").set_json(&horario).to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total_materias"], 2);
    assert_eq!(stats["dias_con_clases"], 1);
    assert_eq!(stats["horas_muertas"], 0);

    let req = test::TestRequest::post().uri("/horarios/guardados").set_json(&horario).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["guardado"], true);
    let req = test::TestRequest::post().uri("/horarios/guardados").set_json(&horario).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["guardado"], false);
    assert_eq!(resp["count"], 1);

    let req = test::TestRequest::get().uri("/horarios/guardados").to_request();
    let lista: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(lista["horarios"][0]["id"], json!(id));

    let req = test::TestRequest::delete().uri(&format!("/horarios/guardados/{}", id)).to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
    let req = test::TestRequest::delete().uri(&format!("/horarios/guardados/{}", id)).to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_help() {
    let app = test::init_service(App::new().app_data(estado(false)).configure(configurar_rutas)).await;
    let req = test::TestRequest::get().uri("/help").to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert!(resp["routes"].as_array().unwrap().len() >= 9);
    assert!(resp["post_generar_example"]["grupos_por_materia"].is_array());
}

#[actix_web::test]
async fn test_guardados_persisten_a_disco() {
    let ruta = std::env::temp_dir()
        .join(format!("sioh_server_{}", uuid::Uuid::new_v4()))
        .join("guardados.json");
    let guardados = HorariosGuardados::cargar(&ruta).unwrap();
    let estado = web::Data::new(AppState::new(ServerConfig::default(), None, guardados));
    let app = test::init_service(App::new().app_data(estado).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/horarios/generar").set_json(cuerpo_dos_por_dos()).to_request();
    let generado: Value = test::call_and_read_body_json(&app, req).await;
    for horario in generado["horarios"].as_array().unwrap() {
        let req = test::TestRequest::post().uri("/horarios/guardados").set_json(horario).to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }
    let id = generado["horarios"][0]["id"].as_str().unwrap().to_string();
    let req = test::TestRequest::delete().uri(&format!("/horarios/guardados/{}", id)).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["count"], 2);

    let en_disco = HorariosGuardados::cargar(&ruta).unwrap();
    assert_eq!(en_disco.listar().len(), 2);
    assert!(en_disco.obtener(&id).is_none());

    if let Some(dir) = ruta.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
