// Utilidades de tiempo: conversión "HH:MM" <-> minutos y solapamiento de intervalos.

use crate::error::{Result, SiohError};
use crate::models::MINUTO_MAXIMO;

/// Convierte "HH:MM" a minutos desde medianoche.
/// Exige exactamente dos campos numéricos separados por ':' (hora 0-23, minuto 0-59).
pub fn hora_a_minutos(hora: &str) -> Result<u16> {
    let invalida = || SiohError::HoraInvalida(hora.to_string());
    let partes: Vec<&str> = hora.trim().split(':').collect();
    if partes.len() != 2 {
        return Err(invalida());
    }
    let campo = |p: &str| -> Option<u16> {
        if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        p.parse::<u16>().ok()
    };
    let hh = campo(partes[0]).ok_or_else(invalida)?;
    let mm = campo(partes[1]).ok_or_else(invalida)?;
    if hh > 23 || mm > 59 {
        return Err(invalida());
    }
    Ok(hh * 60 + mm)
}

/// Convierte minutos desde medianoche a "HH:MM" con ceros a la izquierda.
/// Valores mayores a 1439 se recortan a 23:59.
pub fn minutos_a_hora(minutos: u16) -> String {
    let m = if minutos > MINUTO_MAXIMO {
        log::warn!("minutos_a_hora: {} fuera de rango, se recorta a {}", minutos, MINUTO_MAXIMO);
        MINUTO_MAXIMO
    } else {
        minutos
    };
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Solapamiento de intervalos semiabiertos: terminar justo cuando el otro
/// empieza no es traslape.
pub fn intervalos_se_solapan(a_inicio: u16, a_fin: u16, b_inicio: u16, b_fin: u16) -> bool {
    !(a_fin <= b_inicio || b_fin <= a_inicio)
}

/// Parsea "07:00-08:30" a (420, 510). Falla si el rango está vacío o invertido.
pub fn parsear_rango(rango: &str) -> Result<(u16, u16)> {
    let (ini, fin) = rango
        .split_once('-')
        .ok_or_else(|| SiohError::RangoInvalido(rango.to_string()))?;
    let inicio = hora_a_minutos(ini)?;
    let fin = hora_a_minutos(fin)?;
    if inicio >= fin {
        return Err(SiohError::RangoInvalido(rango.to_string()));
    }
    Ok((inicio, fin))
}

/// Duración legible: "45 min", "2h", "1h 30min".
pub fn formatear_duracion(minutos: u32) -> String {
    let horas = minutos / 60;
    let mins = minutos % 60;
    match (horas, mins) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}min", h, m),
    }
}
