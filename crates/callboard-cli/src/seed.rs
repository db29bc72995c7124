//! Mock data seeding
//!
//! Generates realistic call records across the status vocabulary and
//! posts them through the normal ingest path. Sentiment and call_human
//! follow the canonical derivation rules, so seeded dashboards behave
//! like replayed ones.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use callboard::normalize;

use crate::api::CallPayload;

const STATUSES: [&str; 8] = [
    "success",
    "hang up",
    "avoid callback",
    "failed",
    "not the right person",
    "not interested",
    "callback requested",
    "voicemail",
];

const PHONES: [&str; 12] = [
    "+34618953592",
    "+34622134567",
    "+34699012345",
    "+34611223344",
    "+34655443322",
    "+34677889900",
    "+351911222333",
    "+351933221100",
    "+34688990011",
    "+34612345678",
    "+351968765432",
    "+34623456789",
];

fn summary_for(status: &str, rng: &mut impl Rng) -> String {
    let options: &[&str] = match status {
        "success" => &[
            "El conductor confirmo su disponibilidad y completo el proceso.",
            "Llamada correcta, documentacion recibida.",
            "Todas las dudas resueltas, conductor activado.",
        ],
        "hang up" => &[
            "El conductor colgo antes de terminar la llamada.",
            "Llamada interrumpida sin previo aviso.",
        ],
        "avoid callback" => &[
            "El conductor pidio no recibir mas llamadas por ahora.",
            "Prefiere ser contactado por correo.",
        ],
        "failed" => &[
            "No se pudo completar la llamada por problemas tecnicos.",
            "La linea estaba ocupada en todos los intentos.",
        ],
        "not the right person" => &[
            "Atendio otra persona, hay que verificar el contacto.",
            "El numero pertenece a otra persona.",
        ],
        "not interested" => &[
            "El conductor no quiere continuar con el proceso.",
            "Encontro otra oportunidad laboral.",
        ],
        "callback requested" => &[
            "El conductor pidio que le llamen mas tarde.",
            "Solicita una llamada por la tarde.",
        ],
        _ => &["Sin respuesta, salto el buzon de voz."],
    };
    options.choose(rng).unwrap().to_string()
}

/// Generate `count` mock payloads with timestamps spread over the
/// trailing month
pub fn generate(count: usize) -> Vec<CallPayload> {
    let mut rng = rand::thread_rng();

    (0..count)
        .map(|_| {
            let status = *STATUSES.choose(&mut rng).unwrap();
            let phone = *PHONES.choose(&mut rng).unwrap();

            let minutes_ago = rng.gen_range(0..60 * 24 * 30);
            let created_at = Utc::now() - Duration::minutes(minutes_ago);

            let duration: i32 = match status {
                "success" => rng.gen_range(120..600),
                "voicemail" | "failed" => 0,
                _ => rng.gen_range(10..180),
            };

            CallPayload {
                phone: phone.to_string(),
                status: status.to_string(),
                sentiment: normalize::sentiment_for(status).to_string(),
                call_human: if normalize::needs_human(status) {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                },
                summary: summary_for(status, &mut rng),
                attempt: rng.gen_range(1..=4).to_string(),
                duration: duration.to_string(),
                country: normalize::country_for(phone).to_string(),
                created_at: Some(created_at.to_rfc3339()),
            }
        })
        .collect()
}
