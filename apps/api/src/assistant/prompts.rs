// All prompt constants for the assistant module.

use serde_json::{json, Value};

pub const DIAGNOSIS_PROMPT: &str = "Analisis gambar daun atau buah stroberi ini. \
    Identifikasi apakah ada penyakit, hama, atau defisiensi nutrisi. \
    Berikan hasil dalam format JSON yang mendetail. \
    Nilai confidence adalah angka antara 0 dan 1.";

pub const CHAT_SYSTEM_INSTRUCTION: &str = "Anda adalah pakar agronomi spesialis tanaman stroberi. \
    Tugas Anda adalah membantu petani mencegah gagal panen dengan memberikan saran teknis \
    tentang pemupukan, pengendalian hama, pengaturan suhu/kelembaban, dan teknik irigasi. \
    Berikan jawaban yang praktis dan mudah dipahami petani tradisional maupun modern.";

/// First turn of every chat session.
pub const CHAT_GREETING: &str = "Halo! Saya adalah Pakar Stroberi AI. \
    Ada yang bisa saya bantu terkait budidaya stroberi Anda hari ini? \
    Anda bisa bertanya tentang pemupukan, hama, atau tips panen.";

/// Appended as the model turn when the assistant cannot be reached.
pub const CHAT_FALLBACK: &str =
    "Maaf, saya sedang mengalami kendala teknis. Mohon coba lagi nanti.";

/// Response schema for diagnosis, in Gemini's OpenAPI subset.
pub fn diagnosis_schema() -> Value {
    let string_list = json!({"type": "ARRAY", "items": {"type": "STRING"}});
    json!({
        "type": "OBJECT",
        "properties": {
            "diseaseName": {"type": "STRING"},
            "confidence": {"type": "NUMBER"},
            "description": {"type": "STRING"},
            "symptoms": string_list,
            "preventions": string_list,
            "treatments": string_list,
        },
        "required": ["diseaseName", "confidence", "description", "symptoms", "preventions", "treatments"]
    })
}
