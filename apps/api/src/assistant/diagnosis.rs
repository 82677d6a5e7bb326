//! Diagnosis — turns an uploaded photo into a `DiagnosisResult`.

use bytes::Bytes;
use tracing::info;

use crate::assistant::{Agronomist, ImageFormat, PlantImage};
use crate::errors::AppError;
use crate::models::diagnosis::DiagnosisResult;

/// Upload size the front-end advertises. Enforced through the router's body limit.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Smallest value taken to be a percentage rather than a slightly high fraction.
const PERCENT_SCALE_THRESHOLD: f64 = 1.5;

/// Maps whatever the model reports onto [0, 1].
///
/// Values clearly on a 0–100 scale (above 1.5, up to 100) are read as
/// percentages; anything else is clamped. Non-finite values become 0.
pub fn normalize_confidence(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    let scaled = if raw > PERCENT_SCALE_THRESHOLD && raw <= 100.0 {
        raw / 100.0
    } else {
        raw
    };
    scaled.clamp(0.0, 1.0)
}

/// Validates the upload and wraps it for the assistant.
pub fn prepare_image(bytes: Bytes) -> Result<PlantImage, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("image is empty".to_string()));
    }
    let format = ImageFormat::sniff(&bytes).ok_or_else(|| {
        AppError::UnsupportedMedia("only JPEG and PNG images are accepted".to_string())
    })?;
    Ok(PlantImage { format, bytes })
}

/// Runs one diagnosis. Every failure collapses into `AppError::Diagnosis`,
/// whose response carries the generic user-facing message.
pub async fn diagnose(
    agronomist: &dyn Agronomist,
    image: &PlantImage,
) -> Result<DiagnosisResult, AppError> {
    // Logged once, when the error is turned into a response.
    let mut result = agronomist
        .diagnose(image)
        .await
        .map_err(|e| AppError::Diagnosis(e.to_string()))?;

    result.confidence = normalize_confidence(result.confidence);
    info!(
        "Diagnosis: '{}' (confidence {:.2})",
        result.disease_name, result.confidence
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::testing::ScriptedAgronomist;

    fn result_with(confidence: f64) -> DiagnosisResult {
        DiagnosisResult {
            disease_name: "Antraknosa".to_string(),
            confidence,
            description: "Bercak hitam cekung pada buah.".to_string(),
            symptoms: vec!["Bercak hitam".to_string()],
            preventions: vec!["Jaga sirkulasi udara".to_string()],
            treatments: vec!["Fungisida berbahan aktif mankozeb".to_string()],
        }
    }

    fn jpeg() -> PlantImage {
        prepare_image(Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xDB, 0x00])).unwrap()
    }

    #[test]
    fn test_normalize_confidence_bounds() {
        let cases = [
            (0.87, 0.87),
            (0.0, 0.0),
            (1.0, 1.0),
            (1.0000001, 1.0),
            (1.05, 1.0),
            (1.5, 1.0),
            (1.7, 0.017),
            (87.0, 0.87),
            (100.0, 1.0),
            (250.0, 1.0),
            (-0.3, 0.0),
            (f64::NAN, 0.0),
            (f64::INFINITY, 0.0),
        ];
        for (raw, expected) in cases {
            let got = normalize_confidence(raw);
            assert!((got - expected).abs() < 1e-9, "{raw} -> {got}, expected {expected}");
            assert!((0.0..=1.0).contains(&got));
        }
    }

    #[test]
    fn test_prepare_image_rejects_non_images() {
        assert!(matches!(
            prepare_image(Bytes::new()),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            prepare_image(Bytes::from_static(b"GIF89a......")),
            Err(AppError::UnsupportedMedia(_))
        ));
    }

    #[tokio::test]
    async fn test_diagnose_normalizes_percentage() {
        let agronomist = ScriptedAgronomist::diagnosing(result_with(92.0));
        let result = diagnose(&agronomist, &jpeg()).await.unwrap();
        assert!((result.confidence - 0.92).abs() < 1e-9);
        assert_eq!(result.disease_name, "Antraknosa");
    }

    #[tokio::test]
    async fn test_diagnose_failure_is_generic() {
        let agronomist = ScriptedAgronomist::failing();
        let err = diagnose(&agronomist, &jpeg()).await.unwrap_err();
        assert!(matches!(err, AppError::Diagnosis(_)));
    }
}
