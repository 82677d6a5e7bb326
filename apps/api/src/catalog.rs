//! Product recommendations. A fixed catalog compiled into the binary.

use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::models::recommendation::{RecommendationItem, RecommendationKind};

pub const CATALOG: [RecommendationItem; 6] = [
    RecommendationItem {
        id: "1",
        kind: RecommendationKind::Seed,
        name: "Sweet Charlie",
        description: "Varietas unggul yang sangat manis dan tahan terhadap penyakit antraknosa.",
        tags: &["Genjah", "Tahan Hama", "Manis"],
        benefit: "Hasil panen stabil di dataran rendah maupun tinggi.",
    },
    RecommendationItem {
        id: "2",
        kind: RecommendationKind::Seed,
        name: "Albion",
        description: "Bentuk buah besar, rasa konsisten, dan tahan lama setelah dipetik.",
        tags: &["Premium", "Ukuran Besar"],
        benefit: "Sangat diminati pasar supermarket karena daya simpan tinggi.",
    },
    RecommendationItem {
        id: "3",
        kind: RecommendationKind::Fertilizer,
        name: "NPK Mutiara 16-16-16",
        description: "Pupuk seimbang untuk pertumbuhan vegetatif yang kuat dan pembungaan maksimal.",
        tags: &["Fase Awal", "Fase Bunga"],
        benefit: "Mempercepat pertumbuhan akar dan batang stroberi.",
    },
    RecommendationItem {
        id: "4",
        kind: RecommendationKind::Fertilizer,
        name: "Calnit (Kalsium Nitrat)",
        description: "Mencegah busuk ujung buah (tip burn) dan meningkatkan kualitas kulit buah.",
        tags: &["Pencegah Busuk", "Kualitas"],
        benefit: "Membuat buah lebih berkilau dan tekstur lebih renyah.",
    },
    RecommendationItem {
        id: "5",
        kind: RecommendationKind::Pesticide,
        name: "Antracol 70WP",
        description: "Fungisida kontak untuk mencegah jamur bercak daun dan antraknosa.",
        tags: &["Fungisida", "Pencegahan"],
        benefit: "Melindungi tanaman dari serangan jamur di musim hujan.",
    },
    RecommendationItem {
        id: "6",
        kind: RecommendationKind::Pesticide,
        name: "Abacel 18EC",
        description: "Efektif membasmi hama Thrips dan Tungau (Mite) yang sering menyerang pucuk.",
        tags: &["Insektisida", "Hama Pucuk"],
        benefit: "Tanaman bebas dari daun keriting akibat serangan thrips.",
    },
];

/// `None` means every kind.
pub fn recommendations(kind: Option<RecommendationKind>) -> Vec<RecommendationItem> {
    CATALOG
        .iter()
        .filter(|item| kind.map_or(true, |k| item.kind == k))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AllKinds {
    #[serde(rename = "all")]
    All,
}

/// `?kind=` value: `all` or one concrete kind. Anything else is a 400 from the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KindFilter {
    All(AllKinds),
    Only(RecommendationKind),
}

impl KindFilter {
    pub fn kind(self) -> Option<RecommendationKind> {
        match self {
            KindFilter::All(_) => None,
            KindFilter::Only(kind) => Some(kind),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub kind: Option<KindFilter>,
}

/// GET /api/v1/recommendations?kind=
pub async fn handle_recommendations(
    Query(params): Query<CatalogQuery>,
) -> Json<Vec<RecommendationItem>> {
    Json(recommendations(params.kind.and_then(KindFilter::kind)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_returns_full_catalog() {
        assert_eq!(recommendations(None).len(), 6);
    }

    #[test]
    fn test_filter_by_kind() {
        let pesticides = recommendations(Some(RecommendationKind::Pesticide));
        let names: Vec<_> = pesticides.iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Antracol 70WP", "Abacel 18EC"]);
    }

    #[test]
    fn test_kind_filter_from_query_value() {
        let parse = |raw: &str| serde_json::from_value::<KindFilter>(serde_json::json!(raw));

        assert_eq!(parse("all").unwrap().kind(), None);
        assert_eq!(parse("seed").unwrap().kind(), Some(RecommendationKind::Seed));
        assert_eq!(
            parse("pesticide").unwrap().kind(),
            Some(RecommendationKind::Pesticide)
        );
        assert!(parse("tools").is_err());
        assert!(parse("Seed").is_err());
    }

    #[test]
    fn test_serialized_kind_field_is_type() {
        let value = serde_json::to_value(&CATALOG[2]).unwrap();
        assert_eq!(value["type"], "fertilizer");
    }
}
