//! Provider segment catalog.
//!
//! The builtin catalog flattens a provider-grouped JSON file into a single
//! ordered segment list. Catalogs can also be built from segments returned by
//! the match service.

use std::{
    collections::{HashMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use audience_runtime::{Segment, SegmentKey};
use serde::Deserialize;
use thiserror::Error;

pub const BUILTIN_PROVIDERS: &str = include_str!("data/providers.json");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ProviderFile {
    version: u32,
    providers: Vec<ProviderRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ProviderRecord {
    id: String,
    name: String,
    segments: Vec<ProviderSegment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ProviderSegment {
    id: String,
    name: Option<String>,
    category: String,
    reach: String,
    cpm: Option<f64>,
    rationale: Option<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse provider catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read provider catalog from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("duplicate segment {key}")]
    Duplicate { key: SegmentKey },
}

/// Ordered, immutable set of provider segments indexed by unique id.
#[derive(Debug, Clone, Default)]
pub struct SegmentCatalog {
    segments: Vec<Segment>,
    index: HashMap<SegmentKey, usize>,
}

impl SegmentCatalog {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            Self::from_json_str(BUILTIN_PROVIDERS).expect("builtin provider catalog should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: ProviderFile = serde_json::from_str(json)?;
        tracing::debug!(
            target: "audience_builder::catalog",
            version = file.version,
            providers = file.providers.len(),
            "catalog.parsed"
        );
        let segments = file
            .providers
            .into_iter()
            .flat_map(|provider| {
                let ProviderRecord {
                    id: provider_id,
                    name: provider_name,
                    segments,
                    ..
                } = provider;
                segments.into_iter().map(move |raw| Segment {
                    unique_id: SegmentKey::compose(&provider_id, &raw.id),
                    id: raw.id,
                    provider_id: provider_id.clone(),
                    provider_name: provider_name.clone(),
                    name: raw.name,
                    category: raw.category,
                    reach_label: raw.reach,
                    weight: raw.cpm,
                    rationale: raw.rationale,
                })
            })
            .collect();
        Self::from_segments(segments)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Build a catalog from already-flattened segments, e.g. match results.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(segments.len());
        let mut normalized = Vec::with_capacity(segments.len());
        for mut segment in segments {
            segment.ensure_key();
            if index.contains_key(&segment.unique_id) {
                return Err(CatalogError::Duplicate {
                    key: segment.unique_id,
                });
            }
            index.insert(segment.unique_id.clone(), normalized.len());
            normalized.push(segment);
        }
        Ok(Self {
            segments: normalized,
            index,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, key: &SegmentKey) -> Option<&Segment> {
        self.index.get(key).map(|&idx| &self.segments[idx])
    }

    pub fn contains(&self, key: &SegmentKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SegmentKey> {
        self.segments.iter().map(|segment| &segment.unique_id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Distinct provider names in catalog order.
    pub fn provider_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.segments
            .iter()
            .map(|segment| segment.provider_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_flattens_providers_in_order() {
        let catalog = SegmentCatalog::builtin();
        let keys: Vec<&str> = catalog.keys().map(SegmentKey::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "Dentsu CCS_exp_1",
                "Dentsu CCS_exp_2",
                "Circana_lr_1",
                "Experian_lr_1",
                "Vodafone_lr_1",
                "ONS_yg_1",
            ]
        );
        let own_pet = catalog
            .get(&SegmentKey::from("Experian_lr_1"))
            .expect("segment present");
        assert_eq!(own_pet.provider_name, "Experian");
        assert_eq!(own_pet.reach_label, "4M");
        assert_eq!(own_pet.weight, Some(4.2));
    }

    #[test]
    fn same_segment_id_under_different_providers_is_distinct() {
        let catalog = SegmentCatalog::builtin();
        assert!(catalog.contains(&SegmentKey::from("Circana_lr_1")));
        assert!(catalog.contains(&SegmentKey::from("Vodafone_lr_1")));
        assert_eq!(
            catalog.provider_names(),
            vec!["CCS", "Circana", "Experian", "Vodafone", "ONS"]
        );
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = SegmentCatalog::from_segments(vec![
            Segment::new("p", "P", "a"),
            Segment::new("p", "P", "a"),
        ])
        .expect_err("duplicate rejected");
        assert!(matches!(err, CatalogError::Duplicate { key } if key.as_str() == "p_a"));
    }

    #[test]
    fn match_results_without_keys_get_composed_keys() {
        let mut segment = Segment::new("Kogenta", "Kogenta", "k_9");
        segment.unique_id = SegmentKey::default();
        let catalog = SegmentCatalog::from_segments(vec![segment]).expect("catalog builds");
        assert!(catalog.contains(&SegmentKey::from("Kogenta_k_9")));
    }
}
