use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound sentinel marking an open-ended size bucket.
pub const OPEN_UPPER_BOUND: f64 = 999.0;

/// Species names that stand for "everything not listed".
pub const CATCH_ALL_SPECIES: [&str; 2] = ["기타", "Other"];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SpeciesInfo {
    pub name: String,
    pub color: String,
}

/// A DBH bucket in centimeters, `[min, max)`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SizeCategory {
    pub id: String,
    pub range: [f64; 2],
}

impl SizeCategory {
    pub fn new(id: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            id: id.into(),
            range: [min, max],
        }
    }

    pub fn min(&self) -> f64 {
        self.range[0]
    }

    /// Upper bound, or `None` for the open-ended bucket.
    pub fn max(&self) -> Option<f64> {
        let max = self.range[1];
        if max == OPEN_UPPER_BOUND {
            None
        } else {
            Some(max)
        }
    }
}

/// Static reference tables consulted while building filters.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub species: Vec<SpeciesInfo>,
    #[serde(default)]
    pub sizes: Vec<SizeCategory>,
}

impl Catalog {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()
            .with_context(|| format!("Catalog: Failed to read {}", path.display()))?;
        let catalog: Catalog = settings
            .try_deserialize()
            .with_context(|| format!("Catalog: Invalid catalog in {}", path.display()))?;
        tracing::info!(
            "Catalog: {} species, {} size buckets from {:?}",
            catalog.species.len(),
            catalog.sizes.len(),
            path
        );
        Ok(catalog)
    }

    /// Species and DBH buckets used by the Seoul tree map.
    pub fn seoul() -> Self {
        let species = [
            ("은행나무", "#f4c430"),
            ("벚나무", "#f7a8c4"),
            ("이팝나무", "#e8e8e8"),
            ("양버즘나무", "#8fbc8f"),
            ("느티나무", "#6b8e23"),
            ("회화나무", "#9acd32"),
            ("메타세쿼이아", "#2e8b57"),
            ("단풍나무", "#d2691e"),
            ("소나무", "#228b22"),
            ("기타", "#a9a9a9"),
        ]
        .into_iter()
        .map(|(name, color)| SpeciesInfo {
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect();

        let sizes = vec![
            SizeCategory::new("small", 0.0, 15.0),
            SizeCategory::new("medium", 15.0, 30.0),
            SizeCategory::new("large", 30.0, 50.0),
            SizeCategory::new("xlarge", 50.0, 80.0),
            SizeCategory::new("giant", 80.0, OPEN_UPPER_BOUND),
        ];

        Self { species, sizes }
    }

    /// Number of known species, or `None` when no species table is loaded.
    pub fn species_count(&self) -> Option<usize> {
        if self.species.is_empty() {
            None
        } else {
            Some(self.species.len())
        }
    }

    pub fn size(&self, id: &str) -> Option<&SizeCategory> {
        self.sizes.iter().find(|size| size.id == id)
    }
}

/// The facets a user selected. An empty list means the facet is not applied.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct FilterRequest {
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub favorite_ids: Vec<String>,
}

impl FilterRequest {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()
            .with_context(|| format!("Request: Failed to read {}", path.display()))?;
        Ok(settings.try_deserialize()?)
    }
}
