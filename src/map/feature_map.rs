use super::MapEngine;
use crate::expr::{FilterExpression, evaluate};
use anyhow::{Context, Result, bail};
use geojson::{Feature, GeoJson, JsonObject};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// An in-memory map: one feature source shared by named, filterable layers.
#[derive(Debug, Default)]
pub struct FeatureMap {
    features: Vec<Feature>,
    layers: BTreeMap<String, Option<FilterExpression>>,
}

impl FeatureMap {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            layers: BTreeMap::new(),
        }
    }

    /// Load features from a `.geojson` collection or `.geojsonl` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Render: Failed to read {}", path.display()))?;

        let line_delimited = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "geojsonl" | "jsonl"));

        let features = if line_delimited {
            parse_lines(&content)?
        } else {
            match content.parse::<GeoJson>() {
                Ok(GeoJson::FeatureCollection(collection)) => collection.features,
                Ok(GeoJson::Feature(feature)) => vec![feature],
                Ok(GeoJson::Geometry(_)) => {
                    bail!("Render: {} holds a bare geometry, not features", path.display())
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("Render: Invalid GeoJSON in {}", path.display())
                    });
                }
            }
        };

        tracing::info!("Render: loaded {} features from {:?}", features.len(), path);
        Ok(Self::new(features))
    }

    pub fn add_layer(&mut self, layer_id: impl Into<String>) {
        self.layers.entry(layer_id.into()).or_insert(None);
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// The filter installed on a layer, if any.
    pub fn filter(&self, layer_id: &str) -> Option<&FilterExpression> {
        self.layers.get(layer_id).and_then(Option::as_ref)
    }

    /// Features the layer currently shows. Unfiltered layers show everything;
    /// unknown layers show nothing.
    pub fn visible_features(&self, layer_id: &str) -> Vec<&Feature> {
        let Some(filter) = self.layers.get(layer_id) else {
            return Vec::new();
        };

        let empty = JsonObject::new();
        self.features
            .par_iter()
            .filter(|feature| match filter {
                None => true,
                Some(expr) => evaluate(expr, feature.properties.as_ref().unwrap_or(&empty)),
            })
            .collect()
    }
}

impl MapEngine for FeatureMap {
    fn has_layer(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    fn set_filter(&mut self, layer_id: &str, filter: FilterExpression) {
        if let Some(slot) = self.layers.get_mut(layer_id) {
            *slot = Some(filter);
        }
    }
}

fn parse_lines(content: &str) -> Result<Vec<Feature>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Feature>(line)
                .with_context(|| format!("Render: Invalid feature on line {}", i + 1))
        })
        .collect()
}
