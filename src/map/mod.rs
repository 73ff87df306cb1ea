//! Installing layer filters on a map engine.

mod feature_map;

pub use feature_map::FeatureMap;

use crate::config::{Catalog, FilterRequest};
use crate::expr::FilterExpression;
use crate::filters::{LAYER_IDS, base_filter, build_layer_filter};

/// The part of a map engine that filters are installed on.
pub trait MapEngine {
    fn has_layer(&self, layer_id: &str) -> bool;
    fn set_filter(&mut self, layer_id: &str, filter: FilterExpression);
}

/// Build and install the filter for every tree layer the map has.
///
/// Layers the map does not report (for example while its style is still
/// loading) are skipped. A missing map is a no-op.
pub fn apply_filters_to_map(
    map: Option<&mut dyn MapEngine>,
    request: &FilterRequest,
    catalog: &Catalog,
) {
    let Some(map) = map else {
        return;
    };

    for layer_id in LAYER_IDS {
        if !map.has_layer(layer_id) {
            tracing::debug!("Map: layer {} not present, filter skipped", layer_id);
            continue;
        }
        map.set_filter(layer_id, build_layer_filter(layer_id, request, catalog));
    }
}

/// Reset every tree layer the map has to its tree-type filter.
pub fn clear_filters(map: Option<&mut dyn MapEngine>) {
    let Some(map) = map else {
        return;
    };

    for layer_id in LAYER_IDS {
        if map.has_layer(layer_id) {
            map.set_filter(layer_id, base_filter(layer_id));
        }
    }
}
