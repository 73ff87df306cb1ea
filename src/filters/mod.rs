//! Layer filter construction for the tree map.
//!
//! Every layer filter is the layer's tree-type test, optionally AND-ed with
//! species, size and favorites facets in that order.

mod builder;
mod facets;
mod layers;

pub use builder::build_layer_filter;
pub use facets::{
    DBH_PROPERTY, SOURCE_ID_PROPERTY, SPECIES_PROPERTY, favorites_filter, size_filter,
    species_filter,
};
pub use layers::{
    LAYER_IDS, PARK_LAYER, PROTECTED_LAYER, ROADSIDE_LAYER, TREE_TYPE_PROPERTY, TreeType,
    base_filter, get_layer_type,
};
