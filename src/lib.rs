//! Map filter expressions for the Seoul tree map.
//!
//! Builds Mapbox GL style filters for the protected, roadside and park tree
//! layers from the species, size and favorites facets a user selected, and
//! installs them on anything implementing [`map::MapEngine`].

pub mod app;
pub mod config;
pub mod expr;
pub mod filters;
pub mod map;
pub mod sinks;

pub use config::{Catalog, FilterRequest, SizeCategory, SpeciesInfo};
pub use expr::FilterExpression;
pub use filters::{TreeType, build_layer_filter, get_layer_type};
pub use map::{MapEngine, apply_filters_to_map, clear_filters};
