//! Map layers and the tree type each one shows.

use crate::expr::FilterExpression;
use std::fmt;

pub const PROTECTED_LAYER: &str = "protected-trees";
pub const ROADSIDE_LAYER: &str = "roadside-trees";
pub const PARK_LAYER: &str = "park-trees";

/// The fixed tree layers, in the order filters are installed.
pub const LAYER_IDS: [&str; 3] = [PROTECTED_LAYER, ROADSIDE_LAYER, PARK_LAYER];

pub const TREE_TYPE_PROPERTY: &str = "tree_type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeType {
    Protected,
    Roadside,
    Park,
}

impl TreeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeType::Protected => "protected",
            TreeType::Roadside => "roadside",
            TreeType::Park => "park",
        }
    }
}

impl fmt::Display for TreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a layer id to its tree type. Unknown ids fall back to roadside.
pub fn get_layer_type(layer_id: &str) -> TreeType {
    match layer_id {
        PROTECTED_LAYER => TreeType::Protected,
        PARK_LAYER => TreeType::Park,
        _ => TreeType::Roadside,
    }
}

/// The clause every layer filter starts with.
pub fn base_filter(layer_id: &str) -> FilterExpression {
    FilterExpression::equals(TREE_TYPE_PROPERTY, get_layer_type(layer_id).as_str())
}
