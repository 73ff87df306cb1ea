//! Map style filter expressions.
//!
//! Wire format (Mapbox GL style spec subset):
//!   ['==', ['get', key], value]              - equality
//!   ['in', ['get', key], ['literal', [...]]] - membership
//!   ['>=', ['get', key], n], ['<', ...]      - numeric comparison
//!   ['all', ...], ['any', ...]               - AND / OR

mod ast;
mod eval;

pub use ast::{FilterExpression, Operator};
pub use eval::evaluate;
