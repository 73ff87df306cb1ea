use anyhow::Result;
use ::geojson::Feature;
use serde_json::Value;

pub mod geojson;
pub mod geojsonl;

pub use self::geojson::GeoJsonSink;
pub use self::geojsonl::GeoJsonlSink;

/// Property added to every written feature naming the layer that showed it.
pub const LAYER_PROPERTY: &str = "layer";

pub trait DataSink: Send {
    fn add_feature(&mut self, layer_id: &str, feature: &Feature) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Copy of `feature` tagged with the layer it was rendered on.
fn tagged(layer_id: &str, feature: &Feature) -> Feature {
    let mut feature = feature.clone();
    feature.set_property(LAYER_PROPERTY, Value::String(layer_id.to_string()));
    feature
}
