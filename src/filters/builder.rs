//! Composes the full filter for one layer.

use super::facets::{favorites_filter, size_filter, species_filter};
use super::layers::base_filter;
use crate::config::{Catalog, FilterRequest};
use crate::expr::FilterExpression;

/// Build the filter for `layer_id` from the selected facets.
///
/// The layer's tree-type clause always comes first, followed by the species,
/// size and favorites clauses that apply. With no facet clauses the base
/// clause is returned as is; otherwise everything is wrapped in one `all`.
pub fn build_layer_filter(
    layer_id: &str,
    request: &FilterRequest,
    catalog: &Catalog,
) -> FilterExpression {
    let mut parts = vec![base_filter(layer_id)];

    parts.extend(species_filter(&request.species, catalog.species_count()));
    parts.extend(size_filter(&request.sizes, &catalog.sizes));
    parts.extend(favorites_filter(&request.favorite_ids));

    if parts.len() == 1 {
        parts.remove(0)
    } else {
        FilterExpression::All(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OPEN_UPPER_BOUND, SizeCategory};
    use crate::filters::LAYER_IDS;
    use serde_json::json;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn base(tree_type: &str) -> serde_json::Value {
        json!(["==", ["get", "tree_type"], tree_type])
    }

    #[test]
    fn test_empty_request_is_base_filter() {
        let catalog = Catalog::seoul();
        let request = FilterRequest::default();
        assert_eq!(
            build_layer_filter("roadside-trees", &request, &catalog).to_json(),
            base("roadside")
        );
        assert_eq!(
            build_layer_filter("protected-trees", &request, &Catalog::default()).to_json(),
            base("protected")
        );
    }

    #[test]
    fn test_select_all_species_collapses_to_base() {
        let catalog = Catalog::seoul();
        let request = FilterRequest {
            species: catalog.species.iter().map(|s| s.name.clone()).collect(),
            ..Default::default()
        };
        assert_eq!(
            build_layer_filter("roadside-trees", &request, &catalog),
            build_layer_filter("roadside-trees", &FilterRequest::default(), &catalog)
        );
    }

    #[test]
    fn test_select_all_sizes_collapses_to_base() {
        let catalog = Catalog::seoul();
        let request = FilterRequest {
            sizes: catalog.sizes.iter().map(|s| s.id.clone()).collect(),
            ..Default::default()
        };
        assert_eq!(
            build_layer_filter("park-trees", &request, &catalog).to_json(),
            base("park")
        );
    }

    #[test]
    fn test_species_clause_shape() {
        let request = FilterRequest {
            species: names(&["은행나무", "벚나무"]),
            ..Default::default()
        };
        let expr = build_layer_filter("roadside-trees", &request, &Catalog::seoul());
        assert_eq!(
            expr.to_json(),
            json!([
                "all",
                ["==", ["get", "tree_type"], "roadside"],
                ["in", ["get", "species_kr"], ["literal", ["은행나무", "벚나무"]]]
            ])
        );
    }

    #[test]
    fn test_open_ended_size_bucket() {
        let catalog = Catalog {
            species: Vec::new(),
            sizes: vec![
                SizeCategory::new("small", 0.0, 80.0),
                SizeCategory::new("large", 80.0, OPEN_UPPER_BOUND),
            ],
        };
        let request = FilterRequest {
            sizes: names(&["large"]),
            ..Default::default()
        };
        assert_eq!(
            build_layer_filter("roadside-trees", &request, &catalog).to_json(),
            json!(["all", base("roadside"), [">=", ["get", "dbh_cm"], 80]])
        );
    }

    #[test]
    fn test_bounded_size_bucket() {
        let request = FilterRequest {
            sizes: names(&["small"]),
            ..Default::default()
        };
        assert_eq!(
            build_layer_filter("roadside-trees", &request, &Catalog::seoul()).to_json(),
            json!([
                "all",
                base("roadside"),
                ["all", [">=", ["get", "dbh_cm"], 0], ["<", ["get", "dbh_cm"], 15]]
            ])
        );
    }

    #[test]
    fn test_species_and_favorites_order() {
        let request = FilterRequest {
            species: names(&["소나무"]),
            sizes: Vec::new(),
            favorite_ids: names(&["T-1"]),
        };
        assert_eq!(
            build_layer_filter("park-trees", &request, &Catalog::seoul()).to_json(),
            json!([
                "all",
                base("park"),
                ["in", ["get", "species_kr"], ["literal", ["소나무"]]],
                ["in", ["get", "source_id"], ["literal", ["T-1"]]]
            ])
        );
    }

    #[test]
    fn test_all_facets_in_fixed_order() {
        let request = FilterRequest {
            favorite_ids: names(&["T-1"]),
            sizes: names(&["giant"]),
            species: names(&["느티나무"]),
        };
        let expr = build_layer_filter("protected-trees", &request, &Catalog::seoul());
        let FilterExpression::All(parts) = expr else {
            panic!("expected all");
        };
        let properties: Vec<_> = parts
            .iter()
            .map(|p| p.to_json()[1][1].as_str().unwrap().to_string())
            .collect();
        assert_eq!(properties, ["tree_type", "species_kr", "dbh_cm", "source_id"]);
    }

    #[test]
    fn test_unknown_layer_uses_roadside() {
        assert_eq!(
            build_layer_filter("mystery", &FilterRequest::default(), &Catalog::seoul()).to_json(),
            base("roadside")
        );
    }

    #[test]
    fn test_idempotent() {
        let catalog = Catalog::seoul();
        let request = FilterRequest {
            species: names(&["은행나무", "기타"]),
            sizes: names(&["small", "xlarge"]),
            favorite_ids: names(&["A", "B"]),
        };
        for layer in LAYER_IDS {
            assert_eq!(
                build_layer_filter(layer, &request, &catalog),
                build_layer_filter(layer, &request, &catalog)
            );
        }
    }
}
