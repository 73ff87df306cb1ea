//! Optional facet clauses. Each returns `None` when the facet adds nothing.

use crate::config::{CATCH_ALL_SPECIES, SizeCategory};
use crate::expr::FilterExpression;

pub const SPECIES_PROPERTY: &str = "species_kr";
pub const DBH_PROPERTY: &str = "dbh_cm";
pub const SOURCE_ID_PROPERTY: &str = "source_id";

/// Restrict to the selected species names.
///
/// Selecting every species is the same as selecting none. The catch-all
/// entry cannot be expressed as a membership test, so it is dropped; if it
/// was the only selection no clause is produced and all species stay visible.
pub fn species_filter(
    species: &[String],
    total_species_count: Option<usize>,
) -> Option<FilterExpression> {
    if species.is_empty() {
        return None;
    }

    if total_species_count.is_some_and(|total| species.len() >= total) {
        return None;
    }

    let has_catch_all = species
        .iter()
        .any(|name| CATCH_ALL_SPECIES.contains(&name.as_str()));

    if !has_catch_all {
        return Some(FilterExpression::is_in(SPECIES_PROPERTY, species.to_vec()));
    }

    let named: Vec<String> = species
        .iter()
        .filter(|name| !CATCH_ALL_SPECIES.contains(&name.as_str()))
        .cloned()
        .collect();

    if named.is_empty() {
        tracing::debug!("Filter: catch-all species selected alone, species facet skipped");
        return None;
    }

    Some(FilterExpression::is_in(SPECIES_PROPERTY, named))
}

/// Restrict to the union of the selected DBH buckets.
pub fn size_filter(sizes: &[String], categories: &[SizeCategory]) -> Option<FilterExpression> {
    if sizes.is_empty() || sizes.len() >= categories.len() {
        return None;
    }

    let mut clauses: Vec<FilterExpression> = sizes
        .iter()
        .filter_map(|id| {
            let category = categories.iter().find(|c| &c.id == id);
            if category.is_none() {
                tracing::debug!("Filter: unknown size bucket {:?} skipped", id);
            }
            category
        })
        .map(bucket_clause)
        .collect();

    match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(FilterExpression::Any(clauses)),
    }
}

fn bucket_clause(category: &SizeCategory) -> FilterExpression {
    let lower = FilterExpression::ge(DBH_PROPERTY, category.min());
    match category.max() {
        None => lower,
        Some(max) => FilterExpression::All(vec![lower, FilterExpression::lt(DBH_PROPERTY, max)]),
    }
}

/// Restrict to an explicit allowlist of tree ids.
pub fn favorites_filter(favorite_ids: &[String]) -> Option<FilterExpression> {
    if favorite_ids.is_empty() {
        return None;
    }
    Some(FilterExpression::is_in(
        SOURCE_ID_PROPERTY,
        favorite_ids.to_vec(),
    ))
}
