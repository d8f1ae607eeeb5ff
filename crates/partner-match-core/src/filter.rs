//! Filter stage: hard exclusion predicates over the catalog.
//!
//! An organization is retained iff it passes every provided predicate.
//! Absent parameters impose no constraint. Predicates are pure and
//! independent, so evaluation order only affects cost; the cheap
//! structured-field checks run before the free-text scan.
//!
//! | Parameter | Match rule |
//! |-----------|------------|
//! | `query` | case-insensitive substring of name, mission, description, or any focus area |
//! | `focus_area` | case-insensitive **exact** match against one focus area |
//! | `region` | case-insensitive substring of the organization's region |
//! | `funding_type` | case-insensitive exact equality |
//! | `verification_status` | exact equality; an unrecognized value matches nothing |

use crate::models::{Organization, SearchParams};

/// Case-insensitive equality using Unicode lowercase folding.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test using Unicode lowercase folding.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True if any of the organization's focus areas equals `area`, ignoring case.
pub fn has_focus_area(org: &Organization, area: &str) -> bool {
    org.focus_areas.iter().any(|a| eq_ignore_case(a, area))
}

/// True if the organization's region contains `region`, ignoring case.
pub fn region_matches(org: &Organization, region: &str) -> bool {
    contains_ignore_case(&org.region, region)
}

/// True if the organization's funding type equals `funding_type`, ignoring case.
pub fn funding_type_matches(org: &Organization, funding_type: &str) -> bool {
    eq_ignore_case(&org.funding_type, funding_type)
}

fn text_matches(org: &Organization, query: &str) -> bool {
    let q = query.to_lowercase();
    org.name.to_lowercase().contains(&q)
        || org.mission.to_lowercase().contains(&q)
        || org.description.to_lowercase().contains(&q)
        || org.focus_areas.iter().any(|a| a.to_lowercase().contains(&q))
}

/// Evaluate every provided predicate against one organization.
pub fn matches(org: &Organization, params: &SearchParams) -> bool {
    if let Some(ref status) = params.verification_status {
        if !status.admits(org.verification_status) {
            return false;
        }
    }

    if let Some(ref funding) = params.funding_type {
        if !funding_type_matches(org, funding) {
            return false;
        }
    }

    if let Some(ref area) = params.focus_area {
        if !has_focus_area(org, area) {
            return false;
        }
    }

    if let Some(ref region) = params.region {
        if !region_matches(org, region) {
            return false;
        }
    }

    if let Some(ref query) = params.query {
        if !text_matches(org, query) {
            return false;
        }
    }

    true
}

/// Return the subset of `catalog` passing all predicates, in catalog order.
pub fn filter<'a>(catalog: &'a [Organization], params: &SearchParams) -> Vec<&'a Organization> {
    catalog.iter().filter(|org| matches(org, params)).collect()
}
