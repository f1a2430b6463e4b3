use crate::format::{fixed, plain_number};
use crate::models::{MatchType, ParsedFilters};

pub const NO_MATCHES: &str = "I couldn't find any properties matching your criteria. Try adjusting your search or use different terms.";

/// Assistant reply for a completed chat search.
pub fn generate_response_text(
    count: usize,
    filters: &ParsedFilters,
    match_type: MatchType,
    relaxed_filters: &[String],
) -> String {
    if count == 0 {
        return NO_MATCHES.to_string();
    }

    let criteria = describe_criteria(filters);
    let relaxed = |name: &str| relaxed_filters.iter().any(|f| f == name);

    match match_type {
        MatchType::Exact if count == 1 => format!("I found 1 property matching {criteria}:"),
        MatchType::Exact => format!("I found {count} properties matching {criteria}:"),
        MatchType::Partial => {
            let mut dropped = Vec::new();
            if let (true, Some(bhk)) = (relaxed("bhk"), filters.bhk) {
                dropped.push(format!("{bhk} BHK"));
            }
            if let (true, Some(area)) = (relaxed("area"), &filters.area) {
                dropped.push(format!("in {area}"));
            }
            if relaxed("price") {
                dropped.push("price range".to_string());
            }
            if dropped.is_empty() {
                return format!("I found {count} properties for {criteria}:");
            }

            match (&filters.area, filters.bhk) {
                (Some(area), Some(bhk)) if relaxed("bhk") && !relaxed("area") => format!(
                    "I couldn't find {bhk} BHK properties in {area}, but here are {count} other properties in the area:"
                ),
                (area, Some(bhk)) if relaxed("area") && !relaxed("bhk") => format!(
                    "I couldn't find properties in {}, but here are {count} {bhk} BHK properties nearby:",
                    area.as_deref().unwrap_or_default()
                ),
                _ => format!(
                    "I couldn't find exact matches for {}, but here are {count} similar properties:",
                    dropped.join(" ")
                ),
            }
        }
        MatchType::Similar => format!(
            "I couldn't find exact matches for {criteria}, but here are {count} similar properties you might like:"
        ),
    }
}

/// Filter criteria in fixed order: bhk, price, area, amenities.
fn describe_criteria(filters: &ParsedFilters) -> String {
    let mut parts = Vec::new();
    if let Some(bhk) = filters.bhk {
        parts.push(format!("{bhk} BHK"));
    }
    if let Some(max) = filters.max_price {
        if max >= 100.0 {
            parts.push(format!("under {} Cr", fixed(max / 100.0, 1)));
        } else {
            parts.push(format!("under {} L", plain_number(max)));
        }
    }
    if let Some(area) = &filters.area {
        parts.push(format!("in {area}"));
    }
    if !filters.amenities.is_empty() {
        parts.push(format!("with {}", filters.amenities.join(", ")));
    }

    if parts.is_empty() {
        "your search".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relaxed(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_zero_results_ignores_filters() {
        let filters = ParsedFilters {
            bhk: Some(2),
            ..Default::default()
        };
        assert_eq!(
            generate_response_text(0, &filters, MatchType::Exact, &[]),
            NO_MATCHES
        );
    }

    #[test]
    fn test_exact_single_result() {
        let filters = ParsedFilters {
            bhk: Some(2),
            ..Default::default()
        };
        let text = generate_response_text(1, &filters, MatchType::Exact, &[]);
        assert_eq!(text, "I found 1 property matching 2 BHK:");
    }

    #[test]
    fn test_exact_lists_criteria_in_order() {
        let filters = ParsedFilters {
            bhk: Some(2),
            max_price: Some(100.0),
            area: Some("Whitefield".to_string()),
            amenities: vec!["gym".to_string(), "pool".to_string()],
            ..Default::default()
        };
        let text = generate_response_text(4, &filters, MatchType::Exact, &[]);
        assert_eq!(
            text,
            "I found 4 properties matching 2 BHK under 1.0 Cr in Whitefield with gym, pool:"
        );
    }

    #[test]
    fn test_crore_price_rounds_halves_up() {
        let filters = ParsedFilters {
            max_price: Some(125.0),
            ..Default::default()
        };
        let text = generate_response_text(2, &filters, MatchType::Exact, &[]);
        assert_eq!(text, "I found 2 properties matching under 1.3 Cr:");
    }

    #[test]
    fn test_price_below_crore_in_lakhs() {
        let filters = ParsedFilters {
            max_price: Some(80.0),
            ..Default::default()
        };
        let text = generate_response_text(2, &filters, MatchType::Exact, &[]);
        assert_eq!(text, "I found 2 properties matching under 80 L:");
    }

    #[test]
    fn test_no_criteria_says_your_search() {
        let text = generate_response_text(3, &ParsedFilters::default(), MatchType::Exact, &[]);
        assert_eq!(text, "I found 3 properties matching your search:");
    }

    #[test]
    fn test_partial_bhk_relaxed_keeps_area() {
        let filters = ParsedFilters {
            bhk: Some(3),
            area: Some("X".to_string()),
            ..Default::default()
        };
        let text = generate_response_text(1, &filters, MatchType::Partial, &relaxed(&["bhk"]));
        assert!(text.contains("couldn't find"));
        assert!(text.contains("3 BHK"));
        assert!(!text.contains("couldn't find properties in"));
        assert_eq!(
            text,
            "I couldn't find 3 BHK properties in X, but here are 1 other properties in the area:"
        );
    }

    #[test]
    fn test_partial_area_relaxed_keeps_bhk() {
        let filters = ParsedFilters {
            bhk: Some(2),
            area: Some("Indiranagar".to_string()),
            ..Default::default()
        };
        let text = generate_response_text(5, &filters, MatchType::Partial, &relaxed(&["area"]));
        assert_eq!(
            text,
            "I couldn't find properties in Indiranagar, but here are 5 2 BHK properties nearby:"
        );
    }

    #[test]
    fn test_partial_generic_relaxation() {
        let filters = ParsedFilters {
            bhk: Some(2),
            area: Some("HSR".to_string()),
            ..Default::default()
        };
        let text = generate_response_text(
            3,
            &filters,
            MatchType::Partial,
            &relaxed(&["bhk", "area", "price"]),
        );
        assert_eq!(
            text,
            "I couldn't find exact matches for 2 BHK in HSR price range, but here are 3 similar properties:"
        );
    }

    #[test]
    fn test_partial_bhk_relaxed_without_bhk_value() {
        let filters = ParsedFilters {
            area: Some("X".to_string()),
            ..Default::default()
        };
        let text =
            generate_response_text(2, &filters, MatchType::Partial, &relaxed(&["bhk", "price"]));
        assert_eq!(
            text,
            "I couldn't find exact matches for price range, but here are 2 similar properties:"
        );
        assert!(!text.contains(" BHK"));
    }

    #[test]
    fn test_partial_without_describable_relaxation() {
        let filters = ParsedFilters {
            area: Some("HSR".to_string()),
            ..Default::default()
        };
        let text = generate_response_text(2, &filters, MatchType::Partial, &relaxed(&["bhk"]));
        assert_eq!(text, "I found 2 properties for in HSR:");
    }

    #[test]
    fn test_similar() {
        let filters = ParsedFilters {
            amenities: vec!["pool".to_string()],
            ..Default::default()
        };
        let text = generate_response_text(2, &filters, MatchType::Similar, &[]);
        assert_eq!(
            text,
            "I couldn't find exact matches for with pool, but here are 2 similar properties you might like:"
        );
    }
}
