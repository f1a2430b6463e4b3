//! Derived values for the side-by-side compare view.
//!
//! All functions are pure over a compare list snapshot and recompute on
//! every call.

use crate::format::{format_price, PriceView};
use crate::models::{Property, PropertyRef};
use crate::store::MAX_COMPARE;

/// Two per-area prices closer than this are considered equal.
const BEST_VALUE_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    LowestPrice,
    Largest,
    BestValue,
}

impl Highlight {
    pub fn label(self) -> &'static str {
        match self {
            Highlight::LowestPrice => "Lowest Price",
            Highlight::Largest => "Largest",
            Highlight::BestValue => "Best Value",
        }
    }
}

/// Lowest known price. `None` unless at least two entries are priced.
pub fn lowest_price(list: &[PropertyRef]) -> Option<f64> {
    let prices: Vec<f64> = list.iter().filter_map(|p| p.price_lakhs).collect();
    if prices.len() < 2 {
        return None;
    }
    prices.into_iter().reduce(f64::min)
}

pub fn largest_size(list: &[PropertyRef]) -> Option<u32> {
    list.iter().filter_map(|p| p.sqft).max()
}

/// Price in currency units per square foot.
pub fn price_per_area(property: &Property) -> Option<f64> {
    match (property.price_lakhs, property.sqft) {
        (Some(price), Some(sqft)) if sqft > 0 => Some(price * 100_000.0 / sqft as f64),
        _ => None,
    }
}

fn min_price_per_area(list: &[PropertyRef]) -> Option<f64> {
    list.iter()
        .filter_map(|p| price_per_area(p))
        .reduce(f64::min)
}

/// Entries whose price per area is within tolerance of the cheapest.
pub fn best_value(list: &[PropertyRef]) -> Vec<&PropertyRef> {
    let Some(min) = min_price_per_area(list) else {
        return Vec::new();
    };
    list.iter()
        .filter(|p| price_per_area(p).is_some_and(|v| (v - min).abs() < BEST_VALUE_TOLERANCE))
        .collect()
}

/// Highlight badges for one entry. Lists with a single entry never highlight.
pub fn highlights(list: &[PropertyRef], property: &Property) -> Vec<Highlight> {
    let mut out = Vec::new();
    if list.len() < 2 {
        return out;
    }

    if let (Some(lowest), Some(price)) = (lowest_price(list), property.price_lakhs) {
        if price == lowest {
            out.push(Highlight::LowestPrice);
        }
    }
    if let (Some(largest), Some(sqft)) = (largest_size(list), property.sqft) {
        if sqft == largest {
            out.push(Highlight::Largest);
        }
    }
    if let (Some(min), Some(value)) = (min_price_per_area(list), price_per_area(property)) {
        if (value - min).abs() < BEST_VALUE_TOLERANCE {
            out.push(Highlight::BestValue);
        }
    }
    out
}

/// One column of the compare table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareColumn {
    pub id: String,
    pub header: String,
    pub bhk: String,
    pub price: String,
    pub size: String,
    pub bathrooms: String,
    pub highlights: Vec<Highlight>,
}

/// Table title, e.g. `Compare (2/5)`.
pub fn compare_title(list: &[PropertyRef]) -> String {
    format!("Compare ({}/{})", list.len(), MAX_COMPARE)
}

/// Build the table columns in insertion order.
pub fn compare_columns(list: &[PropertyRef]) -> Vec<CompareColumn> {
    let na = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "N/A".to_string());
    list.iter()
        .map(|p| CompareColumn {
            id: p.id.clone(),
            header: p.area.clone().unwrap_or_else(|| "Property".to_string()),
            bhk: na(p.bhk),
            price: format_price(p.price_lakhs, PriceView::Compare),
            size: p
                .sqft
                .map(|s| format!("{s} sqft"))
                .unwrap_or_else(|| "N/A".to_string()),
            bathrooms: na(p.bathrooms),
            highlights: highlights(list, p),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::property;

    #[test]
    fn test_lowest_price_flagged() {
        let list = vec![
            property("a", Some(150.0), Some(1500)),
            property("b", Some(85.0), Some(1000)),
        ];
        let columns = compare_columns(&list);
        assert_eq!(columns[0].price, "1.50 Cr");
        assert_eq!(columns[1].price, "85 L");
        assert!(columns[1].highlights.contains(&Highlight::LowestPrice));
        assert!(!columns[0].highlights.contains(&Highlight::LowestPrice));
        assert!(columns[0].highlights.contains(&Highlight::Largest));
    }

    #[test]
    fn test_single_entry_never_highlights() {
        let list = vec![property("a", Some(50.0), Some(800))];
        assert!(highlights(&list, &list[0]).is_empty());
        assert_eq!(lowest_price(&list), None);
    }

    #[test]
    fn test_lowest_price_needs_two_priced_entries() {
        let list = vec![property("a", Some(50.0), None), property("b", None, None)];
        assert_eq!(lowest_price(&list), None);
    }

    #[test]
    fn test_price_per_area() {
        let p = property("a", Some(100.0), Some(1000));
        assert_eq!(price_per_area(&p), Some(10_000.0));
        assert_eq!(price_per_area(&property("b", Some(100.0), None)), None);
        assert_eq!(price_per_area(&property("c", None, Some(900))), None);
    }

    #[test]
    fn test_best_value_within_tolerance() {
        let list = vec![
            property("a", Some(100.0), Some(1000)),
            property("b", Some(100.00001), Some(1000)),
            property("c", Some(120.0), Some(900)),
        ];
        let ids: Vec<_> = best_value(&list).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(highlights(&list, &list[2]), Vec::<Highlight>::new());
    }

    #[test]
    fn test_missing_values_render_na() {
        let list = vec![property("a", None, None), property("b", None, None)];
        let columns = compare_columns(&list);
        assert_eq!(columns[0].price, "N/A");
        assert_eq!(columns[0].size, "N/A");
        assert_eq!(compare_title(&list), "Compare (2/5)");
        assert!(columns[0].highlights.is_empty());
    }
}
