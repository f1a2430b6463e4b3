//! Display formatting shared by the result, chat, map and compare views.

use crate::models::ParsedFilters;
use rust_decimal::{Decimal, RoundingStrategy};

/// Where a price is rendered. Each view has its own wording for a
/// missing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceView {
    /// Side-by-side compare table
    Compare,
    /// Result cards, chat cards and map popups
    Card,
}

impl PriceView {
    fn missing(self) -> &'static str {
        match self {
            PriceView::Compare => "N/A",
            PriceView::Card => "Price on request",
        }
    }
}

/// Format a price in lakhs: `"1.50 Cr"` from 100 upwards, `"85 L"` below.
pub fn format_price(price_lakhs: Option<f64>, view: PriceView) -> String {
    match price_lakhs {
        None => view.missing().to_string(),
        Some(price) if price >= 100.0 => format!("{} Cr", fixed(price / 100.0, 2)),
        Some(price) => format!("{} L", plain_number(price)),
    }
}

/// Fixed-point rendering of the exact binary value, halves rounded away
/// from zero: `fixed(1.125, 2)` is `"1.13"`, `fixed(1.25, 1)` is `"1.3"`.
pub fn fixed(value: f64, places: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded =
                exact.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", places as usize, rounded)
        }
        None => format!("{:.*}", places as usize, value),
    }
}

/// Render a number without a trailing `.0` for whole values.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Short labels summarising the parsed filters of a chat reply.
pub fn filter_badges(filters: &ParsedFilters) -> Vec<String> {
    let mut badges = Vec::new();

    if let Some(bhk) = filters.bhk {
        badges.push(format!("{bhk} BHK"));
    }
    match (filters.min_price, filters.max_price) {
        (Some(min), Some(max)) => {
            badges.push(format!("{}L - {}L", plain_number(min), plain_number(max)))
        }
        (Some(min), None) => badges.push(format!("Min {}L", plain_number(min))),
        (None, Some(max)) => badges.push(format!("Under {}L", plain_number(max))),
        (None, None) => {}
    }
    match (filters.min_sqft, filters.max_sqft) {
        (Some(min), Some(max)) => badges.push(format!("{min} - {max} sqft")),
        (Some(min), None) => badges.push(format!("Min {min} sqft")),
        (None, Some(max)) => badges.push(format!("Under {max} sqft")),
        (None, None) => {}
    }
    if let Some(area) = &filters.area {
        badges.push(area.clone());
    }
    badges.extend(filters.amenities.iter().cloned());

    badges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(150.0), PriceView::Compare), "1.50 Cr");
        assert_eq!(format_price(Some(85.0), PriceView::Compare), "85 L");
        assert_eq!(format_price(Some(100.0), PriceView::Card), "1.00 Cr");
        assert_eq!(format_price(Some(42.5), PriceView::Card), "42.5 L");
    }

    #[test]
    fn test_format_price_rounds_halves_up() {
        assert_eq!(format_price(Some(112.5), PriceView::Card), "1.13 Cr");
        assert_eq!(format_price(Some(112.5), PriceView::Compare), "1.13 Cr");
        assert_eq!(format_price(Some(100.5), PriceView::Card), "1.00 Cr");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(1.125, 2), "1.13");
        assert_eq!(fixed(1.25, 1), "1.3");
        assert_eq!(fixed(1.35, 1), "1.4");
        assert_eq!(fixed(2.0, 2), "2.00");
        assert_eq!(fixed(0.5, 0), "1");
    }

    #[test]
    fn test_missing_price_wording_per_view() {
        assert_eq!(format_price(None, PriceView::Compare), "N/A");
        assert_eq!(format_price(None, PriceView::Card), "Price on request");
    }

    #[test]
    fn test_filter_badges() {
        let filters = ParsedFilters {
            bhk: Some(2),
            min_price: Some(50.0),
            max_price: Some(90.0),
            max_sqft: Some(1200),
            area: Some("Whitefield".to_string()),
            amenities: vec!["gym".to_string()],
            ..Default::default()
        };
        assert_eq!(
            filter_badges(&filters),
            vec!["2 BHK", "50L - 90L", "Under 1200 sqft", "Whitefield", "gym"]
        );
        assert!(filter_badges(&ParsedFilters::default()).is_empty());
    }
}
