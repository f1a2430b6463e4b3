use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single property returned by the search backend.
///
/// Every attribute except `id` and `city` may be missing. Absence means
/// "unknown", never zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    pub city: String,
    pub title: Option<String>,
    pub area: Option<String>,
    pub bhk: Option<u32>,
    pub sqft: Option<u32>,
    pub bathrooms: Option<u32>,
    /// Price in lakhs (1 lakh = 100,000)
    pub price_lakhs: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Property {
    /// Coordinates, only when both halves are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Card heading: the listing title, or "{bhk} BHK in {area}".
    pub fn display_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        format!(
            "{} BHK in {}",
            self.bhk.map(|b| b.to_string()).unwrap_or_default(),
            self.area.as_deref().unwrap_or_default()
        )
    }
}

/// Shared handle to a received property. Results, chat messages and the
/// compare list all point at the same allocation.
pub type PropertyRef = Arc<Property>;

/// Structured interpretation of a free-text query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedFilters {
    #[serde(default)]
    pub bhk: Option<u32>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub min_sqft: Option<u32>,
    #[serde(default)]
    pub max_sqft: Option<u32>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// How closely the returned results satisfy the parsed filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
    Similar,
}

/// Body of `POST /api/v1/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Empty means all cities
    pub city: String,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Property>,
    pub parsed_filters: ParsedFilters,
    #[serde(default)]
    pub total: usize,
    pub match_type: MatchType,
    #[serde(default)]
    pub relaxed_filters: Vec<String>,
}

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    pub property_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Properties,
    Error,
}

/// One turn in the chat transcript
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content_type: ContentType,
    pub text: String,
    pub properties: Option<Vec<PropertyRef>>,
    pub filters: Option<ParsedFilters>,
    pub timestamp: DateTime<Utc>,
}

/// Partial update merged into an existing message. `None` leaves the
/// corresponding field untouched.
#[derive(Debug, Clone, Default)]
pub struct MessageUpdate {
    pub content_type: Option<ContentType>,
    pub text: Option<String>,
    pub properties: Option<Vec<PropertyRef>>,
    pub filters: Option<ParsedFilters>,
}

impl ChatMessage {
    pub(crate) fn apply(&mut self, update: MessageUpdate) {
        if let Some(content_type) = update.content_type {
            self.content_type = content_type;
        }
        if let Some(text) = update.text {
            self.text = text;
        }
        if let Some(properties) = update.properties {
            self.properties = Some(properties);
        }
        if let Some(filters) = update.filters {
            self.filters = Some(filters);
        }
    }
}

/// City scopes offered by the city picker.
pub const CITIES: &[(&str, &str)] = &[
    ("bangalore", "Bangalore"),
    ("mumbai", "Mumbai"),
    ("delhi", "Delhi"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_deserializes_nulls_as_none() {
        let json = r#"{
            "id": "p1", "city": "bangalore", "title": null, "area": "Whitefield",
            "bhk": 2, "sqft": null, "bathrooms": null, "price_lakhs": 85.0,
            "amenities": ["gym"], "latitude": 12.97, "longitude": null
        }"#;
        let p: Property = serde_json::from_str(json).unwrap();
        assert_eq!(p.bhk, Some(2));
        assert_eq!(p.sqft, None);
        assert_eq!(p.coordinates(), None);
        assert_eq!(p.display_title(), "2 BHK in Whitefield");
    }

    #[test]
    fn test_search_response_match_type() {
        let json = r#"{
            "results": [], "parsed_filters": {"bhk": 3, "area": "X", "amenities": []},
            "total": 0, "match_type": "partial", "relaxed_filters": ["bhk"]
        }"#;
        let r: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.match_type, MatchType::Partial);
        assert_eq!(r.parsed_filters.bhk, Some(3));
        assert_eq!(r.parsed_filters.max_price, None);
        assert_eq!(r.relaxed_filters, vec!["bhk".to_string()]);
    }

    #[test]
    fn test_api_error_body_type_field() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error": true, "message": "boom", "type": "X"}"#).unwrap();
        assert_eq!(body.kind, "X");
        assert!(body.error);
    }
}
