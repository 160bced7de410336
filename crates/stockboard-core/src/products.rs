use serde::Deserialize;

/// A product listed under one of the catalog categories.
///
/// `availability` is not part of the products feed; it starts empty and is
/// filled in by the availability join.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    /// Grouping key for the availability feed. Compared case-sensitively.
    pub manufacturer: String,
    #[serde(default)]
    pub color: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub availability: String,
}

impl ProductRecord {
    /// Case-insensitive key used to look the product up in an availability feed.
    #[must_use]
    pub fn join_key(&self) -> String {
        self.id.to_lowercase()
    }

    /// Price as shown in the rendered table (`12` rather than `12.0`).
    #[must_use]
    pub fn display_price(&self) -> String {
        self.price.to_string()
    }
}

/// One entry of a manufacturer's availability feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AvailabilityRecord {
    pub id: String,
    /// Free-text XML-ish payload carrying the `<INSTOCKVALUE>` tag.
    #[serde(rename = "DATAPAYLOAD")]
    pub raw_payload: String,
    /// Extracted in-stock value. `None` until ingested, and stays `None` when
    /// the payload carries no tag.
    #[serde(skip)]
    pub availability: Option<String>,
}
