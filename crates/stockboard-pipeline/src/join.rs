//! Sort-and-lookup join of availability feeds onto products.
//!
//! Manufacturer names are matched exactly. Ids are matched
//! case-insensitively: feed ids are lower-cased when indexed and product ids
//! are lower-cased at lookup time.

use std::collections::{HashMap, HashSet};

use stockboard_core::{AvailabilityRecord, ProductRecord};
use stockboard_fetch::extract_in_stock_value;

/// Distinct manufacturers in the order they first appear.
#[must_use]
pub fn distinct_manufacturers(products: &[ProductRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|p| seen.insert(p.manufacturer.as_str()))
        .map(|p| p.manufacturer.clone())
        .collect()
}

/// Prepares a raw feed for lookup: lower-cases ids, extracts the in-stock
/// value from each payload, and sorts ascending by id.
///
/// The sort is stable, so duplicate ids keep their feed order.
#[must_use]
pub fn index_feed(mut records: Vec<AvailabilityRecord>) -> Vec<AvailabilityRecord> {
    for record in &mut records {
        record.id = record.id.to_lowercase();
        record.availability = extract_in_stock_value(&record.raw_payload);
    }
    records.sort_by(|a, b| a.id.cmp(&b.id));
    records
}

/// Copies availability from `feed` onto every product of `manufacturer`.
///
/// `feed` must be sorted by id (see [`index_feed`]). A product whose id is
/// not in the feed, or whose feed entry carries no in-stock value, keeps its
/// current availability. Returns the number of products updated.
pub fn join_manufacturer(
    products: &mut [ProductRecord],
    manufacturer: &str,
    feed: &[AvailabilityRecord],
) -> usize {
    debug_assert!(feed.windows(2).all(|w| w[0].id <= w[1].id));

    let mut updated = 0;
    for product in products
        .iter_mut()
        .filter(|p| p.manufacturer == manufacturer)
    {
        let key = product.join_key();
        let idx = feed.partition_point(|r| r.id.as_str() < key.as_str());
        let Some(record) = feed.get(idx).filter(|r| r.id == key) else {
            continue;
        };
        if let Some(availability) = &record.availability {
            availability.clone_into(&mut product.availability);
            updated += 1;
        }
    }
    updated
}

/// Sorted availability feeds keyed by manufacturer.
///
/// Each manufacturer's entry is written once, when its feed arrives.
#[derive(Debug, Default)]
pub struct AvailabilityIndex {
    feeds: HashMap<String, Vec<AvailabilityRecord>>,
}

impl AvailabilityIndex {
    /// Indexes `records` under `manufacturer`, replacing any previous feed,
    /// and returns the stored, sorted slice.
    pub fn insert(
        &mut self,
        manufacturer: &str,
        records: Vec<AvailabilityRecord>,
    ) -> &[AvailabilityRecord] {
        let feed = self.feeds.entry(manufacturer.to_owned()).or_default();
        *feed = index_feed(records);
        feed
    }

    #[must_use]
    pub fn get(&self, manufacturer: &str) -> Option<&[AvailabilityRecord]> {
        self.feeds.get(manufacturer).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

#[cfg(test)]
#[path = "join_test.rs"]
mod tests;
