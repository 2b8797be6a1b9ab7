use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Source of a business record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    GoogleMaps,
    PlacesApi,
    Generator,
}

/// Core business data model for the Bazar Se catalog
///
/// Every field except `source` and `scraped_at` is optional: listings on the
/// map surface are wildly inconsistent and a record with just a name and an
/// address is still worth keeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub name: Option<String>,
    pub address: Option<String>,
    pub domain: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub categories: Vec<String>,
    pub subcategories: Vec<String>,
    pub primary_category: Option<String>,
    pub primary_subcategory: Option<String>,
    pub area: Option<String>,
    pub city: String,
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
    pub reviews_count: Option<i64>,
    pub google_place_id: Option<String>,
    pub business_status: Option<String>,
    pub price_level: Option<i64>,
    pub opening_hours: Option<String>,
    pub image_url: Option<String>,
    pub photos: Vec<String>,
    pub google_types: Vec<String>,
    pub verified: bool,
    pub claimed: bool,
    pub source: Source,
    pub scraped_at: DateTime<Utc>,
}

impl Business {
    /// Create an empty record stamped with the current time
    pub fn new(source: Source) -> Self {
        Self {
            name: None,
            address: None,
            domain: None,
            website: None,
            phone_number: None,
            categories: Vec::new(),
            subcategories: Vec::new(),
            primary_category: None,
            primary_subcategory: None,
            area: None,
            city: "Ujjain".to_string(),
            state: "Madhya Pradesh".to_string(),
            latitude: None,
            longitude: None,
            rating: None,
            reviews_count: None,
            google_place_id: None,
            business_status: None,
            price_level: None,
            opening_hours: None,
            image_url: None,
            photos: Vec::new(),
            google_types: Vec::new(),
            verified: false,
            claimed: false,
            source,
            scraped_at: Utc::now(),
        }
    }

    /// Run-local duplicate key over (name, address, phone-if-present).
    ///
    /// The phone number only participates when set, so two listings at the
    /// same address with different numbers are treated as distinct shops.
    pub fn dedup_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        self.address.hash(&mut hasher);
        if let Some(phone) = &self.phone_number {
            "phone".hash(&mut hasher);
            phone.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Attach classification results and keep the first match as primary
    pub fn set_categories(&mut self, categories: Vec<String>, subcategories: Vec<String>) {
        self.primary_category = categories.first().cloned();
        self.primary_subcategory = subcategories.first().cloned();
        self.categories = categories;
        self.subcategories = subcategories;
    }
}

/// Collection of businesses with run-local duplicate suppression.
///
/// The seen-set lives only for the lifetime of this list; duplicates are not
/// tracked across runs or across output files.
#[derive(Debug, Default)]
pub struct BusinessList {
    businesses: Vec<Business>,
    seen: HashSet<u64>,
}

impl BusinessList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a business unless an identical (name, address, phone) was already
    /// seen in this run. Returns whether the record was kept.
    pub fn add(&mut self, business: Business) -> bool {
        if self.seen.insert(business.dedup_key()) {
            self.businesses.push(business);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }

    pub fn as_slice(&self) -> &[Business] {
        &self.businesses
    }

    pub fn into_vec(self) -> Vec<Business> {
        self.businesses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, address: &str, phone: Option<&str>) -> Business {
        let mut b = Business::new(Source::GoogleMaps);
        b.name = Some(name.to_string());
        b.address = Some(address.to_string());
        b.phone_number = phone.map(|p| p.to_string());
        b
    }

    #[test]
    fn rejects_duplicate_name_and_address() {
        let mut list = BusinessList::new();
        assert!(list.add(record("Mahakal Sweets", "Freeganj, Ujjain", None)));
        assert!(!list.add(record("Mahakal Sweets", "Freeganj, Ujjain", None)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn different_phone_is_a_distinct_record() {
        let mut list = BusinessList::new();
        assert!(list.add(record("City Clinic", "Tower Chowk", Some("+91 9812345670"))));
        assert!(list.add(record("City Clinic", "Tower Chowk", Some("+91 9812345671"))));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn dedup_key_is_stable_for_equal_fields() {
        let a = record("Fashion Point", "Dewas Gate", Some("+91 9876543230"));
        let b = record("Fashion Point", "Dewas Gate", Some("+91 9876543230"));
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn primary_category_tracks_first_match() {
        let mut b = record("Fresh Bakery", "Nanakheda", None);
        b.set_categories(
            vec!["Food & Dining".into(), "Grocery & Daily".into()],
            vec!["Bakeries".into()],
        );
        assert_eq!(b.primary_category.as_deref(), Some("Food & Dining"));
        assert_eq!(b.primary_subcategory.as_deref(), Some("Bakeries"));
    }
}
