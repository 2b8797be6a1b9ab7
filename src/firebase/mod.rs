//! Firestore REST integration: typed field mapping and batch pushes.

pub mod rules;

use crate::models::Business;
use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_PROJECT_ID: &str = "bazarse-8c768";
pub const DEFAULT_COLLECTION: &str = "ujjain_businesses";

// Throttle between document writes
const WRITE_DELAY: Duration = Duration::from_millis(500);

/// Thin client over the Firestore REST documents endpoint
pub struct FirestoreClient {
    http: Client,
    project_id: String,
}

impl FirestoreClient {
    pub fn new(project_id: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            project_id: project_id.into(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents/{}",
            self.project_id, collection
        )
    }

    /// POST one business document; the API creates an auto-id document
    pub async fn push_business(&self, collection: &str, business: &Business) -> Result<()> {
        let body = business_document(business);
        let response = self
            .http
            .post(self.collection_url(collection))
            .json(&body)
            .send()
            .await
            .context("Firestore request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Firestore rejected document: {} {}", status, text);
        }
        Ok(())
    }

    /// Push a whole batch, logging and skipping failures. Returns the number
    /// of documents written.
    pub async fn push_all(&self, collection: &str, businesses: &[Business]) -> usize {
        let mut written = 0;
        for business in businesses {
            let label = business.name.as_deref().unwrap_or("<unnamed>");
            match self.push_business(collection, business).await {
                Ok(()) => {
                    written += 1;
                    info!("Added to Firestore: {}", label);
                }
                Err(e) => {
                    warn!("Firestore error for {}: {:#}", label, e);
                }
            }
            tokio::time::sleep(WRITE_DELAY).await;
        }
        info!(
            "Pushed {}/{} businesses to collection '{}'",
            written,
            businesses.len(),
            collection
        );
        written
    }

    /// Push the category taxonomy so the app can render its browse screens
    pub async fn push_categories(&self, collection: &str) -> usize {
        let mut written = 0;
        for group in crate::catalog::CATEGORY_GROUPS {
            let subcategories: Vec<Value> = group
                .terms
                .iter()
                .map(|t| json!({ "stringValue": t }))
                .collect();
            let body = json!({
                "fields": {
                    "name": { "stringValue": group.name },
                    "icon": { "stringValue": group.icon },
                    "subcategories": { "arrayValue": { "values": subcategories } },
                    "createdAt": { "timestampValue": timestamp_now() },
                }
            });

            let result = self
                .http
                .post(self.collection_url(collection))
                .json(&body)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    written += 1;
                    info!("Added category: {}", group.name);
                }
                Ok(response) => warn!(
                    "Failed to add category {}: {}",
                    group.name,
                    response.status()
                ),
                Err(e) => warn!("Failed to add category {}: {}", group.name, e),
            }
            tokio::time::sleep(WRITE_DELAY).await;
        }
        written
    }
}

fn timestamp_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

fn double_value(v: f64) -> Value {
    json!({ "doubleValue": v })
}

fn integer_value(v: i64) -> Value {
    // Firestore wants int64 as a string
    json!({ "integerValue": v.to_string() })
}

fn boolean_value(v: bool) -> Value {
    json!({ "booleanValue": v })
}

fn string_array_value(items: &[String]) -> Value {
    let values: Vec<Value> = items.iter().map(|s| string_value(s)).collect();
    json!({ "arrayValue": { "values": values } })
}

/// Convert a business into the typed `fields` document shape, skipping unset
/// fields entirely.
pub fn business_document(business: &Business) -> Value {
    let mut fields = Map::new();

    let set_str = |fields: &mut Map<String, Value>, key: &str, value: &Option<String>| {
        if let Some(v) = value {
            fields.insert(key.to_string(), string_value(v));
        }
    };

    set_str(&mut fields, "name", &business.name);
    set_str(&mut fields, "address", &business.address);
    set_str(&mut fields, "domain", &business.domain);
    set_str(&mut fields, "website", &business.website);
    set_str(&mut fields, "phone_number", &business.phone_number);
    set_str(&mut fields, "primary_category", &business.primary_category);
    set_str(&mut fields, "primary_subcategory", &business.primary_subcategory);
    set_str(&mut fields, "area", &business.area);
    set_str(&mut fields, "business_status", &business.business_status);
    set_str(&mut fields, "opening_hours", &business.opening_hours);
    set_str(&mut fields, "image_url", &business.image_url);
    set_str(&mut fields, "google_place_id", &business.google_place_id);

    fields.insert("city".to_string(), string_value(&business.city));
    fields.insert("state".to_string(), string_value(&business.state));

    if !business.categories.is_empty() {
        fields.insert(
            "categories".to_string(),
            string_array_value(&business.categories),
        );
    }
    if !business.subcategories.is_empty() {
        fields.insert(
            "subcategories".to_string(),
            string_array_value(&business.subcategories),
        );
    }
    if !business.photos.is_empty() {
        fields.insert("photos".to_string(), string_array_value(&business.photos));
    }
    if !business.google_types.is_empty() {
        fields.insert(
            "google_types".to_string(),
            string_array_value(&business.google_types),
        );
    }

    if let Some(v) = business.latitude {
        fields.insert("latitude".to_string(), double_value(v));
    }
    if let Some(v) = business.longitude {
        fields.insert("longitude".to_string(), double_value(v));
    }
    if let Some(v) = business.rating {
        fields.insert("rating".to_string(), double_value(v));
    }
    if let Some(v) = business.reviews_count {
        fields.insert("reviews_count".to_string(), integer_value(v));
    }
    if let Some(v) = business.price_level {
        fields.insert("price_level".to_string(), integer_value(v));
    }

    fields.insert("verified".to_string(), boolean_value(business.verified));
    fields.insert("claimed".to_string(), boolean_value(business.claimed));
    fields.insert(
        "source".to_string(),
        string_value(&format!("{:?}", business.source)),
    );
    fields.insert(
        "scraped_at".to_string(),
        json!({ "timestampValue": business.scraped_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string() }),
    );
    fields.insert(
        "createdAt".to_string(),
        json!({ "timestampValue": timestamp_now() }),
    );
    fields.insert(
        "updatedAt".to_string(),
        json!({ "timestampValue": timestamp_now() }),
    );

    json!({ "fields": fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    #[test]
    fn document_uses_typed_wrappers() {
        let mut b = Business::new(Source::GoogleMaps);
        b.name = Some("Mahakal Sweets".to_string());
        b.latitude = Some(23.18);
        b.reviews_count = Some(210);
        b.categories = vec!["Food & Dining".to_string()];

        let doc = business_document(&b);
        let fields = &doc["fields"];

        assert_eq!(fields["name"]["stringValue"], "Mahakal Sweets");
        assert_eq!(fields["latitude"]["doubleValue"], 23.18);
        // int64 fields travel as strings
        assert_eq!(fields["reviews_count"]["integerValue"], "210");
        assert_eq!(
            fields["categories"]["arrayValue"]["values"][0]["stringValue"],
            "Food & Dining"
        );
        assert_eq!(fields["verified"]["booleanValue"], false);
        assert!(fields["scraped_at"]["timestampValue"]
            .as_str()
            .unwrap()
            .ends_with('Z'));
    }

    #[test]
    fn unset_fields_are_omitted() {
        let b = Business::new(Source::Generator);
        let doc = business_document(&b);
        let fields = doc["fields"].as_object().unwrap();

        assert!(!fields.contains_key("name"));
        assert!(!fields.contains_key("website"));
        assert!(!fields.contains_key("rating"));
        assert!(!fields.contains_key("photos"));
        // always present
        assert!(fields.contains_key("city"));
        assert!(fields.contains_key("source"));
        assert!(fields.contains_key("scraped_at"));
    }
}
