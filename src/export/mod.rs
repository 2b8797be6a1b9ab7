//! Output artifacts: per-query JSON/CSV buckets and the end-of-run summary.

use crate::models::Business;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A run-scoped output directory
#[derive(Debug, Clone)]
pub struct RunDir {
    path: PathBuf,
}

impl RunDir {
    /// `<root>/<YYYY-MM-DD>`, shared by every scrape started the same day
    pub fn dated(root: &Path) -> Result<Self> {
        let path = root.join(Local::now().format("%Y-%m-%d").to_string());
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create output dir {}", path.display()))?;
        Ok(Self { path })
    }

    /// `<prefix>_<YYYYMMDD_HHMMSS>`, one per generator invocation
    pub fn stamped(prefix: &Path) -> Result<Self> {
        let parent = prefix.parent().unwrap_or_else(|| Path::new("."));
        let name = prefix
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "run".to_string());
        let path = parent.join(format!(
            "{}_{}",
            name,
            Local::now().format("%Y%m%d_%H%M%S")
        ));
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create output dir {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

/// Turn a search query into a filesystem-safe bucket name
pub fn slugify_query(query: &str) -> String {
    let trimmed = query
        .trim_end_matches(", Ujjain")
        .trim_end_matches(" in Ujjain");
    let slug: String = trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let mut out = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}

/// Write the pretty-printed JSON bucket for one query or category
pub fn save_json(businesses: &[Business], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(businesses)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {} businesses to {}", businesses.len(), path.display());
    Ok(())
}

/// Flattened row shape for the CSV export
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    address: &'a str,
    phone_number: &'a str,
    primary_category: &'a str,
    primary_subcategory: &'a str,
    categories: String,
    area: &'a str,
    city: &'a str,
    state: &'a str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    rating: Option<f64>,
    reviews_count: Option<i64>,
    website: &'a str,
    opening_hours: &'a str,
    source: String,
    scraped_at: DateTime<Utc>,
}

/// Write the CSV bucket alongside the JSON one
pub fn save_csv(businesses: &[Business], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for b in businesses {
        writer.serialize(CsvRow {
            name: b.name.as_deref().unwrap_or(""),
            address: b.address.as_deref().unwrap_or(""),
            phone_number: b.phone_number.as_deref().unwrap_or(""),
            primary_category: b.primary_category.as_deref().unwrap_or(""),
            primary_subcategory: b.primary_subcategory.as_deref().unwrap_or(""),
            categories: b.categories.join("; "),
            area: b.area.as_deref().unwrap_or(""),
            city: &b.city,
            state: &b.state,
            latitude: b.latitude,
            longitude: b.longitude,
            rating: b.rating,
            reviews_count: b.reviews_count,
            website: b.website.as_deref().unwrap_or(""),
            opening_hours: b.opening_hours.as_deref().unwrap_or(""),
            source: format!("{:?}", b.source),
            scraped_at: b.scraped_at,
        })?;
    }

    writer.flush()?;
    info!("Saved {} rows to {}", businesses.len(), path.display());
    Ok(())
}

/// End-of-run summary written next to the buckets
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total_businesses: usize,
    pub generated_at: DateTime<Utc>,
    pub locations_covered: usize,
    pub categories_covered: usize,
    pub per_category: BTreeMap<String, usize>,
    pub source: String,
}

impl RunSummary {
    pub fn from_businesses(businesses: &[Business], source: &str) -> Self {
        let mut per_category: BTreeMap<String, usize> = BTreeMap::new();
        for b in businesses {
            let key = b
                .primary_category
                .clone()
                .unwrap_or_else(|| "Uncategorized".to_string());
            *per_category.entry(key).or_insert(0) += 1;
        }

        let mut areas: Vec<&str> = businesses
            .iter()
            .filter_map(|b| b.area.as_deref())
            .collect();
        areas.sort_unstable();
        areas.dedup();

        Self {
            total_businesses: businesses.len(),
            generated_at: Utc::now(),
            locations_covered: areas.len(),
            categories_covered: per_category.len(),
            per_category,
            source: source.to_string(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved run summary to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    #[test]
    fn slugs_drop_city_tail_and_punctuation() {
        assert_eq!(
            slugify_query("sweet shops in Freeganj, Ujjain"),
            "sweet_shops_in_freeganj"
        );
        assert_eq!(slugify_query("atms in Ujjain"), "atms");
        assert_eq!(slugify_query("x-ray centers in Ujjain"), "x_ray_centers");
    }

    #[test]
    fn summary_counts_per_category() {
        let mut a = Business::new(Source::Generator);
        a.primary_category = Some("Food & Dining".to_string());
        a.area = Some("Freeganj".to_string());
        let mut b = Business::new(Source::Generator);
        b.primary_category = Some("Food & Dining".to_string());
        b.area = Some("Tower Chowk".to_string());
        let mut c = Business::new(Source::Generator);
        c.primary_category = Some("Travel & Stay".to_string());
        c.area = Some("Freeganj".to_string());

        let summary = RunSummary::from_businesses(&[a, b, c], "generator");
        assert_eq!(summary.total_businesses, 3);
        assert_eq!(summary.locations_covered, 2);
        assert_eq!(summary.categories_covered, 2);
        assert_eq!(summary.per_category["Food & Dining"], 2);
    }

    #[test]
    fn csv_roundtrip_row_count() {
        let dir = std::env::temp_dir().join("bazar_scout_csv_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bucket.csv");

        let mut b = Business::new(Source::GoogleMaps);
        b.name = Some("Mahakal Sweets".to_string());
        b.categories = vec!["Food & Dining".to_string()];

        save_csv(&[b.clone(), b], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // header + two rows
        assert_eq!(content.lines().count(), 3);
        std::fs::remove_dir_all(&dir).ok();
    }
}
