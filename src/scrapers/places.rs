use crate::catalog::{self, UJJAIN_CENTER};
use crate::models::{Business, BusinessList, Source};
use crate::scrapers::traits::BusinessScraper;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const PHOTO_URL: &str = "https://maps.googleapis.com/maps/api/place/photo";
const SEARCH_RADIUS_METERS: u32 = 10_000;
// The API rejects a next_page_token that is requested too soon
const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);
const MAX_PAGES: usize = 3;

/// Scraper backed by the official Places Text Search API
pub struct PlacesApiScraper {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    next_page_token: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: Option<String>,
    formatted_address: Option<String>,
    place_id: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<i64>,
    price_level: Option<i64>,
    #[serde(default)]
    types: Vec<String>,
    business_status: Option<String>,
    geometry: Option<Geometry>,
    #[serde(default)]
    photos: Vec<PhotoRef>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct PhotoRef {
    photo_reference: String,
}

impl PlacesApiScraper {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, api_key })
    }

    async fn fetch_page(&self, query: &str, page_token: Option<&str>) -> Result<TextSearchResponse> {
        let (lat, lng) = UJJAIN_CENTER;
        let location = format!("{},{}", lat, lng);
        let radius = SEARCH_RADIUS_METERS.to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("query", query),
            ("key", &self.api_key),
            ("location", &location),
            ("radius", &radius),
            ("language", "en"),
        ];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        let response = self
            .client
            .get(TEXT_SEARCH_URL)
            .query(&params)
            .send()
            .await
            .context("Places API request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Places API returned HTTP {}", response.status());
        }

        response
            .json::<TextSearchResponse>()
            .await
            .context("Failed to decode Places API response")
    }

    fn photo_url(&self, reference: &str) -> String {
        format!(
            "{}?photoreference={}&maxwidth=400&maxheight=300&key={}",
            PHOTO_URL, reference, self.api_key
        )
    }

    fn into_business(&self, place: PlaceResult, query: &str) -> Business {
        let mut business = Business::new(Source::PlacesApi);

        let name = place.name.clone().unwrap_or_default();
        let (categories, subcategories) = catalog::classify(query, &name, &place.types);
        business.set_categories(categories, subcategories);

        business.name = place.name;
        business.address = place.formatted_address;
        business.google_place_id = place.place_id;
        business.rating = place.rating;
        business.reviews_count = place.user_ratings_total;
        business.price_level = place.price_level;
        business.business_status = place.business_status;
        business.google_types = place.types;
        business.area = catalog::area_from_query(query);

        if let Some(location) = place.geometry.and_then(|g| g.location) {
            business.latitude = Some(location.lat);
            business.longitude = Some(location.lng);
        }

        let photos: Vec<String> = place
            .photos
            .iter()
            .take(5)
            .map(|p| self.photo_url(&p.photo_reference))
            .collect();
        business.image_url = photos.first().cloned();
        business.photos = photos;

        business
    }
}

#[async_trait]
impl BusinessScraper for PlacesApiScraper {
    async fn scrape(&self, query: &str, limit: usize) -> Result<Vec<Business>> {
        info!("Searching Places API for '{}'", query);

        let mut list = BusinessList::new();
        let mut page_token: Option<String> = None;

        for page in 0..MAX_PAGES {
            if page > 0 {
                tokio::time::sleep(PAGE_TOKEN_DELAY).await;
            }

            let response = self.fetch_page(query, page_token.as_deref()).await?;

            match response.status.as_str() {
                "OK" => {}
                "ZERO_RESULTS" => {
                    debug!("No results for '{}'", query);
                    break;
                }
                status => {
                    warn!(
                        "Places API status {} for '{}': {}",
                        status,
                        query,
                        response.error_message.unwrap_or_default()
                    );
                    break;
                }
            }

            for place in response.results {
                if list.len() >= limit {
                    break;
                }
                list.add(self.into_business(place, query));
            }

            page_token = response.next_page_token;
            if page_token.is_none() || list.len() >= limit {
                break;
            }
        }

        info!("Places API returned {} businesses for '{}'", list.len(), query);
        Ok(list.into_vec())
    }

    fn source_name(&self) -> &'static str {
        "Places API"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_response() -> TextSearchResponse {
        serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [
                    {
                        "name": "Apollo Pharmacy Freeganj",
                        "formatted_address": "Freeganj Main Road, Ujjain, Madhya Pradesh 456001",
                        "place_id": "ChIJabc123",
                        "rating": 4.3,
                        "user_ratings_total": 321,
                        "price_level": 2,
                        "types": ["pharmacy", "health", "point_of_interest"],
                        "business_status": "OPERATIONAL",
                        "geometry": {"location": {"lat": 23.1771, "lng": 75.789}},
                        "photos": [{"photo_reference": "ref-1"}, {"photo_reference": "ref-2"}]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn decodes_text_search_response() {
        let response = fixture_response();
        assert_eq!(response.status, "OK");
        assert_eq!(response.results.len(), 1);
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn maps_place_into_business() {
        let scraper = PlacesApiScraper::new("test-key".to_string()).unwrap();
        let response = fixture_response();
        let place = response.results.into_iter().next().unwrap();

        let business = scraper.into_business(place, "pharmacies in Freeganj, Ujjain");

        assert_eq!(business.name.as_deref(), Some("Apollo Pharmacy Freeganj"));
        assert_eq!(business.google_place_id.as_deref(), Some("ChIJabc123"));
        assert_eq!(business.rating, Some(4.3));
        assert_eq!(business.reviews_count, Some(321));
        assert_eq!(business.latitude, Some(23.1771));
        assert_eq!(business.area.as_deref(), Some("Freeganj"));
        assert_eq!(business.primary_category.as_deref(), Some("Health & Medical"));
        assert_eq!(business.primary_subcategory.as_deref(), Some("Pharmacies"));
        assert_eq!(business.photos.len(), 2);
        assert!(business.image_url.unwrap().contains("ref-1"));
        assert_eq!(business.source, Source::PlacesApi);
    }
}
