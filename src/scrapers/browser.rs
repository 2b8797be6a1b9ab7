use crate::catalog;
use crate::models::{Business, BusinessList, Source};
use crate::scrapers::traits::BusinessScraper;
use anyhow::{Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use scraper::{Html, Selector};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Google Maps scraper using headless Chrome
pub struct MapsBrowserScraper {
    browser: Browser,
}

impl MapsBrowserScraper {
    /// Launch a Chrome instance for scraping
    pub fn new(headless: bool) -> Result<Self> {
        info!("Launching Chrome (headless: {})...", headless);

        let options = LaunchOptions::default_builder()
            .headless(headless)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        Ok(Self { browser })
    }

    /// Scrape one search query from the Google Maps result feed.
    ///
    /// Scrolls the feed until the listing count stabilizes or `limit` is
    /// reached, then parses the captured page HTML.
    pub fn scrape_query(&self, query: &str, limit: usize) -> Result<Vec<Business>> {
        let url = format!(
            "https://www.google.com/maps/search/{}",
            query.replace(' ', "+")
        );

        info!("Opening search page for '{}'", query);
        let tab = self.browser.new_tab()?;

        tab.navigate_to(&url)?;
        tab.wait_until_navigated()?;
        thread::sleep(Duration::from_secs(5));

        // Consent dialog shows up on fresh profiles
        let _ = tab.evaluate(
            r#"
            const button = document.querySelector('button[aria-label*="Accept"], form[action*="consent"] button');
            if (button) button.click();
            "#,
            false,
        );
        thread::sleep(Duration::from_secs(2));

        // Scroll the feed until no new listings load or we hit the cap
        let mut previous_count = 0;
        loop {
            let _ = tab.evaluate(
                r#"
                const feed = document.querySelector('div[role="feed"]');
                if (feed) feed.scrollBy(0, 10000);
                "#,
                false,
            );
            thread::sleep(Duration::from_secs(2));

            let count_result = tab.evaluate(
                r#"document.querySelectorAll('a[href*="/maps/place"]').length"#,
                false,
            )?;
            let current_count = count_result
                .value
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as usize;

            debug!("Feed now shows {} listings", current_count);

            if current_count >= limit || current_count == previous_count {
                break;
            }
            previous_count = current_count;
        }

        let html_result = tab.evaluate("document.documentElement.outerHTML", false)?;
        let html_str = match html_result.value {
            Some(value) => value.as_str().unwrap_or("").to_string(),
            None => {
                warn!("Could not get HTML from page");
                String::new()
            }
        };

        if html_str.is_empty() {
            warn!("HTML is empty for '{}'", query);
            return Ok(Vec::new());
        }

        // The map URL carries the viewport center as /@lat,lng once the
        // search resolves; use it as the fallback coordinate for every card.
        let page_coords = coordinates_from_url(&tab.get_url());

        let businesses = parse_feed_cards(&html_str, query, limit, page_coords);
        info!(
            "Scraped {} businesses for '{}' from listing feed",
            businesses.len(),
            query
        );

        let _ = tab.close(true);

        Ok(businesses)
    }
}

#[async_trait]
impl BusinessScraper for MapsBrowserScraper {
    async fn scrape(&self, query: &str, limit: usize) -> Result<Vec<Business>> {
        self.scrape_query(query, limit)
    }

    fn source_name(&self) -> &'static str {
        "Google Maps"
    }
}

/// Parse listing cards out of the result feed HTML
pub fn parse_feed_cards(
    html: &str,
    query: &str,
    limit: usize,
    page_coords: Option<(f64, f64)>,
) -> Vec<Business> {
    let document = Html::parse_document(html);
    let card_selector = Selector::parse(r#"div[role="feed"] > div"#).unwrap();
    let link_selector = Selector::parse(r#"a[href*="/maps/place"]"#).unwrap();
    let rating_selector = Selector::parse(r#"span[role="img"]"#).unwrap();
    let img_selector = Selector::parse("img").unwrap();

    let area = catalog::area_from_query(query);

    let mut list = BusinessList::new();

    for card in document.select(&card_selector) {
        if list.len() >= limit {
            break;
        }

        let Some(link) = card.select(&link_selector).next() else {
            continue;
        };

        let name = link
            .value()
            .attr("aria-label")
            .map(|label| label.replace("&nbsp;", " ").trim().to_string())
            .filter(|label| !label.is_empty());
        let Some(name) = name else {
            debug!("Skipping card without an aria-label");
            continue;
        };

        let href = link.value().attr("href").unwrap_or("");

        let mut business = Business::new(Source::GoogleMaps);

        let card_text: String = card.text().collect::<Vec<_>>().join(" · ");

        if let Some(rating_el) = card.select(&rating_selector).next() {
            if let Some(label) = rating_el.value().attr("aria-label") {
                if let Some((rating, reviews)) = parse_rating_label(label) {
                    business.rating = Some(rating);
                    business.reviews_count = reviews;
                }
            }
        }

        business.phone_number = extract_phone(&card_text);
        business.address = extract_address(&card_text);

        if let Some(img) = card.select(&img_selector).next() {
            business.image_url = img
                .value()
                .attr("src")
                .filter(|src| src.starts_with("http"))
                .map(|src| src.to_string());
        }

        business.google_place_id = place_id_from_href(href);

        let (lat, lng) = coordinates_from_url(href)
            .or(page_coords)
            .map(|(a, b)| (Some(a), Some(b)))
            .unwrap_or((None, None));
        business.latitude = lat;
        business.longitude = lng;

        let (categories, subcategories) = catalog::classify(query, &name, &[]);
        business.set_categories(categories, subcategories);
        business.area = area.clone();
        business.name = Some(name);

        if !list.add(business) {
            debug!("Duplicate listing suppressed");
        }
    }

    list.into_vec()
}

/// Extract coordinates from the /@lat,lng,zoom segment of a maps URL
pub fn coordinates_from_url(url: &str) -> Option<(f64, f64)> {
    let after = url.split("/@").nth(1)?;
    let coords = after.split('/').next()?;
    let mut parts = coords.split(',');
    let lat: f64 = parts.next()?.trim().parse().ok()?;
    let lng: f64 = parts.next()?.trim().parse().ok()?;
    Some((lat, lng))
}

/// Parse "4.5 stars 1,234 Reviews" style aria-labels
pub fn parse_rating_label(label: &str) -> Option<(f64, Option<i64>)> {
    let mut tokens = label.split_whitespace();
    let rating: f64 = tokens.next()?.replace(',', ".").parse().ok()?;
    if !(0.0..=5.0).contains(&rating) {
        return None;
    }

    let mut reviews = None;
    let tokens: Vec<&str> = label.split_whitespace().collect();
    for window in tokens.windows(2) {
        if window[1].eq_ignore_ascii_case("reviews") {
            reviews = window[0].replace(',', "").parse::<i64>().ok();
        }
    }

    Some((rating, reviews))
}

/// Find the first run of at least ten digits (allowing +, - and spaces)
pub fn extract_phone(text: &str) -> Option<String> {
    let mut current = String::new();
    let mut digits = 0;

    for c in text.chars() {
        let keeps_run = c.is_ascii_digit() || c == '+' || c == '-' || (c == ' ' && digits > 0);
        if keeps_run {
            if c.is_ascii_digit() {
                digits += 1;
            }
            current.push(c);
        } else {
            if digits >= 10 {
                return Some(current.trim().to_string());
            }
            current.clear();
            digits = 0;
        }
    }

    if digits >= 10 {
        Some(current.trim().to_string())
    } else {
        None
    }
}

/// Heuristic address pickup: the feed card text joins fragments with "·";
/// the address fragment mentions a road/market name and no rating digits.
fn extract_address(card_text: &str) -> Option<String> {
    card_text
        .split('·')
        .map(|fragment| fragment.trim())
        .find(|fragment| {
            fragment.len() > 8
                && !fragment.contains("stars")
                && !fragment.to_lowercase().contains("open")
                && !fragment.to_lowercase().contains("closed")
                && fragment.chars().filter(|c| c.is_alphabetic()).count() > 5
                && (fragment.contains("Road")
                    || fragment.contains("Marg")
                    || fragment.contains("Chowk")
                    || fragment.contains("Gate")
                    || fragment.contains("Nagar")
                    || fragment.contains("Ujjain"))
        })
        .map(|fragment| fragment.to_string())
}

/// The hex feature id embedded in a place href doubles as a stable place key
fn place_id_from_href(href: &str) -> Option<String> {
    href.split(['/', '!', ':'])
        .find(|part| part.starts_with("0x") && part.len() > 10)
        .map(|part| part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_from_search_url() {
        let url = "https://www.google.com/maps/search/restaurants+in+Ujjain/@23.1765,75.7885,14z";
        assert_eq!(coordinates_from_url(url), Some((23.1765, 75.7885)));
    }

    #[test]
    fn coordinates_missing_segment() {
        assert_eq!(coordinates_from_url("https://www.google.com/maps"), None);
        assert_eq!(coordinates_from_url("https://maps.google.com/@notanumber/x"), None);
    }

    #[test]
    fn rating_label_with_reviews() {
        assert_eq!(
            parse_rating_label("4.5 stars 1,234 Reviews"),
            Some((4.5, Some(1234)))
        );
        assert_eq!(parse_rating_label("3.8 stars"), Some((3.8, None)));
        assert_eq!(parse_rating_label("Open now"), None);
    }

    #[test]
    fn phone_extraction() {
        assert_eq!(
            extract_phone("Mahakal Sweets · 098765 43210 · Freeganj"),
            Some("098765 43210".to_string())
        );
        assert_eq!(
            extract_phone("call +91 98765-43210 today"),
            Some("+91 98765-43210".to_string())
        );
        assert_eq!(extract_phone("no number here, 456001"), None);
    }

    #[test]
    fn feed_cards_are_deduplicated() {
        let card = r#"
            <div>
              <a href="https://www.google.com/maps/place/Mahakal+Sweets/@23.18,75.77,17z/data=!0x3963743aabbccdd1:0x1"
                 aria-label="Mahakal Sweets"></a>
              <span role="img" aria-label="4.6 stars 210 Reviews"></span>
              <span>Ramghat Road, Ujjain</span>
            </div>"#;
        let html = format!(r#"<html><body><div role="feed">{card}{card}</div></body></html>"#);

        let businesses = parse_feed_cards(&html, "sweet shops in Ujjain", 10, None);
        assert_eq!(businesses.len(), 1);

        let b = &businesses[0];
        assert_eq!(b.name.as_deref(), Some("Mahakal Sweets"));
        assert_eq!(b.rating, Some(4.6));
        assert_eq!(b.reviews_count, Some(210));
        assert_eq!(b.latitude, Some(23.18));
        assert!(!b.categories.is_empty());
        assert_eq!(b.primary_subcategory.as_deref(), Some("Sweet Shops"));
    }
}
