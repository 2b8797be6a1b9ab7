//! Synthetic placeholder businesses for seeding the Bazar Se catalog before
//! real scrape data lands.

use crate::catalog::{self, Anchor, LOCATIONS};
use crate::models::{Business, Source};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Coordinates are jittered at most this far from the anchor point
pub const COORD_JITTER: f64 = 0.02;

const BUSINESSES_PER_TERM_MIN: usize = 8;
const BUSINESSES_PER_TERM_MAX: usize = 15;
const WEBSITE_PROBABILITY: f64 = 0.25;

const NAME_PREFIXES: &[&str] = &[
    "New", "Modern", "Royal", "Golden", "Silver", "Star", "Super", "Mega", "Prime", "Elite",
    "Grand",
];

const NAME_SUFFIXES: &[&str] = &[
    "Plaza", "Center", "Hub", "Point", "Zone", "World", "Palace", "Store", "Shop", "Mart",
    "Corner", "Junction",
];

// Chains keep their name everywhere; local shops get a location suffix
const MAJOR_BRANDS: &[&str] = &["Big Bazaar", "Reliance", "Apollo", "HDFC", "SBI", "ICICI", "Bata"];

const OPENING_HOURS: &[&str] = &[
    "9:00 AM - 9:00 PM",
    "10:00 AM - 10:00 PM",
    "8:00 AM - 8:00 PM",
    "24 hours",
    "6:00 AM - 11:00 PM",
    "7:00 AM - 10:00 PM",
    "11:00 AM - 11:00 PM",
];

const PIN_CODES: &[&str] = &["456001", "456006", "456010"];

const ADDRESS_MARKERS: &[&str] = &["Near", "Opposite", "Behind", "Next to"];

const PHONE_PREFIXES: &[&str] = &[
    "98", "99", "97", "96", "95", "94", "93", "92", "91", "90", "88", "87", "86", "85",
];

const IMAGE_HOSTS: &[&str] = &[
    "https://lh3.googleusercontent.com/places/",
    "https://lh5.googleusercontent.com/p/",
];

struct NamePool {
    term: &'static str,
    names: &'static [&'static str],
}

const NAME_POOLS: &[NamePool] = &[
    NamePool {
        term: "restaurants",
        names: &[
            "Mahakal Restaurant", "Ujjain Palace", "Royal Dining", "Shree Krishna",
            "Annapurna", "Sagar Restaurant", "Pooja Restaurant", "Ganga Restaurant",
        ],
    },
    NamePool {
        term: "sweet shops",
        names: &[
            "Mahakal Sweets", "Ujjain Mithai", "Krishna Sweets", "Ganga Sweets",
            "Shivam Sweets", "Rajwada Sweets", "Traditional Sweets",
        ],
    },
    NamePool {
        term: "fast food",
        names: &[
            "Quick Bite", "Fast Track", "Speed Food", "Quick Meal", "Burger Point",
            "Pizza Corner",
        ],
    },
    NamePool {
        term: "bakeries",
        names: &[
            "Fresh Bakery", "Golden Bakery", "Royal Bakery", "Modern Bakery", "City Bakery",
            "Bread Palace",
        ],
    },
    NamePool {
        term: "tea stalls",
        names: &["Chai Point", "Tea Time", "Kulhad Chai", "Master Chai", "Chai Adda"],
    },
    NamePool {
        term: "juice centers",
        names: &["Fresh Juice", "Fruit Paradise", "Healthy Juice", "Juice Corner"],
    },
    NamePool {
        term: "kirana stores",
        names: &[
            "Mahakal Kirana", "Ujjain General Store", "Krishna Store", "Shiva Kirana",
            "Ganga Store", "Daily Needs",
        ],
    },
    NamePool {
        term: "supermarkets",
        names: &["Big Bazaar", "Reliance Fresh", "More Supermarket", "Easy Day", "D-Mart"],
    },
    NamePool {
        term: "spice shops",
        names: &["Masala Bhandar", "Spice World", "Garam Masala", "Traditional Spices"],
    },
    NamePool {
        term: "hospitals",
        names: &[
            "Mahakal Hospital", "Ujjain Medical Center", "Krishna Hospital", "City Hospital",
            "Care Hospital",
        ],
    },
    NamePool {
        term: "clinics",
        names: &[
            "Dr. Sharma Clinic", "Health Care Clinic", "Family Clinic", "Wellness Clinic",
        ],
    },
    NamePool {
        term: "medical stores",
        names: &["Apollo Pharmacy", "MedPlus", "Wellness Pharmacy", "Health Plus"],
    },
    NamePool {
        term: "dental clinics",
        names: &["Smile Dental", "Perfect Teeth", "Dental Care", "Oral Health"],
    },
    NamePool {
        term: "clothing stores",
        names: &[
            "Fashion Point", "Style Zone", "Trendy Wear", "Fashion Hub", "Style Studio",
        ],
    },
    NamePool {
        term: "saree shops",
        names: &["Silk Palace", "Saree Mandir", "Ethnic Collection", "Bridal Collection"],
    },
    NamePool {
        term: "footwear",
        names: &["Bata", "Liberty", "Relaxo", "Shoe Palace", "Footwear Zone"],
    },
    NamePool {
        term: "jewelry",
        names: &["Gold Palace", "Silver Shop", "Ornament Shop", "Gold Shop"],
    },
    NamePool {
        term: "mobile shops",
        names: &[
            "Mobile Zone", "Phone Palace", "Tech World", "Mobile Hub", "Digital Store",
        ],
    },
    NamePool {
        term: "electronics stores",
        names: &["Electronics Bazaar", "Tech Mart", "Digital World", "Gadget Store"],
    },
    NamePool {
        term: "computer shops",
        names: &["Computer World", "Tech Solutions", "PC Zone", "IT Store"],
    },
    NamePool {
        term: "beauty parlors",
        names: &["Beauty Palace", "Glamour Zone", "Beauty World", "Makeover Studio"],
    },
    NamePool {
        term: "salons",
        names: &["Hair Studio", "Style Salon", "Glamour Salon", "Unisex Salon"],
    },
    NamePool {
        term: "furniture stores",
        names: &["Furniture Palace", "Home Decor", "Furniture World", "Interior Shop"],
    },
    NamePool {
        term: "hardware stores",
        names: &["Hardware Store", "Tools Shop", "Building Material", "Hardware Mart"],
    },
    NamePool {
        term: "petrol pumps",
        names: &["HP Petrol Pump", "BPCL", "Indian Oil", "Reliance Petrol"],
    },
    NamePool {
        term: "auto repair",
        names: &["Auto Garage", "Vehicle Repair", "Auto Workshop", "Mechanic Shop"],
    },
    NamePool {
        term: "schools",
        names: &["Government School", "Public School", "Convent School", "High School"],
    },
    NamePool {
        term: "coaching centers",
        names: &["Coaching Institute", "Tutorial Center", "Competitive Classes"],
    },
    NamePool {
        term: "banks",
        names: &[
            "State Bank", "HDFC Bank", "ICICI Bank", "Axis Bank", "Bank of Baroda",
        ],
    },
    NamePool {
        term: "real estate",
        names: &["Property Dealer", "Real Estate Agent", "Property Consultant"],
    },
    NamePool {
        term: "hotels",
        names: &["Hotel Mahakal", "Hotel Shipra", "Hotel Grand", "City Lodge"],
    },
];

/// Synthetic dataset builder, seedable for reproducible output
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Generate the full synthetic dataset: every pooled subcategory at every
    /// anchor location gets 8-15 businesses.
    pub fn generate_dataset(&mut self) -> Vec<Business> {
        let mut all = Vec::new();

        for pool in NAME_POOLS {
            for anchor in LOCATIONS {
                let count = self
                    .rng
                    .gen_range(BUSINESSES_PER_TERM_MIN..=BUSINESSES_PER_TERM_MAX);
                let names = self.expand_names(pool.names, count);

                for name in names {
                    all.push(self.generate_business(name, pool.term, anchor));
                }
            }
        }

        info!("Generated {} synthetic businesses", all.len());
        all
    }

    /// One synthetic record anchored near a known location
    pub fn generate_business(&mut self, name: String, term: &str, anchor: &Anchor) -> Business {
        let mut business = Business::new(Source::Generator);

        let display_name = if MAJOR_BRANDS.iter().any(|brand| name.contains(brand)) {
            name
        } else {
            format!("{} - {}", name, anchor.name)
        };

        let (categories, subcategories) =
            catalog::classify(&format!("{} in {}, Ujjain", term, anchor.name), &display_name, &[]);
        business.set_categories(categories, subcategories);

        business.address = Some(format!(
            "{} {}, Ujjain, Madhya Pradesh {}",
            ADDRESS_MARKERS.choose(&mut self.rng).unwrap(),
            anchor.name,
            PIN_CODES.choose(&mut self.rng).unwrap(),
        ));
        business.phone_number = Some(self.phone_number());
        business.area = Some(anchor.name.to_string());
        business.latitude = Some(round6(anchor.lat + self.rng.gen_range(-COORD_JITTER..=COORD_JITTER)));
        business.longitude = Some(round6(anchor.lng + self.rng.gen_range(-COORD_JITTER..=COORD_JITTER)));
        business.rating = Some((self.rng.gen_range(3.2..=4.9f64) * 10.0).round() / 10.0);
        business.reviews_count = Some(self.rng.gen_range(5..=800));
        business.price_level = Some(self.rng.gen_range(1..=4));
        business.opening_hours = OPENING_HOURS.choose(&mut self.rng).map(|h| h.to_string());
        business.image_url = Some(self.image_url());
        business.verified = self.rng.gen_bool(0.5);

        if self.rng.gen_bool(WEBSITE_PROBABILITY) {
            let domain: String = display_name
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .take(15)
                .collect();
            business.domain = Some(format!("{}.com", domain));
            business.website = Some(format!("https://www.{}.com", domain));
        }

        business.name = Some(display_name);
        business
    }

    /// Grow a base name pool to `count` unique names with prefix/suffix
    /// combinations.
    fn expand_names(&mut self, base: &[&str], count: usize) -> Vec<String> {
        let mut names: Vec<String> = base.iter().map(|n| n.to_string()).collect();

        while names.len() < count {
            let root = *base.choose(&mut self.rng).unwrap();
            let candidate = if self.rng.gen_bool(0.5) {
                format!("{} {}", NAME_PREFIXES.choose(&mut self.rng).unwrap(), root)
            } else {
                format!("{} {}", root, NAME_SUFFIXES.choose(&mut self.rng).unwrap())
            };

            if !names.contains(&candidate) {
                names.push(candidate);
            }
        }

        names.truncate(count);
        names
    }

    /// Indian mobile number: +91 plus a valid two-digit prefix and 8 digits
    fn phone_number(&mut self) -> String {
        let prefix = PHONE_PREFIXES.choose(&mut self.rng).unwrap();
        let rest: String = (0..8)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect();
        format!("+91 {}{}", prefix, rest)
    }

    fn image_url(&mut self) -> String {
        const CHARSET: &[u8] =
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
        let host = IMAGE_HOSTS.choose(&mut self.rng).unwrap();
        let hash: String = (0..25)
            .map(|_| char::from(*CHARSET.choose(&mut self.rng).unwrap()))
            .collect();
        format!("{}{}/s1600-w400-h300", host, hash)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_stay_inside_jitter_band() {
        let mut generator = Generator::with_seed(7);
        let anchor = &LOCATIONS[0];

        for _ in 0..50 {
            let b = generator.generate_business("Test Shop".to_string(), "kirana stores", anchor);
            let lat = b.latitude.unwrap();
            let lng = b.longitude.unwrap();
            assert!((lat - anchor.lat).abs() <= COORD_JITTER + 1e-9);
            assert!((lng - anchor.lng).abs() <= COORD_JITTER + 1e-9);
        }
    }

    #[test]
    fn phone_numbers_look_indian() {
        let mut generator = Generator::with_seed(11);
        for _ in 0..20 {
            let phone = generator.phone_number();
            assert!(phone.starts_with("+91 "));
            let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
            // country code + 10 digit mobile number
            assert_eq!(digits.len(), 12);
        }
    }

    #[test]
    fn expanded_names_are_unique_and_sized() {
        let mut generator = Generator::with_seed(3);
        let names = generator.expand_names(&["Chai Point", "Tea Time"], 12);
        assert_eq!(names.len(), 12);
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 12);
    }

    #[test]
    fn generated_records_carry_required_fields() {
        let mut generator = Generator::with_seed(42);
        let anchor = &LOCATIONS[3];
        let b = generator.generate_business("Fresh Bakery".to_string(), "bakeries", anchor);

        assert!(b.name.is_some());
        assert!(!b.categories.is_empty());
        assert_eq!(b.primary_subcategory.as_deref(), Some("Bakeries"));
        assert_eq!(b.area.as_deref(), Some(anchor.name));
        let rating = b.rating.unwrap();
        assert!((3.2..=4.9).contains(&rating));
        let reviews = b.reviews_count.unwrap();
        assert!((5..=800).contains(&reviews));
        assert_eq!(b.source, Source::Generator);
    }

    #[test]
    fn brand_names_skip_location_suffix() {
        let mut generator = Generator::with_seed(5);
        let anchor = &LOCATIONS[2];
        let b = generator.generate_business("Big Bazaar".to_string(), "supermarkets", anchor);
        assert_eq!(b.name.as_deref(), Some("Big Bazaar"));

        let b = generator.generate_business("Daily Needs".to_string(), "kirana stores", anchor);
        assert_eq!(b.name.as_deref(), Some("Daily Needs - Tower Chowk"));
    }
}
