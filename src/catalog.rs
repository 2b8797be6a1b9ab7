//! Static catalog data for Ujjain: anchor locations, category groups and the
//! keyword table driving query generation and business classification.

/// A named anchor point in Ujjain with its base coordinates
#[derive(Debug, Clone, Copy)]
pub struct Anchor {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// City center, used as the bias point for the Places API search
pub const UJJAIN_CENTER: (f64, f64) = (23.1765, 75.7885);

/// The 20 anchor locations covering the city
pub const LOCATIONS: &[Anchor] = &[
    Anchor { name: "Freeganj", lat: 23.1765, lng: 75.7885 },
    Anchor { name: "Mahakaleshwar Temple", lat: 23.1828, lng: 75.7681 },
    Anchor { name: "Tower Chowk", lat: 23.1793, lng: 75.7849 },
    Anchor { name: "Dewas Gate", lat: 23.1756, lng: 75.7923 },
    Anchor { name: "University Road", lat: 23.1689, lng: 75.7834 },
    Anchor { name: "Agar Road", lat: 23.1634, lng: 75.8012 },
    Anchor { name: "Indore Road", lat: 23.1567, lng: 75.8123 },
    Anchor { name: "Railway Station Road", lat: 23.1634, lng: 75.7712 },
    Anchor { name: "Nanakheda", lat: 23.1923, lng: 75.7456 },
    Anchor { name: "Chimanganj Mandi", lat: 23.1567, lng: 75.7923 },
    Anchor { name: "Jiwaji University", lat: 23.1689, lng: 75.7834 },
    Anchor { name: "Kshipra Pul", lat: 23.1845, lng: 75.7634 },
    Anchor { name: "Ramghat Road", lat: 23.1845, lng: 75.7634 },
    Anchor { name: "Vikram University", lat: 23.1712, lng: 75.7856 },
    Anchor { name: "Madhav Nagar", lat: 23.1678, lng: 75.7923 },
    Anchor { name: "Kalbhairav Temple", lat: 23.1834, lng: 75.7712 },
    Anchor { name: "Sandipani Ashram", lat: 23.1756, lng: 75.7634 },
    Anchor { name: "Triveni Museum", lat: 23.1789, lng: 75.7823 },
    Anchor { name: "Bharti Nagar", lat: 23.1623, lng: 75.7945 },
    Anchor { name: "Jaisinghpura", lat: 23.1534, lng: 75.8034 },
];

/// A top-level category with its searchable subcategory terms
#[derive(Debug, Clone, Copy)]
pub struct CategoryGroup {
    pub name: &'static str,
    pub icon: &'static str,
    pub terms: &'static [&'static str],
}

pub const CATEGORY_GROUPS: &[CategoryGroup] = &[
    CategoryGroup {
        name: "Food & Dining",
        icon: "🍽️",
        terms: &[
            "restaurants", "fast food", "street food", "sweet shops", "bakeries",
            "ice cream parlors", "juice centers", "tea stalls", "coffee shops", "dhaba",
            "pure veg restaurants", "chinese food", "south indian food", "punjabi food",
            "pizza", "burger joints", "chat centers", "lassi shops",
        ],
    },
    CategoryGroup {
        name: "Grocery & Daily",
        icon: "🛒",
        terms: &[
            "kirana stores", "supermarkets", "grocery stores", "general stores",
            "provision stores", "departmental stores", "wholesale grocery",
            "organic stores", "spice shops", "dry fruits", "flour mills",
            "oil stores", "dairy products", "frozen foods", "packaged foods",
        ],
    },
    CategoryGroup {
        name: "Health & Medical",
        icon: "🏥",
        terms: &[
            "hospitals", "clinics", "medical stores", "pharmacies", "dental clinics",
            "eye clinics", "skin clinics", "pediatric clinics", "gynecology clinics",
            "orthopedic clinics", "diagnostic centers", "pathology labs",
            "x-ray centers", "physiotherapy centers", "ayurvedic centers",
            "homeopathic clinics", "veterinary clinics",
        ],
    },
    CategoryGroup {
        name: "Fashion & Retail",
        icon: "👗",
        terms: &[
            "clothing stores", "saree shops", "suit shops", "kids wear", "ladies wear",
            "mens wear", "ethnic wear", "western wear", "footwear", "shoe stores",
            "bags", "handbags", "luggage", "jewelry", "artificial jewelry",
            "gold jewelry", "silver jewelry", "watches", "sunglasses",
        ],
    },
    CategoryGroup {
        name: "Electronics & Tech",
        icon: "📱",
        terms: &[
            "mobile shops", "electronics stores", "computer shops", "laptop stores",
            "mobile accessories", "mobile repair", "computer repair", "tv repair",
            "ac repair", "camera shops", "home appliances", "kitchen appliances",
        ],
    },
    CategoryGroup {
        name: "Beauty & Care",
        icon: "💄",
        terms: &[
            "beauty parlors", "salons", "hair cutting", "facial centers",
            "massage centers", "spa", "bridal makeup", "cosmetics", "perfumes",
        ],
    },
    CategoryGroup {
        name: "Home & Living",
        icon: "🏠",
        terms: &[
            "furniture stores", "home decor", "curtains", "carpets", "mattresses",
            "interior design", "paint shops", "hardware stores", "plumbing",
            "electrical supplies", "tiles", "marble",
        ],
    },
    CategoryGroup {
        name: "Automotive & Transport",
        icon: "🚗",
        terms: &[
            "petrol pumps", "auto repair", "car service", "bike service", "tire shops",
            "auto parts", "car accessories", "car wash", "driving schools",
            "taxi services", "transport services", "courier services",
        ],
    },
    CategoryGroup {
        name: "Education & Training",
        icon: "🎓",
        terms: &[
            "schools", "colleges", "coaching centers", "tuition centers",
            "computer training", "music classes", "dance classes", "libraries",
            "book stores", "stationery",
        ],
    },
    CategoryGroup {
        name: "Business & Professional",
        icon: "💼",
        terms: &[
            "banks", "atms", "insurance", "ca offices", "lawyers", "consultants",
            "real estate", "property dealers", "architects", "printing press",
            "internet cafes",
        ],
    },
    CategoryGroup {
        name: "Travel & Stay",
        icon: "🏨",
        terms: &[
            "hotels", "guest houses", "lodges", "resorts", "dharamshalas",
            "travel agencies", "tour operators", "car rental", "bike rental",
        ],
    },
    CategoryGroup {
        name: "Entertainment & Events",
        icon: "🎪",
        terms: &[
            "cinemas", "event management", "wedding planners", "decorators",
            "caterers", "dj services", "photography", "videography",
            "party halls", "banquet halls", "gaming zones",
        ],
    },
];

/// Keyword table for classification: first match in table order wins the
/// primary slot. Substring match against the search query, then the business
/// name, then the Google types.
const KEYWORD_TABLE: &[(&str, &str, &str)] = &[
    // Food & Dining
    ("restaurant", "Food & Dining", "Restaurants"),
    ("fast food", "Food & Dining", "Fast Food"),
    ("sweet", "Food & Dining", "Sweet Shops"),
    ("bakery", "Food & Dining", "Bakeries"),
    ("bakeries", "Food & Dining", "Bakeries"),
    ("ice cream", "Food & Dining", "Ice Cream Parlors"),
    ("juice", "Food & Dining", "Juice Centers"),
    ("tea", "Food & Dining", "Tea Stalls"),
    ("coffee", "Food & Dining", "Coffee Shops"),
    ("dhaba", "Food & Dining", "Dhaba"),
    ("pizza", "Food & Dining", "Pizza"),
    ("burger", "Food & Dining", "Burger Joints"),
    ("chat center", "Food & Dining", "Chat Centers"),
    ("lassi", "Food & Dining", "Lassi Shops"),
    // Grocery & Daily
    ("kirana", "Grocery & Daily", "Kirana Stores"),
    ("grocery", "Grocery & Daily", "Grocery Stores"),
    ("supermarket", "Grocery & Daily", "Supermarkets"),
    ("general store", "Grocery & Daily", "General Stores"),
    ("provision", "Grocery & Daily", "Provision Stores"),
    ("spice", "Grocery & Daily", "Spice Shops"),
    ("flour mill", "Grocery & Daily", "Flour Mills"),
    ("dairy", "Grocery & Daily", "Dairy Products"),
    // Health & Medical
    ("hospital", "Health & Medical", "Hospitals"),
    ("dental", "Health & Medical", "Dental Clinics"),
    ("eye clinic", "Health & Medical", "Eye Clinics"),
    ("skin clinic", "Health & Medical", "Skin Clinics"),
    ("clinic", "Health & Medical", "Clinics"),
    ("medical", "Health & Medical", "Medical Stores"),
    ("pharmacy", "Health & Medical", "Pharmacies"),
    ("pharmacies", "Health & Medical", "Pharmacies"),
    ("diagnostic", "Health & Medical", "Diagnostic Centers"),
    ("pathology", "Health & Medical", "Pathology Labs"),
    ("physiotherapy", "Health & Medical", "Physiotherapy Centers"),
    ("ayurvedic", "Health & Medical", "Ayurvedic Centers"),
    ("veterinary", "Health & Medical", "Veterinary Clinics"),
    // Fashion & Retail
    ("clothing", "Fashion & Retail", "Clothing Stores"),
    ("saree", "Fashion & Retail", "Saree Shops"),
    ("suit", "Fashion & Retail", "Suit Shops"),
    ("footwear", "Fashion & Retail", "Footwear"),
    ("shoe", "Fashion & Retail", "Shoe Stores"),
    ("handbag", "Fashion & Retail", "Handbags"),
    ("bag", "Fashion & Retail", "Bags"),
    ("jewelry", "Fashion & Retail", "Jewelry"),
    ("jewellery", "Fashion & Retail", "Jewelry"),
    ("watch", "Fashion & Retail", "Watches"),
    ("sunglasses", "Fashion & Retail", "Sunglasses"),
    // Electronics & Tech
    ("mobile", "Electronics & Tech", "Mobile Shops"),
    ("electronics", "Electronics & Tech", "Electronics Stores"),
    ("computer", "Electronics & Tech", "Computer Shops"),
    ("laptop", "Electronics & Tech", "Laptop Stores"),
    ("camera", "Electronics & Tech", "Camera Shops"),
    ("repair", "Electronics & Tech", "Repair Services"),
    ("appliance", "Electronics & Tech", "Home Appliances"),
    // Beauty & Care
    ("beauty", "Beauty & Care", "Beauty Parlors"),
    ("salon", "Beauty & Care", "Salons"),
    ("parlor", "Beauty & Care", "Beauty Parlors"),
    ("parlour", "Beauty & Care", "Beauty Parlors"),
    ("spa", "Beauty & Care", "Spa"),
    ("massage", "Beauty & Care", "Massage Centers"),
    ("cosmetic", "Beauty & Care", "Cosmetics"),
    // Home & Living
    ("furniture", "Home & Living", "Furniture Stores"),
    ("hardware", "Home & Living", "Hardware Stores"),
    ("paint", "Home & Living", "Paint Shops"),
    ("tile", "Home & Living", "Tiles"),
    ("marble", "Home & Living", "Marble"),
    ("curtain", "Home & Living", "Curtains"),
    // Automotive & Transport
    ("petrol", "Automotive & Transport", "Petrol Pumps"),
    ("auto", "Automotive & Transport", "Auto Repair"),
    ("car", "Automotive & Transport", "Car Service"),
    ("bike", "Automotive & Transport", "Bike Service"),
    ("tire", "Automotive & Transport", "Tire Shops"),
    ("taxi", "Automotive & Transport", "Taxi Services"),
    ("transport", "Automotive & Transport", "Transport Services"),
    ("courier", "Automotive & Transport", "Courier Services"),
    // Education & Training
    ("school", "Education & Training", "Schools"),
    ("college", "Education & Training", "Colleges"),
    ("coaching", "Education & Training", "Coaching Centers"),
    ("tuition", "Education & Training", "Tuition Centers"),
    ("library", "Education & Training", "Libraries"),
    ("book", "Education & Training", "Book Stores"),
    ("stationery", "Education & Training", "Stationery"),
    // Business & Professional
    ("bank", "Business & Professional", "Banks"),
    ("atm", "Business & Professional", "ATMs"),
    ("insurance", "Business & Professional", "Insurance"),
    ("lawyer", "Business & Professional", "Lawyers"),
    ("real estate", "Business & Professional", "Real Estate"),
    ("property", "Business & Professional", "Property Dealers"),
    ("printing", "Business & Professional", "Printing Press"),
    // Travel & Stay
    ("hotel", "Travel & Stay", "Hotels"),
    ("guest house", "Travel & Stay", "Guest Houses"),
    ("lodge", "Travel & Stay", "Lodges"),
    ("resort", "Travel & Stay", "Resorts"),
    ("dharamshala", "Travel & Stay", "Dharamshalas"),
    ("travel", "Travel & Stay", "Travel Agencies"),
    ("tour", "Travel & Stay", "Tour Operators"),
    // Entertainment & Events
    ("cinema", "Entertainment & Events", "Cinemas"),
    ("wedding", "Entertainment & Events", "Wedding Planners"),
    ("caterer", "Entertainment & Events", "Caterers"),
    ("photography", "Entertainment & Events", "Photography"),
    ("banquet", "Entertainment & Events", "Banquet Halls"),
];

pub const DEFAULT_CATEGORY: &str = "Business & Professional";
pub const DEFAULT_SUBCATEGORY: &str = "General Business";

/// Build the full Ujjain query list: every subcategory term crossed with
/// every anchor location, followed by the city-wide queries. Order is fixed,
/// so worker chunking is reproducible.
pub fn build_queries() -> Vec<String> {
    let mut queries = Vec::new();
    for anchor in LOCATIONS {
        for group in CATEGORY_GROUPS {
            for term in group.terms {
                queries.push(format!("{} in {}, Ujjain", term, anchor.name));
            }
        }
    }
    for group in CATEGORY_GROUPS {
        for term in group.terms {
            queries.push(format!("{} in Ujjain", term));
        }
    }
    queries
}

/// Classify a business from its search query, name and Google types.
///
/// Linear keyword scan, table order wins, no scoring. Always returns at
/// least one category (the Business & Professional fallback).
pub fn classify(query: &str, name: &str, google_types: &[String]) -> (Vec<String>, Vec<String>) {
    let query = query.to_lowercase();
    let name = name.to_lowercase();

    let mut categories: Vec<String> = Vec::new();
    let mut subcategories: Vec<String> = Vec::new();

    for (keyword, category, subcategory) in KEYWORD_TABLE {
        if query.contains(keyword) || name.contains(keyword) {
            if !categories.iter().any(|c| c == category) {
                categories.push((*category).to_string());
            }
            if !subcategories.iter().any(|s| s == subcategory) {
                subcategories.push((*subcategory).to_string());
            }
        }
    }

    if categories.is_empty() {
        for gtype in google_types {
            let gtype = gtype.replace('_', " ").to_lowercase();
            for (keyword, category, subcategory) in KEYWORD_TABLE {
                if gtype.contains(keyword) {
                    if !categories.iter().any(|c| c == category) {
                        categories.push((*category).to_string());
                    }
                    if !subcategories.iter().any(|s| s == subcategory) {
                        subcategories.push((*subcategory).to_string());
                    }
                }
            }
        }
    }

    if categories.is_empty() {
        categories.push(DEFAULT_CATEGORY.to_string());
        subcategories.push(DEFAULT_SUBCATEGORY.to_string());
    }

    (categories, subcategories)
}

/// Pull the area out of a "term in <area>, Ujjain" query
pub fn area_from_query(query: &str) -> Option<String> {
    let (_, tail) = query.split_once(" in ")?;
    let area = tail.trim_end_matches(", Ujjain").trim();
    if area.is_empty() || area == "Ujjain" {
        None
    } else {
        Some(area.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_list_covers_all_terms_and_locations() {
        let queries = build_queries();
        let term_count: usize = CATEGORY_GROUPS.iter().map(|g| g.terms.len()).sum();
        assert_eq!(queries.len(), term_count * (LOCATIONS.len() + 1));
        assert_eq!(queries[0], "restaurants in Freeganj, Ujjain");
        assert!(queries.last().unwrap().ends_with("in Ujjain"));
    }

    #[test]
    fn classification_is_deterministic() {
        let a = classify("sweet shops in Freeganj, Ujjain", "Mahakal Sweets", &[]);
        let b = classify("sweet shops in Freeganj, Ujjain", "Mahakal Sweets", &[]);
        assert_eq!(a, b);
        assert_eq!(a.0[0], "Food & Dining");
        assert_eq!(a.1[0], "Sweet Shops");
    }

    #[test]
    fn first_table_match_wins_primary_slot() {
        // "restaurant" precedes "sweet" in the table
        let (categories, subcategories) =
            classify("restaurants in Ujjain", "Mahakal Sweets & Restaurant", &[]);
        assert_eq!(subcategories[0], "Restaurants");
        assert!(subcategories.contains(&"Sweet Shops".to_string()));
        assert_eq!(categories[0], "Food & Dining");
    }

    #[test]
    fn falls_back_to_google_types() {
        let types = vec!["book_store".to_string(), "point_of_interest".to_string()];
        let (categories, subcategories) = classify("best places", "Sharma and Sons", &types);
        assert_eq!(categories, vec!["Education & Training".to_string()]);
        assert_eq!(subcategories, vec!["Book Stores".to_string()]);
    }

    #[test]
    fn unmatched_input_gets_default_bucket() {
        let (categories, subcategories) = classify("xyzzy in Ujjain", "Quux", &[]);
        assert_eq!(categories, vec![DEFAULT_CATEGORY.to_string()]);
        assert_eq!(subcategories, vec![DEFAULT_SUBCATEGORY.to_string()]);
    }

    #[test]
    fn area_extraction() {
        assert_eq!(
            area_from_query("bakeries in Tower Chowk, Ujjain").as_deref(),
            Some("Tower Chowk")
        );
        assert_eq!(area_from_query("bakeries in Ujjain"), None);
        assert_eq!(area_from_query("bakeries"), None);
    }
}
