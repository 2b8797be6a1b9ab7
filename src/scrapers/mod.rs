pub mod browser;
pub mod places;
pub mod traits;

pub use browser::MapsBrowserScraper;
pub use places::PlacesApiScraper;
pub use traits::BusinessScraper;
