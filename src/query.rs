//! Query parameters for each DuckDuckGo endpoint.

use serde::{Deserialize, Serialize};

/// Safe search level, sent as the `p` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SafeSearch {
    /// Filter explicit results.
    Strict,
    /// Moderate filtering.
    #[default]
    Moderate,
    /// No filtering.
    Off,
}

impl SafeSearch {
    /// Numeric value DuckDuckGo expects for this level.
    pub fn kp(self) -> i8 {
        match self {
            SafeSearch::Strict => 1,
            SafeSearch::Moderate => -1,
            SafeSearch::Off => -2,
        }
    }
}

/// Recency filter for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLimit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeLimit {
    /// Value of the `df` parameter used by text and news search.
    pub fn as_param(self) -> &'static str {
        match self {
            TimeLimit::Day => "d",
            TimeLimit::Week => "w",
            TimeLimit::Month => "m",
            TimeLimit::Year => "y",
        }
    }

    /// Value used inside the image search `f` filter list.
    pub fn as_image_filter(self) -> &'static str {
        match self {
            TimeLimit::Day => "Day",
            TimeLimit::Week => "Week",
            TimeLimit::Month => "Month",
            TimeLimit::Year => "Year",
        }
    }
}

/// Region code used when none is given (worldwide).
pub const DEFAULT_REGION: &str = "wt-wt";

/// A text, image or news query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search terms.
    pub keywords: String,
    /// Region code (e.g. "wt-wt", "us-en", "uk-en").
    pub region: String,
    /// Safe search level.
    pub safesearch: SafeSearch,
    /// Recency filter.
    pub time_limit: Option<TimeLimit>,
    /// Desired number of results; `None` uses the endpoint default.
    pub max_results: Option<usize>,
}

impl SearchQuery {
    /// Creates a new query with the given keywords.
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            region: DEFAULT_REGION.to_string(),
            safesearch: SafeSearch::default(),
            time_limit: None,
            max_results: None,
        }
    }

    /// Sets the region code.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the safe search level.
    pub fn with_safesearch(mut self, level: SafeSearch) -> Self {
        self.safesearch = level;
        self
    }

    /// Sets the recency filter.
    pub fn with_time_limit(mut self, limit: TimeLimit) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the desired number of results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

macro_rules! filter_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Value sent to the image endpoint.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }
    };
}

filter_enum!(
    /// Image size filter.
    ImageSize {
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
        Wallpaper => "Wallpaper",
    }
);

filter_enum!(
    /// Image color filter.
    ImageColor {
        Color => "color",
        Monochrome => "Monochrome",
        Red => "Red",
        Orange => "Orange",
        Yellow => "Yellow",
        Green => "Green",
        Blue => "Blue",
        Purple => "Purple",
        Pink => "Pink",
        Brown => "Brown",
        Black => "Black",
        Gray => "Gray",
        Teal => "Teal",
        White => "White",
    }
);

filter_enum!(
    /// Image type filter.
    ImageType {
        Photo => "photo",
        Clipart => "clipart",
        Gif => "gif",
        Transparent => "transparent",
        Line => "line",
    }
);

filter_enum!(
    /// Image layout filter.
    ImageLayout {
        Square => "Square",
        Tall => "Tall",
        Wide => "Wide",
    }
);

filter_enum!(
    /// Image license filter.
    ImageLicense {
        /// All Creative Commons.
        Any => "any",
        /// Public domain.
        Public => "Public",
        /// Free to share and use.
        Share => "Share",
        /// Free to share and use commercially.
        ShareCommercially => "ShareCommercially",
        /// Free to modify, share and use.
        Modify => "Modify",
        /// Free to modify, share and use commercially.
        ModifyCommercially => "ModifyCommercially",
    }
);

/// Optional filters for image search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFilters {
    pub size: Option<ImageSize>,
    pub color: Option<ImageColor>,
    pub image_type: Option<ImageType>,
    pub layout: Option<ImageLayout>,
    pub license: Option<ImageLicense>,
}

impl ImageFilters {
    /// Renders the `f` parameter. Unset filters leave an empty slot.
    pub fn to_param(&self, time_limit: Option<TimeLimit>) -> String {
        fn slot(name: &str, value: Option<&str>) -> String {
            value.map(|v| format!("{}:{}", name, v)).unwrap_or_default()
        }

        [
            slot("time", time_limit.map(TimeLimit::as_image_filter)),
            slot("size", self.size.map(ImageSize::as_str)),
            slot("color", self.color.map(ImageColor::as_str)),
            slot("type", self.image_type.map(ImageType::as_str)),
            slot("layout", self.layout.map(ImageLayout::as_str)),
            slot("license", self.license.map(ImageLicense::as_str)),
        ]
        .join(",")
    }
}

/// Free-text address components passed to the geocoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl Address {
    /// Returns the set components as `(nominatim name, value)` pairs.
    pub fn components(&self) -> Vec<(&'static str, &str)> {
        [
            ("street", &self.street),
            ("city", &self.city),
            ("county", &self.county),
            ("state", &self.state),
            ("country", &self.country),
            ("postalcode", &self.postal_code),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }

    /// Returns true when no component is set.
    pub fn is_empty(&self) -> bool {
        self.components().is_empty()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .components()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// A local-business query over a geocoded area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceQuery {
    /// The search terms.
    pub keywords: String,
    /// Area to search in.
    pub address: Address,
    /// Distance in kilometers to grow the geocoded box by on every side.
    pub radius_km: f64,
}

impl PlaceQuery {
    /// Creates a new place query.
    pub fn new(keywords: impl Into<String>, address: Address) -> Self {
        Self {
            keywords: keywords.into(),
            address,
            radius_km: 0.0,
        }
    }

    /// Sets the radius in kilometers.
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_new() {
        let query = SearchQuery::new("test query");
        assert_eq!(query.keywords, "test query");
        assert_eq!(query.region, "wt-wt");
        assert_eq!(query.safesearch, SafeSearch::Moderate);
        assert!(query.time_limit.is_none());
        assert!(query.max_results.is_none());
    }

    #[test]
    fn test_search_query_builder_chain() {
        let query = SearchQuery::new("rust programming")
            .with_region("us-en")
            .with_safesearch(SafeSearch::Off)
            .with_time_limit(TimeLimit::Month)
            .with_max_results(50);

        assert_eq!(query.keywords, "rust programming");
        assert_eq!(query.region, "us-en");
        assert_eq!(query.safesearch, SafeSearch::Off);
        assert_eq!(query.time_limit, Some(TimeLimit::Month));
        assert_eq!(query.max_results, Some(50));
    }

    #[test]
    fn test_safe_search_kp_values() {
        assert_eq!(SafeSearch::Strict.kp(), 1);
        assert_eq!(SafeSearch::Moderate.kp(), -1);
        assert_eq!(SafeSearch::Off.kp(), -2);
    }

    #[test]
    fn test_time_limit_params() {
        assert_eq!(TimeLimit::Day.as_param(), "d");
        assert_eq!(TimeLimit::Year.as_param(), "y");
        assert_eq!(TimeLimit::Week.as_image_filter(), "Week");
    }

    #[test]
    fn test_image_filters_empty() {
        let filters = ImageFilters::default();
        assert_eq!(filters.to_param(None), ",,,,,");
    }

    #[test]
    fn test_image_filters_partial() {
        let filters = ImageFilters {
            size: Some(ImageSize::Large),
            license: Some(ImageLicense::ShareCommercially),
            ..Default::default()
        };
        assert_eq!(
            filters.to_param(Some(TimeLimit::Day)),
            "time:Day,size:Large,,,,license:ShareCommercially"
        );
    }

    #[test]
    fn test_image_filter_values() {
        assert_eq!(ImageColor::Color.as_str(), "color");
        assert_eq!(ImageType::Transparent.as_str(), "transparent");
        assert_eq!(ImageLayout::Tall.as_str(), "Tall");
    }

    #[test]
    fn test_image_license_values() {
        assert_eq!(ImageLicense::Any.as_str(), "any");
        assert_eq!(ImageLicense::Public.as_str(), "Public");
        assert_eq!(ImageLicense::ModifyCommercially.as_str(), "ModifyCommercially");

        let filters = ImageFilters {
            license: Some(ImageLicense::Any),
            ..Default::default()
        };
        assert_eq!(filters.to_param(None), ",,,,,license:any");
    }

    #[test]
    fn test_address_components_skip_unset() {
        let address = Address {
            city: Some("Paris".to_string()),
            postal_code: Some("75001".to_string()),
            ..Default::default()
        };
        assert_eq!(
            address.components(),
            vec![("city", "Paris"), ("postalcode", "75001")]
        );
        assert!(!address.is_empty());
        assert!(Address::default().is_empty());
    }

    #[test]
    fn test_address_display() {
        let address = Address {
            city: Some("Berlin".to_string()),
            country: Some("Germany".to_string()),
            ..Default::default()
        };
        assert_eq!(address.to_string(), "city=Berlin, country=Germany");
    }

    #[test]
    fn test_place_query_radius() {
        let query = PlaceQuery::new("cafe", Address::default()).with_radius_km(2.5);
        assert_eq!(query.radius_km, 2.5);
        assert_eq!(query.keywords, "cafe");
    }

    #[test]
    fn test_search_query_serialization() {
        let query = SearchQuery::new("test");
        let json = serde_json::to_string(&query).unwrap();
        assert!(json.contains("\"keywords\":\"test\""));
        assert!(json.contains("\"safesearch\":\"Moderate\""));
    }
}
