//! Destination suggestions offered when picking where a trip goes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub country: &'static str,
    pub country_code: &'static str,
    pub flag: &'static str,
}

impl City {
    /// `"Lagos, Nigeria"`, the form used as a trip destination.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

const fn city(
    name: &'static str,
    country: &'static str,
    country_code: &'static str,
    flag: &'static str,
) -> City {
    City {
        name,
        country,
        country_code,
        flag,
    }
}

pub const CITIES: &[City] = &[
    city("Laghouat", "Algeria", "DZ", "🇩🇿"),
    city("Lagos", "Nigeria", "NG", "🇳🇬"),
    city("Doha", "Qatar", "QA", "🇶🇦"),
    city("London", "United Kingdom", "GB", "🇬🇧"),
    city("Paris", "France", "FR", "🇫🇷"),
    city("New York", "United States", "US", "🇺🇸"),
    city("Tokyo", "Japan", "JP", "🇯🇵"),
    city("Dubai", "United Arab Emirates", "AE", "🇦🇪"),
    city("Singapore", "Singapore", "SG", "🇸🇬"),
    city("Sydney", "Australia", "AU", "🇦🇺"),
    city("Toronto", "Canada", "CA", "🇨🇦"),
    city("Berlin", "Germany", "DE", "🇩🇪"),
    city("Rome", "Italy", "IT", "🇮🇹"),
    city("Madrid", "Spain", "ES", "🇪🇸"),
    city("Amsterdam", "Netherlands", "NL", "🇳🇱"),
];

/// Case-insensitive substring match on city or country name, in catalog
/// order. A blank query matches everything.
pub fn search(query: &str) -> Vec<&'static City> {
    let needle = query.trim().to_lowercase();
    CITIES
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.country.to_lowercase().contains(&needle)
        })
        .collect()
}
