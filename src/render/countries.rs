use std::collections::HashMap;

/// Read-only lookup from ISO 3166 alpha-2 code to display name
pub trait CountryDirectory: Send + Sync {
    fn country_name(&self, code: &str) -> Option<&str>;
}

const COUNTRIES: &[(&str, &str)] = &[
    ("AR", "Argentina"),
    ("AT", "Austria"),
    ("AU", "Australia"),
    ("BE", "Belgium"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CH", "Switzerland"),
    ("CN", "China"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("IE", "Ireland"),
    ("IN", "India"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("KR", "Korea, Republic of"),
    ("MX", "Mexico"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("NZ", "New Zealand"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("SE", "Sweden"),
    ("SG", "Singapore"),
    ("US", "United States"),
    ("ZA", "South Africa"),
];

/// Built-in country table
#[derive(Debug, Clone)]
pub struct StaticCountries {
    names: HashMap<&'static str, &'static str>,
}

impl StaticCountries {
    pub fn new() -> Self {
        Self {
            names: COUNTRIES.iter().copied().collect(),
        }
    }
}

impl Default for StaticCountries {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryDirectory for StaticCountries {
    fn country_name(&self, code: &str) -> Option<&str> {
        self.names
            .get(code.trim().to_ascii_uppercase().as_str())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let countries = StaticCountries::new();
        assert_eq!(countries.country_name("us"), Some("United States"));
        assert_eq!(countries.country_name(" GB "), Some("United Kingdom"));
        assert_eq!(countries.country_name("XX"), None);
    }
}
