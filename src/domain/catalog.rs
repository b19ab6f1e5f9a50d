//! Subject and country options offered to the user, plus the country
//! adjective table used when naming synthesized institutions.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub static SUBJECT_OPTIONS: [CatalogOption; 8] = [
    CatalogOption { value: "computer-science", label: "Computer Science & IT" },
    CatalogOption { value: "engineering", label: "Engineering" },
    CatalogOption { value: "business", label: "Business & Management" },
    CatalogOption { value: "medicine", label: "Medicine & Health Sciences" },
    CatalogOption { value: "arts", label: "Arts & Humanities" },
    CatalogOption { value: "science", label: "Natural Sciences" },
    CatalogOption { value: "social-sciences", label: "Social Sciences" },
    CatalogOption { value: "law", label: "Law" },
];

pub static COUNTRY_OPTIONS: [CatalogOption; 8] = [
    CatalogOption { value: "usa", label: "United States" },
    CatalogOption { value: "uk", label: "United Kingdom" },
    CatalogOption { value: "canada", label: "Canada" },
    CatalogOption { value: "australia", label: "Australia" },
    CatalogOption { value: "germany", label: "Germany" },
    CatalogOption { value: "france", label: "France" },
    CatalogOption { value: "japan", label: "Japan" },
    CatalogOption { value: "singapore", label: "Singapore" },
];

/// Countries cycled through when the query has no country preference.
pub const DEFAULT_COUNTRIES: [&str; 5] = [
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "Germany",
];

static COUNTRY_ADJECTIVES: [(&str, &str); 8] = [
    ("United States", "American"),
    ("United Kingdom", "British"),
    ("Canada", "Canadian"),
    ("Australia", "Australian"),
    ("Germany", "German"),
    ("France", "French"),
    ("Japan", "Japanese"),
    ("Singapore", "Singaporean"),
];

fn find_country(input: &str) -> Option<&'static CatalogOption> {
    let needle = input.trim();
    COUNTRY_OPTIONS.iter().find(|option| {
        option.value.eq_ignore_ascii_case(needle) || option.label.eq_ignore_ascii_case(needle)
    })
}

/// Maps a form slug or label to its display label; anything else is
/// returned trimmed.
pub fn resolve_country(input: &str) -> String {
    match find_country(input) {
        Some(option) => option.label.to_string(),
        None => input.trim().to_string(),
    }
}

pub fn country_adjective(country: &str) -> String {
    let label = resolve_country(country);
    COUNTRY_ADJECTIVES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, adjective)| adjective.to_string())
        .unwrap_or(label)
}

pub fn subject_label(subject: &str) -> Option<&'static str> {
    SUBJECT_OPTIONS
        .iter()
        .find(|option| option.value.eq_ignore_ascii_case(subject.trim()))
        .map(|option| option.label)
}
