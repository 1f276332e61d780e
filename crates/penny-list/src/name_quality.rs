//! Heuristics for judging item-name quality.
//!
//! Community reports often carry throwaway names ("drill", "light"). The
//! enrichment overlay uses these rules to decide whether a curated name is
//! a genuine upgrade over the crowd-sourced one.

/// Single words too generic to identify a product on their own.
const GENERIC_NAME_TERMS: [&str; 20] = [
    "item",
    "product",
    "tool",
    "tools",
    "headlamp",
    "drill",
    "saw",
    "light",
    "lights",
    "lamp",
    "fan",
    "battery",
    "charger",
    "kit",
    "set",
    "gloves",
    "hose",
    "bulb",
    "faucet",
    "showerhead",
];

fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_token_key(token: &str) -> String {
    token
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

/// A token mixing letters and digits usually carries a model number
/// ("P1813", "DCD771C2"), which makes an otherwise terse name specific.
fn is_model_like_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_alphabetic()) && token.chars().any(|c| c.is_ascii_digit())
}

fn has_model_like_token(value: &str) -> bool {
    value.split_whitespace().any(is_model_like_token)
}

fn strip_brand_prefix(name: &str, brand: Option<&str>) -> String {
    let name = normalize_whitespace(name);
    let brand = normalize_whitespace(brand.unwrap_or(""));
    if brand.is_empty() {
        return name;
    }

    if name.to_lowercase().starts_with(&brand.to_lowercase()) && name.is_char_boundary(brand.len()) {
        let stripped = name[brand.len()..]
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '\u{2013}' | '\u{2014}' | ':'))
            .trim()
            .to_string();
        if !stripped.is_empty() {
            return stripped;
        }
    }

    name
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Returns `true` when a name is too vague to identify the product:
/// missing, a lone non-model word, or a short run of generic terms.
#[must_use]
pub fn is_low_quality_name(name: Option<&str>, brand: Option<&str>) -> bool {
    let Some(name) = name.filter(|v| !v.trim().is_empty()) else {
        return true;
    };

    let stripped = strip_brand_prefix(name, brand);
    let tokens: Vec<&str> = stripped.split_whitespace().collect();

    if tokens.len() <= 1 {
        return !has_model_like_token(&stripped);
    }

    // Two plain words are only specific enough when one of them looks like
    // a model number, or when neither is a catalog-filler generic term.
    if tokens.len() <= 2 && !has_model_like_token(&stripped) {
        let all_generic = tokens
            .iter()
            .all(|t| GENERIC_NAME_TERMS.contains(&normalize_token_key(t).as_str()));
        if all_generic {
            return true;
        }
    }

    false
}

/// Decides whether an enriched (curated) name should replace the current
/// crowd-sourced one. Quality upgrades always win; between two names of
/// equal quality the candidate must be materially more specific.
#[must_use]
pub fn should_prefer_enriched_name(
    current: Option<&str>,
    candidate: Option<&str>,
    brand: Option<&str>,
) -> bool {
    if !has_text(candidate) {
        return false;
    }
    if !has_text(current) {
        return true;
    }

    let current = normalize_whitespace(current.unwrap_or(""));
    let candidate = normalize_whitespace(candidate.unwrap_or(""));

    if current.to_lowercase() == candidate.to_lowercase() {
        return false;
    }

    let current_low = is_low_quality_name(Some(&current), brand);
    let candidate_low = is_low_quality_name(Some(&candidate), brand);

    if current_low && !candidate_low {
        return true;
    }
    if !current_low && candidate_low {
        return false;
    }

    if current_low && candidate_low {
        return has_model_like_token(&candidate)
            && !has_model_like_token(&current)
            && candidate.len() > current.len();
    }

    has_model_like_token(&candidate)
        && !has_model_like_token(&current)
        && candidate.len() >= current.len() + 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_names_are_low_quality() {
        assert!(is_low_quality_name(None, None));
        assert!(is_low_quality_name(Some(""), None));
        assert!(is_low_quality_name(Some("   "), None));
    }

    #[test]
    fn single_generic_word_is_low_quality() {
        assert!(is_low_quality_name(Some("drill"), None));
        assert!(is_low_quality_name(Some("Light"), None));
    }

    #[test]
    fn single_model_like_token_is_acceptable() {
        assert!(!is_low_quality_name(Some("DCD771C2"), None));
    }

    #[test]
    fn two_generic_words_are_low_quality() {
        assert!(is_low_quality_name(Some("tool set"), None));
        assert!(is_low_quality_name(Some("battery charger"), None));
    }

    #[test]
    fn descriptive_names_pass() {
        assert!(!is_low_quality_name(
            Some("Ryobi ONE+ 18V Hybrid LED Work Light"),
            None
        ));
        assert!(!is_low_quality_name(Some("20 Gal. Storage Tote"), None));
    }

    #[test]
    fn brand_prefix_is_ignored_when_judging() {
        // "Ryobi drill" reduces to just "drill" once the brand is stripped.
        assert!(is_low_quality_name(Some("Ryobi drill"), Some("Ryobi")));
    }

    #[test]
    fn enriched_name_replaces_missing_name() {
        assert!(should_prefer_enriched_name(
            None,
            Some("Husky 20 Gal. Tote"),
            None
        ));
        assert!(!should_prefer_enriched_name(
            Some("Husky 20 Gal. Tote"),
            None,
            None
        ));
    }

    #[test]
    fn quality_upgrade_wins() {
        assert!(should_prefer_enriched_name(
            Some("drill"),
            Some("Ryobi ONE+ 18V Drill P1813"),
            None
        ));
    }

    #[test]
    fn quality_downgrade_never_wins() {
        assert!(!should_prefer_enriched_name(
            Some("Ryobi ONE+ 18V Drill P1813"),
            Some("drill"),
            None
        ));
    }

    #[test]
    fn identical_names_are_left_alone() {
        assert!(!should_prefer_enriched_name(
            Some("Husky Tote"),
            Some("husky tote"),
            None
        ));
    }

    #[test]
    fn equal_quality_requires_material_specificity() {
        // Both fine names, candidate adds a model token and enough length.
        assert!(should_prefer_enriched_name(
            Some("Hybrid LED Work Light"),
            Some("Hybrid LED Work Light PCL630B"),
            None
        ));
        // Candidate adds nothing model-like: keep the current name.
        assert!(!should_prefer_enriched_name(
            Some("Hybrid LED Work Light"),
            Some("Hybrid LED Shop Work Light"),
            None
        ));
    }
}
