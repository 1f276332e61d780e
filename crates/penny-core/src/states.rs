//! US state extraction from free-text store locations.
//!
//! Reporters type locations however they like: `"TX"`, `"Austin, TX"`,
//! `"texas"`, `"Home Depot - Marietta GA"`. This module maps those to a
//! canonical 2-letter USPS code.

/// USPS code and full name for every state plus DC.
pub const US_STATES: [(&str, &str); 51] = [
    ("AL", "ALABAMA"),
    ("AK", "ALASKA"),
    ("AZ", "ARIZONA"),
    ("AR", "ARKANSAS"),
    ("CA", "CALIFORNIA"),
    ("CO", "COLORADO"),
    ("CT", "CONNECTICUT"),
    ("DE", "DELAWARE"),
    ("DC", "DISTRICT OF COLUMBIA"),
    ("FL", "FLORIDA"),
    ("GA", "GEORGIA"),
    ("HI", "HAWAII"),
    ("ID", "IDAHO"),
    ("IL", "ILLINOIS"),
    ("IN", "INDIANA"),
    ("IA", "IOWA"),
    ("KS", "KANSAS"),
    ("KY", "KENTUCKY"),
    ("LA", "LOUISIANA"),
    ("ME", "MAINE"),
    ("MD", "MARYLAND"),
    ("MA", "MASSACHUSETTS"),
    ("MI", "MICHIGAN"),
    ("MN", "MINNESOTA"),
    ("MS", "MISSISSIPPI"),
    ("MO", "MISSOURI"),
    ("MT", "MONTANA"),
    ("NE", "NEBRASKA"),
    ("NV", "NEVADA"),
    ("NH", "NEW HAMPSHIRE"),
    ("NJ", "NEW JERSEY"),
    ("NM", "NEW MEXICO"),
    ("NY", "NEW YORK"),
    ("NC", "NORTH CAROLINA"),
    ("ND", "NORTH DAKOTA"),
    ("OH", "OHIO"),
    ("OK", "OKLAHOMA"),
    ("OR", "OREGON"),
    ("PA", "PENNSYLVANIA"),
    ("RI", "RHODE ISLAND"),
    ("SC", "SOUTH CAROLINA"),
    ("SD", "SOUTH DAKOTA"),
    ("TN", "TENNESSEE"),
    ("TX", "TEXAS"),
    ("UT", "UTAH"),
    ("VT", "VERMONT"),
    ("VA", "VIRGINIA"),
    ("WA", "WASHINGTON"),
    ("WV", "WEST VIRGINIA"),
    ("WI", "WISCONSIN"),
    ("WY", "WYOMING"),
];

fn code_for(token: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|(code, _)| *code == token)
        .map(|(code, _)| *code)
}

/// Returns `true` if `needle` appears in `haystack` bounded by
/// non-alphabetic characters (or the string ends).
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut search_from = 0;
    while let Some(pos) = haystack[search_from..].find(needle) {
        let start = search_from + pos;
        let end = start + needle.len();
        let ok_before = start == 0
            || !haystack[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphabetic);
        let ok_after = end == haystack.len()
            || !haystack[end..].chars().next().is_some_and(char::is_alphabetic);
        if ok_before && ok_after {
            return true;
        }
        search_from = end;
    }
    false
}

fn find_in_candidate(candidate: &str) -> Option<String> {
    let upper = candidate.to_uppercase();

    // A bare 2-letter code anywhere in the string ("Austin TX", "TX 78701").
    for token in upper.split(|c: char| !c.is_alphabetic()) {
        if token.len() == 2 {
            if let Some(code) = code_for(token) {
                return Some(code.to_string());
            }
        }
    }

    // Full state names, word-bounded. Longest match wins so "West
    // Virginia" resolves to WV, not VA.
    US_STATES
        .iter()
        .filter(|(_, name)| contains_word(&upper, name))
        .max_by_key(|(_, name)| name.len())
        .map(|(code, _)| (*code).to_string())
}

/// Extracts a 2-letter state code from a free-text location, or `None`
/// when no state is recognizable.
#[must_use]
pub fn extract_state(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Exact code match first ("tx" -> "TX").
    let upper = trimmed.to_uppercase();
    if upper.len() == 2 {
        if let Some(code) = code_for(&upper) {
            return Some(code.to_string());
        }
    }

    // Comma-separated values usually end with the state ("Austin, TX").
    // Try the last segment before falling back to the whole string.
    if let Some((_, last)) = trimmed.rsplit_once(',') {
        if let Some(code) = find_in_candidate(last) {
            return Some(code);
        }
    }

    find_in_candidate(trimmed)
}
