//! Home Depot SKU normalization.
//!
//! Register SKUs are 6 digits; online ("internet") SKUs are 10. Anything
//! else is treated as malformed and dropped upstream.

/// Strips non-digits and validates the result as a 6- or 10-digit SKU.
///
/// Returns `None` for values that do not normalize to a valid SKU, which
/// callers treat as "row has no SKU".
#[must_use]
pub fn normalize_sku(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 6 || digits.len() == 10 {
        Some(digits)
    } else {
        None
    }
}
