//! Canonical section vocabulary and ordering.
//!
//! Sections are plain strings so consumers can treat an unrecognized value
//! as an extra bucket rather than an error, but the consolidator sorts known
//! sections into this fixed order.

/// Canonical section order for consolidated output.
pub const SECTION_ORDER: &[&str] = &[
    "patient",
    "contact",
    "employment",
    "insurance",
    "emergency",
    "medical_history",
    "dental_history",
    "consent",
    "signature",
    "general",
];

/// Rank of a section within [`SECTION_ORDER`]; unknown sections sort after
/// all known ones, preserving their relative order.
#[must_use]
pub fn section_rank(section: Option<&str>) -> usize {
    match section {
        Some(s) => SECTION_ORDER
            .iter()
            .position(|known| *known == s)
            .unwrap_or(SECTION_ORDER.len()),
        None => SECTION_ORDER.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sections_rank_in_order() {
        assert!(section_rank(Some("patient")) < section_rank(Some("insurance")));
        assert!(section_rank(Some("consent")) < section_rank(Some("signature")));
    }

    #[test]
    fn test_unknown_section_sorts_last() {
        assert_eq!(section_rank(Some("mystery")), SECTION_ORDER.len());
        assert_eq!(section_rank(None), SECTION_ORDER.len());
    }
}
