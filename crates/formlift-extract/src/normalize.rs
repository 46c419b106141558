//! Text normalization: glyph canonicalization, boilerplate scrubbing, and
//! soft-wrap coalescing.
//!
//! The normalizer is a pure transform over raw lines. It never fails and it
//! prefers under-filtering to data loss: anything it cannot confidently
//! clean passes through unchanged. Scrubbed and coalesced-away lines are
//! replaced with empty lines rather than removed, so the line adjacency the
//! grid detector depends on survives normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::line::Line;

// Unchecked checkbox glyphs seen in serialized form text.
const UNCHECKED_GLYPHS: &[char] = &['☐', '❏', '⬜', '□', '◻', '▢', '🔲'];
// Checked variants.
const CHECKED_GLYPHS: &[char] = &['☑', '☒', '✅', '■', '◼'];

static RE_EMPTY_BOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\]|\(\s*\)").expect("regex is compile-time constant"));
static RE_CHECKED_BOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*[xX✓✔]\s*\]|\(\s*[xX✓✔]\s*\)").expect("regex is compile-time constant")
});
static RE_SPACED_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[A-Z] ){2,}[A-Z]\b").expect("regex is compile-time constant"));
static RE_STREET_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(street|st\.|avenue|ave\.?|boulevard|blvd\.?|drive|dr\.|road|rd\.?|suite|ste\.?|lane|ln\.?|parkway|pkwy\.?)\b")
        .expect("regex is compile-time constant")
});
static RE_CITY_STATE_ZIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2}\s+\d{5}(-\d{4})?\b").expect("regex is compile-time constant"));
static RE_PAGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(page\s+)?\d+\s*(of\s+\d+)?\s*$").expect("regex is compile-time constant")
});
static RE_BARE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*((tel|phone|office|fax)[:.]?\s*)?\(?\d{3}\)?[\s.-]\d{3}[\s.-]\d{4}\s*((tel|phone|office|fax)[:.]?\s*\(?\d{3}\)?[\s.-]\d{3}[\s.-]\d{4}\s*)*$")
        .expect("regex is compile-time constant")
});

/// Normalize a whole document into indexed [`Line`]s.
///
/// Applies, in order: per-line glyph canonicalization and spaced-capital
/// collapsing, boilerplate header/footer scrubbing, and soft-wrap
/// coalescing. Line indices are stable with respect to the raw input.
#[must_use]
pub fn normalize_lines(text: &str) -> Vec<Line> {
    let mut cleaned: Vec<String> = text
        .lines()
        .map(|raw| {
            let line = canonicalize_glyphs(raw);
            let line = collapse_spaced_caps(&line);
            if is_boilerplate(&line) {
                String::new()
            } else {
                line
            }
        })
        .collect();

    coalesce_soft_wraps(&mut cleaned);

    cleaned
        .into_iter()
        .enumerate()
        .map(|(index, text)| Line::new(index, text))
        .collect()
}

/// Map every checkbox representation to the canonical `[ ]` / `[x]` tokens.
#[must_use]
pub fn canonicalize_glyphs(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        if UNCHECKED_GLYPHS.contains(&ch) {
            out.push_str("[ ]");
        } else if CHECKED_GLYPHS.contains(&ch) {
            out.push_str("[x]");
        } else {
            out.push(ch);
        }
    }
    let out = RE_CHECKED_BOX.replace_all(&out, "[x]");
    let out = RE_EMPTY_BOX.replace_all(&out, "[ ]");
    out.into_owned()
}

/// Collapse spaced-out capital runs: `P A T I E N T` becomes `PATIENT`.
#[must_use]
pub fn collapse_spaced_caps(line: &str) -> String {
    RE_SPACED_CAPS
        .replace_all(line, |caps: &regex::Captures<'_>| {
            caps[0].chars().filter(|c| *c != ' ').collect::<String>()
        })
        .into_owned()
}

/// True for boilerplate header/footer lines: a practice address line
/// (street-suffix token plus a city/state/zip pair), a bare page number, or
/// a line holding nothing but phone/fax numbers.
#[must_use]
pub fn is_boilerplate(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    if RE_STREET_SUFFIX.is_match(trimmed) && RE_CITY_STATE_ZIP.is_match(trimmed) {
        return true;
    }
    if RE_PAGE_NUMBER.is_match(trimmed) {
        return true;
    }
    RE_BARE_PHONE.is_match(trimmed)
}

/// Join soft-wrapped continuations in place, leaving consumed lines empty.
///
/// A line is treated as wrapped when it reads like running prose (4+ words,
/// no checkboxes, no blank runs) and either ends mid-word (trailing hyphen
/// or slash) or lacks terminal punctuation while the next non-empty
/// neighbor starts lowercase.
fn coalesce_soft_wraps(lines: &mut [String]) {
    for i in 0..lines.len().saturating_sub(1) {
        loop {
            let cur = lines[i].trim_end().to_string();
            if !looks_wrapped(&cur) {
                break;
            }
            let Some(next_idx) = (i + 1..lines.len()).find(|j| !lines[*j].trim().is_empty())
            else {
                break;
            };
            let next = lines[next_idx].trim().to_string();
            let hyphenated = cur.ends_with('-') || cur.ends_with('/');
            if !hyphenated && !next.starts_with(|c: char| c.is_lowercase()) {
                break;
            }
            lines[i] = if hyphenated {
                format!("{cur}{next}")
            } else {
                format!("{cur} {next}")
            };
            lines[next_idx] = String::new();
        }
    }
}

fn looks_wrapped(line: &str) -> bool {
    if line.split_whitespace().count() < 4 {
        return false;
    }
    if line.contains("[ ]") || line.contains("[x]") || line.contains("___") {
        return false;
    }
    match line.chars().last() {
        Some('.' | '!' | '?' | ':' | ';') => false,
        Some(_) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_canonicalization() {
        assert_eq!(canonicalize_glyphs("☐ Aspirin ☑ Codeine"), "[ ] Aspirin [x] Codeine");
        assert_eq!(canonicalize_glyphs("( ) Yes (x) No"), "[ ] Yes [x] No");
        assert_eq!(canonicalize_glyphs("[] A [X] B"), "[ ] A [x] B");
    }

    #[test]
    fn test_spaced_caps_collapse() {
        assert_eq!(
            collapse_spaced_caps("P A T I E N T  I N F O R M A T I O N"),
            "PATIENT  INFORMATION"
        );
        // Two-letter runs like state abbreviations are left alone
        assert_eq!(collapse_spaced_caps("Visit NY soon"), "Visit NY soon");
    }

    #[test]
    fn test_boilerplate_address_line() {
        assert!(is_boilerplate(
            "Lakeside Dental Group   142 Main Street   Springfield, IL 62704"
        ));
        assert!(is_boilerplate("Page 2 of 3"));
        assert!(is_boilerplate("Tel: (555) 123-4567 Fax: (555) 123-4568"));
        assert!(
            !is_boilerplate("Street Address: ______"),
            "field lines with a street word but no zip must survive"
        );
    }

    #[test]
    fn test_soft_wrap_join() {
        let lines = normalize_lines(
            "I hereby authorize the release of any\ninformation relating to my treatment.\nName: ____",
        );
        assert_eq!(
            lines[0].text,
            "I hereby authorize the release of any information relating to my treatment."
        );
        assert!(lines[1].is_empty(), "consumed continuation becomes empty");
        assert_eq!(lines[2].text, "Name: ____");
    }

    #[test]
    fn test_label_lines_never_join() {
        let lines = normalize_lines("First Name: ______\nLast Name: ______");
        assert_eq!(lines[0].text, "First Name: ______");
        assert_eq!(lines[1].text, "Last Name: ______");
    }
}
