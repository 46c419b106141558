//! Per-line classification.
//!
//! Each normalized line gets exactly one label. The classifier only needs
//! bounded context (the previous and next line); everything trickier, like
//! confirming a grid across rows, is deferred to the grid detector.

use crate::line::Line;

/// Classification of one normalized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Section heading (`PATIENT INFORMATION`).
    Heading,
    /// Label plus a fill-in blank (`Name: ______`).
    BlankField,
    /// Contains at least one checkbox token.
    CheckboxLine,
    /// Checkbox line with grid-like spacing; confirmed or rejected later
    /// by the grid detector across rows.
    GridRowCandidate,
    /// Running sentence text.
    Prose,
    /// Empty or residual boilerplate.
    Junk,
}

/// Minimum whitespace gap between checkboxes for a grid row candidate.
pub const GRID_GAP: usize = 4;

/// Classify one line given its immediate neighbors.
#[must_use]
pub fn classify(line: &Line, _prev: Option<&Line>, next: Option<&Line>) -> LineClass {
    if line.is_empty() {
        return LineClass::Junk;
    }

    let boxes = line.checkboxes();
    if !boxes.is_empty() {
        if boxes.len() >= 2 && line.has_checkbox_gap(GRID_GAP) {
            return LineClass::GridRowCandidate;
        }
        return LineClass::CheckboxLine;
    }

    if is_heading(line, next) {
        return LineClass::Heading;
    }

    if is_blank_field(line) {
        return LineClass::BlankField;
    }

    if line.word_count() > 6 && line.ends_sentence() {
        return LineClass::Prose;
    }

    LineClass::Junk
}

/// Heading heuristics. A line carrying two or more colon-terminated labels
/// is never a heading, whatever its casing.
fn is_heading(line: &Line, next: Option<&Line>) -> bool {
    if line.colon_label_count() >= 2 || !line.blank_runs().is_empty() {
        return false;
    }
    let trimmed = line.text.trim();
    let words = line.word_count();
    if words == 0 || words > 8 {
        return false;
    }
    if line.is_all_caps() && words <= 6 && (words >= 2 || !trimmed.ends_with(':')) {
        return true;
    }
    // A colon-terminated line directly above a checkbox row reads as a
    // group caption ("Please mark any of the following:").
    if trimmed.ends_with(':')
        && words <= 8
        && next.is_some_and(|n| !n.checkboxes().is_empty())
        && trimmed.chars().next().is_some_and(char::is_uppercase)
    {
        return true;
    }
    false
}

/// Blank-field heuristics: a label followed by a fill-in blank, or a bare
/// colon-terminated label.
fn is_blank_field(line: &Line) -> bool {
    let trimmed = line.text.trim_end();
    if let Some(run) = line.blank_runs().first() {
        // Needs label text before the first blank
        let label = line.slice(0, run.start);
        return !label.trim().is_empty();
    }
    // `Label:` with nothing after the colon
    if trimmed.ends_with(':') && line.colon_label_count() >= 1 && line.word_count() <= 8 {
        return true;
    }
    // Multiple inline colon labels without blanks (`City: State: Zip:`)
    line.colon_label_count() >= 2
}
