//! Field synthesis from classified lines and grid blocks.
//!
//! The extractor walks the normalized lines once, with bounded lookahead
//! (grid runs, "if yes" follow-ups, orphaned-checkbox pairing), and emits
//! [`Field`] records. Lines matching no rule are dropped, never guessed
//! into a field; the one exception is consent-vocabulary prose, which
//! becomes a `terms` field carrying its full text.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use formlift_core::{
    child_key, slugify, ConditionalLink, Field, FieldOption, FieldType, InputKind,
};

use crate::classify::{classify, LineClass};
use crate::grid::{detect_grid, GridBlock};
use crate::line::Line;
use crate::normalize::normalize_lines;

static RE_YES_NO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<prompt>.*?)(\[[ x]\]\s*)?\byes\b[\s_.]*((\[[ x]\]\s*)?\bno\b)")
        .expect("regex is compile-time constant")
});
static RE_IF_YES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bif\s+yes\b[,:]?\s*(please\s+)?(explain|describe|list|specify|state)?")
        .expect("regex is compile-time constant")
});

/// Labels the compound splitter recognizes, longest first so a long match
/// discards the shorter substrings it contains.
const KNOWN_LABELS: &[&str] = &[
    "social security number",
    "insurance company",
    "emergency contact",
    "employer's name",
    "date of birth",
    "email address",
    "policy number",
    "group number",
    "middle initial",
    "relationship",
    "mobile phone",
    "home phone",
    "work phone",
    "cell phone",
    "first name",
    "last name",
    "occupation",
    "birth date",
    "signature",
    "zip code",
    "employer",
    "address",
    "mobile",
    "email",
    "phone",
    "state",
    "city",
    "name",
    "date",
    "work",
    "home",
    "cell",
    "ssn",
    "zip",
];

const CONSENT_VOCAB: &[&str] = &[
    "consent",
    "authoriz",
    "acknowledg",
    "agree",
    "release",
    "responsible",
    "financial",
    "policy",
    "privacy",
    "hipaa",
    "payment",
];

const CONDITION_LIST_HINTS: &[&str] = &[
    "allerg",
    "condition",
    "disease",
    "medical",
    "dental",
    "problem",
    "symptom",
    "history",
    "following",
    "medication",
];

/// Convenience wrapper: extract fields from raw document text with the
/// default extractor.
#[must_use]
pub fn extract_fields(text: &str) -> Vec<Field> {
    FieldExtractor::new().extract(text)
}

/// Converts classified lines and grid blocks into [`Field`] records.
#[derive(Debug, Default)]
pub struct FieldExtractor {
    _private: (),
}

struct Cursor<'a> {
    lines: &'a [Line],
    classes: &'a [LineClass],
    section: Option<String>,
    heading: Option<String>,
    out: Vec<Field>,
}

impl FieldExtractor {
    #[must_use]
    pub fn new() -> Self {
        FieldExtractor::default()
    }

    /// Run normalization, classification, and extraction over a document.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<Field> {
        let lines = normalize_lines(text);
        let classes: Vec<LineClass> = (0..lines.len())
            .map(|i| {
                classify(
                    &lines[i],
                    i.checked_sub(1).map(|p| &lines[p]),
                    lines.get(i + 1),
                )
            })
            .collect();

        let mut cursor = Cursor {
            lines: &lines,
            classes: &classes,
            section: None,
            heading: None,
            out: Vec::new(),
        };

        let mut i = 0;
        while i < lines.len() {
            i = cursor.step(i);
        }
        cursor.out
    }
}

impl Cursor<'_> {
    /// Handle the line at `i`; returns the next index to visit.
    fn step(&mut self, i: usize) -> usize {
        let line = &self.lines[i];
        match self.classes[i] {
            LineClass::Junk => i + 1,
            LineClass::Heading => {
                let title = line.text.trim().trim_end_matches(':').trim().to_string();
                // Captions keep the current section; only a recognized or
                // top-level (all-caps) heading moves it.
                match section_for_heading(&title) {
                    Some(section) => self.section = Some(section),
                    None if line.is_all_caps() => self.section = None,
                    None => {}
                }
                self.heading = Some(title);
                i + 1
            }
            LineClass::GridRowCandidate => {
                if let Some(grid) = detect_grid(self.lines, self.classes, i) {
                    let end = grid.end;
                    self.emit_grid(grid);
                    end + 1
                } else {
                    self.checkbox_line(i)
                }
            }
            LineClass::CheckboxLine => self.checkbox_line(i),
            LineClass::BlankField => self.blank_field(i),
            LineClass::Prose => self.prose_run(i),
        }
    }

    fn push(&mut self, mut field: Field) {
        if field.section.is_none() {
            field.section.clone_from(&self.section);
        }
        self.out.push(field);
    }

    // --- grid-derived group ------------------------------------------------

    fn emit_grid(&mut self, grid: GridBlock) {
        let title = grid
            .title
            .clone()
            .or_else(|| self.heading.clone())
            .unwrap_or_else(|| "Options".to_string());
        let mut key = slugify(&title);
        if key.is_empty() {
            key = format!("options_{}", grid.start);
        }
        let options = dedupe_options(
            grid.items
                .iter()
                .map(|item| FieldOption {
                    value: slugify(&item.label),
                    label: item.label.clone(),
                    checked: item.checked,
                })
                .collect(),
        );
        if options.is_empty() {
            debug!("grid at line {} produced no usable options", grid.start);
            return;
        }
        let mut field = Field::new(&key, &title, FieldType::Dropdown).with_options(options, true);
        field.control.condition_list = is_condition_list(&title);
        self.push(field);
    }

    // --- checkbox lines ----------------------------------------------------

    fn checkbox_line(&mut self, i: usize) -> usize {
        let line = &self.lines[i];

        if let Some(consumed) = self.try_yes_no(i) {
            return consumed;
        }

        let boxes = line.checkboxes();
        let prompt = line.slice(0, boxes[0].offset).trim().to_string();
        let pairs = checkbox_pairs(line);

        if prompt.is_empty() {
            if let Some(next) = self.try_orphan_pairing(i) {
                return next;
            }
        }

        if pairs.len() >= 2 {
            let title = if prompt.is_empty() {
                self.heading.clone().unwrap_or_else(|| "Options".to_string())
            } else {
                prompt.trim_end_matches(':').trim().to_string()
            };
            let mut key = slugify(&title);
            if key.is_empty() {
                key = format!("options_{i}");
            }
            let options = dedupe_options(pairs);
            if !options.is_empty() {
                let field = if prompt.is_empty() {
                    let mut f =
                        Field::new(&key, &title, FieldType::Dropdown).with_options(options, true);
                    f.control.condition_list = is_condition_list(&title);
                    f
                } else {
                    Field::new(&key, &title, FieldType::Radio).with_options(options, false)
                };
                self.push(field);
            }
            return i + 1;
        }

        // Single checkbox with a label reads as an opt-in toggle.
        if let Some(opt) = pairs.into_iter().next() {
            let title = opt.label.clone();
            let key = slugify(&title);
            if !key.is_empty() {
                let field =
                    Field::new(&key, &title, FieldType::Radio).with_options(vec![opt], false);
                self.push(field);
            }
        }
        i + 1
    }

    /// `<prompt> ... Yes ... No` plus an optional "if yes" follow-up on the
    /// same or next line. Emits a radio and, when the follow-up exists, a
    /// linked input.
    fn try_yes_no(&mut self, i: usize) -> Option<usize> {
        let line = &self.lines[i];
        let caps = RE_YES_NO.captures(&line.text)?;
        let prompt = caps
            .name("prompt")
            .map(|m| m.as_str().trim().trim_end_matches([':', '?', '.']).trim())
            .unwrap_or("");
        if prompt.split_whitespace().count() < 2 {
            return None;
        }

        let key = slugify(prompt);
        if key.is_empty() {
            return None;
        }
        let checked_yes = line.text.to_lowercase().contains("[x] yes");
        let checked_no = line.text.to_lowercase().contains("[x] no");
        let options = vec![
            FieldOption {
                value: "yes".to_string(),
                label: "Yes".to_string(),
                checked: checked_yes,
            },
            FieldOption {
                value: "no".to_string(),
                label: "No".to_string(),
                checked: checked_no,
            },
        ];
        let field = Field::new(&key, prompt, FieldType::Radio).with_options(options, false);
        self.push(field);

        // Follow-up on the remainder of this line, or on the next line.
        let rest = &line.text[caps.get(0).map_or(0, |m| m.end())..];
        let mut next = i + 1;
        let follow = if RE_IF_YES.is_match(rest) {
            Some(rest.to_string())
        } else if self
            .lines
            .get(i + 1)
            .is_some_and(|l| RE_IF_YES.is_match(&l.text) && l.checkboxes().is_empty())
        {
            next = i + 2;
            Some(self.lines[i + 1].text.clone())
        } else {
            None
        };

        if let Some(follow_text) = follow {
            let title = follow_text
                .trim()
                .trim_end_matches(['_', ':', ' '])
                .trim()
                .to_string();
            let title = if title.is_empty() {
                "If yes, please explain".to_string()
            } else {
                title
            };
            let mut detail = Field::input(&child_key(&key, "detail"), &title);
            detail.control.condition = Some(ConditionalLink {
                parent_key: key,
                expected_value: "yes".to_string(),
            });
            self.push(detail);
        }
        Some(next)
    }

    /// Checkbox-only row followed by a text-only row of comparable word
    /// count: pair labels to boxes by nearest column position.
    fn try_orphan_pairing(&mut self, i: usize) -> Option<usize> {
        let line = &self.lines[i];
        let boxes = line.checkboxes();
        if boxes.len() < 2 {
            return None;
        }
        // Boxes must be essentially bare for the row to count as orphaned.
        let inline_words: usize = checkbox_pairs(line)
            .iter()
            .map(|p| p.label.split_whitespace().count())
            .sum();
        if inline_words > 1 {
            return None;
        }
        let next = self.lines.get(i + 1)?;
        if !next.checkboxes().is_empty() || next.is_empty() {
            return None;
        }
        let groups = word_groups(next);
        if groups.is_empty() || groups.len().abs_diff(boxes.len()) > 1 {
            return None;
        }

        let mut options = Vec::new();
        for token in boxes {
            let (_, label) = groups
                .iter()
                .min_by_key(|(offset, _)| offset.abs_diff(token.offset))?;
            options.push(FieldOption {
                value: slugify(label),
                label: label.clone(),
                checked: token.checked,
            });
        }
        let options = dedupe_options(options);
        if options.len() < 2 {
            return None;
        }
        let title = self.heading.clone().unwrap_or_else(|| "Options".to_string());
        let mut key = slugify(&title);
        if key.is_empty() {
            key = format!("options_{i}");
        }
        let mut field = Field::new(&key, &title, FieldType::Dropdown).with_options(options, true);
        field.control.condition_list = is_condition_list(&title);
        self.push(field);
        Some(i + 2)
    }

    // --- blank fields ------------------------------------------------------

    fn blank_field(&mut self, i: usize) -> usize {
        if let Some(consumed) = self.try_yes_no(i) {
            return consumed;
        }

        let line = &self.lines[i];
        let parts = split_compound(line);
        match parts.len() {
            0 => {
                debug!("line {i} classified as blank field but yielded no label");
            }
            1 => {
                let field = simple_field(&parts[0]);
                self.push(field);
            }
            _ => {
                for part in &parts {
                    self.push(simple_field(part));
                }
            }
        }
        i + 1
    }

    // --- prose / terms -----------------------------------------------------

    fn prose_run(&mut self, i: usize) -> usize {
        let mut end = i;
        let mut paragraph = String::new();
        while end < self.lines.len() && self.classes[end] == LineClass::Prose {
            if !paragraph.is_empty() {
                paragraph.push(' ');
            }
            paragraph.push_str(self.lines[end].text.trim());
            end += 1;
        }

        let lower = paragraph.to_lowercase();
        let sentences = paragraph.matches(['.', '!', '?']).count();
        let has_vocab = CONSENT_VOCAB.iter().any(|v| lower.contains(v));
        if sentences >= 2 && paragraph.split_whitespace().count() >= 10 && has_vocab {
            let title = self
                .heading
                .clone()
                .unwrap_or_else(|| "Terms and Conditions".to_string());
            let key = {
                let k = slugify(&title);
                if k.is_empty() {
                    format!("terms_{i}")
                } else {
                    k
                }
            };
            let mut field = Field::new(&key, &title, FieldType::Terms);
            field.text = Some(paragraph);
            self.push(field);
        } else {
            debug!("dropping unmatched prose at line {i}");
        }
        end
    }
}

// --- free helpers ---------------------------------------------------------

/// Map a heading to a canonical section, when its wording gives one away.
fn section_for_heading(title: &str) -> Option<String> {
    let lower = title.to_lowercase();
    let section = if lower.contains("insurance") {
        "insurance"
    } else if lower.contains("emergency") {
        "emergency"
    } else if lower.contains("dental") {
        "dental_history"
    } else if lower.contains("medical") || lower.contains("health") || lower.contains("allerg") || lower.contains("medication") {
        "medical_history"
    } else if lower.contains("employ") || lower.contains("occupation") || lower.contains("work") {
        "employment"
    } else if lower.contains("consent")
        || lower.contains("authoriz")
        || lower.contains("acknowledg")
        || lower.contains("financial")
        || lower.contains("policy")
    {
        "consent"
    } else if lower.contains("signature") {
        "signature"
    } else if lower.contains("contact") || lower.contains("address") {
        "contact"
    } else if lower.contains("patient") || lower.contains("personal") {
        "patient"
    } else {
        return None;
    };
    Some(section.to_string())
}

fn is_condition_list(title: &str) -> bool {
    let lower = title.to_lowercase();
    CONDITION_LIST_HINTS.iter().any(|h| lower.contains(h))
}

/// (checkbox, label) pairs on a single line: each label runs from its box
/// to the next box.
fn checkbox_pairs(line: &Line) -> Vec<FieldOption> {
    let boxes = line.checkboxes();
    let mut pairs = Vec::new();
    for (idx, token) in boxes.iter().enumerate() {
        let end = boxes.get(idx + 1).map_or_else(|| line.char_len(), |n| n.offset);
        let label = line.slice(token.offset + 3, end).trim().to_string();
        if !label.is_empty() {
            pairs.push(FieldOption {
                value: slugify(&label),
                label,
                checked: token.checked,
            });
        }
    }
    pairs
}

/// Word groups on a text-only line, split on runs of 2+ spaces, with their
/// char start offsets.
fn word_groups(line: &Line) -> Vec<(usize, String)> {
    let chars: Vec<char> = line.text.chars().collect();
    let mut groups = Vec::new();
    let mut start = None;
    let mut spaces = 0;
    let mut cur = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            spaces += 1;
            if spaces >= 2 && !cur.trim().is_empty() {
                if let Some(s) = start.take() {
                    groups.push((s, cur.trim().to_string()));
                }
                cur.clear();
            } else if spaces < 2 {
                cur.push(c);
            }
        } else {
            if start.is_none() || cur.trim().is_empty() {
                start = Some(i);
                cur.clear();
            }
            spaces = 0;
            cur.push(c);
        }
    }
    if !cur.trim().is_empty() {
        if let Some(s) = start {
            groups.push((s, cur.trim().to_string()));
        }
    }
    groups
}

/// One labeled slot recovered from a blank-field line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LabeledSlot {
    pub label: String,
    pub parent: Option<String>,
}

/// Split a blank-field line into its labeled slots.
///
/// Mechanisms, in order: blank-run segmentation (text between fills),
/// explicit separators (`/`, `|`, comma before a capital), known-label
/// splitting inside a segment, and colon-label splitting for lines with
/// several `Label:` groups and no fills. A shared leading label (`Phone:
/// Mobile ... Home ...`) becomes the parent of every slot.
fn split_compound(line: &Line) -> Vec<LabeledSlot> {
    let runs = line.blank_runs();
    let mut segments: Vec<String> = Vec::new();

    if runs.is_empty() {
        // `City: State: Zip:` style lines
        for part in line.text.split(':') {
            let trimmed = part.trim().trim_matches(['/', '|', ',']).trim();
            if !trimmed.is_empty() {
                segments.push(trimmed.to_string());
            }
        }
    } else {
        let mut prev_end = 0;
        for run in runs {
            let raw = line.slice(prev_end, run.start);
            prev_end = run.end;
            let trimmed = raw.trim().trim_matches(['/', '|', ',']).trim().to_string();
            if !trimmed.is_empty() {
                segments.push(trimmed);
            }
        }
        // Trailing label after the last run means a missing fill; keep it.
        let tail = line.slice(prev_end, line.char_len());
        let tail = tail.trim().trim_matches(['/', '|', ',']).trim();
        if tail.len() >= 3 && tail.chars().any(char::is_alphabetic) {
            segments.push(tail.to_string());
        }
    }

    // A first segment of the form `Parent: Child` distributes the parent
    // over every slot.
    let mut parent: Option<String> = None;
    let multi = segments.len() > 1;
    if let Some(first) = segments.first_mut() {
        if let Some((before, after)) = first.split_once(':') {
            let before = before.trim();
            let after = after.trim();
            if !before.is_empty() && !after.is_empty() && multi {
                parent = Some(before.to_string());
                *first = after.to_string();
            }
        }
    }

    let mut slots = Vec::new();
    for segment in &segments {
        let cleaned = segment.trim_end_matches([':', '#']).trim().to_string();
        if cleaned.is_empty() {
            continue;
        }
        match split_known_labels(&cleaned) {
            Some(labels) => {
                for label in labels {
                    slots.push(LabeledSlot {
                        label,
                        parent: parent.clone(),
                    });
                }
            }
            None => slots.push(LabeledSlot {
                label: cleaned,
                parent: parent.clone(),
            }),
        }
    }
    slots
}

/// Split a segment that is a run of 2+ known labels (`State Zip`), longest
/// match first so `Date of Birth` is never shredded into `Date` + `Birth`.
/// Returns `None` unless the known labels cover essentially the whole
/// segment.
fn split_known_labels(text: &str) -> Option<Vec<String>> {
    // ASCII-only casefold keeps byte offsets aligned with `text`, so the
    // match spans below can slice it directly. The known labels are all
    // ASCII, so nothing is lost.
    let lower = text.to_ascii_lowercase();
    let mut taken: Vec<(usize, usize)> = Vec::new(); // byte spans, sorted later
    for label in KNOWN_LABELS {
        let mut from = 0;
        while let Some(pos) = lower[from..].find(label) {
            let start = from + pos;
            let end = start + label.len();
            from = end;
            // Word-boundary check
            let before_ok = start == 0
                || !lower.as_bytes()[start - 1].is_ascii_alphanumeric();
            let after_ok =
                end == lower.len() || !lower.as_bytes()[end].is_ascii_alphanumeric();
            if !before_ok || !after_ok {
                continue;
            }
            // Discard if inside an earlier (longer) match
            if taken.iter().any(|&(s, e)| start < e && end > s) {
                continue;
            }
            taken.push((start, end));
        }
    }
    if taken.len() < 2 {
        return None;
    }
    taken.sort_unstable();
    // Exactly two matches separated by a single space is more likely one
    // two-word label ("Work Address") than a compound; require a wider gap.
    if taken.len() == 2 {
        let between = &text[taken[0].1..taken[1].0];
        if !between.contains("  ") && !between.contains(['/', '|', ',']) {
            return None;
        }
    }
    let covered: usize = taken.iter().map(|(s, e)| e - s).sum();
    let alpha = text.chars().filter(|c| c.is_alphanumeric()).count();
    if covered * 10 < alpha * 8 {
        return None;
    }
    Some(
        taken
            .iter()
            .map(|&(s, e)| text[s..e].to_string())
            .collect(),
    )
}

/// Build a simple input field from one labeled slot, inferring the type
/// from label keywords.
fn simple_field(slot: &LabeledSlot) -> Field {
    let (title, key) = match &slot.parent {
        Some(parent) => (
            format!("{parent} ({})", slot.label),
            child_key(&slugify(parent), &slugify(&slot.label)),
        ),
        None => (slot.label.clone(), slugify(&slot.label)),
    };
    let lower = title.to_lowercase();
    let key = if key.is_empty() { "field".to_string() } else { key };

    if lower.contains("signature") {
        return Field::new(&key, &title, FieldType::Signature);
    }
    let slug = slugify(&slot.label);
    if slug == "state" || slug.ends_with("_state") {
        return Field::new(&key, &title, FieldType::States);
    }
    if lower.contains("date") || lower.contains("birth") || slug == "dob" {
        return Field::new(&key, &title, FieldType::Date);
    }

    let mut field = Field::input(&key, &title);
    field.control.kind = Some(input_kind(&lower));
    field
}

fn input_kind(lower: &str) -> InputKind {
    if lower.contains("phone") || lower.contains("mobile") || lower.contains("cell")
        || lower.contains("fax")
    {
        InputKind::Phone
    } else if lower.contains("email") || lower.contains("e-mail") {
        InputKind::Email
    } else if lower.contains("ssn") || lower.contains("social security") {
        InputKind::Ssn
    } else if lower.contains("zip") || lower.contains("postal") {
        InputKind::Zip
    } else if lower.contains("name") {
        InputKind::Name
    } else {
        InputKind::Text
    }
}

/// Drop options with empty or duplicate values, case-insensitively,
/// keeping first occurrences.
fn dedupe_options(options: Vec<FieldOption>) -> Vec<FieldOption> {
    let mut seen = std::collections::HashSet::new();
    options
        .into_iter()
        .filter(|opt| !opt.value.is_empty() && seen.insert(opt.value.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_label_fields() {
        let fields = extract_fields("First Name: ________\nDate of Birth: ________\n");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].key, "first_name");
        assert_eq!(fields[0].control.kind, Some(InputKind::Name));
        assert_eq!(fields[1].field_type, FieldType::Date);
    }

    #[test]
    fn test_compound_split_with_shared_parent() {
        let fields = extract_fields("Phone: Mobile ______ Home ______ Work ______\n");
        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["phone_mobile", "phone_home", "phone_work"],
            "shared parent label distributes over every slot"
        );
        assert!(fields
            .iter()
            .all(|f| f.control.kind == Some(InputKind::Phone)));
    }

    #[test]
    fn test_compound_independent_pairs() {
        let fields = extract_fields("First Name: ______ Last Name: ______\n");
        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["first_name", "last_name"]);
    }

    #[test]
    fn test_yes_no_conditional_synthesis() {
        let fields =
            extract_fields("Are you allergic? [ ] Yes [ ] No If yes, please explain: ______\n");
        assert_eq!(fields.len(), 2, "radio plus linked input: {fields:?}");
        assert_eq!(fields[0].field_type, FieldType::Radio);
        assert_eq!(fields[0].key, "are_you_allergic");
        let values: Vec<&str> = fields[0]
            .control
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["yes", "no"]);
        let link = fields[1]
            .control
            .condition
            .as_ref()
            .expect("detail carries a conditional link");
        assert_eq!(link.parent_key, "are_you_allergic");
        assert_eq!(link.expected_value, "yes");
    }

    #[test]
    fn test_if_yes_on_next_line() {
        let fields =
            extract_fields("Do you take any medications? [ ] Yes [ ] No\nIf yes, please list: ______\n");
        assert_eq!(fields.len(), 2);
        assert!(fields[1].control.condition.is_some());
    }

    #[test]
    fn test_inline_checkbox_group() {
        let fields = extract_fields("Marital Status: [ ] Single [ ] Married [ ] Divorced\n");
        assert_eq!(fields.len(), 1);
        let field = &fields[0];
        assert_eq!(field.field_type, FieldType::Radio);
        assert_eq!(field.title, "Marital Status");
        assert_eq!(field.control.options.len(), 3);
    }

    #[test]
    fn test_grid_under_heading_gets_section() {
        let fields = extract_fields(
            "MEDICAL HISTORY\n\
             [ ] Anemia        [ ] Asthma        [ ] Arthritis\n\
             [ ] Diabetes      [ ] Epilepsy      [ ] Glaucoma\n",
        );
        assert_eq!(fields.len(), 1);
        let field = &fields[0];
        assert_eq!(field.section.as_deref(), Some("medical_history"));
        assert!(field.control.multi);
        assert!(field.control.condition_list);
        assert_eq!(field.control.options.len(), 6);
    }

    #[test]
    fn test_orphaned_checkbox_pairing() {
        let fields = extract_fields(
            "ALLERGIES\n\
             [ ]           [ ]           [ ]\n\
             Aspirin       Codeine       Latex\n",
        );
        assert_eq!(fields.len(), 1, "one paired group: {fields:?}");
        let labels: Vec<&str> = fields[0]
            .control
            .options
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Aspirin", "Codeine", "Latex"]);
    }

    #[test]
    fn test_consent_paragraph_becomes_terms() {
        let fields = extract_fields(
            "FINANCIAL POLICY\n\
             I hereby authorize treatment and agree to be responsible for all charges incurred. \
             Payment is due at the time services are rendered.\n",
        );
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, FieldType::Terms);
        assert!(fields[0].text.as_deref().unwrap_or("").contains("authorize"));
        assert_eq!(fields[0].section.as_deref(), Some("consent"));
    }

    #[test]
    fn test_unmatched_lines_are_dropped() {
        let fields = extract_fields("random words here\n12345\n");
        assert!(fields.is_empty(), "no guessing on unmatched lines: {fields:?}");
    }

    #[test]
    fn test_signature_and_state_types() {
        let fields = extract_fields("Signature: ________\nState: ____\n");
        assert_eq!(fields[0].field_type, FieldType::Signature);
        assert_eq!(fields[1].field_type, FieldType::States);
    }

    #[test]
    fn test_known_label_splitting() {
        let slots = split_compound(&Line::new(0, "City State Zip: ______________".to_string()));
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["City", "State", "Zip"]);
    }

    #[test]
    fn test_known_label_splitting_survives_non_ascii() {
        // Multi-byte characters near a label must not shift the match
        // spans used to slice the original text.
        let slots = split_compound(&Line::new(0, "İCity  State  Zip: ______".to_string()));
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["City", "State", "Zip"]);

        let fields = extract_fields("Prénom  City  State  Zip: ______\n");
        assert!(!fields.is_empty(), "non-ASCII text extracts without panicking");
    }
}
