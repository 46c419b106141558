//! Consolidation: the ordered, idempotent passes that turn the raw
//! extracted field list into final output.
//!
//! Passes: dedupe by key, section inference, condition-list merging,
//! section ordering, validation. Every pass is total and yields the same
//! result when re-run on its own output.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use formlift_core::{section_rank, Field, FieldType};

use crate::sections::SectionConfig;

/// Runs the consolidation passes with an injected section configuration.
#[derive(Debug, Clone, Default)]
pub struct Consolidator {
    config: SectionConfig,
}

impl Consolidator {
    #[must_use]
    pub fn new(config: SectionConfig) -> Self {
        Consolidator { config }
    }

    /// Run all passes. Section inference runs before condition-list
    /// merging so that a list re-homed into a section merges with the
    /// lists already there; merging first would leave the combined result
    /// dependent on how many times consolidation ran.
    #[must_use]
    pub fn consolidate(&self, fields: Vec<Field>) -> Vec<Field> {
        let fields = dedupe_by_key(fields);
        let fields = self.infer_sections(fields);
        let fields = merge_condition_lists(fields);
        let fields = order_sections(fields);
        validate(fields)
    }

    /// Pass 2: re-home unsectioned fields by vocabulary scoring. A
    /// vocabulary wins only when its match count beats the runner-up by
    /// the configured margin; otherwise the fallback section applies.
    fn infer_sections(&self, mut fields: Vec<Field>) -> Vec<Field> {
        for field in &mut fields {
            if field.section.is_some() {
                continue;
            }
            let haystack = field_haystack(field);
            let mut scores: Vec<(usize, &str)> = self
                .config
                .vocabularies
                .iter()
                .map(|v| (v.score(&haystack), v.section.as_str()))
                .collect();
            scores.sort_by(|a, b| b.0.cmp(&a.0));
            let winner = match (scores.first(), scores.get(1)) {
                (Some(&(best, section)), Some(&(second, _)))
                    if best >= second + self.config.margin =>
                {
                    section
                }
                (Some(&(best, section)), None) if best >= self.config.margin => section,
                _ => self.config.fallback.as_str(),
            };
            debug!("re-homing `{}` into section `{winner}`", field.key);
            field.section = Some(winner.to_string());
        }
        fields
    }
}

/// Everything worth scoring about a field, lowercased.
fn field_haystack(field: &Field) -> String {
    let mut haystack = field.title.to_lowercase();
    haystack.push(' ');
    haystack.push_str(&field.key);
    for opt in &field.control.options {
        haystack.push(' ');
        haystack.push_str(&opt.label.to_lowercase());
    }
    haystack
}

/// Pass 1: collapse same-key fields, keeping the first occurrence.
fn dedupe_by_key(fields: Vec<Field>) -> Vec<Field> {
    let mut seen = HashSet::new();
    fields
        .into_iter()
        .filter(|field| {
            let keep = seen.insert(field.key.clone());
            if !keep {
                debug!("dropping duplicate field `{}`", field.key);
            }
            keep
        })
        .collect()
}

/// Pass 3: union condition-list dropdowns within the same section into the
/// first one, deduplicating options case-insensitively.
fn merge_condition_lists(fields: Vec<Field>) -> Vec<Field> {
    let mut out: Vec<Field> = Vec::with_capacity(fields.len());
    let mut anchor: HashMap<Option<String>, usize> = HashMap::new();

    for field in fields {
        let mergeable = field.control.condition_list
            && field.field_type == FieldType::Dropdown;
        if !mergeable {
            out.push(field);
            continue;
        }
        match anchor.get(&field.section) {
            Some(&idx) => {
                debug!(
                    "merging condition list `{}` into `{}`",
                    field.key, out[idx].key
                );
                let existing: HashSet<String> = out[idx]
                    .control
                    .options
                    .iter()
                    .map(|o| o.value.to_lowercase())
                    .collect();
                for opt in field.control.options {
                    if !existing.contains(&opt.value.to_lowercase()) {
                        out[idx].control.options.push(opt);
                    }
                }
            }
            None => {
                anchor.insert(field.section.clone(), out.len());
                out.push(field);
            }
        }
    }
    out
}

/// Pass 4: stable sort into canonical section order.
fn order_sections(mut fields: Vec<Field>) -> Vec<Field> {
    fields.sort_by_key(|f| section_rank(f.section.as_deref()));
    fields
}

/// Pass 5: validation. Violations are logged and repaired, never fatal.
fn validate(mut fields: Vec<Field>) -> Vec<Field> {
    // Exactly one signature field is expected.
    let signatures = fields
        .iter()
        .filter(|f| f.field_type == FieldType::Signature)
        .count();
    if signatures != 1 {
        warn!("expected exactly one signature field, found {signatures}");
    }

    // Options must carry non-empty values.
    for field in &mut fields {
        let before = field.control.options.len();
        field.control.options.retain(|o| !o.value.is_empty());
        if field.control.options.len() != before {
            warn!("dropped empty-valued options from `{}`", field.key);
        }
    }

    // Radio/dropdown fields need at least one option to render.
    fields.retain(|f| {
        let ok = !f.field_type.requires_options() || !f.control.options.is_empty();
        if !ok {
            warn!("dropping optionless {:?} field `{}`", f.field_type, f.key);
        }
        ok
    });

    // Keys must be globally unique; rename stragglers with a stable
    // numeric suffix.
    let mut seen: HashMap<String, usize> = HashMap::new();
    for field in &mut fields {
        let count = seen.entry(field.key.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            let renamed = format!("{}_{count}", field.key);
            warn!("renaming duplicate key `{}` to `{renamed}`", field.key);
            field.key = renamed;
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use formlift_core::FieldOption;

    #[test]
    fn test_dedupe_keeps_first() {
        let a = Field::input("name", "Name A");
        let b = Field::input("name", "Name B");
        let out = dedupe_by_key(vec![a.clone(), b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Name A");
    }

    #[test]
    fn test_merge_condition_lists_same_section() {
        let mut a = Field::new("medical_history", "Medical History", FieldType::Dropdown)
            .with_options(
                vec![FieldOption::from_label("Asthma"), FieldOption::from_label("Anemia")],
                true,
            );
        a.control.condition_list = true;
        a.section = Some("medical_history".to_string());
        let mut b = Field::new("conditions", "Conditions", FieldType::Dropdown).with_options(
            vec![FieldOption::from_label("asthma"), FieldOption::from_label("Diabetes")],
            true,
        );
        b.control.condition_list = true;
        b.section = Some("medical_history".to_string());

        let out = merge_condition_lists(vec![a, b]);
        assert_eq!(out.len(), 1, "same-section condition lists merge");
        let values: Vec<&str> =
            out[0].control.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["asthma", "anemia", "diabetes"], "case-insensitive union");
    }

    #[test]
    fn test_section_inference_needs_margin() {
        let consolidator = Consolidator::default();
        let mut decisive = Field::new("q1", "Do you have heart disease or diabetes", FieldType::Input);
        decisive.section = None;
        let mut ambiguous = Field::new("q2", "General question", FieldType::Input);
        ambiguous.section = None;
        let out = consolidator.infer_sections(vec![decisive, ambiguous]);
        assert_eq!(out[0].section.as_deref(), Some("medical_history"));
        assert_eq!(out[1].section.as_deref(), Some("general"), "no decisive winner falls back");
    }

    #[test]
    fn test_order_sections_is_stable() {
        let mut a = Field::input("sig", "Signature");
        a.section = Some("signature".to_string());
        let mut b = Field::input("first", "First");
        b.section = Some("patient".to_string());
        let mut c = Field::input("second", "Second");
        c.section = Some("patient".to_string());
        let out = order_sections(vec![a, b, c]);
        let keys: Vec<&str> = out.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "sig"]);
    }

    #[test]
    fn test_validate_drops_optionless_radio() {
        let bad = Field::new("broken", "Broken", FieldType::Radio);
        let good = Field::input("ok", "Ok");
        let out = validate(vec![bad, good]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key, "ok");
    }

    #[test]
    fn test_consolidate_is_idempotent() {
        let consolidator = Consolidator::default();
        let mut sig = Field::new("signature", "Signature", FieldType::Signature);
        sig.section = Some("signature".to_string());
        let fields = vec![
            Field::input("first_name", "First Name"),
            Field::input("first_name", "First Name"),
            radio_field("smoker", None),
            sig,
        ];
        let once = consolidator.consolidate(fields);
        let twice = consolidator.consolidate(once.clone());
        assert_eq!(once, twice, "consolidation must be a fixpoint on its own output");
    }

    fn radio_field(key: &str, section: Option<&str>) -> Field {
        let mut field = Field::new(key, key, FieldType::Radio).with_options(
            vec![FieldOption::from_label("Yes"), FieldOption::from_label("No")],
            false,
        );
        field.section = section.map(str::to_string);
        field
    }
}
