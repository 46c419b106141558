//! End-to-end tests over a realistic intake form.

use std::collections::HashSet;

use formlift_core::FieldType;
use formlift_pipeline::FormExtractor;

const INTAKE_FORM: &str = "\
Lakeside Dental Group   142 Main Street   Springfield, IL 62704
P A T I E N T  I N F O R M A T I O N
First Name: ____________  Last Name: ____________
Date of Birth: __________  SSN: __________
Phone: Mobile __________ Home __________ Work __________
Address: ________________________
City: ____________ State: ____ Zip: ________

MEDICAL HISTORY
Are you under a physician's care? [ ] Yes [ ] No If yes, please explain: ______
Please mark any of the following:
[ ] Anemia        [ ] Asthma        [ ] Arthritis
[ ] Diabetes      [ ] Epilepsy      [ ] Glaucoma
[ ] Hepatitis     [ ] Jaundice      [ ] Heart Disease

FINANCIAL POLICY
I hereby authorize treatment and agree to be responsible for all charges. \
Payment is due in full at the time services are rendered.

Signature: ________________  Date: ________
Page 1 of 1
";

#[test]
fn test_full_form_extraction() {
    let extractor = FormExtractor::new();
    let fields = extractor.extract(INTAKE_FORM);

    let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();

    // Canonicalized identity fields
    assert!(keys.contains(&"first_name"), "keys: {keys:?}");
    assert!(keys.contains(&"last_name"));
    assert!(keys.contains(&"date_of_birth"));
    assert!(keys.contains(&"ssn"));

    // Compound phone line split into three canonical fields
    assert!(keys.contains(&"cell_phone"), "Phone (Mobile) canonicalizes: {keys:?}");
    assert!(keys.contains(&"home_phone"));
    assert!(keys.contains(&"work_phone"));

    // Address block
    assert!(keys.contains(&"city"));
    assert!(keys.contains(&"state"));
    assert!(keys.contains(&"zip"));

    // Yes/No with conditional follow-up
    let radio = fields
        .iter()
        .find(|f| f.key == "are_you_under_a_physician_s_care")
        .expect("physician-care radio extracted");
    assert_eq!(radio.field_type, FieldType::Radio);
    let detail = fields
        .iter()
        .find(|f| f.control.condition.is_some())
        .expect("conditional detail field extracted");
    assert_eq!(
        detail.control.condition.as_ref().unwrap().parent_key,
        radio.key
    );

    // The 3x3 grid comes through as one multi-select with all nine options
    let grid = fields
        .iter()
        .find(|f| f.control.multi)
        .expect("grid field extracted");
    assert_eq!(grid.control.options.len(), 9);
    assert!(grid.control.options.iter().any(|o| o.label == "Heart Disease"));
    assert_eq!(grid.section.as_deref(), Some("medical_history"));

    // Consent paragraph and signature line
    assert!(fields.iter().any(|f| f.field_type == FieldType::Terms));
    assert_eq!(
        fields.iter().filter(|f| f.field_type == FieldType::Signature).count(),
        1
    );
}

#[test]
fn test_key_uniqueness() {
    let extractor = FormExtractor::new();
    let fields = extractor.extract(INTAKE_FORM);
    let mut seen = HashSet::new();
    for field in &fields {
        assert!(seen.insert(&field.key), "duplicate key `{}` in output", field.key);
        assert!(!field.key.is_empty());
    }
}

#[test]
fn test_option_invariants() {
    let extractor = FormExtractor::new();
    let fields = extractor.extract(INTAKE_FORM);
    for field in &fields {
        if field.field_type.requires_options() {
            assert!(
                !field.control.options.is_empty(),
                "`{}` is {:?} without options",
                field.key,
                field.field_type
            );
        }
        let mut values = HashSet::new();
        for opt in &field.control.options {
            assert!(!opt.value.is_empty(), "empty option value in `{}`", field.key);
            assert!(
                values.insert(&opt.value),
                "duplicate option value `{}` in `{}`",
                opt.value,
                field.key
            );
        }
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let extractor = FormExtractor::new();
    let first = extractor.extract(INTAKE_FORM);
    let second = extractor.extract(INTAKE_FORM);
    assert_eq!(first, second);
}

#[test]
fn test_section_order_is_stable() {
    let extractor = FormExtractor::new();
    let fields = extractor.extract(INTAKE_FORM);
    let sections: Vec<Option<&str>> = fields.iter().map(|f| f.section.as_deref()).collect();

    // Patient fields come before medical history, which comes before
    // consent and signature.
    let pos = |section: &str| sections.iter().position(|s| *s == Some(section));
    let patient = pos("patient").expect("patient section present");
    let medical = pos("medical_history").expect("medical section present");
    let consent = pos("consent").expect("consent section present");
    let signature = pos("signature").expect("signature section present");
    assert!(patient < medical && medical < consent && consent < signature);
}
