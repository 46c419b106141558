//! Section keyword vocabularies.
//!
//! The vocabularies drive re-homing of unsectioned fields during
//! consolidation. They are an injected, immutable configuration value, not
//! a module-level singleton, so alternative domain pairs can be swapped in
//! without touching the consolidator.

/// One labeled keyword vocabulary.
#[derive(Debug, Clone)]
pub struct SectionVocabulary {
    /// Section assigned when this vocabulary wins the scoring.
    pub section: String,
    pub keywords: Vec<String>,
}

impl SectionVocabulary {
    #[must_use]
    pub fn new(section: &str, keywords: &[&str]) -> Self {
        SectionVocabulary {
            section: section.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// Number of keywords present in the haystack.
    #[must_use]
    pub fn score(&self, haystack: &str) -> usize {
        self.keywords.iter().filter(|k| haystack.contains(k.as_str())).count()
    }
}

/// Immutable section-inference configuration passed into the consolidator.
#[derive(Debug, Clone)]
pub struct SectionConfig {
    pub vocabularies: Vec<SectionVocabulary>,
    /// Margin by which the winning vocabulary must beat the runner-up.
    pub margin: usize,
    /// Section assigned when no vocabulary wins decisively.
    pub fallback: String,
}

impl Default for SectionConfig {
    fn default() -> Self {
        SectionConfig {
            vocabularies: vec![
                SectionVocabulary::new(
                    "medical_history",
                    &[
                        "medical", "physician", "doctor", "medication", "disease",
                        "illness", "surgery", "hospital", "allerg", "health",
                        "condition", "pregnan", "blood", "heart", "asthma",
                        "diabetes", "anemia", "epilepsy",
                    ],
                ),
                SectionVocabulary::new(
                    "dental_history",
                    &[
                        "dental", "dentist", "tooth", "teeth", "gum", "oral",
                        "bite", "floss", "brush", "crown", "filling",
                        "orthodontic", "extraction", "cavity", "gingivitis",
                    ],
                ),
            ],
            margin: 2,
            fallback: "general".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_two_vocabularies() {
        let config = SectionConfig::default();
        assert_eq!(config.vocabularies.len(), 2);
        assert_eq!(config.margin, 2);
    }

    #[test]
    fn test_scoring() {
        let config = SectionConfig::default();
        let medical = &config.vocabularies[0];
        assert!(medical.score("do you have heart disease or diabetes") >= 2);
        assert_eq!(medical.score("favorite color"), 0);
    }
}
