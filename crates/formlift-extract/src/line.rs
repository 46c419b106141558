//! Line model with derived token attributes.
//!
//! A [`Line`] wraps one normalized text line plus everything the later
//! stages need to know about it: checkbox token positions, colon-terminated
//! label count, blank-run spans. All offsets are character offsets (glyph
//! normalization has already mapped checkboxes to ASCII, but labels may
//! still carry non-ASCII text).

use std::sync::LazyLock;

use regex::Regex;

/// Canonical checkbox token after normalization: `[ ]` unchecked, `[x]`
/// checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxToken {
    /// Character offset of the opening bracket.
    pub offset: usize,
    pub checked: bool,
}

/// Span of a blank run (underscores or dot leaders) in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankRun {
    pub start: usize,
    pub end: usize,
}

static RE_BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{3,}|\.{4,}").expect("regex is compile-time constant"));

/// One normalized line with derived attributes, built once and read by
/// every later stage.
#[derive(Debug, Clone)]
pub struct Line {
    /// Zero-based index in the normalized line sequence.
    pub index: usize,
    pub text: String,
    chars: Vec<char>,
    checkboxes: Vec<CheckboxToken>,
    blank_runs: Vec<BlankRun>,
}

impl Line {
    #[must_use]
    pub fn new(index: usize, text: String) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let checkboxes = scan_checkboxes(&chars);
        let blank_runs = scan_blank_runs(&text);
        Line {
            index,
            text,
            chars,
            checkboxes,
            blank_runs,
        }
    }

    /// Checkbox tokens in left-to-right order.
    #[must_use]
    pub fn checkboxes(&self) -> &[CheckboxToken] {
        &self.checkboxes
    }

    /// Blank runs (underscore or dot-leader fills) in left-to-right order.
    #[must_use]
    pub fn blank_runs(&self) -> &[BlankRun] {
        &self.blank_runs
    }

    /// Character count of the raw text, trailing whitespace included.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whitespace-separated word count of the raw text.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Substring by character offsets, clamped to the line length.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Number of colon-terminated labels: colons directly following a word
    /// character. Used to keep multi-label lines out of the heading class.
    #[must_use]
    pub fn colon_label_count(&self) -> usize {
        self.chars
            .windows(2)
            .filter(|w| w[0].is_alphanumeric() && w[1] == ':')
            .count()
    }

    /// True when some pair of adjacent checkboxes is separated by a run of
    /// at least `min_gap` whitespace characters.
    #[must_use]
    pub fn has_checkbox_gap(&self, min_gap: usize) -> bool {
        self.checkboxes.windows(2).any(|pair| {
            let between = &self.chars[pair[0].offset..pair[1].offset];
            longest_space_run(between) >= min_gap
        })
    }

    /// True when every alphabetic character is uppercase and at least two
    /// letters are present.
    #[must_use]
    pub fn is_all_caps(&self) -> bool {
        let letters: Vec<char> = self.chars.iter().copied().filter(|c| c.is_alphabetic()).collect();
        letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
    }

    /// True when the trimmed text ends in sentence-terminal punctuation.
    #[must_use]
    pub fn ends_sentence(&self) -> bool {
        matches!(self.text.trim_end().chars().last(), Some('.' | '!' | '?'))
    }
}

fn scan_checkboxes(chars: &[char]) -> Vec<CheckboxToken> {
    let mut out = Vec::new();
    let mut i = 0;
    while i + 2 < chars.len() {
        if chars[i] == '[' && chars[i + 2] == ']' {
            match chars[i + 1] {
                ' ' => {
                    out.push(CheckboxToken {
                        offset: i,
                        checked: false,
                    });
                    i += 3;
                    continue;
                }
                'x' | 'X' => {
                    out.push(CheckboxToken {
                        offset: i,
                        checked: true,
                    });
                    i += 3;
                    continue;
                }
                _ => {}
            }
        }
        i += 1;
    }
    out
}

fn scan_blank_runs(text: &str) -> Vec<BlankRun> {
    // Regex works on byte offsets; re-map to char offsets.
    RE_BLANK_RUN
        .find_iter(text)
        .map(|m| BlankRun {
            start: text[..m.start()].chars().count(),
            end: text[..m.end()].chars().count(),
        })
        .collect()
}

fn longest_space_run(chars: &[char]) -> usize {
    let mut best = 0;
    let mut run = 0;
    for &c in chars {
        if c == ' ' {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}
