//! Multi-column checkbox grid detection.
//!
//! A grid is a run of checkbox rows whose boxes line up in columns, the
//! serialized remains of a multi-column option table. Geometry is gone, so
//! columns are recovered by clustering checkbox offsets across rows and
//! assigning each box to the nearest cluster. The "nearest" part matters:
//! picking the first boundary at-or-past an offset systematically shifts
//! assignments when a label runs long, so assignment is by minimum absolute
//! distance.

use crate::classify::LineClass;
use crate::line::Line;

/// Offsets within this distance of a cluster center join that cluster.
const COLUMN_TOLERANCE: usize = 3;
/// A run of this many spaces inside a label is overflow into the next
/// column.
const OVERFLOW_GAP: usize = 5;

/// One option recovered from a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    pub label: String,
    pub column: usize,
    pub checked: bool,
}

/// A detected multi-column checkbox table, fully consumed into fields by
/// the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBlock {
    /// First row line index.
    pub start: usize,
    /// Last row line index, inclusive.
    pub end: usize,
    /// Column start offsets, ascending.
    pub columns: Vec<usize>,
    /// Single header line used as the group title, when present.
    pub title: Option<String>,
    /// Line index the title/category header was taken from, if any.
    pub header_line: Option<usize>,
    /// Ordered (label, column) items, row-major.
    pub items: Vec<GridItem>,
}

/// Try to read a grid starting at `start`, which must be a
/// `GridRowCandidate` line. Returns `None` when the run does not hold up as
/// a genuine grid (the caller then falls back to per-line extraction).
#[must_use]
pub fn detect_grid(lines: &[Line], classes: &[LineClass], start: usize) -> Option<GridBlock> {
    let rows = collect_run(lines, classes, start);
    if rows.len() < 2 {
        return None;
    }

    let columns = cluster_columns(lines, &rows)?;
    if columns.len() < 2 {
        return None;
    }

    // Most rows must carry the full column count for the run to read as a
    // table rather than scattered inline groups.
    let full_rows = rows
        .iter()
        .filter(|&&r| lines[r].checkboxes().len() == columns.len())
        .count();
    if full_rows * 2 < rows.len() {
        return None;
    }

    let (title, categories, header_line) = detect_headers(lines, classes, start, columns.len());

    let mut items = Vec::new();
    for &row in &rows {
        extract_row_items(&lines[row], &columns, &categories, &mut items);
    }
    if items.is_empty() {
        return None;
    }

    Some(GridBlock {
        start,
        end: *rows.last().unwrap_or(&start),
        columns,
        title,
        header_line,
        items,
    })
}

/// Maximal run of checkbox rows starting at `start`, broken by any
/// non-checkbox line.
fn collect_run(lines: &[Line], classes: &[LineClass], start: usize) -> Vec<usize> {
    let mut rows = Vec::new();
    let mut i = start;
    while i < lines.len()
        && matches!(
            classes[i],
            LineClass::GridRowCandidate | LineClass::CheckboxLine
        )
    {
        rows.push(i);
        i += 1;
    }
    rows
}

/// Greedily cluster checkbox offsets across rows into column start
/// positions. An offset joins the nearest cluster within tolerance,
/// otherwise it opens a new one.
fn cluster_columns(lines: &[Line], rows: &[usize]) -> Option<Vec<usize>> {
    let mut offsets: Vec<usize> = rows
        .iter()
        .flat_map(|&r| lines[r].checkboxes().iter().map(|t| t.offset))
        .collect();
    if offsets.is_empty() {
        return None;
    }
    offsets.sort_unstable();

    // (sum, count) per cluster; centers drift as members join.
    let mut clusters: Vec<(usize, usize)> = Vec::new();
    for off in offsets {
        let nearest = clusters
            .iter()
            .enumerate()
            .min_by_key(|(_, &(sum, count))| center(sum, count).abs_diff(off))
            .map(|(idx, &(sum, count))| (idx, center(sum, count).abs_diff(off)));
        match nearest {
            Some((idx, dist)) if dist <= COLUMN_TOLERANCE => {
                clusters[idx].0 += off;
                clusters[idx].1 += 1;
            }
            _ => clusters.push((off, 1)),
        }
    }

    let mut columns: Vec<usize> = clusters.iter().map(|&(s, c)| center(s, c)).collect();
    columns.sort_unstable();
    Some(columns)
}

fn center(sum: usize, count: usize) -> usize {
    sum / count.max(1)
}

/// Column index with minimum absolute distance to `offset`.
fn nearest_column(columns: &[usize], offset: usize) -> usize {
    columns
        .iter()
        .enumerate()
        .min_by_key(|(_, &c)| c.abs_diff(offset))
        .map_or(0, |(i, _)| i)
}

/// Look for a category-header line immediately above the run: short,
/// checkbox-free, splittable on `/`, `|`, or 3+-space runs into at most
/// one segment per column. One segment reads as a block title; several
/// read as per-column categories, the last one covering any remaining
/// columns.
fn detect_headers(
    lines: &[Line],
    classes: &[LineClass],
    start: usize,
    column_count: usize,
) -> (Option<String>, Vec<String>, Option<usize>) {
    let Some(idx) = start.checked_sub(1) else {
        return (None, Vec::new(), None);
    };
    let line = &lines[idx];
    if line.is_empty()
        || !line.checkboxes().is_empty()
        || classes[idx] == LineClass::Prose
        || line.word_count() > 10
    {
        return (None, Vec::new(), None);
    }

    let segments = split_header(&line.text);
    if segments.is_empty() || segments.len() > column_count {
        return (None, Vec::new(), None);
    }
    if segments.len() == 1 {
        return (Some(segments[0].clone()), Vec::new(), Some(idx));
    }

    // Fewer headers than columns: the last header applies to the rest.
    let mut categories = Vec::with_capacity(column_count);
    for col in 0..column_count {
        let seg = segments.get(col).unwrap_or_else(|| {
            segments.last().expect("segments checked non-empty")
        });
        categories.push(seg.clone());
    }
    (None, categories, Some(idx))
}

fn split_header(text: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for part in text.split(['/', '|']) {
        for piece in split_on_space_runs(part, 3) {
            let cleaned = piece.trim().trim_end_matches(':').trim().to_string();
            if !cleaned.is_empty() {
                segments.push(cleaned);
            }
        }
    }
    segments
}

fn split_on_space_runs(text: &str, min_run: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut pieces = Vec::new();
    let mut cur = String::new();
    let mut spaces = 0;
    for &c in &chars {
        if c == ' ' {
            spaces += 1;
        } else {
            if spaces >= min_run && !cur.trim().is_empty() {
                pieces.push(std::mem::take(&mut cur));
            } else if spaces > 0 {
                cur.push_str(&" ".repeat(spaces));
            }
            spaces = 0;
            cur.push(c);
        }
    }
    if !cur.trim().is_empty() {
        pieces.push(cur);
    }
    pieces
}

/// Pull this row's items: one per checkbox, plus text-only items for
/// uncovered columns whose slice holds real content.
fn extract_row_items(
    line: &Line,
    columns: &[usize],
    categories: &[String],
    items: &mut Vec<GridItem>,
) {
    let tokens = line.checkboxes();
    let mut covered = vec![false; columns.len()];
    // (offset, column, label, checked); sorted by offset at the end so
    // reading order survives.
    let mut row_items: Vec<(usize, usize, String, bool)> = Vec::new();
    let mut label_ends: Vec<usize> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        let col = nearest_column(columns, token.offset);
        covered[col] = true;
        let label_start = token.offset + 3; // past "[ ]"
        let label_end = tokens
            .get(i + 1)
            .map_or_else(|| line.char_len(), |next| next.offset);
        let raw = line.slice(label_start, label_end);
        let label = truncate_overflow(&raw);
        label_ends.push(label_start + label.chars().count());
        if !label.trim().is_empty() {
            row_items.push((token.offset, col, label.trim().to_string(), token.checked));
        }
    }

    // Uncovered columns may still hold a text-only item (a row that lost
    // its checkbox on this column during serialization).
    if tokens.len() < columns.len() && !tokens.is_empty() {
        let max_label_end = label_ends.iter().copied().max().unwrap_or(0);
        for (col, &col_start) in columns.iter().enumerate() {
            if covered[col] {
                continue;
            }
            let seg_start = if col_start < max_label_end && col + 1 < columns.len() {
                // A genuine long label already covers this slice start
                col_start.max(
                    label_ends
                        .iter()
                        .copied()
                        .filter(|&e| e <= columns[col + 1])
                        .max()
                        .unwrap_or(col_start),
                )
            } else {
                col_start
            };
            let seg_end = columns.get(col + 1).copied().unwrap_or_else(|| line.char_len());
            let text = line.slice(seg_start, seg_end);
            let text = text.trim();
            if text.len() >= 3 && !is_category_token(text) {
                row_items.push((seg_start, col, text.to_string(), false));
            }
        }
    }

    row_items.sort_by_key(|&(offset, _, _, _)| offset);
    for (_, col, label, checked) in row_items {
        let label = match categories.get(col) {
            Some(cat) => format!("{cat}: {label}"),
            None => label,
        };
        items.push(GridItem {
            label,
            column: col,
            checked,
        });
    }
}

/// Cut a label at the first overflow gap (a run of 5+ spaces), keeping the
/// text up to the last word boundary before it.
fn truncate_overflow(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut spaces = 0;
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            spaces += 1;
            if spaces >= OVERFLOW_GAP {
                let cut = i + 1 - spaces; // first space of the run
                return chars[..cut].iter().collect::<String>().trim_end().to_string();
            }
        } else {
            spaces = 0;
        }
    }
    raw.trim_end().to_string()
}

/// Short category/label tokens are headers that bled into a row slice, not
/// content.
fn is_category_token(text: &str) -> bool {
    let words = text.split_whitespace().count();
    if words > 2 {
        return false;
    }
    text.ends_with(':')
        || text
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase())
}
