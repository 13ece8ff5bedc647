//! Bounded Levenshtein distance
//!
//! Edit distance with hard bounds so adversarial input cannot degrade the
//! analyzer: operands are truncated to 50 characters, a length difference
//! above 3 exits immediately, and the DP uses a single row of
//! O(min(m, n)) cells.

/// Operand truncation limit.
const MAX_OPERAND_LEN: usize = 50;
/// Length difference beyond which the distance is not worth computing.
const MAX_LENGTH_DIFF: usize = 3;
/// Sentinel returned by the early exit, larger than any usable distance.
pub const DISTANCE_CUTOFF: usize = usize::MAX;

/// Bounded edit distance between two strings.
///
/// Returns [`DISTANCE_CUTOFF`] when the length difference exceeds 3.
pub fn bounded_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().take(MAX_OPERAND_LEN).collect();
    let b: Vec<char> = b.chars().take(MAX_OPERAND_LEN).collect();

    if a.len().abs_diff(b.len()) > MAX_LENGTH_DIFF {
        return DISTANCE_CUTOFF;
    }

    // Keep the shorter operand on the row.
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();

    for (i, lc) in long.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };
            let next = (row[j] + 1).min(row[j + 1] + 1).min(prev_diag + cost);
            prev_diag = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[short.len()]
}
