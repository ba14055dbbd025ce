//! Scoring module - line clear points
//!
//! Score is a pure function of how many rows a single lock cleared. There is
//! no level multiplier, no combo and no decay; deltas add to a running total.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows in one lock.
///
/// More than four rows cannot come from a single piece on a clean board and
/// falls outside the table, so it scores nothing.
///
/// # Examples
///
/// ```
/// use cube_tetris_core::calculate_line_score;
///
/// assert_eq!(calculate_line_score(0), 0);
/// assert_eq!(calculate_line_score(4), 800);
/// assert_eq!(calculate_line_score(5), 0);
/// ```
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Add the delta for `lines` to `total`, saturating at `u32::MAX`.
pub fn apply_line_score(total: u32, lines: usize) -> u32 {
    total.saturating_add(calculate_line_score(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values() {
        assert_eq!(calculate_line_score(0), 0);
        assert_eq!(calculate_line_score(1), 100);
        assert_eq!(calculate_line_score(2), 300);
        assert_eq!(calculate_line_score(3), 500);
        assert_eq!(calculate_line_score(4), 800);
    }

    #[test]
    fn beyond_table_is_unscored() {
        for lines in 5..=20 {
            assert_eq!(calculate_line_score(lines), 0);
        }
    }

    #[test]
    fn totals_accumulate() {
        let total = apply_line_score(0, 1);
        let total = apply_line_score(total, 4);
        let total = apply_line_score(total, 0);
        assert_eq!(total, 900);
        assert_eq!(apply_line_score(u32::MAX, 4), u32::MAX);
    }
}
