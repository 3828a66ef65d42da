//! Enumeration of the lines checked for a win.

use tracing::instrument;

/// Coordinates of one row, column or diagonal, in order.
pub type Line = Vec<(usize, usize)>;

/// Returns every line of an N×N board: N rows, N columns, then the main
/// diagonal and the anti-diagonal.
#[instrument(level = "trace")]
pub fn lines(size: usize) -> Vec<Line> {
    let mut lines = Vec::with_capacity(2 * size + 2);
    for i in 0..size {
        lines.push((0..size).map(|c| (i, c)).collect());
    }
    for i in 0..size {
        lines.push((0..size).map(|r| (r, i)).collect());
    }
    lines.push((0..size).map(|i| (i, i)).collect());
    lines.push((0..size).map(|i| (i, size - 1 - i)).collect());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count() {
        assert_eq!(lines(3).len(), 8);
        assert_eq!(lines(5).len(), 12);
    }

    #[test]
    fn test_diagonals() {
        let all = lines(3);
        assert_eq!(all[6], vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(all[7], vec![(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_every_line_has_size_cells() {
        assert!(lines(4).iter().all(|line| line.len() == 4));
    }
}
