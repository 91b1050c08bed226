//! Grid edge handling.

use littoral_core::CellPos;

/// How the grid treats columns beyond its left and right edges.
///
/// Rows are never periodic: above row 0 lies open sea and below the last
/// row lies land that continues off the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds columns leave the grid; shoreline chains end in a
    /// boundary sentinel there.
    #[default]
    Absorb,
    /// Out-of-bounds columns wrap to the opposite side (periodic coast).
    Wrap,
}

/// A grid edge that a shoreline chain can leave through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridEdge {
    /// Beyond column 0.
    Left,
    /// Beyond the last column.
    Right,
    /// Beyond the last row.
    Bottom,
}

/// Outcome of looking up a possibly out-of-bounds position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// An on-grid cell (after column wrapping).
    Cell(CellPos),
    /// Open sea above row 0.
    Sea,
    /// Off the grid through the given edge.
    Exit(GridEdge),
}

/// Resolve a column under the given edge behavior.
/// Returns `None` for Absorb out-of-bounds.
pub(crate) fn resolve_col(col: i64, cols: usize, edge: EdgeBehavior) -> Option<usize> {
    let n = cols as i64;
    if (0..n).contains(&col) {
        return Some(col as usize);
    }
    match edge {
        EdgeBehavior::Absorb => None,
        EdgeBehavior::Wrap => Some(col.rem_euclid(n) as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_col_in_bounds() {
        assert_eq!(resolve_col(2, 5, EdgeBehavior::Absorb), Some(2));
        assert_eq!(resolve_col(0, 5, EdgeBehavior::Wrap), Some(0));
    }

    #[test]
    fn resolve_col_absorb_out_of_bounds() {
        assert_eq!(resolve_col(-1, 5, EdgeBehavior::Absorb), None);
        assert_eq!(resolve_col(5, 5, EdgeBehavior::Absorb), None);
    }

    #[test]
    fn resolve_col_wrap() {
        assert_eq!(resolve_col(-1, 5, EdgeBehavior::Wrap), Some(4));
        assert_eq!(resolve_col(5, 5, EdgeBehavior::Wrap), Some(0));
        assert_eq!(resolve_col(7, 5, EdgeBehavior::Wrap), Some(2));
    }

    proptest::proptest! {
        #[test]
        fn wrap_always_lands_on_the_grid(col in -1000i64..1000, cols in 1usize..64) {
            let resolved = resolve_col(col, cols, EdgeBehavior::Wrap);
            proptest::prop_assert!(matches!(resolved, Some(c) if c < cols));
            proptest::prop_assert_eq!(resolved, Some(col.rem_euclid(cols as i64) as usize));
        }

        #[test]
        fn absorb_keeps_exactly_the_in_range_columns(col in -100i64..100, cols in 1usize..64) {
            let resolved = resolve_col(col, cols, EdgeBehavior::Absorb);
            proptest::prop_assert_eq!(resolved.is_some(), col >= 0 && (col as usize) < cols);
        }
    }
}
