//! Overflow policy: cap the number of columns a cluster may use.
//!
//! Events that would start beyond the cap are hidden; events straddling it
//! are clipped to the last visible column.

use crate::error::LayoutError;
use crate::layout::ClusterLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowPolicy {
    max_columns: usize,
}

impl OverflowPolicy {
    /// # Errors
    /// Returns [`LayoutError::InvalidMaxColumns`] if `max_columns` is zero.
    pub fn new(max_columns: usize) -> Result<Self, LayoutError> {
        if max_columns == 0 {
            return Err(LayoutError::InvalidMaxColumns(max_columns));
        }
        Ok(Self { max_columns })
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    pub fn apply<T>(&self, layout: ClusterLayout<T>) -> ClusterLayout<T> {
        if layout.divisor <= self.max_columns {
            return layout;
        }

        let ClusterLayout {
            divisor,
            placements,
            mut hidden,
        } = layout;
        let last = self.max_columns - 1;
        let mut visible = Vec::with_capacity(placements.len());
        for mut placement in placements {
            if placement.start_column > last {
                hidden.push(placement.reference);
                continue;
            }
            placement.end_column = placement.end_column.min(last);
            placement.divisor = self.max_columns;
            visible.push(placement);
        }

        tracing::debug!(
            divisor,
            max_columns = self.max_columns,
            hidden = hidden.len(),
            "capped cluster columns"
        );
        ClusterLayout {
            divisor: self.max_columns,
            placements: visible,
            hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalModel;
    use crate::layout::layout_cluster;

    fn wall(n: i64) -> ClusterLayout<i64> {
        let events: Vec<_> = (0..n).map(|i| IntervalModel::new(0, 60, i)).collect();
        layout_cluster(&events).unwrap()
    }

    #[test]
    fn zero_columns_is_rejected() {
        assert_eq!(
            OverflowPolicy::new(0),
            Err(LayoutError::InvalidMaxColumns(0))
        );
    }

    #[test]
    fn layout_within_cap_is_untouched() {
        let layout = wall(3);
        let capped = OverflowPolicy::new(3).unwrap().apply(layout.clone());
        assert_eq!(capped, layout);
    }

    #[test]
    fn columns_past_cap_are_hidden() {
        let capped = OverflowPolicy::new(2).unwrap().apply(wall(4));
        assert_eq!(capped.divisor, 2);
        assert_eq!(capped.placements.len(), 2);
        assert_eq!(capped.hidden, vec![2, 3]);
        assert!(capped.placements.iter().all(|p| p.divisor == 2));
    }

    #[test]
    fn wide_event_is_clipped_to_last_visible_column() {
        // C spans columns 0..=2 after expansion; the cap clips it to 0..=1.
        let events = vec![
            IntervalModel::new(0, 10, "A"),
            IntervalModel::new(5, 15, "B"),
            IntervalModel::new(6, 16, "D"),
            IntervalModel::new(20, 30, "C"),
        ];
        let layout = layout_cluster(&events).unwrap();
        assert_eq!(layout.divisor, 3);
        assert_eq!(layout.placement_of(&"C").map(|p| p.end_column), Some(2));

        let capped = OverflowPolicy::new(2).unwrap().apply(layout);
        assert_eq!(capped.hidden, vec!["D"]);
        let c = capped.placement_of(&"C").unwrap();
        assert_eq!((c.start_column, c.end_column), (0, 1));
    }
}
