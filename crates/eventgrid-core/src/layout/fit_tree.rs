//! First-fit column tree.
//!
//! Unlike the overlap tree, `max` here is not a subtree maximum: it is the
//! latest end committed to a node's column by the events that were routed
//! through it. Left links chain earlier occupants of the same column, right
//! links lead to the next column.

use std::collections::BTreeMap;

use crate::interval::Interval;

#[derive(Debug, Clone)]
pub(crate) struct FitNode {
    /// `[start, end - 1]` of the event, so back-to-back events can share a column
    pub interval: Interval,
    pub position: usize,
    pub max: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub start_column: usize,
    pub end_column: usize,
}

/// Arena of fit nodes; node ids match insertion order.
#[derive(Debug, Clone, Default)]
pub(crate) struct FitTree {
    pub nodes: Vec<FitNode>,
    root: Option<usize>,
    /// column -> first node placed in it
    pub node_map: BTreeMap<usize, usize>,
}

impl FitTree {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
            node_map: BTreeMap::new(),
        }
    }

    /// Place an event `[start, end)` and return its node id.
    pub fn insert(&mut self, start: i64, end: i64) -> usize {
        let interval = Interval {
            start,
            end: end.saturating_sub(1),
        };
        let id = self.nodes.len();
        self.nodes.push(FitNode {
            interval,
            position: 0,
            max: interval.end,
            left: None,
            right: None,
            start_column: 0,
            end_column: 0,
        });

        let mut slot_owner = None;
        let mut cur = self.root;
        while let Some(at) = cur {
            let (position, reusable) = {
                let root = &self.nodes[at];
                (root.position, root.max < interval.start)
            };
            if reusable {
                self.nodes[at].max = interval.end;
                self.nodes[id].position = position;
                slot_owner = Some((at, true));
                cur = self.nodes[at].left;
            } else {
                self.nodes[id].position = position + 1;
                slot_owner = Some((at, false));
                cur = self.nodes[at].right;
            }
            tracing::trace!(
                node = id,
                via = at,
                column = self.nodes[id].position,
                reusable,
                "fit step"
            );
        }

        match slot_owner {
            None => self.root = Some(id),
            Some((parent, true)) => self.nodes[parent].left = Some(id),
            Some((parent, false)) => self.nodes[parent].right = Some(id),
        }

        let node = &mut self.nodes[id];
        node.start_column = node.position;
        node.end_column = node.position;
        self.node_map.entry(node.position).or_insert(id);
        id
    }

    /// Columns used: one past the highest assigned position.
    pub fn divisor(&self) -> usize {
        self.nodes.iter().map(|n| n.position + 1).max().unwrap_or(0)
    }

    /// Widen every node rightward while the next column is free.
    ///
    /// Reads only other nodes' intervals and links, never their
    /// expanded columns, so the visiting order does not matter.
    pub fn expand(&mut self) {
        for id in 0..self.nodes.len() {
            let interval = self.nodes[id].interval;
            let mut end_column = self.nodes[id].start_column;
            let mut next = self.node_map.get(&(end_column + 1)).copied();

            while let Some(other) = next {
                let occupant = &self.nodes[other];
                if interval.overlaps_closed(&occupant.interval) {
                    break;
                }
                match occupant.left {
                    None => {
                        end_column += 1;
                        next = self.node_map.get(&(end_column + 1)).copied();
                    }
                    // an earlier occupant of the same column may still conflict
                    Some(left) => next = Some(left),
                }
            }

            self.nodes[id].end_column = end_column;
        }
    }
}
