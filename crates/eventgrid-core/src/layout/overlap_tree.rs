//! Augmented interval tree used to find overlapping events while clustering.
//!
//! Plain (unbalanced) BST keyed on `start`, equal starts go right. Every node
//! tracks `max`, the latest `end` anywhere in its subtree.

use crate::interval::Interval;

#[derive(Debug, Clone)]
pub(crate) struct OverlapNode {
    pub interval: Interval,
    /// Index of the event this node stands for, in the caller's sorted slice
    pub item: usize,
    pub max: i64,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct OverlapTree {
    nodes: Vec<OverlapNode>,
    root: Option<usize>,
}

impl OverlapTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop every node; the arena allocation is kept for the next cluster.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub fn insert(&mut self, interval: Interval, item: usize) {
        let id = self.nodes.len();
        self.nodes.push(OverlapNode {
            interval,
            item,
            max: interval.end,
            left: None,
            right: None,
        });

        let Some(mut cur) = self.root else {
            self.root = Some(id);
            return;
        };

        loop {
            let node = &mut self.nodes[cur];
            node.max = node.max.max(interval.end);
            let slot = if interval.start < node.interval.start {
                &mut node.left
            } else {
                &mut node.right
            };
            match *slot {
                Some(next) => cur = next,
                None => {
                    *slot = Some(id);
                    return;
                }
            }
        }
    }

    /// Find some node overlapping `query` along a single descent path.
    ///
    /// Not exhaustive: only answers whether the new event touches the
    /// current cluster, and which member it found first.
    pub fn search(&self, query: &Interval) -> Option<&OverlapNode> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            if node.interval.overlaps_for_cluster(query) {
                return Some(node);
            }
            cur = match node.left {
                Some(left) if self.nodes[left].max >= query.start => Some(left),
                _ => node.right,
            };
        }
        None
    }
}
