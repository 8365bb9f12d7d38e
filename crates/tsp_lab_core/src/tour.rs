use std::{collections::HashSet, fmt};

use tsp_lab_derive::New;

use crate::NodeId;

/// Unordered pair of nodes, endpoints stored smallest first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Edge(NodeId, NodeId);

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

/// Cyclic visiting order; the last node connects back to the first.
#[derive(Clone, Debug, Default, Eq, PartialEq, New)]
pub struct Tour {
    pub nodes: Vec<NodeId>,
}

impl Tour {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consecutive `(from, to)` pairs including the closing `last -> first` leg.
    pub fn legs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let n = self.nodes.len();
        (0..n).map(move |i| (self.nodes[i], self.nodes[(i + 1) % n]))
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.legs().map(|(a, b)| Edge::new(a, b))
    }

    pub fn node_set(&self) -> HashSet<NodeId> {
        self.nodes.iter().copied().collect()
    }

    pub fn edge_set(&self) -> HashSet<Edge> {
        self.edges().collect()
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.nodes.iter().rev().copied().collect())
    }

    /// Same cycle, rotated so the smallest node id comes first.
    pub fn rotated_to_min(&self) -> Self {
        let Some(start) = self
            .nodes
            .iter()
            .enumerate()
            .min_by_key(|(_, node)| **node)
            .map(|(idx, _)| idx)
        else {
            return Self::default();
        };
        let mut nodes = self.nodes.clone();
        nodes.rotate_left(start);
        Self::new(nodes)
    }
}

impl FromIterator<NodeId> for Tour {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, node) in self.nodes.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
