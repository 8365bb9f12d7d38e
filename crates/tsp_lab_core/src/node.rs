use std::{fmt, str::FromStr};

use tsp_lab_derive::New;

/// Identifier of a node within an [`Instance`](crate::Instance).
///
/// Instances number their nodes by row position, but every lookup goes
/// through this key so tours never index into raw storage.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<usize>().map(Self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Planar coordinates of a node plus the cost paid for visiting it.
#[derive(Clone, Copy, Debug, PartialEq, New)]
pub struct NodeRecord {
    pub x: f64,
    pub y: f64,
    pub cost: f64,
}

impl NodeRecord {
    /// Euclidean distance.
    pub fn dist(&self, rhs: &Self) -> f64 {
        (self.x - rhs.x).hypot(self.y - rhs.y)
    }

    /// Euclidean distance rounded to the nearest integer, ties to even.
    pub fn rounded_dist(&self, rhs: &Self) -> i64 {
        self.dist(rhs).round_ties_even() as i64
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.cost.is_finite()
    }
}
