//! Recomputes the cost of a tour from raw instance data and compares it
//! against the values stored with a solution.

use std::fmt;

use tsp_lab_derive::New;

use crate::{Instance, Result, Tour};

/// Path length and node cost of one tour.
#[derive(Clone, Copy, Debug, Default, PartialEq, New)]
pub struct CostBreakdown {
    pub path_length: i64,
    pub node_cost: f64,
}

impl CostBreakdown {
    /// Objective value: path length plus node cost.
    pub fn total(&self) -> f64 {
        self.path_length as f64 + self.node_cost
    }
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "path_length={} node_cost={} total={}",
            self.path_length,
            format_cost(self.node_cost),
            format_cost(self.total())
        )
    }
}

/// Shortest round-trip representation, always with a fractional part.
fn format_cost(value: f64) -> String {
    ryu::Buffer::new().format(value).to_string()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CostField {
    PathLength,
    NodeCost,
}

impl fmt::Display for CostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PathLength => "path-length",
            Self::NodeCost => "node-cost",
        })
    }
}

/// A field whose recomputed value disagrees with the stored one.
#[derive(Clone, Copy, Debug, PartialEq, New)]
pub struct Mismatch {
    pub field: CostField,
    pub stored: f64,
    pub recomputed: f64,
}

impl Mismatch {
    /// `recomputed - stored`.
    pub fn delta(&self) -> f64 {
        self.recomputed - self.stored
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            CostField::PathLength => write!(
                f,
                "{} stored={} recomputed={} delta={:+}",
                self.field,
                self.stored as i64,
                self.recomputed as i64,
                self.delta() as i64
            ),
            CostField::NodeCost => {
                let delta = self.delta();
                write!(
                    f,
                    "{} stored={} recomputed={} delta={}{}",
                    self.field,
                    format_cost(self.stored),
                    format_cost(self.recomputed),
                    if delta < 0.0 { '-' } else { '+' },
                    format_cost(delta.abs())
                )
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Validation {
    Valid(CostBreakdown),
    Mismatched {
        recomputed: CostBreakdown,
        mismatches: Vec<Mismatch>,
    },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn recomputed(&self) -> CostBreakdown {
        match self {
            Self::Valid(breakdown) => *breakdown,
            Self::Mismatched { recomputed, .. } => *recomputed,
        }
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            Self::Valid(_) => &[],
            Self::Mismatched { mismatches, .. } => mismatches,
        }
    }
}

/// Sums the per-edge rounded Euclidean distances (closing leg included) and
/// the costs of every visited node.
///
/// Each leg is rounded before summation, so the total can differ from the
/// rounded continuous length.
pub fn cost_breakdown(instance: &Instance, tour: &Tour) -> Result<CostBreakdown> {
    let mut breakdown = CostBreakdown::default();
    for (from, to) in tour.legs() {
        let a = instance.node(from)?;
        let b = instance.node(to)?;
        breakdown.path_length += a.rounded_dist(b);
        breakdown.node_cost += a.cost;
    }
    Ok(breakdown)
}

/// Recomputes the breakdown of `tour` and compares it with `stored`.
///
/// Only a tour referencing unknown nodes is an error; disagreeing values are
/// reported through [`Validation::Mismatched`].
pub fn validate(instance: &Instance, tour: &Tour, stored: CostBreakdown) -> Result<Validation> {
    let recomputed = cost_breakdown(instance, tour)?;

    let mut mismatches = Vec::new();
    if recomputed.path_length != stored.path_length {
        mismatches.push(Mismatch::new(
            CostField::PathLength,
            stored.path_length as f64,
            recomputed.path_length as f64,
        ));
    }
    if recomputed.node_cost != stored.node_cost {
        mismatches.push(Mismatch::new(
            CostField::NodeCost,
            stored.node_cost,
            recomputed.node_cost,
        ));
    }

    if mismatches.is_empty() {
        Ok(Validation::Valid(recomputed))
    } else {
        Ok(Validation::Mismatched {
            recomputed,
            mismatches,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

    use super::{CostBreakdown, CostField, Validation, cost_breakdown, validate};
    use crate::{Error, Instance, NodeId, NodeRecord, Tour};

    fn tour(ids: &[usize]) -> Tour {
        ids.iter().copied().map(NodeId).collect()
    }

    fn triangle() -> Instance {
        Instance::from_records([
            NodeRecord::new(0.0, 0.0, 5.0),
            NodeRecord::new(3.0, 4.0, 2.0),
            NodeRecord::new(0.0, 4.0, 1.0),
        ])
    }

    #[test]
    fn cost_breakdown_of_triangle() {
        let breakdown = cost_breakdown(&triangle(), &tour(&[0, 1, 2])).expect("breakdown");
        // legs 0-1, 1-2 and the closing 2-0 leg
        assert_eq!(breakdown.path_length, 5 + 3 + 4);
        assert_eq!(breakdown.node_cost, 8.0);
        assert_eq!(breakdown.total(), 20.0);
    }

    #[test]
    fn cost_breakdown_rounds_each_leg_before_summing() {
        let instance = Instance::from_records([
            NodeRecord::new(0.0, 0.0, 0.0),
            NodeRecord::new(1.0, 1.0, 0.0),
            NodeRecord::new(2.0, 2.0, 0.0),
        ]);
        // legs: 1.414 -> 1, 1.414 -> 1, 2.828 -> 3; continuous total 5.657 would round to 6
        let breakdown = cost_breakdown(&instance, &tour(&[0, 1, 2])).expect("breakdown");
        assert_eq!(breakdown.path_length, 5);
    }

    #[test]
    fn cost_breakdown_handles_degenerate_tours() {
        let instance = triangle();
        assert_eq!(
            cost_breakdown(&instance, &tour(&[])).expect("empty tour"),
            CostBreakdown::default()
        );
        assert_eq!(
            cost_breakdown(&instance, &tour(&[1])).expect("single node"),
            CostBreakdown::new(0, 2.0)
        );
    }

    #[test]
    fn validate_accepts_matching_values() {
        let result = validate(&triangle(), &tour(&[0, 1, 2]), CostBreakdown::new(12, 8.0))
            .expect("validate");
        assert!(result.is_valid());
        assert!(result.mismatches().is_empty());
    }

    #[test]
    fn validate_reports_every_mismatching_field() {
        let result = validate(&triangle(), &tour(&[0, 1, 2]), CostBreakdown::new(13, 9.0))
            .expect("validate");

        let Validation::Mismatched {
            recomputed,
            mismatches,
        } = &result
        else {
            panic!("expected mismatch, got {result:?}");
        };
        assert_eq!(*recomputed, CostBreakdown::new(12, 8.0));
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].field, CostField::PathLength);
        assert_eq!(mismatches[0].delta(), -1.0);
        assert_eq!(mismatches[1].field, CostField::NodeCost);
        assert_eq!(mismatches[1].stored, 9.0);
        assert_eq!(mismatches[1].recomputed, 8.0);
        assert_eq!(
            mismatches[0].to_string(),
            "path-length stored=13 recomputed=12 delta=-1"
        );
        assert_eq!(
            mismatches[1].to_string(),
            "node-cost stored=9.0 recomputed=8.0 delta=-1.0"
        );
        assert_eq!(
            recomputed.to_string(),
            "path_length=12 node_cost=8.0 total=20.0"
        );
    }

    #[test]
    fn validate_reports_only_the_mismatching_field() {
        let result = validate(&triangle(), &tour(&[2, 1, 0]), CostBreakdown::new(12, 7.0))
            .expect("validate");
        assert_eq!(result.mismatches().len(), 1);
        assert_eq!(result.mismatches()[0].field, CostField::NodeCost);
    }

    #[test]
    fn validate_rejects_unknown_nodes() {
        let err = validate(&triangle(), &tour(&[0, 1, 7]), CostBreakdown::default())
            .expect_err("node 7 is not in the instance");
        assert!(matches!(err, Error::UnknownNode { node: NodeId(7), .. }));
    }

    #[test]
    fn validate_round_trips_values_computed_by_the_same_formula() {
        let mut rng = StdRng::seed_from_u64(42);
        let instance = Instance::from_records((0..60).map(|_| {
            NodeRecord::new(
                rng.random_range(0..4000) as f64,
                rng.random_range(0..2000) as f64,
                rng.random_range(0..2000) as f64,
            )
        }));

        for _ in 0..20 {
            let mut ids: Vec<usize> = (0..60).collect();
            ids.shuffle(&mut rng);
            ids.truncate(30);
            let t = tour(&ids);

            let mut path_length = 0;
            let mut node_cost = 0.0;
            for i in 0..ids.len() {
                let a = instance.node(NodeId(ids[i])).expect("node");
                let b = instance.node(NodeId(ids[(i + 1) % ids.len()])).expect("node");
                path_length += ((a.x - b.x).powi(2) + (a.y - b.y).powi(2))
                    .sqrt()
                    .round_ties_even() as i64;
                node_cost += a.cost;
            }

            let result = validate(&instance, &t, CostBreakdown::new(path_length, node_cost))
                .expect("validate");
            assert!(result.is_valid(), "{result:?}");
        }
    }
}
