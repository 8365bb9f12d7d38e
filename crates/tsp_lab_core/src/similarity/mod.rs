//! Node- and edge-overlap similarity between solutions.

mod matrix;
mod study;

use std::fmt;

use tsp_lab_derive::CliValue;

use crate::{Solution, SolutionSet};

pub use matrix::{SimilarityMatrix, similarity_matrix};
pub use study::{CandidateSimilarity, SimilarityStudy, pearson};

/// Which derived set two solutions are compared on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, CliValue)]
#[cli_value(option = "measure")]
pub enum Measure {
    #[cli(alias = "node")]
    Nodes,
    #[cli(alias = "edge")]
    Edges,
}

/// Which solutions a candidate is compared against.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, CliValue)]
#[cli_value(option = "policy")]
pub enum Policy {
    /// Only the best-known reference solution.
    #[cli(alias = "reference")]
    Best,
    /// Every candidate of the population.
    #[cli(alias = "population")]
    Average,
}

/// Size of the intersection of the chosen node or edge sets.
pub fn similarity(a: &Solution, b: &Solution, measure: Measure) -> usize {
    match measure {
        Measure::Nodes => a.nodes().intersection(b.nodes()).count(),
        Measure::Edges => a.edges().intersection(b.edges()).count(),
    }
}

pub fn comparison_set(set: &SolutionSet, policy: Policy) -> Vec<&Solution> {
    match policy {
        Policy::Best => vec![set.reference()],
        Policy::Average => set.candidates().iter().collect(),
    }
}

/// Mean similarity of a candidate over its comparison set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AverageSimilarity {
    Defined { mean: f64, compared: usize },
    /// Nothing was left to compare against once the candidate itself was
    /// excluded.
    Undefined,
}

impl AverageSimilarity {
    /// The mean, or `NaN` when undefined.
    pub fn value(&self) -> f64 {
        match self {
            Self::Defined { mean, .. } => *mean,
            Self::Undefined => f64::NAN,
        }
    }

    pub fn mean(&self) -> Option<f64> {
        match self {
            Self::Defined { mean, .. } => Some(*mean),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined { .. })
    }
}

impl fmt::Display for AverageSimilarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined { mean, compared } => write!(f, "{mean:.3} (n={compared})"),
            Self::Undefined => f.write_str("undefined (no comparison available)"),
        }
    }
}

/// Averages [`similarity`] over `comparison`, skipping the candidate itself.
pub fn average_similarity(
    candidate: &Solution,
    comparison: &[&Solution],
    measure: Measure,
) -> AverageSimilarity {
    let (sum, compared) = comparison
        .iter()
        .filter(|other| other.id() != candidate.id())
        .fold((0usize, 0usize), |(sum, n), other| {
            (sum + similarity(candidate, other, measure), n + 1)
        });

    if compared == 0 {
        AverageSimilarity::Undefined
    } else {
        AverageSimilarity::Defined {
            mean: sum as f64 / compared as f64,
            compared,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    use super::{
        AverageSimilarity, Measure, Policy, average_similarity, comparison_set, similarity,
    };
    use crate::{NodeId, Solution, SolutionId, SolutionSet, Tour};

    fn solution(id: usize, ids: &[usize], evaluation: i64) -> Solution {
        Solution::new(
            SolutionId(id),
            ids.iter().copied().map(NodeId).collect::<Tour>(),
            evaluation,
        )
    }

    #[test]
    fn identical_tours_share_all_nodes_and_edges() {
        let a = solution(0, &[0, 1, 2, 3], 1);
        let b = solution(1, &[0, 1, 2, 3], 1);
        assert_eq!(similarity(&a, &b, Measure::Nodes), 4);
        assert_eq!(similarity(&a, &b, Measure::Edges), 4);
    }

    #[test]
    fn reversed_tour_shares_all_edges() {
        let a = solution(0, &[0, 1, 2, 3], 1);
        let b = solution(1, &[3, 2, 1, 0], 1);
        assert_eq!(similarity(&a, &b, Measure::Edges), 4);
    }

    #[test]
    fn partially_overlapping_tours() {
        let a = solution(0, &[0, 1, 2, 3], 1);
        let b = solution(1, &[0, 2, 1, 4], 1);
        // shared nodes 0, 1, 2; shared edge only 1-2
        assert_eq!(similarity(&a, &b, Measure::Nodes), 3);
        assert_eq!(similarity(&a, &b, Measure::Edges), 1);
    }

    #[test]
    fn self_similarity_equals_node_count() {
        let a = solution(0, &[4, 8, 15, 16, 23, 42], 1);
        assert_eq!(similarity(&a, &a, Measure::Nodes), 6);
    }

    #[test]
    fn edge_similarity_never_exceeds_node_similarity() {
        let mut rng = StdRng::seed_from_u64(3);
        for round in 0..50 {
            let mut left: Vec<usize> = (0..30).collect();
            let mut right: Vec<usize> = (0..30).collect();
            left.shuffle(&mut rng);
            right.shuffle(&mut rng);
            left.truncate(15);
            right.truncate(15);
            let a = solution(0, &left, 0);
            let b = solution(1, &right, 0);
            assert!(
                similarity(&a, &b, Measure::Edges) <= similarity(&a, &b, Measure::Nodes),
                "round={round}"
            );
        }
    }

    #[test]
    fn average_excludes_the_candidate_itself() {
        let a = solution(0, &[0, 1, 2, 3], 1);
        let b = solution(1, &[0, 1, 2, 4], 1);
        let c = solution(2, &[5, 6, 7, 8], 1);
        let comparison = [&a, &b, &c];

        let avg = average_similarity(&a, &comparison, Measure::Nodes);
        assert_eq!(
            avg,
            AverageSimilarity::Defined {
                mean: 1.5,
                compared: 2
            }
        );
    }

    #[test]
    fn average_is_undefined_when_only_self_remains() {
        let a = solution(0, &[0, 1, 2, 3], 1);
        let avg = average_similarity(&a, &[&a], Measure::Edges);
        assert_eq!(avg, AverageSimilarity::Undefined);
        assert!(avg.value().is_nan());
        assert_eq!(avg.mean(), None);
        assert_eq!(avg.to_string(), "undefined (no comparison available)");
    }

    #[test]
    fn average_is_undefined_for_empty_comparison_set() {
        let a = solution(0, &[0, 1, 2], 1);
        assert!(!average_similarity(&a, &[], Measure::Nodes).is_defined());
    }

    #[test]
    fn comparison_set_follows_policy() {
        let set = SolutionSet::new(
            vec![solution(0, &[0, 1, 2], 3), solution(1, &[2, 1, 0], 4)],
            solution(2, &[0, 2, 1], 1),
        );

        let best = comparison_set(&set, Policy::Best);
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].id(), SolutionId(2));

        let population = comparison_set(&set, Policy::Average);
        assert_eq!(
            population.iter().map(|s| s.id()).collect::<Vec<_>>(),
            vec![SolutionId(0), SolutionId(1)]
        );
    }

    #[test]
    fn measure_and_policy_parse_names_and_aliases() {
        assert_eq!(Measure::parse("EDGES").expect("parse"), Measure::Edges);
        assert_eq!(Measure::parse("node").expect("parse"), Measure::Nodes);
        assert_eq!(Policy::parse("population").expect("parse"), Policy::Average);
        assert_eq!(Policy::Best.to_string(), "best");

        let err = Measure::parse("arcs").expect_err("unknown measure");
        assert!(err.to_string().contains("expected nodes|edges"));
    }
}
