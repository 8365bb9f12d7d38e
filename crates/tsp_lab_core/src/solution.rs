use std::{collections::HashSet, fmt};

use crate::{Edge, NodeId, Tour};

/// Position of a solution in the file it was read from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SolutionId(pub usize);

impl fmt::Display for SolutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tour with its externally computed evaluation and the node and edge
/// sets used for similarity, derived once at construction.
#[derive(Clone, Debug)]
pub struct Solution {
    id: SolutionId,
    tour: Tour,
    evaluation: i64,
    nodes: HashSet<NodeId>,
    edges: HashSet<Edge>,
}

impl Solution {
    pub fn new(id: SolutionId, tour: Tour, evaluation: i64) -> Self {
        let nodes = tour.node_set();
        let edges = tour.edge_set();
        Self {
            id,
            tour,
            evaluation,
            nodes,
            edges,
        }
    }

    pub fn id(&self) -> SolutionId {
        self.id
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    pub fn evaluation(&self) -> i64 {
        self.evaluation
    }

    pub fn nodes(&self) -> &HashSet<NodeId> {
        &self.nodes
    }

    pub fn edges(&self) -> &HashSet<Edge> {
        &self.edges
    }
}

/// Candidate solutions plus the best-known solution they are compared to.
#[derive(Clone, Debug)]
pub struct SolutionSet {
    candidates: Vec<Solution>,
    reference: Solution,
}

impl SolutionSet {
    pub fn new(candidates: Vec<Solution>, reference: Solution) -> Self {
        Self {
            candidates,
            reference,
        }
    }

    pub fn candidates(&self) -> &[Solution] {
        &self.candidates
    }

    pub fn reference(&self) -> &Solution {
        &self.reference
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate with the lowest evaluation, first one on ties.
    pub fn best_candidate(&self) -> Option<&Solution> {
        self.candidates.iter().min_by_key(|s| s.evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::{Solution, SolutionId, SolutionSet};
    use crate::{NodeId, Tour};

    fn solution(id: usize, ids: &[usize], evaluation: i64) -> Solution {
        Solution::new(
            SolutionId(id),
            ids.iter().copied().map(NodeId).collect::<Tour>(),
            evaluation,
        )
    }

    #[test]
    fn derived_sets_match_tour() {
        let s = solution(0, &[0, 1, 2, 3], 10);
        assert_eq!(s.nodes().len(), 4);
        assert_eq!(s.edges().len(), 4);
        assert_eq!(s.edges(), &s.tour().edge_set());
    }

    #[test]
    fn best_candidate_picks_lowest_evaluation() {
        let set = SolutionSet::new(
            vec![
                solution(0, &[0, 1, 2], 30),
                solution(1, &[2, 1, 0], 20),
                solution(2, &[1, 0, 2], 20),
            ],
            solution(3, &[0, 2, 1], 5),
        );
        assert_eq!(set.best_candidate().map(Solution::id), Some(SolutionId(1)));
        assert_eq!(set.reference().evaluation(), 5);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn solution_id_displays_with_hash() {
        assert_eq!(SolutionId(4).to_string(), "#4");
    }
}
