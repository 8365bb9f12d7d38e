use rayon::prelude::*;

use super::{Measure, similarity};
use crate::{Solution, SolutionId};

/// Symmetric pairwise similarity table; the diagonal holds self-similarity.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityMatrix {
    measure: Measure,
    ids: Vec<SolutionId>,
    values: Vec<Vec<usize>>,
}

impl SimilarityMatrix {
    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn ids(&self) -> &[SolutionId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[usize]> {
        self.values.get(row).map(Vec::as_slice)
    }

    /// Mean over all off-diagonal entries, `None` for fewer than two solutions.
    pub fn off_diagonal_mean(&self) -> Option<f64> {
        let n = self.len();
        if n < 2 {
            return None;
        }
        let sum: usize = self
            .values
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().filter(move |(j, _)| *j != i))
            .map(|(_, v)| *v)
            .sum();
        Some(sum as f64 / (n * (n - 1)) as f64)
    }
}

/// Computes every pairwise similarity, one row per solution in parallel.
#[tsp_lab_derive::timer]
pub fn similarity_matrix(solutions: &[Solution], measure: Measure) -> SimilarityMatrix {
    let values: Vec<Vec<usize>> = solutions
        .par_iter()
        .map(|a| {
            solutions
                .iter()
                .map(|b| similarity(a, b, measure))
                .collect()
        })
        .collect();

    log::debug!(
        "matrix: measure={measure} n={} cells={}",
        solutions.len(),
        solutions.len() * solutions.len()
    );

    SimilarityMatrix {
        measure,
        ids: solutions.iter().map(Solution::id).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::similarity_matrix;
    use crate::{Measure, NodeId, Solution, SolutionId, Tour};

    fn solution(id: usize, ids: &[usize]) -> Solution {
        Solution::new(
            SolutionId(id),
            ids.iter().copied().map(NodeId).collect::<Tour>(),
            0,
        )
    }

    #[test]
    fn matrix_is_symmetric_with_self_similarity_on_diagonal() {
        let solutions = vec![
            solution(0, &[0, 1, 2, 3]),
            solution(1, &[3, 2, 1, 0]),
            solution(2, &[0, 2, 1, 4]),
        ];
        let matrix = similarity_matrix(&solutions, Measure::Edges);

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.measure(), Measure::Edges);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), Some(solutions[i].edges().len()));
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert_eq!(matrix.row(0), Some(&[4, 4, 1][..]));
        assert_eq!(matrix.get(3, 0), None);
    }

    #[test]
    fn off_diagonal_mean_ignores_self_similarity() {
        let solutions = vec![solution(0, &[0, 1, 2]), solution(1, &[0, 1, 5])];
        let matrix = similarity_matrix(&solutions, Measure::Nodes);
        assert_eq!(matrix.off_diagonal_mean(), Some(2.0));

        let single = similarity_matrix(&solutions[..1], Measure::Nodes);
        assert_eq!(single.off_diagonal_mean(), None);
    }
}
