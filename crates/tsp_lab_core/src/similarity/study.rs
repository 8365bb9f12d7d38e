use std::fmt;

use rayon::prelude::*;

use super::{AverageSimilarity, Measure, Policy, average_similarity, comparison_set};
use crate::{SolutionId, SolutionSet};

const CORRELATION_DECIMALS: i32 = 3;

/// Average similarity of one candidate next to its evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateSimilarity {
    pub id: SolutionId,
    pub evaluation: i64,
    pub average: AverageSimilarity,
}

/// How candidate quality relates to similarity under one policy and measure.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityStudy {
    pub policy: Policy,
    pub measure: Measure,
    pub candidates: Vec<CandidateSimilarity>,
    /// Pearson correlation of evaluation against average similarity over the
    /// candidates with a defined average, rounded to three decimals.
    pub correlation: Option<f64>,
}

impl SimilarityStudy {
    #[tsp_lab_derive::timer("similarity study")]
    pub fn run(set: &SolutionSet, policy: Policy, measure: Measure) -> SimilarityStudy {
        let comparison = comparison_set(set, policy);
        let candidates: Vec<CandidateSimilarity> = set
            .candidates()
            .par_iter()
            .map(|candidate| CandidateSimilarity {
                id: candidate.id(),
                evaluation: candidate.evaluation(),
                average: average_similarity(candidate, &comparison, measure),
            })
            .collect();

        let (evaluations, averages): (Vec<f64>, Vec<f64>) = candidates
            .iter()
            .filter_map(|c| c.average.mean().map(|mean| (c.evaluation as f64, mean)))
            .unzip();
        let correlation = pearson(&evaluations, &averages).map(round_correlation);

        let study = SimilarityStudy {
            policy,
            measure,
            candidates,
            correlation,
        };
        log::info!(
            "similarity: study={} candidates={} undefined={} correlation={}",
            study.title(),
            study.candidates.len(),
            study.undefined_count(),
            study
                .correlation
                .map_or_else(|| String::from("n/a"), |r| r.to_string())
        );
        study
    }

    /// Runs every combination of `policies` and `measures`, policies outermost.
    pub fn run_grid(
        set: &SolutionSet,
        policies: &[Policy],
        measures: &[Measure],
    ) -> Vec<SimilarityStudy> {
        policies
            .iter()
            .flat_map(|policy| measures.iter().map(move |measure| (*policy, *measure)))
            .map(|(policy, measure)| Self::run(set, policy, measure))
            .collect()
    }

    /// `<policy>_<measure>`, e.g. `best_edges`.
    pub fn title(&self) -> String {
        format!("{}_{}", self.policy, self.measure)
    }

    pub fn undefined_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| !c.average.is_defined())
            .count()
    }

    /// Mean of the defined per-candidate averages.
    pub fn overall_mean(&self) -> Option<f64> {
        let defined: Vec<f64> = self
            .candidates
            .iter()
            .filter_map(|c| c.average.mean())
            .collect();
        if defined.is_empty() {
            None
        } else {
            Some(defined.iter().sum::<f64>() / defined.len() as f64)
        }
    }
}

impl fmt::Display for SimilarityStudy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: candidates={}", self.title(), self.candidates.len())?;
        match self.overall_mean() {
            Some(mean) => write!(f, " mean={mean:.3}")?,
            None => write!(f, " mean=n/a")?,
        }
        match self.correlation {
            Some(r) => write!(f, " correlation={r}")?,
            None => write!(f, " correlation=n/a")?,
        }
        if self.undefined_count() > 0 {
            write!(f, " undefined={}", self.undefined_count())?;
        }
        Ok(())
    }
}

/// Pearson correlation coefficient; `None` for fewer than two points,
/// mismatched lengths or a constant series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

fn round_correlation(r: f64) -> f64 {
    let scale = 10f64.powi(CORRELATION_DECIMALS);
    (r * scale).round_ties_even() / scale
}
