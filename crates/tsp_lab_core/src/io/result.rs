//! Algorithm result files, as written by the experiment runners:
//!
//! ```text
//! Best cost: 84471
//! Worst cost: 95013
//! Average cost: 87679.14
//! Best solution total cost breakdown:
//!  - Path length: 48016
//!  - Node costs: 36455
//! Best solution: 4 3 22 ...
//! ```

use std::{
    fmt,
    path::{Path, PathBuf},
};

use tsp_lab_derive::KvDisplay;

use crate::{CostBreakdown, Error, NodeId, Result, Tour};

const RESULT_SUFFIX: &str = "_result";

/// Summary of one algorithm run on one dataset.
#[derive(Clone, Debug, PartialEq, KvDisplay)]
pub struct AlgorithmResult {
    pub name: String,
    pub best_cost: i64,
    pub worst_cost: i64,
    pub average_cost: f64,
    pub stored: CostBreakdown,
    #[kv(fmt = "len", name = "best_tour_len")]
    pub best_tour: Tour,
}

impl AlgorithmResult {
    /// Dataset tag, the part of the name after the last `_` (`TSPA` for
    /// `GreedyCycle_TSPA`).
    pub fn dataset(&self) -> Option<&str> {
        self.name
            .rsplit_once('_')
            .map(|(_, dataset)| dataset)
            .filter(|dataset| !dataset.is_empty())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Field {
    BestCost,
    WorstCost,
    AverageCost,
    PathLength,
    NodeCosts,
    BestSolution,
}

impl Field {
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().trim_start_matches('-').trim().to_ascii_lowercase();
        match label.as_str() {
            "best cost" => Some(Self::BestCost),
            "worst cost" => Some(Self::WorstCost),
            "average cost" => Some(Self::AverageCost),
            "path length" => Some(Self::PathLength),
            "node costs" | "node cost" => Some(Self::NodeCosts),
            "best solution" => Some(Self::BestSolution),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BestCost => "Best cost",
            Self::WorstCost => "Worst cost",
            Self::AverageCost => "Average cost",
            Self::PathLength => "Path length",
            Self::NodeCosts => "Node costs",
            Self::BestSolution => "Best solution",
        })
    }
}

pub fn read_result(path: &Path) -> Result<AlgorithmResult> {
    let text = super::read_text(path)?;
    let name = result_name(path);
    parse_result(&name, &text).map_err(|err| match err {
        Error::InvalidData(message) => {
            Error::invalid_data(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

/// Reads every result file. A file that cannot be read or parsed is handed
/// back with its error and does not stop the others.
pub fn load_results(paths: &[PathBuf]) -> (Vec<AlgorithmResult>, Vec<(PathBuf, Error)>) {
    let mut loaded = Vec::with_capacity(paths.len());
    let mut failed = Vec::new();
    for path in paths {
        match read_result(path) {
            Ok(result) => {
                log::debug!("result: {result}");
                log::debug!(
                    "result: name={} best_tour={}",
                    result.name,
                    result.best_tour.rotated_to_min()
                );
                loaded.push(result);
            }
            Err(err) => {
                log::error!("result: path={} {err}", path.display());
                failed.push((path.clone(), err));
            }
        }
    }
    (loaded, failed)
}

/// Name of a result file: its stem without a trailing `_result`.
pub fn result_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.strip_suffix(RESULT_SUFFIX)
        .map(str::to_string)
        .unwrap_or(stem)
}

pub fn parse_result(name: &str, text: &str) -> Result<AlgorithmResult> {
    let mut best_cost = None;
    let mut worst_cost = None;
    let mut average_cost = None;
    let mut path_length = None;
    let mut node_costs = None;
    let mut best_tour = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let Some((label, value)) = raw_line.rsplit_once(':') else {
            continue;
        };
        let Some(field) = Field::from_label(label) else {
            continue;
        };
        let value = value.trim();

        match field {
            Field::BestCost => best_cost = Some(parse_number::<i64>(line_no, field, value)?),
            Field::WorstCost => worst_cost = Some(parse_number::<i64>(line_no, field, value)?),
            Field::AverageCost => {
                average_cost = Some(parse_number::<f64>(line_no, field, value)?)
            }
            Field::PathLength => path_length = Some(parse_number::<i64>(line_no, field, value)?),
            Field::NodeCosts => node_costs = Some(parse_number::<f64>(line_no, field, value)?),
            Field::BestSolution => best_tour = Some(parse_tour(line_no, value)?),
        }
    }

    Ok(AlgorithmResult {
        name: name.to_string(),
        best_cost: require(best_cost, Field::BestCost)?,
        worst_cost: require(worst_cost, Field::WorstCost)?,
        average_cost: require(average_cost, Field::AverageCost)?,
        stored: CostBreakdown::new(
            require(path_length, Field::PathLength)?,
            require(node_costs, Field::NodeCosts)?,
        ),
        best_tour: require(best_tour, Field::BestSolution)?,
    })
}

fn parse_number<T>(line_no: usize, field: Field, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|e| {
        Error::invalid_data(format!("Line {line_no}: bad {field} value '{value}': {e}"))
    })
}

fn parse_tour(line_no: usize, value: &str) -> Result<Tour> {
    let tour: Tour = value
        .split_whitespace()
        .map(|token| {
            token.parse::<NodeId>().map_err(|e| {
                Error::invalid_data(format!("Line {line_no}: bad node id '{token}': {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .collect();

    if tour.is_empty() {
        return Err(Error::invalid_data(format!(
            "Line {line_no}: best solution has no nodes"
        )));
    }
    Ok(tour)
}

fn require<T>(value: Option<T>, field: Field) -> Result<T> {
    value.ok_or_else(|| Error::invalid_data(format!("missing '{field}' line")))
}
