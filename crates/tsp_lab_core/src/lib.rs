//! Post-hoc analysis of travelling-salesman style experiment output.
//! Validates stored solution costs against raw instance data and studies how
//! solution quality relates to node and edge overlap with other solutions.

mod batch;
mod error;
mod instance;
mod io;
pub mod logging;
mod node;
mod similarity;
mod solution;
mod tour;
mod validate;

pub use batch::{BatchEntry, BatchOutcome, ValidationBatch, validate_batch, validate_datasets};
pub use error::{Error, Result};
pub use instance::{Instance, InstanceCatalog};
pub use io::instance::{parse_instance, read_catalog, read_instance};
pub use io::options::{AnalysisOptions, LogFormat, LogLevel, MeasureChoice, PolicyChoice};
pub use io::result::{AlgorithmResult, load_results, parse_result, read_result, result_name};
pub use io::solutions::{parse_solutions, read_solutions};
pub use node::{NodeId, NodeRecord};
pub use similarity::{
    AverageSimilarity, CandidateSimilarity, Measure, Policy, SimilarityMatrix, SimilarityStudy,
    average_similarity, comparison_set, pearson, similarity, similarity_matrix,
};
pub use solution::{Solution, SolutionId, SolutionSet};
pub use tour::{Edge, Tour};
pub use validate::{CostBreakdown, CostField, Mismatch, Validation, cost_breakdown, validate};
