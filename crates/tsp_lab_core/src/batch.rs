//! Validation of algorithm result files against their instances.

use std::{collections::BTreeMap, fmt, path::Path};

use crate::{
    AlgorithmResult, CostBreakdown, Error, Instance, InstanceCatalog, Mismatch, Validation,
    result_name, validate,
};

#[derive(Clone, Debug, PartialEq)]
pub enum BatchOutcome {
    Valid(CostBreakdown),
    Mismatched {
        recomputed: CostBreakdown,
        mismatches: Vec<Mismatch>,
    },
    /// The stored tour could not be evaluated at all.
    Malformed(String),
    /// The result file could not be read or parsed.
    Unreadable(String),
    /// No instance matches the result's dataset.
    NoInstance(String),
}

impl BatchOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BatchEntry {
    pub name: String,
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    fn new(name: impl Into<String>, outcome: BatchOutcome) -> Self {
        let entry = Self {
            name: name.into(),
            outcome,
        };
        match &entry.outcome {
            BatchOutcome::Valid(_) => log::info!("validate: {entry}"),
            _ => log::warn!("validate: {entry}"),
        }
        entry
    }

    fn checked(instance: &Instance, result: &AlgorithmResult) -> Self {
        let outcome = match validate(instance, &result.best_tour, result.stored) {
            Ok(Validation::Valid(breakdown)) => BatchOutcome::Valid(breakdown),
            Ok(Validation::Mismatched {
                recomputed,
                mismatches,
            }) => BatchOutcome::Mismatched {
                recomputed,
                mismatches,
            },
            Err(err) => BatchOutcome::Malformed(err.to_string()),
        };
        Self::new(result.name.clone(), outcome)
    }
}

impl fmt::Display for BatchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            BatchOutcome::Valid(breakdown) => write!(f, "{}: ok {breakdown}", self.name),
            BatchOutcome::Mismatched {
                recomputed,
                mismatches,
            } => {
                write!(f, "{}: MISMATCH recomputed {recomputed}", self.name)?;
                for mismatch in mismatches {
                    write!(f, "\n\t{mismatch}")?;
                }
                Ok(())
            }
            BatchOutcome::Malformed(reason) => write!(f, "{}: MALFORMED {reason}", self.name),
            BatchOutcome::Unreadable(reason) => write!(f, "{}: UNREADABLE {reason}", self.name),
            BatchOutcome::NoInstance(reason) => write!(f, "{}: NO-INSTANCE {reason}", self.name),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationBatch {
    pub entries: Vec<BatchEntry>,
}

impl ValidationBatch {
    pub fn failures(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|entry| !entry.outcome.is_valid())
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a failure entry for a result file that never made it to
    /// validation.
    pub fn record_unreadable(&mut self, path: &Path, err: &Error) {
        self.entries.push(BatchEntry::new(
            result_name(path),
            BatchOutcome::Unreadable(err.to_string()),
        ));
    }
}

impl fmt::Display for ValidationBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failures().count();
        write!(
            f,
            "validation: results={} valid={} failed={failed}",
            self.entries.len(),
            self.entries.len() - failed
        )?;
        for entry in &self.entries {
            write!(f, "\n{entry}")?;
        }
        Ok(())
    }
}

/// Validates the best tour of every result against one instance. A result
/// whose tour references unknown nodes is reported as malformed and does not
/// stop the batch.
#[tsp_lab_derive::timer("validation batch")]
pub fn validate_batch<'a>(
    instance: &Instance,
    results: impl IntoIterator<Item = &'a AlgorithmResult>,
) -> ValidationBatch {
    ValidationBatch {
        entries: results
            .into_iter()
            .map(|result| BatchEntry::checked(instance, result))
            .collect(),
    }
}

/// Validates every result against the catalog instance of its dataset,
/// grouped by dataset tag. Results with no matching instance come last as
/// failure entries.
pub fn validate_datasets(
    catalog: &InstanceCatalog,
    results: &[AlgorithmResult],
) -> ValidationBatch {
    let mut groups: BTreeMap<&str, (&Instance, Vec<&AlgorithmResult>)> = BTreeMap::new();
    let mut unmatched = Vec::new();
    for result in results {
        match catalog.lookup(result) {
            Some((tag, instance)) => groups
                .entry(tag)
                .or_insert_with(|| (instance, Vec::new()))
                .1
                .push(result),
            None => {
                let known = catalog.tags().collect::<Vec<_>>().join(", ");
                unmatched.push(BatchEntry::new(
                    result.name.clone(),
                    BatchOutcome::NoInstance(format!(
                        "dataset {} has no instance (known: {known})",
                        result.dataset().unwrap_or("-")
                    )),
                ));
            }
        }
    }

    let mut entries = Vec::with_capacity(results.len());
    for (tag, (instance, members)) in groups {
        log::debug!("validate: dataset={tag} results={}", members.len());
        entries.extend(validate_batch(instance, members).entries);
    }
    entries.extend(unmatched);

    ValidationBatch { entries }
}
