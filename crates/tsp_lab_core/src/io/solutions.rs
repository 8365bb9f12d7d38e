//! Solution population files: one comma separated row per solution, node
//! ids followed by the solution's evaluation. The last row holds the
//! best-known solution used as reference.

use std::path::Path;

use crate::{Error, NodeId, Result, Solution, SolutionId, SolutionSet, Tour};

const FIELD_SEPARATOR: char = ',';

pub fn read_solutions(path: &Path) -> Result<SolutionSet> {
    let text = super::read_text(path)?;
    let set = parse_solutions(&text)?;
    log::debug!(
        "solutions: path={} candidates={} reference_eval={}",
        path.display(),
        set.len(),
        set.reference().evaluation()
    );
    Ok(set)
}

pub fn parse_solutions(text: &str) -> Result<SolutionSet> {
    let mut rows = Vec::new();
    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        rows.push(parse_row(idx + 1, SolutionId(rows.len()), line)?);
    }

    let Some(reference) = rows.pop() else {
        return Err(Error::invalid_input("Solutions file contains no rows."));
    };
    Ok(SolutionSet::new(rows, reference))
}

fn parse_row(line_no: usize, id: SolutionId, line: &str) -> Result<Solution> {
    let mut values = line
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i64>().map_err(|e| {
                Error::invalid_data(format!("Line {line_no}: bad value '{token}': {e}"))
            })
        })
        .collect::<Result<Vec<i64>>>()?;

    let Some(evaluation) = values.pop() else {
        return Err(Error::invalid_data(format!("Line {line_no}: empty row")));
    };
    if values.is_empty() {
        return Err(Error::invalid_data(format!(
            "Line {line_no}: row has an evaluation but no tour"
        )));
    }

    let tour = values
        .into_iter()
        .map(|value| {
            usize::try_from(value).map(NodeId).map_err(|_| {
                Error::invalid_data(format!("Line {line_no}: negative node id {value}"))
            })
        })
        .collect::<Result<Tour>>()?;

    Ok(Solution::new(id, tour, evaluation))
}
