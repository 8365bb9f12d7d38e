use std::{
    fmt::{self, Write as _},
    fs, iter,
    time::Instant,
};

use log::{info, warn};

use tsp_lab_core::{
    AnalysisOptions, Error, Result, SimilarityStudy, Solution, SolutionSet, load_results, logging,
    read_catalog, read_solutions, similarity_matrix, validate_datasets,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = AnalysisOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let mut report = String::new();
    let mut failed = 0usize;

    let result_paths = options.result_paths();
    if !result_paths.is_empty() {
        let catalog = read_catalog(&options.instance_sources()?)?;
        info!(
            "instances: datasets={}",
            catalog.tags().collect::<Vec<_>>().join(",")
        );

        let (results, unreadable) = load_results(&result_paths);
        let mut batch = validate_datasets(&catalog, &results);
        for (path, err) in &unreadable {
            batch.record_unreadable(path, err);
        }
        failed += batch.failures().count();
        writeln!(report, "{batch}").map_err(report_error)?;
    }

    if let Some(solutions_path) = options.solutions_path() {
        let set = read_solutions(solutions_path)?;
        write_similarity(&mut report, &set, &options).map_err(report_error)?;
    }

    match options.output_path() {
        Some(path) => {
            fs::write(path, &report).map_err(|e| {
                Error::other(format!("failed to write output {}: {e}", path.display()))
            })?;
            info!("output: path={}", path.display());
        }
        None => print!("{report}"),
    }

    info!("done: time={:.2}s", now.elapsed().as_secs_f32());

    if failed > 0 {
        warn!("validation: {failed} result(s) failed");
        if options.fail_on_mismatch {
            return Err(Error::invalid_data(format!(
                "{failed} result(s) failed validation"
            )));
        }
    }

    Ok(())
}

fn report_error(e: fmt::Error) -> Error {
    Error::other(format!("failed to render report: {e}"))
}

fn write_similarity(
    report: &mut String,
    set: &SolutionSet,
    options: &AnalysisOptions,
) -> fmt::Result {
    info!(
        "solutions: candidates={} reference={} eval={}",
        set.len(),
        set.reference().id(),
        set.reference().evaluation()
    );

    let studies =
        SimilarityStudy::run_grid(set, options.policy.policies(), options.measure.measures());
    write!(report, "similarity: studies={}", studies.len())?;
    if let Some(best) = set.best_candidate() {
        write!(
            report,
            " best_candidate={} eval={} reference_eval={}",
            best.id(),
            best.evaluation(),
            set.reference().evaluation()
        )?;
    }
    writeln!(report)?;
    for study in &studies {
        writeln!(report, "{study}")?;
    }

    if !options.matrix {
        return Ok(());
    }

    let solutions: Vec<Solution> = set
        .candidates()
        .iter()
        .chain(iter::once(set.reference()))
        .cloned()
        .collect();
    for measure in options.measure.measures() {
        let matrix = similarity_matrix(&solutions, *measure);
        let mean = matrix
            .off_diagonal_mean()
            .map_or_else(|| String::from("n/a"), |m| format!("{m:.3}"));
        writeln!(
            report,
            "matrix: measure={measure} n={} mean={mean}",
            matrix.len()
        )?;
        for (idx, id) in matrix.ids().iter().enumerate() {
            let row = matrix.row(idx).unwrap_or_default();
            let cells: Vec<String> = row.iter().map(usize::to_string).collect();
            writeln!(report, "{id} {}", cells.join(" "))?;
        }
    }
    Ok(())
}
