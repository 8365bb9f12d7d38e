use std::{
    env,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use tsp_lab_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, Measure, Policy, Result};

/// Runtime options of an analysis run.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct AnalysisOptions {
    /// Comma separated instance files (`x;y;cost` rows), each `TAG=path` or a
    /// bare path tagged by its file stem. Results are matched by dataset tag.
    #[cli(long = "instances")]
    #[kv(fmt = "empty_dash")]
    pub instances: String,
    /// Comma separated result files to validate.
    #[cli(long = "results")]
    #[kv(fmt = "empty_dash")]
    pub results: String,
    /// Solution population file for the similarity study.
    #[cli(long = "solutions")]
    #[kv(fmt = "empty_dash")]
    pub solutions: String,
    /// Similarity measures studied.
    #[cli(long = "measure", parse_with = "MeasureChoice::parse")]
    pub measure: MeasureChoice,
    /// Comparison policies studied.
    #[cli(long = "policy", parse_with = "PolicyChoice::parse")]
    pub policy: PolicyChoice,
    /// Also compute the full pairwise similarity matrix.
    #[cli(long = "matrix", flag)]
    pub matrix: bool,
    /// Exit with an error when any result fails validation.
    #[cli(long = "fail-on-mismatch", flag)]
    pub fail_on_mismatch: bool,
    /// Structured logging level.
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output")]
    #[kv(fmt = "empty_dash")]
    pub log_output: String,
    /// Optional output file path for the summary. Empty means stdout.
    #[cli(long = "output")]
    #[kv(fmt = "empty_dash")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "measure")]
pub enum MeasureChoice {
    #[cli(alias = "node")]
    Nodes,
    #[cli(alias = "edge")]
    Edges,
    #[cli(alias = "both")]
    All,
}

impl MeasureChoice {
    pub fn measures(self) -> &'static [Measure] {
        match self {
            Self::Nodes => &[Measure::Nodes],
            Self::Edges => &[Measure::Edges],
            Self::All => Measure::ALL,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "policy")]
pub enum PolicyChoice {
    #[cli(alias = "reference")]
    Best,
    #[cli(alias = "population")]
    Average,
    #[cli(alias = "both")]
    All,
}

impl PolicyChoice {
    pub fn policies(self) -> &'static [Policy] {
        match self {
            Self::Best => &[Policy::Best],
            Self::Average => &[Policy::Average],
            Self::All => Policy::ALL,
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            instances: String::new(),
            results: String::new(),
            solutions: String::new(),
            measure: MeasureChoice::All,
            policy: PolicyChoice::All,
            matrix: false,
            fail_on_mismatch: true,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            output: String::new(),
        }
    }
}

impl AnalysisOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.check()?;
        Ok(options)
    }

    fn check(&self) -> Result<()> {
        if !self.result_paths().is_empty() && self.instance_sources()?.is_empty() {
            return Err(Error::invalid_input(
                "--results requires --instances to validate against",
            ));
        }
        if self.result_paths().is_empty() && self.solutions_path().is_none() {
            return Err(Error::invalid_input(format!(
                "Nothing to do: pass --results and/or --solutions\n\n{}",
                Self::usage()
            )));
        }
        Ok(())
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tsp-lab --instances TSPA.csv,TSPB.csv\n",
            "          --results Greedy_TSPA_result.txt,Greedy_TSPB_result.txt\n",
            "  tsp-lab --solutions TSPA_solutions.csv [--measure edges] [--policy best]\n\n",
            "Options:\n",
            "  --instances <[TAG=]path,...>\n",
            "  --results <path,path,...>\n",
            "  --solutions <path>\n",
            "  --measure <nodes|edges|all>\n",
            "  --policy <best|average|all>\n",
            "  --matrix[=<bool>]\n",
            "  --no-matrix\n",
            "  --fail-on-mismatch[=<bool>]\n",
            "  --no-fail-on-mismatch\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --output <path>\n",
            "  --help\n",
        )
    }

    /// `(tag, path)` per instance entry; a bare path is tagged by its file stem.
    pub fn instance_sources(&self) -> Result<Vec<(String, PathBuf)>> {
        self.instances
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (tag, path) = match entry.split_once('=') {
                    Some((tag, path)) => (tag.trim().to_string(), PathBuf::from(path.trim())),
                    None => {
                        let path = PathBuf::from(entry);
                        let stem = path
                            .file_stem()
                            .map(|stem| stem.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        (stem, path)
                    }
                };
                if tag.is_empty() || path.as_os_str().is_empty() {
                    return Err(Error::invalid_input(format!(
                        "Invalid value for --instances: {entry} (expected TAG=path or path)"
                    )));
                }
                Ok((tag, path))
            })
            .collect()
    }

    pub fn solutions_path(&self) -> Option<&Path> {
        non_empty_path(&self.solutions)
    }

    pub fn result_paths(&self) -> Vec<PathBuf> {
        self.results
            .split(',')
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_empty_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_empty_path(&self.output)
    }
}

/// Empty and `-` mean "use the standard stream".
fn non_empty_path(value: &str) -> Option<&Path> {
    let value = value.trim();
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(Path::new(value))
    }
}
