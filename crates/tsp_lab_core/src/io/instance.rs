//! Instance files: one `x;y;cost` row per node, no header. The row
//! position is the node id.

use std::path::{Path, PathBuf};

use crate::{Error, Instance, InstanceCatalog, NodeRecord, Result};

const FIELD_SEPARATOR: char = ';';
const FIELDS_PER_ROW: usize = 3;

pub fn read_instance(path: &Path) -> Result<Instance> {
    let text = super::read_text(path)?;
    let instance = parse_instance(&text)?;
    log::debug!(
        "instance: path={} nodes={}",
        path.display(),
        instance.len()
    );
    Ok(instance)
}

/// Reads every `(tag, path)` source into one catalog.
pub fn read_catalog(sources: &[(String, PathBuf)]) -> Result<InstanceCatalog> {
    let mut catalog = InstanceCatalog::default();
    for (tag, path) in sources {
        catalog.insert(tag.as_str(), read_instance(path)?)?;
    }
    Ok(catalog)
}

pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut records = Vec::new();
    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        records.push(parse_row(idx + 1, line)?);
    }

    if records.is_empty() {
        return Err(Error::invalid_input("Instance file contains no nodes."));
    }

    Ok(Instance::from_records(records))
}

fn parse_row(line_no: usize, line: &str) -> Result<NodeRecord> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() != FIELDS_PER_ROW {
        return Err(Error::invalid_data(format!(
            "Line {line_no}: expected 'x;y;cost' but got {} fields: {line}",
            fields.len()
        )));
    }

    let parse = |label: &str, raw: &str| -> Result<f64> {
        raw.parse::<f64>().map_err(|_| {
            Error::invalid_data(format!("Line {line_no}: invalid {label}: {raw}"))
        })
    };
    let record = NodeRecord::new(
        parse("x", fields[0])?,
        parse("y", fields[1])?,
        parse("cost", fields[2])?,
    );

    if !record.is_valid() {
        return Err(Error::invalid_data(format!(
            "Line {line_no}: values must be finite: {line}"
        )));
    }
    Ok(record)
}
