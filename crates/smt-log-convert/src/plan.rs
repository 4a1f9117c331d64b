//! Expands a [`ConverterConfig`] into the ordered list of files to convert.

use std::path::Path;

use smt_log_core::LogFamily;

use crate::config::{ConverterConfig, Machine};

/// One input file and where its JSON goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertJob {
    /// Owning machine, `None` for the unprefixed single-machine layout.
    pub machine: Option<Machine>,
    pub family: LogFamily,
    pub input: String,
    pub output: String,
}

impl ConvertJob {
    /// Machine id for log fields and reports.
    pub fn machine_id(&self) -> &str {
        self.machine.as_ref().map_or("-", |m| m.id.as_str())
    }
}

/// Jobs in processing order: machine by machine, families in config order.
///
/// With machines, reads `<log_dir>/<name>_<Family>.log` and writes
/// `<output_dir>/<id>/<Family>.json`. Without, reads `<log_dir>/<Family>.log`
/// and writes `<output_dir>/<Family>.json`.
pub fn plan(config: &ConverterConfig) -> Vec<ConvertJob> {
    if config.machines.is_empty() {
        return config
            .families
            .iter()
            .map(|&family| ConvertJob {
                machine: None,
                family,
                input: path_string(&config.log_dir, &format!("{family}.log")),
                output: path_string(&config.output_dir, &format!("{family}.json")),
            })
            .collect();
    }

    let mut jobs = Vec::with_capacity(config.machines.len() * config.families.len());
    for machine in &config.machines {
        let machine_dir = config.output_dir.join(&machine.id);
        for &family in &config.families {
            jobs.push(ConvertJob {
                machine: Some(machine.clone()),
                family,
                input: path_string(&config.log_dir, &format!("{}_{family}.log", machine.name)),
                output: path_string(&machine_dir, &format!("{family}.json")),
            });
        }
    }
    jobs
}

/// Directory that holds a machine's documents.
pub fn machine_output_dir(config: &ConverterConfig, machine: Option<&Machine>) -> String {
    match machine {
        Some(m) => config.output_dir.join(&m.id).display().to_string(),
        None => config.output_dir.display().to_string(),
    }
}

fn path_string(dir: &Path, file: &str) -> String {
    dir.join(file).display().to_string()
}
