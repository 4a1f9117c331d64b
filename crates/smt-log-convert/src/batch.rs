//! Sequential batch run over every planned file, with per-file isolation.

use anyhow::Context;
use serde::Serialize;
use std::path::Path;

use smt_log_core::summary::{ErrorSummary, OperateSummary};
use smt_log_core::{
    ConvertOutcome, ErrorEvent, EventSink, GrammarStyle, LogFamily, LogResult, LogSource,
    OperateEvent, convert,
};

use crate::config::{ConverterConfig, Machine};
use crate::plan::{ConvertJob, machine_output_dir, plan};

/// File name of the per-machine summary document.
pub const SUMMARY_FILE: &str = "Summary.json";

/// Result for one planned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Written { lines: usize, events: usize },
    Skipped,
    Failed { error: String },
}

impl From<ConvertOutcome> for FileStatus {
    fn from(outcome: ConvertOutcome) -> Self {
        match outcome {
            ConvertOutcome::Written { lines, events } => Self::Written { lines, events },
            ConvertOutcome::Skipped => Self::Skipped,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub machine: Option<String>,
    pub family: LogFamily,
    pub input: String,
    pub output: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub summaries_written: usize,
    pub summary_errors: Vec<String>,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Written { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Skipped))
    }

    /// Failed files plus failed summaries.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Failed { .. })) + self.summary_errors.len()
    }

    fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.status)).count()
    }
}

/// Per-machine dashboard figures written as `Summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct MachineSummary {
    pub machine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operate: Option<OperateSummary>,
}

/// Convert every planned file in order, one at a time.
///
/// A failed file is recorded and the run moves on, unless `fail_fast` is set,
/// in which case the first failure aborts the run.
pub async fn run_batch(
    config: &ConverterConfig,
    source: &dyn LogSource,
    sink: &dyn EventSink,
) -> anyhow::Result<BatchReport> {
    let jobs = plan(config);
    tracing::info!(
        jobs = jobs.len(),
        machines = config.machines.len(),
        log_dir = %config.log_dir.display(),
        output_dir = %config.output_dir.display(),
        "starting conversion"
    );

    let mut report = BatchReport::default();
    for job in &jobs {
        tracing::info!(
            machine = job.machine_id(),
            family = %job.family,
            path = %job.input,
            "processing log"
        );
        let status = match convert(
            source,
            sink,
            &job.input,
            &job.output,
            job.family,
            &config.parse,
        )
        .await
        {
            Ok(outcome) => FileStatus::from(outcome),
            Err(e) => {
                tracing::error!(
                    machine = job.machine_id(),
                    path = %job.input,
                    error = %e,
                    "conversion failed"
                );
                if config.fail_fast {
                    return Err(e).with_context(|| format!("converting {}", job.input));
                }
                FileStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        report.files.push(FileReport {
            machine: job.machine.as_ref().map(|m| m.id.clone()),
            family: job.family,
            input: job.input.clone(),
            output: job.output.clone(),
            status,
        });
    }

    if config.write_summary {
        write_summaries(config, sink, &jobs, &mut report).await?;
    }

    tracing::info!(
        written = report.written(),
        skipped = report.skipped(),
        failed = report.failed(),
        "conversion finished"
    );
    Ok(report)
}

async fn write_summaries(
    config: &ConverterConfig,
    sink: &dyn EventSink,
    jobs: &[ConvertJob],
    report: &mut BatchReport,
) -> anyhow::Result<()> {
    if config.parse.style != GrammarStyle::Structured {
        tracing::warn!("summaries need the structured grammar, skipping");
        return Ok(());
    }

    let mut machines: Vec<Option<&Machine>> = Vec::new();
    for job in jobs {
        let m = job.machine.as_ref();
        if !machines.contains(&m) {
            machines.push(m);
        }
    }

    for machine in machines {
        let own: Vec<&ConvertJob> = jobs
            .iter()
            .filter(|j| j.machine.as_ref() == machine)
            .collect();
        let dest = Path::new(&machine_output_dir(config, machine))
            .join(SUMMARY_FILE)
            .display()
            .to_string();
        match summarize_machine(sink, machine, &own, &dest).await {
            Ok(()) => report.summaries_written += 1,
            Err(e) => {
                tracing::error!(path = %dest, error = %e, "summary failed");
                if config.fail_fast {
                    return Err(e).with_context(|| format!("summarizing into {dest}"));
                }
                report.summary_errors.push(format!("{dest}: {e}"));
            }
        }
    }
    Ok(())
}

async fn summarize_machine(
    sink: &dyn EventSink,
    machine: Option<&Machine>,
    jobs: &[&ConvertJob],
    dest: &str,
) -> LogResult<()> {
    let mut summary = MachineSummary {
        machine: machine.map(|m| m.id.clone()),
        error: None,
        operate: None,
    };

    for job in jobs {
        let Some(body) = sink.read(&job.output).await? else {
            continue;
        };
        match job.family {
            LogFamily::Error => {
                let events: Vec<ErrorEvent> = serde_json::from_str(&body)?;
                summary.error = Some(ErrorSummary::from_events(&events));
            }
            LogFamily::Operate => {
                let events: Vec<OperateEvent> = serde_json::from_str(&body)?;
                summary.operate = Some(OperateSummary::from_events(&events));
            }
        }
    }

    let body = serde_json::to_string_pretty(&summary)?;
    sink.write(dest, &body).await?;
    tracing::info!(path = %dest, "wrote summary");
    Ok(())
}
