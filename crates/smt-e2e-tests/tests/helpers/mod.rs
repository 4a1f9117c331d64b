//! Shared harness for end-to-end tests.
//!
//! Lays out a scratch log directory and output directory, then runs the
//! batch converter through `FileLogSource` / `FileSink`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use smt_log_convert::batch::{BatchReport, run_batch};
use smt_log_convert::config::{ConverterConfig, Machine};
use smt_log_core::{FileLogSource, FileSink};

pub const ERROR_LOG: &[&str] = &[
    "01/15/24 08:30:01 WARNING Feeder F12 Part R1234.056 Failed to pick up a part properly Part R1234.056",
    "01/15/24 08:30:05 WARNING [W0412] Vacuum level low F12 Head1",
    "",
    "garbage line without a stamp",
    "01/15/24 08:31:10 Head3 Clamp Locked",
    "01/15/24 08:32:00 ERROR [E2011] The retry count for part pickup was exceeded Feeder F7 Part C0402",
    "01/15/24 08:40:00 FREEZE [F0001] Machine halted",
];

pub const OPERATE_LOG: &[&str] = &[
    "01/15/24 08:00:00 Production started",
    "01/15/24 08:05:10 [LMEvent::RID_EVENT_PCB] Board completed",
    "01/15/24 08:06:00 Pickup R12 nozzle swap",
    "01/15/24 08:07:30 [LMEvent::RID_EVENT_PCB] Board completed",
];

pub struct TestHarness {
    /// Holds the scratch directory alive for the harness lifetime.
    pub dir: TempDir,
    pub log_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let log_dir = dir.path().join("logs");
        let output_dir = dir.path().join("public");
        std::fs::create_dir_all(&log_dir).expect("create log dir");
        Self {
            dir,
            log_dir,
            output_dir,
        }
    }

    /// Write a raw log file under the log directory.
    pub fn write_log(&self, file: &str, lines: &[&str]) {
        std::fs::write(self.log_dir.join(file), lines.join("\n")).expect("write log");
    }

    /// Place a file directly under the output directory.
    pub fn write_output(&self, rel: &str, body: &str) {
        let path = self.output_dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create output dir");
        }
        std::fs::write(path, body).expect("write output");
    }

    pub fn config(&self, machines: &[(&str, &str)]) -> ConverterConfig {
        ConverterConfig {
            log_dir: self.log_dir.clone(),
            output_dir: self.output_dir.clone(),
            machines: machines
                .iter()
                .map(|(id, name)| Machine {
                    id: (*id).into(),
                    name: (*name).into(),
                })
                .collect(),
            ..ConverterConfig::default()
        }
    }

    pub async fn run(&self, config: &ConverterConfig) -> BatchReport {
        run_batch(config, &FileLogSource, &FileSink)
            .await
            .expect("batch run")
    }

    pub fn output_path(&self, rel: &str) -> PathBuf {
        self.output_dir.join(rel)
    }

    pub fn read_output(&self, rel: &str) -> Option<String> {
        read_opt(&self.output_path(rel))
    }

    pub fn read_json(&self, rel: &str) -> serde_json::Value {
        let body = self.read_output(rel).expect("output exists");
        serde_json::from_str(&body).expect("valid json")
    }
}

fn read_opt(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}
