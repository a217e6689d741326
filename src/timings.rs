use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::Serialize;

use crate::error::{ExportError, Result};
use crate::prism::save_atomic;

#[derive(Debug, Serialize)]
struct StageRecord<'a> {
    stage: &'a str,
    seconds: f64,
}

/// Wall clock durations of named run stages.
#[derive(Debug, Default)]
pub struct Timings {
    running: HashMap<String, Instant>,
    stages: Vec<(String, Duration)>,
}

impl Timings {
    pub fn new() -> Timings {
        Timings::default()
    }

    pub fn start(&mut self, stage: &str) {
        self.running.insert(stage.to_string(), Instant::now());
    }

    /// Stop `stage` and record its duration. Stopping a stage that was
    /// never started records nothing.
    pub fn stop(&mut self, stage: &str) -> Option<Duration> {
        let Some(started) = self.running.remove(stage) else {
            warn!("Timing stage '{}' stopped without being started", stage);
            return None;
        };
        let elapsed = started.elapsed();
        debug!("{}: {:.6} s", stage, elapsed.as_secs_f64());
        self.stages.push((stage.to_string(), elapsed));
        Some(elapsed)
    }

    /// Completed stages in the order they were stopped.
    pub fn stages(&self) -> &[(String, Duration)] {
        &self.stages
    }

    /// Write completed stages as CSV with a `stage,seconds` header.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for (stage, elapsed) in &self.stages {
            wtr.serialize(StageRecord { stage: stage.as_str(), seconds: elapsed.as_secs_f64() })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Save as CSV. The file is replaced whole or not at all.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf).map_err(|e| ExportError::io(path, io::Error::from(e)))?;
        save_atomic(path, &buf)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn records_stages_in_stop_order() {
        // Arrange
        let mut timings = Timings::new();
        // Act
        timings.start("Load");
        timings.start("Encode");
        timings.stop("Encode");
        timings.stop("Load");
        // Assert
        let names: Vec<&str> = timings.stages().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Encode", "Load"]);
    }

    #[test]
    fn stop_without_start_is_ignored() {
        let mut timings = Timings::new();
        assert!(timings.stop("Write").is_none());
        assert!(timings.stages().is_empty());
    }

    #[test]
    fn save_writes_csv() {
        // Arrange
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiger_d95_h10_Timings");
        let mut timings = Timings::new();
        timings.start("Encode");
        timings.stop("Encode");
        // Act
        timings.save(&path).unwrap();
        // Assert
        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["stage", "seconds"]);
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Encode");
        assert!(rows[0][1].parse::<f64>().unwrap() >= 0.0);
    }

    #[test]
    fn save_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let result = Timings::new().save(&dir.path().join("missing").join("t"));
        assert!(matches!(result, Err(ExportError::IoError { .. })));
    }

    #[test]
    fn save_replaces_previous_timings() {
        // Arrange
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid_d50_h3_Timings");
        std::fs::write(&path, "stale,row,with,extra,columns\n".repeat(100)).unwrap();
        let mut timings = Timings::new();
        timings.start("Write");
        timings.stop("Write");
        // Act
        timings.save(&path).unwrap();
        // Assert
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("stage,seconds\n"));
        assert!(!text.contains("stale"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
