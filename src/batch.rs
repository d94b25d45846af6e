//! Folder-level batch processing.
//!
//! Every `.pdf` file in the input directory (extension compared
//! case-insensitively) becomes a `<stem>.json` file in the output directory.
//! A file that cannot be read or written is reported and skipped; it never
//! stops the rest of the batch. When two inputs map to the same JSON name
//! (`a.pdf` and `a.PDF`), the first in sorted order wins and the other is
//! skipped.
//!
//! # Example
//!
//! ```no_run
//! use pdf_outline::batch::{BatchConfig, BatchProcessor};
//! use std::time::Duration;
//!
//! let config = BatchConfig::new("./pdfs", "./outlines")
//!     .with_timeout(Duration::from_secs(30));
//! let report = BatchProcessor::new(config).run()?;
//! println!("{} written, {} skipped", report.written_count(), report.failed_count());
//! # Ok::<(), pdf_outline::Error>(())
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::extract_outline_from_file;
use crate::outline::OutlineOptions;
use crate::parser::ParseOptions;
use crate::render::{to_json_bytes, JsonFormat};

/// Default input directory.
pub const DEFAULT_INPUT_DIR: &str = "/app/input";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "/app/output";

/// Batch configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory scanned for PDF files (not recursive)
    pub input_dir: PathBuf,

    /// Directory receiving the JSON files; created if absent
    pub output_dir: PathBuf,

    /// Process files on the rayon thread pool
    pub parallel: bool,

    /// Per-file time limit
    pub timeout: Option<Duration>,

    /// JSON layout of the output files
    pub json_format: JsonFormat,

    /// Outline extraction options
    pub outline: OutlineOptions,

    /// PDF parsing options
    pub parse: ParseOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            parallel: true,
            timeout: None,
            json_format: JsonFormat::Pretty,
            outline: OutlineOptions::default(),
            parse: ParseOptions::new().lenient(),
        }
    }
}

impl BatchConfig {
    /// Create a configuration for the given directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set a per-file time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Set outline extraction options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline = options;
        self
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Output path for an input file: `<output_dir>/<stem>.json`.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default();
        let mut name = stem.to_os_string();
        name.push(".json");
        self.output_dir.join(name)
    }
}

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The JSON file was written.
    Written {
        /// Path of the JSON file
        output: PathBuf,
        /// Number of outline entries
        headings: usize,
    },
    /// The file was skipped.
    Failed(Error),
}

/// Per-file entry of a [`BatchReport`].
#[derive(Debug)]
pub struct FileReport {
    /// Input PDF
    pub input: PathBuf,
    /// Result
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Check if the output was written.
    pub fn is_written(&self) -> bool {
        matches!(self.outcome, FileOutcome::Written { .. })
    }

    /// The error, if the file was skipped.
    pub fn error(&self) -> Option<&Error> {
        match &self.outcome {
            FileOutcome::Failed(e) => Some(e),
            FileOutcome::Written { .. } => None,
        }
    }
}

/// Summary of a batch run, in input-file order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per discovered PDF
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Files whose JSON was written.
    pub fn written(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.is_written())
    }

    /// Files that were skipped.
    pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.is_written())
    }

    /// Number of files written.
    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    /// Number of files skipped.
    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }
}

/// Runs a batch described by a [`BatchConfig`].
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a processor.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// List the PDF files of the input directory, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for entry in fs::read_dir(&self.config.input_dir)? {
            let path = entry?.path();
            if path.is_file() && has_pdf_extension(&path) {
                inputs.push(path);
            }
        }
        inputs.sort();
        Ok(inputs)
    }

    /// Process every PDF of the input directory.
    ///
    /// Fails only when the input directory cannot be listed or the output
    /// directory cannot be created; per-file problems land in the report.
    pub fn run(&self) -> Result<BatchReport> {
        self.run_with_progress(|_| {})
    }

    /// Like [`run`](Self::run), calling `on_file` as each file finishes.
    pub fn run_with_progress<F>(&self, on_file: F) -> Result<BatchReport>
    where
        F: Fn(&FileReport) + Sync,
    {
        let inputs = self.discover()?;
        fs::create_dir_all(&self.config.output_dir)?;
        log::info!(
            "Processing {} PDF files from {}",
            inputs.len(),
            self.config.input_dir.display()
        );

        let jobs = self.assign_outputs(inputs);

        let process = |(input, claimed_by): &(PathBuf, Option<PathBuf>)| {
            let report = match claimed_by {
                None => self.process_file(input),
                Some(first) => {
                    let output = self.config.output_path_for(input);
                    log::warn!(
                        "Skipping {}: {} is already written for {}",
                        input.display(),
                        output.display(),
                        first.display()
                    );
                    FileReport {
                        input: input.clone(),
                        outcome: FileOutcome::Failed(Error::DuplicateOutput {
                            output,
                            first: first.clone(),
                        }),
                    }
                }
            };
            on_file(&report);
            report
        };

        let files: Vec<FileReport> = if self.config.parallel {
            jobs.par_iter().map(process).collect()
        } else {
            jobs.iter().map(process).collect()
        };

        Ok(BatchReport { files })
    }

    /// Pair each input with the earlier input that already owns its output
    /// path, if any.
    fn assign_outputs(&self, inputs: Vec<PathBuf>) -> Vec<(PathBuf, Option<PathBuf>)> {
        let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
        inputs
            .into_iter()
            .map(|input| {
                let output = self.config.output_path_for(&input);
                let claimed_by = owners.get(&output).cloned();
                if claimed_by.is_none() {
                    owners.insert(output, input.clone());
                }
                (input, claimed_by)
            })
            .collect()
    }

    /// Extract one file and write its JSON.
    pub fn process_file(&self, input: &Path) -> FileReport {
        log::info!("Processing {}", input.display());

        let outcome = match self.write_outline(input) {
            Ok((output, headings)) => {
                log::info!("Wrote {} ({} headings)", output.display(), headings);
                FileOutcome::Written { output, headings }
            }
            Err(e) => {
                if e.is_open_failure() {
                    log::warn!("Skipping unreadable {}: {}", input.display(), e);
                } else {
                    log::warn!("Skipping {}: {}", input.display(), e);
                }
                FileOutcome::Failed(e)
            }
        };

        FileReport {
            input: input.to_path_buf(),
            outcome,
        }
    }

    fn write_outline(&self, input: &Path) -> Result<(PathBuf, usize)> {
        let result = match self.config.timeout {
            Some(limit) => extract_with_timeout(input, &self.config, limit)?,
            None => extract_outline_from_file(input, &self.config.parse, &self.config.outline)?,
        };

        let bytes = to_json_bytes(&result, self.config.json_format)?;
        let output = self.config.output_path_for(input);
        write_atomic(&output, &bytes)?;
        Ok((output, result.outline.len()))
    }
}

/// Run extraction on a worker thread and give up after `limit`.
///
/// A worker that overruns is detached; its result is discarded.
fn extract_with_timeout(
    input: &Path,
    config: &BatchConfig,
    limit: Duration,
) -> Result<crate::model::DocumentResult> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let path = input.to_path_buf();
    let parse = config.parse.clone();
    let outline = config.outline.clone();

    thread::Builder::new()
        .name("pdf-outline-worker".to_string())
        .spawn(move || {
            // The receiver is gone if the caller already timed out.
            let _ = tx.send(extract_outline_from_file(&path, &parse, &outline));
        })?;

    match rx.recv_timeout(limit) {
        Ok(result) => result,
        Err(crossbeam_channel::RecvTimeoutError::Timeout) => Err(Error::Timeout(limit)),
        Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
            Err(Error::Other("extraction worker exited without a result".to_string()))
        }
    }
}

/// Write through a temporary sibling and rename, so a failed write never
/// leaves a partial file under the final name.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    if let Err(e) = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("/app/input"));
        assert_eq!(config.output_dir, PathBuf::from("/app/output"));
        assert!(config.parallel);
        assert!(config.timeout.is_none());
        assert_eq!(config.json_format, JsonFormat::Pretty);
        assert_eq!(config.parse.error_mode, crate::parser::ErrorMode::Lenient);
    }

    #[test]
    fn test_config_builder() {
        let config = BatchConfig::new("in", "out")
            .sequential()
            .with_timeout(Duration::from_secs(5))
            .with_json_format(JsonFormat::Compact)
            .with_outline_options(OutlineOptions::new().with_title_in_outline(true));

        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert!(!config.parallel);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.json_format, JsonFormat::Compact);
        assert!(config.outline.keep_title_in_outline);
    }

    #[test]
    fn test_output_path_for() {
        let config = BatchConfig::new("in", "out");
        assert_eq!(
            config.output_path_for(Path::new("in/report.PDF")),
            PathBuf::from("out/report.json")
        );
        assert_eq!(
            config.output_path_for(Path::new("in/v1.2.notes.pdf")),
            PathBuf::from("out/v1.2.notes.json")
        );
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "A.PDF", "c.txt", "d.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let processor = BatchProcessor::new(BatchConfig::new(dir.path(), dir.path().join("out")));
        let names: Vec<String> = processor
            .discover()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["A.PDF", "b.pdf"]);
    }

    #[test]
    fn test_missing_input_dir_fails_batch() {
        let dir = tempfile::tempdir().unwrap();
        let processor = BatchProcessor::new(BatchConfig::new(
            dir.path().join("missing"),
            dir.path().join("out"),
        ));
        assert!(matches!(processor.run(), Err(Error::Io(_))));
    }

    #[test]
    fn test_non_pdf_content_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fake.pdf"), b"not really a pdf").unwrap();
        let out = dir.path().join("out");

        let report = BatchProcessor::new(BatchConfig::new(dir.path(), &out).sequential())
            .run()
            .unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(matches!(report.files[0].error(), Some(Error::UnknownFormat)));
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_colliding_stems_write_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Report.PDF"), b"first").unwrap();
        fs::write(dir.path().join("Report.pdf"), b"second").unwrap();
        fs::write(dir.path().join("Other.pdf"), b"third").unwrap();
        let out = dir.path().join("out");

        let report = BatchProcessor::new(BatchConfig::new(dir.path(), &out))
            .run()
            .unwrap();

        assert_eq!(report.files.len(), 3);
        let duplicates: Vec<&FileReport> = report
            .files
            .iter()
            .filter(|f| matches!(f.error(), Some(Error::DuplicateOutput { .. })))
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert!(duplicates[0].input.ends_with("Report.pdf"));
        match duplicates[0].error() {
            Some(Error::DuplicateOutput { output, first }) => {
                assert_eq!(output, &out.join("Report.json"));
                assert!(first.ends_with("Report.PDF"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_write_atomic_replaces_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("doc.json");
        fs::write(&target, b"old").unwrap();

        write_atomic(&target, b"new").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert!(!dir.path().join("doc.json.tmp").exists());

        let missing_dir = dir.path().join("nope").join("doc.json");
        assert!(write_atomic(&missing_dir, b"x").is_err());
        assert!(!missing_dir.exists());
    }
}
