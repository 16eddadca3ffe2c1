//! Command-line interface for batch generation from PNG samples

use crate::algorithm::model::TileModel;
use crate::algorithm::session::{RunOutcome, Session};
use crate::analysis::patterns::TileModelBuilder;
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE,
    DEFAULT_SEED, DEFAULT_STEP_LIMIT, DEFAULT_SYMMETRY, OUTPUT_SUFFIX, PROGRESS_UPDATE_STEPS,
};
use crate::io::error::{Result, invalid_parameter, invalid_path};
use crate::io::image::{SampleImage, export_result_as_png};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate tile patterns with overlapping wave function collapse"
)]
/// Command-line arguments for the pattern generation tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for the first attempt; attempt k uses seed + k
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Side length of the patterns cut from the sample
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Number of rotation/reflection variants per pattern (1-8)
    #[arg(short = 'S', long, default_value_t = DEFAULT_SYMMETRY)]
    pub symmetry: usize,

    /// Wrap the sample edges when cutting patterns
    #[arg(short, long)]
    pub periodic: bool,

    /// Maximum steps per attempt (0 is unbounded)
    #[arg(short, long, default_value_t = DEFAULT_STEP_LIMIT)]
    pub limit: usize,

    /// Seeds to try before exporting a partial result
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log solver events at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter when `RUST_LOG` is not set
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Outcome of processing one sample file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    /// Where the result image was written
    pub output: PathBuf,
    /// Attempts used, counting the successful one
    pub attempts: usize,
    /// Seed of the exported attempt
    pub seed: u64,
    /// Outcome of the exported attempt
    pub outcome: RunOutcome,
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid, the target cannot be
    /// read, or a sample cannot be loaded, modelled or exported
    pub fn process(&mut self) -> Result<Vec<FileReport>> {
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"must be at least 1",
            ));
        }

        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut reports = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            reports.push(self.process_file(file, index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(reports)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_path(target, &"Target file must be a PNG image"));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                Vec::new()
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_png(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_path(target, &"Target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<FileReport> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        let sample = SampleImage::from_png_file(input_path)?;
        let palette = TileModelBuilder::new(self.cli.pattern_size)?
            .periodic(self.cli.periodic)
            .symmetry(self.cli.symmetry)?
            .build(sample.pixels())?;
        let model = TileModel::new(palette, self.cli.width, self.cli.height)?;
        info!(
            file = %input_path.display(),
            colors = sample.color_count(),
            tiles = model.palette().len(),
            "Learned model"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, model.width() * model.height());
        }

        let mut last = None;
        for attempt in 0..self.cli.attempts {
            let seed = self.cli.seed.wrapping_add(attempt as u64);
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_attempt(index, attempt + 1);
            }

            let mut session = model.init(seed);
            let outcome = self.solve(&mut session, index);
            debug!(attempt, seed, ?outcome, steps = session.steps(), "Attempt finished");

            let succeeded = outcome.is_success();
            last = Some((attempt + 1, seed, outcome, session));
            if succeeded {
                break;
            }
        }

        let Some((attempts, seed, outcome, session)) = last else {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"must be at least 1",
            ));
        };

        if !outcome.is_success() {
            warn!(
                file = %input_path.display(),
                attempts,
                ?outcome,
                "No attempt succeeded, exporting partial result"
            );
        }

        export_result_as_png(
            &session.result(),
            session.width(),
            session.height(),
            sample.colors(),
            &output_path,
        )?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, outcome.is_success());
        }
        info!(
            output = %output_path.display(),
            seed,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Exported result"
        );

        Ok(FileReport {
            output: output_path,
            attempts,
            seed,
            outcome,
        })
    }

    /// Run one attempt within the step limit, refreshing progress in chunks
    fn solve(&mut self, session: &mut Session, index: usize) -> RunOutcome {
        let limit = self.cli.limit;
        loop {
            let chunk = if limit == 0 {
                PROGRESS_UPDATE_STEPS
            } else {
                let remaining = limit.saturating_sub(session.steps());
                if remaining == 0 {
                    return RunOutcome::Incomplete;
                }
                remaining.min(PROGRESS_UPDATE_STEPS)
            };

            let outcome = session.run(chunk);
            if let Some(ref mut pm) = self.progress_manager {
                let resolved = session.resolved_indices().iter().flatten().count();
                pm.update_resolved(index, resolved);
            }

            if outcome != RunOutcome::Incomplete {
                return outcome;
            }
        }
    }

    /// Output path for a sample: `<stem>_result.<ext>` next to the input
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
