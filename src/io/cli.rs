//! Command-line interface for walking a viewpoint across a generated world

use crate::algorithm::executor::OverlappingFactory;
use crate::algorithm::solver::SolverSettings;
use crate::analysis::patterns::Corpus;
use crate::control::controller::ControllerBuilder;
use crate::control::viewpoint::ViewpointTracker;
use crate::control::walk::{ViewpointWalker, WalkPlan};
use crate::io::canvas::TileCanvas;
use crate::io::configuration::{
    DEFAULT_BASE_VISIBLE_SIZE, DEFAULT_COOLDOWN_TICKS, DEFAULT_FOUNDATION,
    DEFAULT_ITERATION_BUDGET, DEFAULT_MOVE_SPEED, DEFAULT_PATTERN_SIZE, DEFAULT_SEED,
    DEFAULT_SYMMETRY, DEFAULT_WALK, FRAME_INTERVAL_TICKS, GIF_FRAME_DELAY_MS,
    VISUALIZATION_SUFFIX, WORLD_SUFFIX, WindowConfig,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_canvas_as_png;
use crate::io::progress::WalkProgress;
use crate::io::visualization::VisualizationCapture;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "infinitile")]
#[command(
    author,
    version,
    about = "Walk a viewpoint across an endless overlapping-pattern world"
)]
/// Command-line arguments for the walk driver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Corpus PNG the patterns are learned from
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for every solver run
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Observation budget per solver run (0 = unbounded)
    #[arg(short, long, default_value_t = DEFAULT_ITERATION_BUDGET)]
    pub iterations: usize,

    /// Visible window edge length in cells
    #[arg(short = 'S', long, default_value_t = DEFAULT_BASE_VISIBLE_SIZE)]
    pub size: usize,

    /// Overlapping pattern size N
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Rotation/reflection variants per pattern (1..=8)
    #[arg(short = 'y', long, default_value_t = DEFAULT_SYMMETRY)]
    pub symmetry: usize,

    /// Pattern index pinned to the bottom row (0 = none)
    #[arg(short, long, default_value_t = DEFAULT_FOUNDATION)]
    pub foundation: usize,

    /// Treat the corpus as wrapping when extracting patterns
    #[arg(long)]
    pub periodic_input: bool,

    /// Let the generated window wrap at its edges
    #[arg(long)]
    pub periodic_output: bool,

    /// Ticks to skip slide checks after a slide
    #[arg(short, long, default_value_t = DEFAULT_COOLDOWN_TICKS)]
    pub cooldown: u32,

    /// Scripted walk, e.g. "R40,UR20,I5,L10"
    #[arg(short, long, default_value = DEFAULT_WALK)]
    pub walk: String,

    /// Viewpoint speed in cells per second
    #[arg(long, default_value_t = DEFAULT_MOVE_SPEED)]
    pub speed: f32,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log window transitions at debug level
    #[arg(long)]
    pub verbose: bool,

    /// Directory for output files (defaults to the corpus directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Window configuration assembled from the flags
    pub const fn window_config(&self) -> WindowConfig {
        WindowConfig {
            base_visible_size: self.size,
            pattern_size: self.pattern_size,
            periodic_input: self.periodic_input,
            periodic_output: self.periodic_output,
            symmetry: self.symmetry,
            foundation: self.foundation,
            seed: self.seed,
            iteration_budget: self.iterations,
            cooldown_ticks: self.cooldown,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks debug over warn.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        debug!("log subscriber already installed, keeping it");
    }
}

/// Runs one walk over one corpus and writes the results
pub struct WalkProcessor {
    cli: Cli,
}

impl WalkProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the corpus, walk the viewpoint and export the world
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus, configuration or walk is invalid, if
    /// the controller hits a fatal fault, or if exporting fails
    pub fn process(&self) -> Result<()> {
        let config = self.cli.window_config();
        config.validate()?;
        if self.cli.speed <= 0.0 || !self.cli.speed.is_finite() {
            return Err(invalid_parameter(
                "speed",
                &self.cli.speed,
                &"must be a positive number of cells per second",
            ));
        }
        let plan: WalkPlan = self.cli.walk.parse()?;

        let corpus = Corpus::from_png_path(&self.cli.target)?;
        let factory = OverlappingFactory::new(&corpus, SolverSettings::from(&config))?;
        info!(
            patterns = factory.catalog().len(),
            colours = corpus.colour_count(),
            "corpus compiled"
        );

        let start = [0.0, 0.0];
        let mut controller = ControllerBuilder::new(config)
            .solver(factory)
            .renderer(TileCanvas::new(corpus.colour_count()))
            .build(start)?;

        let total_ticks = plan.total_ticks();
        let name = self
            .cli
            .target
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let progress = self
            .cli
            .should_show_progress()
            .then(|| WalkProgress::new(&name, total_ticks));
        let framing = ViewpointTracker::new(config.base_visible_size, start);
        let mut capture = self.cli.visualize.then(|| {
            VisualizationCapture::new(
                config.base_visible_size,
                corpus.palette().to_vec(),
                total_ticks / FRAME_INTERVAL_TICKS + 1,
            )
        });

        let walker = ViewpointWalker::new(plan, start).with_speed(self.cli.speed);
        for step in walker {
            controller.tick(step.position, step.direction)?;

            if step.tick % FRAME_INTERVAL_TICKS == 0 {
                if let Some(capture) = capture.as_mut() {
                    capture.record_frame(
                        controller.renderer(),
                        framing.desired_origin(step.position),
                        step.tick,
                    );
                }
            }
            if let Some(progress) = &progress {
                progress.update(step.tick + 1, controller.stats());
            }
        }

        if let Some(progress) = &progress {
            progress.finish();
        }

        let stats = controller.stats();
        info!(
            regenerations = stats.regenerations(),
            slides = stats.slides,
            extensions = stats.extensions,
            retractions = stats.retractions,
            swaps = stats.swaps,
            fallbacks = stats.fallbacks,
            incomplete = stats.incomplete_runs,
            presented = stats.presented_cells,
            "walk finished"
        );

        export_canvas_as_png(
            controller.renderer(),
            corpus.palette(),
            &self.output_path(WORLD_SUFFIX, "png"),
        )?;

        if let Some(capture) = &capture {
            capture.export_gif(
                &self.output_path(VISUALIZATION_SUFFIX, "gif"),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        Ok(())
    }

    fn output_path(&self, suffix: &str, extension: &str) -> PathBuf {
        let stem = self.cli.target.file_stem().unwrap_or_default();
        let file_name = format!("{}{suffix}.{extension}", stem.to_string_lossy());
        let directory = self
            .cli
            .output
            .as_deref()
            .or_else(|| self.cli.target.parent())
            .unwrap_or_else(|| Path::new(""));
        directory.join(file_name)
    }
}
