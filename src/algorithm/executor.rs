use crate::{
    algorithm::propagation::{Propagator, Wave},
    algorithm::selection::{Observation, choose_pattern, next_unobserved_cell},
    algorithm::solver::{RunOutcome, SolverFactory, SolverHandle, SolverSettings},
    analysis::patterns::Corpus,
    analysis::weights::PatternWeights,
    io::error::{AlgorithmError, Result, invalid_parameter, invalid_source},
    spatial::tiles::PatternCatalog,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::Arc;

/// Seeded random source for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `[0, 1)`
    pub fn roll(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Compiled training data shared by every handle of a factory
#[derive(Debug)]
struct Training {
    catalog: PatternCatalog,
    propagator: Propagator,
    weights: PatternWeights,
    settings: SolverSettings,
    colour_count: usize,
}

/// Factory for overlapping-model solver handles
///
/// Compiles the corpus once; each `create` call only allocates a wave.
#[derive(Debug, Clone)]
pub struct OverlappingFactory {
    training: Arc<Training>,
}

impl OverlappingFactory {
    /// Compile patterns, weights and adjacency rules from a corpus
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Pattern extraction rejects the settings or corpus size
    /// - The foundation index doesn't name an extracted pattern
    pub fn new(corpus: &Corpus, settings: SolverSettings) -> Result<Self> {
        let catalog = PatternCatalog::extract(
            corpus,
            settings.pattern_size,
            settings.periodic_input,
            settings.symmetry,
        )?;
        if catalog.is_empty() {
            return Err(invalid_source(&"corpus produced no patterns"));
        }
        if settings.foundation != 0 && settings.foundation >= catalog.len() {
            return Err(invalid_parameter(
                "foundation",
                &settings.foundation,
                &format!("only {} patterns were extracted", catalog.len()),
            ));
        }

        let propagator = Propagator::build(&catalog);
        let weights = PatternWeights::from_counts(catalog.counts());

        Ok(Self {
            training: Arc::new(Training {
                catalog,
                propagator,
                weights,
                settings,
                colour_count: corpus.colour_count(),
            }),
        })
    }

    /// Patterns the factory compiled
    pub fn catalog(&self) -> &PatternCatalog {
        &self.training.catalog
    }
}

impl SolverFactory for OverlappingFactory {
    type Handle = OverlappingModel;

    fn create(&self, width: usize, height: usize) -> Result<Self::Handle> {
        let n = self.training.settings.pattern_size;
        if width < n || height < n {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{width}x{height}"),
                &format!("solver grid must fit one {n}x{n} pattern"),
            ));
        }
        Ok(OverlappingModel {
            training: Arc::clone(&self.training),
            width,
            height,
            wave: None,
            seeds: Vec::new(),
            selector: None,
            status: ModelStatus::Fresh,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelStatus {
    Fresh,
    Running,
    Resolved,
    Contradiction,
}

/// Overlapping wave function collapse over one window-sized grid
///
/// Seeds recorded by `constrain` are applied when the first `run` starts,
/// after the foundation row. Later runs continue from the current wave.
pub struct OverlappingModel {
    training: Arc<Training>,
    width: usize,
    height: usize,
    wave: Option<Wave>,
    /// Pending (cell, colour) seeds
    seeds: Vec<(usize, usize)>,
    selector: Option<RandomSelector>,
    status: ModelStatus,
}

impl OverlappingModel {
    fn check_bounds(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(AlgorithmError::SampleOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x + y * self.width)
    }

    /// Build the wave, pin the foundation and apply seeds
    fn start(&mut self, seed: u64) {
        let training = &*self.training;
        let settings = training.settings;
        let mut wave = Wave::new(
            self.width,
            self.height,
            settings.pattern_size,
            settings.periodic_output,
            &training.propagator,
            &training.weights,
        );

        if settings.foundation != 0 {
            let pattern_count = training.catalog.len();
            for x in 0..self.width {
                let ground = wave.index(x, 0);
                for t in (0..pattern_count).filter(|&t| t != settings.foundation) {
                    wave.ban(ground, t, &training.weights);
                }
                for y in 1..self.height {
                    let cell = wave.index(x, y);
                    wave.ban(cell, settings.foundation, &training.weights);
                }
            }
        }

        for &(cell, colour) in &self.seeds {
            let mismatched: Vec<usize> = wave
                .cell(cell)
                .map(|set| {
                    set.iter()
                        .filter(|&t| training.catalog.anchor_colour(t) != Some(colour))
                        .collect()
                })
                .unwrap_or_default();
            for t in mismatched {
                wave.ban(cell, t, &training.weights);
            }
        }

        self.status = if wave.propagate(&training.propagator, &training.weights) {
            ModelStatus::Running
        } else {
            ModelStatus::Contradiction
        };
        self.wave = Some(wave);
        self.selector = Some(RandomSelector::new(seed));
    }
}

impl SolverHandle for OverlappingModel {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn constrain(&mut self, x: usize, y: usize, tile: usize) -> Result<()> {
        let cell = self.check_bounds(x, y)?;
        if self.status != ModelStatus::Fresh {
            return Err(invalid_parameter(
                "constrain",
                &format!("({x}, {y})"),
                &"seeds must be applied before the solver runs",
            ));
        }
        if tile >= self.training.colour_count {
            return Err(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: self.training.colour_count,
            });
        }
        self.seeds.push((cell, tile));
        Ok(())
    }

    fn run(&mut self, seed: u64, iteration_budget: usize) -> RunOutcome {
        if self.status == ModelStatus::Fresh {
            self.start(seed);
        }
        match self.status {
            ModelStatus::Resolved => return RunOutcome::Resolved,
            ModelStatus::Contradiction => return RunOutcome::Contradiction,
            ModelStatus::Fresh | ModelStatus::Running => {}
        }

        let training = &*self.training;
        let (Some(wave), Some(selector)) = (self.wave.as_mut(), self.selector.as_mut()) else {
            return RunOutcome::Incomplete;
        };

        let mut observations = 0;
        while iteration_budget == 0 || observations < iteration_budget {
            match next_unobserved_cell(wave, || selector.roll()) {
                Observation::Finished => {
                    self.status = ModelStatus::Resolved;
                    return RunOutcome::Resolved;
                }
                Observation::Contradiction => {
                    self.status = ModelStatus::Contradiction;
                    return RunOutcome::Contradiction;
                }
                Observation::Cell(cell) => {
                    let roll = selector.roll();
                    let chosen = wave
                        .cell(cell)
                        .and_then(|set| choose_pattern(set, &training.weights, roll));
                    if let Some(pattern) = chosen {
                        wave.collapse(cell, pattern, &training.weights);
                    }
                    if !wave.propagate(&training.propagator, &training.weights) {
                        self.status = ModelStatus::Contradiction;
                        return RunOutcome::Contradiction;
                    }
                }
            }
            observations += 1;
        }

        RunOutcome::Incomplete
    }

    fn sample(&self, x: usize, y: usize) -> Result<Option<usize>> {
        let cell = self.check_bounds(x, y)?;
        let Some(wave) = &self.wave else {
            return Ok(None);
        };
        let Some(set) = wave.cell(cell) else {
            return Ok(None);
        };

        let catalog = &self.training.catalog;
        let mut colours = set.iter().map(|t| catalog.anchor_colour(t));
        let Some(first) = colours.next().flatten() else {
            return Ok(None);
        };
        if colours.all(|colour| colour == Some(first)) {
            Ok(Some(first))
        } else {
            Ok(None)
        }
    }
}
