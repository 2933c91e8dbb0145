//! Single entry point for every window geometry change
//!
//! A regeneration runs strictly in order: capture resolved cells from the
//! active handle, move the window, discard the handle and its render state,
//! build a fresh handle, re-seed captured cells, run, then present. A seeded
//! contradiction falls back once to an unconstrained attempt; a contradiction
//! without seeds is fatal. An incomplete run leaves the window pending with
//! its handle kept for `resume`.

use crate::algorithm::constraints::ResolvedSnapshot;
use crate::algorithm::solver::{RunOutcome, SolverFactory, SolverHandle};
use crate::io::canvas::Renderer;
use crate::io::configuration::WindowConfig;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{BoundingBox, Placement, Side, WindowState};
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

/// What caused a regeneration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// First solve at startup
    Initial,
    /// Desired origin moved
    Slide,
    /// A side gained its extra cell
    Extend(Side),
    /// A side dropped its extra cell
    Retract(Side),
    /// An axis extension moved to the opposite side
    Swap {
        /// Side gaining the extra cell
        extend: Side,
        /// Side losing it
        retract: Side,
    },
    /// Explicit rebuild at the current placement
    Force,
}

/// A queued geometry change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenerationRequest {
    /// Cause, for logging and statistics
    pub trigger: Trigger,
    /// Placement the window moves to
    pub placement: Placement,
}

/// Whether the current window is fully drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    /// Every visible cell has been presented
    Resolved,
    /// The iteration budget ran out; the handle is kept for `resume`
    Pending,
}

/// Result of one regeneration or resume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regeneration {
    /// State the window was left in
    pub status: WindowStatus,
    /// Whether the seeded attempt contradicted and the unconstrained retry ran
    pub fell_back: bool,
    /// Captured cells re-seeded into the attempt that was kept
    pub seeded: usize,
    /// Cells handed to the renderer by this call
    pub presented: usize,
}

/// Session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegenerationStats {
    /// Startup solves
    pub initial: usize,
    /// Slide-triggered rebuilds
    pub slides: usize,
    /// Extension rebuilds
    pub extensions: usize,
    /// Retraction rebuilds
    pub retractions: usize,
    /// Swap rebuilds
    pub swaps: usize,
    /// Forced rebuilds
    pub forced: usize,
    /// Unconstrained retries after a seeded contradiction
    pub fallbacks: usize,
    /// Runs that exhausted the iteration budget
    pub incomplete_runs: usize,
    /// Continuations of a pending handle
    pub resumes: usize,
    /// Cells handed to the renderer
    pub presented_cells: usize,
}

impl RegenerationStats {
    /// Total geometry rebuilds of any kind
    pub const fn regenerations(&self) -> usize {
        self.initial + self.slides + self.extensions + self.retractions + self.swaps + self.forced
    }

    const fn record(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Initial => self.initial += 1,
            Trigger::Slide => self.slides += 1,
            Trigger::Extend(_) => self.extensions += 1,
            Trigger::Retract(_) => self.retractions += 1,
            Trigger::Swap { .. } => self.swaps += 1,
            Trigger::Force => self.forced += 1,
        }
    }
}

/// Cells already presented for the current render state
///
/// Each `begin` starts a new epoch; a cell is presented at most once per
/// epoch no matter how often the renderer is offered it.
#[derive(Debug, Clone, Default)]
pub struct PresentationLedger {
    epoch: usize,
    presented: HashSet<[i32; 2]>,
}

impl PresentationLedger {
    /// Start a new epoch with nothing presented
    pub fn begin(&mut self) {
        self.epoch += 1;
        self.presented.clear();
    }

    /// Record a cell, returning `false` if it was already presented
    pub fn mark(&mut self, world: [i32; 2]) -> bool {
        self.presented.insert(world)
    }

    /// Whether a cell was presented in this epoch
    pub fn contains(&self, world: [i32; 2]) -> bool {
        self.presented.contains(&world)
    }

    /// Epochs started so far
    pub const fn epoch(&self) -> usize {
        self.epoch
    }

    /// Cells presented in this epoch
    pub fn len(&self) -> usize {
        self.presented.len()
    }

    /// Whether nothing has been presented in this epoch
    pub fn is_empty(&self) -> bool {
        self.presented.is_empty()
    }
}

struct ActiveSolve<H> {
    handle: H,
    /// Whether the handle was seeded from a snapshot
    constrained: bool,
    status: WindowStatus,
}

/// Sequences geometry change, constraint carry-over, solving and presentation
pub struct RegenerationOrchestrator<F: SolverFactory, R: Renderer> {
    factory: F,
    renderer: R,
    window: WindowState,
    seed: u64,
    iteration_budget: usize,
    active: Option<ActiveSolve<F::Handle>>,
    ledger: PresentationLedger,
    stats: RegenerationStats,
}

impl<F: SolverFactory, R: Renderer> RegenerationOrchestrator<F, R> {
    /// Orchestrator for `window`; nothing is solved until the first request
    pub fn new(factory: F, renderer: R, window: WindowState, config: &WindowConfig) -> Self {
        Self {
            factory,
            renderer,
            window,
            seed: config.seed,
            iteration_budget: config.iteration_budget,
            active: None,
            ledger: PresentationLedger::default(),
            stats: RegenerationStats::default(),
        }
    }

    /// Move the window and rebuild it, carrying resolved cells across
    ///
    /// # Errors
    ///
    /// Returns `Unsatisfiable` when an unconstrained attempt contradicts, and
    /// propagates solver and renderer faults
    pub fn regenerate(&mut self, request: RegenerationRequest) -> Result<Regeneration> {
        let snapshot = match &self.active {
            Some(active) => ResolvedSnapshot::capture(&active.handle, &self.window.visible_bounds())?,
            None => ResolvedSnapshot::default(),
        };

        self.window.apply(request.placement);
        self.stats.record(request.trigger);
        debug!(
            trigger = ?request.trigger,
            origin = ?self.window.origin(),
            width = self.window.width(),
            height = self.window.height(),
            captured = snapshot.len(),
            "regenerating window"
        );

        self.discard();
        self.attempt(&snapshot)
    }

    /// Continue a pending handle with another budgeted run
    ///
    /// Returns `None` when nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns `Unsatisfiable` if the handle contradicts and no fallback is
    /// left, and propagates solver and renderer faults
    pub fn resume(&mut self) -> Result<Option<Regeneration>> {
        let bounds = self.window.visible_bounds();
        let Some(active) = self.active.as_mut() else {
            return Ok(None);
        };
        if active.status == WindowStatus::Resolved {
            return Ok(None);
        }

        self.stats.resumes += 1;
        let outcome = active.handle.run(self.seed, self.iteration_budget);
        if outcome == RunOutcome::Contradiction {
            let constrained = active.constrained;
            self.discard();
            if !constrained {
                return Err(self.unsatisfiable());
            }
            warn!(origin = ?self.window.origin(), "pending window contradicted, retrying unconstrained");
            self.stats.fallbacks += 1;
            let (handle, outcome) = self.solve_unconstrained()?;
            return self.settle(handle, outcome, false, true, 0).map(Some);
        }

        let presented =
            Self::present_resolved(&active.handle, &bounds, &mut self.ledger, &mut self.renderer)?;
        self.stats.presented_cells += presented;
        let status = if outcome == RunOutcome::Resolved {
            active.status = WindowStatus::Resolved;
            debug!(presented, "pending window resolved");
            WindowStatus::Resolved
        } else {
            self.stats.incomplete_runs += 1;
            WindowStatus::Pending
        };

        Ok(Some(Regeneration {
            status,
            fell_back: false,
            seeded: 0,
            presented,
        }))
    }

    /// Current window geometry
    pub const fn window(&self) -> &WindowState {
        &self.window
    }

    /// Whether the window is waiting on an incomplete handle
    pub fn is_pending(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.status == WindowStatus::Pending)
    }

    /// Whether a handle is held at all
    pub const fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Resolved tile at a world cell of the active handle
    ///
    /// # Errors
    ///
    /// Propagates sampling faults from the handle
    pub fn sample_world(&self, world: [i32; 2]) -> Result<Option<usize>> {
        let Some(active) = &self.active else {
            return Ok(None);
        };
        match self.window.visible_bounds().local(world) {
            Some([x, y]) => active.handle.sample(x, y),
            None => Ok(None),
        }
    }

    /// The renderer cells are presented to
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Cells presented in the current render state
    pub const fn ledger(&self) -> &PresentationLedger {
        &self.ledger
    }

    /// Session counters
    pub const fn stats(&self) -> &RegenerationStats {
        &self.stats
    }

    /// Release the factory and renderer
    pub fn into_parts(self) -> (F, R) {
        (self.factory, self.renderer)
    }

    fn discard(&mut self) {
        self.active = None;
        self.renderer.clear();
        self.ledger.begin();
    }

    fn attempt(&mut self, snapshot: &ResolvedSnapshot) -> Result<Regeneration> {
        let bounds = self.window.visible_bounds();
        let mut handle = self.factory.create(self.window.width(), self.window.height())?;
        let seeded = snapshot.apply(&mut handle, &bounds)?;

        match handle.run(self.seed, self.iteration_budget) {
            RunOutcome::Contradiction if seeded > 0 => {
                warn!(
                    seeded,
                    origin = ?self.window.origin(),
                    "seeded window contradicted, retrying unconstrained"
                );
                self.stats.fallbacks += 1;
                let (handle, outcome) = self.solve_unconstrained()?;
                self.settle(handle, outcome, false, true, 0)
            }
            RunOutcome::Contradiction => Err(self.unsatisfiable()),
            outcome => self.settle(handle, outcome, seeded > 0, false, seeded),
        }
    }

    /// Build and run a handle with no seeds, failing on contradiction
    fn solve_unconstrained(&mut self) -> Result<(F::Handle, RunOutcome)> {
        let mut handle = self.factory.create(self.window.width(), self.window.height())?;
        match handle.run(self.seed, self.iteration_budget) {
            RunOutcome::Contradiction => Err(self.unsatisfiable()),
            outcome => Ok((handle, outcome)),
        }
    }

    /// Present what the handle resolved and keep it as the active solve
    fn settle(
        &mut self,
        handle: F::Handle,
        outcome: RunOutcome,
        constrained: bool,
        fell_back: bool,
        seeded: usize,
    ) -> Result<Regeneration> {
        let bounds = self.window.visible_bounds();
        let presented =
            Self::present_resolved(&handle, &bounds, &mut self.ledger, &mut self.renderer)?;
        self.stats.presented_cells += presented;

        let status = if outcome == RunOutcome::Resolved {
            WindowStatus::Resolved
        } else {
            self.stats.incomplete_runs += 1;
            info!(
                origin = ?self.window.origin(),
                presented,
                "iteration budget exhausted, window pending"
            );
            WindowStatus::Pending
        };

        self.active = Some(ActiveSolve {
            handle,
            constrained,
            status,
        });
        Ok(Regeneration {
            status,
            fell_back,
            seeded,
            presented,
        })
    }

    fn present_resolved(
        handle: &F::Handle,
        bounds: &BoundingBox,
        ledger: &mut PresentationLedger,
        renderer: &mut R,
    ) -> Result<usize> {
        let mut presented = 0;
        for y in 0..bounds.height() {
            for x in 0..bounds.width() {
                let Some(tile) = handle.sample(x, y)? else {
                    continue;
                };
                let world = [bounds.min[0] + x as i32, bounds.min[1] + y as i32];
                if ledger.mark(world) {
                    renderer.present(world[0], world[1], tile)?;
                    presented += 1;
                }
            }
        }
        Ok(presented)
    }

    fn unsatisfiable(&self) -> AlgorithmError {
        let error = AlgorithmError::Unsatisfiable {
            origin: self.window.origin(),
            dimensions: (self.window.width(), self.window.height()),
        };
        error!(%error, "unconstrained attempt contradicted");
        error
    }
}
