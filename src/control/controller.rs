//! Two-phase window controller
//!
//! The host loop calls `early_update` then `late_update` once per tick. The
//! early phase samples movement and, on a cell crossing, runs the per-side
//! extension and retraction checks. The late phase slides the window toward
//! the viewpoint (subject to the cooldown) and otherwise resumes a pending
//! solve. Every geometry change goes through the orchestrator.
//!
//! A configuration fault disables the controller: the error is returned
//! once and later ticks do nothing.

use crate::algorithm::orchestrator::{
    Regeneration, RegenerationOrchestrator, RegenerationRequest, RegenerationStats, Trigger,
};
use crate::algorithm::solver::SolverFactory;
use crate::control::throttle::Throttle;
use crate::control::viewpoint::ViewpointTracker;
use crate::io::canvas::Renderer;
use crate::io::configuration::WindowConfig;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::extension::{DirectionalExtension, ExtensionTransition};
use crate::spatial::grid::{Side, WindowState};
use tracing::{debug, error};

/// Collects the solver and renderer bindings for a controller
pub struct ControllerBuilder<F, R> {
    config: WindowConfig,
    solver: Option<F>,
    renderer: Option<R>,
}

impl<F: SolverFactory, R: Renderer> ControllerBuilder<F, R> {
    /// Builder with no collaborators bound
    pub const fn new(config: WindowConfig) -> Self {
        Self {
            config,
            solver: None,
            renderer: None,
        }
    }

    /// Bind the solver factory
    #[must_use]
    pub fn solver(mut self, factory: F) -> Self {
        self.solver = Some(factory);
        self
    }

    /// Bind the renderer
    #[must_use]
    pub fn renderer(mut self, renderer: R) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Validate the bindings and solve the initial window around `viewpoint`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is out of range
    /// - The solver or renderer was never bound
    /// - The initial window is unsatisfiable
    pub fn build(self, viewpoint: [f32; 2]) -> Result<WindowController<F, R>> {
        let config = self.config;
        config.validate()?;
        let factory = self
            .solver
            .ok_or(AlgorithmError::MissingBinding { collaborator: "solver" })?;
        let renderer = self
            .renderer
            .ok_or(AlgorithmError::MissingBinding { collaborator: "renderer" })?;

        let tracker = ViewpointTracker::new(config.base_visible_size, viewpoint);
        let window = WindowState::new(tracker.desired_origin(viewpoint), &config);
        let placement = window.placement();

        let mut controller = WindowController {
            tracker,
            extension: DirectionalExtension::new(config.base_visible_size),
            throttle: Throttle::new(config.cooldown_ticks),
            orchestrator: RegenerationOrchestrator::new(factory, renderer, window, &config),
            disabled: false,
        };
        controller.guard(|orchestrator| {
            orchestrator.regenerate(RegenerationRequest {
                trigger: Trigger::Initial,
                placement,
            })
        })?;
        Ok(controller)
    }
}

/// Drives the window from viewpoint and input samples
pub struct WindowController<F: SolverFactory, R: Renderer> {
    tracker: ViewpointTracker,
    extension: DirectionalExtension,
    throttle: Throttle,
    orchestrator: RegenerationOrchestrator<F, R>,
    disabled: bool,
}

impl<F: SolverFactory, R: Renderer> WindowController<F, R> {
    /// Movement phase: extension and retraction checks on cell crossings
    ///
    /// # Errors
    ///
    /// Returns the fault of a failed regeneration
    pub fn early_update(&mut self, viewpoint: [f32; 2], direction: [f32; 2]) -> Result<()> {
        if self.disabled {
            return Ok(());
        }
        self.tracker.record_direction(direction);
        if !self.tracker.crossed_cell(viewpoint) {
            return Ok(());
        }

        let heading = self.tracker.last_direction();
        for side in Side::ALL {
            let transition =
                self.extension
                    .extend_transition(self.orchestrator.window(), side, heading);
            if let Some(transition) = transition {
                self.transition(transition)?;
            }
        }
        for side in Side::ALL {
            let transition =
                self.extension
                    .retract_transition(self.orchestrator.window(), side, viewpoint);
            if let Some(transition) = transition {
                self.transition(transition)?;
            }
        }
        Ok(())
    }

    /// Commit phase: slide toward the viewpoint, or resume a pending solve
    ///
    /// # Errors
    ///
    /// Returns the fault of a failed regeneration or resume
    pub fn late_update(&mut self, viewpoint: [f32; 2]) -> Result<()> {
        if self.disabled {
            return Ok(());
        }

        if self.throttle.allow() {
            let window = self.orchestrator.window();
            let placement = window.slid_to(self.tracker.desired_origin(viewpoint));
            if placement != window.placement() {
                debug!(from = ?window.origin(), to = ?placement.origin, "sliding window");
                self.guard(|orchestrator| {
                    orchestrator.regenerate(RegenerationRequest {
                        trigger: Trigger::Slide,
                        placement,
                    })
                })?;
                self.throttle.arm();
                return Ok(());
            }
        }

        if self.orchestrator.is_pending() {
            self.guard(RegenerationOrchestrator::resume)?;
        }
        Ok(())
    }

    /// Run both phases for one tick
    ///
    /// # Errors
    ///
    /// Returns the first fault of either phase
    pub fn tick(&mut self, viewpoint: [f32; 2], direction: [f32; 2]) -> Result<()> {
        self.early_update(viewpoint, direction)?;
        self.late_update(viewpoint)
    }

    /// Rebuild the window at its current placement
    ///
    /// # Errors
    ///
    /// Returns `ControllerDisabled` after a fatal fault, otherwise the fault
    /// of the rebuild
    pub fn force_regenerate(&mut self) -> Result<Regeneration> {
        let placement = self.orchestrator.window().placement();
        self.guard(|orchestrator| {
            orchestrator.regenerate(RegenerationRequest {
                trigger: Trigger::Force,
                placement,
            })
        })?
        .ok_or(AlgorithmError::ControllerDisabled)
    }

    /// Continue a pending solve outside the tick loop
    ///
    /// # Errors
    ///
    /// Returns `ControllerDisabled` after a fatal fault, otherwise the fault
    /// of the resumed run
    pub fn resume(&mut self) -> Result<Option<Regeneration>> {
        self.guard(RegenerationOrchestrator::resume)?
            .ok_or(AlgorithmError::ControllerDisabled)
    }

    /// Whether a fatal fault has switched the controller off
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Current window geometry
    pub const fn window(&self) -> &WindowState {
        self.orchestrator.window()
    }

    /// The underlying orchestrator
    pub const fn orchestrator(&self) -> &RegenerationOrchestrator<F, R> {
        &self.orchestrator
    }

    /// Session counters
    pub const fn stats(&self) -> &RegenerationStats {
        self.orchestrator.stats()
    }

    /// The bound renderer
    pub const fn renderer(&self) -> &R {
        self.orchestrator.renderer()
    }

    /// Remaining slide cooldown
    pub const fn cooldown_remaining(&self) -> u32 {
        self.throttle.remaining()
    }

    /// Release the factory and renderer
    pub fn into_parts(self) -> (F, R) {
        self.orchestrator.into_parts()
    }

    fn transition(&mut self, transition: ExtensionTransition) -> Result<()> {
        let placement = transition.apply(self.orchestrator.window().placement());
        let trigger = match transition {
            ExtensionTransition::Extend(side) => Trigger::Extend(side),
            ExtensionTransition::Retract(side) => Trigger::Retract(side),
            ExtensionTransition::Swap { extend, retract } => Trigger::Swap { extend, retract },
        };
        debug!(?trigger, "extension transition");
        self.guard(|orchestrator| orchestrator.regenerate(RegenerationRequest { trigger, placement }))?;
        Ok(())
    }

    /// Run an orchestrator call unless disabled, disabling on a fatal fault
    fn guard<T>(
        &mut self,
        call: impl FnOnce(&mut RegenerationOrchestrator<F, R>) -> Result<T>,
    ) -> Result<Option<T>> {
        if self.disabled {
            return Ok(None);
        }
        match call(&mut self.orchestrator) {
            Ok(value) => Ok(Some(value)),
            Err(fault) => {
                if fault.is_configuration_fault() {
                    error!(%fault, "configuration fault, controller disabled");
                    self.disabled = true;
                }
                Err(fault)
            }
        }
    }
}
