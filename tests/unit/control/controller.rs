//! Tests for the two-phase controller: bindings, transitions, cooldown and disabling

#[cfg(test)]
mod tests {
    use crate::common::{Behaviour, ScriptedFactory};
    use infinitile::AlgorithmError;
    use infinitile::control::{ControllerBuilder, WindowController};
    use infinitile::io::canvas::TileCanvas;
    use infinitile::io::configuration::WindowConfig;
    use infinitile::spatial::grid::Side;

    const TILES: usize = 5;
    const START: [f32; 2] = [2.0, 2.0];
    const RIGHT: [f32; 2] = [1.0, 0.0];
    const LEFT: [f32; 2] = [-1.0, 0.0];
    const UP: [f32; 2] = [0.0, 1.0];
    const IDLE: [f32; 2] = [0.0, 0.0];

    fn config() -> WindowConfig {
        WindowConfig {
            base_visible_size: 4,
            pattern_size: 2,
            ..WindowConfig::default()
        }
    }

    fn build(
        factory: &ScriptedFactory,
        config: WindowConfig,
    ) -> WindowController<ScriptedFactory, TileCanvas> {
        ControllerBuilder::new(config)
            .solver(factory.clone())
            .renderer(TileCanvas::new(TILES))
            .build(START)
            .expect("controller builds")
    }

    #[test]
    fn test_build_requires_solver() {
        let result = ControllerBuilder::<ScriptedFactory, TileCanvas>::new(config())
            .renderer(TileCanvas::new(TILES))
            .build(START);
        assert!(matches!(
            result,
            Err(AlgorithmError::MissingBinding {
                collaborator: "solver"
            })
        ));
    }

    #[test]
    fn test_build_requires_renderer() {
        let factory = ScriptedFactory::new(TILES);
        let result = ControllerBuilder::<ScriptedFactory, TileCanvas>::new(config())
            .solver(factory.clone())
            .build(START);
        assert!(matches!(
            result,
            Err(AlgorithmError::MissingBinding {
                collaborator: "renderer"
            })
        ));
        assert_eq!(factory.created(), 0);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = WindowConfig {
            symmetry: 9,
            ..config()
        };
        let result = ControllerBuilder::new(config)
            .solver(ScriptedFactory::new(TILES))
            .renderer(TileCanvas::new(TILES))
            .build(START);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter {
                parameter: "symmetry",
                ..
            })
        ));
    }

    // Tests that build solves the window centred on the viewpoint
    #[test]
    fn test_build_solves_initial_window() {
        let factory = ScriptedFactory::new(TILES);
        let controller = build(&factory, config());

        assert_eq!(controller.window().origin(), [0, 0]);
        assert_eq!(controller.renderer().visible().len(), 16);
        assert_eq!(controller.stats().initial, 1);
        assert!(!controller.is_disabled());
    }

    // Tests that motion inside one cell triggers nothing
    #[test]
    fn test_sub_cell_motion_is_ignored() {
        let factory = ScriptedFactory::new(TILES);
        let mut controller = build(&factory, config());

        controller.tick([2.3, 2.0], RIGHT).expect("tick");
        controller.tick([2.7, 2.4], RIGHT).expect("tick");

        assert_eq!(controller.stats().regenerations(), 1);
        assert_eq!(factory.created(), 1);
    }

    // Tests that crossing a cell toward a side extends it before the slide
    #[test]
    fn test_crossing_extends_then_slides() {
        let factory = ScriptedFactory::new(TILES);
        let mut controller = build(&factory, config());

        controller.tick([3.1, 2.0], RIGHT).expect("tick");

        let stats = controller.stats();
        assert_eq!(stats.extensions, 1);
        assert_eq!(stats.slides, 1);
        assert!(controller.window().is_extended(Side::Right));
        assert_eq!(controller.window().origin(), [1, 0]);
        assert_eq!(controller.window().width(), 6);
        assert_eq!(controller.window().height(), 5);
    }

    // Tests that reversing along an extended axis swaps the extension in one rebuild
    // Verified by counting one swap and no separate retraction
    #[test]
    fn test_reversal_swaps_extension() {
        let factory = ScriptedFactory::new(TILES);
        let mut controller = build(&factory, config());
        controller.tick([3.1, 2.0], RIGHT).expect("tick");

        controller.tick([2.9, 2.0], LEFT).expect("tick");

        let window = controller.window();
        assert!(window.is_extended(Side::Left));
        assert!(!window.is_extended(Side::Right));
        assert_eq!(window.width(), 6);
        assert_eq!(window.origin(), [-1, 0]);
        assert_eq!(controller.stats().swaps, 1);
        assert_eq!(controller.stats().retractions, 0);
    }

    // Tests that a viewpoint far beyond an extended side retracts it
    #[test]
    fn test_teleport_retracts_extension() {
        let factory = ScriptedFactory::new(TILES);
        let mut controller = build(&factory, config());
        controller.tick([3.1, 2.0], RIGHT).expect("tick");

        controller.tick([20.5, 2.0], IDLE).expect("tick");

        assert!(!controller.window().is_extended(Side::Right));
        assert_eq!(controller.stats().retractions, 1);
        assert_eq!(controller.window().origin(), [18, 0]);
        assert_eq!(controller.window().width(), 5);
    }

    // Tests that slides wait out the cooldown
    #[test]
    fn test_cooldown_throttles_slides() {
        let factory = ScriptedFactory::new(TILES);
        let config = WindowConfig {
            cooldown_ticks: 3,
            ..config()
        };
        let mut controller = build(&factory, config);

        controller.tick([3.1, 2.0], RIGHT).expect("tick");
        assert_eq!(controller.stats().slides, 1);
        assert_eq!(controller.cooldown_remaining(), 3);

        for x in [4.1, 5.1, 6.1] {
            controller.tick([x, 2.0], RIGHT).expect("tick");
        }
        assert_eq!(controller.stats().slides, 1);
        assert_eq!(controller.window().origin(), [1, 0]);

        controller.tick([7.1, 2.0], RIGHT).expect("tick");
        assert_eq!(controller.stats().slides, 2);
        assert_eq!(controller.window().origin(), [5, 0]);
    }

    // Tests that a cooling-down window still extends toward a new heading
    // Verified by gating extension checks on the slide cooldown
    #[test]
    fn test_extension_ignores_slide_cooldown() {
        let factory = ScriptedFactory::new(TILES);
        let config = WindowConfig {
            cooldown_ticks: 3,
            ..config()
        };
        let mut controller = build(&factory, config);
        controller.tick([3.1, 2.0], RIGHT).expect("tick");
        assert_eq!(controller.stats().slides, 1);
        assert_eq!(controller.cooldown_remaining(), 3);
        let rebuilds = controller.stats().regenerations();
        let created = factory.created();

        controller.tick([3.1, 3.1], UP).expect("tick");

        assert!(controller.cooldown_remaining() > 0);
        assert!(controller.window().is_extended(Side::Up));
        assert!(controller.window().is_extended(Side::Right));
        assert_eq!(controller.stats().extensions, 2);
        assert_eq!(controller.stats().slides, 1);
        assert_eq!(controller.stats().regenerations(), rebuilds + 1);
        assert_eq!(factory.created(), created + 1);
        assert_eq!(controller.window().origin(), [1, 0]);
        assert_eq!(controller.window().height(), 6);
    }

    // Tests that a pending window finishes over idle ticks without duplicates
    #[test]
    fn test_idle_ticks_resume_pending_window() {
        let factory = ScriptedFactory::new(TILES);
        let config = WindowConfig {
            iteration_budget: 5,
            ..config()
        };
        let mut controller = build(&factory, config);
        assert!(controller.orchestrator().is_pending());

        for _ in 0..4 {
            controller.tick(START, IDLE).expect("tick");
        }

        assert!(!controller.orchestrator().is_pending());
        assert_eq!(controller.renderer().visible().len(), 16);
        assert_eq!(controller.renderer().duplicates(), 0);
        assert_eq!(controller.stats().resumes, 4);
        assert_eq!(factory.created(), 1);
    }

    // Tests that a fatal fault is returned once and then disables the controller
    #[test]
    fn test_unsatisfiable_disables_controller() {
        let factory = ScriptedFactory::new(TILES);
        let mut controller = build(&factory, config());
        factory.set_behaviour(Behaviour {
            contradict_always: true,
            ..Behaviour::default()
        });

        let fault = controller.tick([3.1, 2.0], RIGHT);
        assert!(matches!(fault, Err(AlgorithmError::Unsatisfiable { .. })));
        assert!(controller.is_disabled());
        let created = factory.created();

        controller.tick([4.1, 2.0], RIGHT).expect("disabled tick");
        assert_eq!(factory.created(), created);
        assert!(matches!(
            controller.force_regenerate(),
            Err(AlgorithmError::ControllerDisabled)
        ));
        assert!(matches!(
            controller.resume(),
            Err(AlgorithmError::ControllerDisabled)
        ));
    }

    #[test]
    fn test_force_regenerate_keeps_resolved_cells() {
        let factory = ScriptedFactory::new(TILES);
        let mut controller = build(&factory, config());
        let before = controller.renderer().visible().clone();

        let regeneration = controller.force_regenerate().expect("force");

        assert_eq!(regeneration.seeded, 16);
        assert_eq!(controller.renderer().visible(), &before);
        assert_eq!(controller.stats().forced, 1);
    }

    #[test]
    fn test_resume_on_resolved_window_is_none() {
        let factory = ScriptedFactory::new(TILES);
        let mut controller = build(&factory, config());
        assert!(controller.resume().expect("resume").is_none());
    }

    #[test]
    fn test_into_parts_returns_renderer() {
        let factory = ScriptedFactory::new(TILES);
        let controller = build(&factory, config());
        let (_, canvas) = controller.into_parts();
        assert_eq!(canvas.visible().len(), 16);
    }
}
