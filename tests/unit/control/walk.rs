//! Tests for scripted walk parsing and stepping

#[cfg(test)]
mod tests {
    use infinitile::control::walk::{ViewpointWalker, WalkLeg, WalkPlan};

    #[test]
    fn test_parse_combined_legs() {
        let plan: WalkPlan = "R40,UR20,I5".parse().expect("valid walk");

        assert_eq!(plan.legs().len(), 3);
        assert_eq!(plan.total_ticks(), 65);
        assert_eq!(plan.direction_at(0), [1.0, 0.0]);
        assert_eq!(plan.direction_at(40), [1.0, 1.0]);
        assert_eq!(plan.direction_at(62), [0.0, 0.0]);
        assert_eq!(plan.direction_at(500), [0.0, 0.0]);
    }

    #[test]
    fn test_parse_tolerates_case_and_spaces() {
        let plan: WalkPlan = " dl3 , u2 ".parse().expect("valid walk");
        assert_eq!(
            plan.legs(),
            &[
                WalkLeg {
                    direction: [-1.0, -1.0],
                    ticks: 3
                },
                WalkLeg {
                    direction: [0.0, 1.0],
                    ticks: 2
                },
            ]
        );
    }

    // Tests that malformed legs are rejected
    #[test]
    fn test_parse_rejects_malformed_walks() {
        for walk in ["", ",", "R", "5", "X3", "R2x"] {
            assert!(walk.parse::<WalkPlan>().is_err(), "{walk:?} parsed");
        }
    }

    // Tests that the walker moves `speed * tick` cells per tick along each leg
    #[test]
    fn test_walker_moves_at_constant_speed() {
        let plan: WalkPlan = "R2,U1".parse().expect("valid walk");
        let mut walker = ViewpointWalker::new(plan, [0.0, 0.0])
            .with_speed(6.0)
            .with_tick_seconds(0.5);

        let steps: Vec<_> = walker.by_ref().collect();
        let positions: Vec<_> = steps.iter().map(|step| step.position).collect();

        assert_eq!(positions, vec![[3.0, 0.0], [6.0, 0.0], [6.0, 3.0]]);
        assert_eq!(steps[2].tick, 2);
        assert_eq!(steps[2].direction, [0.0, 1.0]);
        assert_eq!(walker.ticks_walked(), 3);
        assert!(walker.step().is_none());
    }

    // Tests that diagonal legs are normalized so they move no faster
    // Verified by feeding the raw direction to the position update
    #[test]
    fn test_diagonal_step_is_normalized() {
        let plan: WalkPlan = "UR1".parse().expect("valid walk");
        let mut walker = ViewpointWalker::new(plan, [0.0, 0.0])
            .with_speed(1.0)
            .with_tick_seconds(1.0);

        let step = walker.step().expect("one tick");
        let distance = step.position[0].hypot(step.position[1]);
        assert!((distance - 1.0).abs() < 1e-5);
        assert!((step.direction[0] - step.direction[1]).abs() < 1e-6);
    }

    #[test]
    fn test_idle_leg_stays_put() {
        let plan = WalkPlan::new(vec![WalkLeg {
            direction: [0.0, 0.0],
            ticks: 4,
        }]);
        let walker = ViewpointWalker::new(plan, [1.5, -2.5]);

        for step in walker {
            assert_eq!(step.position, [1.5, -2.5]);
            assert_eq!(step.direction, [0.0, 0.0]);
        }
    }
}
