//! Tests for solver settings derived from window configuration

#[cfg(test)]
mod tests {
    use infinitile::algorithm::solver::{RunOutcome, SolverSettings};
    use infinitile::io::configuration::WindowConfig;

    // Tests that every solver-relevant field is copied from the config
    // Verified by hardcoding periodic_output to false in the From impl
    #[test]
    fn test_settings_follow_config() {
        let config = WindowConfig {
            pattern_size: 3,
            periodic_input: true,
            periodic_output: true,
            symmetry: 8,
            foundation: 2,
            ..WindowConfig::default()
        };

        let settings = SolverSettings::from(&config);

        assert_eq!(settings.pattern_size, 3);
        assert!(settings.periodic_input);
        assert!(settings.periodic_output);
        assert_eq!(settings.symmetry, 8);
        assert_eq!(settings.foundation, 2);
    }

    #[test]
    fn test_run_outcomes_are_distinct() {
        assert_ne!(RunOutcome::Resolved, RunOutcome::Incomplete);
        assert_ne!(RunOutcome::Contradiction, RunOutcome::Incomplete);
    }
}
