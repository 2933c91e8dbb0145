//! Tests for the slide cooldown

#[cfg(test)]
mod tests {
    use infinitile::control::throttle::Throttle;

    #[test]
    fn test_zero_cooldown_never_blocks() {
        let mut throttle = Throttle::new(0);
        for _ in 0..5 {
            assert!(throttle.allow());
            throttle.arm();
        }
        assert_eq!(throttle.remaining(), 0);
    }

    // Tests that an armed throttle skips exactly `cooldown` ticks
    // Verified by checking the counter after decrementing it
    #[test]
    fn test_armed_throttle_skips_cooldown_ticks() {
        let mut throttle = Throttle::new(3);
        assert!(throttle.allow());
        throttle.arm();
        assert_eq!(throttle.remaining(), 3);

        assert!(!throttle.allow());
        assert!(!throttle.allow());
        assert!(!throttle.allow());
        assert!(throttle.allow());
        assert_eq!(throttle.remaining(), 0);
        assert_eq!(throttle.cooldown(), 3);
    }

    #[test]
    fn test_rearming_restarts_the_count() {
        let mut throttle = Throttle::new(2);
        throttle.arm();
        assert!(!throttle.allow());
        throttle.arm();
        assert_eq!(throttle.remaining(), 2);
    }
}
