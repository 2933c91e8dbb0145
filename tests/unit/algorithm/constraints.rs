//! Tests for capturing resolved cells and re-seeding them in world coordinates

#[cfg(test)]
mod tests {
    use crate::common::ScriptedFactory;
    use infinitile::algorithm::constraints::ResolvedSnapshot;
    use infinitile::algorithm::solver::{RunOutcome, SolverFactory, SolverHandle};
    use infinitile::spatial::grid::BoundingBox;

    // Tests that capture keys every resolved cell by its world coordinate
    // Verified by storing local instead of world coordinates
    #[test]
    fn test_capture_uses_world_coordinates() {
        let factory = ScriptedFactory::new(5);
        let mut handle = factory.create(4, 4).expect("handle");
        assert_eq!(handle.run(0, 0), RunOutcome::Resolved);

        let region = BoundingBox::from_origin_size([10, 20], 3, 3);
        let snapshot = ResolvedSnapshot::capture(&handle, &region).expect("capture");

        assert_eq!(snapshot.len(), 9);
        assert_eq!(
            snapshot.get([10, 20]),
            handle.sample(0, 0).expect("in bounds")
        );
        assert_eq!(
            snapshot.get([12, 21]),
            handle.sample(2, 1).expect("in bounds")
        );
        assert_eq!(snapshot.get([13, 20]), None);
    }

    // Tests that undecided cells are left out of the snapshot
    #[test]
    fn test_capture_skips_unresolved_cells() {
        let factory = ScriptedFactory::new(5);
        let mut handle = factory.create(4, 4).expect("handle");
        assert_eq!(handle.run(0, 2), RunOutcome::Incomplete);

        let region = BoundingBox::from_origin_size([0, 0], 4, 4);
        let snapshot = ResolvedSnapshot::capture(&handle, &region).expect("capture");

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get([0, 0]).is_some());
        assert!(snapshot.get([0, 1]).is_none());
    }

    #[test]
    fn test_capture_from_unrun_handle_is_empty() {
        let factory = ScriptedFactory::new(3);
        let handle = factory.create(3, 3).expect("handle");
        let region = BoundingBox::from_origin_size([0, 0], 3, 3);

        let snapshot = ResolvedSnapshot::capture(&handle, &region).expect("capture");
        assert!(snapshot.is_empty());
    }

    // Tests that apply seeds only cells inside the new bounds, at the right offset
    // Verified by seeding every cell regardless of bounds
    #[test]
    fn test_apply_drops_cells_outside_bounds() {
        let mut snapshot = ResolvedSnapshot::default();
        snapshot.insert([12, 21], 4);
        snapshot.insert([10, 20], 1);
        snapshot.insert([30, 30], 2);

        let factory = ScriptedFactory::new(5);
        let mut handle = factory.create(4, 4).expect("handle");
        let region = BoundingBox::from_origin_size([10, 20], 3, 3);

        let seeded = snapshot.apply(&mut handle, &region).expect("apply");

        assert_eq!(seeded, 2);
        assert_eq!(factory.seeds_of_last(), 2);
        assert_eq!(handle.run(0, 0), RunOutcome::Resolved);
        assert_eq!(handle.sample(2, 1).expect("in bounds"), Some(4));
        assert_eq!(handle.sample(0, 0).expect("in bounds"), Some(1));
    }

    // Tests that a round trip through a shifted region keeps world alignment
    #[test]
    fn test_shifted_region_keeps_alignment() {
        let factory = ScriptedFactory::new(7);
        let mut old = factory.create(4, 4).expect("handle");
        assert_eq!(old.run(5, 0), RunOutcome::Resolved);
        let old_region = BoundingBox::from_origin_size([0, 0], 4, 4);
        let snapshot = ResolvedSnapshot::capture(&old, &old_region).expect("capture");

        let new_region = BoundingBox::from_origin_size([1, 0], 4, 4);
        let mut new = factory.create(4, 4).expect("handle");
        assert_eq!(snapshot.apply(&mut new, &new_region).expect("apply"), 12);
        assert_eq!(new.run(5, 0), RunOutcome::Resolved);

        for y in 0..4 {
            for x in 1..4 {
                assert_eq!(
                    new.sample(x - 1, y).expect("in bounds"),
                    old.sample(x, y).expect("in bounds")
                );
            }
        }
    }

    #[test]
    fn test_iter_is_ordered_by_world_coordinate() {
        let mut snapshot = ResolvedSnapshot::default();
        snapshot.insert([3, 0], 1);
        snapshot.insert([-2, 5], 2);
        let cells: Vec<_> = snapshot.iter().collect();
        assert_eq!(cells, vec![([-2, 5], 2), ([3, 0], 1)]);
    }
}
