use gridvisit::scenario::Scenario;
use gridvisit::{Direction, Grid, GridError, IdAllocator, Obstacle, Placement, Rejection};

#[test]
fn test_origin_facing_north_rejected() {
    let mut grid = Grid::new(20, 20).unwrap();
    let obstacle = grid.new_obstacle(0, 0, Direction::North);
    assert!(!grid.has_space_for_obstacle(&obstacle));
    assert_eq!(
        grid.add_obstacle(obstacle),
        Placement::Rejected(Rejection::InsufficientClearance)
    );
}

#[test]
fn test_clearance_monotonic_in_grid_size() {
    let mut ids = IdAllocator::new();
    for direction in Direction::ALL {
        for x in 0..12 {
            for y in 0..12 {
                let obstacle = Obstacle::new(x, y, direction, &mut ids);
                let mut was_valid = false;
                for size in 1..20 {
                    let grid = Grid::new(size, size).unwrap();
                    let valid = grid.has_space_for_obstacle(&obstacle);
                    assert!(
                        valid || !was_valid,
                        "{} lost clearance when grid grew to {}",
                        obstacle,
                        size
                    );
                    was_valid = valid;
                }
            }
        }
    }
}

#[test]
fn test_duplicate_leaves_set_unchanged() {
    let mut grid = Grid::new(20, 20).unwrap();
    let obstacle = grid.new_obstacle(15, 15, Direction::East);
    assert_eq!(grid.add_obstacle(obstacle), Placement::Admitted);
    let before = grid.obstacles().len();
    assert_eq!(grid.add_obstacle(obstacle), Placement::AlreadyExists);
    assert_eq!(grid.obstacles().len(), before);
}

#[test]
fn test_external_allocator_obstacles() {
    let mut ids = IdAllocator::new();
    let mut grid = Grid::new(10, 10).unwrap();
    let a = Obstacle::new(4, 4, Direction::South, &mut ids);
    let b = Obstacle::new(4, 4, Direction::South, &mut ids);
    assert!(grid.add_obstacle(a).is_admitted());
    assert_eq!(grid.add_obstacle(b), Placement::AlreadyExists);
    assert_eq!(grid.obstacles()[0].id(), a.id());
}

#[test]
fn test_scenario_file_round_trip_builds_same_grid() {
    let path = std::env::temp_dir().join(format!("gridvisit_placement_{}.json", std::process::id()));
    Scenario::demo().save_to_file(&path).unwrap();
    let built = Scenario::load_from_file(&path).unwrap().build().unwrap();
    std::fs::remove_file(&path).ok();

    assert!(built.placements.iter().all(|p| p.is_admitted()));
    assert_eq!(built.grid.obstacles()[0].direction(), Direction::North);
    assert_eq!(built.grid.obstacles()[1].direction(), Direction::East);
}

#[test]
fn test_invalid_direction_letter_rejected() {
    let json = r#"{"width": 20, "height": 20, "robot": {"x": 1, "y": 1},
                   "obstacles": [{"x": 5, "y": 5, "direction": "U"}]}"#;
    let scenario: Scenario = serde_json::from_str(json).unwrap();
    assert!(matches!(scenario.build(), Err(GridError::InvalidDirection(_))));
}
