use std::collections::{BTreeSet, VecDeque};

use dungeon_core::{
    BuildableSpec, ConfigError, Direction, DungeonConfig, GenerateError, GeneratedDungeon, Pos,
    StallReason, generate_seeded,
};

fn region_is_connected(dungeon: &GeneratedDungeon) -> bool {
    let empty = dungeon.config.empty_marker;
    let start = dungeon.player.pos();
    let mut open = VecDeque::from([start]);
    let mut seen = BTreeSet::from([start]);

    while let Some(pos) = open.pop_front() {
        for direction in Direction::ALL {
            let Some(next) = dungeon.grid.step(pos, direction) else {
                continue;
            };
            if dungeon.grid.at(next).is_ok_and(|cell| cell != empty) && seen.insert(next) {
                open.push_back(next);
            }
        }
    }

    seen.len() == dungeon.used_tiles()
}

#[test]
fn default_config_generates_across_many_seeds() {
    for seed in 0..200 {
        let dungeon = generate_seeded(DungeonConfig::default(), seed)
            .unwrap_or_else(|err| panic!("seed {seed} failed: {err}"));

        assert_eq!(dungeon.grid.width(), 10);
        assert_eq!(dungeon.grid.height(), 10);
        assert_eq!(dungeon.used_tiles(), 60, "seed {seed}");
        assert_eq!(dungeon.grid.at(dungeon.player.pos()), Ok('@'));
        assert!(region_is_connected(&dungeon), "seed {seed} carved a split region");

        assert!(dungeon.placement_counts.get("goblin").is_some_and(|count| count <= 10));
        assert!(dungeon.placement_counts.get("imp").is_some_and(|count| count <= 5));
        assert!(dungeon.placement_counts.get("gold").is_some_and(|count| count <= 5));
        assert_eq!(dungeon.placement_counts.total(), dungeon.placements.len());
    }
}

#[test]
fn buildable_markers_only_appear_where_placements_were_logged() {
    let config = DungeonConfig {
        width: 20,
        height: 15,
        max_tile_usage_fraction: 0.45,
        chance_to_build: 0.6,
        ..DungeonConfig::default()
    };
    let dungeon = generate_seeded(config, 31).expect("generates");

    let logged: BTreeSet<Pos> = dungeon.placements.iter().map(|p| p.pos).collect();
    assert_eq!(logged.len(), dungeon.placements.len(), "a cell was placed on twice");

    for (y, row) in dungeon.grid.rows().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            let is_buildable = ['G', 'I', '*'].contains(&cell);
            assert_eq!(is_buildable, logged.contains(&Pos::new(x, y)), "cell ({x}, {y})");
        }
    }
}

#[test]
fn origin_start_on_three_by_three_completes() {
    let config = DungeonConfig {
        width: 3,
        height: 3,
        start_x: Some(0),
        start_y: Some(0),
        buildables: Vec::new(),
        ..DungeonConfig::default()
    };
    for seed in 0..20 {
        let dungeon = generate_seeded(config.clone(), seed).expect("3x3 from origin completes");
        assert_eq!(dungeon.used_tiles(), 6);
        assert_eq!(dungeon.grid.get(0, 0), Ok('@'));
        assert!(region_is_connected(&dungeon));
    }
}

#[test]
fn start_outside_grid_is_a_config_error() {
    let config = DungeonConfig { start_x: Some(10), start_y: Some(3), ..DungeonConfig::default() };
    let err = generate_seeded(config, 1).expect_err("start is out of bounds");
    assert_eq!(
        err,
        GenerateError::Config(ConfigError::StartOutOfBounds { x: 10, y: 3, width: 10, height: 10 })
    );
}

#[test]
fn oversized_grid_is_a_config_error_not_a_panic() {
    let config = DungeonConfig { width: usize::MAX / 3, height: 7, ..DungeonConfig::default() };
    let err = generate_seeded(config, 1).expect_err("area overflows");
    assert_eq!(
        err,
        GenerateError::Config(ConfigError::GridTooLarge { width: usize::MAX / 3, height: 7 })
    );
}

#[test]
fn negative_cap_is_a_config_error_but_zero_is_not() {
    let negative = DungeonConfig {
        buildables: vec![BuildableSpec::new("wraith", 0.5, 'W', -1)],
        ..DungeonConfig::default()
    };
    assert!(matches!(
        generate_seeded(negative, 1),
        Err(GenerateError::Config(ConfigError::NegativeMax { .. }))
    ));

    let zero = DungeonConfig {
        buildables: vec![BuildableSpec::new("wraith", 0.5, 'W', 0)],
        ..DungeonConfig::default()
    };
    let dungeon = generate_seeded(zero, 1).expect("zero cap is legal");
    assert_eq!(dungeon.placement_counts.get("wraith"), Some(0));
}

#[test]
fn unreachable_target_reports_a_stall() {
    let config = DungeonConfig {
        width: 2,
        height: 2,
        start_x: Some(1),
        start_y: Some(1),
        max_tile_usage_fraction: 1.0,
        chance_to_build: 0.0,
        ..DungeonConfig::default()
    };
    match generate_seeded(config, 5) {
        Err(GenerateError::Stalled { reason, used_tiles, target_tiles, .. }) => {
            assert_eq!(reason, StallReason::ResetLimit);
            assert_eq!(used_tiles, 1);
            assert_eq!(target_tiles, 4);
        }
        other => panic!("expected a stall, got {other:?}"),
    }
}
