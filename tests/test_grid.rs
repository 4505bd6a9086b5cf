use life_invaders::grid::*;
use life_invaders::patterns::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const BLINKER: Pattern = Pattern::new("blinker", &[&[1, 1, 1]]);
const DOT: Pattern = Pattern::new("dot", &[&[1]]);

fn grid(width: usize, height: usize) -> LifeGrid {
    LifeGrid::new(width, height, LifeRules::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn alive_cells(g: &LifeGrid) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for r in 0..g.height() as i32 {
        for c in 0..g.width() as i32 {
            if g.is_alive(r, c) {
                cells.push((r, c));
            }
        }
    }
    cells
}

// ── step ──────────────────────────────────────────────────────────────────────

#[test]
fn empty_grid_stays_empty() {
    let mut g = grid(10, 10);
    g.step();
    assert_eq!(g.live_count(), 0);
}

#[test]
fn block_is_still_life() {
    let mut g = grid(8, 8);
    g.place_pattern(&BLOCK, 0, 0, false);
    let before = g.clone();
    g.step();
    assert_eq!(g, before);
    assert_eq!(alive_cells(&g), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
}

#[test]
fn blinker_oscillates() {
    let mut g = grid(5, 5);
    g.place_pattern(&BLINKER, 2, 1, false);

    g.step();
    assert_eq!(alive_cells(&g), vec![(1, 2), (2, 2), (3, 2)]);

    g.step();
    assert_eq!(alive_cells(&g), vec![(2, 1), (2, 2), (2, 3)]);
}

#[test]
fn dead_cell_with_three_neighbours_is_born() {
    let mut g = grid(5, 5);
    // L-shape: (1,1) (1,2) (2,1) → (2,2) has exactly three live neighbours
    g.place_pattern(&Pattern::new("l", &[&[1, 1], &[1, 0]]), 1, 1, false);
    g.step();
    assert!(g.is_alive(2, 2));
}

#[test]
fn lonely_and_crowded_cells_die() {
    let mut g = grid(5, 5);
    g.place_pattern(&DOT, 0, 0, false);
    g.step();
    assert!(!g.is_alive(0, 0), "no neighbours → dies");

    let mut g = grid(5, 5);
    // plus shape: the centre has four neighbours
    g.place_pattern(&Pattern::new("plus", &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]), 1, 1, false);
    g.step();
    assert!(!g.is_alive(2, 2), "four neighbours → dies");
}

#[test]
fn edges_do_not_wrap() {
    let mut g = grid(5, 5);
    // vertical blinker hugging the left wall; with wrapping (r, 4) would be born
    g.place_pattern(&Pattern::new("bar", &[&[1], &[1], &[1]]), 1, 0, false);
    g.step();
    assert_eq!(alive_cells(&g), vec![(2, 0), (2, 1)]);
}

#[test]
fn custom_rules_are_honoured() {
    // B1/S-nothing-survives: a lone dot dies and all eight neighbours are born
    let rules = LifeRules { survive_min: 9, survive_max: 9, born: 1 };
    let mut g = LifeGrid::new(5, 5, rules);
    assert_eq!(g.rules(), rules);
    g.place_pattern(&DOT, 2, 2, false);
    g.step();
    assert!(!g.is_alive(2, 2));
    assert_eq!(g.live_count(), 8);
}

// ── place_pattern / is_area_clear ─────────────────────────────────────────────

#[test]
fn place_pattern_clips_silently() {
    let mut g = grid(5, 5);
    g.place_pattern(&BLOCK, 4, 4, false);
    assert_eq!(alive_cells(&g), vec![(4, 4)]);

    g.place_pattern(&BLOCK, -1, -1, false);
    assert!(g.is_alive(0, 0));
    assert_eq!(g.live_count(), 2);
}

#[test]
fn area_clear_on_empty_in_bounds() {
    let g = grid(8, 8);
    assert!(g.is_area_clear(&GLIDER, 0, 0));
    assert!(g.is_area_clear(&GLIDER, 5, 5));
}

#[test]
fn area_clear_rejects_partial_off_grid() {
    let g = grid(8, 8);
    assert!(!g.is_area_clear(&BLOCK, 7, 0));
    assert!(!g.is_area_clear(&BLOCK, 0, 7));
    assert!(!g.is_area_clear(&BLOCK, -1, 3));
}

#[test]
fn area_clear_ignores_zero_entries() {
    let mut g = grid(8, 8);
    // glider row 0 is 0 1 0 — a live cell under a 0-entry does not block
    g.place_pattern(&DOT, 0, 0, false);
    assert!(g.is_area_clear(&GLIDER, 0, 0));
    g.place_pattern(&DOT, 0, 1, false);
    assert!(!g.is_area_clear(&GLIDER, 0, 0));
}

// ── boss tags ─────────────────────────────────────────────────────────────────

#[test]
fn boss_tags_outlive_their_cells() {
    let mut g = grid(20, 20);
    g.place_pattern(&BLOCK, 5, 5, true);
    assert_eq!(g.boss_cells_alive(), 4);

    assert!(g.kill_cell(5, 5));
    assert!(g.is_boss(5, 5));
    assert!(!g.is_alive(5, 5));
    assert_eq!(g.boss_cells_alive(), 3);

    // the three survivors form an L, which grows back into the block
    g.step();
    assert!(g.is_alive(5, 5));
    assert_eq!(g.boss_cells_alive(), 4);
}

#[test]
fn step_keeps_tags_on_dead_cells() {
    let mut g = grid(10, 10);
    g.place_pattern(&DOT, 3, 3, true);
    g.step();
    assert!(!g.is_alive(3, 3));
    assert!(g.is_boss(3, 3));
    assert_eq!(g.boss_cells_alive(), 0);
}

#[test]
fn boss_count_ignores_ordinary_cells() {
    let mut g = grid(20, 20);
    g.place_pattern(&BLOCK, 0, 0, true);
    g.place_pattern(&BLOCK, 10, 10, false);
    for (r, c) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        g.kill_cell(r, c);
    }
    assert_eq!(g.boss_cells_alive(), 0);
    assert_eq!(g.live_count(), 4);
}

#[test]
fn unboss_placement_never_clears_tags() {
    let mut g = grid(10, 10);
    g.place_pattern(&BLOCK, 0, 0, true);
    g.kill_cell(0, 0);
    g.place_pattern(&BLOCK, 0, 0, false);
    assert!(g.is_boss(0, 0));
    assert_eq!(g.boss_cells_alive(), 4);
}

// ── kill_cell ─────────────────────────────────────────────────────────────────

#[test]
fn kill_cell_in_bounds() {
    let mut g = grid(5, 5);
    g.place_pattern(&DOT, 2, 3, false);
    assert!(g.kill_cell(2, 3));
    assert_eq!(g.live_count(), 0);
    // killing a dead cell is still in bounds
    assert!(g.kill_cell(0, 0));
}

#[test]
fn kill_cell_out_of_bounds_is_noop() {
    let mut g = grid(5, 5);
    g.place_pattern(&BLOCK, 0, 0, false);
    let before = g.clone();
    assert!(!g.kill_cell(-1, 0));
    assert!(!g.kill_cell(0, 5));
    assert!(!g.kill_cell(5, 0));
    assert_eq!(g, before);
}

// ── random_spawn ──────────────────────────────────────────────────────────────

#[test]
fn spawn_one_on_empty_grid() {
    for seed in 0..20 {
        let mut g = grid(40, 40);
        let mut rng = StdRng::seed_from_u64(seed);
        g.random_spawn(1, &mut rng);

        let populations: Vec<usize> = LIBRARY.iter().map(|p| p.population()).collect();
        assert!(populations.contains(&g.live_count()), "seed {seed}");

        let cells = alive_cells(&g);
        let top = cells.iter().map(|&(r, _)| r).min().unwrap();
        let bottom = cells.iter().map(|&(r, _)| r).max().unwrap();
        // empty grid → spawned at row 1
        assert_eq!(top, 1, "seed {seed}");
        assert!(bottom < (40 - SAFE_ZONE_ROWS) as i32, "seed {seed}");
    }
}

#[test]
fn spawn_goes_below_the_colony() {
    let mut g = grid(40, 40);
    g.place_pattern(&DOT, 10, 0, false);
    g.random_spawn(1, &mut seeded_rng());

    let spawned: Vec<(i32, i32)> = alive_cells(&g).into_iter().filter(|&cell| cell != (10, 0)).collect();
    assert!(!spawned.is_empty());
    // two empty rows, then the new pattern starts on row 13
    let top = spawned.iter().map(|&(r, _)| r).min().unwrap();
    assert_eq!(top, 13);
}

#[test]
fn spawn_respects_safe_zone() {
    let mut g = grid(40, 40);
    g.place_pattern(&DOT, 33, 0, false);
    g.random_spawn(3, &mut seeded_rng());
    for (r, c) in alive_cells(&g) {
        if (r, c) != (33, 0) {
            assert!(r < (40 - SAFE_ZONE_ROWS) as i32, "cell {r},{c} in the safe zone");
        }
    }
}

#[test]
fn spawn_never_overlaps_live_cells() {
    let populations: Vec<usize> = LIBRARY.iter().map(|p| p.population()).collect();
    let mut g = grid(40, 40);
    let mut rng = seeded_rng();
    for _ in 0..10 {
        let before = g.live_count();
        g.random_spawn(1, &mut rng);
        // an overlapping stamp would add fewer cells than the pattern holds
        let added = g.live_count() - before;
        assert!(added == 0 || populations.contains(&added), "added {added}");
    }
}

#[test]
fn spawn_drops_pattern_without_room() {
    // every cell live → no column is ever clear, nothing changes
    let mut g = grid(12, 12);
    for r in 0..12 {
        for c in 0..12 {
            g.place_pattern(&DOT, r, c, false);
        }
    }
    let before = g.clone();
    g.random_spawn(5, &mut seeded_rng());
    assert_eq!(g, before);
}

#[test]
fn spawn_falls_back_to_top_row() {
    // Rows 21..35 are packed, so the start row is clamped to just above the
    // safe zone, where nothing fits; the retry at the top row succeeds.
    let mut g = grid(40, 40);
    for c in 0..40 {
        for r in 21..35 {
            g.place_pattern(&DOT, r, c, false);
        }
    }
    let mut rng = seeded_rng();
    g.random_spawn(1, &mut rng);
    let above: Vec<(i32, i32)> = alive_cells(&g).into_iter().filter(|&(r, _)| r < 21).collect();
    assert!(!above.is_empty());
    assert_eq!(above.iter().map(|&(r, _)| r).min().unwrap(), 1);
}

#[test]
fn lowest_occupied_row() {
    let mut g = grid(10, 10);
    assert_eq!(g.lowest_occupied_row(), None);
    g.place_pattern(&DOT, 3, 3, false);
    g.place_pattern(&DOT, 7, 1, false);
    assert_eq!(g.lowest_occupied_row(), Some(7));
}
