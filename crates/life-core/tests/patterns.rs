//! Integration tests for well-known Life patterns on a bounded grid.
//!
//! These drive the public rule and engine APIs through several generations
//! and check the results against hand-computed grids.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use life_core::config::GridConfig;
use life_core::engine::{SimulationEngine, UpdateCause};
use life_core::rules::{self, Transition};
use life_grid::Grid;

fn run(grid: &Grid, generations: usize) -> Grid {
    let mut current = grid.clone();
    for _ in 0..generations {
        current = rules::step(&current).unwrap();
    }
    current
}

#[test]
fn glider_translates_diagonally() {
    let start = Grid::parse(
        "
        .#......
        ..#.....
        ###.....
        ........
        ........
        ........
        ........
        ........
        ",
    )
    .unwrap();
    let expected = Grid::parse(
        "
        ........
        ..#.....
        ...#....
        .###....
        ........
        ........
        ........
        ........
        ",
    )
    .unwrap();

    assert_eq!(run(&start, 4), expected);
}

#[test]
fn blinker_on_top_edge_does_not_wrap() {
    let start = Grid::parse(
        "
        .###.
        .....
        .....
        .....
        .....
        ",
    )
    .unwrap();

    let first = run(&start, 1);
    assert_eq!(
        first,
        Grid::parse(
            "
            ..#..
            ..#..
            .....
            .....
            .....
            ",
        )
        .unwrap()
    );
    // Two cells with one neighbour each: extinct.
    assert_eq!(run(&start, 2).population(), 0);
}

#[test]
fn beehive_is_still_life() {
    let beehive = Grid::parse(
        "
        ......
        ..##..
        .#..#.
        ..##..
        ......
        ",
    )
    .unwrap();

    assert_eq!(run(&beehive, 1), beehive);
    assert_eq!(run(&beehive, 10), beehive);
}

#[test]
fn toad_has_period_two() {
    let toad = Grid::parse(
        "
        ......
        ......
        ..###.
        .###..
        ......
        ......
        ",
    )
    .unwrap();

    let next = run(&toad, 1);
    assert_ne!(next, toad);
    assert_eq!(next.population(), 6);
    assert_eq!(run(&toad, 2), toad);
}

#[test]
fn transition_matches_engine_summary() {
    let grid = Grid::parse(
        "
        .....
        .###.
        .....
        ",
    )
    .unwrap();
    let next = rules::step(&grid).unwrap();
    let transition = Transition::between(&grid, &next);

    let mut engine = SimulationEngine::new(&GridConfig {
        rows: 3,
        cols: 5,
        density: 0.5,
        seed: Some(1),
    })
    .unwrap();
    engine.load(grid).unwrap();
    let summary = engine.step().unwrap();

    assert_eq!(summary.cause, UpdateCause::Step);
    assert_eq!(summary.births, transition.births);
    assert_eq!(summary.deaths, transition.deaths);
    assert_eq!(engine.grid(), &next);
}

#[test]
fn random_soup_eventually_changes_or_settles() {
    let mut engine = SimulationEngine::new(&GridConfig {
        rows: 30,
        cols: 30,
        density: 0.3,
        seed: Some(2024),
    })
    .unwrap();
    engine.randomize();
    let initial = engine.grid().clone();

    for _ in 0..50 {
        let before = engine.grid().clone();
        let summary = engine.step().unwrap();
        assert_eq!(summary.population, engine.grid().population());
        assert_eq!(
            summary.population,
            before.population() + summary.births - summary.deaths
        );
    }

    assert_ne!(engine.grid(), &initial);
    assert_eq!(engine.generation(), 50);
}
