use golife::{board, pattern, point, surviving_points, Game, Mode, Point, PruneCount, Set};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn set(points: &[Point]) -> Set {
    points.iter().copied().collect()
}

fn game(initial: &[Point], mode: Mode) -> Game<ChaCha8Rng> {
    Game::new(initial.iter().copied(), 10, 10, mode, ChaCha8Rng::seed_from_u64(0)).unwrap()
}

#[test]
fn block_is_stable() {
    let block = [point!(4, 4), point!(4, 5), point!(5, 4), point!(5, 5)];
    let mut game = game(&block, Mode::Deterministic);
    for _ in 0..5 {
        assert_eq!(game.next_generation(), &set(&block));
    }
}

#[test]
fn blinker_oscillates() {
    let vertical = [point!(1, 1), point!(1, 2), point!(1, 3)];
    let horizontal = [point!(0, 2), point!(1, 2), point!(2, 2)];
    let mut game = game(&vertical, Mode::Deterministic);

    assert_eq!(game.next_generation(), &set(&horizontal));
    assert_eq!(game.next_generation(), &set(&vertical));
    assert_eq!(game.generation(1).unwrap(), &set(&horizontal));
    assert_eq!(game.len(), 3);
}

#[test]
fn blinker_against_the_origin_edge() {
    // half of the horizontal phase falls off the board at x = -1
    let vertical = [point!(0, 0), point!(0, 1), point!(0, 2)];
    let next = surviving_points(&set(&vertical), &board(10, 10));
    assert_eq!(next, set(&[point!(0, 1), point!(1, 1)]));
}

#[test]
fn corner_cells_see_no_wrapped_neighbors() {
    // with a wrapping lattice the far corners would be neighbors of the origin
    for (w, h) in [(2, 2), (2, 7), (10, 10), (31, 3)] {
        let board = board(w, h);
        let corners = set(&[point!(w, 0), point!(0, h), point!(w, h)]);
        assert!(!surviving_points(&corners, &board).contains(point!(0, 0)));
    }
}

#[test]
fn beacon_from_pattern_file() {
    let text = include_str!("../patterns/beacon.txt");
    let mut game = Game::new(
        pattern::parse(text),
        5,
        5,
        Mode::Deterministic,
        ChaCha8Rng::seed_from_u64(0),
    )
    .unwrap();
    let initial = game.latest().clone();
    assert_eq!(game.next_generation().len(), initial.len() - 2);
    assert_eq!(game.next_generation(), &initial);
    assert_eq!(pattern::render(&initial, 5, 5), text);
}

#[test]
fn stochastic_history_is_seeded() {
    let run = |seed| {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Game::with_generations(Vec::<Point>::new(), 12, 12, Mode::Stochastic, rng, 15)
            .unwrap()
            .generations()
            .to_vec()
    };
    assert_eq!(run(3), run(3));
}

#[test]
fn stochastic_step_rejects_oversized_prune() {
    let block = [point!(4, 4), point!(4, 5), point!(5, 4), point!(5, 5)];
    let mut game = game(&block, Mode::Stochastic);
    assert_eq!(
        game.next_generation_pruning(PruneCount::Exact(5)),
        Err(golife::Error::PruneCountOutOfRange {
            requested: 5,
            available: 4
        })
    );
    assert_eq!(game.len(), 1);
}
