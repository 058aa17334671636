use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{board, neighbor_count, random_subset, Error, Point, Result, Set};

pub use prune::{prune, prune_auto, prune_exact, PruneCount};
mod prune;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Deterministic,
    /// survivors are randomly pruned after every step.
    Stochastic,
}

impl Mode {
    pub fn is_deterministic(self) -> bool {
        self == Mode::Deterministic
    }
}

/// A bounded game of life and every generation computed so far.
///
/// Generation 0 is the initial state; the history only ever grows.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    grid_size_x: u32,
    grid_size_y: u32,
    board: Set,
    generations: Vec<Set>,
    mode: Mode,
    rng: R,
}

impl Game<StdRng> {
    /// a game drawing its randomness from OS entropy.
    pub fn from_entropy(
        initial: impl IntoIterator<Item = Point>,
        grid_size_x: u32,
        grid_size_y: u32,
        mode: Mode,
    ) -> Result<Self> {
        Self::new(initial, grid_size_x, grid_size_y, mode, StdRng::from_entropy())
    }
}

impl<R> Game<R>
where
    R: Rng,
{
    /// Builds a game holding only its initial generation.
    ///
    /// An empty `initial` is replaced by a random subset of the board. Points
    /// outside the board are kept as given.
    pub fn new(
        initial: impl IntoIterator<Item = Point>,
        grid_size_x: u32,
        grid_size_y: u32,
        mode: Mode,
        mut rng: R,
    ) -> Result<Self> {
        if grid_size_x == 0 || grid_size_y == 0 {
            return Err(Error::InvalidGridSize {
                x: grid_size_x,
                y: grid_size_y,
            });
        }

        let supplied: Set = initial.into_iter().collect();
        let is_random = supplied.is_empty();
        let initial = if is_random {
            random_subset(grid_size_x, grid_size_y, &mut rng)
        } else {
            supplied
        };
        debug!(
            "new {mode:?} game on {grid_size_x}x{grid_size_y}, {} {} initial points",
            initial.len(),
            if is_random { "random" } else { "supplied" },
        );

        Ok(Self {
            grid_size_x,
            grid_size_y,
            board: board(grid_size_x, grid_size_y),
            generations: vec![initial],
            mode,
            rng,
        })
    }

    /// Builds a game and computes `generations` steps right away.
    pub fn with_generations(
        initial: impl IntoIterator<Item = Point>,
        grid_size_x: u32,
        grid_size_y: u32,
        mode: Mode,
        rng: R,
        generations: usize,
    ) -> Result<Self> {
        let mut game = Self::new(initial, grid_size_x, grid_size_y, mode, rng)?;
        game.generations.reserve(generations);
        for _ in 0..generations {
            game.next_generation();
        }
        debug!("precomputed {generations} generations");
        Ok(game)
    }

    /// steps once and returns the new generation.
    pub fn next_generation(&mut self) -> &Set {
        let mut next = surviving_points(self.latest(), &self.board);
        let pruned = match self.mode {
            Mode::Deterministic => 0,
            Mode::Stochastic => prune_auto(&mut next, &mut self.rng),
        };
        self.push(next, pruned)
    }

    /// Steps once, pruning exactly as requested in stochastic mode.
    ///
    /// Nothing is appended when the prune count is out of range. The request
    /// is ignored in deterministic mode.
    pub fn next_generation_pruning(&mut self, count: PruneCount) -> Result<&Set> {
        let mut next = surviving_points(self.latest(), &self.board);
        let pruned = match self.mode {
            Mode::Deterministic => 0,
            Mode::Stochastic => prune(&mut next, count, &mut self.rng)?,
        };
        Ok(self.push(next, pruned))
    }

    fn push(&mut self, generation: Set, pruned: usize) -> &Set {
        let index = self.generations.len();
        trace!(
            "generation {index}: {} alive, {pruned} pruned",
            generation.len()
        );
        self.generations.push(generation);
        &self.generations[index]
    }
}

impl<R> Game<R> {
    pub fn generation(&self, index: usize) -> Result<&Set> {
        self.generations.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.generations.len(),
        })
    }

    pub fn latest(&self) -> &Set {
        &self.generations[self.generations.len() - 1]
    }

    pub fn generations(&self) -> &[Set] {
        &self.generations
    }

    /// number of generations computed, initial state included.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn board(&self) -> &Set {
        &self.board
    }

    pub fn grid_size(&self) -> (u32, u32) {
        (self.grid_size_x, self.grid_size_y)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl<R> Serialize for Game<R> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut game = serializer.serialize_struct("Game", 5)?;
        game.serialize_field("IsDeterministic", &self.mode.is_deterministic())?;
        game.serialize_field("GridSizeX", &self.grid_size_x)?;
        game.serialize_field("GridSizeY", &self.grid_size_y)?;
        game.serialize_field("Generations", &self.generations)?;
        game.serialize_field("Board", &self.board)?;
        game.end()
    }
}

/// The next generation of `current`, evaluated over every cell of `board`.
///
/// A live cell survives with 2 or 3 live neighbors, a dead one is born with
/// exactly 3. The result follows board order.
pub fn surviving_points(current: &Set, board: &Set) -> Set {
    board
        .iter()
        .copied()
        .filter(|&point| {
            let is_alive = current.contains(point);
            match (is_alive, neighbor_count(point, current)) {
                (_, count) if count < 2 || count > 3 => false, // dies or stays dead
                (true, _) => true,                             // stays
                (false, 3) => true,                            // becomes alive
                _ => false,                                    // stays dead
            }
        })
        .collect()
}
