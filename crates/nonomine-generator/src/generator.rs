use log::{debug, warn};
use nonomine_core::{Board, Position};
use nonomine_solver::StrategySolver;
use rand::seq::IndexedRandom as _;
use rand_pcg::Pcg64Mcg;

use crate::{BoardSeed, CancelToken, GeneratorError, ParamsError};

/// Layouts tried before generation gives up on the no-guess property.
pub const MAX_ATTEMPTS: usize = 5000;

/// Cancellation is polled once per this many attempts.
const CANCEL_CHECK_INTERVAL: usize = 5;

/// Parameters for board generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateParams {
    /// Board width in cells.
    pub width: u16,
    /// Board height in cells.
    pub height: u16,
    /// Total number of mines to place.
    pub bomb_count: usize,
    /// The cell the player will reveal first. Generation keeps a safe
    /// zone around it.
    pub first_click: Position,
    /// When set, only boards solvable by pure deduction from
    /// `first_click` are accepted.
    pub no_guess: bool,
}

impl GenerateParams {
    /// Largest bomb count the board can take while leaving a safe 3x3
    /// opening.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        let cells = self.width as usize * self.height as usize;
        cells.saturating_sub(9)
    }

    fn validate(&self) -> Result<(), ParamsError> {
        if self.width == 0 || self.height == 0 {
            return Err(ParamsError::EmptyDimensions);
        }
        if self.bomb_count > self.capacity() {
            return Err(ParamsError::TooManyBombs {
                bomb_count: self.bomb_count,
                capacity: self.capacity(),
            });
        }
        if usize::from(self.width) <= self.first_click.x()
            || usize::from(self.height) <= self.first_click.y()
        {
            return Err(ParamsError::FirstClickOutOfBounds(self.first_click));
        }
        Ok(())
    }
}

/// Advisory produced when generation could not meet every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorWarning {
    /// The attempt budget ran out before a no-guess layout was found;
    /// the returned board may require guessing.
    NotGuaranteedLogical,
}

/// A generated board together with its provenance.
#[derive(Debug, Clone)]
pub struct GeneratedBoard {
    /// The untouched board; the first click has not been revealed.
    pub board: Board,
    /// Seed that reproduces this board exactly.
    pub seed: BoardSeed,
    /// Number of layouts tried, including the accepted one.
    pub attempts: usize,
    /// Present when the result falls short of the request.
    pub warning: Option<GeneratorWarning>,
}

/// Generates Minesweeper boards, optionally guaranteed solvable without
/// guessing.
///
/// Mines are placed uniformly at random outside a safe zone around the
/// first click. In no-guess mode each candidate layout is played through
/// by the borrowed solver, and layouts the solver cannot finish are
/// rejected and re-rolled, up to [`MAX_ATTEMPTS`] tries.
///
/// # Examples
///
/// ```
/// use nonomine_core::Position;
/// use nonomine_generator::{BoardGenerator, GenerateParams};
/// use nonomine_solver::StrategySolver;
///
/// let solver = StrategySolver::with_all_strategies();
/// let generator = BoardGenerator::new(&solver);
///
/// let params = GenerateParams {
///     width: 9,
///     height: 9,
///     bomb_count: 10,
///     first_click: Position::new(4, 4),
///     no_guess: true,
/// };
/// let generated = generator.generate(&params)?;
/// assert_eq!(generated.board.bomb_count(), 10);
/// println!("seed: {}", generated.seed);
/// # Ok::<(), nonomine_generator::GeneratorError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BoardGenerator<'a> {
    solver: &'a StrategySolver,
}

impl<'a> BoardGenerator<'a> {
    /// Creates a generator that vets candidate boards with `solver`.
    #[must_use]
    pub const fn new(solver: &'a StrategySolver) -> Self {
        Self { solver }
    }

    /// Generates a board from a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidParams`] when the parameters are
    /// rejected.
    pub fn generate(&self, params: &GenerateParams) -> Result<GeneratedBoard, GeneratorError> {
        self.generate_with_seed(params, BoardSeed::random())
    }

    /// Generates the board determined by `seed`.
    ///
    /// The same parameters and seed always produce the same board.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidParams`] when the parameters are
    /// rejected.
    pub fn generate_with_seed(
        &self,
        params: &GenerateParams,
        seed: BoardSeed,
    ) -> Result<GeneratedBoard, GeneratorError> {
        self.generate_impl(params, seed, None)
    }

    /// Like [`generate_with_seed`](Self::generate_with_seed), polling
    /// the token between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Cancelled`] once the token fires, or
    /// [`GeneratorError::InvalidParams`] for rejected parameters.
    pub fn generate_with_cancel(
        &self,
        params: &GenerateParams,
        seed: BoardSeed,
        cancel: &CancelToken,
    ) -> Result<GeneratedBoard, GeneratorError> {
        self.generate_impl(params, seed, Some(cancel))
    }

    /// Returns `true` when the board can be finished by deduction alone
    /// starting from `first_click`.
    ///
    /// The board itself is left untouched; play happens on a copy.
    #[must_use]
    pub fn is_logically_solvable(&self, board: &Board, first_click: Position) -> bool {
        let mut trial = board.clone();
        trial.reveal(first_click);
        matches!(self.solver.solve(&mut trial), Ok((outcome, _)) if outcome.is_solved())
    }

    fn generate_impl(
        &self,
        params: &GenerateParams,
        seed: BoardSeed,
        cancel: Option<&CancelToken>,
    ) -> Result<GeneratedBoard, GeneratorError> {
        params.validate()?;
        let mut rng = seed.rng();
        let mut last_board = None;

        for attempt in 1..=MAX_ATTEMPTS {
            if let Some(cancel) = cancel {
                if (attempt - 1) % CANCEL_CHECK_INTERVAL == 0 {
                    if cancel.is_cancelled() {
                        debug!("generation cancelled after {attempt} attempts");
                        return Err(GeneratorError::Cancelled);
                    }
                    std::thread::yield_now();
                }
            }

            let Some(board) = place_mines(&mut rng, params) else {
                break;
            };
            if !params.no_guess || self.is_logically_solvable(&board, params.first_click) {
                debug!("accepted layout on attempt {attempt}");
                return Ok(GeneratedBoard {
                    board,
                    seed,
                    attempts: attempt,
                    warning: None,
                });
            }
            last_board = Some(board);
        }

        // Budget exhausted: hand back the last layout, marked as not
        // guaranteed logical.
        match last_board {
            Some(board) => {
                warn!("no no-guess layout within {MAX_ATTEMPTS} attempts, returning unvetted one");
                Ok(GeneratedBoard {
                    board,
                    seed,
                    attempts: MAX_ATTEMPTS,
                    warning: Some(GeneratorWarning::NotGuaranteedLogical),
                })
            }
            None => Err(ParamsError::TooManyBombs {
                bomb_count: params.bomb_count,
                capacity: params.capacity(),
            }
            .into()),
        }
    }
}

/// Places mines uniformly at random outside the safe zone around the
/// first click. The zone has Chebyshev radius 2 in no-guess mode when
/// the board has room for it, radius 1 otherwise.
fn place_mines(rng: &mut Pcg64Mcg, params: &GenerateParams) -> Option<Board> {
    let allowed = |radius: usize| -> Vec<Position> {
        let mut cells = Vec::new();
        for y in 0..params.height {
            for x in 0..params.width {
                let pos = Position::new(x, y);
                if pos.chebyshev_distance(params.first_click) > radius {
                    cells.push(pos);
                }
            }
        }
        cells
    };

    let mut candidates = if params.no_guess {
        allowed(2)
    } else {
        Vec::new()
    };
    if candidates.len() < params.bomb_count {
        candidates = allowed(1);
    }
    if candidates.len() < params.bomb_count {
        return None;
    }

    let mines: Vec<Position> = candidates
        .choose_multiple(rng, params.bomb_count)
        .copied()
        .collect();
    Board::with_mines(params.width, params.height, &mines).ok()
}

#[cfg(test)]
mod tests {
    use nonomine_core::Board;

    use super::*;

    fn params(width: u16, height: u16, bomb_count: usize, no_guess: bool) -> GenerateParams {
        GenerateParams {
            width,
            height,
            bomb_count,
            first_click: Position::new(width / 2, height / 2),
            no_guess,
        }
    }

    fn fixed_seed(tag: u8) -> BoardSeed {
        BoardSeed::from_bytes([tag; 32])
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        let solver = StrategySolver::with_all_strategies();
        let generator = BoardGenerator::new(&solver);
        let bad = GenerateParams {
            width: 0,
            height: 5,
            bomb_count: 0,
            first_click: Position::new(0, 0),
            no_guess: false,
        };
        assert_eq!(
            generator.generate(&bad).unwrap_err(),
            GeneratorError::InvalidParams(ParamsError::EmptyDimensions)
        );
    }

    #[test]
    fn test_rejects_too_many_bombs() {
        let solver = StrategySolver::with_all_strategies();
        let generator = BoardGenerator::new(&solver);
        let bad = params(4, 4, 8, false);
        assert_eq!(
            generator.generate(&bad).unwrap_err(),
            GeneratorError::InvalidParams(ParamsError::TooManyBombs {
                bomb_count: 8,
                capacity: 7,
            })
        );
    }

    #[test]
    fn test_rejects_out_of_bounds_click() {
        let solver = StrategySolver::with_all_strategies();
        let generator = BoardGenerator::new(&solver);
        let bad = GenerateParams {
            first_click: Position::new(9, 0),
            ..params(5, 5, 3, false)
        };
        assert_eq!(
            generator.generate(&bad).unwrap_err(),
            GeneratorError::InvalidParams(ParamsError::FirstClickOutOfBounds(Position::new(
                9, 0
            )))
        );
    }

    #[test]
    fn test_same_seed_same_board() {
        let solver = StrategySolver::with_all_strategies();
        let generator = BoardGenerator::new(&solver);
        let params = params(8, 8, 8, false);

        let a = generator.generate_with_seed(&params, fixed_seed(3)).unwrap();
        let b = generator.generate_with_seed(&params, fixed_seed(3)).unwrap();
        assert_eq!(a.board.snapshot(), b.board.snapshot());

        let c = generator.generate_with_seed(&params, fixed_seed(4)).unwrap();
        assert_ne!(a.board.snapshot(), c.board.snapshot());
    }

    #[test]
    fn test_safe_zone_kept_clear() {
        let solver = StrategySolver::with_all_strategies();
        let generator = BoardGenerator::new(&solver);
        let params = params(8, 8, 10, false);

        let generated = generator.generate_with_seed(&params, fixed_seed(9)).unwrap();
        for pos in generated.board.positions() {
            if pos.chebyshev_distance(params.first_click) <= 1 {
                assert!(!generated.board.is_mine(pos), "mine at {pos} in safe zone");
            }
        }
    }

    #[test]
    fn test_no_guess_board_is_solvable() {
        let solver = StrategySolver::with_all_strategies();
        let generator = BoardGenerator::new(&solver);
        let params = params(6, 6, 4, true);

        let generated = generator.generate_with_seed(&params, fixed_seed(1)).unwrap();
        assert!(generated.warning.is_none());
        assert!(generated.attempts >= 1);
        assert!(generator.is_logically_solvable(&generated.board, params.first_click));
        // The returned board itself is untouched.
        assert_eq!(generated.board.hidden_unflagged_count(), 36);
    }

    #[test]
    fn test_cancel_before_start() {
        let solver = StrategySolver::with_all_strategies();
        let generator = BoardGenerator::new(&solver);
        let token = CancelToken::new();
        token.cancel();

        let err = generator
            .generate_with_cancel(&params(6, 6, 4, true), fixed_seed(2), &token)
            .unwrap_err();
        assert_eq!(err, GeneratorError::Cancelled);
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        fn seed_strategy() -> impl Strategy<Value = BoardSeed> {
            any::<[u8; 32]>().prop_map(BoardSeed::from_bytes)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn prop_safe_zone_and_bomb_count(
                seed in seed_strategy(),
                width in 5u16..10,
                height in 5u16..10,
                bomb_count in 1usize..8,
                click_x in 0u16..5,
                click_y in 0u16..5,
            ) {
                let solver = StrategySolver::with_all_strategies();
                let generator = BoardGenerator::new(&solver);
                let params = GenerateParams {
                    width,
                    height,
                    bomb_count,
                    first_click: Position::new(click_x % width, click_y % height),
                    no_guess: false,
                };

                let generated = generator.generate_with_seed(&params, seed).unwrap();
                prop_assert_eq!(generated.board.bomb_count(), bomb_count);
                for pos in generated.board.positions() {
                    if pos.chebyshev_distance(params.first_click) <= 1 {
                        prop_assert!(!generated.board.is_mine(pos));
                    }
                }
            }

            #[test]
            fn prop_generation_is_deterministic(seed in seed_strategy()) {
                let solver = StrategySolver::with_all_strategies();
                let generator = BoardGenerator::new(&solver);
                let params = GenerateParams {
                    width: 7,
                    height: 7,
                    bomb_count: 6,
                    first_click: Position::new(3, 3),
                    no_guess: false,
                };

                let a = generator.generate_with_seed(&params, seed).unwrap();
                let b = generator.generate_with_seed(&params, seed).unwrap();
                prop_assert_eq!(a.board.snapshot(), b.board.snapshot());
            }
        }
    }

    #[test]
    fn test_rejects_guessing_layout() {
        // A board that deduction cannot finish from its first click is
        // exactly what no-guess generation filters out.
        let solver = StrategySolver::with_all_strategies();
        let generator = BoardGenerator::new(&solver);
        let mines = [
            Position::new(0, 0),
            Position::new(3, 1),
            Position::new(1, 2),
            Position::new(2, 3),
        ];
        let board = Board::with_mines(4, 4, &mines).unwrap();
        assert!(!generator.is_logically_solvable(&board, Position::new(1, 0)));
    }
}
