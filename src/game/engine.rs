use super::{
    apple::place_apple,
    board::Board,
    config::GameConfig,
    progression::award_point,
    signal::{Direction, Signal},
    state::{Session, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Whether the snake ate the apple this tick
    pub ate_apple: bool,
    /// Whether the session is over after this tick
    pub game_over: bool,
    /// New high score to persist, if it was raised
    pub high_score: Option<u32>,
}

/// How a signal was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The session was over and has been reset
    Restarted,
    /// The heading is now the given direction
    Accepted(Direction),
    /// A reversal was refused; it still used up this tick's change
    Rejected,
    /// Nothing changed
    Ignored,
}

/// The game engine that handles all session transitions
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    board: Board,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine sized for a container of the given width
    pub fn new(config: GameConfig, container_width: Option<f64>) -> Self {
        let board = Board::from_container(container_width, config.percentage_width);
        Self::with_rng(config, board, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, board: Board, rng: R) -> Self {
        Self { config, board, rng }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh session carrying over a previously recorded high score
    pub fn new_session(&mut self, high_score: u32) -> Session {
        let snake = Snake::new(
            &self.board,
            self.board.center(),
            Direction::Right,
            self.config.effective_snake_size(),
        );
        let apple = place_apple(&mut self.rng, &self.board, &snake);

        let mut session = Session::new(
            self.board,
            snake,
            apple.unwrap_or(self.board.center()),
            high_score,
        );
        session.is_over = apple.is_none();

        info!(
            width = self.board.width,
            height = self.board.height,
            high_score,
            "session started"
        );
        session
    }

    /// Replace the session with a fresh one, keeping the high score
    pub fn reset(&mut self, session: &mut Session) {
        *session = self.new_session(session.high_score);
    }

    /// Execute one tick: move, check collisions, then grow on an apple
    pub fn step(&mut self, session: &mut Session) -> TickOutcome {
        if session.is_over {
            return TickOutcome {
                game_over: true,
                ..Default::default()
            };
        }

        let board = session.board;
        let apple = session.apple;

        session.snake.slide(&board, session.heading);
        session.heading_changed = false;

        let head = session.snake.head();

        // Self-collision wins over an apple in the same cell
        if session.snake.collides_with_body(head) {
            session.is_over = true;
            info!(score = session.score, high_score = session.high_score, "game over");
            return TickOutcome {
                game_over: true,
                ..Default::default()
            };
        }

        if head != apple {
            return TickOutcome::default();
        }

        session.snake.grow(apple);
        match place_apple(&mut self.rng, &board, &session.snake) {
            Some(next) => session.apple = next,
            None => {
                info!(length = session.snake.len(), "board full");
                session.is_over = true;
            }
        }

        let high_score = award_point(session);
        if let Some(best) = high_score {
            info!(high_score = best, "new high score");
        }
        debug!(
            score = session.score,
            length = session.snake.len(),
            tick_interval_ms = session.tick_interval_ms,
            "apple eaten"
        );

        TickOutcome {
            ate_apple: true,
            game_over: session.is_over,
            high_score,
        }
    }

    /// Apply one input signal
    ///
    /// Only one heading change is taken per tick. A refused reversal counts
    /// as that change, so a second key press in the same tick is ignored
    /// either way.
    pub fn handle_input(&mut self, session: &mut Session, signal: Signal) -> InputOutcome {
        match signal {
            Signal::Restart if session.is_over => {
                self.reset(session);
                InputOutcome::Restarted
            }
            Signal::Restart => InputOutcome::Ignored,
            Signal::Move(_) if session.is_over || session.heading_changed => {
                InputOutcome::Ignored
            }
            Signal::Move(direction) => {
                session.heading_changed = true;

                if session.heading.is_opposite(direction) {
                    return InputOutcome::Rejected;
                }

                session.heading = direction;
                InputOutcome::Accepted(direction)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        board::Segment,
        config::{BASE_TICK_MS, MIN_TICK_MS},
    };

    fn engine(start_snake_size: usize) -> GameEngine<StdRng> {
        GameEngine::with_rng(
            GameConfig::new(start_snake_size),
            Board::with_cell_width(10),
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_new_session() {
        let mut engine = engine(6);
        let session = engine.new_session(4);

        assert!(!session.is_over);
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 4);
        assert_eq!(session.heading, Direction::Right);
        assert_eq!(session.tick_interval_ms, BASE_TICK_MS);
        assert_eq!(session.snake.len(), 6);
        assert_eq!(session.snake.head(), Segment::new(150, 100));
        assert!(!session.snake.occupies(session.apple));
    }

    #[test]
    fn test_engine_from_container() {
        let engine = GameEngine::new(GameConfig::default(), None);
        assert_eq!(engine.board().width, 30);
        assert_eq!(engine.board().height, 20);
    }

    #[test]
    fn test_tick_moves_without_growth() {
        let mut engine = engine(6);
        let mut session = engine.new_session(0);
        session.apple = Segment::new(150, 90);

        let outcome = engine.step(&mut session);

        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(session.snake.head(), Segment::new(160, 100));
        assert_eq!(session.snake.len(), 6);
        assert!(!session.is_over);
    }

    #[test]
    fn test_apple_consumption() {
        let mut engine = engine(6);
        let mut session = engine.new_session(0);
        session.apple = Segment::new(150, 90);
        engine.step(&mut session);

        // Place apple directly in front of the snake
        session.apple = Segment::new(170, 100);
        let outcome = engine.step(&mut session);

        assert!(outcome.ate_apple);
        assert!(!outcome.game_over);
        assert_eq!(outcome.high_score, Some(1));
        assert_eq!(session.snake.len(), 7);
        assert_eq!(session.score, 1);
        assert_eq!(session.high_score, 1);
        assert!(session.new_high_score);
        assert_eq!(session.tick_interval_ms, 49.5);
        assert_eq!(*session.snake.body.last().unwrap(), Segment::new(170, 100));
        assert!(!session.snake.occupies(session.apple));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine(5);
        let mut session = engine.new_session(0);
        session.snake = Snake::new(&session.board, Segment::new(50, 50), Direction::Right, 5);
        session.apple = Segment::new(200, 150);

        engine.step(&mut session);
        engine.handle_input(&mut session, Signal::Move(Direction::Down));
        engine.step(&mut session);
        engine.handle_input(&mut session, Signal::Move(Direction::Left));
        engine.step(&mut session);
        engine.handle_input(&mut session, Signal::Move(Direction::Up));
        let outcome = engine.step(&mut session);

        assert!(outcome.game_over);
        assert!(session.is_over);
        assert_eq!(session.snake.head(), Segment::new(50, 50));
    }

    #[test]
    fn test_over_session_is_frozen() {
        let mut engine = engine(6);
        let mut session = engine.new_session(0);
        session.is_over = true;
        let before = session.clone();

        let outcome = engine.step(&mut session);
        assert!(outcome.game_over);
        assert_eq!(session, before);

        assert_eq!(
            engine.handle_input(&mut session, Signal::Move(Direction::Up)),
            InputOutcome::Ignored
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_tick_wraps_around_edges() {
        let mut engine = engine(1);
        let mut session = engine.new_session(0);
        session.snake = Snake::new(&session.board, Segment::new(0, 100), Direction::Left, 1);
        session.heading = Direction::Left;
        session.apple = Segment::new(200, 150);

        engine.step(&mut session);
        assert_eq!(session.snake.head(), Segment::new(290, 100));

        engine.handle_input(&mut session, Signal::Move(Direction::Up));
        session.snake.body[0] = Segment::new(290, 0);
        engine.step(&mut session);
        assert_eq!(session.snake.head(), Segment::new(290, 190));
    }

    #[test]
    fn test_reversal_rejected_and_uses_latch() {
        let mut engine = engine(3);
        let mut session = engine.new_session(0);

        assert_eq!(
            engine.handle_input(&mut session, Signal::Move(Direction::Left)),
            InputOutcome::Rejected
        );
        assert_eq!(session.heading, Direction::Right);
        assert!(session.heading_changed);

        // The slot is spent until the next tick
        assert_eq!(
            engine.handle_input(&mut session, Signal::Move(Direction::Up)),
            InputOutcome::Ignored
        );
        assert_eq!(session.heading, Direction::Right);

        engine.step(&mut session);
        assert!(!session.heading_changed);

        assert_eq!(
            engine.handle_input(&mut session, Signal::Move(Direction::Up)),
            InputOutcome::Accepted(Direction::Up)
        );
        assert_eq!(session.heading, Direction::Up);
    }

    #[test]
    fn test_one_change_per_tick() {
        let mut engine = engine(3);
        let mut session = engine.new_session(0);

        engine.handle_input(&mut session, Signal::Move(Direction::Down));
        engine.handle_input(&mut session, Signal::Move(Direction::Left));
        engine.handle_input(&mut session, Signal::Move(Direction::Up));

        assert_eq!(session.heading, Direction::Down);
    }

    #[test]
    fn test_restart_only_when_over() {
        let mut engine = engine(6);
        let mut session = engine.new_session(0);

        assert_eq!(
            engine.handle_input(&mut session, Signal::Restart),
            InputOutcome::Ignored
        );
        assert!(!session.heading_changed);
        // the latch is still free for a turn in the same tick
        assert_eq!(
            engine.handle_input(&mut session, Signal::Move(Direction::Up)),
            InputOutcome::Accepted(Direction::Up)
        );

        session.score = 12;
        session.high_score = 12;
        session.new_high_score = true;
        session.tick_interval_ms = MIN_TICK_MS;
        session.heading = Direction::Up;
        session.is_over = true;

        assert_eq!(
            engine.handle_input(&mut session, Signal::Restart),
            InputOutcome::Restarted
        );
        assert!(!session.is_over);
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 12);
        assert!(!session.new_high_score);
        assert_eq!(session.tick_interval_ms, BASE_TICK_MS);
        assert_eq!(session.heading, Direction::Right);
        assert_eq!(session.snake.len(), 6);
    }

    #[test]
    fn test_invariants_over_long_run() {
        let mut engine = engine(6);
        let mut session = engine.new_session(0);
        let mut driver = StdRng::seed_from_u64(9);
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let mut best = 0;

        for _ in 0..5000 {
            if session.is_over {
                engine.handle_input(&mut session, Signal::Restart);
                assert!(!session.snake.occupies(session.apple));
                continue;
            }

            let dir = directions[driver.gen_range(0..4)];
            let heading = session.heading;
            if let InputOutcome::Accepted(d) = engine.handle_input(&mut session, dir.into()) {
                assert!(!heading.is_opposite(d));
            }

            let apple = session.apple;
            let len = session.snake.len();
            let interval = session.tick_interval_ms;
            let outcome = engine.step(&mut session);

            if outcome.game_over && !outcome.ate_apple {
                assert_eq!(session.snake.len(), len);
            } else if session.snake.head() == apple {
                assert_eq!(session.snake.len(), len + 1);
                assert!(!session.snake.occupies(session.apple));
                assert!(session.tick_interval_ms <= interval);
            } else {
                assert_eq!(session.snake.len(), len);
                assert_eq!(session.apple, apple);
            }

            assert!(session.tick_interval_ms >= MIN_TICK_MS);
            assert!(session.high_score >= best);
            best = session.high_score;
            assert!(session.snake.body.iter().all(|&s| session.board.contains(s)));
        }
    }
}
