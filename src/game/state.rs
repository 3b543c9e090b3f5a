use super::{
    board::{Board, Segment},
    config::BASE_TICK_MS,
    signal::Direction,
};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Segment>,
}

impl Snake {
    /// Seed a snake of `length` cells trailing away from `head` against `direction`
    pub fn new(board: &Board, head: Segment, direction: Direction, length: usize) -> Self {
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        for i in 1..length {
            body.push(board.step(body[i - 1], direction.opposite()));
        }

        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Segment {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Segment] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Segment) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Move one cell along `heading`: the new head is computed from the old
    /// one, then every other segment takes its predecessor's old place
    pub fn slide(&mut self, board: &Board, heading: Direction) {
        let new_head = board.step(self.head(), heading);
        self.body.pop();
        self.body.insert(0, new_head);
    }

    /// Append a tail segment
    pub fn grow(&mut self, at: Segment) {
        self.body.push(at);
    }

    pub fn occupies(&self, pos: Segment) -> bool {
        self.body.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete state of one play session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub board: Board,
    pub snake: Snake,
    pub apple: Segment,
    pub heading: Direction,
    /// Set once a heading change has been taken in the current tick window
    pub heading_changed: bool,
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub tick_interval_ms: f64,
    pub is_over: bool,
}

impl Session {
    pub fn new(board: Board, snake: Snake, apple: Segment, high_score: u32) -> Self {
        Self {
            board,
            snake,
            apple,
            heading: Direction::Right,
            heading_changed: false,
            score: 0,
            high_score,
            new_high_score: false,
            tick_interval_ms: BASE_TICK_MS,
            is_over: false,
        }
    }

    /// Read-only view handed to renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            snake: self.snake.body.clone(),
            apple: self.apple,
            score: self.score,
            high_score: self.high_score,
            new_high_score: self.new_high_score,
            is_over: self.is_over,
        }
    }
}

/// Everything needed to draw a session
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub board: Board,
    /// Ordered segments, head first
    pub snake: Vec<Segment>,
    pub apple: Segment,
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub is_over: bool,
}
