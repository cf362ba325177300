use std::collections::VecDeque;

use crate::config::GridSize;
use crate::error::GameError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body segments, head first.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    growth_pending: bool,
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    pub fn new(segments: Vec<Position>) -> Result<Self, GameError> {
        if segments.is_empty() {
            return Err(GameError::EmptySnake);
        }

        Ok(Self {
            body: VecDeque::from(segments),
            growth_pending: false,
        })
    }

    /// Translates the snake one cell towards `direction`.
    ///
    /// A tail duplicated by [`Snake::grow`] is the one dropped here, so the
    /// body keeps its extra segment.
    pub fn move_towards(&mut self, direction: Direction) {
        let next_head = self.head().step(direction);
        self.body.push_front(next_head);
        let _ = self.body.pop_back();
        self.growth_pending = false;
    }

    /// Duplicates the tail segment; the next move turns it into real length.
    pub fn grow(&mut self) {
        let tail = *self
            .body
            .back()
            .expect("snake body must always contain at least one segment");
        self.body.push_back(tail);
        self.growth_pending = true;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    ///
    /// A tail duplicated by a pending growth is not a real segment yet.
    #[must_use]
    pub fn check_collision(&self) -> bool {
        let head = self.head();
        let real_len = self.body.len() - usize::from(self.growth_pending);
        self.body
            .iter()
            .take(real_len)
            .skip(1)
            .any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
