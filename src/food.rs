use log::debug;
use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::snake::Position;

/// Random draws tried before falling back to scanning for free cells.
pub const SPAWN_RANDOM_ATTEMPTS: usize = 64;

/// Food type and associated effect.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FoodKind {
    Cherry,
    Mushroom,
    Pizza,
    RottenTomato,
}

impl FoodKind {
    pub const ALL: [Self; 4] = [Self::Cherry, Self::Mushroom, Self::Pizza, Self::RottenTomato];

    /// Returns the score change granted when eaten.
    #[must_use]
    pub fn points(self) -> i32 {
        match self {
            Self::Cherry => 100,
            Self::Mushroom => 350,
            Self::Pizza => 400,
            Self::RottenTomato => -150,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cherry => "cherry",
            Self::Mushroom => "mushroom",
            Self::Pizza => "pizza",
            Self::RottenTomato => "rotten tomato",
        }
    }
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodItem {
    pub position: Position,
    pub kind: FoodKind,
}

impl FoodItem {
    #[must_use]
    pub const fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }
}

/// All food items currently on the board.
#[derive(Debug, Clone)]
pub struct Food {
    items: Vec<FoodItem>,
    bounds: GridSize,
}

impl Food {
    #[must_use]
    pub fn new(initial: Vec<FoodItem>, bounds: GridSize) -> Self {
        Self {
            items: initial,
            bounds,
        }
    }

    /// Adds one item of a random kind on a random free cell.
    ///
    /// Cells holding food, or cells `is_blocked` reports, are never picked.
    pub fn spawn_random_food<R, F>(
        &mut self,
        rng: &mut R,
        is_blocked: F,
    ) -> Result<FoodItem, GameError>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let kind = FoodKind::ALL[rng.gen_range(0..FoodKind::ALL.len())];
        let position = self.free_position(rng, &is_blocked)?;

        let item = FoodItem::new(position, kind);
        debug!("spawned {} at ({}, {})", kind.label(), position.x, position.y);
        self.items.push(item);
        Ok(item)
    }

    fn free_position<R, F>(&self, rng: &mut R, is_blocked: &F) -> Result<Position, GameError>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let is_free = |position: Position| !self.is_eaten(position) && !is_blocked(position);

        for _ in 0..SPAWN_RANDOM_ATTEMPTS {
            let candidate = Position::new(
                rng.gen_range(0..i32::from(self.bounds.width)),
                rng.gen_range(0..i32::from(self.bounds.height)),
            );
            if is_free(candidate) {
                return Ok(candidate);
            }
        }

        let mut candidates = Vec::new();
        for y in 0..i32::from(self.bounds.height) {
            for x in 0..i32::from(self.bounds.width) {
                let position = Position::new(x, y);
                if is_free(position) {
                    candidates.push(position);
                }
            }
        }

        if candidates.is_empty() {
            return Err(GameError::BoardFull);
        }

        Ok(candidates[rng.gen_range(0..candidates.len())])
    }

    /// Removes every item at `position`.
    pub fn remove_food_at(&mut self, position: Position) {
        self.items.retain(|item| item.position != position);
    }

    /// Returns true if any item occupies `position`.
    #[must_use]
    pub fn is_eaten(&self, position: Position) -> bool {
        self.items.iter().any(|item| item.position == position)
    }

    /// Kind of the item at `position`; falls back to cherry on a miss.
    #[must_use]
    pub fn kind_at(&self, position: Position) -> FoodKind {
        self.items
            .iter()
            .find(|item| item.position == position)
            .map_or(FoodKind::Cherry, |item| item.kind)
    }

    #[must_use]
    pub fn value_at(&self, position: Position) -> i32 {
        self.kind_at(position).points()
    }

    #[must_use]
    pub fn current_food(&self) -> &[FoodItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::error::GameError;
    use crate::snake::Position;

    use super::{Food, FoodItem, FoodKind};

    const SMALL: GridSize = GridSize {
        width: 4,
        height: 3,
    };

    #[test]
    fn food_values_match_kinds() {
        assert_eq!(FoodKind::Cherry.points(), 100);
        assert_eq!(FoodKind::Mushroom.points(), 350);
        assert_eq!(FoodKind::Pizza.points(), 400);
        assert_eq!(FoodKind::RottenTomato.points(), -150);
    }

    #[test]
    fn spawned_food_never_shares_a_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut food = Food::new(Vec::new(), SMALL);

        for _ in 0..SMALL.total_cells() {
            food
                .spawn_random_food(&mut rng, |_| false)
                .expect("board still has room");
        }

        let unique: HashSet<Position> = food.current_food().iter().map(|i| i.position).collect();
        assert_eq!(unique.len(), SMALL.total_cells());
    }

    #[test]
    fn saturated_board_reports_board_full() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut food = Food::new(Vec::new(), SMALL);

        let result = food.spawn_random_food(&mut rng, |_| true);

        assert_eq!(result.unwrap_err(), GameError::BoardFull);
        assert!(food.is_empty());
    }

    #[test]
    fn spawn_avoids_blocked_cells() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut food = Food::new(Vec::new(), SMALL);
        let only_free = Position::new(3, 2);

        let item = food
            .spawn_random_food(&mut rng, |position| position != only_free)
            .expect("one free cell remains");

        assert_eq!(item.position, only_free);
    }

    #[test]
    fn lookup_miss_defaults_to_cherry() {
        let food = Food::new(
            vec![FoodItem::new(Position::new(1, 1), FoodKind::RottenTomato)],
            SMALL,
        );

        assert_eq!(food.kind_at(Position::new(1, 1)), FoodKind::RottenTomato);
        assert_eq!(food.value_at(Position::new(1, 1)), -150);
        assert_eq!(food.kind_at(Position::new(2, 2)), FoodKind::Cherry);
        assert_eq!(food.value_at(Position::new(2, 2)), 100);
    }

    #[test]
    fn remove_food_at_only_touches_matching_cell() {
        let mut food = Food::new(
            vec![
                FoodItem::new(Position::new(0, 0), FoodKind::Cherry),
                FoodItem::new(Position::new(1, 0), FoodKind::Pizza),
            ],
            SMALL,
        );

        food.remove_food_at(Position::new(0, 0));

        assert!(!food.is_eaten(Position::new(0, 0)));
        assert!(food.is_eaten(Position::new(1, 0)));
        assert_eq!(food.len(), 1);
    }
}
