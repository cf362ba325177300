use std::time::Duration;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ACTIVE_FOOD_TARGET, BOARD, GameSettings, GridSize, MIN_SPEED_MS};
use crate::effects::{EffectSchedule, TimedEffect};
use crate::error::GameError;
use crate::food::{Food, FoodItem, FoodKind};
use crate::input::{
    Direction, direction_change_is_valid, direction_for_key_code, map_movement_key,
};
use crate::snake::{Position, Snake};

/// Snake layout every game starts from, head first.
pub const INITIAL_SNAKE: [Position; 3] = [
    Position::new(5, 5),
    Position::new(4, 5),
    Position::new(3, 5),
];

/// Food layout every game starts from.
pub const INITIAL_FOOD: [FoodItem; 3] = [
    FoodItem::new(Position::new(10, 10), FoodKind::Cherry),
    FoodItem::new(Position::new(15, 15), FoodKind::Mushroom),
    FoodItem::new(Position::new(20, 5), FoodKind::Pizza),
];

const INITIAL_DIRECTION: Direction = Direction::Right;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    Finished,
}

/// What ended the last game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Observable result of one [`GameState::tick`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickOutcome {
    /// False when the tick was skipped because the game is paused or finished.
    pub ticked: bool,
    pub eaten: Option<FoodKind>,
    pub death: Option<DeathReason>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Food,
    direction: Direction,
    score: i32,
    high_score: i32,
    status: GameStatus,
    speed_ms: u64,
    controls_reversed: bool,
    effects: EffectSchedule,
    tick_count: u64,
    death_reason: Option<DeathReason>,
    settings: GameSettings,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a running game seeded from OS entropy.
    pub fn new(
        settings: GameSettings,
        initial_snake: &[Position],
        initial_food: &[FoodItem],
    ) -> Result<Self, GameError> {
        Self::with_rng(settings, initial_snake, initial_food, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(
        settings: GameSettings,
        initial_snake: &[Position],
        initial_food: &[FoodItem],
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(
            settings,
            initial_snake,
            initial_food,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        settings: GameSettings,
        initial_snake: &[Position],
        initial_food: &[FoodItem],
        rng: StdRng,
    ) -> Result<Self, GameError> {
        let snake = Snake::new(initial_snake.to_vec())?;

        Ok(Self {
            snake,
            food: Food::new(initial_food.to_vec(), BOARD),
            direction: INITIAL_DIRECTION,
            score: 0,
            high_score: 0,
            status: GameStatus::Running,
            speed_ms: settings.initial_speed_ms,
            controls_reversed: false,
            effects: EffectSchedule::new(),
            tick_count: 0,
            death_reason: None,
            settings,
            bounds: BOARD,
            rng,
        })
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::default();
        }

        self.tick_count += 1;
        self.move_snake();
        let eaten = self.handle_food_consumption();

        let death = if self.check_wall_collision() {
            Some(DeathReason::WallCollision)
        } else if self.check_self_collision() {
            Some(DeathReason::SelfCollision)
        } else {
            None
        };

        if let Some(reason) = death {
            self.game_over(reason);
        }

        TickOutcome {
            ticked: true,
            eaten,
            death,
        }
    }

    /// Moves the snake one cell in the current direction.
    pub fn move_snake(&mut self) {
        self.snake.move_towards(self.direction);
    }

    /// Eats the food under the head, if any, and applies its effect.
    pub fn handle_food_consumption(&mut self) -> Option<FoodKind> {
        let head = self.snake.head();
        if !self.food.is_eaten(head) {
            return None;
        }

        self.snake.grow();
        let kind = self.food.kind_at(head);
        self.score += self.food.value_at(head);
        self.food.remove_food_at(head);
        debug!(
            "ate {} at ({}, {}), score {}",
            kind.label(),
            head.x,
            head.y,
            self.score
        );

        match kind {
            FoodKind::Mushroom => {
                self.controls_reversed = true;
                self.effects.schedule(
                    TimedEffect::RestoreControls,
                    self.settings.reversed_controls_duration(),
                );
            }
            FoodKind::Pizza => {
                self.speed_ms = self
                    .speed_ms
                    .saturating_sub(self.settings.pizza_speed_step_ms)
                    .max(MIN_SPEED_MS);
                debug!("speed is now {} ms", self.speed_ms);
            }
            FoodKind::Cherry | FoodKind::RottenTomato => {}
        }

        self.replenish_food();
        Some(kind)
    }

    fn replenish_food(&mut self) {
        let snake = &self.snake;
        while self.food.len() < ACTIVE_FOOD_TARGET {
            if let Err(error) = self
                .food
                .spawn_random_food(&mut self.rng, |position| snake.occupies(position))
            {
                warn!("food not replenished: {error}");
                break;
            }
        }
    }

    /// Returns true when the head has left the board.
    #[must_use]
    pub fn check_wall_collision(&self) -> bool {
        !self.snake.head().is_within_bounds(self.bounds)
    }

    #[must_use]
    pub fn check_self_collision(&self) -> bool {
        self.snake.check_collision()
    }

    /// Ends the game and records a new high score when beaten.
    pub fn game_over(&mut self, reason: DeathReason) {
        self.status = GameStatus::Finished;
        self.death_reason = Some(reason);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        info!(
            "game over ({reason:?}) after {} ticks, score {}, high score {}",
            self.tick_count, self.score, self.high_score
        );
    }

    /// Applies a pressed movement key.
    ///
    /// The key goes through the reversed mapping while a mushroom is active.
    /// Returns whether the heading changed; reversals are dropped silently.
    pub fn update_direction(&mut self, key: Direction) -> bool {
        if self.status == GameStatus::Finished {
            return false;
        }

        let candidate = map_movement_key(key, self.controls_reversed);
        if !direction_change_is_valid(self.direction, candidate) {
            return false;
        }

        let changed = candidate != self.direction;
        self.direction = candidate;
        changed
    }

    /// Same as [`GameState::update_direction`] for a raw key code such as `KeyW`.
    pub fn update_direction_from_key_code(&mut self, code: &str) -> bool {
        match direction_for_key_code(code) {
            Some(key) => self.update_direction(key),
            None => false,
        }
    }

    /// Switches between running and paused; finished games stay finished.
    pub fn toggle_pause(&mut self) -> GameStatus {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::Finished => GameStatus::Finished,
        };
        debug!("status is now {:?}", self.status);
        self.status
    }

    /// Starts a new game from the given layout, keeping the high score.
    pub fn reset(
        &mut self,
        initial_snake: &[Position],
        initial_food: &[FoodItem],
    ) -> Result<(), GameError> {
        self.snake = Snake::new(initial_snake.to_vec())?;
        self.food = Food::new(initial_food.to_vec(), self.bounds);
        self.direction = INITIAL_DIRECTION;
        self.score = 0;
        self.status = GameStatus::Running;
        self.speed_ms = self.settings.initial_speed_ms;
        self.controls_reversed = false;
        self.effects.clear();
        self.tick_count = 0;
        self.death_reason = None;
        info!("game reset, high score {}", self.high_score);
        Ok(())
    }

    /// Feeds elapsed wall time to pending effects. Paused time does not count.
    pub fn advance_clock(&mut self, elapsed: Duration) {
        if self.status != GameStatus::Running {
            return;
        }

        for effect in self.effects.advance(elapsed) {
            match effect {
                TimedEffect::RestoreControls => {
                    self.controls_reversed = false;
                    info!("controls restored");
                }
            }
        }
    }

    /// Snake segments inside the board, head first.
    pub fn snake_body(&self) -> impl Iterator<Item = Position> + '_ {
        let bounds = self.bounds;
        self.snake
            .segments()
            .copied()
            .filter(move |segment| segment.is_within_bounds(bounds))
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> &Food {
        &self.food
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> i32 {
        self.high_score
    }

    /// Current tick interval in milliseconds.
    #[must_use]
    pub fn speed(&self) -> u64 {
        self.speed_ms
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    #[must_use]
    pub fn controls_reversed(&self) -> bool {
        self.controls_reversed
    }

    /// Time left on the reversed controls, if active.
    #[must_use]
    pub fn reversed_controls_remaining(&self) -> Option<Duration> {
        self.effects.remaining(TimedEffect::RestoreControls)
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::GameSettings;
    use crate::food::{FoodItem, FoodKind};
    use crate::input::Direction;
    use crate::snake::Position;

    use super::{DeathReason, GameState, GameStatus, INITIAL_FOOD, INITIAL_SNAKE};

    fn state_with(snake: &[Position], food: &[FoodItem]) -> GameState {
        GameState::new_with_seed(GameSettings::default(), snake, food, 7)
            .expect("layout is valid")
    }

    fn snake_heading_right_at(x: i32, y: i32) -> Vec<Position> {
        vec![
            Position::new(x, y),
            Position::new(x - 1, y),
            Position::new(x - 2, y),
        ]
    }

    #[test]
    fn first_tick_moves_initial_snake_right() {
        let mut state = state_with(&INITIAL_SNAKE, &INITIAL_FOOD);

        let outcome = state.tick();

        assert!(outcome.ticked);
        assert_eq!(outcome.eaten, None);
        let body: Vec<Position> = state.snake_body().collect();
        assert_eq!(
            body,
            vec![
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(4, 5)
            ]
        );
    }

    #[test]
    fn eating_cherry_grows_scores_and_replenishes() {
        let food = [
            FoodItem::new(Position::new(10, 10), FoodKind::Cherry),
            FoodItem::new(Position::new(15, 15), FoodKind::Mushroom),
            FoodItem::new(Position::new(20, 5), FoodKind::Pizza),
        ];
        let mut state = state_with(&snake_heading_right_at(9, 10), &food);

        let outcome = state.tick();

        assert_eq!(outcome.eaten, Some(FoodKind::Cherry));
        assert_eq!(state.snake().len(), 4);
        assert_eq!(state.score(), 100);
        assert_eq!(state.food().len(), 3);
        assert!(!state.food().is_eaten(Position::new(10, 10)));
        assert_eq!(state.status(), GameStatus::Running);
    }

    #[test]
    fn rotten_tomato_can_push_score_negative() {
        let food = [FoodItem::new(Position::new(10, 10), FoodKind::RottenTomato)];
        let mut state = state_with(&snake_heading_right_at(9, 10), &food);

        state.tick();

        assert_eq!(state.score(), -150);
        assert_eq!(state.food().len(), 3);
    }

    #[test]
    fn mushroom_reverses_controls_for_three_seconds() {
        let food = [FoodItem::new(Position::new(10, 10), FoodKind::Mushroom)];
        let mut state = state_with(&snake_heading_right_at(9, 10), &food);

        state.tick();
        assert!(state.controls_reversed());
        assert_eq!(state.score(), 350);

        // Pressing Up while reversed heads Down.
        assert!(state.update_direction(Direction::Up));
        assert_eq!(state.direction(), Direction::Down);

        state.advance_clock(Duration::from_millis(2999));
        assert!(state.controls_reversed());

        state.advance_clock(Duration::from_millis(1));
        assert!(!state.controls_reversed());
    }

    #[test]
    fn paused_time_does_not_expire_reversal() {
        let food = [FoodItem::new(Position::new(10, 10), FoodKind::Mushroom)];
        let mut state = state_with(&snake_heading_right_at(9, 10), &food);
        state.tick();

        state.toggle_pause();
        state.advance_clock(Duration::from_secs(10));

        assert!(state.controls_reversed());
    }

    #[test]
    fn pizza_speeds_up_permanently_down_to_floor() {
        let food = [FoodItem::new(Position::new(10, 10), FoodKind::Pizza)];
        let mut state = state_with(&snake_heading_right_at(9, 10), &food);

        state.tick();
        assert_eq!(state.speed(), 100);

        state.advance_clock(Duration::from_secs(60));
        assert_eq!(state.speed(), 100);

        // Two more pizzas straight ahead clamp at the floor.
        let food = [
            FoodItem::new(Position::new(10, 10), FoodKind::Pizza),
            FoodItem::new(Position::new(11, 10), FoodKind::Pizza),
        ];
        let mut state = state_with(&snake_heading_right_at(9, 10), &food);
        state.tick();
        state.tick();
        assert_eq!(state.speed(), 50);
    }

    #[test]
    fn opposite_direction_is_ignored_even_when_reversed() {
        let mut state = state_with(&INITIAL_SNAKE, &INITIAL_FOOD);

        assert!(!state.update_direction(Direction::Left));
        assert_eq!(state.direction(), Direction::Right);

        state.controls_reversed = true;
        // Reversed Right maps to Left, the opposite of the current heading.
        assert!(!state.update_direction(Direction::Right));
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn turns_between_ticks_only_check_the_current_heading() {
        let mut state = state_with(&INITIAL_SNAKE, &INITIAL_FOOD);

        assert!(state.update_direction(Direction::Up));
        // Left is not the opposite of Up, so it replaces the pending turn.
        assert!(state.update_direction(Direction::Left));
        assert_eq!(state.direction(), Direction::Left);

        // The head lands on its own neck.
        let outcome = state.tick();
        assert_eq!(state.snake().head(), Position::new(4, 5));
        assert_eq!(outcome.death, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn raw_key_codes_drive_direction() {
        let mut state = state_with(&INITIAL_SNAKE, &INITIAL_FOOD);

        assert!(!state.update_direction_from_key_code("KeyX"));
        assert!(state.update_direction_from_key_code("KeyS"));
        assert_eq!(state.direction(), Direction::Down);
    }

    #[test]
    fn paused_ticks_change_nothing() {
        let mut state = state_with(&INITIAL_SNAKE, &INITIAL_FOOD);
        assert_eq!(state.toggle_pause(), GameStatus::Paused);

        for _ in 0..5 {
            assert!(!state.tick().ticked);
        }

        assert_eq!(state.snake().head(), Position::new(5, 5));
        assert_eq!(state.food().current_food(), &INITIAL_FOOD);
        assert_eq!(state.score(), 0);
        assert_eq!(state.toggle_pause(), GameStatus::Running);
    }

    #[test]
    fn wall_collision_finishes_and_hides_the_head() {
        let mut state = state_with(&snake_heading_right_at(29, 3), &[]);

        let outcome = state.tick();

        assert_eq!(outcome.death, Some(DeathReason::WallCollision));
        assert!(state.is_finished());
        assert!(state.snake_body().all(|p| p.x < 30));
        assert_eq!(state.snake_body().count(), 2);
        assert_eq!(state.toggle_pause(), GameStatus::Finished);
        assert!(!state.tick().ticked);
    }

    #[test]
    fn self_collision_finishes_the_game() {
        let snake = [
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(3, 3),
            Position::new(2, 3),
            Position::new(1, 3),
        ];
        let mut state = state_with(&snake, &[]);
        // Heading Left with (3,2) as the neck; turning Down runs into (2,3).
        state.direction = Direction::Left;
        assert!(state.update_direction(Direction::Down));

        let outcome = state.tick();

        assert_eq!(outcome.death, Some(DeathReason::SelfCollision));
        assert_eq!(state.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn high_score_only_rises_and_survives_reset() {
        let food = [FoodItem::new(Position::new(10, 10), FoodKind::Cherry)];
        let mut state = state_with(&snake_heading_right_at(9, 10), &food);
        state.tick();
        state.game_over(DeathReason::WallCollision);
        assert_eq!(state.high_score(), 100);

        state
            .reset(&INITIAL_SNAKE, &INITIAL_FOOD)
            .expect("layout is valid");
        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 100);

        state.game_over(DeathReason::SelfCollision);
        assert_eq!(state.high_score(), 100);
    }

    #[test]
    fn reset_cancels_pending_reversal() {
        let food = [FoodItem::new(Position::new(10, 10), FoodKind::Mushroom)];
        let mut state = state_with(&snake_heading_right_at(9, 10), &food);
        state.tick();
        state.toggle_pause();

        state
            .reset(&INITIAL_SNAKE, &INITIAL_FOOD)
            .expect("layout is valid");
        assert!(!state.controls_reversed());
        assert_eq!(state.reversed_controls_remaining(), None);

        state.controls_reversed = true;
        state.advance_clock(Duration::from_secs(5));
        assert!(state.controls_reversed(), "stale timer must not fire");
    }

    #[test]
    fn reset_restores_speed_and_rejects_empty_layout() {
        let food = [FoodItem::new(Position::new(10, 10), FoodKind::Pizza)];
        let mut state = state_with(&snake_heading_right_at(9, 10), &food);
        state.tick();

        assert!(state.reset(&[], &INITIAL_FOOD).is_err());
        state
            .reset(&INITIAL_SNAKE, &INITIAL_FOOD)
            .expect("layout is valid");

        assert_eq!(state.speed(), 200);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.tick_count(), 0);
    }
}
