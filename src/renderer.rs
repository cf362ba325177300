use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, GLYPH_CHERRY, GLYPH_MUSHROOM, GLYPH_PIZZA, GLYPH_ROTTEN_TOMATO,
    GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT,
    GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL, GridSize, THEME, Theme,
};
use crate::food::FoodKind;
use crate::game::{GameState, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: HudInfo) {
    let area = frame.area();
    let board_area = board_rect(area, state.bounds());
    let play_area = render_hud(frame, board_area, state);

    let theme = &THEME;
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    if hud_info.start_screen {
        render_start_menu(frame, play_area, state.high_score());
        return;
    }

    match state.status() {
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::Finished => render_game_over_menu(
            frame,
            play_area,
            state.score(),
            hud_info.previous_high_score,
            state.death_reason(),
        ),
        GameStatus::Running => {}
    }
}

/// Centers a board-sized rectangle (plus border and HUD rows) in `area`.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_add(2).min(area.width);
    let height = bounds.height.saturating_add(2 + 2).min(area.height);

    let [_, column, _] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .areas(area);
    let [_, board, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .areas(column);

    board
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for item in state.food().current_food() {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), item.position) else {
            continue;
        };

        let (glyph, color) = food_glyph(item.kind, theme);
        buffer.set_string(x, y, glyph, Style::new().fg(color));
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let segments: Vec<Position> = state.snake_body().collect();
    let head = state.snake().head();
    let tail = segments.last().copied();

    let buffer = frame.buffer_mut();
    for (index, segment) in segments.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };

        if index == 0 && *segment == head {
            buffer.set_string(
                x,
                y,
                head_glyph(state.direction()),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        if Some(*segment) == tail {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail));
            continue;
        }

        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
    }
}

/// Glyph and color used for one food kind.
#[must_use]
pub fn food_glyph(kind: FoodKind, theme: &Theme) -> (&'static str, ratatui::style::Color) {
    match kind {
        FoodKind::Cherry => (GLYPH_CHERRY, theme.cherry),
        FoodKind::Mushroom => (GLYPH_MUSHROOM, theme.mushroom),
        FoodKind::Pizza => (GLYPH_PIZZA, theme.pizza),
        FoodKind::RottenTomato => (GLYPH_ROTTEN_TOMATO, theme.rotten_tomato),
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
