use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::THEME;
use crate::food::FoodKind;
use crate::game::GameState;
use crate::renderer::food_glyph;

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    /// High score as it stood when the current game started.
    pub previous_high_score: i32,
    /// The front end is waiting for the first game to start.
    pub start_screen: bool,
}

/// Renders the two-line HUD below `area` and returns the play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(spread_line(
            &format!("Score {}", state.score()),
            &format!("Hi {}", state.high_score()),
            usize::from(score_area.width),
            Style::new().fg(THEME.hud_score).add_modifier(Modifier::BOLD),
        )),
        score_area,
    );

    frame.render_widget(Paragraph::new(status_line(state)), status_area);

    play_area
}

/// Left and right text pushed to opposite edges of `width` columns.
fn spread_line(left: &str, right: &str, width: usize, style: Style) -> Line<'static> {
    let used = left.width() + right.width();
    let gap = width.saturating_sub(used).max(1);

    Line::from(vec![
        Span::styled(left.to_owned(), style),
        Span::raw(" ".repeat(gap)),
        Span::styled(right.to_owned(), Style::new().fg(THEME.hud_muted)),
    ])
}

fn status_line(state: &GameState) -> Line<'static> {
    let muted = Style::new().fg(THEME.hud_muted);
    let mut spans = vec![Span::styled(
        format!("Len {} {}ms", state.snake().len(), state.speed()),
        muted,
    )];

    if let Some(remaining) = state.reversed_controls_remaining() {
        spans.push(Span::styled(
            format!(" REVERSED {:.1}s", remaining.as_secs_f32()),
            Style::new()
                .fg(THEME.hud_alert)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        for kind in FoodKind::ALL {
            let (glyph, color) = food_glyph(kind, &THEME);
            spans.push(Span::raw(" "));
            spans.push(Span::styled(glyph, Style::new().fg(color)));
            spans.push(Span::styled(kind.points().to_string(), muted));
        }
    }

    Line::from(spans)
}
