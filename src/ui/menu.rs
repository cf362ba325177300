use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::THEME;
use crate::game::DeathReason;

pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: i32) {
    render_popup(
        frame,
        area,
        "SNACK SNAKE",
        vec![
            Line::from(format!("High score: {high_score}")),
            Line::from(""),
            Line::from("[Enter] Start  [Q] Quit"),
            Line::styled("WASD/arrows move", Style::new().fg(THEME.menu_footer)),
        ],
    );
}

pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    render_popup(
        frame,
        area,
        "PAUSED",
        vec![Line::from("[Space] Resume  [Q] Quit")],
    );
}

/// `previous_high_score` is the record from before this game, so a beaten
/// record can be announced.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: i32,
    previous_high_score: i32,
    death_reason: Option<DeathReason>,
) {
    let mut lines = vec![
        Line::from(format!("Score: {score}")),
        Line::from(format!("High score: {}", score.max(previous_high_score))),
    ];
    match death_reason {
        Some(DeathReason::WallCollision) => lines.push(Line::from("Cause: hit wall")),
        Some(DeathReason::SelfCollision) => lines.push(Line::from("Cause: hit yourself")),
        None => {}
    }
    if score > previous_high_score {
        lines.push(Line::from("New high score!"));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("[Enter] Play Again  [Q] Quit"));

    render_popup(frame, area, "GAME OVER", lines);
}

/// Bordered popup sized to its content, centered in `area`.
fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'_>>) {
    let width = lines
        .iter()
        .map(Line::width)
        .chain([title.len()])
        .max()
        .unwrap_or_default();
    let width = u16::try_from(width + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(lines.len() + 4).unwrap_or(u16::MAX);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let mut body = vec![
        Line::styled(
            title.to_owned(),
            Style::new()
                .fg(THEME.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];
    body.extend(lines);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::game::DeathReason;

    use super::render_game_over_menu;

    #[test]
    fn game_over_popup_announces_a_beaten_record() {
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).expect("test terminal");

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_game_over_menu(frame, area, 450, 100, Some(DeathReason::SelfCollision));
            })
            .expect("draw succeeds");

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("High score: 450"));
        assert!(text.contains("hit yourself"));
        assert!(text.contains("New high score!"));
    }
}
