//! Terminal ownership for the interactive front end.

use std::io;
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{error, info, warn};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::game::GameState;
use crate::renderer;
use crate::ui::hud::HudInfo;

static PANIC_HOOK: Once = Once::new();

/// Raw mode plus alternate screen for one run of the game.
///
/// The terminal is restored when the session drops, and also from the panic
/// hook installed by [`TerminalSession::enter`].
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    frames: u64,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(install_panic_hook);
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(error) => {
                let _ = restore_terminal();
                return Err(error);
            }
        };

        match terminal.size() {
            Ok(size) => info!("terminal session started at {}x{}", size.width, size.height),
            Err(error) => warn!("terminal size unavailable: {error}"),
        }
        Ok(Self {
            terminal,
            frames: 0,
        })
    }

    /// Redraws the whole game.
    pub fn draw(&mut self, state: &GameState, hud_info: HudInfo) -> io::Result<()> {
        draw_game(&mut self.terminal, state, hud_info)?;
        self.frames += 1;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        match restore_terminal() {
            Ok(()) => info!("terminal restored after {} frames", self.frames),
            Err(error) => warn!("terminal restore failed: {error}"),
        }
    }
}

/// Draws one frame of `state` on any ratatui backend.
pub fn draw_game<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &GameState,
    hud_info: HudInfo,
) -> io::Result<()> {
    terminal.draw(|frame| renderer::render(frame, state, hud_info))?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        error!("panic: {panic_info}");
        default_hook(panic_info);
    }));
}

fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
