use std::io::{stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use tracing::{debug, info, warn};

use crate::proc::{Field, Rect};

type Err = Box<dyn std::error::Error>;
type Result<T> = std::result::Result<T, Err>;

pub const PROMPT: &str = "Press Enter to continue, Ctrl+C to quit";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    Continue,
    Quit,
}

/// Owns the generation currently on screen.
pub struct App {
    field: Field,
    generation: u64,
}

impl App {
    #[inline]
    pub fn new(field: Field) -> Self {
        App { field, generation: 0 }
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn advance(&mut self) {
        self.field = self.field.tick();
        self.generation += 1;
        debug!(generation = self.generation, population = self.field.population(), "advanced");
    }

    /// Lines of one screen: status, the board, a gap and the prompt.
    pub fn frame(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.field.size().h() + 3);
        lines.push(format!(
            "Generation {}, population {}",
            self.generation,
            self.field.population()
        ));
        lines.extend(self.field.render());
        lines.push(String::new());
        lines.push(PROMPT.to_string());
        lines
    }
}

pub fn run(mut a: App) -> Result<()> {
    check_fits(a.field().size());

    runup()?;
    let d = draw(&mut a);
    shutdown()?;
    d?;
    info!(generation = a.generation(), "simulation stopped");
    Ok(())
}

fn check_fits(size: &Rect) {
    match terminal::size() {
        Ok((w, h)) => {
            // Status line, gap and prompt take three rows
            let term = Rect::new(w as usize, (h as usize).saturating_sub(3));
            if !size.fits_in(&term) {
                warn!(
                    field_w = size.w(),
                    field_h = size.h(),
                    term_w = w,
                    term_h = h,
                    "field is larger than the terminal, output will be cut"
                );
            }
        }
        Err(e) => warn!(error = %e, "could not read terminal size"),
    }
}

fn runup() -> Result<()> {
    execute!(stdout(), EnterAlternateScreen, SetTitle("Toroidal life"), Hide)?;
    enable_raw_mode()?;
    Ok(())
}

fn shutdown() -> Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

fn draw(a: &mut App) -> Result<()> {
    loop {
        clear()?;
        let mut out = stdout();
        for line in a.frame() {
            // Raw mode: no implicit carriage return
            write!(out, "{line}\r\n")?;
        }
        out.flush()?;

        match wait_action()? {
            Action::Continue => a.advance(),
            Action::Quit => return Ok(()),
        }
    }
}

fn clear() -> Result<()> {
    use terminal::{Clear, ClearType};

    queue!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

fn wait_action() -> Result<Action> {
    loop {
        if let Event::Key(key) = event::read()? {
            if let Some(action) = action_for(key) {
                return Ok(action);
            }
        }
    }
}

/// Maps a key press to what the loop should do; `None` means keep waiting.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        }
    } else {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Continue),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn enter_and_space_continue() {
        assert_eq!(action_for(press(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::Continue));
        assert_eq!(action_for(press(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Action::Continue));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(action_for(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Action::Quit));
        assert_eq!(action_for(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::Quit));
        assert_eq!(action_for(press(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Action::Quit));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(action_for(press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(action_for(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
        assert_eq!(action_for(press(KeyCode::Up, KeyModifiers::NONE)), None);

        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(action_for(release), None);
    }

    #[test]
    fn frame_layout() {
        let a = App::new(Field::parse(["#.", ".."]).unwrap());
        assert_eq!(
            a.frame(),
            vec!["Generation 0, population 1", "#.", "..", "", PROMPT]
        );
    }

    #[test]
    fn advance_replaces_field() {
        let mut a = App::new(Field::parse([".#.", ".#.", ".#."]).unwrap());
        a.advance();
        assert_eq!(a.generation(), 1);
        // 3x3 torus: every dead cell sees all three live ones
        assert_eq!(a.field().render(), vec!["###", "###", "###"]);
        a.advance();
        assert_eq!(a.generation(), 2);
        assert_eq!(a.field().population(), 0);
    }
}
