use crate::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_chat_input(key: KeyEvent, app: &mut App) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Enter => app.submit(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.quit(),
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
}
