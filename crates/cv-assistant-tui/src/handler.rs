use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::App;
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(columns, rows) => {
            tracing::debug!(columns, rows, "terminal resized");
            app.sync_viewport();
        }
        AppEvent::Tick => {
            app.tick_animation();
        }
    }

    app.poll_answer().await;
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    // Global keys that work in any state
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.should_quit = true;
            return;
        }
        // Menu control
        KeyCode::Char('o') if ctrl => {
            app.session.open_panel();
            return;
        }
        KeyCode::Esc => {
            app.session.close_panel();
            return;
        }
        KeyCode::F(n @ 1..=4) => {
            app.submit_quick_question(usize::from(n - 1));
            return;
        }
        KeyCode::Char(c @ '1'..='4') if alt => {
            app.submit_quick_question(c as usize - '1' as usize);
            return;
        }
        KeyCode::PageUp => {
            app.scroll_half_page_up();
            return;
        }
        KeyCode::PageDown => {
            app.scroll_half_page_down();
            return;
        }
        KeyCode::Up if alt => {
            app.scroll_panel_up(1);
            return;
        }
        KeyCode::Down if alt => {
            app.scroll_panel_down(1);
            return;
        }
        KeyCode::Up => {
            app.scroll_up(1);
            return;
        }
        KeyCode::Down => {
            app.scroll_down(1);
            return;
        }
        _ => {}
    }

    // The input is disabled while an answer is pending
    if app.is_busy() {
        return;
    }

    handle_input_key(app, key, ctrl);
}

fn handle_input_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    let char_count = app.session.input_draft().chars().count();

    match key.code {
        KeyCode::Enter => {
            app.submit_draft();
        }
        KeyCode::Backspace => {
            if app.input_cursor > 0 {
                app.input_cursor -= 1;
                let draft = app.session.input_draft_mut();
                let byte_pos = char_to_byte_index(draft, app.input_cursor);
                draft.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            if app.input_cursor < char_count {
                let draft = app.session.input_draft_mut();
                let byte_pos = char_to_byte_index(draft, app.input_cursor);
                draft.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            app.input_cursor = (app.input_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.input_cursor = 0;
        }
        KeyCode::End => {
            app.input_cursor = char_count;
        }
        KeyCode::Char('u') if ctrl => {
            app.session.input_draft_mut().clear();
            app.input_cursor = 0;
        }
        KeyCode::Char(c) if !ctrl => {
            let cursor = app.input_cursor.min(char_count);
            let draft = app.session.input_draft_mut();
            let byte_pos = char_to_byte_index(draft, cursor);
            draft.insert(byte_pos, c);
            app.input_cursor = cursor + 1;
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_chat = app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_panel = app.panel_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        // The drawer sits on top of the chat, so it takes the wheel first
        MouseEventKind::ScrollDown if in_panel => app.scroll_panel_down(3),
        MouseEventKind::ScrollUp if in_panel => app.scroll_panel_up(3),
        MouseEventKind::ScrollDown if in_chat => app.scroll_down(3),
        MouseEventKind::ScrollUp if in_chat => app.scroll_up(3),
        MouseEventKind::Down(MouseButton::Left) => {
            // The overlay covers everything except the drawer itself
            if app.overlay_area.is_some() {
                if !in_panel {
                    app.session.click_overlay();
                }
                return;
            }

            if app.menu_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false) {
                app.session.open_panel();
                return;
            }

            let clicked = app
                .quick_question_areas
                .iter()
                .position(|r| point_in_rect(x, y, *r));
            if let Some(index) = clicked {
                app.submit_quick_question(index);
            }
        }
        _ => {}
    }
}
