use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use super::view::FIELD_HEIGHT;
use super::PickerField;

fn field_contains(area: Rect, column: u16, row: u16) -> bool {
    let bottom = area.y.saturating_add(area.height.min(FIELD_HEIGHT));
    column >= area.x && column < area.right() && row >= area.y && row < bottom
}

impl PickerField<'_> {
    /// Routes a terminal event drawn at `area`. Returns whether the field consumed it.
    ///
    /// A left click on the field body or its icon presses the field. While focused,
    /// Enter, Space and Down press it too. Typing never edits the value.
    pub fn handle_event(&mut self, event: &Event, area: Rect) -> bool {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, area),
            Event::Key(key) => self.handle_key(key),
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, area: Rect) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        if !field_contains(area, mouse.column, mouse.row) {
            return false;
        }
        self.press();
        true
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press || !self.is_focused() {
            return false;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                self.press();
                true
            }
            _ => false,
        }
    }
}
