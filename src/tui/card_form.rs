//! Add/edit card form state.
//!
//! Two text fields (title, description) plus a cursor over them. The form
//! does no validation itself; the app rejects a blank title on submit.

use crate::task::Task;
use crate::tui::input::InputField;

pub const TITLE_FIELD: usize = 0;
pub const DESC_FIELD: usize = 1;
const FIELD_COUNT: usize = 2;

/// Form state for creating or editing a card.
pub struct CardForm {
    pub title: InputField,
    pub desc: InputField,
    pub current_field: usize,
}

impl CardForm {
    /// An empty form for a new card, title field active.
    pub fn new() -> Self {
        let mut form = CardForm {
            title: InputField::new(),
            desc: InputField::new(),
            current_field: TITLE_FIELD,
        };
        form.update_active_field();
        form
    }

    /// A form pre-filled from an existing card.
    pub fn from_task(task: &Task) -> Self {
        let mut form = CardForm {
            title: InputField::with_value(&task.title),
            desc: InputField::with_value(&task.desc),
            current_field: TITLE_FIELD,
        };
        form.update_active_field();
        form
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_FIELD;
        self.desc.active = self.current_field == DESC_FIELD;
    }

    fn active_mut(&mut self) -> &mut InputField {
        match self.current_field {
            TITLE_FIELD => &mut self.title,
            _ => &mut self.desc,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        self.active_mut().handle_char(c);
    }

    pub fn handle_backspace(&mut self) {
        self.active_mut().handle_backspace();
    }

    pub fn handle_delete(&mut self) {
        self.active_mut().handle_delete();
    }

    pub fn handle_left_right(&mut self, right: bool) {
        let field = self.active_mut();
        if right {
            field.move_cursor_right();
        } else {
            field.move_cursor_left();
        }
    }

    /// Whether the form can be submitted as-is.
    pub fn has_title(&self) -> bool {
        !self.title.value.trim().is_empty()
    }
}
