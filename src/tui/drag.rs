//! Mouse drag-and-drop gesture tracking.
//!
//! A small per-gesture state machine: button-down over a card starts a drag,
//! motion updates which dropzone is hover-highlighted, button-up either
//! yields a [`DropEvent`] (released inside a recognized dropzone) or nothing.
//! The controller only observes geometry; applying the move is the caller's
//! job.

use crate::fields::Status;
use crate::tui::board_view::BoardLayout;

/// A completed drop: move `task_id` to `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub task_id: String,
    pub status: Status,
}

/// Gesture state. One gesture is live at a time; a new button-down simply
/// restarts the machine.
#[derive(Debug, Default)]
pub struct DragController {
    dragging: Option<String>,
    hover: Option<Status>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the card in transit, if a gesture is live.
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Dropzone currently under the pointer during a live gesture.
    pub fn hover(&self) -> Option<Status> {
        self.hover
    }

    /// Button pressed: enter Dragging when the point is over a card.
    pub fn on_mouse_down(&mut self, x: u16, y: u16, layout: &BoardLayout) {
        self.hover = None;
        self.dragging = layout.card_at(x, y).map(|hit| hit.id.clone());
    }

    /// Pointer moved with the button held: track the dropzone underneath so
    /// the renderer can highlight it; leaving a zone clears the highlight.
    pub fn on_mouse_drag(&mut self, x: u16, y: u16, layout: &BoardLayout) {
        if self.dragging.is_some() {
            self.hover = layout.dropzone_at(x, y);
        }
    }

    /// Button released: ends the gesture either way. Returns the drop event
    /// when the release point is inside a recognized dropzone.
    pub fn on_mouse_up(&mut self, x: u16, y: u16, layout: &BoardLayout) -> Option<DropEvent> {
        let task_id = self.dragging.take()?;
        self.hover = None;
        let status = layout.dropzone_at(x, y)?;
        Some(DropEvent { task_id, status })
    }

    /// Abandon any live gesture (focus loss, screen switch).
    pub fn reset(&mut self) {
        self.dragging = None;
        self.hover = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::board_view::{CardHit, ColumnLayout};
    use ratatui::layout::Rect;

    /// Three 20-wide columns side by side, one card ("x") in the first.
    fn layout() -> BoardLayout {
        let card = CardHit {
            id: "x".to_string(),
            area: Rect::new(1, 1, 18, 5),
        };
        BoardLayout {
            columns: vec![
                ColumnLayout {
                    status: Status::Todo,
                    dropzone: Rect::new(1, 1, 18, 20),
                    cards: vec![card],
                },
                ColumnLayout {
                    status: Status::InProgress,
                    dropzone: Rect::new(21, 1, 18, 20),
                    cards: vec![],
                },
                ColumnLayout {
                    status: Status::Done,
                    dropzone: Rect::new(41, 1, 18, 20),
                    cards: vec![],
                },
            ],
        }
    }

    #[test]
    fn drop_on_a_dropzone_fires_exactly_once() {
        let layout = layout();
        let mut drag = DragController::new();
        drag.on_mouse_down(5, 3, &layout);
        assert_eq!(drag.dragging(), Some("x"));
        drag.on_mouse_drag(25, 5, &layout);
        assert_eq!(drag.hover(), Some(Status::InProgress));
        let event = drag.on_mouse_up(25, 5, &layout);
        assert_eq!(
            event,
            Some(DropEvent {
                task_id: "x".to_string(),
                status: Status::InProgress,
            })
        );
        // Gesture is over: a second release yields nothing.
        assert_eq!(drag.on_mouse_up(25, 5, &layout), None);
        assert_eq!(drag.dragging(), None);
    }

    #[test]
    fn press_outside_any_card_does_not_start_a_gesture() {
        let layout = layout();
        let mut drag = DragController::new();
        drag.on_mouse_down(25, 5, &layout); // empty column, no card
        assert_eq!(drag.dragging(), None);
        assert_eq!(drag.on_mouse_up(25, 5, &layout), None);
    }

    #[test]
    fn release_outside_a_dropzone_yields_nothing_and_resets() {
        let layout = layout();
        let mut drag = DragController::new();
        drag.on_mouse_down(5, 3, &layout);
        let event = drag.on_mouse_up(70, 30, &layout); // off the board
        assert_eq!(event, None);
        assert_eq!(drag.dragging(), None, "drag-end resets even without a drop");
    }

    #[test]
    fn hover_follows_the_pointer_and_clears_on_leave() {
        let layout = layout();
        let mut drag = DragController::new();
        drag.on_mouse_down(5, 3, &layout);
        drag.on_mouse_drag(45, 5, &layout);
        assert_eq!(drag.hover(), Some(Status::Done));
        drag.on_mouse_drag(70, 30, &layout); // between/outside zones
        assert_eq!(drag.hover(), None);
        drag.on_mouse_drag(5, 5, &layout); // back over the origin column
        assert_eq!(drag.hover(), Some(Status::Todo));
    }

    #[test]
    fn motion_without_a_gesture_never_highlights() {
        let layout = layout();
        let mut drag = DragController::new();
        drag.on_mouse_drag(25, 5, &layout);
        assert_eq!(drag.hover(), None);
    }

    #[test]
    fn dropping_back_on_the_origin_column_still_reports_the_move() {
        let layout = layout();
        let mut drag = DragController::new();
        drag.on_mouse_down(5, 3, &layout);
        let event = drag.on_mouse_up(5, 10, &layout);
        assert_eq!(
            event,
            Some(DropEvent {
                task_id: "x".to_string(),
                status: Status::Todo,
            })
        );
    }
}
