//! Board rendering: task list in, three-column card layout out.
//!
//! `BoardView::build` is the pure half: it partitions the ordered task list
//! into the three fixed columns, preserving list order within each. The draw
//! pass maps a view onto the screen and reports the resulting geometry as a
//! [`BoardLayout`] so the drag layer can hit-test pointer positions against
//! what is actually on screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::fields::{Status, COLUMN_ORDER};
use crate::task::Task;
use crate::tui::colors::{column_accent, Theme, DROP_HIGHLIGHT};

/// Rows a card occupies, borders included.
pub const CARD_HEIGHT: u16 = 5;

/// One column of the pure partition: a status and the ids of its tasks in
/// list-relative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub status: Status,
    pub ids: Vec<String>,
}

/// Deterministic partition of the task list across the three columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub columns: [ColumnView; 3],
}

impl BoardView {
    /// Partition `tasks` by status. Pure and idempotent: same list in, same
    /// partition out, relative order preserved per column.
    pub fn build(tasks: &[Task]) -> BoardView {
        let mut columns = COLUMN_ORDER.map(|status| ColumnView {
            status,
            ids: Vec::new(),
        });
        for task in tasks {
            columns[task.status.column_index()].ids.push(task.id.clone());
        }
        BoardView { columns }
    }

    /// Number of cards in the column for `status`.
    pub fn count(&self, status: Status) -> usize {
        self.columns[status.column_index()].ids.len()
    }
}

/// Screen rectangle of one visible card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHit {
    pub id: String,
    pub area: Rect,
}

/// Screen geometry of one rendered column.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub status: Status,
    /// Inner area of the column: the drop target. Valid even when empty.
    pub dropzone: Rect,
    pub cards: Vec<CardHit>,
}

/// Geometry of the whole rendered board, used for pointer hit-testing.
#[derive(Debug, Clone, Default)]
pub struct BoardLayout {
    pub columns: Vec<ColumnLayout>,
}

impl BoardLayout {
    /// The dropzone (column) containing the point, if any.
    pub fn dropzone_at(&self, x: u16, y: u16) -> Option<Status> {
        self.columns
            .iter()
            .find(|c| contains(c.dropzone, x, y))
            .map(|c| c.status)
    }

    /// The visible card containing the point, if any.
    pub fn card_at(&self, x: u16, y: u16) -> Option<&CardHit> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .find(|card| contains(card.area, x, y))
    }
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
}

/// Replace control characters so user text cannot smuggle escape sequences
/// into the terminal. The inert-text contract of the renderer.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Compute the board geometry without drawing. `scroll` offsets are clamped,
/// and nudged so the selected card stays visible in its column.
pub fn compute_layout(
    view: &BoardView,
    area: Rect,
    scroll: &mut [usize; 3],
    selected: Option<(usize, usize)>,
) -> BoardLayout {
    let thirds = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let mut columns = Vec::with_capacity(3);
    for (col_idx, column) in view.columns.iter().enumerate() {
        let outer = thirds[col_idx];
        let inner = Block::default().borders(Borders::ALL).inner(outer);
        let visible = (inner.height / CARD_HEIGHT) as usize;

        let max_offset = column.ids.len().saturating_sub(visible.max(1));
        scroll[col_idx] = scroll[col_idx].min(max_offset);
        if let Some((sel_col, sel_card)) = selected {
            if sel_col == col_idx && visible > 0 {
                if sel_card < scroll[col_idx] {
                    scroll[col_idx] = sel_card;
                } else if sel_card >= scroll[col_idx] + visible {
                    scroll[col_idx] = sel_card + 1 - visible;
                }
            }
        }

        let mut cards = Vec::new();
        for (row, id) in column.ids.iter().skip(scroll[col_idx]).enumerate() {
            if row >= visible {
                break;
            }
            cards.push(CardHit {
                id: id.clone(),
                area: Rect {
                    x: inner.x,
                    y: inner.y + row as u16 * CARD_HEIGHT,
                    width: inner.width,
                    height: CARD_HEIGHT,
                },
            });
        }

        columns.push(ColumnLayout {
            status: column.status,
            dropzone: inner,
            cards,
        });
    }
    BoardLayout { columns }
}

/// Draw the board and return the geometry that was drawn.
#[allow(clippy::too_many_arguments)]
pub fn render_board(
    f: &mut Frame,
    area: Rect,
    tasks: &[Task],
    view: &BoardView,
    scroll: &mut [usize; 3],
    selected: Option<(usize, usize)>,
    dragging: Option<&str>,
    hover: Option<Status>,
    theme: Theme,
) -> BoardLayout {
    let layout = compute_layout(view, area, scroll, selected);
    let thirds = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (col_idx, col_layout) in layout.columns.iter().enumerate() {
        let status = col_layout.status;
        let accent = column_accent(status);
        let is_hover = hover == Some(status);
        let is_selected_col = selected.map(|(c, _)| c == col_idx).unwrap_or(false);

        let border_style = if is_hover {
            Style::default().fg(DROP_HIGHLIGHT).add_modifier(Modifier::BOLD)
        } else if is_selected_col {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim_text())
        };

        let title = format!(
            " {} ({}) ",
            status.column_title(),
            view.count(status)
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .border_style(border_style);
        f.render_widget(block, thirds[col_idx]);

        let column = &view.columns[col_idx];
        if column.ids.is_empty() {
            // Placeholder only; the dropzone rect above still accepts drops.
            let empty = Paragraph::new("No tasks")
                .style(Style::default().fg(theme.dim_text()))
                .centered();
            let mut line = col_layout.dropzone;
            line.height = line.height.min(1);
            f.render_widget(empty, line);
            continue;
        }

        for (row, hit) in col_layout.cards.iter().enumerate() {
            let card_index = scroll[col_idx] + row;
            let task = tasks.iter().find(|t| t.id == hit.id);
            let Some(task) = task else { continue };
            let is_selected =
                selected == Some((col_idx, card_index)) && dragging.is_none();
            let in_transit = dragging == Some(task.id.as_str());
            render_card(f, hit.area, task, accent, is_selected, in_transit, theme);
        }

        // Overflow indicators, one row each, drawn over the card stack edges.
        let inner = col_layout.dropzone;
        if scroll[col_idx] > 0 {
            let above = Paragraph::new(format!("▲ {} more", scroll[col_idx]))
                .style(Style::default().fg(accent));
            f.render_widget(above, Rect { height: 1, ..inner });
        }
        let shown = scroll[col_idx] + col_layout.cards.len();
        if shown < column.ids.len() {
            let below = Paragraph::new(format!("▼ {} more", column.ids.len() - shown))
                .style(Style::default().fg(accent));
            f.render_widget(
                below,
                Rect {
                    y: inner.y + inner.height.saturating_sub(1),
                    height: 1,
                    ..inner
                },
            );
        }
    }

    layout
}

/// Draw a single card: title, first line of the description, creation time.
fn render_card(
    f: &mut Frame,
    area: Rect,
    task: &Task,
    accent: ratatui::style::Color,
    is_selected: bool,
    in_transit: bool,
    theme: Theme,
) {
    let base = if is_selected {
        Style::default().bg(accent).fg(theme.selection_fg())
    } else {
        Style::default().bg(theme.card_bg()).fg(theme.text())
    };
    let base = if in_transit {
        base.add_modifier(Modifier::DIM | Modifier::ITALIC)
    } else {
        base
    };

    let desc_line = sanitize(task.desc.lines().next().unwrap_or(""));
    let text = vec![
        Line::styled(
            sanitize(&task.title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(desc_line),
        Line::styled(
            task.created_display(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];

    let card = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(base);
    f.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, status: Status) -> Task {
        let mut t = Task::new(title, "");
        t.status = status;
        t
    }

    #[test]
    fn build_partitions_by_status_preserving_order() {
        let tasks = vec![
            task("c", Status::Done),
            task("b", Status::Todo),
            task("a", Status::Todo),
        ];
        let view = BoardView::build(&tasks);
        assert_eq!(view.count(Status::Todo), 2);
        assert_eq!(view.count(Status::InProgress), 0);
        assert_eq!(view.count(Status::Done), 1);
        assert_eq!(view.columns[0].ids, vec![tasks[1].id.clone(), tasks[2].id.clone()]);
    }

    #[test]
    fn build_is_idempotent() {
        let tasks = vec![task("x", Status::Todo), task("y", Status::InProgress)];
        assert_eq!(BoardView::build(&tasks), BoardView::build(&tasks));
    }

    #[test]
    fn every_task_lands_in_exactly_one_column() {
        let tasks = vec![
            task("1", Status::Todo),
            task("2", Status::InProgress),
            task("3", Status::Done),
            task("4", Status::Done),
        ];
        let view = BoardView::build(&tasks);
        let total: usize = COLUMN_ORDER.iter().map(|s| view.count(*s)).sum();
        assert_eq!(total, tasks.len());
    }

    #[test]
    fn sanitize_neutralizes_control_characters() {
        assert_eq!(sanitize("plain text"), "plain text");
        assert_eq!(sanitize("a\x1b[31mred\x07b"), "a [31mred b");
        assert_eq!(sanitize("line\nbreak\ttab"), "line break tab");
    }

    #[test]
    fn layout_maps_cards_into_their_column() {
        let tasks = vec![task("a", Status::Todo), task("b", Status::Done)];
        let view = BoardView::build(&tasks);
        let mut scroll = [0usize; 3];
        let layout = compute_layout(&view, Rect::new(0, 0, 90, 24), &mut scroll, None);
        assert_eq!(layout.columns.len(), 3);
        assert_eq!(layout.columns[0].cards.len(), 1);
        assert_eq!(layout.columns[1].cards.len(), 0);
        assert_eq!(layout.columns[2].cards.len(), 1);
        // Card rect hit-tests back to its own id.
        let hit = &layout.columns[0].cards[0];
        assert_eq!(layout.card_at(hit.area.x + 1, hit.area.y + 1).unwrap().id, hit.id);
    }

    #[test]
    fn empty_column_still_has_a_dropzone() {
        let view = BoardView::build(&[]);
        let mut scroll = [0usize; 3];
        let layout = compute_layout(&view, Rect::new(0, 0, 90, 24), &mut scroll, None);
        for col in &layout.columns {
            assert!(col.dropzone.width > 0 && col.dropzone.height > 0);
        }
        // Middle of the first column resolves to the Todo dropzone.
        let dz = layout.columns[0].dropzone;
        assert_eq!(
            layout.dropzone_at(dz.x + dz.width / 2, dz.y + dz.height / 2),
            Some(Status::Todo)
        );
    }

    #[test]
    fn scroll_clamps_and_follows_selection() {
        let tasks: Vec<Task> = (0..10).map(|i| task(&format!("t{i}"), Status::Todo)).collect();
        let view = BoardView::build(&tasks);
        // 24-row area: 22 inner rows -> 4 visible cards.
        let mut scroll = [99usize, 0, 0];
        let layout = compute_layout(&view, Rect::new(0, 0, 90, 24), &mut scroll, None);
        assert!(scroll[0] <= 6, "offset clamped to the real overflow");
        assert!(!layout.columns[0].cards.is_empty());

        let mut scroll = [0usize; 3];
        compute_layout(&view, Rect::new(0, 0, 90, 24), &mut scroll, Some((0, 9)));
        assert!(scroll[0] > 0, "selection at the bottom pulls the window down");
    }
}
