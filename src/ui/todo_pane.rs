use crate::app::AppState;
use crate::domain::{PanelId, UiMode};
use crate::todo::TodoItem;
use crate::ui::panel_block;
use crate::ui::styles::{default_style, done_style, focused_border_style, hint_style, selected_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

fn todo_line(item: &TodoItem) -> Line<'static> {
    if item.completed {
        Line::from(vec![
            Span::raw(" [x] "),
            Span::styled(item.text.clone(), done_style()),
        ])
    } else {
        Line::from(vec![
            Span::raw(" [ ] "),
            Span::styled(item.text.clone(), default_style()),
        ])
    }
}

/// Render the todo list with its input line
pub fn render_todo_pane(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let block = panel_block(PanelId::Todo, focused, Some(app.todos.label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Items
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let typing = app.ui_mode == UiMode::TodoInput;
    let input_block = Block::default().borders(Borders::ALL).border_style(if typing {
        focused_border_style()
    } else {
        hint_style()
    });
    let input = if typing {
        Line::from(vec![Span::raw(app.todo_input.clone()), Span::raw("▏")])
    } else {
        Line::styled("Add a new task...", hint_style())
    };
    f.render_widget(Paragraph::new(input).block(input_block), chunks[0]);

    let items = app.todos.items();
    if items.is_empty() {
        f.render_widget(
            Paragraph::new(Line::styled(" Nothing to do. Enjoy the quiet.", hint_style())),
            chunks[1],
        );
    } else {
        let list_items: Vec<ListItem> = items.iter().map(|i| ListItem::new(todo_line(i))).collect();
        let mut state = ListState::default();
        if focused && !typing {
            state.select(Some(app.todo_selected));
        }
        f.render_stateful_widget(
            List::new(list_items).highlight_style(selected_style()),
            chunks[1],
            &mut state,
        );
    }

    let hints = if typing {
        "Enter add  Esc cancel"
    } else if app.account.is_some() {
        "a add  Spc done  d delete  o sign in/out"
    } else {
        "a add  Spc done  d delete"
    };
    f.render_widget(Paragraph::new(hints).style(hint_style()), chunks[2]);
}
