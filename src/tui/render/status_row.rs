use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::push_right_aligned;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let mut spans: Vec<Span> = Vec::new();

    // Errors from the last action take the whole row
    if let Some(msg) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.red).bg(bg),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)).style(dim), area);
        return;
    }

    let label_style = Style::default()
        .fg(app.theme.background)
        .bg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);

    let hint = match app.mode {
        Mode::Navigate => "a add  e edit  x done  ! star  m move  d delete  ? help  q quit",
        Mode::Add => {
            spans.push(Span::styled(" ADD ", label_style));
            "Enter add  Esc done"
        }
        Mode::Edit => {
            spans.push(Span::styled(" EDIT ", label_style));
            "Enter save  Esc cancel"
        }
        Mode::Move => {
            spans.push(Span::styled(" MOVE ", label_style));
            "j/k choose slot  Enter drop  Esc cancel"
        }
        Mode::ConfirmClear => {
            spans.push(Span::styled(
                format!(" Delete all {} todos? ", app.list.len()),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.red)
                    .add_modifier(Modifier::BOLD),
            ));
            "y yes  any other key cancels"
        }
    };

    if app.config.ui.show_key_hints || app.mode == Mode::ConfirmClear {
        push_right_aligned(&mut spans, Span::styled(hint, dim), width);
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(dim);
    frame.render_widget(paragraph, area);
}
