//! Add-meme form overlay.
//!
//! A centered modal over the gallery with the three draft fields and a
//! submit row. The submit row renders disabled while the draft would be
//! rejected, mirroring the commit validation exactly.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::app::App;
use crate::meme::DraftField;

const FORM_WIDTH: u16 = 48;
const FORM_HEIGHT: u16 = 12;

const FIELDS: [DraftField; 3] = [DraftField::Title, DraftField::ImageUrl, DraftField::Description];

/// Draw the modal form over whatever is beneath it
pub(crate) fn draw_form(f: &mut Frame, app: &App, theme: &Theme) {
    let area = centered_rect(f.area(), FORM_WIDTH, FORM_HEIGHT);

    // Wipe the gallery underneath, then repaint with the overlay color
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" Добавить новый мем ")
        .style(Style::default().bg(theme.overlay_bg).fg(theme.foreground));
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (i, field) in FIELDS.into_iter().enumerate() {
        let label_y = inner.y + (i as u16) * 3;
        if label_y + 1 >= inner.y + inner.height {
            break;
        }

        draw_field(f, app, theme, field, inner, label_y);
    }

    draw_submit_row(f, app, theme, inner);
}

fn draw_field(f: &mut Frame, app: &App, theme: &Theme, field: DraftField, inner: Rect, label_y: u16) {
    let focused = app.focus() == field;
    let input_y = label_y + 1;

    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dimmed)
    };
    let label = Paragraph::new(field.label()).style(label_style.bg(theme.overlay_bg));
    f.render_widget(label, Rect { y: label_y, height: 1, ..inner });

    let prompt = if focused { "❯ " } else { "  " };
    let value = app.gallery().draft_field(field);
    let input = if value.is_empty() && !focused {
        Line::from(vec![
            Span::raw(prompt),
            Span::styled(field.placeholder(), Style::default().fg(theme.dimmed_alt)),
        ])
    } else {
        Line::from(vec![
            Span::styled(prompt, Style::default().fg(theme.accent)),
            Span::styled(value, Style::default().fg(theme.foreground)),
        ])
    };
    let input = Paragraph::new(input).style(Style::default().bg(theme.overlay_bg));
    f.render_widget(input, Rect { y: input_y, height: 1, ..inner });

    // Cursor sits after the typed value; width-aware for Cyrillic input
    if focused {
        let cursor_x = inner.x + prompt.width() as u16 + value.width() as u16;
        f.set_cursor_position((cursor_x.min(inner.x + inner.width), input_y));
    }
}

/// Submit row: enabled exactly when a commit would succeed
fn draw_submit_row(f: &mut Frame, app: &App, theme: &Theme, inner: Rect) {
    let submit_y = inner.y + inner.height.saturating_sub(1);
    let style = if app.gallery().can_commit() {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dimmed_alt)
    };

    let label = "[ Добавить ]";
    let submit_x = inner.x + inner.width.saturating_sub(label.width() as u16) / 2;
    let submit = Paragraph::new(Span::styled(label, style.bg(theme.overlay_bg)));
    f.render_widget(
        submit,
        Rect {
            x: submit_x,
            y: submit_y,
            width: (label.width() as u16).min(inner.width),
            height: 1,
        },
    );
}

/// Center a fixed-size rect inside `area`, clamped to fit
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 48, 12);
        assert_eq!(rect, Rect::new(16, 6, 48, 12));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        let rect = centered_rect(area, 48, 12);
        assert_eq!(rect, Rect::new(0, 0, 30, 8));
    }
}
