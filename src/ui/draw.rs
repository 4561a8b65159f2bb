//! Drawing functions for the gallery.
//!
//! Frame anatomy:
//! - Header row with the gallery title and the add-meme hint
//! - Card grid (or the empty-state message)
//! - Status bar with key hints
//! - Add-form overlay on top when open
//!
//! Cards render in two passes, text first and graphics images second,
//! so a slow image load never holds up a frame.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui_image::{Resize, StatefulImage};
use unicode_width::UnicodeWidthStr;

use super::form;
use super::meme_card::{ImageSlot, MemeCard};
use super::theme::Theme;
use crate::app::App;

/// Gap between card columns
const COLUMN_GAP: u16 = 2;

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let theme = app.config().resolve_theme();

    let area = f.area();
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Card grid
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, chunks[0], &theme);
    if app.gallery().is_empty() {
        draw_empty_state(f, chunks[1], &theme);
    } else {
        draw_meme_grid(f, app, chunks[1], &theme);
    }
    draw_status_bar(f, app, chunks[2], &theme);

    if app.gallery().overlay_open() {
        form::draw_form(f, app, &theme);
    }
}

/// Header: gallery title on the left, add-meme trigger hint on the right
fn draw_header(f: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" memewall ")
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let hint = "[a] Добавить мем ";
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(hint.width() as u16)])
        .split(inner);

    let title = Paragraph::new(Span::styled(
        " МЕМЫ",
        Style::default()
            .fg(theme.foreground)
            .add_modifier(Modifier::BOLD),
    ))
    .style(Style::default().bg(theme.background));
    f.render_widget(title, columns[0]);

    let trigger = Paragraph::new(Span::styled(hint, Style::default().fg(theme.accent)))
        .style(Style::default().bg(theme.background));
    f.render_widget(trigger, columns[1]);
}

/// Draw the card grid for the visible page
fn draw_meme_grid(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let memes = app.gallery().memes();
    let selected = app.selected_index();
    let grid = app.grid();
    let card_layout = app.card_layout();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dimmed_alt))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let card_height = card_layout.card_height();
    let visible_rows = (inner.height / card_height.max(1)).max(1);
    let visible_range = grid.visible_range(selected, memes.len(), visible_rows);
    let page_start = visible_range.start;

    let columns = grid.columns;
    let column_width = if columns > 1 {
        (inner.width.saturating_sub(COLUMN_GAP * (columns - 1))) / columns
    } else {
        inner.width
    };

    // Pass 1: cards
    let mut image_areas = Vec::new();
    for (local_idx, meme) in memes[visible_range].iter().enumerate() {
        let global_idx = page_start + local_idx;
        let (row, col) = grid.position(local_idx);

        let card_x = inner.x + col * (column_width + COLUMN_GAP);
        let card_y = inner.y + row * card_height;
        if card_y + card_height > inner.y + inner.height {
            continue;
        }
        let card_area = Rect {
            x: card_x,
            y: card_y,
            width: column_width,
            height: card_height,
        };

        let slot = app.image_slot(meme.id);
        let card = MemeCard::new(meme, theme)
            .selected(global_idx == selected)
            .layout(card_layout)
            .image_slot(slot);
        f.render_widget(card, card_area);

        if slot == ImageSlot::Ready {
            let image_area = Rect {
                x: card_x + 1,
                y: card_y,
                width: column_width.saturating_sub(2),
                height: card_layout.image_rows.min(card_height),
            };
            image_areas.push((meme.id, image_area));
        }
    }

    // Pass 2: graphics images, cache-only so drawing never blocks
    let Some(manager) = app.image_manager() else {
        return;
    };
    let mut to_render = Vec::new();
    {
        let mgr = manager.lock();
        for (id, image_area) in image_areas {
            if let Some(protocol) = mgr.get_cached(id) {
                to_render.push((image_area, protocol));
            }
        }
    } // Release lock before rendering

    for (image_area, protocol) in to_render {
        let image = StatefulImage::new(None).resize(Resize::Fit(None));
        let mut proto = protocol.lock();
        f.render_stateful_widget(image, image_area, &mut *proto);
    }
}

/// Placeholder shown when the collection has no memes at all
fn draw_empty_state(f: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            "Пока нет мемов",
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Добавьте первый мем, чтобы начать коллекцию",
            Style::default().fg(theme.dimmed),
        )),
    ];

    let message_area = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: lines.len() as u16,
    }
    .intersection(area);

    let message = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.background));
    f.render_widget(message, message_area);
}

/// Status bar with key hints for the current mode
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let total = app.gallery().len();

    let status = if app.gallery().overlay_open() {
        " Tab: следующее поле | Enter: добавить | Esc: закрыть".to_string()
    } else {
        let position = if total == 0 { 0 } else { app.selected_index() + 1 };
        format!(
            " {}/{} | a: добавить | ↑↓←→/hjkl: навигация | q: выход",
            position, total
        )
    };

    let status_bar =
        Paragraph::new(status).style(Style::default().fg(theme.dimmed).bg(theme.background));
    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gallery::Gallery;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_empty_state_message() {
        let app = App::new(Gallery::default(), Config::default(), None);
        let text = render(&app);

        assert!(text.contains("Пока нет мемов"));
        assert!(text.contains("Добавьте первый мем"));
        assert!(!text.contains("Классические мемы"));
    }

    #[test]
    fn test_seeded_grid_shows_cards() {
        let app = App::new(Gallery::seeded(), Config::default(), None);
        let text = render(&app);

        assert!(text.contains("МЕМЫ"));
        assert!(text.contains("Классические мемы"));
        assert!(text.contains("Дрейк указывает"));
        assert!(!text.contains("Пока нет мемов"));
        // No graphics in the test backend: cards fall back to text
        assert!(text.contains("нет изображения"));
    }

    #[test]
    fn test_overlay_renders_form() {
        let mut app = App::new(Gallery::seeded(), Config::default(), None);
        app.open_overlay();
        let text = render(&app);

        assert!(text.contains("Добавить новый мем"));
        assert!(text.contains("Название"));
        assert!(text.contains("URL изображения"));
        assert!(text.contains("[ Добавить ]"));
    }
}
