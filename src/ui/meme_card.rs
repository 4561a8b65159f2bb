//! Meme card widget.
//!
//! Renders one gallery entry as a multi-line card:
//! - Image area (graphics protocol draws over it in a second pass)
//! - Title (bold)
//! - Description (dimmed, optional)
//! - Like/share footer (cosmetic - nothing is wired to it)

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::meme::Meme;

/// What the card's image area should show this frame.
///
/// `Ready` leaves the area blank for the graphics pass; the other two
/// render a text placeholder inside the card itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    /// A decoded image will be drawn over the area
    Ready,
    /// Fetch/decode still in flight
    Loading,
    /// Load failed, or the terminal has no graphics support
    Unavailable,
}

/// Card shape configuration
#[derive(Debug, Clone, Copy)]
pub struct CardLayout {
    /// Rows reserved for the image area
    pub image_rows: u16,
    /// Reserve a description line
    pub show_description: bool,
    /// Show the like/share footer
    pub show_actions: bool,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            image_rows: 8,
            show_description: true,
            show_actions: true,
        }
    }
}

impl CardLayout {
    /// Total card height in lines
    pub fn card_height(&self) -> u16 {
        let mut height = self.image_rows + 1; // image + title
        if self.show_description {
            height += 1;
        }
        if self.show_actions {
            height += 1;
        }
        height
    }
}

/// Meme card widget
pub struct MemeCard<'a> {
    meme: &'a Meme,
    theme: &'a Theme,
    layout: CardLayout,
    image_slot: ImageSlot,
    selected: bool,
}

impl<'a> MemeCard<'a> {
    pub fn new(meme: &'a Meme, theme: &'a Theme) -> Self {
        Self {
            meme,
            theme,
            layout: CardLayout::default(),
            image_slot: ImageSlot::Unavailable,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn layout(mut self, layout: CardLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn image_slot(mut self, slot: ImageSlot) -> Self {
        self.image_slot = slot;
        self
    }
}

impl Widget for MemeCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bg = if self.selected {
            self.theme.selection_bg
        } else {
            self.theme.background
        };
        let fg = if self.selected {
            self.theme.selection_fg
        } else {
            self.theme.foreground
        };

        // Fill background
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(bg);
                }
            }
        }

        let padding_x = 1u16;
        let inner_width = area.width.saturating_sub(padding_x * 2);
        if inner_width == 0 {
            return;
        }
        let inner_x = area.x + padding_x;
        let max_y = area.y + area.height;

        // Image area: placeholder text unless the graphics pass will
        // paint over it
        let image_rows = self.layout.image_rows.min(area.height);
        let caption = match self.image_slot {
            ImageSlot::Ready => None,
            ImageSlot::Loading => Some(("загрузка…", self.theme.dimmed)),
            ImageSlot::Unavailable => Some(("нет изображения", self.theme.dimmed_alt)),
        };
        if let Some((text, color)) = caption {
            let text = truncate(text, inner_width as usize);
            let text_width = text.width() as u16;
            let caption_x = inner_x + inner_width.saturating_sub(text_width) / 2;
            let caption_y = area.y + image_rows / 2;
            if caption_y < max_y {
                buf.set_string(caption_x, caption_y, text, Style::default().fg(color).bg(bg));
            }
        }

        let mut y = area.y + image_rows;

        // Title (bold) - always rendered
        if y < max_y {
            let style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
            buf.set_string(
                inner_x,
                y,
                truncate(&self.meme.title, inner_width as usize),
                style,
            );
            y += 1;
        }

        // Description line reserved even when the meme has none, so
        // cards in a row stay aligned
        if self.layout.show_description && y < max_y {
            if let Some(ref description) = self.meme.description {
                let style = Style::default().fg(self.theme.dimmed).bg(bg);
                buf.set_string(
                    inner_x,
                    y,
                    truncate(description, inner_width as usize),
                    style,
                );
            }
            y += 1;
        }

        // Inert like/share footer
        if self.layout.show_actions && y < max_y {
            let style = Style::default().fg(self.theme.dimmed_alt).bg(bg);
            buf.set_string(
                inner_x,
                y,
                truncate("♡ Нравится   ⤴ Поделиться", inner_width as usize),
                style,
            );
        }
    }
}

/// Truncate string to fit within max_width columns, adding an ellipsis
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }

    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            result.push('…');
            break;
        }
        result.push(c);
        used += w;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("hello", 1), "…");
    }

    #[test]
    fn test_truncate_cyrillic() {
        // Cyrillic is single-width; counts must use columns, not bytes
        assert_eq!(truncate("мемы", 10), "мемы");
        assert_eq!(truncate("мемы навсегда", 6), "мемы …");
    }

    #[test]
    fn test_card_height() {
        let layout = CardLayout::default();
        assert_eq!(layout.card_height(), 11); // 8 image + title + desc + footer

        let layout = CardLayout {
            image_rows: 4,
            show_description: false,
            show_actions: false,
        };
        assert_eq!(layout.card_height(), 5);
    }
}
