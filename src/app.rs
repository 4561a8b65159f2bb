use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::gallery::Gallery;
use crate::images::{spawn_fetch, DecodeResult, ImageManager};
use crate::meme::DraftField;
use crate::ui::layout::GridLayout;
use crate::ui::meme_card::{CardLayout, ImageSlot};

/// Application state: the gallery plus everything the event loop needs
/// around it - grid selection, form focus, and the image pipeline ends.
///
/// All collection mutation still goes through `Gallery` methods; nothing
/// here touches records directly.
pub struct App {
    gallery: Gallery,
    config: Config,
    grid: GridLayout,
    /// Selected card index into the collection
    selected: usize,
    /// Focused field while the add form is open
    focus: DraftField,
    /// Shared with the draw pass; None when images are disabled
    images: Option<Arc<Mutex<ImageManager>>>,
    decoded_tx: mpsc::UnboundedSender<DecodeResult>,
    decoded_rx: mpsc::UnboundedReceiver<DecodeResult>,
}

impl App {
    pub fn new(gallery: Gallery, config: Config, images: Option<Arc<Mutex<ImageManager>>>) -> Self {
        let (decoded_tx, decoded_rx) = mpsc::unbounded_channel();
        let grid = GridLayout::new(config.appearance.columns);

        Self {
            gallery,
            config,
            grid,
            selected: 0,
            focus: DraftField::Title,
            images,
            decoded_tx,
            decoded_rx,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> GridLayout {
        self.grid
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn focus(&self) -> DraftField {
        self.focus
    }

    pub fn image_manager(&self) -> Option<&Arc<Mutex<ImageManager>>> {
        self.images.as_ref()
    }

    /// Card shape derived from config
    pub fn card_layout(&self) -> CardLayout {
        CardLayout {
            image_rows: self.config.images.rows,
            show_description: self.config.behavior.show_descriptions,
            show_actions: self.config.behavior.show_card_actions,
        }
    }

    /// What the image area of one card shows this frame
    pub fn image_slot(&self, meme_id: u64) -> ImageSlot {
        match self.images {
            Some(ref mgr) => mgr.lock().slot(meme_id),
            None => ImageSlot::Unavailable,
        }
    }

    /// Spawn fetches for every meme that still needs one.
    /// Called at startup and after each commit.
    pub fn request_images(&mut self) {
        let Some(ref mgr) = self.images else {
            return;
        };

        let mut mgr = mgr.lock();
        for meme in self.gallery.memes() {
            if mgr.needs_fetch(meme.id) {
                mgr.mark_pending(meme.id);
                spawn_fetch(meme.id, meme.image_url.clone(), self.decoded_tx.clone());
            }
        }
    }

    /// Drain finished fetches into the protocol cache
    pub fn poll_images(&mut self) {
        while let Ok((id, result)) = self.decoded_rx.try_recv() {
            if let Some(ref mgr) = self.images {
                mgr.lock().complete(id, result);
            }
        }
    }

    // --- grid navigation ---

    pub fn select_up(&mut self) {
        self.selected = self.grid.move_up(self.selected);
    }

    pub fn select_down(&mut self) {
        self.selected = self.grid.move_down(self.selected, self.gallery.len());
    }

    pub fn select_left(&mut self) {
        self.selected = self.grid.move_left(self.selected);
    }

    pub fn select_right(&mut self) {
        self.selected = self.grid.move_right(self.selected, self.gallery.len());
    }

    pub fn select_home(&mut self) {
        self.selected = self.grid.move_home();
    }

    pub fn select_end(&mut self) {
        self.selected = self.grid.move_end(self.gallery.len());
    }

    // --- add-form flow ---

    pub fn overlay_open(&self) -> bool {
        self.gallery.overlay_open()
    }

    /// Open the add form. The draft keeps whatever was typed last time;
    /// only focus resets to the first field.
    pub fn open_overlay(&mut self) {
        self.focus = DraftField::Title;
        self.gallery.set_overlay_open(true);
    }

    /// Close the add form without committing. Draft contents survive.
    pub fn close_overlay(&mut self) {
        self.gallery.set_overlay_open(false);
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn push_draft_char(&mut self, c: char) {
        self.gallery.push_draft_char(self.focus, c);
    }

    pub fn pop_draft_char(&mut self) {
        self.gallery.pop_draft_char(self.focus);
    }

    /// Try to commit the draft. Invalid drafts are a silent no-op (the
    /// submit row is already rendered disabled); a successful commit
    /// closes the form and kicks off the image fetch for the new card.
    pub fn submit_draft(&mut self) {
        if self.gallery.commit_draft() {
            self.request_images();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Gallery::seeded(), Config::default(), None)
    }

    #[test]
    fn test_selection_moves() {
        let mut app = app(); // 4 memes, 3 columns: [0 1 2] [3]

        app.select_right();
        app.select_right();
        assert_eq!(app.selected_index(), 2);
        app.select_right();
        assert_eq!(app.selected_index(), 3);
        app.select_right();
        assert_eq!(app.selected_index(), 3); // last card

        app.select_up();
        assert_eq!(app.selected_index(), 0);
        app.select_down();
        assert_eq!(app.selected_index(), 3);

        app.select_home();
        assert_eq!(app.selected_index(), 0);
        app.select_end();
        assert_eq!(app.selected_index(), 3);
    }

    #[test]
    fn test_open_overlay_resets_focus_not_draft() {
        let mut app = app();

        app.open_overlay();
        app.focus_next();
        app.push_draft_char('x');
        app.close_overlay();

        app.open_overlay();
        assert_eq!(app.focus(), DraftField::Title);
        assert_eq!(app.gallery().draft().image_url, "x");
    }

    #[test]
    fn test_focus_cycle() {
        let mut app = app();
        app.open_overlay();

        app.focus_next();
        assert_eq!(app.focus(), DraftField::ImageUrl);
        app.focus_prev();
        assert_eq!(app.focus(), DraftField::Title);
        app.focus_prev();
        assert_eq!(app.focus(), DraftField::Description);
    }

    #[test]
    fn test_submit_draft() {
        let mut app = app();
        app.open_overlay();

        // Invalid draft: nothing happens
        app.submit_draft();
        assert_eq!(app.gallery().len(), 4);
        assert!(app.overlay_open());

        for c in "ok".chars() {
            app.push_draft_char(c);
        }
        app.focus_next();
        for c in "http://x/y.jpg".chars() {
            app.push_draft_char(c);
        }
        app.submit_draft();

        assert_eq!(app.gallery().len(), 5);
        assert!(!app.overlay_open());
        assert_eq!(app.gallery().memes()[4].title, "ok");
    }

    #[test]
    fn test_image_slot_without_images() {
        let app = app();
        assert_eq!(app.image_slot(1), ImageSlot::Unavailable);
    }
}
