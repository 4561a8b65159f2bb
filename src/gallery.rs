//! Gallery state - the single owner of the meme collection.
//!
//! All mutation goes through the named methods here; the UI layer only
//! reads. The collection is append-only: there is no edit or delete.

use crate::meme::{seed_memes, Draft, DraftField, Meme};

/// Owns the meme collection, the add-form draft, and the overlay flag.
pub struct Gallery {
    /// All memes, in insertion order
    memes: Vec<Meme>,
    /// Staged record for the add form
    draft: Draft,
    /// Whether the add-form overlay is shown
    overlay_open: bool,
    /// Next id to hand out on commit
    next_id: u64,
}

impl Default for Gallery {
    /// An empty gallery. Only the seeded form is reachable in the app;
    /// this exists for the empty-state render path.
    fn default() -> Self {
        Self {
            memes: Vec::new(),
            draft: Draft::default(),
            overlay_open: false,
            next_id: 1,
        }
    }
}

impl Gallery {
    /// Gallery pre-populated with the fixed seed set.
    pub fn seeded() -> Self {
        let memes = seed_memes();
        let next_id = memes.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self {
            memes,
            draft: Draft::default(),
            overlay_open: false,
            next_id,
        }
    }

    /// All memes in insertion order
    pub fn memes(&self) -> &[Meme] {
        &self.memes
    }

    pub fn len(&self) -> usize {
        self.memes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memes.is_empty()
    }

    /// Current draft contents
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replace one draft field wholesale. Empty values are allowed;
    /// validation happens only at commit time.
    pub fn update_draft_field(&mut self, field: DraftField, value: String) {
        *self.draft_field_mut(field) = value;
    }

    /// Append one character to a draft field (keyboard editing path)
    pub fn push_draft_char(&mut self, field: DraftField, c: char) {
        let mut value = self.draft_field(field).to_string();
        value.push(c);
        self.update_draft_field(field, value);
    }

    /// Remove the last character from a draft field
    pub fn pop_draft_char(&mut self, field: DraftField) {
        let mut value = self.draft_field(field).to_string();
        value.pop();
        self.update_draft_field(field, value);
    }

    /// Read one draft field
    pub fn draft_field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.draft.title,
            DraftField::ImageUrl => &self.draft.image_url,
            DraftField::Description => &self.draft.description,
        }
    }

    fn draft_field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.draft.title,
            DraftField::ImageUrl => &mut self.draft.image_url,
            DraftField::Description => &mut self.draft.description,
        }
    }

    /// Whether the draft would pass commit validation.
    /// Title and image URL must be non-empty; description never matters.
    pub fn can_commit(&self) -> bool {
        !self.draft.title.is_empty() && !self.draft.image_url.is_empty()
    }

    /// Validate and append the draft to the collection.
    ///
    /// On success the new meme gets a fresh id, the draft resets to empty
    /// and the overlay closes; returns true. An invalid draft is a silent
    /// no-op returning false - nothing changes and no error is surfaced.
    pub fn commit_draft(&mut self) -> bool {
        if !self.can_commit() {
            tracing::debug!("Commit rejected: required field empty");
            return false;
        }

        let draft = std::mem::take(&mut self.draft);
        let meme = Meme {
            id: self.fresh_id(),
            title: draft.title,
            image_url: draft.image_url,
            // Empty description means "none" - cards skip the line entirely
            description: (!draft.description.is_empty()).then_some(draft.description),
        };

        tracing::info!("Added meme #{}: {}", meme.id, meme.title);
        self.memes.push(meme);
        self.overlay_open = false;
        true
    }

    /// Show or hide the add-form overlay. Independent of draft contents:
    /// closing the form keeps whatever was typed.
    pub fn set_overlay_open(&mut self, open: bool) {
        self.overlay_open = open;
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    /// Monotonic per-session id. Seeded past the fixed records, so two
    /// commits can never collide no matter how fast they happen.
    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft(gallery: &mut Gallery) {
        gallery.update_draft_field(DraftField::Title, "A".to_string());
        gallery.update_draft_field(DraftField::ImageUrl, "http://x/y.jpg".to_string());
    }

    #[test]
    fn test_seeded_has_four_memes() {
        let gallery = Gallery::seeded();
        assert_eq!(gallery.len(), 4);
        assert_eq!(gallery.memes()[0].title, "Классические мемы");
        assert_eq!(gallery.memes()[1].title, "Дрейк указывает");
        assert_eq!(gallery.memes()[2].title, "Отвлеченный парень");
        assert_eq!(gallery.memes()[3].title, "Удивленный Пикачу");
    }

    #[test]
    fn test_commit_appends_and_resets() {
        let mut gallery = Gallery::seeded();
        valid_draft(&mut gallery);
        gallery.update_draft_field(DraftField::Description, "desc".to_string());
        gallery.set_overlay_open(true);

        assert!(gallery.commit_draft());
        assert_eq!(gallery.len(), 5);

        let added = gallery.memes().last().unwrap();
        assert_eq!(added.title, "A");
        assert_eq!(added.image_url, "http://x/y.jpg");
        assert_eq!(added.description.as_deref(), Some("desc"));

        // Draft resets and overlay closes
        assert_eq!(gallery.draft(), &Draft::default());
        assert!(!gallery.overlay_open());
    }

    #[test]
    fn test_commit_rejected_without_title() {
        let mut gallery = Gallery::seeded();
        gallery.update_draft_field(DraftField::ImageUrl, "http://x/y.jpg".to_string());

        assert!(!gallery.commit_draft());
        assert_eq!(gallery.len(), 4);
        // Rejection leaves the draft untouched
        assert_eq!(gallery.draft().image_url, "http://x/y.jpg");
    }

    #[test]
    fn test_commit_rejected_without_image_url() {
        let mut gallery = Gallery::seeded();
        gallery.update_draft_field(DraftField::Title, "A".to_string());
        gallery.update_draft_field(DraftField::ImageUrl, String::new());

        assert!(!gallery.commit_draft());
        assert_eq!(gallery.len(), 4);
    }

    #[test]
    fn test_description_never_required() {
        let mut gallery = Gallery::seeded();
        valid_draft(&mut gallery);

        assert!(gallery.commit_draft());
        // Empty description commits as None
        assert_eq!(gallery.memes().last().unwrap().description, None);
    }

    #[test]
    fn test_committed_ids_are_unique() {
        let mut gallery = Gallery::seeded();
        valid_draft(&mut gallery);
        assert!(gallery.commit_draft());
        valid_draft(&mut gallery);
        assert!(gallery.commit_draft());

        let memes = gallery.memes();
        let a = memes[memes.len() - 2].id;
        let b = memes[memes.len() - 1].id;
        assert_ne!(a, b);

        // Also distinct from every seed id
        for seed in &memes[..4] {
            assert_ne!(seed.id, a);
            assert_ne!(seed.id, b);
        }
    }

    #[test]
    fn test_field_update_idempotent() {
        let mut a = Gallery::seeded();
        let mut b = Gallery::seeded();

        a.update_draft_field(DraftField::Title, "X".to_string());
        b.update_draft_field(DraftField::Title, "X".to_string());
        b.update_draft_field(DraftField::Title, "X".to_string());

        assert_eq!(a.draft(), b.draft());
    }

    #[test]
    fn test_char_editing_matches_whole_value_update() {
        let mut a = Gallery::seeded();
        let mut b = Gallery::seeded();

        a.push_draft_char(DraftField::Title, 'h');
        a.push_draft_char(DraftField::Title, 'i');
        a.push_draft_char(DraftField::Title, '!');
        a.pop_draft_char(DraftField::Title);
        b.update_draft_field(DraftField::Title, "hi".to_string());

        assert_eq!(a.draft(), b.draft());
    }

    #[test]
    fn test_overlay_close_preserves_draft() {
        let mut gallery = Gallery::seeded();
        gallery.set_overlay_open(true);
        gallery.push_draft_char(DraftField::Title, 'x');
        gallery.set_overlay_open(false);

        assert_eq!(gallery.draft().title, "x");
    }

    #[test]
    fn test_pop_on_empty_field_is_noop() {
        let mut gallery = Gallery::seeded();
        gallery.pop_draft_char(DraftField::Title);
        assert_eq!(gallery.draft(), &Draft::default());
    }

    #[test]
    fn test_empty_gallery() {
        let gallery = Gallery::default();
        assert!(gallery.is_empty());
        assert_eq!(gallery.len(), 0);
    }
}
