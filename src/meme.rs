//! Internal meme record model.
//!
//! A `Meme` is one gallery card: a title, an image reference, and an
//! optional description. Records only ever enter the gallery through the
//! seed set below or through a committed draft - there is no on-disk
//! format and nothing to parse.

/// One meme entry in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meme {
    /// Unique within the session, assigned by the gallery
    pub id: u64,
    /// Display title, non-empty once committed
    pub title: String,
    /// Relative path or absolute URL, treated opaquely by the gallery
    pub image_url: String,
    /// Shown below the title when present
    pub description: Option<String>,
}

/// Staging area for the add-meme form.
///
/// All fields start empty and are reset only by a successful commit.
/// Closing the form keeps whatever was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub image_url: String,
    pub description: String,
}

/// Selects one editable field of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    ImageUrl,
    Description,
}

impl DraftField {
    /// Next field in form order, wrapping after the last
    pub fn next(self) -> Self {
        match self {
            DraftField::Title => DraftField::ImageUrl,
            DraftField::ImageUrl => DraftField::Description,
            DraftField::Description => DraftField::Title,
        }
    }

    /// Previous field in form order, wrapping before the first
    pub fn prev(self) -> Self {
        match self {
            DraftField::Title => DraftField::Description,
            DraftField::ImageUrl => DraftField::Title,
            DraftField::Description => DraftField::ImageUrl,
        }
    }

    /// Form label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            DraftField::Title => "Название",
            DraftField::ImageUrl => "URL изображения",
            DraftField::Description => "Описание",
        }
    }

    /// Dimmed hint shown while the input is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            DraftField::Title => "Введите название мема",
            DraftField::ImageUrl => "https://example.com/image.jpg",
            DraftField::Description => "Краткое описание мема",
        }
    }
}

/// The fixed records every session starts with.
///
/// One relative asset path, three external URLs. Ids 1-4 are reserved
/// for these; committed memes are numbered after them.
pub fn seed_memes() -> Vec<Meme> {
    vec![
        Meme {
            id: 1,
            title: "Классические мемы".to_string(),
            image_url: "assets/classic-memes.jpg".to_string(),
            description: Some("Коллекция популярных интернет-мемов".to_string()),
        },
        Meme {
            id: 2,
            title: "Дрейк указывает".to_string(),
            image_url: "https://i.imgflip.com/30b1gx.jpg".to_string(),
            description: Some("Мем с Дрейком для сравнений".to_string()),
        },
        Meme {
            id: 3,
            title: "Отвлеченный парень".to_string(),
            image_url: "https://i.imgflip.com/1ur9b0.jpg".to_string(),
            description: Some("Мем про выбор и соблазн".to_string()),
        },
        Meme {
            id: 4,
            title: "Удивленный Пикачу".to_string(),
            image_url: "https://i.imgflip.com/2kbn1e.jpg".to_string(),
            description: Some("Классика для выражения удивления".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_set() {
        let memes = seed_memes();
        assert_eq!(memes.len(), 4);

        // Fixed order
        assert_eq!(memes[0].title, "Классические мемы");
        assert_eq!(memes[3].title, "Удивленный Пикачу");

        // One local path, three URLs
        assert!(!memes[0].image_url.starts_with("http"));
        for meme in &memes[1..] {
            assert!(meme.image_url.starts_with("https://"));
        }
    }

    #[test]
    fn test_seed_ids_unique() {
        let memes = seed_memes();
        for (i, a) in memes.iter().enumerate() {
            for b in &memes[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_field_cycle() {
        let mut field = DraftField::Title;
        field = field.next();
        assert_eq!(field, DraftField::ImageUrl);
        field = field.next();
        assert_eq!(field, DraftField::Description);
        field = field.next();
        assert_eq!(field, DraftField::Title);

        assert_eq!(DraftField::Title.prev(), DraftField::Description);
        assert_eq!(DraftField::Description.prev(), DraftField::ImageUrl);
    }
}
