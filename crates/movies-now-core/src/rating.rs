use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating must be between 1 and {max}, got {value}")]
    OutOfRange { value: u8, max: u8 },
}

type RatingCallback = Box<dyn FnMut(u8) + Send>;

/// Interactive star rating input.
///
/// Holds only the picked value and the transient hover highlight; nothing is
/// persisted. A new widget starts from `default_rating` again.
pub struct StarRating {
    max_rating: u8,
    size: u16,
    rating: u8,
    hover: Option<u8>,
    messages: Vec<String>,
    on_set_rating: Option<RatingCallback>,
}

impl StarRating {
    pub fn new(max_rating: u8) -> Self {
        Self {
            max_rating: max_rating.max(1),
            size: 48,
            rating: 0,
            hover: None,
            messages: Vec::new(),
            on_set_rating: None,
        }
    }

    pub fn with_size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    pub fn with_default_rating(mut self, rating: u8) -> Self {
        self.rating = rating.min(self.max_rating);
        self
    }

    /// One label per star; ignored unless there are exactly `max_rating` of them.
    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }

    pub fn on_set_rating<F>(mut self, callback: F) -> Self
    where
        F: FnMut(u8) + Send + 'static,
    {
        self.on_set_rating = Some(Box::new(callback));
        self
    }

    pub fn max_rating(&self) -> u8 {
        self.max_rating
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    /// The picked rating, 0 while nothing has been picked.
    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }

    /// Pick a star. Emits the value to the registered callback.
    pub fn rate(&mut self, value: u8) -> Result<u8, RatingError> {
        if value == 0 || value > self.max_rating {
            return Err(RatingError::OutOfRange {
                value,
                max: self.max_rating,
            });
        }
        self.rating = value;
        self.hover = None;
        if let Some(callback) = self.on_set_rating.as_mut() {
            callback(value);
        }
        Ok(value)
    }

    pub fn hover_in(&mut self, value: u8) {
        if (1..=self.max_rating).contains(&value) {
            self.hover = Some(value);
        }
    }

    pub fn hover_out(&mut self) {
        self.hover = None;
    }

    /// What the stars show right now: the hover highlight wins over the pick.
    pub fn display_rating(&self) -> u8 {
        self.hover.unwrap_or(self.rating)
    }

    pub fn label(&self) -> String {
        let shown = self.display_rating();
        if shown == 0 {
            return String::new();
        }
        if self.messages.len() == usize::from(self.max_rating) {
            self.messages[usize::from(shown) - 1].clone()
        } else {
            shown.to_string()
        }
    }

    /// Filled and empty stars. Larger sizes space the stars out.
    pub fn render(&self) -> String {
        let shown = self.display_rating();
        let gap = " ".repeat(usize::from(self.size / 24));
        (1..=self.max_rating)
            .map(|star| if star <= shown { "★" } else { "☆" })
            .collect::<Vec<_>>()
            .join(&gap)
    }
}

impl std::fmt::Debug for StarRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarRating")
            .field("max_rating", &self.max_rating)
            .field("size", &self.size)
            .field("rating", &self.rating)
            .field("hover", &self.hover)
            .finish()
    }
}
