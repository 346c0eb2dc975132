use std::sync::{Arc, Mutex, PoisonError};

pub const DEFAULT_TITLE: &str = "Movies Now";

/// Somewhere the "current document title" can be shown: a terminal window
/// title, a test buffer, ...
pub trait DocumentTitle: Send + Sync {
    fn set_title(&self, title: &str);
}

/// Holds the document title while a movie is open and restores the default
/// title when dropped.
pub struct TitleGuard {
    sink: Arc<dyn DocumentTitle>,
}

impl TitleGuard {
    pub fn acquire(sink: Arc<dyn DocumentTitle>, movie_title: &str) -> Self {
        sink.set_title(&format!("Movie | {}", movie_title));
        Self { sink }
    }
}

impl Drop for TitleGuard {
    fn drop(&mut self) {
        self.sink.set_title(DEFAULT_TITLE);
    }
}

/// In-memory title, readable back. Useful for headless front ends.
#[derive(Clone)]
pub struct MemoryTitle {
    current: Arc<Mutex<String>>,
}

impl MemoryTitle {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(DEFAULT_TITLE.to_string())),
        }
    }

    pub fn current(&self) -> String {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Default for MemoryTitle {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTitle for MemoryTitle {
    fn set_title(&self, title: &str) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = title.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_sets_and_restores_title() {
        let title = MemoryTitle::new();
        {
            let _guard = TitleGuard::acquire(Arc::new(title.clone()), "Avengers");
            assert_eq!(title.current(), "Movie | Avengers");
        }
        assert_eq!(title.current(), DEFAULT_TITLE);
    }

    #[test]
    fn test_release_then_reacquire() {
        let title = MemoryTitle::new();
        let sink: Arc<dyn DocumentTitle> = Arc::new(title.clone());

        let mut slot = Some(TitleGuard::acquire(sink.clone(), "Avengers"));
        drop(slot.take());
        slot = Some(TitleGuard::acquire(sink, "Batman"));
        assert_eq!(title.current(), "Movie | Batman");

        drop(slot);
        assert_eq!(title.current(), DEFAULT_TITLE);
    }
}
