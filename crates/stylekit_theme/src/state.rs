//! Theme preference state
//!
//! The explicit choice is mirrored in memory so the page keeps honouring it
//! for the rest of the session when storage refuses reads or writes.

use stylekit_platform::Storage;

use crate::scheme::ColorScheme;

/// Where the applied scheme came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeSource {
    /// Persisted (or in-session) user choice
    Explicit,
    /// OS color-scheme preference
    System,
}

/// Resolved theme preference
#[derive(Clone, Debug)]
pub struct ThemeState {
    storage_key: String,
    explicit: Option<ColorScheme>,
    system: ColorScheme,
}

impl ThemeState {
    /// Resolve the initial scheme from storage, falling back to the OS preference
    pub fn load(storage: &dyn Storage, storage_key: &str, system_dark: bool) -> Self {
        let explicit = read_explicit(storage, storage_key).unwrap_or(None);
        let state = Self {
            storage_key: storage_key.to_string(),
            explicit,
            system: ColorScheme::from_dark(system_dark),
        };
        tracing::debug!(
            scheme = %state.scheme(),
            source = ?state.source(),
            "resolved initial theme"
        );
        state
    }

    /// The scheme that should be applied to the page
    pub fn scheme(&self) -> ColorScheme {
        self.explicit.unwrap_or(self.system)
    }

    pub fn source(&self) -> ThemeSource {
        if self.explicit.is_some() {
            ThemeSource::Explicit
        } else {
            ThemeSource::System
        }
    }

    pub fn explicit(&self) -> Option<ColorScheme> {
        self.explicit
    }

    pub fn system(&self) -> ColorScheme {
        self.system
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Record a user choice; it overrides the OS preference from now on
    pub fn set_explicit(&mut self, storage: &mut dyn Storage, scheme: ColorScheme) -> ColorScheme {
        self.explicit = Some(scheme);
        if let Err(err) = storage.set_item(&self.storage_key, scheme.as_str()) {
            tracing::warn!(%err, "theme choice kept for this session only");
        }
        scheme
    }

    /// Forget the user choice and follow the OS preference again
    pub fn clear_explicit(&mut self, storage: &mut dyn Storage) -> ColorScheme {
        self.explicit = None;
        if let Err(err) = storage.remove_item(&self.storage_key) {
            tracing::warn!(%err, "could not clear persisted theme choice");
        }
        self.scheme()
    }

    /// OS preference changed; returns the scheme to apply when it changed the page
    ///
    /// Storage is re-read so a key cleared elsewhere hands control back to the
    /// OS. When storage cannot be read the in-memory choice stands.
    pub fn system_changed(&mut self, storage: &dyn Storage, dark: bool) -> Option<ColorScheme> {
        let before = self.scheme();
        self.system = ColorScheme::from_dark(dark);
        if let Some(stored) = read_explicit(storage, &self.storage_key) {
            self.explicit = stored;
        }
        let after = self.scheme();
        (after != before).then_some(after)
    }
}

/// `Some(choice)` when storage answered, `None` when it failed
fn read_explicit(storage: &dyn Storage, key: &str) -> Option<Option<ColorScheme>> {
    match storage.get_item(key) {
        Ok(Some(value)) => {
            let parsed = ColorScheme::parse(&value);
            if parsed.is_none() {
                tracing::debug!(value = %value, "ignoring unrecognised stored theme");
            }
            Some(parsed)
        }
        Ok(None) => Some(None),
        Err(err) => {
            tracing::debug!(%err, "theme storage unreadable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylekit_platform::MemoryStorage;

    #[test]
    fn test_stored_choice_wins_over_system() {
        let mut storage = MemoryStorage::new();
        storage.set_item("theme", "light").unwrap();

        let state = ThemeState::load(&storage, "theme", true);
        assert_eq!(state.scheme(), ColorScheme::Light);
        assert_eq!(state.source(), ThemeSource::Explicit);
    }

    #[test]
    fn test_garbage_value_falls_back_to_system() {
        let mut storage = MemoryStorage::new();
        storage.set_item("theme", "purple").unwrap();

        let state = ThemeState::load(&storage, "theme", true);
        assert_eq!(state.scheme(), ColorScheme::Dark);
        assert_eq!(state.source(), ThemeSource::System);
    }

    #[test]
    fn test_system_change_reports_only_real_changes() {
        let storage = MemoryStorage::new();
        let mut state = ThemeState::load(&storage, "theme", false);

        assert_eq!(state.system_changed(&storage, false), None);
        assert_eq!(state.system_changed(&storage, true), Some(ColorScheme::Dark));
    }

    #[test]
    fn test_cleared_key_returns_control_to_system() {
        let mut storage = MemoryStorage::new();
        let mut state = ThemeState::load(&storage, "theme", false);
        state.set_explicit(&mut storage, ColorScheme::Dark);

        storage.remove_item("theme").unwrap();
        assert_eq!(state.system_changed(&storage, false), Some(ColorScheme::Light));
        assert_eq!(state.source(), ThemeSource::System);
    }

    #[test]
    fn test_clear_explicit() {
        let mut storage = MemoryStorage::new();
        let mut state = ThemeState::load(&storage, "theme", true);
        state.set_explicit(&mut storage, ColorScheme::Light);

        assert_eq!(state.clear_explicit(&mut storage), ColorScheme::Dark);
        assert_eq!(storage.peek("theme"), None);
    }
}
