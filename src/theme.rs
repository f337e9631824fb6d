use eframe::egui;

/// Storage key for the light/dark preference.
pub const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Read a stored preference. Only `"dark"` selects the dark theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            Some("light") | None => Theme::Light,
            Some(other) => {
                log::warn!("Ignoring stored theme {other:?}");
                Theme::Light
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Button face: the theme a click switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀",
            Theme::Light => "🌙",
        }
    }

    /// Write the preference and flush it right away.
    pub fn persist(self, storage: &mut dyn eframe::Storage) {
        storage.set_string(STORAGE_KEY, self.as_str().to_string());
        storage.flush();
    }

    /// Apply to the egui context.
    pub fn apply(self, ctx: &egui::Context) {
        ctx.set_theme(match self {
            Theme::Light => egui::Theme::Light,
            Theme::Dark => egui::Theme::Dark,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::Storage;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        values: HashMap<String, String>,
        flushes: usize,
    }

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.values.insert(key.to_string(), value);
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    #[test]
    fn only_dark_selects_dark() {
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("DARK")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn toggle_flips_and_stores() {
        let t = Theme::Light.toggled();
        assert_eq!(t, Theme::Dark);
        assert_eq!(t.as_str(), "dark");
        assert_eq!(t.toggle_icon(), "☀");
        assert_eq!(t.toggled().toggle_icon(), "🌙");
        assert_eq!(Theme::from_stored(Some(t.as_str())), t);
    }

    #[test]
    fn persist_writes_and_flushes_each_toggle() {
        let mut storage = MemoryStorage::default();
        let mut theme = Theme::Light;

        theme = theme.toggled();
        theme.persist(&mut storage);
        assert_eq!(storage.get_string(STORAGE_KEY).as_deref(), Some("dark"));
        assert_eq!(storage.flushes, 1);

        theme = theme.toggled();
        theme.persist(&mut storage);
        assert_eq!(storage.get_string(STORAGE_KEY).as_deref(), Some("light"));
        assert_eq!(storage.flushes, 2);

        let restored = Theme::from_stored(storage.get_string(STORAGE_KEY).as_deref());
        assert_eq!(restored, Theme::Light);
    }
}
