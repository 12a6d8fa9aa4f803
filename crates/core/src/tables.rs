//! Ordered key/label tables for closed catalog enumerations.
//!
//! A [`KeyTable`] serves two purposes: label lookup (language codes to
//! display names) and, for closed classification keys such as character
//! roles, the fixed group priority order.

/// Ordered `(key, label)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTable {
    entries: Vec<(String, String)>,
}

impl KeyTable {
    pub fn new<I, K, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, l)| (k.into(), l.into()))
                .collect(),
        }
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, l)| l.as_str())
    }

    /// Label for `key`, falling back to the key itself.
    pub fn label_or_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.label(key).unwrap_or(key)
    }

    /// Priority of `key`: its position in the table.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Character roles, most prominent first.
    pub fn character_roles() -> Self {
        Self::new([
            ("main", "Protagonist"),
            ("primary", "Main Character"),
            ("side", "Side Character"),
            ("appears", "Appears"),
        ])
    }

    /// Staff roles in credit order.
    pub fn staff_roles() -> Self {
        Self::new([
            ("scenario", "Scenario"),
            ("director", "Director"),
            ("chardesign", "Character design"),
            ("art", "Artist"),
            ("music", "Composer"),
            ("songs", "Vocals"),
            ("translator", "Translator"),
            ("editor", "Editor"),
            ("qa", "Quality assurance"),
            ("staff", "Staff"),
        ])
    }

    /// Title length buckets keyed by the catalog's `1..=5` code.
    pub fn lengths() -> Self {
        Self::new([
            ("1", "Very Short"),
            ("2", "Short"),
            ("3", "Medium"),
            ("4", "Long"),
            ("5", "Very Long"),
        ])
    }

    /// Language codes to English display names.
    pub fn languages() -> Self {
        Self::new([
            ("ar", "Arabic"),
            ("eu", "Basque"),
            ("be", "Belarusian"),
            ("bg", "Bulgarian"),
            ("ca", "Catalan"),
            ("ck", "Cherokee"),
            ("zh", "Chinese"),
            ("zh-Hans", "Chinese (simplified)"),
            ("zh-Hant", "Chinese (traditional)"),
            ("hr", "Croatian"),
            ("cs", "Czech"),
            ("da", "Danish"),
            ("nl", "Dutch"),
            ("en", "English"),
            ("eo", "Esperanto"),
            ("fi", "Finnish"),
            ("fr", "French"),
            ("gl", "Galician"),
            ("de", "German"),
            ("el", "Greek"),
            ("he", "Hebrew"),
            ("hi", "Hindi"),
            ("hu", "Hungarian"),
            ("ga", "Irish"),
            ("id", "Indonesian"),
            ("it", "Italian"),
            ("iu", "Inuktitut"),
            ("ja", "Japanese"),
            ("kk", "Kazakh"),
            ("ko", "Korean"),
            ("la", "Latin"),
            ("lv", "Latvian"),
            ("lt", "Lithuanian"),
            ("mk", "Macedonian"),
            ("ms", "Malay"),
            ("ne", "Nepali"),
            ("no", "Norwegian"),
            ("fa", "Persian"),
            ("pl", "Polish"),
            ("pt-br", "Portuguese (Brazil)"),
            ("pt-pt", "Portuguese (Portugal)"),
            ("ro", "Romanian"),
            ("ru", "Russian"),
            ("gd", "Scottish Gaelic"),
            ("sr", "Serbian"),
            ("sk", "Slovak"),
            ("sl", "Slovene"),
            ("es", "Spanish"),
            ("sv", "Swedish"),
            ("ta", "Tagalog"),
            ("th", "Thai"),
            ("tr", "Turkish"),
            ("uk", "Ukrainian"),
            ("ur", "Urdu"),
            ("vi", "Vietnamese"),
            ("other", "Other"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_priority_follows_table_order() {
        let roles = KeyTable::character_roles();
        assert_eq!(roles.position("main"), Some(0));
        assert_eq!(roles.position("appears"), Some(3));
        assert_eq!(roles.position("cameo"), None);
    }

    #[test]
    fn label_falls_back_to_key() {
        let langs = KeyTable::languages();
        assert_eq!(langs.label_or_key("ja"), "Japanese");
        assert_eq!(langs.label_or_key("xx"), "xx");
    }

    #[test]
    fn custom_table_keeps_insertion_order() {
        let t = KeyTable::new([("b", "Bee"), ("a", "Ay")]);
        assert_eq!(t.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(t.len(), 2);
    }
}
