//! Minimal selector support
//!
//! Widgets only ever address elements by `#id`, `.class` or tag name.

/// A parsed simple selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    /// Parse `#id`, `.class` or `tag`; anything else is rejected
    pub fn parse(input: &str) -> Option<Selector> {
        let input = input.trim();
        let valid = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        };
        if let Some(id) = input.strip_prefix('#') {
            valid(id).then(|| Selector::Id(id.to_string()))
        } else if let Some(class) = input.strip_prefix('.') {
            valid(class).then(|| Selector::Class(class.to_string()))
        } else {
            valid(input).then(|| Selector::Tag(input.to_ascii_lowercase()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Selector::parse("#colors"), Some(Selector::Id("colors".into())));
        assert_eq!(
            Selector::parse(".btn-pill"),
            Some(Selector::Class("btn-pill".into()))
        );
        assert_eq!(Selector::parse("BUTTON"), Some(Selector::Tag("button".into())));
    }

    #[test]
    fn test_rejects_compound_selectors() {
        assert_eq!(Selector::parse("#a .b"), None);
        assert_eq!(Selector::parse("div > p"), None);
        assert_eq!(Selector::parse("#"), None);
        assert_eq!(Selector::parse(""), None);
    }
}
