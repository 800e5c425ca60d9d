use strum::{Display, EnumString};

/// Everything a key press can ask the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Left,
    Right,
    Quit,
    Start,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn names_are_lowercase() {
        assert_eq!(Action::from_str("left").unwrap(), Action::Left);
        assert_eq!(Action::from_str("start").unwrap(), Action::Start);
        assert_eq!(Action::Quit.to_string(), "quit");
        assert!(Action::from_str("jump").is_err());
    }
}
