use std::{collections::HashMap, fmt, str::FromStr};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{
    de::{Deserializer, Error as _},
    Deserialize,
};
use tracing::{info, warn};

use crate::action::Action;

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub colors: ColorMode,
    pub keybindings: KeyBindings,
}

impl Config {
    /// Embedded defaults layered under the user's `config.yaml`, if there is one.
    pub fn new() -> Result<Self> {
        let config_file = crate::utils::get_config_dir().join("config.yaml");
        if config_file.exists() {
            info!("Loading configuration from {}", config_file.display());
        } else {
            warn!("No configuration file at {}, using defaults", config_file.display());
        }

        let cfg = Self::builder()
            .add_source(config::File::from(config_file).format(config::FileFormat::Yaml).required(false))
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }

    #[cfg(test)]
    pub fn defaults() -> Result<Self> {
        Ok(Self::builder().build()?.try_deserialize()?)
    }

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder().add_source(config::File::from_str(CONFIG, config::FileFormat::Yaml))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Without color the game falls back to monochrome with reverse video for the status bar.
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => crossterm::style::available_color_count() >= 8,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// A key plus modifiers, compared the way key presses are matched against bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub fn new(code: KeyCode, mut modifiers: KeyModifiers) -> Self {
        // The case of a character already carries the shift state.
        if matches!(code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self { code, modifiers }
    }
}

impl From<&KeyEvent> for KeyChord {
    fn from(key: &KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

impl FromStr for KeyChord {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim().trim_start_matches('<').trim_end_matches('>');
        let lower = raw.to_ascii_lowercase();
        let (remaining, modifiers) = extract_modifiers(&lower);
        parse_key_code_with_modifiers(remaining, modifiers)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl-")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt-")?;
        }
        match self.code {
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Esc => write!(f, "Esc"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "'{c}'"),
            other => write!(f, "{other:?}"),
        }
    }
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        match current {
            rest if rest.starts_with("ctrl-") => {
                modifiers.insert(KeyModifiers::CONTROL);
                current = &rest[5..];
            },
            rest if rest.starts_with("alt-") => {
                modifiers.insert(KeyModifiers::ALT);
                current = &rest[4..];
            },
            rest if rest.starts_with("shift-") => {
                modifiers.insert(KeyModifiers::SHIFT);
                current = &rest[6..];
            },
            _ => break,
        };
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, modifiers: KeyModifiers) -> Result<KeyChord, String> {
    let code = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        c if c.chars().count() == 1 => {
            let mut c = c.chars().next().unwrap_or_default();
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        },
        _ => return Err(format!("Unable to parse key `{raw}`")),
    };
    Ok(KeyChord::new(code, modifiers))
}

/// Which keys trigger which [`Action`]. A key may be bound to at most one action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyBindings(HashMap<Action, Vec<KeyChord>>);

impl KeyBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        let chord = KeyChord::from(key);
        self.0.iter().find(|(_, chords)| chords.contains(&chord)).map(|(action, _)| *action)
    }

    pub fn keys(&self, action: Action) -> &[KeyChord] {
        self.0.get(&action).map(Vec::as_slice).unwrap_or_default()
    }

    /// Human readable list of the keys bound to `action`, e.g. `Left, 'j', 'h'`.
    pub fn describe(&self, action: Action) -> String {
        self.keys(action).iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Vec<String>>::deserialize(deserializer)?;

        let mut bindings: HashMap<Action, Vec<KeyChord>> = HashMap::new();
        let mut seen: HashMap<KeyChord, Action> = HashMap::new();
        for (name, keys) in raw {
            let action = Action::from_str(&name).map_err(|_| D::Error::custom(format!("Unknown action `{name}`")))?;
            let chords = keys.iter().map(|k| k.parse::<KeyChord>()).collect::<Result<Vec<_>, _>>().map_err(D::Error::custom)?;
            for chord in &chords {
                if let Some(other) = seen.insert(*chord, action) {
                    if other != action {
                        return Err(D::Error::custom(format!("Key {chord} is bound to both {other} and {action}")));
                    }
                }
            }
            bindings.insert(action, chords);
        }

        Ok(KeyBindings(bindings))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_simple_keys() {
        assert_eq!("a".parse::<KeyChord>().unwrap(), KeyChord::new(KeyCode::Char('a'), KeyModifiers::empty()));
        assert_eq!("left".parse::<KeyChord>().unwrap(), KeyChord::new(KeyCode::Left, KeyModifiers::empty()));
        assert_eq!("<space>".parse::<KeyChord>().unwrap(), KeyChord::new(KeyCode::Char(' '), KeyModifiers::empty()));
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!("ctrl-c".parse::<KeyChord>().unwrap(), KeyChord::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(
            "CTRL-alt-Enter".parse::<KeyChord>().unwrap(),
            KeyChord::new(KeyCode::Enter, KeyModifiers::CONTROL | KeyModifiers::ALT)
        );
        // shift is folded into the character
        assert_eq!("shift-q".parse::<KeyChord>().unwrap(), KeyChord::new(KeyCode::Char('Q'), KeyModifiers::empty()));
    }

    #[test]
    fn test_invalid_keys() {
        assert!("invalid-key".parse::<KeyChord>().is_err());
        assert!("ctrl-nope".parse::<KeyChord>().is_err());
    }

    #[test]
    fn test_default_bindings() -> Result<()> {
        let config = Config::defaults()?;
        let keys = &config.keybindings;

        assert_eq!(config.colors, ColorMode::Auto);
        for code in [KeyCode::Left, KeyCode::Char('j'), KeyCode::Char('h')] {
            assert_eq!(keys.action_for(&press(code, KeyModifiers::NONE)), Some(Action::Left));
        }
        for code in [KeyCode::Right, KeyCode::Char('k'), KeyCode::Char('l')] {
            assert_eq!(keys.action_for(&press(code, KeyModifiers::NONE)), Some(Action::Right));
        }
        assert_eq!(keys.action_for(&press(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Action::Quit));
        assert_eq!(keys.action_for(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Action::Quit));
        assert_eq!(keys.action_for(&press(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Action::Start));
        assert_eq!(keys.action_for(&press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
        // an upper case Q is a different key
        assert_eq!(keys.action_for(&press(KeyCode::Char('Q'), KeyModifiers::SHIFT)), None);
        Ok(())
    }

    #[test]
    fn test_describe() -> Result<()> {
        let config = Config::defaults()?;
        assert_eq!(config.keybindings.describe(Action::Left), "Left, 'j', 'h'");
        assert_eq!(config.keybindings.describe(Action::Start), "Space");
        assert_eq!(config.keybindings.describe(Action::Quit), "'q', Ctrl-'c'");
        Ok(())
    }

    #[test]
    fn test_conflicting_bindings_are_rejected() {
        let result = config::Config::builder()
            .add_source(config::File::from_str(
                "keybindings:\n  left: [\"j\"]\n  right: [\"j\"]\n",
                config::FileFormat::Yaml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<Config>();
        assert!(result.is_err());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let cfg: Config = Config::builder()
            .add_source(config::File::from_str("colors: never\nkeybindings:\n  left: [\"a\"]\n", config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.colors, ColorMode::Never);
        assert!(!cfg.colors.enabled());
        assert_eq!(cfg.keybindings.action_for(&press(KeyCode::Char('a'), KeyModifiers::NONE)), Some(Action::Left));
        assert_eq!(cfg.keybindings.action_for(&press(KeyCode::Right, KeyModifiers::NONE)), Some(Action::Right));
    }
}
