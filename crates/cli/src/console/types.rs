//! Type definitions for the interactive prompts.
//!
//! This module defines the option sets handed to the selection menu, the
//! choices it returns, and the state the menu keeps between redraws.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

/// Key of one option in an [`OptionSet`].
///
/// Options built from plain labels are keyed by their position; options built
/// from a mapping keep the caller's names.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum OptionKey {
    Position(usize),
    Name(String),
}

impl Display for OptionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionKey::Position(i) => write!(f, "{i}"),
            OptionKey::Name(name) => f.write_str(name),
        }
    }
}

/// One entry of the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuOption {
    pub key: OptionKey,
    pub label: String,
}

/// Ordered options of a selection menu.
///
/// Keys do not have to be unique; options are always addressed by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionSet {
    options: Vec<MenuOption>,
}

impl OptionSet {
    /// Options keyed by their zero-based position.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| MenuOption {
                key: OptionKey::Position(i),
                label: label.into(),
            })
            .collect();
        Self { options }
    }

    /// Options keyed by caller-supplied names, in the given order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let options = pairs
            .into_iter()
            .map(|(key, label)| MenuOption {
                key: OptionKey::Name(key.into()),
                label: label.into(),
            })
            .collect();
        Self { options }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&MenuOption> {
        self.options.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MenuOption> {
        self.options.iter()
    }

    /// Builds the choice for the option at `position`.
    #[must_use]
    pub fn choice(&self, position: usize) -> Option<Choice> {
        self.get(position).map(|option| Choice {
            position,
            key: option.key.clone(),
            label: option.label.clone(),
        })
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a MenuOption;
    type IntoIter = std::slice::Iter<'a, MenuOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<String>> for OptionSet {
    fn from(labels: Vec<String>) -> Self {
        Self::from_labels(labels)
    }
}

impl From<Vec<&str>> for OptionSet {
    fn from(labels: Vec<&str>) -> Self {
        Self::from_labels(labels)
    }
}

impl<const N: usize> From<[&str; N]> for OptionSet {
    fn from(labels: [&str; N]) -> Self {
        Self::from_labels(labels)
    }
}

impl From<IndexMap<String, String>> for OptionSet {
    fn from(map: IndexMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}

/// The option the user picked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub position: usize,
    pub key: OptionKey,
    pub label: String,
}

impl Choice {
    /// The label for options built from plain labels, the caller's key for
    /// options built from a mapping.
    #[must_use]
    pub fn value(&self) -> &str {
        match &self.key {
            OptionKey::Position(_) => &self.label,
            OptionKey::Name(name) => name,
        }
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// Direction to move the cursor through the options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// Whether one or several options can be picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multiple,
}

/// State of one menu session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuState {
    /// Position of the option under the cursor
    pub cursor: usize,
    /// Number of options in the menu
    pub option_count: usize,
    pub mode: SelectionMode,
    /// Toggled positions, multi-select only
    pub selected: BTreeSet<usize>,
    /// Message shown beneath the hint line
    pub error: Option<String>,
}

impl MenuState {
    #[must_use]
    pub fn new(option_count: usize, mode: SelectionMode) -> Self {
        Self {
            cursor: 0,
            option_count,
            mode,
            selected: BTreeSet::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn is_multiple(&self) -> bool {
        self.mode == SelectionMode::Multiple
    }

    #[must_use]
    pub fn is_selected(&self, position: usize) -> bool {
        self.selected.contains(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_set_from_labels() {
        let options = OptionSet::from(["Angular", "React"]);
        assert_eq!(options.len(), 2);
        assert_eq!(options.get(1).unwrap().key, OptionKey::Position(1));
        assert_eq!(options.get(1).unwrap().label, "React");
    }

    #[test]
    fn test_option_set_from_index_map_keeps_order() {
        let mut map = IndexMap::new();
        map.insert("ac".to_string(), "App creator".to_string());
        map.insert("e".to_string(), "Explorer".to_string());
        map.insert("?".to_string(), "42".to_string());

        let options = OptionSet::from(map);
        let keys: Vec<String> = options.iter().map(|o| o.key.to_string()).collect();
        assert_eq!(keys, vec!["ac", "e", "?"]);
    }

    #[test]
    fn test_option_set_allows_duplicate_keys() {
        let options = OptionSet::from_pairs([("x", "first"), ("x", "second")]);
        assert_eq!(options.len(), 2);
        assert_eq!(options.choice(1).unwrap().label, "second");
    }

    #[test]
    fn test_choice_value_for_labels_is_label() {
        let options = OptionSet::from(vec!["Svelte", "Vue"]);
        let choice = options.choice(0).unwrap();
        assert_eq!(choice.value(), "Svelte");
        assert_eq!(format!("{choice}"), "Svelte");
    }

    #[test]
    fn test_choice_value_for_mapping_is_key() {
        let options = OptionSet::from_pairs([("e", "Explorer")]);
        let choice = options.choice(0).unwrap();
        assert_eq!(choice.value(), "e");
        assert_eq!(choice.label, "Explorer");
    }

    #[test]
    fn test_choice_out_of_range() {
        let options = OptionSet::from(["only"]);
        assert!(options.choice(1).is_none());
    }

    #[test]
    fn test_option_key_display() {
        assert_eq!(format!("{}", OptionKey::Position(3)), "3");
        assert_eq!(format!("{}", OptionKey::Name("ac".to_string())), "ac");
    }

    #[test]
    fn test_menu_state_new() {
        let state = MenuState::new(4, SelectionMode::Multiple);
        assert_eq!(state.cursor, 0);
        assert!(state.is_multiple());
        assert!(state.selected.is_empty());
        assert!(state.error.is_none());
    }
}
