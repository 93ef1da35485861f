use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, EnumString, IntoStaticStr};

/// Position an attack has to land from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, Display)]
#[strum(ascii_case_insensitive)]
pub enum ActionPosition {
    #[strum(serialize = "Front")]
    Front,
    #[strum(to_string = "Flank", serialize = "Side")]
    Flank,
    #[strum(serialize = "Rear")]
    Rear,
    #[strum(serialize = "Omni")]
    Omni,
}

/// One row of the source table.
///
/// Only lives long enough to be merged into a [`PositionalAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalRecord {
    pub action_id: u32,
    pub action_name: String,
    pub action_position: String,
    pub percent: u32,
    pub is_hit: bool,
    pub comment: String,
}

/// Outcome of an action at one percent threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionalParameters {
    pub percent: u32,
    pub is_hit: bool,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionalAction {
    pub id: u32,
    pub action_name: String,
    /// Position label exactly as it appears in the sheet
    pub action_position: String,
    /// Keyed by percent
    pub positionals: BTreeMap<u32, PositionalParameters>,
}

impl PositionalAction {
    pub fn new(id: u32, action_name: String, action_position: String) -> Self {
        Self {
            id,
            action_name,
            action_position,
            positionals: BTreeMap::new(),
        }
    }

    /// Typed position, if the label is one we know
    pub fn position(&self) -> Option<ActionPosition> {
        self.action_position.trim().parse().ok()
    }

    pub fn parameters(&self, percent: u32) -> Option<&PositionalParameters> {
        self.positionals.get(&percent)
    }

    pub fn is_hit(&self, percent: u32) -> bool {
        self.positionals
            .get(&percent)
            .map(|p| p.is_hit)
            .unwrap_or(false)
    }
}

impl PositionalRecord {
    /// Split into an (empty) action shell and its parameters
    pub fn into_parts(self) -> (PositionalAction, PositionalParameters) {
        let params = PositionalParameters {
            percent: self.percent,
            is_hit: self.is_hit,
            comment: self.comment,
        };
        let action = PositionalAction::new(self.action_id, self.action_name, self.action_position);
        (action, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_labels() {
        let mut action = PositionalAction::new(56, "Snap Punch".into(), "Flank".into());
        assert_eq!(action.position(), Some(ActionPosition::Flank));

        action.action_position = "side".into();
        assert_eq!(action.position(), Some(ActionPosition::Flank));

        action.action_position = "REAR".into();
        assert_eq!(action.position(), Some(ActionPosition::Rear));

        action.action_position = "Behind-ish".into();
        assert_eq!(action.position(), None);
    }

    #[test]
    fn test_unknown_percent_is_miss() {
        let mut action = PositionalAction::new(100, "Fang".into(), "Rear".into());
        action.positionals.insert(
            50,
            PositionalParameters {
                percent: 50,
                is_hit: true,
                comment: String::new(),
            },
        );
        assert!(action.is_hit(50));
        assert!(!action.is_hit(25));
        assert!(action.parameters(25).is_none());
    }
}
