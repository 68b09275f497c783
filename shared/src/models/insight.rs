//! Derived advisory insights

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// Urgency of an insight. Declared most urgent first so sorting
/// ascending puts critical items at the top.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    Critical,
    Warning,
    Normal,
}

/// Area of farm management an insight belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InsightCategory {
    Weather,
    Soil,
    Pest,
    Fertilizer,
}

/// When the farmer should act
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionDate {
    Today,
    Tomorrow,
    Soon,
    /// A forecast display date
    On(String),
}

impl std::fmt::Display for ActionDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionDate::Today => write!(f, "Today"),
            ActionDate::Tomorrow => write!(f, "Tomorrow"),
            ActionDate::Soon => write!(f, "Soon"),
            ActionDate::On(date) => write!(f, "{}", date),
        }
    }
}

impl From<String> for ActionDate {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Today" => ActionDate::Today,
            "Tomorrow" => ActionDate::Tomorrow,
            "Soon" => ActionDate::Soon,
            _ => ActionDate::On(value),
        }
    }
}

impl From<ActionDate> for String {
    fn from(value: ActionDate) -> Self {
        value.to_string()
    }
}

/// An actionable advisory for one field, recomputed on every state change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfflineInsight {
    pub crop_id: RecordId,
    pub crop_nickname: String,
    pub title: String,
    pub description: String,
    pub priority: InsightPriority,
    pub action_date: ActionDate,
    pub category: InsightCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_sorts_critical_first() {
        let mut priorities = vec![
            InsightPriority::Normal,
            InsightPriority::Critical,
            InsightPriority::Warning,
        ];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![
                InsightPriority::Critical,
                InsightPriority::Warning,
                InsightPriority::Normal
            ]
        );
    }

    #[test]
    fn test_action_date_serializes_as_plain_string() {
        assert_eq!(serde_json::to_value(ActionDate::Today).unwrap(), "Today");
        assert_eq!(
            serde_json::to_value(ActionDate::On("19/10/2026".into())).unwrap(),
            "19/10/2026"
        );

        let parsed: ActionDate = serde_json::from_str("\"Soon\"").unwrap();
        assert_eq!(parsed, ActionDate::Soon);
        let parsed: ActionDate = serde_json::from_str("\"20/10/2026\"").unwrap();
        assert_eq!(parsed, ActionDate::On("20/10/2026".into()));
    }
}
