use serde::{Deserialize, Serialize};

/// A strategy/timeline item with free-form tactics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyItem {
    pub id: String,
    pub title: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub progress: Option<i64>,
    /// Free-form JSON; rendered as a bullet list when it is an array of strings.
    pub tactics: Option<serde_json::Value>,
}

impl StrategyItem {
    pub fn progress_percent(&self) -> u16 {
        self.progress.unwrap_or(0).clamp(0, 100) as u16
    }

    /// Tactics as display lines; non-array payloads collapse to one line.
    pub fn tactic_lines(&self) -> Vec<String> {
        match &self.tactics {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Some(other) => vec![other.to_string()],
            None => Vec::new(),
        }
    }
}

/// Insert payload for the strategy_items table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewStrategyItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tactics: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tactic_lines_from_array() {
        let json = r#"{"id": "s-1", "title": "Ground game", "status": "in_progress",
            "priority": "high", "progress": 40,
            "tactics": ["Door to door in D1", "Weekend market stands"]}"#;
        let item: StrategyItem = serde_json::from_str(json).expect("Failed to parse strategy");
        assert_eq!(item.progress_percent(), 40);
        assert_eq!(item.tactic_lines().len(), 2);
        assert_eq!(item.tactic_lines()[0], "Door to door in D1");
    }

    #[test]
    fn test_progress_clamped() {
        let item = StrategyItem {
            id: "s-2".to_string(),
            title: "t".to_string(),
            status: None,
            priority: None,
            progress: Some(140),
            tactics: None,
        };
        assert_eq!(item.progress_percent(), 100);
        assert!(item.tactic_lines().is_empty());
    }
}
