use serde::{Deserialize, Serialize};

/// A budget line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: String,
    pub category: String,
    pub description: Option<String>,
    #[serde(default)]
    pub allocated: f64,
    #[serde(default)]
    pub spent: f64,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl BudgetItem {
    pub fn remaining(&self) -> f64 {
        self.allocated - self.spent
    }

    /// Spend as a percentage of allocation, clamped to [0, 100].
    pub fn spent_percent(&self) -> u16 {
        if self.allocated <= 0.0 {
            return 0;
        }
        ((self.spent / self.allocated) * 100.0).clamp(0.0, 100.0) as u16
    }

    pub fn is_overspent(&self) -> bool {
        self.spent > self.allocated
    }
}

/// Insert payload for the budget_items table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewBudgetItem {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub allocated: f64,
    pub spent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(allocated: f64, spent: f64) -> BudgetItem {
        BudgetItem {
            id: "bi-1".to_string(),
            category: "Printing".to_string(),
            description: None,
            allocated,
            spent,
            status: Some("active".to_string()),
            priority: None,
        }
    }

    #[test]
    fn test_remaining_and_percent() {
        let i = item(1000.0, 250.0);
        assert_eq!(i.remaining(), 750.0);
        assert_eq!(i.spent_percent(), 25);
        assert!(!i.is_overspent());
    }

    #[test]
    fn test_overspent_clamps_percent() {
        let i = item(100.0, 150.0);
        assert!(i.is_overspent());
        assert_eq!(i.spent_percent(), 100);
    }

    #[test]
    fn test_zero_allocation() {
        let i = item(0.0, 0.0);
        assert_eq!(i.spent_percent(), 0);
    }
}
