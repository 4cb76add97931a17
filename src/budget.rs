use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Categories seeded into every fresh tracker
const DEFAULT_CATEGORIES: [&str; 5] = [
    "Accommodation",
    "Local Transport",
    "Food & Dining",
    "Activities",
    "Shopping",
];

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub category: String,
    pub amount: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BudgetState {
    total_budget: f64,
    days: u32,
    expenses: Vec<Expense>,
    categories: BTreeMap<String, f64>,
    next_id: u64,
}

impl BudgetState {
    fn fresh(total_budget: f64, days: u32) -> Self {
        Self {
            total_budget,
            days,
            expenses: Vec::new(),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|c| (c.to_string(), 0.0))
                .collect(),
            next_id: 1,
        }
    }
}

/// Local trip-budget tracker
///
/// Purely client-side state: a total budget, trip length, and a list of
/// expenses with running per-category totals, persisted as JSON. A missing
/// or corrupt state file falls back to a fresh tracker with the defaults.
pub struct BudgetTracker {
    state: BudgetState,
    // None keeps the tracker purely in memory
    path: Option<PathBuf>,
}

impl BudgetTracker {
    /// Create an in-memory tracker
    pub fn new(total_budget: f64, days: u32) -> Self {
        Self {
            state: BudgetState::fresh(total_budget, days),
            path: None,
        }
    }

    /// Load a tracker from disk, falling back to a fresh one
    pub fn load(path: impl Into<PathBuf>, default_budget: f64, default_days: u32) -> Self {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(e) => {
                    ::log::warn!("corrupt budget file {}: {}", path.display(), e);
                    BudgetState::fresh(default_budget, default_days)
                }
            },
            Err(_) => BudgetState::fresh(default_budget, default_days),
        };
        Self {
            state,
            path: Some(path),
        }
    }

    /// Record an expense and return its id
    pub fn add_expense(
        &mut self,
        category: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
    ) -> Result<u64, Box<dyn Error>> {
        let category = category.into();
        let id = self.state.next_id;
        self.state.next_id += 1;

        self.state.expenses.push(Expense {
            id,
            category: category.clone(),
            amount,
            description: description.into(),
        });
        *self.state.categories.entry(category).or_insert(0.0) += amount;

        self.save()?;
        Ok(id)
    }

    /// Remove an expense by id, adjusting its category total
    pub fn remove_expense(&mut self, id: u64) -> Result<bool, Box<dyn Error>> {
        let Some(index) = self.state.expenses.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let expense = self.state.expenses.remove(index);
        if let Some(total) = self.state.categories.get_mut(&expense.category) {
            *total -= expense.amount;
        }
        self.save()?;
        Ok(true)
    }

    /// Drop every expense and zero the category totals
    pub fn clear_all(&mut self) -> Result<(), Box<dyn Error>> {
        self.state.expenses.clear();
        for total in self.state.categories.values_mut() {
            *total = 0.0;
        }
        self.save()
    }

    /// Change the total budget
    pub fn update_budget(&mut self, amount: f64) -> Result<(), Box<dyn Error>> {
        self.state.total_budget = amount;
        self.save()
    }

    /// Change the trip length
    pub fn update_days(&mut self, days: u32) -> Result<(), Box<dyn Error>> {
        self.state.days = days;
        self.save()
    }

    pub fn total_budget(&self) -> f64 {
        self.state.total_budget
    }

    pub fn days(&self) -> u32 {
        self.state.days
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.state.expenses
    }

    /// Running total per category
    pub fn category_totals(&self) -> &BTreeMap<String, f64> {
        &self.state.categories
    }

    /// Sum of all recorded expenses
    pub fn total_spent(&self) -> f64 {
        self.state.expenses.iter().map(|e| e.amount).sum()
    }

    /// Budget left after spending
    pub fn remaining(&self) -> f64 {
        self.state.total_budget - self.total_spent()
    }

    /// Remaining budget spread over the trip days
    pub fn daily_allowance(&self) -> f64 {
        if self.state.days == 0 {
            return 0.0;
        }
        self.remaining() / self.state.days as f64
    }

    fn save(&self) -> Result<(), Box<dyn Error>> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.state)?)?;
        Ok(())
    }
}
