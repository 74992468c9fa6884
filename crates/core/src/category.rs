use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::expense::ExpenseKind;

/// Category labels whose spending counts as essential, matched by
/// case-insensitive containment against the label.
pub const ESSENTIAL_KEYWORDS: &[&str] = &[
    "food",
    "housing",
    "rent",
    "transport",
    "utilities",
    "health",
    "education",
    "groceries",
    "medical",
    "insurance",
];

/// Built-in merchant/service keyword rules, evaluated top to bottom.
/// The first rule with a keyword present in the text wins.
pub const DEFAULT_RULES: &[(&str, &[&str])] = &[
    (
        "Food",
        &["restaurant", "cafe", "coffee", "burger", "pizza", "swiggy", "zomato", "food", "dining"],
    ),
    (
        "Groceries",
        &["mart", "grocery", "supermarket", "vegetable", "fruit", "milk", "bigbasket", "blinkit"],
    ),
    (
        "Transport",
        &[
            "uber", "ola", "fuel", "petrol", "diesel", "parking", "toll", "metro", "bus", "train",
            "flight", "airline",
        ],
    ),
    (
        "Shopping",
        &["amazon", "flipkart", "myntra", "clothing", "shoe", "wear", "store", "shop"],
    ),
    (
        "Utilities",
        &[
            "bill", "electricity", "water", "gas", "internet", "wifi", "broadband", "mobile",
            "recharge", "phone",
        ],
    ),
    (
        "Entertainment",
        &["movie", "cinema", "netflix", "prime", "spotify", "game", "show"],
    ),
    (
        "Health",
        &["pharmacy", "medical", "doctor", "hospital", "clinic", "medicine", "health"],
    ),
    ("Rent", &["rent", "housing", "maintenance"]),
    (
        "Education",
        &["school", "college", "course", "udemy", "coursera", "book", "tuition"],
    ),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Failed to parse rules TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Rule for '{0}' has no keywords")]
    EmptyRule(String),
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    essential: Vec<String>,
    #[serde(rename = "rule")]
    rules: Vec<CategoryRule>,
}

/// Maps free-text descriptions to category labels and category labels to
/// the essential/non-essential split. Rules are an ordered first-match
/// list so that classification stays deterministic and testable.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
    essential: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(category, keywords)| CategoryRule {
                category: category.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        let essential = ESSENTIAL_KEYWORDS.iter().map(|k| k.to_string()).collect();
        Self { rules, essential }
    }
}

impl Classifier {
    pub fn new(rules: Vec<CategoryRule>, essential: Vec<String>) -> Self {
        Self { rules, essential }
    }

    /// Load rule overrides from TOML. An omitted `essential` list keeps
    /// the built-in one.
    ///
    /// ```toml
    /// essential = ["food", "rent"]
    ///
    /// [[rule]]
    /// category = "Food"
    /// keywords = ["swiggy", "zomato"]
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ClassifierError> {
        let file: RuleFile = toml::from_str(content)?;
        if let Some(rule) = file.rules.iter().find(|r| r.keywords.is_empty()) {
            return Err(ClassifierError::EmptyRule(rule.category.clone()));
        }
        let essential = if file.essential.is_empty() {
            ESSENTIAL_KEYWORDS.iter().map(|k| k.to_string()).collect()
        } else {
            file.essential
        };
        Ok(Self { rules: file.rules, essential })
    }

    /// First rule whose keyword occurs in `text` (case-insensitive).
    pub fn infer_category(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|rule| rule.category.as_str())
    }

    /// Essential/non-essential split for a category label.
    pub fn kind_for(&self, category: &str) -> ExpenseKind {
        let lower = category.to_lowercase();
        if self.essential.iter().any(|k| lower.contains(k.as_str())) {
            ExpenseKind::Essential
        } else {
            ExpenseKind::NonEssential
        }
    }
}
