use serde::{Deserialize, Serialize};

/// Kind of document an expense image was captured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseImageType {
    Receipt,
    Invoice,
    Others,
}

/// Whether an expense is a one-off purchase or a recurring subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExpenseType {
    #[default]
    Standard,
    Subscription,
}

/// Source image of an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseImage {
    pub image_type: ExpenseImageType,
    pub image_file_name: String,
}

/// A single line item within an expense
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseItem {
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Structured data extracted from an expense image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expense {
    pub shop_name: String,
    pub shop_address: String,
    /// ISO 8601 date of the expense
    pub date: String,
    pub expense_category: String,
    pub currency: String,
    pub total_amount: f64,
    pub items: Vec<ExpenseItem>,
    pub expense_type: ExpenseType,
    pub remark: String,
}

pub const DEFAULT_EXPENSE_CATEGORY: &str = "Misc";

impl Default for Expense {
    fn default() -> Self {
        Self {
            shop_name: String::new(),
            shop_address: String::new(),
            date: String::new(),
            expense_category: DEFAULT_EXPENSE_CATEGORY.to_string(),
            currency: String::new(),
            total_amount: 0.0,
            items: Vec::new(),
            expense_type: ExpenseType::Standard,
            remark: String::new(),
        }
    }
}

/// An expense image together with the data extracted from it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseImageData {
    pub image: Option<ExpenseImage>,
    pub expense: Option<Expense>,
}

/// A stored expense as returned by the listing endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Identifier assigned by the remote system
    pub id: String,
    pub image: Option<ExpenseImage>,
    pub expense: Option<Expense>,
}

impl From<ExpenseRecord> for ExpenseImageData {
    fn from(record: ExpenseRecord) -> Self {
        Self {
            image: record.image,
            expense: record.expense,
        }
    }
}

/// Total spent per month (YYYY-MM) and currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCurAmtStatItem {
    pub month: String,
    pub currency: String,
    pub total_amount: f64,
}

/// Total spent per expense category and currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCurAmtStatItem {
    pub category: String,
    pub currency: String,
    pub total_amount: f64,
}

/// Total spent per subscription and currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionCurAmtStatItem {
    pub subscription: String,
    pub currency: String,
    pub total_amount: f64,
}
