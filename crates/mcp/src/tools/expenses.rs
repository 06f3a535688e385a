// Expense record tools backed by the ExpenseLM API

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_integer, json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use expenselm_sdk::api::expenses::{DEFAULT_LIMIT, MAX_LIMIT};
use expenselm_sdk::{ExpenseLmClient, ExpenseQuery};
use serde::Deserialize;

const RECORD_SHAPE: &str = "Each record has an `id`, an optional `image` (image_type: \
Receipt, Invoice or Others; image_file_name) and an optional `expense` with shop_name, \
shop_address, date (ISO 8601), expense_category, currency, total_amount, items (name, \
quantity, unit_price, subtotal), expense_type (Standard or Subscription) and remark.";

fn expense_query_schema() -> serde_json::Value {
    json_schema_object(
        serde_json::json!({
            "skip": json_schema_integer("The number of records to skip (default: 0)", 0, None, 0),
            "limit": json_schema_integer(
                "The maximum number of records to return, between 1 and 100 (default: 10)",
                1,
                Some(MAX_LIMIT),
                DEFAULT_LIMIT,
            ),
            "from_date": json_schema_string("Start date for filtering, format YYYY-MM-DD (optional)"),
            "to_date": json_schema_string("End date for filtering, format YYYY-MM-DD (optional)"),
            "text_input": json_schema_string("Text for semantic search (optional)")
        }),
        vec![],
    )
}

fn parse_query(arguments: serde_json::Value, tool: &str) -> Result<ExpenseQuery> {
    serde_json::from_value(arguments).with_context(|| format!("Invalid arguments for {}", tool))
}

/// Tool to list the latest expense records
pub struct ListExpensesTool {
    client: ExpenseLmClient,
}

impl ListExpensesTool {
    pub fn new(client: ExpenseLmClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListExpensesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_expenses".to_string(),
            description: format!(
                "Get the latest expense records. Filter by period with \
                 from_date/to_date (YYYY-MM-DD) and by meaning with text_input; page with \
                 skip and limit. Returns a JSON list of expense records (empty when nothing \
                 matches). {}",
                RECORD_SHAPE
            ),
            input_schema: expense_query_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let query = parse_query(arguments, "list_expenses")?;

        let records = self.client.expenses().list(&query).await?;
        tracing::debug!(count = records.len(), "Listed expenses");

        Ok(CallToolResult::json(&records)?)
    }
}

/// Tool to list the latest subscription expenses
pub struct ListSubscriptionExpensesTool {
    client: ExpenseLmClient,
}

impl ListSubscriptionExpensesTool {
    pub fn new(client: ExpenseLmClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListSubscriptionExpensesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_subscription_expenses".to_string(),
            description: format!(
                "Get the latest expense records related to regular subscriptions. Takes \
                 the same skip, limit, from_date, to_date and text_input parameters as \
                 list_expenses. Returns a JSON list of expense records. {}",
                RECORD_SHAPE
            ),
            input_schema: expense_query_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let query = parse_query(arguments, "list_subscription_expenses")?;

        let records = self.client.subscriptions().list(&query).await?;
        tracing::debug!(count = records.len(), "Listed subscription expenses");

        Ok(CallToolResult::json(&records)?)
    }
}

/// Tool to get one expense by id
pub struct GetExpenseTool {
    client: ExpenseLmClient,
}

impl GetExpenseTool {
    pub fn new(client: ExpenseLmClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetExpenseArgs {
    id: String,
}

#[async_trait::async_trait]
impl Tool for GetExpenseTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_expense".to_string(),
            description: "Get an expense record by id. Returns a JSON object with the \
                          optional `image` and the optional extracted `expense` data. An \
                          unknown id is reported as an error."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "id": json_schema_string("The id of the expense")
                }),
                vec!["id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetExpenseArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_expense")?;

        let data = self.client.expenses().get(&args.id).await?;

        Ok(CallToolResult::json(&data)?)
    }
}
