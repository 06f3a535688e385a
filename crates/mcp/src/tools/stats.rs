// Spending summary tools backed by the ExpenseLM statistics endpoints

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use expenselm_sdk::{DateRange, ExpenseLmClient};

/// Grouping of a spending summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    ByMonth,
    ByCategory,
    BySubscription,
}

impl SummaryKind {
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::ByMonth => "summary_by_month",
            Self::ByCategory => "summary_by_category",
            Self::BySubscription => "summary_by_subscription",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::ByMonth => {
                "Get expense summary by month and currency for the provided period. \
                 Returns a JSON list of {month, currency, total_amount} rows, one per \
                 month and currency; month is formatted YYYY-MM."
            }
            Self::ByCategory => {
                "Get expense summary by category and currency for the provided period. \
                 Returns a JSON list of {category, currency, total_amount} rows, one per \
                 category and currency."
            }
            Self::BySubscription => {
                "Get expense summary by subscription and currency for the provided period. \
                 Returns a JSON list of {subscription, currency, total_amount} rows, one \
                 per subscription and currency."
            }
        }
    }
}

/// Tool returning spending totals over a period
pub struct SummaryTool {
    client: ExpenseLmClient,
    kind: SummaryKind,
}

impl SummaryTool {
    pub fn new(client: ExpenseLmClient, kind: SummaryKind) -> Self {
        Self { client, kind }
    }
}

#[async_trait::async_trait]
impl Tool for SummaryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.kind.tool_name().to_string(),
            description: self.kind.description().to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "from_date": json_schema_string("The start date of the period, format YYYY-MM-DD (required)"),
                    "to_date": json_schema_string("The end date of the period, format YYYY-MM-DD (required)")
                }),
                vec!["from_date", "to_date"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let range: DateRange = serde_json::from_value(arguments)
            .with_context(|| format!("Invalid arguments for {}", self.kind.tool_name()))?;

        let stats = self.client.stats();
        let result = match self.kind {
            SummaryKind::ByMonth => CallToolResult::json(&stats.summary_by_month(&range).await?),
            SummaryKind::ByCategory => {
                CallToolResult::json(&stats.summary_by_category(&range).await?)
            }
            SummaryKind::BySubscription => {
                CallToolResult::json(&stats.summary_by_subscription(&range).await?)
            }
        };

        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ExpenseLmClient {
        ExpenseLmClient::builder()
            .base_url(server.uri())
            .api_key("sk-tool")
            .build()
            .unwrap()
    }

    fn rows(result: &CallToolResult) -> serde_json::Value {
        match &result.content[0] {
            ToolContent::Text { text } => serde_json::from_str(text).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_summary_by_month_tool() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/summary-by-month-by-currency"))
            .and(query_param("from_date", "2024-01-01"))
            .and(query_param("to_date", "2024-03-31"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"month": "2024-01", "currency": "USD", "total_amount": 120.5},
                {"month": "2024-02", "currency": "USD", "total_amount": 99.0}
            ])))
            .mount(&server)
            .await;

        let tool = SummaryTool::new(client_for(&server), SummaryKind::ByMonth);
        let result = tool
            .execute(serde_json::json!({"from_date": "2024-01-01", "to_date": "2024-03-31"}))
            .await
            .unwrap();

        let rows = rows(&result);
        assert_eq!(rows[0]["month"], "2024-01");
        assert_eq!(rows[0]["total_amount"], 120.5);
        assert_eq!(rows[1]["month"], "2024-02");
    }

    #[tokio::test]
    async fn test_summary_by_category_tool() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/summary-by-category-by-currency"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"category": "Travel", "currency": "EUR", "total_amount": 310}
            ])))
            .mount(&server)
            .await;

        let tool = SummaryTool::new(client_for(&server), SummaryKind::ByCategory);
        let result = tool
            .execute(serde_json::json!({"from_date": "2024-01-01", "to_date": "2024-12-31"}))
            .await
            .unwrap();

        assert_eq!(rows(&result)[0]["category"], "Travel");
    }

    #[tokio::test]
    async fn test_summary_by_subscription_tool() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/summary-by-subscription-by-currency"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"subscription": "iCloud", "currency": "USD", "total_amount": 2.99}
            ])))
            .mount(&server)
            .await;

        let tool = SummaryTool::new(client_for(&server), SummaryKind::BySubscription);
        let result = tool
            .execute(serde_json::json!({"from_date": "2024-01-01", "to_date": "2024-01-31"}))
            .await
            .unwrap();

        assert_eq!(rows(&result)[0]["subscription"], "iCloud");
    }

    #[tokio::test]
    async fn test_summary_requires_both_dates() {
        let server = MockServer::start().await;
        let tool = SummaryTool::new(client_for(&server), SummaryKind::ByMonth);

        let err = tool
            .execute(serde_json::json!({"from_date": "2024-01-01"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("summary_by_month"));

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    #[test]
    fn test_schema_requires_dates() {
        let client = ExpenseLmClient::builder().build().unwrap();
        let schema = SummaryTool::new(client, SummaryKind::ByCategory).schema();

        assert_eq!(schema.name, "summary_by_category");
        assert_eq!(
            schema.input_schema["required"],
            serde_json::json!(["from_date", "to_date"])
        );
    }
}
