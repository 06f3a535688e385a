//! Expenses API endpoints.

use crate::client::ExpenseLmClient;
use crate::error::{ExpenseLmError, ExpenseLmResult};
use expenselm_core::{ExpenseImageData, ExpenseRecord};
use serde::{Deserialize, Serialize};

/// Largest page size accepted by the listing endpoints.
pub const MAX_LIMIT: u32 = 100;

/// Page size used when none is given.
pub const DEFAULT_LIMIT: u32 = 10;

/// Expenses API for listing and fetching expense records.
pub struct ExpensesApi<'a> {
    client: &'a ExpenseLmClient,
}

impl<'a> ExpensesApi<'a> {
    pub(crate) fn new(client: &'a ExpenseLmClient) -> Self {
        Self { client }
    }

    /// List expense records matching the query.
    pub async fn list(&self, query: &ExpenseQuery) -> ExpenseLmResult<Vec<ExpenseRecord>> {
        query.validate()?;
        self.client.http.get_with_query("/expenses/", query).await
    }

    /// Get a single expense by id.
    ///
    /// An unknown id surfaces as an API error carrying the remote status,
    /// never as an empty result.
    pub async fn get(&self, id: &str) -> ExpenseLmResult<ExpenseImageData> {
        if id.is_empty() {
            return Err(ExpenseLmError::InvalidInput(
                "expense id must not be empty".to_string(),
            ));
        }
        self.client.http.get_resource("/expenses/", id).await
    }
}

/// Pagination and filters shared by the expense listing endpoints.
///
/// Filters left unset (or empty) are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseQuery {
    /// Number of records to skip.
    #[serde(default)]
    pub skip: u32,
    /// Maximum number of records to return (1 to 100).
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Start date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "is_unset")]
    pub from_date: Option<String>,
    /// End date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "is_unset")]
    pub to_date: Option<String>,
    /// Text for semantic search.
    #[serde(default, skip_serializing_if = "is_unset")]
    pub text_input: Option<String>,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

impl ExpenseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn from_date(mut self, date: impl Into<String>) -> Self {
        self.from_date = Some(date.into());
        self
    }

    pub fn to_date(mut self, date: impl Into<String>) -> Self {
        self.to_date = Some(date.into());
        self
    }

    pub fn text_input(mut self, text: impl Into<String>) -> Self {
        self.text_input = Some(text.into());
        self
    }

    /// Reject parameters the API would refuse, before anything is sent.
    pub fn validate(&self) -> ExpenseLmResult<()> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ExpenseLmError::InvalidInput(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, self.limit
            )));
        }

        Ok(())
    }
}

impl Default for ExpenseQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            from_date: None,
            to_date: None,
            text_input: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expenselm_core::ExpenseType;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client_for(server: &MockServer) -> ExpenseLmClient {
        ExpenseLmClient::builder()
            .base_url(server.uri())
            .api_key("sk-test")
            .build()
            .unwrap()
    }

    fn query_pairs(request: &Request) -> Vec<(String, String)> {
        request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[tokio::test]
    async fn test_list_sends_only_pagination_by_default() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .expenses()
            .list(&ExpenseQuery::new().skip(20).limit(100))
            .await
            .unwrap();
        assert!(records.is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            query_pairs(&requests[0]),
            vec![pair("skip", "20"), pair("limit", "100")]
        );
    }

    #[tokio::test]
    async fn test_list_sends_supplied_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let query = ExpenseQuery::new()
            .from_date("2024-01-01")
            .text_input("coffee");
        client_for(&server).expenses().list(&query).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            query_pairs(&requests[0]),
            vec![
                pair("skip", "0"),
                pair("limit", "10"),
                pair("from_date", "2024-01-01"),
                pair("text_input", "coffee"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_skips_empty_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let query = ExpenseQuery::new().to_date("").text_input("");
        client_for(&server).expenses().list(&query).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            query_pairs(&requests[0]),
            vec![pair("skip", "0"), pair("limit", "10")]
        );
    }

    #[tokio::test]
    async fn test_list_forwards_short_text_input() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let query = ExpenseQuery::new().text_input("a");
        client_for(&server).expenses().list(&query).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(query_pairs(&requests[0]).contains(&pair("text_input", "a")));
    }

    #[tokio::test]
    async fn test_list_rejects_limit_out_of_range() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        for limit in [0, 101] {
            let result = client
                .expenses()
                .list(&ExpenseQuery::new().limit(limit))
                .await;
            assert!(matches!(result, Err(ExpenseLmError::InvalidInput(_))));
        }

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_list_returns_records_in_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "2", "image": null, "expense": {"shop_name": "B", "expense_type": "Subscription"}},
                {"id": "1", "image": {"image_type": "Receipt", "image_file_name": "a.jpg"}, "expense": null}
            ])))
            .mount(&server)
            .await;

        let records = client_for(&server)
            .expenses()
            .list(&ExpenseQuery::default())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "2");
        assert_eq!(
            records[0].expense.as_ref().unwrap().expense_type,
            ExpenseType::Subscription
        );
        assert_eq!(records[1].id, "1");
        assert!(records[1].expense.is_none());
    }

    #[tokio::test]
    async fn test_list_fails_whole_batch_on_bad_element() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "1"},
                {"id": "2", "expense": {"expense_type": "Recurring"}}
            ])))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .expenses()
            .list(&ExpenseQuery::default())
            .await;

        match result {
            Err(ExpenseLmError::Validation(err)) => {
                assert_eq!(err.path, "[1].expense.expense_type")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_expense() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expenses/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "image": {"image_type": "Receipt", "image_file_name": "abc123.jpg"},
                "expense": {"shop_name": "Bakery", "currency": "EUR", "total_amount": 7.2}
            })))
            .mount(&server)
            .await;

        let data = client_for(&server).expenses().get("abc123").await.unwrap();

        assert_eq!(data.image.unwrap().image_file_name, "abc123.jpg");
        let expense = data.expense.unwrap();
        assert_eq!(expense.shop_name, "Bakery");
        assert_eq!(expense.expense_category, "Misc");
        assert!(expense.items.is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_get_expense_not_found_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expenses/abc123"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "Expense not found"})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).expenses().get("abc123").await;

        match result {
            Err(ExpenseLmError::Api { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("Expense not found"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_expense_rejects_empty_id() {
        let client = ExpenseLmClient::builder().api_key("sk").build().unwrap();

        let result = client.expenses().get("").await;
        assert!(matches!(result, Err(ExpenseLmError::InvalidInput(_))));
    }

    #[test]
    fn test_query_validation() {
        assert!(ExpenseQuery::new().limit(1).validate().is_ok());
        assert!(ExpenseQuery::new().limit(100).validate().is_ok());
        assert!(ExpenseQuery::new().limit(0).validate().is_err());
        assert!(ExpenseQuery::new().limit(101).validate().is_err());
        assert!(ExpenseQuery::new().text_input("").validate().is_ok());
    }

    #[test]
    fn test_query_from_tool_arguments() {
        let query: ExpenseQuery =
            serde_json::from_value(serde_json::json!({"limit": 5, "to_date": null})).unwrap();

        assert_eq!(query, ExpenseQuery::new().limit(5));
    }
}
