//! Subscriptions API endpoints.

use crate::api::expenses::ExpenseQuery;
use crate::client::ExpenseLmClient;
use crate::error::ExpenseLmResult;
use expenselm_core::ExpenseRecord;

/// Subscriptions API for recurring expenses.
pub struct SubscriptionsApi<'a> {
    client: &'a ExpenseLmClient,
}

impl<'a> SubscriptionsApi<'a> {
    pub(crate) fn new(client: &'a ExpenseLmClient) -> Self {
        Self { client }
    }

    /// List the latest expense records of subscription type.
    pub async fn list(&self, query: &ExpenseQuery) -> ExpenseLmResult<Vec<ExpenseRecord>> {
        query.validate()?;
        self.client.http.get_with_query("/subscriptions/", query).await
    }
}
