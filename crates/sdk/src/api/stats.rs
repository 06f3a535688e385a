//! Statistics API endpoints.

use crate::client::ExpenseLmClient;
use crate::error::ExpenseLmResult;
use expenselm_core::{CategoryCurAmtStatItem, MonthCurAmtStatItem, SubscriptionCurAmtStatItem};
use serde::{Deserialize, Serialize};

/// Statistics API for spending totals grouped by currency.
///
/// Dates are passed through as given; the API rejects malformed ones.
pub struct StatsApi<'a> {
    client: &'a ExpenseLmClient,
}

impl<'a> StatsApi<'a> {
    pub(crate) fn new(client: &'a ExpenseLmClient) -> Self {
        Self { client }
    }

    /// Totals per month (YYYY-MM) and currency over the period.
    pub async fn summary_by_month(
        &self,
        range: &DateRange,
    ) -> ExpenseLmResult<Vec<MonthCurAmtStatItem>> {
        self.client
            .http
            .get_with_query("/stats/summary-by-month-by-currency", range)
            .await
    }

    /// Totals per expense category and currency over the period.
    pub async fn summary_by_category(
        &self,
        range: &DateRange,
    ) -> ExpenseLmResult<Vec<CategoryCurAmtStatItem>> {
        self.client
            .http
            .get_with_query("/stats/summary-by-category-by-currency", range)
            .await
    }

    /// Totals per subscription and currency over the period.
    pub async fn summary_by_subscription(
        &self,
        range: &DateRange,
    ) -> ExpenseLmResult<Vec<SubscriptionCurAmtStatItem>> {
        self.client
            .http
            .get_with_query("/stats/summary-by-subscription-by-currency", range)
            .await
    }
}

/// Inclusive period for the statistics endpoints (YYYY-MM-DD).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from_date: String,
    pub to_date: String,
}

impl DateRange {
    pub fn new(from_date: impl Into<String>, to_date: impl Into<String>) -> Self {
        Self {
            from_date: from_date.into(),
            to_date: to_date.into(),
        }
    }
}
