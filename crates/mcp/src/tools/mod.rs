pub mod expenses;
pub mod stats;
mod registry;

pub use expenses::{GetExpenseTool, ListExpensesTool, ListSubscriptionExpensesTool};
pub use stats::{SummaryKind, SummaryTool};
pub use registry::{
    json_schema_integer, json_schema_object, json_schema_string, Tool, ToolRegistry,
};

use expenselm_sdk::ExpenseLmClient;
use std::sync::Arc;

/// Registry holding every ExpenseLM tool, all sharing one client.
pub fn expense_tool_registry(client: ExpenseLmClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(ListExpensesTool::new(client.clone())));
    registry.register(Arc::new(GetExpenseTool::new(client.clone())));
    registry.register(Arc::new(ListSubscriptionExpensesTool::new(client.clone())));
    registry.register(Arc::new(SummaryTool::new(client.clone(), SummaryKind::ByMonth)));
    registry.register(Arc::new(SummaryTool::new(client.clone(), SummaryKind::ByCategory)));
    registry.register(Arc::new(SummaryTool::new(client, SummaryKind::BySubscription)));

    registry
}
