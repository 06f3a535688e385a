//! Basic SDK usage example.
//!
//! Lists the latest expenses and this year's monthly totals.
//!
//! Run with: EXPENSELM_API_KEY=... cargo run --example basic_usage

use expenselm_sdk::{ClientConfig, DateRange, ExpenseLmClient, ExpenseLmResult, ExpenseQuery};

#[tokio::main]
async fn main() -> ExpenseLmResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let client = ExpenseLmClient::from_config(ClientConfig::from_env())?;

    println!("Latest expenses...");
    let records = client
        .expenses()
        .list(&ExpenseQuery::new().limit(5))
        .await?;
    for record in &records {
        match &record.expense {
            Some(expense) => println!(
                "  {} {} {} {:.2} ({})",
                record.id, expense.date, expense.currency, expense.total_amount, expense.shop_name
            ),
            None => println!("  {} (no extracted data)", record.id),
        }
    }

    println!("\nMonthly totals...");
    let stats = client
        .stats()
        .summary_by_month(&DateRange::new("2024-01-01", "2024-12-31"))
        .await?;
    for row in stats {
        println!("  {} {} {:.2}", row.month, row.currency, row.total_amount);
    }

    Ok(())
}
