//! `roster check`: availability of a freelancer for a proposed booking.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use console::style;

use roster_types::assignment::AssignmentId;
use roster_types::availability::AvailabilityQuery;

use super::assign::assignment_table;
use crate::state::AppState;

pub async fn run(
    state: &AppState,
    freelancer: String,
    start: NaiveDate,
    end: NaiveDate,
    allocation: Option<f64>,
    exclude: Option<String>,
    json: bool,
) -> Result<()> {
    let allocation = allocation.unwrap_or(state.config.availability.default_allocation);
    let mut query = AvailabilityQuery::new(freelancer, start, end).with_allocation(allocation);
    if let Some(raw) = exclude {
        let id: AssignmentId = raw
            .parse()
            .with_context(|| format!("'{raw}' is not a valid assignment id"))?;
        query = query.excluding(id);
    }

    let result = state
        .assignment_service
        .availability()
        .check_conflicts(&query)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if result.is_available {
        println!(
            "  {} {} can take {}% from {} to {}",
            style("✓").green().bold(),
            style(&query.freelancer_id).cyan(),
            query.requested_allocation,
            query.start_date,
            query.end_date
        );
        println!();
        return Ok(());
    }

    println!(
        "  {} {}",
        style("✗").red().bold(),
        result.reason.as_deref().unwrap_or("Not available")
    );
    println!();
    println!("{}", assignment_table(&result.conflicting_assignments));
    Ok(())
}
