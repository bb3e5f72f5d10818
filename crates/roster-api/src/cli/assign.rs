//! Assignment CLI commands: create, list, show, update, delete.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use roster_core::repository::assignment::AssignmentFilter;
use roster_types::assignment::{
    Assignment, AssignmentId, AssignmentStatus, CreateAssignmentRequest, UpdateAssignmentRequest,
};

use super::AssignCommand;
use crate::state::AppState;

pub async fn run(state: &AppState, action: AssignCommand, json: bool) -> Result<()> {
    match action {
        AssignCommand::Create {
            freelancer,
            project,
            title,
            role,
            start,
            end,
            allocation,
            status,
            notes,
        } => {
            let request = CreateAssignmentRequest {
                freelancer_id: freelancer,
                project_id: project,
                project_title: title,
                role,
                start_date: start,
                end_date: end,
                allocation,
                status,
                notes,
            };
            let assignment = state.assignment_service.create(request).await?;
            state.persist().await?;
            print_saved(&assignment, "Assignment created", json)
        }

        AssignCommand::List {
            freelancer,
            project,
        } => {
            let filter = AssignmentFilter {
                freelancer_id: freelancer,
                project_id: project,
            };
            let rows = state.assignment_service.list(Some(filter)).await?;
            print_list(&rows, json)
        }

        AssignCommand::Show { id } => {
            let assignment = state.assignment_service.get(&parse_id(&id)?).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&assignment)?);
                return Ok(());
            }
            print_detail(&assignment);
            Ok(())
        }

        AssignCommand::Update {
            id,
            freelancer,
            project,
            title,
            role,
            start,
            end,
            allocation,
            status,
            notes,
        } => {
            let request = UpdateAssignmentRequest {
                freelancer_id: freelancer,
                project_id: project,
                project_title: title,
                role,
                start_date: start,
                end_date: end,
                allocation,
                status,
                notes,
            };
            let assignment = state
                .assignment_service
                .update(&parse_id(&id)?, request)
                .await?;
            state.persist().await?;
            print_saved(&assignment, "Assignment updated", json)
        }

        AssignCommand::Delete { id } => {
            let removed = state.assignment_service.delete(&parse_id(&id)?).await?;
            state.persist().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&removed)?);
                return Ok(());
            }
            println!(
                "  {} Deleted {} ({} on {})",
                style("✓").green().bold(),
                style(removed.id.to_string()).dim(),
                removed.freelancer_id,
                removed.project_title
            );
            Ok(())
        }
    }
}

fn parse_id(raw: &str) -> Result<AssignmentId> {
    raw.parse()
        .with_context(|| format!("'{raw}' is not a valid assignment id"))
}

fn print_saved(assignment: &Assignment, headline: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(assignment)?);
        return Ok(());
    }
    println!();
    println!("  {} {headline}", style("✓").green().bold());
    print_detail(assignment);
    Ok(())
}

fn print_detail(assignment: &Assignment) {
    println!();
    println!("  {}  {}", style("Freelancer:").bold(), style(&assignment.freelancer_id).cyan());
    println!(
        "  {}  {} ({})",
        style("Project:").bold(),
        assignment.project_title,
        style(&assignment.project_id).dim()
    );
    println!("  {}  {}", style("Role:").bold(), assignment.role);
    println!(
        "  {}  {} → {}",
        style("Dates:").bold(),
        assignment.start_date,
        assignment.end_date
    );
    println!("  {}  {}%", style("Allocation:").bold(), assignment.allocation);
    println!("  {}  {}", style("Status:").bold(), format_status(assignment.status));
    if let Some(notes) = &assignment.notes {
        println!("  {}  {notes}", style("Notes:").bold());
    }
    println!("  {}  {}", style("ID:").bold(), style(assignment.id.to_string()).dim());
    println!();
}

fn print_list(rows: &[Assignment], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("  No assignments found.");
        return Ok(());
    }
    println!("{}", assignment_table(rows));
    Ok(())
}

/// Table of assignments shared by `list` and `check`.
pub fn assignment_table(rows: &[Assignment]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "ID", "Freelancer", "Project", "Role", "Start", "End", "Alloc", "Status",
        ]);

    for a in rows {
        let short_id: String = a.id.to_string().chars().take(8).collect();
        table.add_row(vec![
            Cell::new(short_id).fg(Color::DarkGrey),
            Cell::new(&a.freelancer_id).fg(Color::Cyan),
            Cell::new(&a.project_title),
            Cell::new(&a.role),
            Cell::new(a.start_date),
            Cell::new(a.end_date),
            Cell::new(format!("{}%", a.allocation)),
            Cell::new(a.status).fg(status_color(a.status)),
        ]);
    }
    table
}

fn status_color(status: AssignmentStatus) -> Color {
    match status {
        AssignmentStatus::Active => Color::Green,
        AssignmentStatus::Confirmed => Color::Blue,
        AssignmentStatus::Tentative => Color::Yellow,
    }
}

fn format_status(status: AssignmentStatus) -> String {
    match status {
        AssignmentStatus::Active => style("active").green().to_string(),
        AssignmentStatus::Confirmed => style("confirmed").blue().to_string(),
        AssignmentStatus::Tentative => style("tentative").yellow().to_string(),
    }
}
