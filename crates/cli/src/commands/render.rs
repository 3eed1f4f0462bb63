//! Terminal output for complaint commands.

#![allow(clippy::print_stdout)]

use complaint_hub_core::{Category, Complaint};

use super::{CommandError, OutputFormat};

/// Maximum description width in table output.
const DESCRIPTION_WIDTH: usize = 40;

pub fn registered(complaint: &Complaint) {
    println!(
        "Complaint registered successfully! Your complaint ID is: {}",
        complaint.complaint_id
    );
}

pub fn complaints(complaints: &[Complaint], format: OutputFormat) -> Result<(), CommandError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(complaints)?),
        OutputFormat::Table => print!("{}", table(complaints)),
    }
    Ok(())
}

pub fn categories(categories: &[Category]) {
    for category in categories {
        println!("{category}");
    }
}

fn table(complaints: &[Complaint]) -> String {
    if complaints.is_empty() {
        return "No complaints found.\n".to_string();
    }

    let id_width = complaints
        .iter()
        .map(|c| c.complaint_id.as_str().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    let mut out = format!(
        "{:<id_width$}  {:<8}  {:<15}  {:<10}  {:<20}  {}\n",
        "ID", "STATUS", "CATEGORY", "CREATED", "NAME", "DESCRIPTION"
    );
    for complaint in complaints {
        let created = complaint
            .created_date
            .date()
            .map_or_else(|| complaint.created_date.to_string(), |d| d.to_string());
        out.push_str(&format!(
            "{:<id_width$}  {:<8}  {:<15}  {:<10}  {:<20}  {}\n",
            complaint.complaint_id.as_str(),
            complaint.status.as_str(),
            complaint.category.label(),
            created,
            complaint.name,
            truncate(&complaint.description, DESCRIPTION_WIDTH),
        ));
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let cut: String = single_line.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}
