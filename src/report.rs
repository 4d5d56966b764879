use std::fmt::Write;

use serde::Serialize;

use crate::data::engine;
use crate::data::model::{DocumentSummary, LabelCount, SortSpec, VehicleDetails};
use crate::data::store::{DatasetError, DatasetStore};

// ---------------------------------------------------------------------------
// Dashboard payload – everything the views need, as plain data
// ---------------------------------------------------------------------------

/// The complete dashboard payload: one entry per tab of the report.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub make_stats: Vec<LabelCount>,
    pub price_stats: Vec<LabelCount>,
    pub fuel_type_stats: Vec<LabelCount>,
    pub top_models: Vec<LabelCount>,
    pub color_stats: Vec<LabelCount>,
    pub transmission_stats: Vec<LabelCount>,
    pub trim_stats: Vec<LabelCount>,
    pub document_stats: Vec<LabelCount>,
    pub recent_documents: Vec<DocumentSummary>,
    pub inventory: Vec<VehicleDetails>,
}

/// Assemble the full payload from the current snapshot.
pub fn dashboard(
    store: &DatasetStore,
    sort: Option<&SortSpec>,
) -> Result<Dashboard, DatasetError> {
    Ok(Dashboard {
        make_stats: engine::vehicles_by_make(store),
        price_stats: engine::price_distribution(store),
        fuel_type_stats: engine::vehicles_by_fuel_type(store),
        top_models: engine::top_models(store),
        color_stats: engine::colors_in_use(store),
        transmission_stats: engine::vehicles_by_transmission(store),
        trim_stats: engine::vehicles_by_trim(store),
        document_stats: engine::documents_by_type(store),
        recent_documents: engine::recent_documents(store, 10),
        inventory: engine::inventory(store, sort)?,
    })
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Render the dashboard as a plain-text report.
pub fn render(store: &DatasetStore, sort: Option<&SortSpec>) -> Result<String, DatasetError> {
    let dash = dashboard(store, sort)?;
    let mut out = String::new();

    heading(&mut out, "Vehicle Inventory Dashboard");

    heading(&mut out, "Overview");
    counts_section(&mut out, "Vehicles by Make", &dash.make_stats);
    counts_section(&mut out, "Price Distribution", &dash.price_stats);
    counts_section(&mut out, "Fuel Type Distribution", &dash.fuel_type_stats);
    counts_section(&mut out, "Top 10 Models", &dash.top_models);

    heading(&mut out, "Inventory");
    inventory_section(&mut out, &dash.inventory);

    heading(&mut out, "Colors");
    counts_section(&mut out, "Vehicle Colors Distribution", &dash.color_stats);

    heading(&mut out, "Transmissions");
    counts_section(
        &mut out,
        "Transmission Types Distribution",
        &dash.transmission_stats,
    );

    heading(&mut out, "Trims");
    counts_section(&mut out, "Vehicle Trims Distribution", &dash.trim_stats);

    heading(&mut out, "Documents");
    documents_section(&mut out, store, &dash);

    Ok(out)
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n=== {title} ===");
}

fn counts_section(out: &mut String, title: &str, counts: &[LabelCount]) {
    let _ = writeln!(out, "\n{title}");
    if counts.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }
    let width = counts.iter().map(|c| c.label.len()).max().unwrap_or(0);
    for entry in counts {
        let _ = writeln!(out, "  {:<width$}  {}", entry.label, entry.count);
    }
}

fn inventory_section(out: &mut String, inventory: &[VehicleDetails]) {
    if inventory.is_empty() {
        let _ = writeln!(out, "\n  (no vehicles)");
        return;
    }
    let _ = writeln!(
        out,
        "\n  {:<14} {:<14} {:<6} {:>10} {:>12}  {:<14} {:<12}",
        "Make", "Model", "Year", "Price", "Mileage", "Transmission", "Fuel Type"
    );
    for vehicle in inventory {
        let _ = writeln!(
            out,
            "  {:<14} {:<14} {:<6} {:>10} {:>12}  {:<14} {:<12}",
            vehicle.make,
            vehicle.model,
            vehicle.year(),
            money(vehicle.price()),
            miles(vehicle.mileage()),
            vehicle.transmission,
            vehicle.fuel_type,
        );
    }
}

fn documents_section(out: &mut String, store: &DatasetStore, dash: &Dashboard) {
    let _ = writeln!(out, "\nDocument Types");
    for entry in &dash.document_stats {
        let latest = engine::latest_issue_date(store, &entry.label)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(
            out,
            "  {:<16} {:>4}   latest issue: {latest}",
            entry.label, entry.count
        );
    }
    let _ = writeln!(out, "\nRecent Documents");
    for doc in &dash.recent_documents {
        let _ = writeln!(
            out,
            "  {:<26} {:<14} issued {:<12} expires {}",
            doc.vehicle,
            doc.document_type,
            blank_as(&doc.issue_date, "N/A"),
            blank_as(&doc.expiry_date, "N/A"),
        );
    }
}

/// `"$18,500"` for a parsed price, `"N/A"` for the sentinel.
fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", group_thousands(v)),
        None => "N/A".to_string(),
    }
}

/// `"42,000 mi"` for a parsed mileage, `"N/A"` for the sentinel.
fn miles(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} mi", group_thousands(v)),
        None => "N/A".to_string(),
    }
}

fn blank_as<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.is_empty() {
        fallback
    } else {
        s
    }
}

/// Group the integer part of a number with comma separators.
fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
