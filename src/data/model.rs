use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Row – one parsed CSV record
// ---------------------------------------------------------------------------

/// A single CSV record: flat, string-typed, keyed by column name.
/// Numeric and date columns stay as text until the point of use.
pub type Row = BTreeMap<String, String>;

/// Fetch a column from a row; a missing column reads as the empty string.
pub fn field<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}

/// Parse a numeric field. `None` is the sentinel for an unparseable value;
/// it is never coerced to zero so it cannot skew buckets or sorts.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an ISO `YYYY-MM-DD` date field. `None` for anything else.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Table – the eleven inventory tables
// ---------------------------------------------------------------------------

/// The fixed set of tables making up one inventory snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
    Vehicles,
    Makes,
    Models,
    Trims,
    Colors,
    Features,
    FuelTypes,
    TransmissionTypes,
    VehicleColors,
    VehicleFeatures,
    VehicleDocuments,
}

impl Table {
    pub const ALL: [Table; 11] = [
        Table::Vehicles,
        Table::Makes,
        Table::Models,
        Table::Trims,
        Table::Colors,
        Table::Features,
        Table::FuelTypes,
        Table::TransmissionTypes,
        Table::VehicleColors,
        Table::VehicleFeatures,
        Table::VehicleDocuments,
    ];

    /// File name of this table inside a dataset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Table::Vehicles => "vehicles.csv",
            Table::Makes => "makes.csv",
            Table::Models => "models.csv",
            Table::Trims => "trims.csv",
            Table::Colors => "colors.csv",
            Table::Features => "features.csv",
            Table::FuelTypes => "fuel-types.csv",
            Table::TransmissionTypes => "transmission-types.csv",
            Table::VehicleColors => "vehicle-colors.csv",
            Table::VehicleFeatures => "vehicle-features.csv",
            Table::VehicleDocuments => "vehicle-documents.csv",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Vehicles => "vehicles",
            Table::Makes => "makes",
            Table::Models => "models",
            Table::Trims => "trims",
            Table::Colors => "colors",
            Table::Features => "features",
            Table::FuelTypes => "fuel types",
            Table::TransmissionTypes => "transmission types",
            Table::VehicleColors => "vehicle colors",
            Table::VehicleFeatures => "vehicle features",
            Table::VehicleDocuments => "vehicle documents",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// VehicleDetails – the denormalized vehicle view
// ---------------------------------------------------------------------------

/// One vehicle joined with the human-readable names of all its dimensions
/// and its many-to-many colors, features and documents.
///
/// `fields` carries the vehicle row verbatim (serde-flattened on output);
/// the remaining members are synthesized by the join.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleDetails {
    #[serde(flatten)]
    pub fields: Row,
    pub make: String,
    pub model: String,
    pub trim: String,
    pub fuel_type: String,
    pub transmission: String,
    pub colors: Vec<String>,
    pub features: Vec<String>,
    pub documents: Vec<Row>,
}

impl VehicleDetails {
    pub fn id(&self) -> &str {
        field(&self.fields, "id")
    }

    pub fn year(&self) -> &str {
        field(&self.fields, "year")
    }

    pub fn price(&self) -> Option<f64> {
        parse_number(field(&self.fields, "price"))
    }

    pub fn mileage(&self) -> Option<f64> {
        parse_number(field(&self.fields, "mileage"))
    }
}

// ---------------------------------------------------------------------------
// Aggregation and sort vocabulary
// ---------------------------------------------------------------------------

/// One slice of an aggregation: a resolved label and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

impl LabelCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        LabelCount {
            label: label.into(),
            count,
        }
    }
}

/// One row of the "recent documents" listing.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    /// `"<Make> <Model> (<year>)"`, or `"Unknown Vehicle"` for a dangling id.
    pub vehicle: String,
    pub document_type: String,
    pub issue_date: String,
    pub expiry_date: String,
}

/// Which inventory column to sort on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Make,
    Model,
    Year,
    Price,
    Mileage,
    Transmission,
    FuelType,
    /// Any other column, compared as a raw string.
    Field(String),
}

impl SortKey {
    pub fn from_field(name: &str) -> Self {
        match name {
            "make" => SortKey::Make,
            "model" => SortKey::Model,
            "year" => SortKey::Year,
            "price" => SortKey::Price,
            "mileage" => SortKey::Mileage,
            "transmission" => SortKey::Transmission,
            "fuel_type" | "fuelType" => SortKey::FuelType,
            other => SortKey::Field(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// A complete sort request. Absence of one means "original load order".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: Direction,
}
