use std::cmp::Ordering;

use chrono::NaiveDate;

use super::model::{
    field, parse_date, parse_number, Direction, DocumentSummary, LabelCount, Row, SortKey,
    SortSpec, Table, VehicleDetails,
};
use super::store::{DatasetError, DatasetStore};

// ---------------------------------------------------------------------------
// Foreign-key resolution
// ---------------------------------------------------------------------------

/// Outcome of resolving a foreign key to a dimension name. Kept as a tagged
/// value so each consumer decides once how an unresolved link participates:
/// detail views substitute a fixed sentinel label, aggregations bucket it as
/// "Unknown", per-vehicle color/feature lists drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Name(String),
    Unknown,
}

impl Resolved {
    /// The resolved name, or the given sentinel label.
    pub fn or_label(self, sentinel: &str) -> String {
        match self {
            Resolved::Name(name) => name,
            Resolved::Unknown => sentinel.to_string(),
        }
    }

    /// The resolved name, or nothing (drop policy).
    pub fn ok(self) -> Option<String> {
        match self {
            Resolved::Name(name) => Some(name),
            Resolved::Unknown => None,
        }
    }
}

/// Look up the `name` of a dimension row by id. A missing table, a dangling
/// id or an empty name all resolve to `Unknown`.
pub fn resolve_name(store: &DatasetStore, table: Table, id: &str) -> Resolved {
    match store.find_by_id(table, id) {
        Some(row) => {
            let name = field(row, "name");
            if name.is_empty() {
                Resolved::Unknown
            } else {
                Resolved::Name(name.to_string())
            }
        }
        None => Resolved::Unknown,
    }
}

// ---------------------------------------------------------------------------
// Denormalized vehicle view
// ---------------------------------------------------------------------------

/// Join one vehicle with all of its dimensions.
///
/// `Err(NotLoaded)` before the first `load`; `Ok(None)` when no vehicle has
/// that id (a legitimate outcome, callers must check). Unresolved dimension
/// links degrade to `"Unknown <Thing>"`; unresolved colors and features are
/// dropped from their lists rather than labelled.
pub fn vehicle_details(
    store: &DatasetStore,
    vehicle_id: &str,
) -> Result<Option<VehicleDetails>, DatasetError> {
    if !store.is_loaded() {
        return Err(DatasetError::NotLoaded);
    }
    let Some(vehicle) = store.find_by_id(Table::Vehicles, vehicle_id) else {
        return Ok(None);
    };
    Ok(Some(join_vehicle(store, vehicle)))
}

/// The join itself, shared by `vehicle_details` and `inventory`.
fn join_vehicle(store: &DatasetStore, vehicle: &Row) -> VehicleDetails {
    let vehicle_id = field(vehicle, "id");

    let make =
        resolve_name(store, Table::Makes, field(vehicle, "make_id")).or_label("Unknown Make");
    let model =
        resolve_name(store, Table::Models, field(vehicle, "model_id")).or_label("Unknown Model");
    let trim =
        resolve_name(store, Table::Trims, field(vehicle, "trim_id")).or_label("Unknown Trim");
    let fuel_type = resolve_name(store, Table::FuelTypes, field(vehicle, "fuel_type_id"))
        .or_label("Unknown Fuel Type");
    let transmission = resolve_name(
        store,
        Table::TransmissionTypes,
        field(vehicle, "transmission_type_id"),
    )
    .or_label("Unknown Transmission");

    let colors = join_names(
        store,
        Table::VehicleColors,
        Table::Colors,
        "color_id",
        vehicle_id,
    );
    let features = join_names(
        store,
        Table::VehicleFeatures,
        Table::Features,
        "feature_id",
        vehicle_id,
    );

    let documents: Vec<Row> = store
        .filter(Table::VehicleDocuments, |doc| {
            field(doc, "vehicle_id") == vehicle_id
        })
        .into_iter()
        .cloned()
        .collect();

    VehicleDetails {
        fields: vehicle.clone(),
        make,
        model,
        trim,
        fuel_type,
        transmission,
        colors,
        features,
        documents,
    }
}

/// Walk a many-to-many join table for one vehicle and map each link through
/// its dimension table. Unresolved links are dropped silently.
fn join_names(
    store: &DatasetStore,
    join_table: Table,
    dim_table: Table,
    fk_column: &str,
    vehicle_id: &str,
) -> Vec<String> {
    store
        .rows(join_table)
        .iter()
        .filter(|link| field(link, "vehicle_id") == vehicle_id)
        .filter_map(|link| resolve_name(store, dim_table, field(link, fk_column)).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Inventory listing
// ---------------------------------------------------------------------------

/// The denormalized listing of every vehicle, optionally sorted.
///
/// Every row is joined exactly once up front and the sort runs over the
/// cached views, so a sort costs one pass of joins instead of one per
/// comparison. `None` keeps the original load order.
pub fn inventory(
    store: &DatasetStore,
    sort: Option<&SortSpec>,
) -> Result<Vec<VehicleDetails>, DatasetError> {
    if !store.is_loaded() {
        return Err(DatasetError::NotLoaded);
    }
    let mut views: Vec<VehicleDetails> = store
        .rows(Table::Vehicles)
        .iter()
        .map(|vehicle| join_vehicle(store, vehicle))
        .collect();

    if let Some(spec) = sort {
        // Vec::sort_by is stable, so re-sorting a sorted listing is a no-op.
        views.sort_by(|a, b| compare_views(a, b, &spec.key, spec.direction));
    }
    Ok(views)
}

fn compare_views(
    a: &VehicleDetails,
    b: &VehicleDetails,
    key: &SortKey,
    direction: Direction,
) -> Ordering {
    let ascending = match key {
        SortKey::Make => a.make.cmp(&b.make),
        SortKey::Model => a.model.cmp(&b.model),
        SortKey::Transmission => a.transmission.cmp(&b.transmission),
        SortKey::FuelType => a.fuel_type.cmp(&b.fuel_type),
        SortKey::Year => {
            return compare_numeric(parse_number(a.year()), parse_number(b.year()), direction)
        }
        SortKey::Price => return compare_numeric(a.price(), b.price(), direction),
        SortKey::Mileage => return compare_numeric(a.mileage(), b.mileage(), direction),
        SortKey::Field(name) => field(&a.fields, name).cmp(field(&b.fields, name)),
    };
    match direction {
        Direction::Ascending => ascending,
        Direction::Descending => ascending.reverse(),
    }
}

/// Unparseable values order after every number in BOTH directions, so bad
/// rows collect at the end of the listing instead of silently comparing
/// equal (or, worse, leading a descending sort). Only the comparison
/// between two parsed numbers flips with the direction.
fn compare_numeric(a: Option<f64>, b: Option<f64>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match direction {
            Direction::Ascending => x.total_cmp(&y),
            Direction::Descending => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Aggregations – counts per resolved dimension label
// ---------------------------------------------------------------------------

/// Increment a label's count, keeping first-encounter order of labels.
fn bump(counts: &mut Vec<LabelCount>, label: String) {
    match counts.iter_mut().find(|entry| entry.label == label) {
        Some(entry) => entry.count += 1,
        None => counts.push(LabelCount::new(label, 1)),
    }
}

/// Count every vehicle under the resolved name of one dimension column.
/// Dangling or missing foreign keys land in an "Unknown" bucket.
fn count_vehicles_by(store: &DatasetStore, fk_column: &str, dim_table: Table) -> Vec<LabelCount> {
    let mut counts = Vec::new();
    for vehicle in store.rows(Table::Vehicles) {
        let label = resolve_name(store, dim_table, field(vehicle, fk_column)).or_label("Unknown");
        bump(&mut counts, label);
    }
    counts
}

pub fn vehicles_by_make(store: &DatasetStore) -> Vec<LabelCount> {
    count_vehicles_by(store, "make_id", Table::Makes)
}

pub fn vehicles_by_fuel_type(store: &DatasetStore) -> Vec<LabelCount> {
    count_vehicles_by(store, "fuel_type_id", Table::FuelTypes)
}

pub fn vehicles_by_transmission(store: &DatasetStore) -> Vec<LabelCount> {
    count_vehicles_by(store, "transmission_type_id", Table::TransmissionTypes)
}

pub fn vehicles_by_trim(store: &DatasetStore) -> Vec<LabelCount> {
    count_vehicles_by(store, "trim_id", Table::Trims)
}

/// The ten most common models, descending by count. The stable sort keeps
/// first-encounter order between models with equal counts.
pub fn top_models(store: &DatasetStore) -> Vec<LabelCount> {
    let mut counts = count_vehicles_by(store, "model_id", Table::Models);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(10);
    counts
}

/// Color usage counted over the VehicleColor join rows, so a three-color
/// vehicle contributes three counts.
pub fn colors_in_use(store: &DatasetStore) -> Vec<LabelCount> {
    let mut counts = Vec::new();
    for link in store.rows(Table::VehicleColors) {
        let label = resolve_name(store, Table::Colors, field(link, "color_id")).or_label("Unknown");
        bump(&mut counts, label);
    }
    counts
}

/// Document counts per `document_type`, descending by count.
pub fn documents_by_type(store: &DatasetStore) -> Vec<LabelCount> {
    let mut counts = Vec::new();
    for doc in store.rows(Table::VehicleDocuments) {
        let doc_type = field(doc, "document_type");
        let label = if doc_type.is_empty() {
            "Unknown".to_string()
        } else {
            doc_type.to_string()
        };
        bump(&mut counts, label);
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Price bucket boundaries, inclusive on the upper end.
const PRICE_BUCKETS: [(&str, f64); 4] = [
    ("0-10k", 10_000.0),
    ("10k-20k", 20_000.0),
    ("20k-30k", 30_000.0),
    ("30k-40k", 40_000.0),
];

/// Vehicle counts per fixed price bucket. All five ranges are always
/// emitted, zero counts included. A vehicle whose price does not parse goes
/// to a trailing "Unknown" bucket (emitted only when non-empty) instead of
/// leaking into "40k+".
pub fn price_distribution(store: &DatasetStore) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = PRICE_BUCKETS
        .iter()
        .map(|(label, _)| LabelCount::new(*label, 0))
        .collect();
    counts.push(LabelCount::new("40k+", 0));
    let mut unknown = 0usize;

    for vehicle in store.rows(Table::Vehicles) {
        match parse_number(field(vehicle, "price")) {
            Some(price) => {
                let idx = PRICE_BUCKETS
                    .iter()
                    .position(|(_, upper)| price <= *upper)
                    .unwrap_or(PRICE_BUCKETS.len());
                counts[idx].count += 1;
            }
            None => unknown += 1,
        }
    }

    if unknown > 0 {
        counts.push(LabelCount::new("Unknown", unknown));
    }
    counts
}

// ---------------------------------------------------------------------------
// Document listings
// ---------------------------------------------------------------------------

/// The `limit` newest documents by issue date, newest first. Dates compare
/// chronologically; rows with an unparseable issue date come last.
pub fn recent_documents(store: &DatasetStore, limit: usize) -> Vec<DocumentSummary> {
    let mut docs: Vec<&Row> = store.rows(Table::VehicleDocuments).iter().collect();
    docs.sort_by(|a, b| {
        let da = parse_date(field(a, "issue_date"));
        let db = parse_date(field(b, "issue_date"));
        // Descending: newest first, None after every date.
        compare_dates_desc(da, db)
    });
    docs.truncate(limit);
    docs.iter().map(|doc| summarize_document(store, doc)).collect()
}

fn compare_dates_desc(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn summarize_document(store: &DatasetStore, doc: &Row) -> DocumentSummary {
    let vehicle = match store.find_by_id(Table::Vehicles, field(doc, "vehicle_id")) {
        Some(vehicle) => {
            let make = resolve_name(store, Table::Makes, field(vehicle, "make_id"))
                .or_label("Unknown");
            let model = resolve_name(store, Table::Models, field(vehicle, "model_id"))
                .or_label("Unknown");
            format!("{make} {model} ({})", field(vehicle, "year"))
        }
        None => "Unknown Vehicle".to_string(),
    };
    DocumentSummary {
        vehicle,
        document_type: field(doc, "document_type").to_string(),
        issue_date: field(doc, "issue_date").to_string(),
        expiry_date: field(doc, "expiry_date").to_string(),
    }
}

/// Newest parseable issue date among documents of one type.
pub fn latest_issue_date(store: &DatasetStore, document_type: &str) -> Option<NaiveDate> {
    store
        .rows(Table::VehicleDocuments)
        .iter()
        .filter(|doc| field(doc, "document_type") == document_type)
        .filter_map(|doc| parse_date(field(doc, "issue_date")))
        .max()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::super::model::Direction;
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// A small but complete snapshot: three vehicles, one dangling trim FK,
    /// one dangling color link, one unparseable price.
    fn sample_store() -> DatasetStore {
        let mut tables = BTreeMap::new();
        tables.insert(
            Table::Vehicles,
            vec![
                row(&[
                    ("id", "v1"),
                    ("make_id", "m1"),
                    ("model_id", "mo1"),
                    ("trim_id", "t1"),
                    ("fuel_type_id", "f1"),
                    ("transmission_type_id", "tr1"),
                    ("year", "2020"),
                    ("price", "10000"),
                    ("mileage", "42000"),
                ]),
                row(&[
                    ("id", "v2"),
                    ("make_id", "m1"),
                    ("model_id", "mo2"),
                    ("trim_id", "missing"),
                    ("fuel_type_id", "f2"),
                    ("transmission_type_id", "tr1"),
                    ("year", "2018"),
                    ("price", "10000.01"),
                    ("mileage", "88000"),
                ]),
                row(&[
                    ("id", "v3"),
                    ("make_id", "m2"),
                    ("model_id", "mo1"),
                    ("trim_id", "t1"),
                    ("fuel_type_id", "f1"),
                    ("transmission_type_id", "tr2"),
                    ("year", "2022"),
                    ("price", "call us"),
                    ("mileage", "5000"),
                ]),
            ],
        );
        tables.insert(
            Table::Makes,
            vec![
                row(&[("id", "m1"), ("name", "Toyota")]),
                row(&[("id", "m2"), ("name", "Honda")]),
            ],
        );
        tables.insert(
            Table::Models,
            vec![
                row(&[("id", "mo1"), ("name", "Corolla"), ("make_id", "m1")]),
                row(&[("id", "mo2"), ("name", "Camry"), ("make_id", "m1")]),
            ],
        );
        tables.insert(
            Table::Trims,
            vec![row(&[("id", "t1"), ("name", "LE"), ("model_id", "mo1")])],
        );
        tables.insert(
            Table::Colors,
            vec![
                row(&[("id", "c1"), ("name", "Red")]),
                row(&[("id", "c2"), ("name", "Black")]),
            ],
        );
        tables.insert(
            Table::Features,
            vec![row(&[("id", "fe1"), ("name", "Sunroof")])],
        );
        tables.insert(
            Table::FuelTypes,
            vec![
                row(&[("id", "f1"), ("name", "Gasoline")]),
                row(&[("id", "f2"), ("name", "Hybrid")]),
            ],
        );
        tables.insert(
            Table::TransmissionTypes,
            vec![
                row(&[("id", "tr1"), ("name", "Automatic")]),
                row(&[("id", "tr2"), ("name", "Manual")]),
            ],
        );
        tables.insert(
            Table::VehicleColors,
            vec![
                row(&[("vehicle_id", "v1"), ("color_id", "c1")]),
                row(&[("vehicle_id", "v1"), ("color_id", "c2")]),
                row(&[("vehicle_id", "v2"), ("color_id", "c1")]),
                // dangling color link, dropped in detail, "Unknown" in stats
                row(&[("vehicle_id", "v1"), ("color_id", "ghost")]),
            ],
        );
        tables.insert(
            Table::VehicleFeatures,
            vec![row(&[("vehicle_id", "v1"), ("feature_id", "fe1")])],
        );
        tables.insert(
            Table::VehicleDocuments,
            vec![
                row(&[
                    ("vehicle_id", "v1"),
                    ("document_type", "Registration"),
                    ("document_number", "R-100"),
                    ("issue_date", "2023-06-01"),
                    ("expiry_date", "2024-06-01"),
                ]),
                row(&[
                    ("vehicle_id", "v2"),
                    ("document_type", "Registration"),
                    ("document_number", "R-101"),
                    ("issue_date", "2023-11-12"),
                    ("expiry_date", "2024-11-12"),
                ]),
                row(&[
                    ("vehicle_id", "v1"),
                    ("document_type", "Registration"),
                    ("document_number", "R-102"),
                    ("issue_date", "2022-01-30"),
                    ("expiry_date", "2023-01-30"),
                ]),
                row(&[
                    ("vehicle_id", "v3"),
                    ("document_type", "Insurance"),
                    ("document_number", "I-200"),
                    ("issue_date", "2024-02-20"),
                    ("expiry_date", "2025-02-20"),
                ]),
                row(&[
                    ("vehicle_id", "v3"),
                    ("document_type", "Insurance"),
                    ("document_number", "I-201"),
                    ("issue_date", "not a date"),
                    ("expiry_date", ""),
                ]),
            ],
        );

        let mut store = DatasetStore::new();
        store.load(tables);
        store
    }

    #[test]
    fn details_resolve_every_dimension() {
        let store = sample_store();
        let details = vehicle_details(&store, "v1").unwrap().unwrap();
        assert_eq!(details.make, "Toyota");
        assert_eq!(details.model, "Corolla");
        assert_eq!(details.trim, "LE");
        assert_eq!(details.fuel_type, "Gasoline");
        assert_eq!(details.transmission, "Automatic");
        assert_eq!(details.colors, vec!["Red", "Black"]);
        assert_eq!(details.features, vec!["Sunroof"]);
        assert_eq!(details.documents.len(), 2);
        // original vehicle fields pass through verbatim
        assert_eq!(field(&details.fields, "mileage"), "42000");
    }

    #[test]
    fn dangling_dimension_gets_sentinel_label() {
        let store = sample_store();
        let details = vehicle_details(&store, "v2").unwrap().unwrap();
        assert_eq!(details.trim, "Unknown Trim");
    }

    #[test]
    fn dangling_color_link_is_dropped_from_detail() {
        let store = sample_store();
        let details = vehicle_details(&store, "v1").unwrap().unwrap();
        assert!(!details.colors.iter().any(|c| c == "Unknown"));
        assert_eq!(details.colors.len(), 2);
    }

    #[test]
    fn unknown_vehicle_id_is_none_not_error() {
        let store = sample_store();
        assert!(vehicle_details(&store, "nope").unwrap().is_none());
    }

    #[test]
    fn querying_before_load_is_a_contract_error() {
        let store = DatasetStore::new();
        assert_eq!(
            vehicle_details(&store, "v1").unwrap_err(),
            DatasetError::NotLoaded
        );
        assert_eq!(inventory(&store, None).unwrap_err(), DatasetError::NotLoaded);
    }

    #[test]
    fn missing_dimension_table_degrades_to_sentinels() {
        let mut store = sample_store();
        let mut tables = BTreeMap::new();
        tables.insert(
            Table::Vehicles,
            vec![row(&[("id", "v1"), ("make_id", "m1")])],
        );
        store.load(tables);
        let details = vehicle_details(&store, "v1").unwrap().unwrap();
        assert_eq!(details.make, "Unknown Make");
        assert_eq!(details.fuel_type, "Unknown Fuel Type");
        assert!(details.colors.is_empty());
        assert!(details.documents.is_empty());
    }

    #[test]
    fn make_counts_sum_to_vehicle_rows() {
        let store = sample_store();
        let counts = vehicles_by_make(&store);
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, store.len(Table::Vehicles));
        assert_eq!(counts[0], LabelCount::new("Toyota", 2));
        assert_eq!(counts[1], LabelCount::new("Honda", 1));
    }

    #[test]
    fn dangling_trim_counts_in_unknown_bucket() {
        let store = sample_store();
        let counts = vehicles_by_trim(&store);
        let unknown = counts.iter().find(|c| c.label == "Unknown").unwrap();
        assert_eq!(unknown.count, 1);
    }

    #[test]
    fn color_counts_are_per_join_row() {
        let store = sample_store();
        let counts = colors_in_use(&store);
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, store.len(Table::VehicleColors));
        let red = counts.iter().find(|c| c.label == "Red").unwrap();
        assert_eq!(red.count, 2);
        let unknown = counts.iter().find(|c| c.label == "Unknown").unwrap();
        assert_eq!(unknown.count, 1);
    }

    #[test]
    fn document_type_counts() {
        let store = sample_store();
        let counts = documents_by_type(&store);
        assert_eq!(counts[0], LabelCount::new("Registration", 3));
        assert_eq!(counts[1], LabelCount::new("Insurance", 2));
    }

    #[test]
    fn price_buckets_are_inclusive_on_the_upper_bound() {
        let store = sample_store();
        let counts = price_distribution(&store);
        let get = |label: &str| counts.iter().find(|c| c.label == label).unwrap().count;
        // exactly 10000 stays in the first bucket; 10000.01 crosses over
        assert_eq!(get("0-10k"), 1);
        assert_eq!(get("10k-20k"), 1);
        assert_eq!(get("20k-30k"), 0);
        assert_eq!(get("Unknown"), 1);
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, store.len(Table::Vehicles));
    }

    #[test]
    fn price_buckets_omit_unknown_when_all_prices_parse() {
        let mut store = sample_store();
        let mut tables = BTreeMap::new();
        tables.insert(
            Table::Vehicles,
            vec![row(&[("id", "v1"), ("price", "45000")])],
        );
        store.load(tables);
        let counts = price_distribution(&store);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts[4], LabelCount::new("40k+", 1));
    }

    #[test]
    fn top_models_truncates_to_ten_with_stable_ties() {
        let mut tables = BTreeMap::new();
        let mut vehicles = Vec::new();
        let mut models = Vec::new();
        // 15 distinct models; model 0 appears twice, the rest once
        for i in 0..15 {
            let model_id = format!("mo{i}");
            let model_name = format!("Model {i:02}");
            let vehicle_id = format!("v{i}");
            models.push(row(&[
                ("id", model_id.as_str()),
                ("name", model_name.as_str()),
            ]));
            vehicles.push(row(&[
                ("id", vehicle_id.as_str()),
                ("model_id", model_id.as_str()),
            ]));
        }
        vehicles.push(row(&[("id", "v15"), ("model_id", "mo0")]));
        tables.insert(Table::Vehicles, vehicles);
        tables.insert(Table::Models, models);
        let mut store = DatasetStore::new();
        store.load(tables);

        let top = top_models(&store);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], LabelCount::new("Model 00", 2));
        // equal counts keep first-encounter order
        assert_eq!(top[1].label, "Model 01");
        assert_eq!(top[9].label, "Model 09");
    }

    #[test]
    fn inventory_sorts_year_both_directions() {
        let store = sample_store();
        let years = |sort: SortSpec| {
            inventory(&store, Some(&sort))
                .unwrap()
                .iter()
                .map(|v| v.year().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(
            years(SortSpec {
                key: SortKey::Year,
                direction: Direction::Ascending,
            }),
            vec!["2018", "2020", "2022"]
        );
        assert_eq!(
            years(SortSpec {
                key: SortKey::Year,
                direction: Direction::Descending,
            }),
            vec!["2022", "2020", "2018"]
        );
    }

    #[test]
    fn unparseable_price_sorts_to_the_end() {
        let store = sample_store();
        let sort = SortSpec {
            key: SortKey::Price,
            direction: Direction::Ascending,
        };
        let listing = inventory(&store, Some(&sort)).unwrap();
        assert_eq!(listing.last().unwrap().id(), "v3");
    }

    #[test]
    fn unparseable_price_stays_last_in_descending_sort() {
        // v3's "call us" price must not lead the listing when the
        // direction flips; the priced vehicles reverse around it.
        let store = sample_store();
        let sort = SortSpec {
            key: SortKey::Price,
            direction: Direction::Descending,
        };
        let listing = inventory(&store, Some(&sort)).unwrap();
        let ids: Vec<&str> = listing.iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec!["v2", "v1", "v3"]);
    }

    #[test]
    fn resorting_a_sorted_listing_is_identical() {
        let store = sample_store();
        let sort = SortSpec {
            key: SortKey::Make,
            direction: Direction::Ascending,
        };
        let once = inventory(&store, Some(&sort)).unwrap();
        let ids: Vec<&str> = once.iter().map(|v| v.id()).collect();
        let twice = inventory(&store, Some(&sort)).unwrap();
        let ids_again: Vec<&str> = twice.iter().map(|v| v.id()).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn unsorted_inventory_keeps_load_order() {
        let store = sample_store();
        let listing = inventory(&store, None).unwrap();
        let ids: Vec<&str> = listing.iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec!["v1", "v2", "v3"]);
    }

    #[test]
    fn recent_documents_order_chronologically() {
        let store = sample_store();
        let recent = recent_documents(&store, 10);
        let dates: Vec<&str> = recent.iter().map(|d| d.issue_date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-02-20",
                "2023-11-12",
                "2023-06-01",
                "2022-01-30",
                "not a date",
            ]
        );
        assert_eq!(recent[0].vehicle, "Honda Corolla (2022)");
    }

    #[test]
    fn recent_documents_respects_limit_and_dangling_vehicle() {
        let mut store = sample_store();
        let mut tables = BTreeMap::new();
        tables.insert(
            Table::VehicleDocuments,
            vec![row(&[
                ("vehicle_id", "ghost"),
                ("document_type", "Inspection"),
                ("issue_date", "2024-01-01"),
            ])],
        );
        store.load(tables);
        let recent = recent_documents(&store, 1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].vehicle, "Unknown Vehicle");
    }

    #[test]
    fn latest_issue_date_per_type() {
        let store = sample_store();
        assert_eq!(
            latest_issue_date(&store, "Registration"),
            NaiveDate::from_ymd_opt(2023, 11, 12)
        );
        // the unparseable Insurance date is skipped, not treated as newest
        assert_eq!(
            latest_issue_date(&store, "Insurance"),
            NaiveDate::from_ymd_opt(2024, 2, 20)
        );
        assert_eq!(latest_issue_date(&store, "Warranty"), None);
    }
}
