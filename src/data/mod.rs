/// Data layer: the inventory tables, their store, and the join engine.
///
/// Architecture:
/// ```text
///  vehicles.csv … vehicle-documents.csv  (eleven tables)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse directory → DatasetStore
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetStore  │  eleven Vec<Row> tables, lookup by id
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  engine   │  denormalized vehicle views + grouped counts
///   └──────────┘
/// ```
pub mod engine;
pub mod loader;
pub mod model;
pub mod store;
