//! Generate a consistent sample fleet as eleven CSV tables.
//!
//! Usage: `cargo run --bin generate_sample [out_dir]` (default `data/`).
//! Deterministic for a fixed seed. A few rows carry deliberate defects
//! (a dangling trim id, a dangling color link, an unparseable price) so
//! the "Unknown" paths show up in the rendered dashboard.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

const MAKES: [&str; 6] = ["Toyota", "Honda", "Ford", "BMW", "Hyundai", "Mazda"];

// (model name, index into MAKES)
const MODELS: [(&str, usize); 13] = [
    ("Corolla", 0),
    ("Camry", 0),
    ("RAV4", 0),
    ("Civic", 1),
    ("Accord", 1),
    ("Focus", 2),
    ("F-150", 2),
    ("3 Series", 3),
    ("X3", 3),
    ("Elantra", 4),
    ("Tucson", 4),
    ("Mazda3", 5),
    ("CX-5", 5),
];

const TRIM_NAMES: [&str; 4] = ["Base", "Sport", "Limited", "Touring"];
const COLORS: [&str; 8] = [
    "Black", "White", "Silver", "Red", "Blue", "Gray", "Green", "Orange",
];
const FEATURES: [&str; 10] = [
    "Sunroof",
    "Heated Seats",
    "Backup Camera",
    "Bluetooth",
    "Navigation",
    "Cruise Control",
    "Leather Seats",
    "Blind Spot Monitor",
    "Apple CarPlay",
    "Tow Package",
];
const FUEL_TYPES: [&str; 4] = ["Gasoline", "Diesel", "Hybrid", "Electric"];
const TRANSMISSIONS: [&str; 3] = ["Manual", "Automatic", "CVT"];
const DOCUMENT_TYPES: [&str; 4] = ["Registration", "Insurance", "Inspection", "Warranty"];

const VEHICLE_COUNT: usize = 120;

fn main() -> Result<()> {
    env_logger::init();
    let out_dir: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data".to_string())
        .into();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    // ---- Dimension tables ----
    write_named(&out_dir, "makes.csv", &MAKES, "m")?;
    write_named(&out_dir, "colors.csv", &COLORS, "c")?;
    write_named(&out_dir, "features.csv", &FEATURES, "fe")?;
    write_named(&out_dir, "fuel-types.csv", &FUEL_TYPES, "f")?;
    write_named(&out_dir, "transmission-types.csv", &TRANSMISSIONS, "tr")?;

    let mut writer = table_writer(&out_dir, "models.csv")?;
    writer.write_record(["id", "name", "make_id"])?;
    for (i, (name, make_idx)) in MODELS.iter().enumerate() {
        writer.write_record([format!("mo{i}"), name.to_string(), format!("m{make_idx}")])?;
    }
    writer.flush()?;

    // Two trims per model.
    let mut writer = table_writer(&out_dir, "trims.csv")?;
    writer.write_record(["id", "name", "model_id"])?;
    let mut trim_ids_by_model: Vec<Vec<String>> = Vec::new();
    let mut trim_no = 0usize;
    for model_idx in 0..MODELS.len() {
        let mut ids = Vec::new();
        let first = rng.below(TRIM_NAMES.len());
        for offset in 0..2 {
            let name = TRIM_NAMES[(first + offset) % TRIM_NAMES.len()];
            let id = format!("t{trim_no}");
            trim_no += 1;
            writer.write_record([
                id.clone(),
                name.to_string(),
                format!("mo{model_idx}"),
            ])?;
            ids.push(id);
        }
        trim_ids_by_model.push(ids);
    }
    writer.flush()?;

    // ---- Vehicles ----
    let mut writer = table_writer(&out_dir, "vehicles.csv")?;
    writer.write_record([
        "id",
        "vin",
        "make_id",
        "model_id",
        "trim_id",
        "fuel_type_id",
        "transmission_type_id",
        "year",
        "price",
        "mileage",
    ])?;
    for i in 0..VEHICLE_COUNT {
        let model_idx = rng.below(MODELS.len());
        let make_idx = MODELS[model_idx].1;
        let trim_id = if i == 13 {
            // dangling trim reference
            "t-999".to_string()
        } else {
            rng.pick(&trim_ids_by_model[model_idx]).clone()
        };
        let price = if i == 7 {
            // unparseable on purpose
            "call us".to_string()
        } else {
            format!("{}", 4_000 + rng.below(56) * 1_000)
        };
        writer.write_record([
            format!("v{i}"),
            fake_vin(&mut rng),
            format!("m{make_idx}"),
            format!("mo{model_idx}"),
            trim_id,
            format!("f{}", rng.below(FUEL_TYPES.len())),
            format!("tr{}", rng.below(TRANSMISSIONS.len())),
            format!("{}", 2006 + rng.below(19)),
            price,
            format!("{}", 1_000 + rng.below(180) * 1_000),
        ])?;
    }
    writer.flush()?;

    // ---- Join tables ----
    let mut writer = table_writer(&out_dir, "vehicle-colors.csv")?;
    writer.write_record(["vehicle_id", "color_id"])?;
    for i in 0..VEHICLE_COUNT {
        let first = rng.below(COLORS.len());
        for offset in 0..(1 + rng.below(2)) {
            writer.write_record([
                format!("v{i}"),
                format!("c{}", (first + offset) % COLORS.len()),
            ])?;
        }
    }
    // dangling color link
    writer.write_record(["v0", "c-999"])?;
    writer.flush()?;

    let mut writer = table_writer(&out_dir, "vehicle-features.csv")?;
    writer.write_record(["vehicle_id", "feature_id"])?;
    for i in 0..VEHICLE_COUNT {
        let first = rng.below(FEATURES.len());
        for offset in 0..rng.below(4) {
            writer.write_record([
                format!("v{i}"),
                format!("fe{}", (first + offset) % FEATURES.len()),
            ])?;
        }
    }
    writer.flush()?;

    // ---- Documents ----
    let mut writer = table_writer(&out_dir, "vehicle-documents.csv")?;
    writer.write_record([
        "vehicle_id",
        "document_type",
        "document_number",
        "issue_date",
        "expiry_date",
    ])?;
    let mut doc_no = 0usize;
    for i in 0..VEHICLE_COUNT {
        for _ in 0..rng.below(3) {
            let doc_type = *rng.pick(&DOCUMENT_TYPES);
            let year = 2020 + rng.below(5) as i32;
            let month = 1 + rng.below(12);
            let day = 1 + rng.below(28);
            doc_no += 1;
            writer.write_record([
                format!("v{i}"),
                doc_type.to_string(),
                format!("{}-{doc_no:04}", &doc_type[..1]),
                format!("{year}-{month:02}-{day:02}"),
                format!("{}-{month:02}-{day:02}", year + 1),
            ])?;
        }
    }
    writer.flush()?;

    log::info!(
        "Wrote sample fleet ({VEHICLE_COUNT} vehicles) to {}",
        out_dir.display()
    );
    Ok(())
}

fn table_writer(dir: &Path, file: &str) -> Result<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(dir.join(file)).with_context(|| format!("creating {file}"))
}

/// Write a simple `id,name` dimension table.
fn write_named(dir: &Path, file: &str, names: &[&str], id_prefix: &str) -> Result<()> {
    let mut writer = table_writer(dir, file)?;
    writer.write_record(["id", "name"])?;
    for (i, name) in names.iter().enumerate() {
        writer.write_record([format!("{id_prefix}{i}"), name.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn fake_vin(rng: &mut SimpleRng) -> String {
    // VINs skip I, O and Q
    const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";
    (0..17)
        .map(|_| ALPHABET[rng.below(ALPHABET.len())] as char)
        .collect()
}
