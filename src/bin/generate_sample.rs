use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const WRECKS: usize = 600;

/// Write a deterministic sample shipwreck register as CSV and Parquet.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", version, about)]
struct Args {
    /// Directory receiving shipwrecks_sample.csv and shipwrecks_sample.parquet
    #[arg(default_value = ".")]
    out_dir: PathBuf,
}

const VESSEL_TYPES: [&str; 8] = [
    "Schooner", "Steamer", "Bark", "Brig", "Sloop", "Barge", "Tug", "Fishing Vessel",
];
const CAUSES: [&str; 6] = ["Storm", "Fire", "Collision", "Grounding", "Ice", "Foundered"];
const NAME_PARTS: [&str; 10] = [
    "Mary", "Hesper", "Alva", "Gazelle", "Northern", "Star", "Kate", "Mystic", "Belle", "Queen",
];

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_f64() * items.len() as f64) as usize % items.len()]
    }
}

/// One generated row. `None` fields are written as blank cells / nulls.
struct Wreck {
    name: String,
    vessel_type: Option<&'static str>,
    year: Option<i64>,
    year_built: Option<i64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    lives_lost: Option<i64>,
    cause: Option<&'static str>,
}

fn generate(rng: &mut SimpleRng) -> Vec<Wreck> {
    (0..WRECKS)
        .map(|i| {
            let year = rng.range(1800, 1960);
            let age = rng.range(0, 60);
            let on_map = rng.chance(0.8);
            Wreck {
                name: format!("{} {} {}", rng.pick(&NAME_PARTS), rng.pick(&NAME_PARTS), i),
                vessel_type: (!rng.chance(0.03)).then(|| rng.pick(&VESSEL_TYPES)),
                year: (!rng.chance(0.02)).then_some(year),
                year_built: (!rng.chance(0.25)).then_some(year - age),
                // Great Lakes / North Atlantic coast.
                latitude: on_map.then(|| 41.0 + rng.next_f64() * 6.0),
                longitude: on_map.then(|| -92.0 + rng.next_f64() * 25.0),
                lives_lost: (!rng.chance(0.3)).then(|| rng.range(0, 40).pow(2) / 8),
                cause: (!rng.chance(0.15)).then(|| rng.pick(&CAUSES)),
            }
        })
        .collect()
}

fn write_csv(path: &Path, wrecks: &[Wreck], rng: &mut SimpleRng) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "SHIPS NAME",
        "VESSEL TYPE",
        "YEAR",
        "YEAR BUILT",
        "LATITUDE",
        "LONGITUDE",
        "LIVES LOST",
        "CAUSE OF LOSS",
    ])?;

    let num = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
    let coord = |v: Option<f64>| v.map(|v| format!("{v:.4}")).unwrap_or_default();
    for w in wrecks {
        // Sprinkle in the kind of free text real registers contain.
        let year_built = if rng.chance(0.02) {
            "unknown".to_string()
        } else {
            num(w.year_built)
        };
        writer.write_record([
            w.name.clone(),
            w.vessel_type.unwrap_or_default().to_string(),
            num(w.year),
            year_built,
            coord(w.latitude),
            coord(w.longitude),
            num(w.lives_lost),
            w.cause.unwrap_or_default().to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, wrecks: &[Wreck]) -> Result<()> {
    let text = |name: &str| Field::new(name, DataType::Utf8, true);
    let schema = Arc::new(Schema::new(vec![
        text("SHIPS NAME"),
        text("VESSEL TYPE"),
        Field::new("YEAR", DataType::Int64, true),
        Field::new("YEAR BUILT", DataType::Int64, true),
        Field::new("LATITUDE", DataType::Float64, true),
        Field::new("LONGITUDE", DataType::Float64, true),
        Field::new("LIVES LOST", DataType::Int64, true),
        text("CAUSE OF LOSS"),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(wrecks.iter().map(|w| w.name.as_str()))),
        Arc::new(wrecks.iter().map(|w| w.vessel_type).collect::<StringArray>()),
        Arc::new(wrecks.iter().map(|w| w.year).collect::<Int64Array>()),
        Arc::new(wrecks.iter().map(|w| w.year_built).collect::<Int64Array>()),
        Arc::new(wrecks.iter().map(|w| w.latitude).collect::<Float64Array>()),
        Arc::new(wrecks.iter().map(|w| w.longitude).collect::<Float64Array>()),
        Arc::new(wrecks.iter().map(|w| w.lives_lost).collect::<Int64Array>()),
        Arc::new(wrecks.iter().map(|w| w.cause).collect::<StringArray>()),
    ];

    let batch =
        RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let Args { out_dir } = Args::parse();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let wrecks = generate(&mut rng);

    let csv_path = out_dir.join("shipwrecks_sample.csv");
    write_csv(&csv_path, &wrecks, &mut rng)?;
    let parquet_path = out_dir.join("shipwrecks_sample.parquet");
    write_parquet(&parquet_path, &wrecks)?;

    println!(
        "Wrote {} shipwrecks to {} and {}",
        wrecks.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
