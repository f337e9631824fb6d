use std::path::PathBuf;

use anyhow::{Context, Result};

const MATERIALS: &[&str] = &["Galvanised steel", "Aluminium", "Colorbond steel", "Insulated panel"];
const MOTORS: &[&str] = &["24V DC", "230V AC", "Tubular 240V", ""];

/// Minimal deterministic PRNG (xorshift64*)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let out: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_doors.csv"));

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&out)
        .with_context(|| format!("creating {}", out.display()))?;

    // Header spacing/case mirrors what comes out of the published sheet.
    writer.write_record([
        "Model",
        " Opening-Speed",
        "Max-Width",
        "Max-Height",
        "Curtain-Material",
        "Motor",
        "Technical-Datasheet ",
        "Installation-Manual",
    ])?;

    for series in ["RD", "HS", "SC"] {
        for size in [100, 200, 300, 400] {
            let model = format!("{series}-{size}");
            let speed = format!("{:.1}m/s", 0.2 + rng.below(15) as f64 / 10.0);
            let width = format!("{} mm", 2000 + rng.below(40) * 100);
            let height = format!("{} mm", 2000 + rng.below(30) * 100);
            let datasheet = format!("https://example.com/datasheets/{model}.pdf");
            let manual = if rng.below(3) == 0 {
                String::new()
            } else {
                format!("https://example.com/manuals/{model}.pdf")
            };
            writer.write_record([
                model.as_str(),
                speed.as_str(),
                width.as_str(),
                height.as_str(),
                rng.pick(MATERIALS),
                rng.pick(MOTORS),
                datasheet.as_str(),
                manual.as_str(),
            ])?;
        }
    }

    // A spacer row without a model, as the sheet has between series.
    writer.write_record(["", "", "", "", "", "", "", ""])?;

    writer.flush().context("flushing CSV")?;
    println!("Wrote sample sheet to {}", out.display());
    Ok(())
}
