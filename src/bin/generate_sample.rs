use anyhow::{Context, Result};
use chrono::NaiveDate;

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Pollution load at a site, 0 near the barrage upstream to 1 at the most
/// loaded downstream reach.
struct Site {
    name: &'static str,
    load: f64,
}

const SITES: [Site; 5] = [
    Site { name: "Palla", load: 0.05 },
    Site { name: "Wazirabad", load: 0.25 },
    Site { name: "ITO Bridge", load: 0.55 },
    Site { name: "Nizamuddin", load: 0.75 },
    Site { name: "Okhla", load: 0.95 },
];

/// Monsoon months dilute pollutant concentrations and lift dissolved oxygen.
fn dilution(month: u32) -> f64 {
    if (7..=9).contains(&month) {
        0.55
    } else {
        1.0
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["location", "date", "parameter", "value", "unit"])?;

    let mut rows = 0usize;
    for year in [2022, 2023] {
        for month in 1..=12u32 {
            let date = NaiveDate::from_ymd_opt(year, month, 5)
                .context("invalid sampling date")?
                .format("%Y-%m-%d")
                .to_string();
            let dil = dilution(month);

            for site in &SITES {
                let ph = rng.gauss(7.3 - 0.3 * site.load, 0.15);
                let dissolved_oxygen = rng
                    .gauss(8.5 - 7.0 * site.load * dil, 0.4)
                    .max(0.2);
                let bod = rng.gauss(2.0 + 28.0 * site.load * dil, 1.2).max(0.5);
                let cod = rng.gauss(bod * 2.2 + 4.0, 3.0).max(1.0);
                // Coliform counts are lognormal across the reach.
                let total_coliform = 10f64
                    .powf(rng.gauss(2.5 + 3.5 * site.load * dil, 0.3))
                    .round();
                let faecal_coliform = (total_coliform * rng.gauss(0.35, 0.08).clamp(0.05, 0.8))
                    .round()
                    .max(1.0);

                let readings: [(&str, f64, &str); 6] = [
                    ("pH", ph, "pH"),
                    ("DO", dissolved_oxygen, "mg/L"),
                    ("BOD", bod, "mg/L"),
                    ("COD", cod, "mg/L"),
                    ("Total Coliform", total_coliform, "MPN/100mL"),
                    ("Faecal Coliform", faecal_coliform, "MPN/100mL"),
                ];
                for (parameter, value, unit) in readings {
                    writer.write_record([
                        site.name,
                        &date,
                        parameter,
                        &format!("{value:.2}"),
                        unit,
                    ])?;
                    rows += 1;
                }
            }
            log::debug!("generated {year}-{month:02}");
        }
    }

    writer.flush().context("flushing CSV")?;
    println!(
        "Wrote {rows} measurements for {} sites to {output_path}",
        SITES.len()
    );
    Ok(())
}
