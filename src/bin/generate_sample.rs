//! Writes a deterministic, Gapminder-shaped sample CSV so the viewer can
//! be exercised without the real dataset.
//!
//! Usage: `cargo run --bin generate_sample [output.csv]`

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct SampleRow {
    country: &'static str,
    continent: &'static str,
    year: u16,
    #[serde(rename = "lifeExp")]
    life_exp: f64,
    pop: u64,
    #[serde(rename = "gdpPercap")]
    gdp_per_cap: f64,
}

/// (country, continent, 1952 life expectancy, yearly life gain,
/// 1952 population, yearly growth, 1952 GDP per capita, yearly growth)
const COUNTRIES: [(&str, &str, f64, f64, u64, f64, f64, f64); 10] = [
    ("China", "Asia", 44.0, 0.55, 556_263_527, 0.014, 400.0, 0.047),
    ("India", "Asia", 37.4, 0.50, 372_000_000, 0.020, 546.0, 0.025),
    ("Japan", "Asia", 63.0, 0.35, 86_459_025, 0.008, 3_217.0, 0.045),
    ("Nigeria", "Africa", 36.3, 0.20, 33_119_096, 0.026, 1_077.0, 0.005),
    ("Egypt", "Africa", 41.9, 0.50, 22_223_309, 0.022, 1_419.0, 0.025),
    ("Norway", "Europe", 72.7, 0.14, 3_327_728, 0.006, 10_095.0, 0.029),
    ("Netherlands", "Europe", 72.1, 0.13, 10_381_988, 0.007, 8_942.0, 0.025),
    ("United States", "Americas", 68.4, 0.18, 157_553_000, 0.012, 13_990.0, 0.021),
    ("Brazil", "Americas", 50.9, 0.38, 56_602_560, 0.022, 2_109.0, 0.024),
    ("Australia", "Oceania", 69.1, 0.22, 8_691_212, 0.019, 10_040.0, 0.021),
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

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gapminder.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating '{output}'"))?;

    for (country, continent, life0, life_gain, pop0, pop_growth, gdp0, gdp_growth) in COUNTRIES {
        for year in (1952u16..=2007).step_by(5) {
            let elapsed = f64::from(year - 1952);
            let life_exp = (life0 + life_gain * elapsed + rng.gauss(0.0, 0.6)).clamp(25.0, 85.0);
            let pop = (pop0 as f64 * (1.0 + pop_growth).powf(elapsed)) as u64;
            let gdp_per_cap =
                gdp0 * (1.0 + gdp_growth).powf(elapsed) * rng.gauss(1.0, 0.03).max(0.5);

            writer
                .serialize(SampleRow {
                    country,
                    continent,
                    year,
                    life_exp: (life_exp * 1000.0).round() / 1000.0,
                    pop,
                    gdp_per_cap: (gdp_per_cap * 10000.0).round() / 10000.0,
                })
                .context("writing sample row")?;
        }
    }

    writer.flush().context("flushing sample file")?;
    println!(
        "Wrote {} rows to {output}",
        COUNTRIES.len() * (1952..=2007).step_by(5).count()
    );
    Ok(())
}
