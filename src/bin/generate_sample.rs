use anyhow::{Context, Result};

// Synthetic power table for trying out the explorer: a few channels carry
// a gaussian signal bump over a noise floor, and the last channel is held
// constant to exercise the zero-variance SNR path.

const NUM_ROWS: usize = 64;
const NUM_CHANNELS: usize = 32;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

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
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_power.csv";

    let mut writer =
        csv::Writer::from_path(output_path).with_context(|| format!("creating {output_path}"))?;

    let mut header = vec!["time".to_string()];
    header.extend((0..NUM_CHANNELS).map(|c| format!("ch{c}")));
    writer.write_record(&header)?;

    // Signal bumps centred on a few channels: (channel, width, amplitude).
    let bumps: &[(f64, f64, f64)] = &[(6.0, 1.5, 4.0), (17.0, 2.5, 7.0), (25.0, 1.0, 3.0)];

    for row in 0..NUM_ROWS {
        let time = row as f64 * 0.5;
        let mut record = vec![format!("{time:.1}")];

        for ch in 0..NUM_CHANNELS {
            let value = if ch == NUM_CHANNELS - 1 {
                // Dead channel: constant power, zero variance.
                1.0
            } else {
                let signal: f64 = bumps
                    .iter()
                    .map(|&(mu, sigma, amp)| gaussian(ch as f64, mu, sigma, amp))
                    .sum();
                let drift = 1.0 + 0.1 * (time * 0.3).sin();
                (signal * drift + rng.gauss(2.0, 0.3)).max(0.0)
            };
            record.push(format!("{value:.6}"));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!("Wrote {NUM_ROWS} observations x {NUM_CHANNELS} channels to {output_path}");
    Ok(())
}
