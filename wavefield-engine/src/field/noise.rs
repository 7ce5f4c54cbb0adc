// noise.rs - Seeded coherent noise for the wave drift
//
// Seeded once at attach and only read afterwards.

use ::noise::{NoiseFn, Perlin};

pub struct WaveNoise {
    perlin: Perlin,
    seed: u32,
}

impl WaveNoise {
    pub fn new(seed: u32) -> Self {
        Self { perlin: Perlin::new(seed), seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_field() {
        let a = WaveNoise::new(7);
        let b = WaveNoise::new(7);
        for i in 0..64 {
            let (x, y) = (i as f64 * 0.173, i as f64 * -0.091);
            assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
        }
    }

    #[test]
    fn field_is_coherent_and_bounded() {
        let n = WaveNoise::new(42);
        let mut prev = n.sample(0.3, 0.7);
        for i in 1..200 {
            let v = n.sample(0.3 + i as f64 * 1e-3, 0.7);
            assert!((-1.5..=1.5).contains(&v));
            assert!((v - prev).abs() < 0.05);
            prev = v;
        }
    }
}
