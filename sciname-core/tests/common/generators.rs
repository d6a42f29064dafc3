//! Stochastic generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Characters that can never start or extend a name word.
pub const NOISE_CHARS: &[u8] = b"$#%@!*+=~^";

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from `SCINAME_TEST_SEED` or a random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("SCINAME_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    /// Returns 0, 1, 2, ... with decreasing probability
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Run of one or more spaces and tabs
    pub fn whitespace(&mut self) -> String {
        let len = 1 + self.geometric(0.4);
        (0..len)
            .map(|_| if self.chance(0.2) { '\t' } else { ' ' })
            .collect()
    }

    /// Optional leading or trailing whitespace (usually empty)
    pub fn padding(&mut self) -> String {
        if self.chance(0.3) {
            self.whitespace()
        } else {
            String::new()
        }
    }

    /// Non-empty run of noise characters
    pub fn noise(&mut self) -> String {
        let len = 1 + self.geometric(0.5);
        (0..len)
            .map(|_| NOISE_CHARS[self.rng.gen_range(0..NOISE_CHARS.len())] as char)
            .collect()
    }

    /// Lowercase Latin-looking word of at least three letters
    pub fn epithet(&mut self) -> String {
        const ENDINGS: [&str; 6] = ["us", "a", "um", "is", "ii", "ensis"];
        let len = 2 + self.geometric(0.6);
        let mut word: String = (0..len)
            .map(|_| self.rng.gen_range(b'a'..=b'z') as char)
            .collect();
        word.push_str(ENDINGS[self.rng.gen_range(0..ENDINGS.len())]);
        word
    }

    /// Capitalized word usable as a genus
    pub fn genus(&mut self) -> String {
        let word = self.epithet();
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => word,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_reproducibility() {
        let mut a = Gen::new(42);
        let mut b = Gen::new(42);
        for _ in 0..20 {
            assert_eq!(a.epithet(), b.epithet());
            assert_eq!(a.noise(), b.noise());
        }
    }

    #[test]
    fn test_noise_has_no_word_chars() {
        let mut gen = Gen::new(7);
        for _ in 0..100 {
            assert!(gen.noise().bytes().all(|b| NOISE_CHARS.contains(&b)));
        }
    }

    #[test]
    fn test_geometric_distribution() {
        let mut gen = Gen::new(12345);
        let samples: Vec<usize> = (0..1000).map(|_| gen.geometric(0.9)).collect();

        // With α=0.9, we expect mean ≈ 9 (geometric mean = α/(1-α))
        let mean: f64 = samples.iter().sum::<usize>() as f64 / samples.len() as f64;
        assert!(mean > 5.0 && mean < 15.0, "Mean {} out of expected range", mean);
    }
}
