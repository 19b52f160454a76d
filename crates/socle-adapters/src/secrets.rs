//! Application secret generation.

use rand::{Rng, distr::Alphanumeric};

use socle_core::application::ports::SecretGenerator;

/// Secrets drawn from the thread-local CSPRNG over `[A-Za-z0-9]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSecretGenerator;

impl RandomSecretGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SecretGenerator for RandomSecretGenerator {
    fn generate(&self, length: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}
