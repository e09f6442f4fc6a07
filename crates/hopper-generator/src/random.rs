use crate::error::GeneratorError;
use crate::Generator;
use hopper_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use hopper_core::ShortCode;
use jiff::Timestamp;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use typed_builder::TypedBuilder;

/// The 62 symbols a generated code is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_LENGTH: usize = 6;

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Number of characters in every generated code.
    #[builder(default = DEFAULT_LENGTH)]
    pub length: usize,
    /// Fixed RNG seed. When unset the generator seeds itself from the wall
    /// clock once, at construction.
    #[builder(default, setter(strip_option))]
    pub seed: Option<u64>,
}

/// Produces fixed-length codes with each character drawn uniformly from
/// [`ALPHABET`].
///
/// The RNG is seeded exactly once; calls only advance its state.
pub struct RandomGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, GeneratorError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&settings.length) {
            return Err(GeneratorError::InvalidLength {
                length: settings.length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }

        let seed = settings.seed.unwrap_or_else(wall_clock_seed);

        Ok(Self {
            length: settings.length,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn next_code(&self) -> ShortCode {
        let mut rng = self.rng.lock();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

impl std::fmt::Debug for RandomGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomGenerator")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        self.next_code()
    }
}

fn wall_clock_seed() -> u64 {
    Timestamp::now().as_nanosecond() as u64
}
