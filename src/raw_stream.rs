//! Raw random stream shared by every engine variant
//!
//! This is the `srand48`/`lrand48` linear congruential generator: a 48-bit
//! state advanced as `X = (a * X + c) mod 2^48`, handing out the top 31 bits
//! of each new state. Using the same recurrence as the C library keeps seeds
//! interchangeable with generators built on `lrand48`, so a seed printed in a
//! generated program's header reproduces the same program here.
//!
//! All constrained draws ultimately come from one `RawStream`, so two runs with
//! the same seed and the same sequence of calls produce identical output.

use rand::{RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const STATE_MASK: u64 = (1 << 48) - 1;
/// Low 16 bits `srand48` places under the seed
const SEED_LOW_BITS: u64 = 0x330E;

/// Alphabet used by [`RawStream::random_hex_digits`]
pub const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Alphabet used by [`RawStream::random_decimal_digits`]
pub const DECIMAL_DIGITS: &[u8; 10] = b"0123456789";

/// 31-bit uniform source seeded exactly once
///
/// There is deliberately no way to re-seed a stream: construct a new one
/// instead. The [`crate::selector::GeneratorSelector`] builds exactly one per
/// run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStream {
    state: u64,
}

impl RawStream {
    /// Initialize the stream from `value` the way `srand48` does
    ///
    /// Only the low 32 bits of the seed are significant.
    pub fn seed(value: u64) -> Self {
        let state = ((value & 0xFFFF_FFFF) << 16) | SEED_LOW_BITS;
        log::trace!("seeding raw stream with {} (state {:#014x})", value, state);
        Self { state }
    }

    fn step(&mut self) -> u64 {
        self.state = MULTIPLIER
            .wrapping_mul(self.state)
            .wrapping_add(INCREMENT)
            & STATE_MASK;
        self.state
    }

    /// Next value in `[0, 2^31)`
    pub fn draw_raw(&mut self) -> u32 {
        (self.step() >> 17) as u32
    }

    /// `count` characters drawn uniformly from `0-9A-F`
    ///
    /// Nothing is recorded: these are literal filler values, not decisions.
    pub fn random_hex_digits(&mut self, count: usize) -> String {
        self.digits_from(HEX_DIGITS, count)
    }

    /// `count` characters drawn uniformly from `0-9`
    pub fn random_decimal_digits(&mut self, count: usize) -> String {
        self.digits_from(DECIMAL_DIGITS, count)
    }

    fn digits_from(&mut self, alphabet: &[u8], count: usize) -> String {
        (0..count)
            .map(|_| {
                let index = self.draw_raw() as usize % alphabet.len();
                alphabet[index] as char
            })
            .collect()
    }
}

impl RngCore for RawStream {
    /// Top 32 bits of the next state (`mrand48` reinterpreted as unsigned)
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 16) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for RawStream {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seed(u64::from_le_bytes(seed))
    }

    /// Same as [`RawStream::seed`], so `seed_from_u64` stays `srand48`-compatible
    fn seed_from_u64(state: u64) -> Self {
        Self::seed(state)
    }
}
