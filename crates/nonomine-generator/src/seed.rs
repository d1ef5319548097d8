//! Reproducible generation seeds.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use derive_more::{Display, Error};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;
use sha2::{Digest as _, Sha256};

/// A 256-bit seed that fully determines a generated board.
///
/// Seeds round-trip through a 64-digit lowercase hex string, which is the
/// form shown to users and accepted back for reproduction.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use nonomine_generator::BoardSeed;
///
/// let seed = BoardSeed::from_str(
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
/// )?;
/// assert_eq!(
///     seed.to_string(),
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
/// );
/// # Ok::<(), nonomine_generator::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 32]);

impl BoardSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a fresh random seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Builds the deterministic generator stream for this seed.
    ///
    /// The seed bytes are hashed so that structurally similar seeds do
    /// not produce correlated streams.
    #[must_use]
    pub fn rng(&self) -> Pcg64Mcg {
        let digest = Sha256::digest(self.0);
        let mut state = [0_u8; 16];
        state.copy_from_slice(&digest[..16]);
        Pcg64Mcg::from_seed(state)
    }
}

impl Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error parsing a [`BoardSeed`] from its hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ParseSeedError {
    /// The string is not exactly 64 characters long.
    #[display("seed must be 64 hex digits, got {_0} characters")]
    InvalidLength(#[error(not(source))] usize),
    /// The string contains a non-hex character.
    #[display("seed contains a non-hex character")]
    InvalidDigit,
}

impl FromStr for BoardSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 {
            return Err(ParseSeedError::InvalidLength(s.len()));
        }
        let mut bytes = [0_u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| ParseSeedError::InvalidDigit)?;
        }
        Ok(Self(bytes))
    }
}
