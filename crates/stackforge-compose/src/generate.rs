//! Values substituted for the generated placeholders.

use rand::distributions::Alphanumeric;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use stackforge_common::constants::{
    ADMIN_PASSWORD_LENGTH, ALPHANUMERIC_LENGTH, EPHEMERAL_PORT_RANGE, FOLDER_NAME_LENGTH,
    PASSWORD_LENGTH,
};
use stackforge_common::types::CompiledAt;

const FOLDER_HEAD: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const FOLDER_TAIL: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Source of generated interpolation values.
///
/// Every call returns a fresh value. Callers must not assume two calls
/// agree, even within one merge pass.
pub trait ValueSource {
    /// A password for `{password}` and `{randomPassword}`.
    fn password(&mut self) -> String;

    /// A longer password for `{adminPassword}`.
    fn admin_password(&mut self) -> String;

    /// A name safe to use as a file or directory name.
    fn folder_name(&mut self) -> String;

    /// An alphanumeric token for `{randomAlphanumeric}`.
    fn alphanumeric(&mut self) -> String;

    /// A port in the dynamic/private range.
    fn random_port(&mut self) -> u16;

    /// Compile time in Unix epoch milliseconds.
    fn compiled_time(&mut self) -> i64;
}

/// [`ValueSource`] backed by a `rand` generator.
#[derive(Debug)]
pub struct RandomValues<R> {
    rng: R,
}

impl RandomValues<OsRng> {
    /// Draws from the operating system CSPRNG.
    #[must_use]
    pub const fn secure() -> Self {
        Self { rng: OsRng }
    }
}

impl RandomValues<StdRng> {
    /// Uses a `StdRng` seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uses a deterministic `StdRng`, for reproducible builds and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> RandomValues<R> {
    /// Wraps an arbitrary generator.
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn token(&mut self, length: usize) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }

    fn pick(&mut self, charset: &[u8]) -> char {
        char::from(charset[self.rng.gen_range(0..charset.len())])
    }
}

impl<R: RngCore> ValueSource for RandomValues<R> {
    fn password(&mut self) -> String {
        self.token(PASSWORD_LENGTH)
    }

    fn admin_password(&mut self) -> String {
        self.token(ADMIN_PASSWORD_LENGTH)
    }

    fn folder_name(&mut self) -> String {
        let mut name = String::with_capacity(FOLDER_NAME_LENGTH);
        name.push(self.pick(FOLDER_HEAD));
        for _ in 1..FOLDER_NAME_LENGTH {
            name.push(self.pick(FOLDER_TAIL));
        }
        name
    }

    fn alphanumeric(&mut self) -> String {
        self.token(ALPHANUMERIC_LENGTH)
    }

    fn random_port(&mut self) -> u16 {
        self.rng.gen_range(EPHEMERAL_PORT_RANGE)
    }

    fn compiled_time(&mut self) -> i64 {
        CompiledAt::now().as_millis()
    }
}
