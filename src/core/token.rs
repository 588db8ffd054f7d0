//! Notice token generation.

use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Builder;

use crate::error::{HoneybadgerError, Result};

/// Source of unique notice tokens.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> Result<String>;
}

/// Random (version 4) UUIDs drawn from the operating system's entropy source.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokenGenerator;

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> Result<String> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| HoneybadgerError::token_generation(e.to_string()))?;

        Ok(Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string())
    }
}
