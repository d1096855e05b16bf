//! Massa Derivation Paths
//!
//! Massa keys live at `m/44'/632'/{account}'/0'/{index}'`. Every level is
//! hardened because SLIP-0010 Ed25519 has no public derivation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::{hardened, HARDENED};
use crate::error::ValidationError;

/// BIP-44 purpose
pub const PURPOSE: u32 = 44;

/// SLIP-0044 coin type for Massa
pub const COIN_TYPE: u32 = 632;

/// Change level (always external)
pub const CHANGE: u32 = 0;

/// Account/index pair selecting a key under the Massa BIP-44 branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MassaPath {
    pub account: u32,
    pub index: u32,
}

impl MassaPath {
    /// Build a path, rejecting values that collide with the hardened bit
    pub fn new(account: u32, index: u32) -> Result<Self, ValidationError> {
        for (name, value) in [("account", account), ("index", index)] {
            if value >= HARDENED {
                return Err(ValidationError::DerivationPath(format!(
                    "{} {} exceeds maximum value",
                    name, value
                )));
            }
        }
        Ok(Self { account, index })
    }

    /// Hardened indices from the master node down to the key
    pub fn indices(&self) -> [u32; 5] {
        [
            hardened(PURPOSE),
            hardened(COIN_TYPE),
            hardened(self.account),
            hardened(CHANGE),
            hardened(self.index),
        ]
    }
}

impl fmt::Display for MassaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/{}'/{}'/{}'/{}'/{}'",
            PURPOSE, COIN_TYPE, self.account, CHANGE, self.index
        )
    }
}

impl FromStr for MassaPath {
    type Err = ValidationError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();

        let rest = trimmed
            .strip_prefix("m/")
            .or_else(|| trimmed.strip_prefix("M/"))
            .ok_or_else(|| {
                ValidationError::DerivationPath("Derivation path must start with 'm/'".into())
            })?;

        let components = rest
            .split('/')
            .map(parse_component)
            .collect::<Result<Vec<_>, _>>()?;

        let [purpose, coin_type, account, change, index] = components[..] else {
            return Err(ValidationError::DerivationPath(format!(
                "Expected 5 components, got {}",
                components.len()
            )));
        };

        if purpose != PURPOSE || coin_type != COIN_TYPE || change != CHANGE {
            return Err(ValidationError::DerivationPath(format!(
                "'{}' is not a Massa path (m/44'/632'/account'/0'/index')",
                trimmed
            )));
        }

        Self::new(account, index)
    }
}

/// Parse one hardened component (`12'`, `12h` or `12H`)
fn parse_component(s: &str) -> Result<u32, ValidationError> {
    let trimmed = s.trim();

    let number = trimmed
        .strip_suffix('\'')
        .or_else(|| trimmed.strip_suffix('h'))
        .or_else(|| trimmed.strip_suffix('H'))
        .ok_or_else(|| {
            ValidationError::DerivationPath(format!(
                "Component '{}' is not hardened; Ed25519 paths must be fully hardened",
                s
            ))
        })?;

    let index: u32 = number.parse().map_err(|e| {
        ValidationError::DerivationPath(format!("Invalid path component '{}': {}", s, e))
    })?;

    if index >= HARDENED {
        return Err(ValidationError::DerivationPath(format!(
            "Path component {} exceeds maximum value",
            index
        )));
    }

    Ok(index)
}
