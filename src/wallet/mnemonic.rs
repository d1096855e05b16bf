//! Mnemonic Engine
//!
//! BIP-39 phrase generation, validation and seed derivation.
//!
//! SECURITY: entropy and seeds are wrapped in `Zeroizing` and wiped on drop.

use bip39::{Language, Mnemonic};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::config::ChecksumPolicy;
use crate::error::ValidationError;

/// PBKDF2 rounds used by the peer Massa wallet (not the 16384 some wallets use)
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 2048;

/// Seed length produced by PBKDF2-HMAC-SHA512
pub const SEED_LEN: usize = 64;

/// Supported phrase lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    Twelve,
    TwentyFour,
}

impl WordCount {
    pub fn from_count(count: usize) -> Result<Self, ValidationError> {
        match count {
            12 => Ok(Self::Twelve),
            24 => Ok(Self::TwentyFour),
            other => Err(ValidationError::WordCount(other)),
        }
    }

    pub fn words(self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::TwentyFour => 24,
        }
    }

    /// Entropy size in bytes (128 or 256 bits)
    pub fn entropy_len(self) -> usize {
        match self {
            Self::Twelve => 16,
            Self::TwentyFour => 32,
        }
    }

    fn from_entropy_len(len: usize) -> Result<Self, ValidationError> {
        match len {
            16 => Ok(Self::Twelve),
            32 => Ok(Self::TwentyFour),
            other => Err(ValidationError::EntropyLength(other)),
        }
    }
}

/// Index of a word in the English list
pub fn word_index(word: &str) -> Option<usize> {
    Language::English.find_word(word).map(usize::from)
}

/// Generate a fresh phrase from OS randomness
pub fn generate(word_count: usize) -> Result<Vec<&'static str>, ValidationError> {
    let count = WordCount::from_count(word_count)?;

    let mut entropy = Zeroizing::new(vec![0u8; count.entropy_len()]);
    OsRng.fill_bytes(entropy.as_mut_slice());

    mnemonic_from_entropy(&entropy)
}

/// Map entropy plus its checksum bits onto the English wordlist
pub fn mnemonic_from_entropy(entropy: &[u8]) -> Result<Vec<&'static str>, ValidationError> {
    WordCount::from_entropy_len(entropy.len())?;

    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| map_bip39_error(e, &[]))?;
    Ok(mnemonic.word_iter().collect())
}

/// Recover the entropy behind a phrase, verifying the checksum bits
pub fn entropy_from_mnemonic(phrase: &str) -> Result<Zeroizing<Vec<u8>>, ValidationError> {
    let normalized = normalize(phrase);
    let words: Vec<&str> = normalized.split_whitespace().collect();
    WordCount::from_count(words.len())?;

    let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| map_bip39_error(e, &words))?;

    let (array, len) = mnemonic.to_entropy_array();
    let array = Zeroizing::new(array);
    Ok(Zeroizing::new(array[..len].to_vec()))
}

/// Translate a `bip39` failure, naming the offending word when known
fn map_bip39_error(error: bip39::Error, words: &[&str]) -> ValidationError {
    #[allow(unreachable_patterns)]
    match error {
        bip39::Error::BadWordCount(count) => ValidationError::WordCount(count),
        bip39::Error::UnknownWord(index) => ValidationError::UnknownWord(
            words.get(index).map(|w| w.to_string()).unwrap_or_default(),
        ),
        bip39::Error::BadEntropyBitCount(bits) => ValidationError::EntropyLength(bits / 8),
        bip39::Error::InvalidChecksum => ValidationError::MnemonicChecksum,
        other => ValidationError::UnknownWord(other.to_string()),
    }
}

/// Check word count, wordlist membership and (by default) the checksum
pub fn validate(phrase: &str) -> bool {
    check(phrase, ChecksumPolicy::Enforce).is_ok()
}

/// Validate a phrase, reporting the first violation
pub fn check(phrase: &str, policy: ChecksumPolicy) -> Result<(), ValidationError> {
    match policy {
        ChecksumPolicy::Enforce => entropy_from_mnemonic(phrase).map(|_| ()),
        ChecksumPolicy::Skip => {
            let indices = word_indices(phrase)?;
            WordCount::from_count(indices.len()).map(|_| ())
        }
    }
}

/// Canonical form: lowercase words separated by single spaces
pub fn normalize(phrase: &str) -> Zeroizing<String> {
    Zeroizing::new(
        phrase
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// PBKDF2-HMAC-SHA512 with the default 2048 rounds
pub fn seed_from_mnemonic(
    phrase: &str,
    passphrase: &str,
) -> Result<Zeroizing<[u8; SEED_LEN]>, ValidationError> {
    seed_from_mnemonic_with_iterations(phrase, passphrase, DEFAULT_PBKDF2_ITERATIONS)
}

/// PBKDF2-HMAC-SHA512(password = phrase, salt = "mnemonic" + passphrase)
pub fn seed_from_mnemonic_with_iterations(
    phrase: &str,
    passphrase: &str,
    iterations: u32,
) -> Result<Zeroizing<[u8; SEED_LEN]>, ValidationError> {
    if iterations == 0 {
        return Err(ValidationError::Iterations);
    }

    let normalized = normalize(phrase);
    let salt = Zeroizing::new(format!("mnemonic{}", passphrase));

    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(
        normalized.as_bytes(),
        salt.as_bytes(),
        iterations,
        &mut seed[..],
    );
    Ok(seed)
}

fn word_indices(phrase: &str) -> Result<Vec<usize>, ValidationError> {
    let normalized = normalize(phrase);
    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
    WordCount::from_count(words.len())?;

    words
        .iter()
        .map(|w| word_index(w).ok_or_else(|| ValidationError::UnknownWord((*w).to_string())))
        .collect()
}
