//! Structured Logging with Sensitive Data Redaction
//!
//! Boundary layers (FFI, CLI) log request outcomes through `LogEntry`. Field
//! values are redacted by key name:
//! - Mnemonics, seeds, passphrases and private keys are fully hidden
//! - Addresses and public keys keep a short prefix and suffix
//! - Signatures and operation bytes are shortened
//!
//! The cryptographic core never logs.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable that turns on debug output
pub const DEBUG_ENV_VAR: &str = "MASSA_WALLET_DEBUG";

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

pub fn disable_debug() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

/// Enable debug output when `MASSA_WALLET_DEBUG` is set to 1/true
pub fn init_from_env() {
    if let Ok(value) = std::env::var(DEBUG_ENV_VAR) {
        if matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
            enable_debug();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        };
        f.write_str(label)
    }
}

/// Structured log entry
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field, redacted according to its key
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let redacted = redact_if_sensitive(key, &value.to_string());
        self.fields.push((key, redacted));
        self
    }

    /// Add a field that is always fully redacted
    pub fn redacted_field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push((key, redact_value(&value.to_string())));
        self
    }

    /// Render without timestamp
    pub fn render(&self) -> String {
        let mut line = format!("{} [{}] {}", self.level, self.module, self.message);
        if !self.fields.is_empty() {
            let fields = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(" | ");
            line.push_str(&fields);
        }
        line
    }

    /// Write the entry to stderr
    pub fn log(self) {
        if self.level == LogLevel::Debug && !is_debug_enabled() {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        eprintln!("[{}] {}", timestamp, self.render());
    }
}

fn redact_if_sensitive(key: &str, value: &str) -> String {
    let key_lower = key.to_lowercase();

    const SECRET_KEYS: [&str; 7] = [
        "private", "secret", "seed", "mnemonic", "phrase", "password", "entropy",
    ];
    if SECRET_KEYS.iter().any(|k| key_lower.contains(k)) {
        return redact_value(value);
    }

    const IDENTITY_KEYS: [&str; 4] = ["address", "recipient", "public_key", "creator"];
    if IDENTITY_KEYS.iter().any(|k| key_lower.contains(k)) {
        return redact_address(value);
    }

    const BLOB_KEYS: [&str; 3] = ["signature", "content", "digest"];
    if BLOB_KEYS.iter().any(|k| key_lower.contains(k)) {
        return shorten(value, 10, 6);
    }

    value.to_string()
}

fn redact_value(value: &str) -> String {
    match value.len() {
        0 => "[EMPTY]".to_string(),
        1..=4 => "[REDACTED]".to_string(),
        len => format!("[REDACTED:{}chars]", len),
    }
}

/// Keep the network prefix and a few characters (`AU12HZ...rsoU`)
fn redact_address(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return "[EMPTY]".to_string();
    }
    if trimmed.len() <= 13 {
        return redact_value(trimmed);
    }
    shorten(trimmed, 6, 4)
}

fn shorten(value: &str, prefix_len: usize, suffix_len: usize) -> String {
    let trimmed = value.trim();
    if !trimmed.is_ascii() || trimmed.len() <= prefix_len + suffix_len + 3 {
        return trimmed.to_string();
    }
    format!(
        "{}...{}",
        &trimmed[..prefix_len],
        &trimmed[trimmed.len() - suffix_len..]
    )
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::$level,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

/// Debug-level log, dropped unless debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($($args:tt)*) => { $crate::__log_at!(Debug, $($args)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($args:tt)*) => { $crate::__log_at!(Info, $($args)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($args:tt)*) => { $crate::__log_at!(Warn, $($args)*) };
}
