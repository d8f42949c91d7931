// Display name to ticker code mapping offered to the dashboard's symbol picker.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub display_name: String,
    pub code: String,
}

impl SymbolEntry {
    pub fn new(display_name: &str, code: &str) -> Self {
        Self { display_name: display_name.to_string(), code: code.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCatalog {
    entries: Vec<SymbolEntry>,
}

impl SymbolCatalog {
    /// Validates that names and codes are non-empty, unique and usable as
    /// provider keys.
    pub fn new(entries: Vec<SymbolEntry>) -> Result<Self, EngineError> {
        let mut names = HashSet::new();
        let mut codes = HashSet::new();
        for entry in &entries {
            if entry.display_name.trim().is_empty() {
                return Err(EngineError::ConfigError(format!("Symbol '{}' has an empty display name", entry.code)));
            }
            validate_symbol_code(&entry.code)
                .map_err(|e| EngineError::ConfigError(format!("Symbol '{}': {}", entry.display_name, e)))?;
            if !names.insert(entry.display_name.as_str()) {
                return Err(EngineError::ConfigError(format!("Duplicate symbol display name '{}'", entry.display_name)));
            }
            if !codes.insert(entry.code.to_uppercase()) {
                return Err(EngineError::ConfigError(format!("Duplicate symbol code '{}'", entry.code)));
            }
        }
        Ok(Self { entries })
    }

    pub fn default_entries() -> Vec<SymbolEntry> {
        vec![
            SymbolEntry::new("GOOGLE(GOOG)", "GOOG"),
            SymbolEntry::new("S&P 500 (^GSPC)", "^GSPC"),
            SymbolEntry::new("Microsoft Corporation (MSFT)", "MSFT"),
            SymbolEntry::new("NIFTY 50 (^NSEI)", "^NSEI"),
        ]
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    /// Maps a display name or a known code to its code. Unknown input is
    /// accepted as a code of its own once it passes validation.
    pub fn resolve(&self, input: &str) -> Result<String, EngineError> {
        let input = input.trim();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.display_name == input || e.code.eq_ignore_ascii_case(input))
        {
            return Ok(entry.code.clone());
        }
        validate_symbol_code(input)?;
        Ok(input.to_string())
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self { entries: Self::default_entries() }
    }
}

/// Codes double as file names for local providers, so path-like codes are
/// rejected.
pub fn validate_symbol_code(code: &str) -> Result<(), EngineError> {
    if code.trim().is_empty() {
        return Err(EngineError::InvalidSymbol("symbol must not be empty".to_string()));
    }
    if code.len() > 32 {
        return Err(EngineError::InvalidSymbol(format!("symbol '{}' is longer than 32 characters", code)));
    }
    if code.contains("..") || code.chars().any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control()) {
        return Err(EngineError::InvalidSymbol(format!("symbol '{}' contains forbidden characters", code)));
    }
    Ok(())
}
