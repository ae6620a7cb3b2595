use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Byte signatures identifying the host's stream read and write routines.
///
/// Patterns are space-separated hex bytes with `?`/`??` wildcards, the
/// format used by the signature files shipped next to the agent. The
/// version string tags which game build the set was made against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSignatureSet {
    pub version: String,
    pub read: String,
    pub write: String,
}

impl StreamSignatureSet {
    pub fn read_bytes(&self) -> Result<Vec<Option<u8>>> {
        parse_pattern(&self.read)
    }

    pub fn write_bytes(&self) -> Result<Vec<Option<u8>>> {
        parse_pattern(&self.write)
    }
}

/// Signatures for the known game build, used when no signature file is given.
pub fn builtin_signatures() -> StreamSignatureSet {
    StreamSignatureSet {
        version: "builtin".to_string(),
        read: "55 8B EC 56 8B 75 0C 57 8B F9 85 F6 78 ? 8B 47 18 8D 0C 30 3B 4F 10 76 ? 8B 47 18 8B 77 10"
            .to_string(),
        write: "55 8B EC 53 8B 5D 0C 56 8B F1 57 8B 7E 18 03 FB 3B 7E 10 76 ? 56 8B C7 E8 ? ? ? ? 84 C0 75 ? 5F 5E"
            .to_string(),
    }
}

pub fn load_signatures<P: AsRef<Path>>(path: P) -> Result<StreamSignatureSet> {
    let content = fs::read_to_string(&path)?;
    let data = serde_json::from_str(&content)?;
    Ok(data)
}

pub fn save_signatures<P: AsRef<Path>>(path: P, signatures: &StreamSignatureSet) -> Result<()> {
    let content = serde_json::to_string_pretty(signatures)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn parse_pattern(pattern: &str) -> Result<Vec<Option<u8>>> {
    let mut bytes = Vec::new();
    for token in pattern.split_whitespace() {
        if token == "??" || token == "?" {
            bytes.push(None);
            continue;
        }

        let value = u8::from_str_radix(token, 16).map_err(|e| {
            Error::InvalidPattern(format!("Invalid signature token '{}': {}", token, e))
        })?;
        bytes.push(Some(value));
    }

    if bytes.is_empty() {
        return Err(Error::InvalidPattern(
            "Signature pattern is empty".to_string(),
        ));
    }

    Ok(bytes)
}

pub fn format_pattern(bytes: &[Option<u8>]) -> String {
    bytes
        .iter()
        .map(|b| match b {
            Some(value) => format!("{:02X}", value),
            None => "??".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
