//! On-disk chart description: group and account records in TOML or JSON.
//!
//! ```toml
//! [[groups]]
//! name = "Assets"
//!
//! [[groups]]
//! name = "Liabilities"
//! display_after = "Assets"
//!
//! [[accounts]]
//! name = "Cash"
//! group = "Assets"
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Account, AccountGroup};

/// Flat record sets as stored in a chart file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartFile {
    pub groups: Vec<AccountGroup>,
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Toml,
    Json,
}

impl ChartFormat {
    /// Detect the format from the file extension; unknown extensions are read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => write!(f, "TOML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// Top-level groups every chart starts from, in display order.
const BASE_GROUPS: [&str; 5] = ["Assets", "Liabilities", "Equity", "Revenues", "Expenses"];

impl ChartFile {
    /// Immutable base groups, each displayed after the one before it.
    pub fn base() -> Self {
        let groups = BASE_GROUPS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let group = AccountGroup::root(name).as_immutable();
                match i.checked_sub(1) {
                    Some(prev) => group.after(BASE_GROUPS[prev]),
                    None => group,
                }
            })
            .collect();
        Self {
            groups,
            accounts: Vec::new(),
        }
    }

    pub fn parse(content: &str, format: ChartFormat) -> Result<Self, String> {
        match format {
            ChartFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ChartFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    pub fn render(&self, format: ChartFormat) -> Result<String, String> {
        match format {
            ChartFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
            ChartFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
        }
    }
}
