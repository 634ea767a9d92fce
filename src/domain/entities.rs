//! Domain entities: record capabilities and the chart-of-accounts records

use std::fmt;

use serde::{Deserialize, Serialize};

/// A record that can be placed in a sequence.
///
/// `key` identifies the record among its siblings; `follows` names the
/// sibling that must appear directly or indirectly before it.
pub trait Sequenced {
    fn key(&self) -> &str;
    fn follows(&self) -> Option<&str>;
}

/// A record that may hang below another record of the same kind.
pub trait Nested: Sequenced {
    fn parent_key(&self) -> Option<&str>;
}

/// A record that attaches to a group record by its key.
pub trait Attached: Sequenced {
    fn group_key(&self) -> &str;
}

/// Treat `Some("")` the same as `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Heading in a chart of accounts (e.g. "Assets" > "Current Assets").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountGroup {
    pub name: String,
    /// Owning group, `None` for a top-level heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Sibling this group is displayed after
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_after: Option<String>,
    /// Base groups shipped with a chart cannot be altered
    #[serde(default)]
    pub immutable: bool,
}

impl AccountGroup {
    /// Top-level group.
    pub fn root(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            display_after: None,
            immutable: false,
        }
    }

    /// Group below `parent`.
    pub fn child(name: &str, parent: &str) -> Self {
        Self {
            parent: Some(parent.to_string()),
            ..Self::root(name)
        }
    }

    pub fn after(mut self, predecessor: &str) -> Self {
        self.display_after = Some(predecessor.to_string());
        self
    }

    pub fn as_immutable(mut self) -> Self {
        self.immutable = true;
        self
    }
}

impl Sequenced for AccountGroup {
    fn key(&self) -> &str {
        &self.name
    }

    fn follows(&self) -> Option<&str> {
        present(&self.display_after)
    }
}

impl Nested for AccountGroup {
    fn parent_key(&self) -> Option<&str> {
        present(&self.parent)
    }
}

impl fmt::Display for AccountGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Asset,
    ContraAsset,
    Liability,
    Equity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalBalance {
    Debit,
    Credit,
}

/// Ledger account filed under an [`AccountGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    /// Name of the owning group
    pub group: String,
    /// Sibling account (same group) this one is displayed after
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_balance: Option<NormalBalance>,
}

impl Account {
    pub fn new(name: &str, group: &str) -> Self {
        Self {
            name: name.to_string(),
            group: group.to_string(),
            display_after: None,
            account_type: None,
            normal_balance: None,
        }
    }

    pub fn after(mut self, predecessor: &str) -> Self {
        self.display_after = Some(predecessor.to_string());
        self
    }
}

impl Sequenced for Account {
    fn key(&self) -> &str {
        &self.name
    }

    fn follows(&self) -> Option<&str> {
        present(&self.display_after)
    }
}

impl Attached for Account {
    fn group_key(&self) -> &str {
        &self.group
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
