//! Chart of accounts service
//!
//! Loads flat group and account records from a chart file and runs them
//! through the ordering engine.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, ChartFile, ChartFormat, IoResultExt};
use crate::domain::{assemble, build_forest, linearize, Account, AccountGroup, CompositeTree, Forest, OrphanPolicy};
use crate::infrastructure::traits::FileSystem;

/// Composite tree of account groups with their accounts.
pub type Chart = CompositeTree<AccountGroup, Account>;

/// Counts reported by [`ChartService::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSummary {
    pub groups: usize,
    pub accounts: usize,
    pub roots: usize,
    /// Groups flagged immutable
    pub base_groups: usize,
    /// Deepest group level (top-level groups are level 1)
    pub depth: usize,
    /// Accounts dropped because their group does not exist
    pub dropped: Vec<String>,
}

/// Service for ordering charts of accounts.
pub struct ChartService {
    fs: Arc<dyn FileSystem>,
}

impl ChartService {
    /// Create a new chart service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a chart file (TOML, or JSON for `.json`).
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<ChartFile> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::ChartNotFound(path.to_path_buf()));
        }
        let content = self.fs.read_to_string(path).with_path_context("read", path)?;

        let format = ChartFormat::from_path(path);
        let chart = ChartFile::parse(&content, format).map_err(|message| ApplicationError::InvalidChart {
            path: path.to_path_buf(),
            format,
            message,
        })?;
        debug!(
            groups = chart.groups.len(),
            accounts = chart.accounts.len(),
            "chart file loaded"
        );
        Ok(chart)
    }

    /// Write the base chart to `path`; an existing file is only replaced with `force`.
    #[instrument(level = "debug", skip(self))]
    pub fn init(&self, path: &Path, force: bool) -> ApplicationResult<ChartFile> {
        if self.fs.exists(path) && !force {
            return Err(ApplicationError::ChartExists(path.to_path_buf()));
        }
        let chart = ChartFile::base();
        let format = ChartFormat::from_path(path);
        let content = chart
            .render(format)
            .map_err(|message| ApplicationError::Encode { format, message })?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            self.fs.create_dir_all(dir).with_path_context("create", dir)?;
        }
        self.fs.write(path, &content).with_path_context("write", path)?;
        debug!(groups = chart.groups.len(), "base chart written");
        Ok(chart)
    }

    /// Group forest of the chart with every sibling level ordered.
    #[instrument(level = "debug", skip(self))]
    pub fn group_forest(&self, path: &Path) -> ApplicationResult<Forest<AccountGroup>> {
        let chart = self.load(path)?;
        Ok(linearize(build_forest(chart.groups)?)?)
    }

    /// Groups of the chart in hierarchical display order.
    pub fn ordered_groups(&self, path: &Path) -> ApplicationResult<Vec<AccountGroup>> {
        Ok(self.group_forest(path)?.into_flattened())
    }

    /// Full chart: ordered groups with their ordered accounts.
    #[instrument(level = "debug", skip(self))]
    pub fn chart(&self, path: &Path, policy: OrphanPolicy) -> ApplicationResult<Chart> {
        let chart = self.load(path)?;
        Ok(assemble(chart.groups, chart.accounts, policy)?)
    }

    /// Validate a chart and summarize it.
    #[instrument(level = "debug", skip(self))]
    pub fn check(&self, path: &Path, policy: OrphanPolicy) -> ApplicationResult<ChartSummary> {
        let chart = self.chart(path, policy)?;
        Ok(Self::summarize(&chart))
    }

    pub fn summarize(chart: &Chart) -> ChartSummary {
        ChartSummary {
            groups: chart.group_count(),
            accounts: chart.leaf_count(),
            roots: chart.root_node().children.len(),
            base_groups: chart
                .iter()
                .filter(|(_, node)| node.group.as_ref().is_some_and(|g| g.immutable))
                .count(),
            depth: chart.iter().map(|(depth, _)| depth).max().unwrap_or(0),
            dropped: chart.dropped_leaves().to_vec(),
        }
    }
}
