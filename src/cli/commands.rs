//! Command dispatch: maps parsed arguments onto the chart service.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::Chart;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, OutputFormat, Settings};
use crate::domain::{AccountGroup, Forest, OrphanPolicy};
use crate::infrastructure::ServiceContainer;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Commands::Chart { file, format, strict } => {
            let format = format.unwrap_or(container.settings.format);
            cmd_chart(container, file.as_deref(), format, *strict)
        }
        Commands::Groups { file } => cmd_groups(container, file.as_deref()),
        Commands::Init { file, force } => cmd_init(container, file.as_deref(), *force),
        Commands::Check { file, strict } => cmd_check(container, file.as_deref(), *strict),
        Commands::Config { command } => cmd_config(cli, container, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Chart file from the argument, else from the `chart_file` setting.
fn resolve_chart_path(settings: &Settings, file: Option<&Path>) -> CliResult<PathBuf> {
    file.map(Path::to_path_buf)
        .or_else(|| settings.chart_file.clone())
        .ok_or_else(|| {
            CliError::Usage("no chart file given and no chart_file configured".to_string())
        })
}

fn orphan_policy(settings: &Settings, strict: bool) -> OrphanPolicy {
    if strict {
        OrphanPolicy::Strict
    } else {
        settings.orphan_policy
    }
}

#[instrument(level = "debug", skip(container))]
fn cmd_chart(
    container: &ServiceContainer,
    file: Option<&Path>,
    format: OutputFormat,
    strict: bool,
) -> CliResult<()> {
    let path = resolve_chart_path(&container.settings, file)?;
    let policy = orphan_policy(&container.settings, strict);
    let chart = container.chart_service.chart(&path, policy)?;

    match format {
        OutputFormat::Tree => output::info(&chart.to_tree_string()),
        OutputFormat::List => {
            for line in list_lines(&chart) {
                output::info(&line);
            }
        }
        OutputFormat::Json => output::info(&serde_json::to_string_pretty(&chart)?),
    }
    report_dropped(chart.dropped_leaves());
    Ok(())
}

/// One line per group and account in display order, indented by level.
pub fn list_lines(chart: &Chart) -> Vec<String> {
    let mut lines = Vec::new();
    for (depth, node) in chart.iter() {
        let Some(group) = &node.group else {
            continue;
        };
        let indent = "  ".repeat(depth - 1);
        lines.push(format!("{indent}{}", group.name));
        for account in &node.leaves {
            lines.push(format!("{indent}  - {}", account.name));
        }
    }
    lines
}

#[instrument(level = "debug", skip(container))]
fn cmd_groups(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let path = resolve_chart_path(&container.settings, file)?;
    let forest = container.chart_service.group_forest(&path)?;
    debug!(count = forest.len(), "groups ordered");
    for line in group_lines(&forest) {
        output::info(&line);
    }
    Ok(())
}

/// Group names in display order, indented by nesting level.
pub fn group_lines(forest: &Forest<AccountGroup>) -> Vec<String> {
    forest
        .iter()
        .map(|(idx, node)| format!("{}{}", "  ".repeat(forest.depth_of(idx)), node.data.name))
        .collect()
}

#[instrument(level = "debug", skip(container))]
fn cmd_init(container: &ServiceContainer, file: Option<&Path>, force: bool) -> CliResult<()> {
    let path = resolve_chart_path(&container.settings, file)?;
    let chart = container.chart_service.init(&path, force)?;
    output::success(&format!("created {}", path.display()));
    for group in &chart.groups {
        output::detail(&group.name);
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_check(container: &ServiceContainer, file: Option<&Path>, strict: bool) -> CliResult<()> {
    let path = resolve_chart_path(&container.settings, file)?;
    let policy = orphan_policy(&container.settings, strict);
    let summary = container.chart_service.check(&path, policy)?;

    output::success(&format!("{} is consistent", path.display()));
    output::detail(&format!("groups:   {}", summary.groups));
    output::detail(&format!("accounts: {}", summary.accounts));
    output::detail(&format!("roots:    {}", summary.roots));
    output::detail(&format!("base:     {}", summary.base_groups));
    output::detail(&format!("depth:    {}", summary.depth));
    report_dropped(&summary.dropped);
    Ok(())
}

fn report_dropped(dropped: &[String]) {
    for account in dropped {
        output::warning(&format!("account '{account}' dropped: its group does not exist"));
    }
}

fn cmd_config(cli: &Cli, container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective configuration");
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files (lowest to highest precedence)");
            if let Some(global) = global_config_path() {
                show_config_path("global", &global);
            }
            let project = match &cli.project_dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir().map_err(|e| {
                    CliError::InvalidArgs(format!("cannot determine current directory: {e}"))
                })?,
            };
            show_config_path("local", &local_config_path(&project));
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

fn show_config_path(label: &str, path: &Path) {
    let line = format!("{label}: {}", path.display());
    if path.exists() {
        output::success_detail(&line);
    } else {
        output::failure(&line);
    }
}
