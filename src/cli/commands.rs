//! Command dispatch: builds the service container and runs one subcommand

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::domain::Identifier;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `zettl --help`".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => run_config(cli, command),
        Commands::Tree => _tree(&build_container(cli)?),
        Commands::Next { parent } => _next(&build_container(cli)?, parent.as_deref()),
        Commands::New { parent, message } => {
            _new(&build_container(cli)?, parent.as_deref(), message.as_deref())
        }
        Commands::Show { id } => _show(&build_container(cli)?, id),
        Commands::Edit { id } => _edit(&build_container(cli)?, id),
        Commands::Inspect { id } => _inspect(&build_container(cli)?, id),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli)?;
    let mut settings = Settings::load(Some(dir.as_path()))?;
    if let Some(notes_dir) = &cli.notes_dir {
        settings.notes_dir = notes_dir.clone();
    }
    debug!("notes_dir: {}", settings.notes_dir.display());
    Ok(settings)
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

/// Parse an optional parent; absent means the top level.
fn parent_identifier(parent: Option<&str>) -> CliResult<Identifier> {
    match parent {
        Some(p) => Ok(Identifier::parse(p)?),
        None => Ok(Identifier::root()),
    }
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer) -> CliResult<()> {
    let service = &container.zettel;
    let nodes = service.tree()?;
    if nodes.is_empty() {
        output::warning(&format!(
            "no notes in {}",
            service.notes_dir().display()
        ));
        return Ok(());
    }
    for node in &nodes {
        let preview = service.preview(&node.payload);
        output::tree_entry(&node.indent_marker(), &node.payload.id, &preview);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _next(container: &ServiceContainer, parent: Option<&str>) -> CliResult<()> {
    let parent = parent_identifier(parent)?;
    let next = container.zettel.next_child(&parent);
    output::info(&next);
    Ok(())
}

#[instrument(skip(container, message))]
fn _new(container: &ServiceContainer, parent: Option<&str>, message: Option<&str>) -> CliResult<()> {
    let parent = parent_identifier(parent)?;
    let note = container
        .zettel
        .create_child(&parent, message.unwrap_or_default())?;

    if message.is_none() {
        if let Err(e) = container.editor.open(&note.path) {
            // empty body, created only for the editor
            container.zettel.discard(&note)?;
            output::warning(&format!("editor failed, removed empty note {}", note.id));
            return Err(InfraError::Editor {
                message: e.to_string(),
            }
            .into());
        }
    }

    output::success(&format!("created {}", note.id));
    output::action("File", &note.path.display());
    Ok(())
}

#[instrument(skip(container))]
fn _show(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let id = Identifier::parse(id)?;
    let content = container.zettel.read(&id)?;
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[instrument(skip(container))]
fn _edit(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let id = Identifier::parse(id)?;
    if !container.zettel.exists(&id) {
        return Err(ApplicationError::NoteNotFound(id.to_string()).into());
    }
    let path = container.zettel.note_path(&id);
    container.editor.open(&path).map_err(|e| InfraError::Editor {
        message: e.to_string(),
    })?;
    Ok(())
}

#[instrument(skip(container))]
fn _inspect(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let id = Identifier::parse(id)?;
    let info = container.zettel.inspect(&id);
    output::field("identifier", &info.id);
    output::field("levels", &info.levels.join(" "));
    output::field("segments", &info.segments.join(" / "));
    output::field("depth", &info.depth);
    output::field("exists", if info.exists { "yes" } else { "no" });
    output::field("next child", &info.next_child);
    Ok(())
}

fn run_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => output::action("Global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            let local = config::local_config_path(&project_dir(cli)?);
            output::action("Local", &local.display());
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                config::global_config_path().ok_or_else(|| {
                    CliError::Usage("no global config directory on this platform".to_string())
                })?
            } else {
                config::local_config_path(&project_dir(cli)?)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}
