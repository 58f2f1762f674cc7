//! # Create Command Implementation
//!
//! This module implements the `create` subcommand, which starts a new
//! project either from a remote template or through `vue create`.
//!
//! ## Functionality
//!
//! - **Template Selection**: `--template <name>`, or a selection prompt when
//!   running on a terminal. Without a terminal the `default` template is used.
//! - **Remote Templates**: Clone the template, strip its git history, rename
//!   the package after the project directory and install dependencies.
//! - **Default Template**: Forward every option to `vue create`.
//! - **Existing Directories**: Refused unless `--force` (overwrite) or
//!   `--merge` is given, or the user picks one at the prompt.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

use zjlab::config::Config;
use zjlab::delegate::{self, Invocation};
use zjlab::error::Error;
use zjlab::manifest;
use zjlab::output;
use zjlab::package_manager::PackageManager;
use zjlab::scaffold::{self, InstallOptions, WriteMode};
use zjlab::template::{Template, TemplateRegistry};

use super::{explain, run_framework, Context};

/// Create a new project powered by vue-cli-service or a remote template
#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Name of the project directory to create
    #[arg(value_name = "APP_NAME")]
    pub app_name: String,

    /// Extra positional arguments; ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Skip prompts and use saved or remote preset
    #[arg(short, long, value_name = "PRESET_NAME")]
    pub preset: Option<String>,

    /// Skip prompts and use default preset
    #[arg(short, long)]
    pub default: bool,

    /// Skip prompts and use inline JSON string as preset
    #[arg(short, long = "inlinePreset", value_name = "JSON")]
    pub inline_preset: Option<String>,

    /// Use specified npm client when installing dependencies
    #[arg(short = 'm', long = "packageManager", value_name = "COMMAND", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Use specified npm registry when installing dependencies (only for npm)
    #[arg(short, long, value_name = "URL")]
    pub registry: Option<String>,

    /// Force git initialization with initial commit message
    #[arg(short, long, value_name = "MESSAGE", num_args = 0..=1, conflicts_with = "no_git")]
    pub git: Option<Option<String>>,

    /// Skip git initialization
    #[arg(short = 'n', long = "no-git")]
    pub no_git: bool,

    /// Overwrite target directory if it exists
    #[arg(short, long, conflicts_with = "merge")]
    pub force: bool,

    /// Merge target directory if it exists
    #[arg(long)]
    pub merge: bool,

    /// Use git clone when fetching remote preset
    #[arg(short, long)]
    pub clone: bool,

    /// Use specified proxy when creating project
    #[arg(short = 'x', long, value_name = "PROXY_URL")]
    pub proxy: Option<String>,

    /// Scaffold project without beginner instructions
    #[arg(short, long)]
    pub bare: bool,

    /// Template for initializing project
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Skip displaying "Get started" instructions
    #[arg(long = "skipGetStarted")]
    pub skip_get_started: bool,
}

impl CreateArgs {
    /// The `vue create` command line for these options.
    fn to_invocation(&self, config: &Config) -> Invocation {
        let git = match &self.git {
            Some(Some(message)) => vec!["--git".to_string(), message.clone()],
            Some(None) => vec!["--git".to_string()],
            None => Vec::new(),
        };

        delegate::vue(&config.commands, "create")
            .arg(&self.app_name)
            .option("preset", self.preset.as_deref())
            .flag("default", self.default)
            .option("inlinePreset", self.inline_preset.as_deref())
            .option(
                "packageManager",
                self.package_manager.map(|pm| pm.as_str()),
            )
            .option("registry", self.registry.as_deref())
            .args(git)
            .flag("no-git", self.no_git)
            .flag("force", self.force)
            .flag("merge", self.merge)
            .flag("clone", self.clone)
            .option("proxy", self.proxy.as_deref())
            .flag("bare", self.bare)
            .flag("skipGetStarted", self.skip_get_started)
    }

    /// Write mode given on the command line, if any.
    fn requested_mode(&self) -> Option<WriteMode> {
        if self.force {
            Some(WriteMode::Overwrite)
        } else if self.merge {
            Some(WriteMode::Merge)
        } else {
            None
        }
    }
}

/// Execute the `create` command.
pub fn execute(args: CreateArgs, ctx: &Context) -> Result<()> {
    if !args.extra.is_empty() {
        output::info(
            &ctx.output,
            "You provided more than one argument. The first one will be used as the app's \
             name, the rest are ignored.",
        );
    }

    let config = ctx.config()?;
    let registry = TemplateRegistry::from_config(&config);
    let interactive = output::is_interactive();

    let template = match &args.template {
        Some(name) => registry.lookup(name).map_err(explain)?,
        None if interactive => prompt_template(&registry)?,
        None => {
            log::info!("no terminal for the template prompt; using the default template");
            Template::Default
        }
    };

    match template {
        Template::Default => run_framework(
            ctx,
            &config,
            args.to_invocation(&config),
            config.node_requirement(),
        ),
        Template::Remote { name, url } => {
            let target = PathBuf::from(&args.app_name);
            let mode = resolve_write_mode(&args, &target, interactive)?;
            create_from_template(ctx, &config, &args, &name, &url, &target, mode)
        }
    }
}

fn prompt_template(registry: &TemplateRegistry) -> Result<Template> {
    let names = registry.names();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("which template you need?")
        .items(&names)
        .default(0)
        .interact()?;

    template_at(registry, &names, selection)
}

fn template_at(registry: &TemplateRegistry, names: &[String], selection: usize) -> Result<Template> {
    let name = names.get(selection).ok_or(Error::Cancelled)?;
    registry.lookup(name).map_err(explain)
}

/// Decide what to do with the target directory.
fn resolve_write_mode(args: &CreateArgs, target: &Path, interactive: bool) -> Result<WriteMode> {
    if !target.exists() {
        return Ok(WriteMode::Create);
    }
    let working_dir = scaffold::is_working_dir(target).map_err(explain)?;
    if let Some(mode) = args.requested_mode() {
        if mode == WriteMode::Overwrite && working_dir {
            return Err(explain(Error::OverwriteWorkingDir {
                path: target.to_path_buf(),
            }));
        }
        return Ok(mode);
    }
    if !interactive {
        return Err(explain(Error::TargetExists {
            path: target.to_path_buf(),
        }));
    }

    if working_dir {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Generate project in current directory?")
            .default(true)
            .interact()?;
        return if confirmed {
            Ok(WriteMode::Merge)
        } else {
            Err(Error::Cancelled.into())
        };
    }

    let choices = ["Overwrite", "Merge", "Cancel"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Target directory {} already exists. Pick an action:",
            target.display()
        ))
        .items(&choices)
        .default(0)
        .interact()?;

    match selection {
        0 => Ok(WriteMode::Overwrite),
        1 => Ok(WriteMode::Merge),
        _ => Err(Error::Cancelled.into()),
    }
}

fn create_from_template(
    ctx: &Context,
    config: &Config,
    args: &CreateArgs,
    name: &str,
    url: &str,
    target: &Path,
    mode: WriteMode,
) -> Result<()> {
    let spinner = output::spinner(
        &ctx.output,
        &format!("git clone the {} repo from {}", name, url),
    );
    let fetched = scaffold::fetch(&config.commands, url, target, mode);
    spinner.finish_and_clear();

    if let Err(err) = fetched {
        output::error(&ctx.output, "git clone the repo failed");
        return Err(explain(err));
    }
    output::success(&ctx.output, "clone the repo");

    output::info(
        &ctx.output,
        &format!(
            "install the app's dependencies at {}",
            console::style(target.display()).cyan()
        ),
    );
    let options = InstallOptions {
        package_manager: args.package_manager.or(config.package_manager),
        registry: args.registry.clone().or_else(|| config.registry.clone()),
    };

    let installed = match scaffold::install(&config.commands, target, &options) {
        Ok(installed) => installed,
        Err(err) => {
            output::error(&ctx.output, "install failed");
            return Err(explain(err));
        }
    };
    output::success(&ctx.output, "install ready, you can run your app now");

    if !args.skip_get_started {
        print_get_started(target, &installed.package_manager);
    }

    Ok(())
}

fn print_get_started(target: &Path, package_manager: &PackageManager) {
    println!();
    println!("  Get started with the following commands:");
    println!();
    if !scaffold::is_working_dir(target).unwrap_or(false) {
        println!("    {}", console::style(format!("$ cd {}", target.display())).cyan());
    }
    if let Some(script) = manifest::start_script(target) {
        println!(
            "    {}",
            console::style(format!("$ {}", package_manager.run_script_hint(&script))).cyan()
        );
    }
    println!();
}
