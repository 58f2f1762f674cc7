//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use zjlab::output::OutputConfig;

use crate::commands::{self, Context};

/// zjlab - Scaffold projects from team templates, powered by the Vue CLI
#[derive(Parser, Debug)]
#[command(name = "zjlab")]
#[command(version, about, long_about = None)]
#[command(after_help = "Run zjlab <command> --help for detailed usage of given command.")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,

    /// Path to the zjlab config file
    #[arg(long, global = true, value_name = "FILE", env = zjlab::defaults::CONFIG_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new project powered by vue-cli-service or a remote template
    Create(commands::create::CreateArgs),

    /// Install a plugin and invoke its generator in an already created project
    Add(commands::framework::PluginArgs),

    /// Invoke the generator of a plugin in an already created project
    Invoke(commands::framework::PluginArgs),

    /// Inspect the webpack config in a project with vue-cli-service
    Inspect(commands::framework::InspectArgs),

    /// Start and open the vue-cli ui
    Ui(commands::framework::UiArgs),

    /// Generate a project from a remote template (legacy API, requires @vue/cli-init)
    Init(commands::framework::InitArgs),

    /// Inspect and modify the config
    Config(commands::framework::ConfigArgs),

    /// (experimental) Check for outdated vue cli service / plugins
    Outdated(commands::framework::OutdatedArgs),

    /// (experimental) Upgrade vue cli service / plugins
    Upgrade(commands::framework::UpgradeArgs),

    /// (experimental) Run migrator for an already-installed cli plugin
    Migrate(commands::framework::MigrateArgs),

    /// Print debugging information about your environment
    Info(commands::info::InfoArgs),

    /// List the templates available to create
    Templates(commands::templates::TemplatesArgs),

    /// Serve the project in the current directory with vue-cli-service
    Serve(commands::service::ServiceArgs),

    /// Build the project in the current directory with vue-cli-service
    Build(commands::service::ServiceArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),

    #[command(external_subcommand)]
    External(Vec<String>),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let output = OutputConfig::from_env_and_flag(&self.color);
        output.apply();
        let ctx = Context::new(output, self.config);

        let Some(command) = self.command else {
            Cli::command().print_help()?;
            return Ok(());
        };

        match command {
            Commands::Create(args) => commands::create::execute(args, &ctx),
            Commands::Add(args) => commands::framework::add(args, &ctx),
            Commands::Invoke(args) => commands::framework::invoke(args, &ctx),
            Commands::Inspect(args) => commands::framework::inspect(args, &ctx),
            Commands::Ui(args) => commands::framework::ui(args, &ctx),
            Commands::Init(args) => commands::framework::init(args, &ctx),
            Commands::Config(args) => commands::framework::config(args, &ctx),
            Commands::Outdated(args) => commands::framework::outdated(args, &ctx),
            Commands::Upgrade(args) => commands::framework::upgrade(args, &ctx),
            Commands::Migrate(args) => commands::framework::migrate(args, &ctx),
            Commands::Info(args) => commands::info::execute(args, &ctx),
            Commands::Templates(args) => commands::templates::execute(args, &ctx),
            Commands::Serve(args) => commands::service::execute("serve", args, &ctx),
            Commands::Build(args) => commands::service::execute("build", args, &ctx),
            Commands::Completions(args) => commands::completions::execute(args),
            Commands::External(args) => commands::unknown::execute(args),
        }
    }
}

/// Route `log` records to stderr. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let result = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_with_template() {
        let cli = Cli::try_parse_from(["zjlab", "create", "my-app", "-t", "node", "--force"])
            .unwrap();
        match cli.command {
            Some(Commands::Create(args)) => {
                assert_eq!(args.app_name, "my-app");
                assert_eq!(args.template.as_deref(), Some("node"));
                assert!(args.force);
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_create_rejects_force_with_merge() {
        assert!(Cli::try_parse_from(["zjlab", "create", "app", "--force", "--merge"]).is_err());
    }

    #[test]
    fn test_parse_add_keeps_plugin_options() {
        let cli =
            Cli::try_parse_from(["zjlab", "add", "router", "--history", "hash"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.plugin, "router");
                assert_eq!(args.plugin_options, vec!["--history", "hash"]);
            }
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_forwards_hyphen_args() {
        let cli = Cli::try_parse_from(["zjlab", "serve", "--port", "8081"]).unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => assert_eq!(args.args, vec!["--port", "8081"]),
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_command_is_external() {
        let cli = Cli::try_parse_from(["zjlab", "craete", "x"]).unwrap();
        match cli.command {
            Some(Commands::External(args)) => assert_eq!(args, vec!["craete", "x"]),
            other => panic!("expected external, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["zjlab"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_parse_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["zjlab", "--log-level", "loud", "info"]).is_err());
        let cli = Cli::try_parse_from(["zjlab", "info", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, "debug");
    }
}
