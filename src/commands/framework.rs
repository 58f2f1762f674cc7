//! # Framework Commands
//!
//! Subcommands implemented by the Vue CLI. Each one declares the options the
//! framework accepts, so `--help` documents them, and turns the parsed values
//! back into a `vue <command>` line that runs after the Node.js check.
//!
//! `add` and `invoke` pass any unrecognised plugin options through untouched.

use anyhow::Result;
use clap::Args;

use zjlab::config::Config;
use zjlab::defaults;
use zjlab::delegate::{self, Invocation};
use zjlab::node;

use super::{explain, run_framework, Context};

/// Arguments for `add` and `invoke`
#[derive(Args, Debug, Default)]
pub struct PluginArgs {
    /// Plugin name, e.g. `router` or `@vue/eslint`
    pub plugin: String,

    /// Use specified npm registry when installing dependencies (only for npm)
    #[arg(long, value_name = "URL")]
    pub registry: Option<String>,

    /// Options passed to the plugin's generator
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "PLUGIN_OPTIONS")]
    pub plugin_options: Vec<String>,
}

impl PluginArgs {
    fn to_invocation(&self, config: &Config, subcommand: &str) -> Invocation {
        delegate::vue(&config.commands, subcommand)
            .arg(&self.plugin)
            .option("registry", self.registry.as_deref())
            .args(self.plugin_options.iter().cloned())
    }
}

/// Arguments for `inspect`
#[derive(Args, Debug, Default)]
pub struct InspectArgs {
    /// Config paths to print, e.g. `resolve.alias`
    pub paths: Vec<String>,

    /// Mode to resolve the webpack config for
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Inspect a specific module rule
    #[arg(long, value_name = "RULE_NAME")]
    pub rule: Option<String>,

    /// Inspect a specific plugin
    #[arg(long, value_name = "PLUGIN_NAME")]
    pub plugin: Option<String>,

    /// List all module rule names
    #[arg(long)]
    pub rules: bool,

    /// List all plugin names
    #[arg(long)]
    pub plugins: bool,

    /// Show full function definitions in output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for `ui`
#[derive(Args, Debug, Default)]
pub struct UiArgs {
    /// Host used for the UI server (default: localhost)
    #[arg(short = 'H', long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port used for the UI server (by default search for available port)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Run in dev mode
    #[arg(short = 'D', long)]
    pub dev: bool,

    /// Don't output starting messages
    #[arg(long)]
    pub quiet: bool,

    /// Don't open browser on start and output port
    #[arg(long)]
    pub headless: bool,
}

/// Arguments for the legacy `init`
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Template to generate from
    pub template: String,

    /// Name of the project directory to create
    #[arg(value_name = "APP_NAME")]
    pub app_name: String,

    /// Use git clone when fetching remote template
    #[arg(short, long)]
    pub clone: bool,

    /// Use cached template
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for `config`
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Value to look up
    pub value: Option<String>,

    /// Get value from option
    #[arg(short, long, value_name = "PATH")]
    pub get: Option<String>,

    /// Set option value
    #[arg(short, long, num_args = 2, value_names = ["PATH", "VALUE"])]
    pub set: Option<Vec<String>>,

    /// Delete option from config
    #[arg(short, long, value_name = "PATH")]
    pub delete: Option<String>,

    /// Open config with default editor
    #[arg(short, long)]
    pub edit: bool,

    /// Outputs JSON result only
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `outdated`
#[derive(Args, Debug, Default)]
pub struct OutdatedArgs {
    /// Also check for alpha / beta / rc versions when upgrading
    #[arg(long)]
    pub next: bool,
}

/// Arguments for `upgrade`
#[derive(Args, Debug, Default)]
pub struct UpgradeArgs {
    /// Plugin to upgrade; all outdated plugins are listed when omitted
    #[arg(value_name = "PLUGIN_NAME")]
    pub plugin_name: Option<String>,

    /// Upgrade <package-name> to a version that is not latest
    #[arg(short, long, value_name = "VERSION")]
    pub to: Option<String>,

    /// Skip probing installed plugin, assuming it is upgraded from the designated version
    #[arg(short, long, value_name = "VERSION")]
    pub from: Option<String>,

    /// Use specified npm registry when installing dependencies
    #[arg(short, long, value_name = "URL")]
    pub registry: Option<String>,

    /// Upgrade all plugins
    #[arg(long)]
    pub all: bool,

    /// Also check for alpha / beta / rc versions when upgrading
    #[arg(long)]
    pub next: bool,
}

/// Arguments for `migrate`
#[derive(Args, Debug, Default)]
pub struct MigrateArgs {
    /// Plugin whose migrator should run
    #[arg(value_name = "PLUGIN_NAME")]
    pub plugin_name: Option<String>,

    /// The base version for the migrator to migrate from
    #[arg(short, long, value_name = "VERSION")]
    pub from: Option<String>,
}

fn inspect_invocation(args: &InspectArgs, config: &Config) -> Invocation {
    delegate::vue(&config.commands, "inspect")
        .args(args.paths.iter().cloned())
        .option("mode", args.mode.as_deref())
        .option("rule", args.rule.as_deref())
        .option("plugin", args.plugin.as_deref())
        .flag("rules", args.rules)
        .flag("plugins", args.plugins)
        .flag("verbose", args.verbose)
}

fn ui_invocation(args: &UiArgs, config: &Config) -> Invocation {
    delegate::vue(&config.commands, "ui")
        .option("host", args.host.as_deref())
        .option("port", args.port.map(|p| p.to_string()))
        .flag("dev", args.dev)
        .flag("quiet", args.quiet)
        .flag("headless", args.headless)
}

fn init_invocation(args: &InitArgs, config: &Config) -> Invocation {
    delegate::vue(&config.commands, "init")
        .arg(&args.template)
        .arg(&args.app_name)
        .flag("clone", args.clone)
        .flag("offline", args.offline)
}

fn config_invocation(args: &ConfigArgs, config: &Config) -> Invocation {
    let set = args
        .set
        .as_ref()
        .map(|pair| std::iter::once("--set".to_string()).chain(pair.iter().cloned()))
        .into_iter()
        .flatten();

    delegate::vue(&config.commands, "config")
        .args(args.value.iter().cloned())
        .option("get", args.get.as_deref())
        .args(set)
        .option("delete", args.delete.as_deref())
        .flag("edit", args.edit)
        .flag("json", args.json)
}

fn outdated_invocation(args: &OutdatedArgs, config: &Config) -> Invocation {
    delegate::vue(&config.commands, "outdated").flag("next", args.next)
}

fn upgrade_invocation(args: &UpgradeArgs, config: &Config) -> Invocation {
    delegate::vue(&config.commands, "upgrade")
        .args(args.plugin_name.iter().cloned())
        .option("to", args.to.as_deref())
        .option("from", args.from.as_deref())
        .option("registry", args.registry.as_deref())
        .flag("all", args.all)
        .flag("next", args.next)
}

fn migrate_invocation(args: &MigrateArgs, config: &Config) -> Invocation {
    delegate::vue(&config.commands, "migrate")
        .args(args.plugin_name.iter().cloned())
        .option("from", args.from.as_deref())
}

fn run(ctx: &Context, build: impl FnOnce(&Config) -> Invocation) -> Result<()> {
    let config = ctx.config()?;
    let invocation = build(&config);
    run_framework(ctx, &config, invocation, config.node_requirement())
}

/// Execute `add`.
pub fn add(args: PluginArgs, ctx: &Context) -> Result<()> {
    run(ctx, |config| args.to_invocation(config, "add"))
}

/// Execute `invoke`.
pub fn invoke(args: PluginArgs, ctx: &Context) -> Result<()> {
    run(ctx, |config| args.to_invocation(config, "invoke"))
}

/// Execute `inspect`.
pub fn inspect(args: InspectArgs, ctx: &Context) -> Result<()> {
    run(ctx, |config| inspect_invocation(&args, config))
}

/// Execute `ui`, which has its own Node.js requirement on top of the
/// general one.
pub fn ui(args: UiArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    node::check(&config.commands.node, defaults::UI_NODE_VERSION).map_err(explain)?;
    run_framework(
        ctx,
        &config,
        ui_invocation(&args, &config),
        config.node_requirement(),
    )
}

/// Execute the legacy `init`.
pub fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    run(ctx, |config| init_invocation(&args, config))
}

/// Execute `config`.
pub fn config(args: ConfigArgs, ctx: &Context) -> Result<()> {
    run(ctx, |config| config_invocation(&args, config))
}

/// Execute `outdated`.
pub fn outdated(args: OutdatedArgs, ctx: &Context) -> Result<()> {
    run(ctx, |config| outdated_invocation(&args, config))
}

/// Execute `upgrade`.
pub fn upgrade(args: UpgradeArgs, ctx: &Context) -> Result<()> {
    run(ctx, |config| upgrade_invocation(&args, config))
}

/// Execute `migrate`.
pub fn migrate(args: MigrateArgs, ctx: &Context) -> Result<()> {
    run(ctx, |config| migrate_invocation(&args, config))
}
