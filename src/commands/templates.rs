//! # Templates Command Implementation
//!
//! Lists the template identifiers `create --template` accepts, with the URL
//! each one clones. Entries from the configuration file are included.

use anyhow::Result;
use clap::Args;

use zjlab::defaults;
use zjlab::output;
use zjlab::template::TemplateRegistry;

use super::Context;

/// List the templates available to `create`
#[derive(Args, Debug, Default)]
pub struct TemplatesArgs {
    /// Print only the template names, one per line
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `templates` command.
pub fn execute(args: TemplatesArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let registry = TemplateRegistry::from_config(&config);

    if args.quiet {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    println!("{}Templates:", output::emoji(&ctx.output, "📦 ", ""));
    println!(
        "  {}  {}",
        console::style(format!("{:<12}", defaults::DEFAULT_TEMPLATE)).cyan(),
        "vue create (Vue CLI presets)"
    );
    for (name, url) in registry.entries() {
        println!("  {}  {}", console::style(format!("{:<12}", name)).cyan(), url);
    }

    if let Some(pattern) = registry.pattern() {
        println!();
        println!("Other names clone {}", console::style(pattern).dim());
    }

    Ok(())
}
