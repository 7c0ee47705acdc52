//! Categories command - print the expense category taxonomy.

use clap::Args;

use nfx_core::taxonomy::category_listing;

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON listing
    Json,
    /// Numbered text listing
    Text,
}

pub fn run(args: CategoriesArgs) -> anyhow::Result<()> {
    let listing = category_listing();

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        OutputFormat::Text => {
            for entry in &listing {
                println!("{}. {}", entry.id, entry.name);
                println!("   e.g. {}", entry.examples.join(", "));
            }
        }
    }

    Ok(())
}
