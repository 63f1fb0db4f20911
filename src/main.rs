use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tool_index::history::{GitCli, HistoryResolver};
use tool_index::{config, output};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("TOOL_INDEX_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("TOOL_INDEX_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "tool-index")]
#[command(about = "Generate the landing page for a directory of static web tools")]
#[command(long_about = "\
Generate the landing page for a directory of static web tools

Every top-level directory containing an index.html is a tool. The generated
index.html at the root lists them all, most recently updated first.

Layout:

  ./
  ├── tool-index.toml          # Config (optional, see 'tool-index gen-config')
  ├── index.html               # Generated
  ├── template/index.html      # Page template (optional)
  ├── json-formatter/
  │   ├── index.html           # Entry page: <title>, description
  │   └── art.svg              # Card icon (optional)
  └── half-done/               # No index.html = not listed

Metadata resolution (first available wins):
  Name:        <title> text before '|' → directory name (json-formatter → \"Json Formatter\")
  Description: <meta name=\"description\"> → <p class=\"subtitle\"> text → empty
  Dates:       git commit history → directory modification time

Set RUST_LOG=debug to see how each tool was resolved.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing the tools
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the index page (default)
    Build,
    /// List discovered tools without writing anything
    Check {
        /// Print the tool records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock tool-index.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let config = config::load_config(&cli.root)?;
            let resolver = HistoryResolver::new(GitCli::default());
            let report = tool_index::build_index(&cli.root, &config, &resolver)?;
            output::print_build_output(&report.tools, &report.output);
        }
        Command::Check { json } => {
            let config = config::load_config(&cli.root)?;
            let resolver = HistoryResolver::new(GitCli::default());
            let tools = tool_index::collect_tools(&cli.root, &config, &resolver)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tools)?);
            } else {
                output::print_tools(&tools);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
