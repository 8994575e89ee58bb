use std::{path::PathBuf, sync::Arc};

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tokio::sync::Mutex;
use trackport::{cli, config, error, sources::Source, types::SharedAuthState};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Import a track list into a new Spotify playlist
    Import(ImportArgs),

    /// Show which Spotify track an entry resolves to
    Match(MatchArgs),

    /// Run the VK proxy that resolves VK links with a private token
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Text file with one "Artist - Title" entry per line
    #[clap(long)]
    pub file: Option<PathBuf>,

    /// VK audio or playlist link
    #[clap(long)]
    pub vk: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Playlist name (defaults to "Import from <SOURCE> - <date>")
    #[clap(long)]
    pub name: Option<String>,

    /// Only import exact matches; skip entries without one
    #[clap(long)]
    pub exact_only: bool,

    /// Create a public playlist
    #[clap(long)]
    pub public: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MatchArgs {
    /// Entry to resolve, e.g. "Imagine Dragons - Believer"
    pub entry: String,

    /// Only accept an exact match
    #[clap(long)]
    pub exact_only: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let auth_state: SharedAuthState = Arc::new(Mutex::new(None));
            cli::auth(auth_state).await;
        }
        Command::Import(opt) => {
            let source = match (opt.source.file, opt.source.vk) {
                (Some(path), _) => Source::File(path),
                (None, Some(link)) => Source::Vk(link),
                (None, None) => error!("Either --file or --vk is required."),
            };
            cli::import(source, opt.name, opt.exact_only, opt.public).await
        }
        Command::Match(opt) => cli::match_entry(opt.entry, opt.exact_only).await,
        Command::Serve => cli::serve().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
