use crate::prelude::*;
use clap::Parser;

mod config;
mod error;
mod generate;
mod image;
mod invoker;
mod parse;
mod prelude;
mod regenerate;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate slide decks, rewrite single slides and illustrate them with a chat completion model"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    #[clap(flatten)]
    pub model: config::ModelConfig,

    /// Whether to display additional information.
    #[clap(long, env = "DECKGEN_VERBOSE", global = true, default_value = "false")]
    pub verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Generate a deck from a topic
    Generate(crate::generate::GenerateOptions),

    /// Rewrite one slide of a saved deck
    Regenerate(crate::regenerate::RegenerateOptions),

    /// Generate an illustration for a single slide
    Image(crate::image::ImageOptions),

    /// Serve the generation endpoints over HTTP
    Serve(crate::server::ServeOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Generate(options) => crate::generate::run(options, app.global).await,
        SubCommands::Regenerate(options) => crate::regenerate::run(options, app.global).await,
        SubCommands::Image(options) => crate::image::run(options, app.global).await,
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
    }
}
