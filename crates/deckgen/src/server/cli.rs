#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "DECKGEN_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "DECKGEN_HOST", default_value = "127.0.0.1")]
    pub host: String,
}
