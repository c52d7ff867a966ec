use super::Parser;

#[derive(Parser, Debug)]
#[command(about = "Walks the social graph services against the configured store")]
pub struct Cli {
    /// Settings file, without or with the `.toml` extension
    #[arg(long)]
    pub settings: Option<String>,
}
