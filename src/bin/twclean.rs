use clap::{ArgAction, Parser};
use twitter_cleaner::{
    archive::Archive,
    cli,
    policy::Policy,
    twitter::{config::Credentials, Client},
    Cleaner, Error,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _ = dotenv::dotenv();
    let opts: Opts = Opts::parse();
    let _ = cli::init_logging(opts.verbose, opts.debug);

    let result = run(opts).await;

    if let Err(error) = &result {
        log::error!("{}", error);
        log::logger().flush();
    }

    result
}

async fn run(opts: Opts) -> Result<(), Error> {
    let max_age = cli::parse_duration(&opts.max_age)?;
    let policy = Policy::new(max_age, opts.keep.clone());

    let client = match &opts.key_file {
        Some(key_file) => Client::from_config_file(key_file).await?,
        None => Client::from_credentials(&opts.credentials()?).await?,
    };

    let archive = opts
        .twitter_archive_path
        .as_ref()
        .map(Archive::open)
        .transpose()?;

    if opts.dry_run {
        log::info!("Dry run: nothing will be deleted or unfavorited");
    }

    let cleaner = Cleaner::new(client, policy)
        .dry_run(opts.dry_run)
        .keep_likes(opts.keep_likes);

    let summary = cleaner.run(archive.as_ref()).await?;

    log::debug!("{:?}", summary);
    log::info!("Done");

    Ok(())
}

#[derive(Parser)]
#[clap(name = "twclean", version, author, about = "Clean up old tweets and likes")]
struct Opts {
    /// Don't delete tweets that contain these words or have these IDs
    #[clap(long, action = ArgAction::Append)]
    keep: Vec<String>,
    /// Delete tweets older than this (e.g. 720h, 90d)
    #[clap(long, default_value = "720h")]
    max_age: String,
    /// TOML file containing Twitter API keys (overrides the individual key options)
    #[clap(short, long)]
    key_file: Option<String>,
    /// Twitter consumer key
    #[clap(long, env = "TWITTER_CONSUMER_KEY", hide_env_values = true)]
    twitter_consumer_key: Option<String>,
    /// Twitter consumer secret
    #[clap(long, env = "TWITTER_CONSUMER_SECRET", hide_env_values = true)]
    twitter_consumer_secret: Option<String>,
    /// Twitter access token
    #[clap(long, env = "TWITTER_ACCESS_TOKEN", hide_env_values = true)]
    twitter_access_token: Option<String>,
    /// Twitter access token secret
    #[clap(long, env = "TWITTER_ACCESS_TOKEN_SECRET", hide_env_values = true)]
    twitter_access_token_secret: Option<String>,
    /// Path to an unzipped Twitter archive, whose tweets and likes will also be cleaned up
    #[clap(long)]
    twitter_archive_path: Option<String>,
    /// Report what would be done without deleting or unfavoriting anything
    #[clap(long)]
    dry_run: bool,
    /// Don't unfavorite tweets
    #[clap(long)]
    keep_likes: bool,
    /// Enable debug logs
    #[clap(long)]
    debug: bool,
    /// Level of verbosity
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u64,
}

impl Opts {
    fn credentials(&self) -> Result<Credentials, Error> {
        Credentials::from_parts(
            self.twitter_consumer_key.as_deref(),
            self.twitter_consumer_secret.as_deref(),
            self.twitter_access_token.as_deref(),
            self.twitter_access_token_secret.as_deref(),
        )
    }
}
