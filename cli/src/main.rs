mod commands;
mod terminal;

use commands::{CommandLine, Commands, config, profiles, purge, rescan, submit, targets};
use scanbatch_common::config::store::JsonFileStore;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let q_level: u8 = commands.quiet;

    logging::init_logging(q_level);
    print::banner(q_level);

    let store: JsonFileStore = match commands.config {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location()?,
    };

    let result = match commands.command {
        Commands::Submit(args) => submit::submit(args, &store, q_level).await,
        Commands::Targets => targets::targets(&store, q_level).await,
        Commands::Rescan { target, profile } => rescan::rescan(&target, &profile, &store).await,
        Commands::Purge { scans_only, yes } => purge::purge(scans_only, yes, &store).await,
        Commands::Profiles { remote } => profiles::profiles(remote, &store, q_level).await,
        Commands::Config { action } => config::config(action, &store, q_level),
    };

    print::end_of_program(q_level);
    result
}
