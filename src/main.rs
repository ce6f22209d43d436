use std::ffi::OsString;

use tracing::debug;

use vidwall::{args, output};
use vidwall_core::Error;
use vidwall_infra::env_detect;
use vidwall_infra::launch::Player;
use vidwall_infra::resolve::{self, ConversionCache};
use vidwall_infra::tools;

fn main() {
    output::init_tracing();

    if let Err(err) = real_main() {
        output::print_error(&err);
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    use clap::Parser as _;

    let cli = args::Cli::parse();

    if !cli.video.is_file() {
        return Err(Error::NotFound { path: cli.video }.into());
    }

    // Nothing is converted or launched without a known display server.
    let server = env_detect::require_display_server()?;

    let cache = ConversionCache::from_home(cli.cache_policy.into())?;
    let player = Player::from_env();

    let mut needed: Vec<OsString> = Vec::new();
    if resolve::needs_conversion(&cli.video) {
        needed.push(cache.ffmpeg().bin().clone());
    }
    needed.extend(player.program_for(server).cloned());
    tools::require(&needed)?;

    let usable = cache.resolve(&cli.video)?;
    debug!(usable = %usable.display(), %server, "launching wallpaper");
    player.launch(&usable, server, cli.extra.as_deref())?;

    Ok(())
}
