//! Standalone resolver.
//!
//! On success stdout carries exactly one line: the usable MP4 path. Logs and
//! errors go to stderr so callers can read the path straight off stdout.

use std::io::Write;

use vidwall::{args, output};
use vidwall_infra::resolve::ConversionCache;

fn main() {
    output::init_tracing();

    if let Err(err) = real_main() {
        output::print_error(&err);
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    use clap::Parser as _;

    let cli = args::ResolveCli::parse();

    let cache = ConversionCache::from_home(cli.cache_policy.into())?;
    let path = cache.resolve(&cli.video)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", path.display())?;
    stdout.flush()?;
    Ok(())
}
