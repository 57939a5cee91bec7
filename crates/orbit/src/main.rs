use clap::Parser;
use std::path::PathBuf;

mod config;
mod report;
mod script;
mod session;

use crate::config::OutputFormat;
use crate::script::Step;
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "orbit", version, about, long_about = None)]
struct Cli {
    /// Steps to replay after the first layout pass, e.g. `drag=120 jump=3 glide=0 reset items=4`
    steps: Vec<Step>,

    /// Config file to use instead of the per-user one
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Override the configured item count
    #[arg(short = 'n', long)]
    items: Option<usize>,

    /// Output format: text or json
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Write the default config file (if missing) and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut cfg = config::load_config(cli.config.as_deref())?;
    if let Some(items) = cli.items {
        cfg.items = items;
    }
    let format = cli.format.unwrap_or(cfg.format);
    log::debug!("starting with {} items, {:?}", cfg.items, cfg.layout);

    let mut session = Session::new(&cfg)?;
    for step in std::iter::once(Step::Layout).chain(cli.steps) {
        let frame = session.apply(step);
        println!("{}", report::render(&frame, format)?);
    }

    log::debug!(
        "finished at offset {:.2}, views {:?}",
        session.layout().offset(),
        session.host().stats()
    );
    Ok(())
}
