use blockfall_engine::{CatalogSeed, GameSession, Grid, ShapeCatalog};
use clap::Parser;
use rand::Rng as _;

use crate::{play::PlayApp, tui::Runtime};

/// Driver cadence of the reference configuration, in ticks per second.
const DEFAULT_TICK_RATE: f64 = 30.0;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Seed for the shape sequence (32 hex characters); random when omitted
    #[clap(long)]
    seed: Option<CatalogSeed>,
    /// Simulation ticks per second
    #[clap(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: f64,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let catalog = ShapeCatalog::standard_with_seed(seed);
    let session = GameSession::new(Grid::standard(), catalog);

    let mut app = PlayApp::new(session, args.tick_rate);
    Runtime::new().run(&mut app)?;

    Ok(())
}
