use clap::{Parser, Subcommand};

use self::{compare::CompareArg, plot::PlotArg, process::ProcessArg};

mod compare;
mod plot;
mod process;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Derive linguistic features from a LIWC spreadsheet
    Process(#[clap(flatten)] ProcessArg),
    /// Compare feature distributions between two groups
    Compare(#[clap(flatten)] CompareArg),
    /// Render distribution overlays and ranked difference charts
    Plot(#[clap(flatten)] PlotArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Process(arg) => process::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Plot(arg) => plot::run(&arg)?,
    }
    Ok(())
}
