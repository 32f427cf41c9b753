//! vue-tsc-files: run vue-tsc on a subset of files with the project's tsconfig.

mod cli;
mod logging;
mod orchestrator;

use cli::Args;
use miette::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let args = Args::from_env()?;
    let code = orchestrator::run(args.partition()).await?;

    std::process::exit(code);
}
