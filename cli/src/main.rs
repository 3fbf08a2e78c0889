mod commands;
mod terminal;

use commands::{CommandLine, Commands, origin, sweep};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    match commands.command {
        Commands::Origin => {
            print::header("sweep origin", commands.quiet);
            origin::origin()
        }
        Commands::Sweep(args) => {
            print::header("getting ready to sweep", commands.quiet);
            sweep::sweep(args, commands.quiet).await
        }
    }
}
