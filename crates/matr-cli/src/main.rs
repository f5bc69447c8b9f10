//! matr - turn pairwise scores into a dense matrix.

use clap::Parser;
use matr_cli::{logging, Cli, Formatter};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let formatter = Formatter::new(!cli.no_color);

    match matr_cli::execute_convert(&cli) {
        Ok(stats) => {
            if cli.verbose > 0 {
                eprintln!("{}", formatter.summary(&stats));
            }
        }
        Err(e) => {
            eprintln!("{}", formatter.error(&e.to_string()));
            std::process::exit(1);
        }
    }
}
