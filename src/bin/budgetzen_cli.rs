use std::{env, io, process};

use budgetzen::{cli, init};

fn main() {
    init();

    let stdout = io::stdout();
    if let Err(err) = cli::run(env::args().skip(1), &mut stdout.lock()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
