//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = stopover_cli::run() {
        eprintln!("stopover: {err}");
        std::process::exit(1);
    }
}
