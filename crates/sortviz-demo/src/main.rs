#![forbid(unsafe_code)]

//! sortviz binary entry point.

use sortviz_demo::{app, cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(opts.log_path.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = app::run(&opts) {
        tracing::error!(%e, "runtime error");
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
