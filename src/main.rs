use clap::Parser as ClapParser;
use devscript::runner::{run_file, run_prompt};

#[derive(ClapParser)]
#[command(name = "devscript", version, about = "A tree-walking interpreter for DevScript")]
struct Cli {
    /// Script to run. Omit to start the REPL.
    path: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.path {
        Some(path) => run_file(&path),
        None => run_prompt(),
    };

    if let Err(err) = result {
        log::error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(70);
    }
}
