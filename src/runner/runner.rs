use super::error::DriverError;
use crate::environment::Environment;
use crate::interpreter::Interpreter;
use encoding_rs::UTF_8;
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::fs::File;
use std::io::{self, Read, Write};

const PROMPT: &str = ">> ";

// Reads `path`, lossy-decodes it as UTF-8 (stray bytes become the Unicode
// replacement character rather than aborting the load), and runs it
// through a fresh global environment. Prints parse errors as a banner
// plus the list, or the program's final value.
pub fn run_file(path: &str) -> Result<(), DriverError> {
    let source = read_lossy(path)?;
    let interpreter = Interpreter::new();
    let env = Environment::new_global();

    match interpreter.run(&source, &env) {
        Ok(value) => {
            println!("{}", value.inspect());
            Ok(())
        }
        Err(errors) => {
            print_parse_errors(&errors);
            std::process::exit(65);
        }
    }
}

fn read_lossy(path: &str) -> Result<String, DriverError> {
    let file = File::open(path).map_err(|source| DriverError::Io {
        path: path.to_string(),
        source,
    })?;
    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(UTF_8))
        .build(file);
    let mut source = String::new();
    decoder
        .read_to_string(&mut source)
        .map_err(|source| DriverError::Io {
            path: path.to_string(),
            source,
        })?;
    Ok(source)
}

// A REPL loop: one persistent environment across the whole session, so
// a `var` bound on one line is visible on the next. A parse error prints
// a banner and the loop continues instead of exiting.
pub fn run_prompt() -> Result<(), DriverError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let interpreter = Interpreter::new();
    let env = Environment::new_global();

    loop {
        print!("{}", PROMPT);
        stdout.flush().map_err(|source| DriverError::Io {
            path: "<stdout>".to_string(),
            source,
        })?;

        let mut line = String::new();
        let bytes_read = stdin.read_line(&mut line).map_err(|source| DriverError::Io {
            path: "<stdin>".to_string(),
            source,
        })?;
        if bytes_read == 0 {
            break; // EOF / Ctrl-D
        }

        match interpreter.run(&line, &env) {
            Ok(value) => println!("{}", value.inspect()),
            Err(errors) => print_parse_errors(&errors),
        }
    }
    Ok(())
}

fn print_parse_errors(errors: &[String]) {
    log::warn!("parse failed with {} error(s)", errors.len());
    eprintln!("parser errors:");
    for err in errors {
        eprintln!("\t{}", err);
    }
}
