use std::path::{Path, PathBuf};
use zoop_interpreter::{BufferedConsole, Interpreter, ZoopError};

/// A sample program shipped with this crate
pub fn zoop_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("zoop_files")
        .join(name)
}

/// Runs a sample program, answering its prompts with `input`
pub fn run_file(name: &str, input: &[&str]) -> (BufferedConsole, Result<(), ZoopError>) {
    let source = std::fs::read_to_string(zoop_file(name)).expect("could not read sample");
    run_source(&source, input)
}

pub fn run_source(source: &str, input: &[&str]) -> (BufferedConsole, Result<(), ZoopError>) {
    let mut console = BufferedConsole::with_input(input.iter().copied());
    let result = Interpreter::new(source).and_then(|interpreter| interpreter.run(&mut console));
    (console, result)
}
