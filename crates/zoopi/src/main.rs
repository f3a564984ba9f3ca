use crate::args::{Args, Emit};
use chrono::Utc;
use clap::Parser;
use eyre::eyre;
use log::{debug, trace, Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use std::io::stderr;
use std::path::Path;
use std::process::ExitCode;
use zoop_interpreter::{normalize_source, Console, Interpreter, StdConsole};

mod args;

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_level_filter())?;
    trace!("starting zoopi with args {args:?}");
    debug!("zoopi version: {}", env!("CARGO_PKG_VERSION"));

    match interpret(&args, &mut StdConsole)? {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Loads and runs the file named in `args`. A language error comes back as its rendered diagnostic.
fn interpret(args: &Args, console: &mut dyn Console) -> eyre::Result<Result<(), String>> {
    let source = read_source(&args.file)?;
    let interpreter = match Interpreter::new(&source) {
        Ok(interpreter) => interpreter,
        Err(err) => {
            let source = normalize_source(&source);
            return Ok(Err(err.render(&source).to_string()));
        }
    };

    match args.emit {
        Some(Emit::Tokens) => println!("{:#?}", interpreter.tokens()),
        Some(Emit::Program) => println!("{:#?}", interpreter.program()),
        None => {}
    }

    debug!("running {:?}", args.file);
    Ok(interpreter
        .run(console)
        .map_err(|err| err.render(interpreter.source()).to_string()))
}

fn read_source(path: &Path) -> eyre::Result<String> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("zoop") {
        return Err(eyre!("Can only interpret files of type zoop (.zoop)"));
    }
    std::fs::read_to_string(path)
        .map_err(|_| eyre!("No such file or directory was found in path: {}", path.display()))
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let pid = sysinfo::get_current_pid()
        .map(|pid| pid.to_string())
        .unwrap_or_default();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} {:>5} {} --- [{:>16}] {:<32} : {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level().if_supports_color(Stderr, |text| match text {
                    Level::Error => text.bright_red().to_string(),
                    Level::Warn => text.bright_yellow().to_string(),
                    Level::Info => text.green().to_string(),
                    Level::Debug => text.blue().to_string(),
                    Level::Trace => text.purple().to_string(),
                }),
                pid,
                std::thread::current()
                    .name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("{:?}", std::thread::current().id())),
                record.target(),
                message
            ))
        })
        .level(level_filter)
        .chain(stderr())
        .apply()?;
    Ok(())
}
