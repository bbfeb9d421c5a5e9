mod cli;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use sidecar_runtime::{DispatchStatus, Dispatcher, FrameSink, Workspace};

use cli::Cli;

fn main() -> ExitCode {
    // Diagnostics on stderr; stdout is reserved for protocol frames.
    sidecar_runtime::init_logging();

    let stdout = io::stdout();
    let mut sink = FrameSink::new(stdout.lock());

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            // Missing hook name: structured error, no stdin read.
            let _ = sink.error("usage: evolve <hook-name>");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli.hook, &mut sink) {
        Ok(DispatchStatus::Completed) => ExitCode::SUCCESS,
        Ok(DispatchStatus::UnknownHook) => ExitCode::FAILURE,
        Err(e) => {
            // Startup failure: workspace resolution or config parse.
            let _ = sink.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run<W: io::Write>(hook: &str, sink: &mut FrameSink<W>) -> Result<DispatchStatus> {
    let workspace = Workspace::locate()?;
    let dispatcher = Dispatcher::new(&workspace);
    dispatcher.dispatch(hook, &mut io::stdin().lock(), sink)
}
