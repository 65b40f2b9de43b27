//! shellsplit command line entry point.

use shellsplit::audit::AuditLogger;
use shellsplit::cli::{Invocation, USAGE};
use shellsplit::config::Config;

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let invocation = match Invocation::parse_os(std::env::args_os().skip(1)) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    // Config problems are reported but never fatal
    let cwd = std::env::current_dir().ok();
    let config = match Config::load(cwd.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            Config::default()
        }
    };

    let stdin = if invocation.needs_stdin() {
        let mut text = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut text) {
            eprintln!("error: failed to read stdin: {}", e);
            return ExitCode::FAILURE;
        }
        Some(text)
    } else {
        None
    };

    let execution = invocation.execute(&config, stdin.as_deref());

    // Audit failures are reported but never fatal
    if config.audit.is_enabled() {
        if let Some(path) = &config.audit.path {
            if let Err(e) = AuditLogger::append(Path::new(path), invocation.command, &execution) {
                eprintln!("Audit error: {}", e);
            }
        }
    }

    if let Some(output) = &execution.output {
        println!("{}", output);
    }
    ExitCode::SUCCESS
}
