//! GritVM command line front end.
//!
//! Exit codes:
//! - 0: Success (program halted, or had no instructions)
//! - 1: Usage, input, or configuration error
//! - 2: Program rejected at load time
//! - 3: Runtime fault (ERRORED or UNKNOWN)

mod commands;
mod config;

use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "check" => commands::check(&args[2..]),
        "fmt" => commands::fmt(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: gvm <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <prog.gvm> [options]     Load and execute a program");
    eprintln!("  check <prog.gvm>             Report the first malformed line, if any");
    eprintln!("  fmt <prog.gvm>               Print the program in canonical form");
    eprintln!();
    eprintln!("Run options:");
    eprintln!("  --memory a,b,c               Initial data memory");
    eprintln!("  --max-steps N                Stop with an error after N instructions");
    eprintln!("  --config <file.toml>         Read run settings from a TOML file");
    eprintln!("  --dump                       Print a full machine dump after the run");
    eprintln!("  --dump-data                  Include data memory in the dump");
    eprintln!("  --dump-instructions          Include instruction memory in the dump");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for engine tracing.");
}
