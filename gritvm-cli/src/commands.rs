//! CLI command implementations.

use std::fs;
use std::io;
use std::path::Path;

use gritvm_assembler::{assemble, disassemble};
use gritvm_vm::{DumpOptions, Status, VM};
use log::info;

use crate::config::RunConfig;

/// Options accepted by `gvm run`, before the config file is merged in.
#[derive(Debug, Default, PartialEq, Eq)]
struct RunArgs {
    input: String,
    memory: Option<Vec<i64>>,
    max_steps: Option<u64>,
    config: Option<String>,
    dump_data: bool,
    dump_instructions: bool,
}

impl RunArgs {
    /// Combine with a config file. Flags win; boolean flags can only turn a
    /// section on.
    fn merge(&self, file: RunConfig) -> RunConfig {
        RunConfig {
            memory: self.memory.clone().unwrap_or(file.memory),
            max_steps: self.max_steps.or(file.max_steps),
            dump_data: self.dump_data || file.dump_data,
            dump_instructions: self.dump_instructions || file.dump_instructions,
        }
    }
}

/// Load and execute a program.
pub fn run(args: &[String]) -> Result<(), i32> {
    let args = parse_run_args(args)?;

    let file_config = match &args.config {
        Some(path) => RunConfig::load(Path::new(path)).map_err(|e| {
            eprintln!("error: {e}");
            1
        })?,
        None => RunConfig::default(),
    };
    let config = args.merge(file_config);

    let mut vm = VM::new();
    vm.set_step_limit(config.max_steps);

    let status = vm.load(&args.input, &config.memory).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    info!("loaded '{}': {status}", args.input);

    if status == Status::Errored {
        report_rejection(&args.input);
        return Err(2);
    }
    if status == Status::Waiting {
        eprintln!("note: '{}' has no instructions", args.input);
        return Ok(());
    }

    let status = vm.run();
    info!("'{}' finished after {} steps: {status}", args.input, vm.steps());

    let options = DumpOptions {
        data: config.dump_data,
        instructions: config.dump_instructions,
    };

    match status {
        Status::Halted => {
            if options.data || options.instructions {
                write_dump(&vm, options)?;
            }
            Ok(())
        }
        _ => {
            if let Some(fault) = vm.last_fault() {
                eprintln!("runtime error: {fault}");
                if let Some(instr) = vm.instructions().get(fault.at()) {
                    eprintln!("  --> instruction {}: {instr}", fault.at());
                }
            }
            write_dump(&vm, DumpOptions::all())?;
            Err(3)
        }
    }
}

/// Validate a program without running it.
pub fn check(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: check requires an input file");
        eprintln!("Usage: gvm check <prog.gvm>");
        return Err(1);
    }

    let input = &args[0];
    let text = read_source(input)?;

    match assemble(&text) {
        Ok(program) => {
            println!("OK: {input} ({} instructions)", program.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {input}: {e}");
            Err(2)
        }
    }
}

/// Print a program in canonical form.
pub fn fmt(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: fmt requires an input file");
        eprintln!("Usage: gvm fmt <prog.gvm>");
        return Err(1);
    }

    let input = &args[0];
    let text = read_source(input)?;

    let program = assemble(&text).map_err(|e| {
        eprintln!("error: {input}: {e}");
        2
    })?;

    print!("{}", disassemble(&program));
    Ok(())
}

fn parse_run_args(args: &[String]) -> Result<RunArgs, i32> {
    let mut iter = args.iter();
    let mut parsed = RunArgs::default();
    let mut input = None;

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--memory" => {
                let value = flag_value(&mut iter, "--memory")?;
                let memory = parse_memory(value).map_err(|e| {
                    eprintln!("error: {e}");
                    1
                })?;
                parsed.memory = Some(memory);
            }
            "--max-steps" => {
                let value = flag_value(&mut iter, "--max-steps")?;
                let limit = value.parse::<u64>().map_err(|_| {
                    eprintln!("error: invalid --max-steps value '{value}'");
                    1
                })?;
                parsed.max_steps = Some(limit);
            }
            "--config" => {
                parsed.config = Some(flag_value(&mut iter, "--config")?.to_string());
            }
            "--dump" => {
                parsed.dump_data = true;
                parsed.dump_instructions = true;
            }
            "--dump-data" => parsed.dump_data = true,
            "--dump-instructions" => parsed.dump_instructions = true,
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown option '{flag}'");
                return Err(1);
            }
            path => {
                if input.is_some() {
                    eprintln!("error: unexpected argument '{path}'");
                    return Err(1);
                }
                input = Some(path.to_string());
            }
        }
    }

    parsed.input = input.ok_or_else(|| {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: gvm run <prog.gvm> [--memory a,b,c] [--max-steps N] [--config f.toml]");
        1
    })?;
    Ok(parsed)
}

fn flag_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a str, i32> {
    iter.next().map(String::as_str).ok_or_else(|| {
        eprintln!("error: {flag} requires a value");
        1
    })
}

/// Parse a comma-separated list of integers. An empty string is an empty
/// memory.
fn parse_memory(value: &str) -> Result<Vec<i64>, String> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    value
        .split(',')
        .map(|cell| {
            let cell = cell.trim();
            cell.parse::<i64>()
                .map_err(|_| format!("invalid memory value '{cell}'"))
        })
        .collect()
}

fn read_source(input: &str) -> Result<String, i32> {
    fs::read_to_string(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })
}

/// Explain a load-time rejection with the offending line number.
fn report_rejection(input: &str) {
    let reason = fs::read_to_string(input)
        .map_err(|e| e.to_string())
        .and_then(|text| assemble(&text).map(|_| ()).map_err(|e| e.to_string()));
    match reason {
        Err(reason) => eprintln!("error: {input}: {reason}"),
        Ok(()) => eprintln!("error: {input}: program rejected"),
    }
}

fn write_dump(vm: &VM, options: DumpOptions) -> Result<(), i32> {
    vm.write_dump(&mut io::stderr(), options).map_err(|e| {
        eprintln!("error: cannot write dump: {e}");
        1
    })
}
