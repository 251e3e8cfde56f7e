use std::{fs::read_to_string, path::PathBuf, rc::Rc, time::Instant};

use clap::Parser;
use log::{info, LevelFilter};

use toyc::{
    compiler::compiler::generate,
    errors::errors::{CompileError, Error},
    format_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    toolchain::Toolchain,
    type_checker::type_checker::type_check,
};

/// Compiles a toy language source file to C++, builds it and runs it.
#[derive(Parser, Debug)]
#[command(name = "toyc", version)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Directory for the generated C++ source and the binary
    #[arg(long, value_name = "DIR", default_value = "build")]
    build_dir: PathBuf,

    /// C++ compiler used to build the generated source
    #[arg(long, value_name = "COMPILER", env = "TOYC_CXX", default_value = "g++")]
    cxx: String,

    /// Print the generated C++ instead of building it
    #[arg(long)]
    emit_cpp: bool,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG, when set, wins over the -v flags.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .try_init();
}

fn report(error: &Error, source: &str) -> i32 {
    eprint!("{}", format_error(error, source));
    eprintln!("{}", error);
    1
}

fn run_cli(cli: Cli) -> i32 {
    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.display().to_string());

    let source = match read_to_string(&cli.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", cli.input.display(), error);
            return 1;
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => return report(&error, &source),
    };
    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let mut program = match parse(tokens, Rc::new(file_name)) {
        Ok(program) => program,
        Err(error) => return report(&error, &source),
    };
    info!("Parsed in {:?}", parse_start.elapsed());

    let type_check_start = Instant::now();
    let environment = match type_check(&mut program) {
        Ok(environment) => environment,
        Err(error) => return report(&error, &source),
    };
    info!("Type checked in {:?}", type_check_start.elapsed());

    let generate_start = Instant::now();
    let cpp_source = match generate(&program, &environment) {
        Ok(cpp_source) => cpp_source,
        Err(fault) => {
            eprintln!("Error: {}", CompileError::Internal(fault));
            return 1;
        }
    };
    info!("Generated C++ in {:?}", generate_start.elapsed());
    info!("Total time for C++ generation: {:?}", start.elapsed());

    if cli.emit_cpp {
        print!("{}", cpp_source);
        return 0;
    }

    let toolchain = Toolchain::new(cli.cxx, cli.build_dir);
    match toolchain.build_and_run(&cpp_source) {
        Ok(stdout) => {
            info!("Total time: {:?}", start.elapsed());
            print!("{}", stdout);
            0
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    std::process::exit(run_cli(cli));
}
