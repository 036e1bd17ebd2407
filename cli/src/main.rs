mod dump;

use std::fs;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use quill_core::config::{BackendConfig, TargetKind};
use quill_core::error::{Level, QuillErrorExt};
use quill_core::location::Location;
use quill_core::lower::lower_program;
use quill_core::vm::{Value, VM};
use quill_core::{emit_unit, generate_error_report, Program, Session};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type CliResult<T> = Result<T, Box<dyn QuillErrorExt>>;

/// Failures that belong to the command line itself rather than the backend.
#[derive(Debug)]
struct CliError {
    message: String,
}

impl CliError {
    fn new(message: impl Into<String>) -> Box<dyn QuillErrorExt> {
        Box::new(CliError { message: message.into() })
    }
}

impl QuillErrorExt for CliError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        "quill.cli".to_string()
    }

    fn location(&self) -> Option<Location> {
        None
    }
}

fn boxed<E: QuillErrorExt + 'static>(error: E) -> Box<dyn QuillErrorExt> {
    Box::new(error)
}

fn main() {
    let cli = Command::new("quill")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Code generation backend for the curried functional IR");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));

    if let Err(error) = dispatch_commands(&matches) {
        let style = match error.level() {
            Level::Info => Style::new().for_stderr().blue().bold(),
            Level::Warning => Style::new().for_stderr().yellow().bold(),
            Level::Error => Style::new().for_stderr().red().bold(),
            Level::Critical => Style::new().for_stderr().on_red().white().bold(),
        };
        eprintln!("{}", style.apply_to(generate_error_report(error.as_ref())));
        std::process::exit(1);
    }
}

/// Route `log` records through a tracing subscriber on stderr. `RUST_LOG`
/// wins over the `-v` count.
fn init_logging(verbose: u8) {
    let filter_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn program_arg() -> Arg {
    Arg::new("file")
        .help("The IR program (JSON) to read")
        .required(true)
        .index(1)
        .value_parser(clap::value_parser!(PathBuf))
}

fn config_arg() -> Arg {
    Arg::new("config")
        .help("Backend configuration file (JSON)")
        .short('c')
        .long("config")
        .value_parser(clap::value_parser!(PathBuf))
        .value_name("FILE")
}

/// Sets up the CLI with its subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    cli.arg(
        Arg::new("verbose")
            .help("Raise log verbosity (repeatable)")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
            .global(true),
    )
    .subcommand_required(true)
    .subcommand(
        Command::new("build")
            .about("Generate target code for a program")
            .arg(program_arg())
            .arg(config_arg())
            .arg(
                Arg::new("target")
                    .help("Target language: py | js")
                    .short('t')
                    .long("target")
                    .value_parser(clap::value_parser!(String))
                    .value_name("TARGET"),
            )
            .arg(
                Arg::new("output")
                    .help("Write the generated code to FILE instead of stdout")
                    .short('o')
                    .long("output")
                    .value_parser(clap::value_parser!(PathBuf))
                    .value_name("FILE"),
            )
            .arg(
                Arg::new("pipeline")
                    .help("Register a declaration as a pipeline entry (repeatable)")
                    .short('p')
                    .long("pipeline")
                    .action(ArgAction::Append)
                    .value_parser(clap::value_parser!(String))
                    .value_name("NAME"),
            )
            .arg(
                Arg::new("dump")
                    .help("Print an intermediate stage instead of the code: ir | lowered | atoms")
                    .short('d')
                    .long("dump")
                    .value_parser(["ir", "lowered", "atoms"])
                    .value_name("STAGE"),
            ),
    )
    .subcommand(
        Command::new("run")
            .about("Evaluate a declaration with the reference evaluator")
            .arg(program_arg())
            .arg(config_arg())
            .arg(
                Arg::new("entry")
                    .help("Declaration to call")
                    .required(true)
                    .index(2),
            )
            .arg(
                Arg::new("args")
                    .help("Arguments as JSON values, applied one at a time")
                    .index(3)
                    .num_args(0..)
                    .allow_hyphen_values(true),
            ),
    )
    .subcommand(
        Command::new("atoms")
            .about("Show the atom table of a program")
            .arg(program_arg())
            .arg(config_arg()),
    )
}

fn load_config(sub_m: &ArgMatches) -> CliResult<BackendConfig> {
    let mut config = match sub_m.get_one::<PathBuf>("config") {
        Some(path) => BackendConfig::load_from_file(path).map_err(boxed)?,
        None => BackendConfig::default(),
    };
    if let Ok(Some(target)) = sub_m.try_get_one::<String>("target") {
        config.target = target.parse::<TargetKind>().map_err(boxed)?;
    }
    Ok(config)
}

fn load_program(sub_m: &ArgMatches) -> CliResult<Program> {
    let file = sub_m
        .get_one::<PathBuf>("file")
        .ok_or_else(|| CliError::new("missing program file"))?;
    log::info!("loading program {}", file.display());
    Program::load_from_file(file).map_err(boxed)
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches) -> CliResult<()> {
    match matches.subcommand() {
        Some(("build", sub_m)) => build(sub_m),
        Some(("run", sub_m)) => run(sub_m),
        Some(("atoms", sub_m)) => atoms(sub_m),
        _ => Err(CliError::new("no valid subcommand was used, see --help")),
    }
}

fn build(sub_m: &ArgMatches) -> CliResult<()> {
    let config = load_config(sub_m)?;
    let program = load_program(sub_m)?;

    let mut session = Session::new();
    if let Some(entries) = sub_m.get_many::<String>("pipeline") {
        for entry in entries {
            session.pipelines_mut().register(entry.clone());
        }
    }

    if let Some(stage) = sub_m.get_one::<String>("dump") {
        let text = dump::dump_stage(stage, &program, &mut session, &config)?;
        print!("{}", text);
        return Ok(());
    }

    let unit = lower_program(&program, &mut session, &config).map_err(boxed)?;
    let code = emit_unit(&unit, &config).map_err(boxed)?;

    match sub_m.get_one::<PathBuf>("output") {
        Some(path) => {
            fs::write(path, &code)
                .map_err(|e| CliError::new(format!("cannot write {}: {}", path.display(), e)))?;
            log::info!("wrote {} ({} bytes)", path.display(), code.len());
        }
        None => print!("{}", code),
    }
    Ok(())
}

fn run(sub_m: &ArgMatches) -> CliResult<()> {
    let config = load_config(sub_m)?;
    let program = load_program(sub_m)?;
    let entry = sub_m
        .get_one::<String>("entry")
        .ok_or_else(|| CliError::new("missing entry declaration"))?;

    let mut session = Session::new();
    let unit = lower_program(&program, &mut session, &config).map_err(boxed)?;
    let vm = VM::new(&unit).map_err(boxed)?;

    let mut args = Vec::new();
    if let Some(raw_args) = sub_m.get_many::<String>("args") {
        for raw in raw_args {
            let json: serde_json::Value = serde_json::from_str(raw)
                .map_err(|e| CliError::new(format!("argument `{}` is not JSON: {}", raw, e)))?;
            args.push(Value::from_json(&json).map_err(boxed)?);
        }
    }

    let result = vm.call(entry, args).map_err(boxed)?;
    match result.to_json() {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{}", result),
    }
    Ok(())
}

fn atoms(sub_m: &ArgMatches) -> CliResult<()> {
    let config = load_config(sub_m)?;
    let program = load_program(sub_m)?;
    let mut session = Session::new();
    let text = dump::dump_stage("atoms", &program, &mut session, &config)?;
    print!("{}", text);
    Ok(())
}
