use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::info;

use injective_coloring::batch::solve_all;
use injective_coloring::io::{read_records, InputFormat};
use injective_coloring::solver::SolverConfig;
use injective_coloring::validate::validate_known_graphs;

/// Deep recursion on large graphs needs more than the default main-thread stack.
const WORKER_STACK_BYTES: usize = 512 * 1024 * 1024;

struct Options {
    input: Option<PathBuf>,
    format: InputFormat,
    with_coloring: bool,
    config: SolverConfig,
    validate_only: bool,
}

fn make_parser() -> Command {
    Command::new("injcol")
        .about("Computes the injective chromatic number of graphs")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present("validate")
                .help("Input file"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(["graph6", "matrix", "dimacs"])
                .default_value("graph6")
                .help("Input format"),
        )
        .arg(
            Arg::new("coloring")
                .short('c')
                .long("coloring")
                .action(ArgAction::SetTrue)
                .help("Also print the witness coloring"),
        )
        .arg(
            Arg::new("time_limit")
                .short('t')
                .long("time-limit")
                .value_name("SECONDS")
                .value_parser(parse_seconds)
                .help("Per-graph search time limit"),
        )
        .arg(
            Arg::new("validate")
                .long("validate")
                .visible_alias("test")
                .action(ArgAction::SetTrue)
                .help("Check the solver against the bundled known graphs and exit"),
        )
}

/// Rejected values make clap exit with its usage status.
fn parse_seconds(arg: &str) -> Result<Duration, String> {
    let secs: f64 = arg.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| {
        format!("expected a finite, non-negative number of seconds, got {arg}")
    })
}

fn options_from(matches: &ArgMatches) -> Result<Options> {
    let format = matches
        .get_one::<String>("format")
        .map_or(Ok(InputFormat::default()), |s| s.parse())?;
    let time_limit = matches.get_one::<Duration>("time_limit").copied();
    Ok(Options {
        input: matches.get_one::<PathBuf>("input").cloned(),
        format,
        with_coloring: matches.get_flag("coloring"),
        config: SolverConfig {
            time_limit,
            ..SolverConfig::default()
        },
        validate_only: matches.get_flag("validate"),
    })
}

/// Returns `Ok(true)` when every graph was solved.
fn run(options: &Options) -> Result<bool> {
    if options.validate_only {
        return match validate_known_graphs() {
            Ok(checked) => {
                println!("Validation OK: {checked} known graphs match.");
                Ok(true)
            }
            Err(e) => {
                eprintln!("Validation FAILED: {e}");
                Ok(false)
            }
        };
    }

    let Some(path) = &options.input else {
        bail!("no input file given");
    };
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let records =
        read_records(BufReader::new(file), options.format).context("failed to read input")?;
    info!("{} graphs read ({} format)", records.len(), options.format);

    let outcome = solve_all(&records, &options.config);
    let mut out = BufWriter::new(io::stdout().lock());
    for report in &outcome.reports {
        writeln!(out, "{}", report.format_line(options.with_coloring))?;
    }
    out.flush()?;

    info!(
        "{} solved, {} failed",
        outcome.reports.len(),
        outcome.failures.len()
    );
    Ok(outcome.is_success())
}

fn main() -> ExitCode {
    let env = env_logger::Env::new()
        .filter_or("INJCOL_LOG", "warn")
        .write_style("INJCOL_LOG_STYLE");
    env_logger::init_from_env(env);

    let matches = make_parser().get_matches();
    let result = options_from(&matches).and_then(|options| {
        thread::Builder::new()
            .name("solver".into())
            .stack_size(WORKER_STACK_BYTES)
            .spawn(move || run(&options))
            .context("failed to spawn solver thread")?
            .join()
            .map_err(|_| anyhow!("solver thread panicked"))?
    });

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
