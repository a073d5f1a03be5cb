//! Translator CLI entry point.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use translator_debug::{Tracer, TracerConfig};
use translator_foundation::{Config, SyntaxStrategy};
use translator_grammar::display;
use translator_runtime::{Repl, Session, format_report, serialize};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    grammar: Option<PathBuf>,
    scripts: Vec<PathBuf>,
    options: Config,
    show_help: bool,
    show_version: bool,
    // Debug flags
    trace: bool,
    dump_grammar: bool,
    dump_factorized: bool,
    dump_tokens: bool,
    save_artifacts: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--strategy" => {
                i += 1;
                let name = value(args, i, "--strategy")?;
                config.options.syntax.strategy = name.parse::<SyntaxStrategy>()?;
            }
            "--keep-left-recursion" => {
                config.options.grammar.convert_left_recursion_to_right = false;
            }
            "--include-token-terminals" => {
                config.options.grammar.include_terminals_inside_defined_tokens = true;
            }
            "--ignore-undefined" => config.options.syntax.ignore_undefined_tokens = true,
            "--tab-width" => {
                i += 1;
                let width = value(args, i, "--tab-width")?;
                config.options.lexer.tab_width = width
                    .parse()
                    .map_err(|_| format!("invalid --tab-width value: {width}"))?;
            }
            "--trace" => config.trace = true,
            "--dump-grammar" => config.dump_grammar = true,
            "--dump-factorized" => config.dump_factorized = true,
            "--dump-tokens" => config.dump_tokens = true,
            "--save-artifacts" => {
                i += 1;
                config.save_artifacts = Some(PathBuf::from(value(args, i, "--save-artifacts")?));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path if config.grammar.is_none() => config.grammar = Some(PathBuf::from(path)),
            path => config.scripts.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

/// Returns `Ok(false)` if any script was rejected.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(true);
    }

    if config.show_version {
        println!("translator {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    let Some(grammar_path) = config.grammar else {
        print_help();
        return Err("no grammar file given".into());
    };

    let tracer = if config.trace {
        Tracer::new(TracerConfig::new().enabled().to_stderr())
    } else {
        Tracer::disabled()
    };

    let mut session = if grammar_path.extension().is_some_and(|ext| ext == "msgpack") {
        let artifacts = serialize::load_from_file(&grammar_path)?;
        let mut session = Session::from_artifacts(artifacts, config.options);
        *session.tracer_mut() = tracer;
        session
    } else {
        Session::load(&grammar_path, config.options, tracer)?
    };

    if config.dump_grammar {
        println!("\x1b[1;36m=== Grammar ===\x1b[0m");
        print!("{}", display::grammar_text(session.grammar()));
        println!();
    }
    if config.dump_factorized {
        println!("\x1b[1;36m=== Factorized ===\x1b[0m");
        print!("{}", display::factorized_text(session.grammar()));
        println!();
    }
    if let Some(path) = &config.save_artifacts {
        serialize::save_to_file(session.artifacts(), path)?;
        eprintln!("saved compiled grammar to {}", path.display());
    }

    if config.scripts.is_empty() {
        let mut repl = Repl::new(session)?.with_tokens(config.dump_tokens);
        repl.run()?;
        return Ok(true);
    }

    let mut all_accepted = true;
    for path in &config.scripts {
        let script = fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {e}", path.display()))?;
        let report = session.run(&script)?;
        all_accepted &= report.is_accepted();

        println!("\x1b[1m{}\x1b[0m", path.display());
        print!("{}", format_report(&session, &report, config.dump_tokens));
    }

    Ok(all_accepted)
}

fn print_help() {
    println!(
        "\x1b[1mtranslator\x1b[0m - Grammar-driven lexer and syntax checker

\x1b[1mUSAGE:\x1b[0m
    translator [OPTIONS] <GRAMMAR> [SCRIPTS...]

\x1b[1mARGUMENTS:\x1b[0m
    <GRAMMAR>     XML grammar, or a .msgpack file saved with --save-artifacts
    [SCRIPTS...]  Scripts to check; without any, start the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help                  Print help information
    -V, --version               Print version information
    --strategy NAME             Syntax strategy: pushdown (default) or recursive
    --keep-left-recursion       Run left recursion as loops instead of rewriting it
    --include-token-terminals   Keep terminals inside defined tokens in the lexer
    --ignore-undefined          Skip undefined tokens during syntax analysis
    --tab-width N               Columns per tab in reported positions
    --save-artifacts PATH       Save the compiled grammar and automata

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace                     Trace every pipeline stage to stderr
    --dump-grammar              Print the grammar definitions
    --dump-factorized           Print the factorized grammar
    --dump-tokens               List tokens for each script

\x1b[1mEXAMPLES:\x1b[0m
    translator lang.xml                    Start the REPL for lang.xml
    translator lang.xml a.txt b.txt        Check two scripts
    translator --strategy recursive lang.xml a.txt
    translator --save-artifacts lang.msgpack lang.xml

\x1b[1mREPL COMMANDS:\x1b[0m
    :help                Show all commands
    :tokens              Toggle the token listing
    :grammar             Print the grammar
    :quit                Exit (or Ctrl+D)"
    );
}
