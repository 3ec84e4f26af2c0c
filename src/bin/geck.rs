//! Command-line interface for the GECK language tools
//!
//! Usage:
//!   geck pattern [--ignore-case] `<token>`...                 - Print the pattern for a token set
//!   geck grammar [--config `<file>`] [--enable/--disable `<flag>`] - Print the grammar as JSON
//!   geck groups [--config `<file>`] [--enable/--disable `<flag>`]  - List vocabulary groups
//!   geck lookup [`<text>`] [--column `<n>`] [--print]          - Open the documentation page
//!   geck commands                                          - List editor command names

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use geck_config::{GeckConfig, Loader};
use language_geck::geck::extension::{self, GeckExtension, LookupOutcome};
use language_geck::geck::flags::{FeatureFlag, FeatureFlags};
use language_geck::geck::grammar::Grammar;
use language_geck::geck::host::{BrowserLauncher, LaunchError, SystemBrowser};
use language_geck::geck::lookup::{DocSite, Selection};
use language_geck::geck::pattern::build_pattern;
use language_geck::geck::rebuild::is_group_enabled;
use language_geck::geck::vocabulary::standard_catalogue;
use url::Url;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("geck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Highlighting patterns and documentation lookup for GECK scripts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("pattern")
                .about("Build the regex pattern for a set of tokens")
                .arg(
                    Arg::new("tokens")
                        .help("Tokens to match as whole words")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(
                    Arg::new("ignore-case")
                        .long("ignore-case")
                        .short('i')
                        .help("Match tokens regardless of case")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(with_config_args(
            Command::new("grammar").about("Print the GECK grammar with generated rules as JSON"),
        ))
        .subcommand(with_config_args(
            Command::new("groups").about("List vocabulary groups and whether they are enabled"),
        ))
        .subcommand(with_config_args(
            Command::new("lookup")
                .about("Open the documentation page for a function")
                .arg(
                    Arg::new("text")
                        .help("Selected text, or the cursor line when --column is given")
                        .index(1),
                )
                .arg(
                    Arg::new("column")
                        .long("column")
                        .help("Cursor column in the line; looks up the word under it")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("print")
                        .long("print")
                        .help("Print the URL instead of opening a browser")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(Command::new("commands").about("List editor command names"))
        .get_matches();

    match matches.subcommand() {
        Some(("pattern", sub)) => handle_pattern_command(sub),
        Some(("grammar", sub)) => handle_grammar_command(sub),
        Some(("groups", sub)) => handle_groups_command(sub),
        Some(("lookup", sub)) => handle_lookup_command(sub),
        Some(("commands", _)) => handle_commands_command(),
        _ => unreachable!(),
    }
}

fn with_config_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and ./geck.toml"),
        )
        .arg(
            Arg::new("enable")
                .long("enable")
                .help("Enable a vocabulary flag (vegas, fose, nvse, nx)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("disable")
                .long("disable")
                .help("Disable a vocabulary flag (vegas, fose, nvse, nx)")
                .action(ArgAction::Append),
        )
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

/// Project configuration picked up from the working directory when present
const PROJECT_CONFIG: &str = "geck.toml";

fn load_config(matches: &ArgMatches) -> GeckConfig {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    for (arg, enabled) in [("enable", true), ("disable", false)] {
        for name in matches.get_many::<String>(arg).into_iter().flatten() {
            let flag = FeatureFlag::from_name(name)
                .unwrap_or_else(|| fail(format!("unknown flag '{}'", name)));
            loader = loader
                .set_override(&flag.config_key(), enabled)
                .unwrap_or_else(|e| fail(e));
        }
    }

    loader.build().unwrap_or_else(|e| fail(e))
}

/// Prints URLs instead of launching anything
struct PrintBrowser;

impl BrowserLauncher for PrintBrowser {
    fn open(&self, url: &Url) -> Result<(), LaunchError> {
        println!("{}", url);
        Ok(())
    }
}

/// Handle the pattern command
fn handle_pattern_command(matches: &ArgMatches) {
    let tokens: Vec<&String> = matches
        .get_many::<String>("tokens")
        .into_iter()
        .flatten()
        .collect();
    let source =
        build_pattern(&tokens, matches.get_flag("ignore-case")).unwrap_or_else(|e| fail(e));
    println!("{}", source);
}

/// Handle the grammar command
fn handle_grammar_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let docs = DocSite::from_config(&config.docs).unwrap_or_else(|e| fail(e));
    let mut ext = GeckExtension::new(
        FeatureFlags::from(config.highlight),
        Grammar::new(),
        PrintBrowser,
        docs,
    );

    let mut registered: Vec<String> = Vec::new();
    ext.activate(&mut registered).unwrap_or_else(|e| fail(e));

    let json = ext.grammar().to_json().unwrap_or_else(|e| fail(e));
    println!("{}", json);
}

/// Handle the groups command
fn handle_groups_command(matches: &ArgMatches) {
    let flags = FeatureFlags::from(load_config(matches).highlight);
    for group in standard_catalogue() {
        let state = if is_group_enabled(&group, &flags) {
            "on"
        } else {
            "off"
        };
        let gate = group.gate.map(|f| f.name()).unwrap_or("-");
        println!(
            "{:<32} {:<4} {:<6} {} tokens",
            group.scope,
            state,
            gate,
            group.tokens.len()
        );
    }
}

/// Handle the lookup command
fn handle_lookup_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let docs = DocSite::from_config(&config.docs).unwrap_or_else(|e| fail(e));

    let text = matches
        .get_one::<String>("text")
        .cloned()
        .unwrap_or_default();
    let selection = match matches.get_one::<usize>("column") {
        Some(column) => Selection::cursor(text, *column),
        None => Selection::text(text),
    };
    let selections = vec![selection];
    let flags = FeatureFlags::from(config.highlight);

    let outcomes = if matches.get_flag("print") {
        GeckExtension::new(flags, Grammar::new(), PrintBrowser, docs).lookup(&selections)
    } else {
        GeckExtension::new(flags, Grammar::new(), SystemBrowser::new(), docs).lookup(&selections)
    };

    for outcome in outcomes {
        if let LookupOutcome::NotOpened { url, reason } = outcome {
            match reason {
                LaunchError::Unavailable(msg) => {
                    eprintln!("Error: no browser available ({})", msg)
                }
                LaunchError::Failed(msg) => eprintln!("Error: browser failed to open ({})", msg),
            }
            println!("{}", url);
        }
    }
}

/// Handle the commands command
fn handle_commands_command() {
    for command in extension::Command::all() {
        println!("{}", command.name());
    }
}
