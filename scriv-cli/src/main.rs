// Command-line interface for scriv
//
// Renders a markup source file into a DOCX or PDF document.
//
// Usage:
//  scriv <source-file> <format> <output-base>   - Write <output-base>.<format>
//  scriv --list-formats                          - List output formats
//
// Configuration is layered: built-in defaults, then ./scriv.toml if present, then the file given
// with --config. --title overrides the configured PDF title for one run.
//
// Logging goes to stderr. SCRIV_LOG (or RUST_LOG) takes precedence over --verbose and the
// configured level.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use scriv_babel::{publish, FormatRegistry, InputError, PublishArtifact, PublishSpec};
use scriv_config::{Loader, ScrivConfig, LOCAL_CONFIG_FILE};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VARS: [&str; 2] = ["SCRIV_LOG", "RUST_LOG"];

fn build_cli() -> Command {
    Command::new("scriv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render markup text to DOCX or PDF")
        .long_about(
            "scriv renders a small markup subset into a finished document.\n\n\
            Supported markup:\n  \
            - # / ## / ### headings\n  \
            - '- ' and '* ' list items\n  \
            - **bold** spans inside paragraphs\n\n\
            The output is written to <output-base>.<format>.\n\n\
            Examples:\n  \
            scriv notes.md pdf out/notes          # Writes out/notes.pdf\n  \
            scriv notes.md docx notes             # Writes notes.docx\n  \
            scriv notes.md pdf notes --title Q3   # PDF with a title line",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("source")
                .help("Path to the markup source file")
                .required_unless_present("list-formats")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("format")
                .help("Output format (docx or pdf)")
                .required_unless_present("list-formats")
                .index(2)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output-base")
                .help("Output path without extension")
                .required_unless_present("list-formats")
                .index(3)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a scriv.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .value_name("TEXT")
                .help("Title line drawn above the content (PDF only)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let source = matches
        .get_one::<String>("source")
        .expect("source is required");
    let format = matches
        .get_one::<String>("format")
        .expect("format is required");
    let output_base = matches
        .get_one::<String>("output-base")
        .expect("output-base is required");

    // Validate the format before reading configuration or touching the filesystem
    if let Err(e) = FormatRegistry::default().renderer(format) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_logging(matches.get_flag("verbose"), &config.logging.level);

    handle_render_command(source, format, output_base, &matches, &config).await;
}

fn init_logging(verbose: bool, configured: &str) {
    let from_env = LOG_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .and_then(|directives| EnvFilter::try_new(directives).ok());

    let filter = match from_env {
        Some(filter) => filter,
        None if verbose => EnvFilter::new("debug"),
        None => EnvFilter::try_new(configured).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // Ignore error if a subscriber is already set.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Handle the default render command
async fn handle_render_command(
    source: &str,
    format: &str,
    output_base: &str,
    matches: &ArgMatches,
    config: &ScrivConfig,
) {
    let content = read_source(Path::new(source)).await.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let mut options = config.render_options();
    if let Some(title) = matches.get_one::<String>("title") {
        options.title = Some(title.clone());
    }
    debug!(source, format, output_base, "rendering");

    let spec = PublishSpec::new(&content, format, output_base).with_options(options);
    match publish(spec).await {
        Ok(result) => match result.artifact {
            PublishArtifact::File(path) => println!("Document generated: {}", path.display()),
            PublishArtifact::InMemory(bytes) => {
                println!("Document generated in memory ({} bytes)", bytes.len())
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn read_source(path: &Path) -> Result<String, InputError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| InputError::UnreadableSource {
            path: path.to_path_buf(),
            source,
        })
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Output formats:");
    for name in registry.list_renderers() {
        if let Ok(format) = registry.get(&name) {
            println!("  {:<6} {} ({})", name, format.description(), format.mime_type());
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> ScrivConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
