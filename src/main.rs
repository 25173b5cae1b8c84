use std::path::PathBuf;
use std::process;

use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;
use wait_event_gen::{GenerateOptions, GenerationStats, Mode};

/// Generate wait event sources and documentation from a wait event catalog.
///
/// Reads the catalog once and writes either the C artifacts (--code) or
/// the DocBook tables (--docs) into the output directory.
#[derive(Parser)]
#[command(name = "wait-event-gen", version, about)]
struct Cli {
    #[command(flatten)]
    mode: ModeArgs,

    /// Output directory for generated files.
    #[arg(long, default_value = ".", env = "WAIT_EVENT_GEN_OUTDIR")]
    outdir: PathBuf,

    /// Also write wait_event_map.json listing every generated enum member.
    #[arg(long, requires = "code")]
    manifest: bool,

    /// Suppress non-error output.
    #[arg(long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every artifact written.
    #[arg(long, short)]
    verbose: bool,

    /// Wait event catalog to read.
    input: PathBuf,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ModeArgs {
    /// Generate the C enums, lookup functions and introspection table.
    #[arg(long)]
    code: bool,

    /// Generate the DocBook documentation tables.
    #[arg(long)]
    docs: bool,
}

impl ModeArgs {
    fn mode(&self) -> Mode {
        if self.code { Mode::Code } else { Mode::Docs }
    }
}

/// `--quiet` overrides `RUST_LOG`; otherwise `RUST_LOG` wins over `--verbose`.
fn init_tracing(quiet: bool, verbose: bool) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else {
        let default_level = if verbose { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

fn run(cli: Cli) -> wait_event_gen::error::Result<()> {
    let options = GenerateOptions {
        mode: cli.mode.mode(),
        output_dir: cli.outdir,
        manifest: cli.manifest,
    };

    tracing::info!(
        input = %cli.input.display(),
        mode = ?options.mode,
        "loading wait event catalog"
    );
    let stats = wait_event_gen::generate(&cli.input, &options)?;
    report(&stats, &options);

    Ok(())
}

fn report(stats: &GenerationStats, options: &GenerateOptions) {
    tracing::info!(
        "Generated {} artifacts for {} events in {} classes into {}",
        stats.artifacts_written,
        stats.events,
        stats.classes,
        options.output_dir.display()
    );
    if stats.abi_preserved > 0 {
        tracing::info!(
            "Kept {} events in ABI-compatible position",
            stats.abi_preserved
        );
    }
    if stats.hand_maintained_skipped > 0 {
        tracing::info!(
            "Skipped enums for {} hand-maintained classes",
            stats.hand_maintained_skipped
        );
    }
}
