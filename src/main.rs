use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use resumen::{
    cli::Cli,
    csv_source::CsvSource,
    locate::{self, TraceInput},
    report::{self, ReportOptions},
    rocpd::RocpdSource,
    stats::StatsTracker,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Run the record source for the resolved input and fold it into aggregates
fn build_tracker(input: &TraceInput) -> Result<StatsTracker> {
    let mut tracker = StatsTracker::new();
    match input {
        TraceInput::Csv(path) => {
            println!("Analyzing kernel trace: {}", path.display());
            let mut source = CsvSource::open(path)
                .with_context(|| format!("opening trace file {}", path.display()))?;
            tracker.consume(source.records());
        }
        TraceInput::Rocpd(path) => {
            println!("Analyzing rocpd database: {}", path.display());
            let source = RocpdSource::open(path)
                .with_context(|| format!("opening rocpd database {}", path.display()))?;
            tracker.consume(source.records()?);
        }
    }
    Ok(tracker)
}

fn main() -> Result<()> {
    // clap exits 2 on bad arguments by default; this tool's contract is
    // exit 1 with the usage message (help/version stay exit 0)
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e)
            if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion =>
        {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    init_tracing(args.debug);

    let input = locate::resolve_input(&args.path, args.db)?;
    let tracker = build_tracker(&input)?;

    let options = ReportOptions {
        top: args.top,
        timing_top: args.timing_top,
    };
    print!("{}", report::render(&tracker, &options));

    Ok(())
}
