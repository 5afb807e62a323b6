//! Tracing subscriber: console layer, log file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::format::{LineKind, log_file_path};

/// Classify `event` and pull out its `message` field.
fn line_of(event: &tracing::Event<'_>) -> (LineKind, String) {
    struct Message(String);

    impl Visit for Message {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.0 = value.to_string();
            }
        }
    }

    let metadata = event.metadata();
    let mut message = Message(String::new());
    event.record(&mut message);
    (LineKind::of(*metadata.level(), metadata.target()), message.0)
}

/// Appends every event it sees to `<cache>/snek/<command>.log`.
///
/// The file is truncated at the start of each run and begins with a header
/// naming the version, command and UTC start time.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Returns `None` when the log file cannot be created; logging then
    /// continues on the console only.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version =
            option_env!("SNEK_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let started = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        fs::write(&path, format!("# snek {version} {command} started {started}\n")).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let (kind, msg) = line_of(event);
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{}", kind.file(&msg, chrono::Utc::now())).ok();
        }
    }
}

/// Console output: `==>` stage headers, indented progress, coloured
/// warnings and errors.
struct SnekFormatter;

impl<S, N> FormatEvent<S, N> for SnekFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let (kind, msg) = line_of(event);
        writeln!(writer, "{}", kind.console(&msg))
    }
}

/// Install the global subscriber for a `snek <command>` run.
///
/// The console shows INFO and above (DEBUG with `verbose`); warnings and
/// errors go to stderr, the rest to stdout. The log file always records
/// DEBUG and above. Call once, before anything logs.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .event_format(SnekFormatter)
                .with_writer(make_writer)
                .with_filter(console_level),
        )
        .with(FileLayer::new(command).map(|layer| layer.with_filter(LevelFilter::DEBUG)))
        .init();
}
