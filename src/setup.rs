use tracing::{Level, Subscriber};
use tracing_subscriber::{
	filter::LevelFilter, fmt::writer::BoxMakeWriter, prelude::__tracing_subscriber_SubscriberExt,
	util::SubscriberInitExt,
};

/// Installs a global subscriber writing to stderr, so that stdout
/// stays free for the driver's report.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn logging(level: Level) {
	let collector = collector(level, BoxMakeWriter::new(std::io::stderr));

	if collector.try_init().is_err() {
		eprintln!("A global log subscriber is already installed.");
	}
}

#[must_use]
fn collector(level: Level, writer: BoxMakeWriter) -> impl Subscriber + Send + Sync + 'static {
	/// Like [`tracing_subscriber::fmt::time::Uptime`] but with
	/// hour/minute/second formatting for better clarity.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	struct Uptime(std::time::Instant);

	impl Default for Uptime {
		fn default() -> Self {
			Self(std::time::Instant::now())
		}
	}

	impl tracing_subscriber::fmt::time::FormatTime for Uptime {
		fn format_time(
			&self,
			w: &mut tracing_subscriber::fmt::format::Writer<'_>,
		) -> std::fmt::Result {
			let elapsed = self.0.elapsed();
			let secs = elapsed.as_secs() % 60;
			let mins = (elapsed.as_secs() / 60) % 60;
			let hours = elapsed.as_secs() / 3600;
			write!(w, "{hours:02}:{mins:02}:{secs:02}")
		}
	}

	let layer = tracing_subscriber::fmt::Layer::default()
		.with_timer(Uptime::default())
		.with_ansi(false)
		.with_writer(writer);

	tracing_subscriber::registry()
		.with(LevelFilter::from_level(level))
		.with(layer)
}
