// Logging - tracing setup and forwarding to the host editor's log
//
// `HostLogLayer` forwards every event to a callback the host registers, so
// crate logs show up next to the editor's own. `init_logging` installs it
// together with a regular fmt layer.

use std::fmt::Write as FmtWrite;
use std::sync::{Arc, RwLock};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Callback receiving a level and a formatted `[target] message` line
pub type HostLogSink = Arc<dyn Fn(Level, &str) + Send + Sync>;

/// Longest message forwarded to the host before truncation
const MAX_MESSAGE_LEN: usize = 4096;

static HOST_SINK: RwLock<Option<HostLogSink>> = RwLock::new(None);

/// Register the host log sink, replacing any previous one
pub fn register_host_sink(sink: HostLogSink) {
    if let Ok(mut guard) = HOST_SINK.write() {
        *guard = Some(sink);
    }
}

/// Remove the host log sink
pub fn clear_host_sink() {
    if let Ok(mut guard) = HOST_SINK.write() {
        *guard = None;
    }
}

pub fn has_host_sink() -> bool {
    HOST_SINK.read().map(|guard| guard.is_some()).unwrap_or(false)
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides `default_level` when set. Returns an error if a
/// global subscriber is already installed.
pub fn init_logging(default_level: Level) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(HostLogLayer::new(default_level))
        .try_init()
}

/// tracing Layer that forwards events to the registered host sink
pub struct HostLogLayer {
    /// Minimum log level to forward
    min_level: Level,
}

impl HostLogLayer {
    pub fn new(min_level: Level) -> Self {
        Self { min_level }
    }

    fn forward(level: Level, message: &str) {
        let Ok(guard) = HOST_SINK.read() else {
            return;
        };
        let Some(sink) = guard.as_ref() else {
            return;
        };

        if message.len() > MAX_MESSAGE_LEN {
            let mut cut = MAX_MESSAGE_LEN - 96;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            sink(level, &format!("{}... [truncated]", &message[..cut]));
        } else {
            sink(level, message);
        }
    }
}

impl<S> Layer<S> for HostLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = *metadata.level();

        if level > self.min_level {
            return;
        }

        let mut message = String::with_capacity(256);

        let target = metadata.target();
        let target = target.strip_prefix("gemini_polish::").unwrap_or(target);
        write!(message, "[{}] ", target).ok();

        let mut visitor = MessageVisitor::new(&mut message);
        event.record(&mut visitor);

        Self::forward(level, &message);
    }
}

/// Visitor that writes the message field, then any other fields as `k=v`
struct MessageVisitor<'a> {
    message: &'a mut String,
}

impl<'a> MessageVisitor<'a> {
    fn new(message: &'a mut String) -> Self {
        Self { message }
    }

    fn separate(&mut self) {
        if !self.message.is_empty() && !self.message.ends_with(' ') {
            self.message.push(' ');
        }
    }
}

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.separate();
        if field.name() == "message" {
            write!(self.message, "{:?}", value).ok();
        } else {
            write!(self.message, "{}={:?}", field.name(), value).ok();
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.separate();
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            write!(self.message, "{}={}", field.name(), value).ok();
        }
    }
}
