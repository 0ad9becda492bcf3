use tracing::Instrument;
use tracing::Level;
use tracing::info_span;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

use crate::exception::Exception;
use crate::exception::JanitorResult;
use crate::exception::Severity;

pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false) // generally cloud log console doesn't support color
                .with_line_number(true)
                .with_thread_ids(true)
                .with_filter(LevelFilter::INFO),
        )
        .init();
}

macro_rules! log_event {
    (level = $level:ident, error_code = $error_code:expr, $($arg:tt)+) => {
        match $level {
            ::tracing::Level::TRACE => {},
            ::tracing::Level::DEBUG => {},
            ::tracing::Level::INFO => {},
            ::tracing::Level::WARN => {
                match $error_code {
                    Some(ref error_code) => ::tracing::warn!(error_code, $($arg)+),
                    None => ::tracing::warn!($($arg)+),
                }
            },
            ::tracing::Level::ERROR => {
                match $error_code {
                    Some(ref error_code) => ::tracing::error!(error_code, $($arg)+),
                    None => ::tracing::error!($($arg)+),
                }
            }
        }
    };
}

pub async fn start_action<T>(action: &str, task: T) -> JanitorResult<()>
where
    T: Future<Output = JanitorResult<()>>,
{
    let action_id = Uuid::now_v7().to_string();
    let action_span = info_span!("action", action, action_id);
    async {
        let result = task.await;
        if let Err(ref e) = result {
            log_exception(e);
        }
        result
    }
    .instrument(action_span)
    .await
}

fn log_exception(e: &Exception) {
    let level = match e.severity {
        Severity::Warn => Level::WARN,
        Severity::Error => Level::ERROR,
    };
    let message = &e.message;
    log_event!(
        level = level,
        error_code = e.code,
        backtrace = e.to_string(),
        "{message}"
    );
}
