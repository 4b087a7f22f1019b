use crate::config::LogFormat;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise only this crate's events, at debug when verbose.
fn default_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "blood_bank=debug,info"
    } else {
        "blood_bank=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// 依設定選擇日誌格式：終端機用 compact，集中收集用 JSON
pub fn init(format: LogFormat, verbose: bool) {
    let registry = tracing_subscriber::registry().with(default_filter(verbose));
    let layer = fmt::layer().with_target(false);

    // init 只能呼叫一次；測試或重複初始化時忽略錯誤
    let _ = match format {
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Json => registry
            .with(layer.json().with_current_span(false))
            .try_init(),
    };
}
