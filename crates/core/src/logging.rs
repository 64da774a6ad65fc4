//! Process-wide logging bootstrap, mirroring the dual terminal+file logger
//! the teacher wires up behind its `server` feature.

use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Initializes the global logger. Safe to call once at process start; a
/// second call is a programmer error and will panic, same as upstream
/// `log::set_logger`.
pub fn init(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();
    CombinedLogger::init(vec![TermLogger::new(
        level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .expect("logger already initialized");
}
