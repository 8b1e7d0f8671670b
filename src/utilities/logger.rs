use env_logger;
use std::io::Write;
use chrono::Local;
use log::LevelFilter;

pub fn initialize_logger(level_filter: LevelFilter) {
    let _ = env_logger::Builder::new()
        .format(|buffer, record| {
            writeln!(buffer,
                     "{} [{}] {} ({} line:{})",
                     Local::now().format("%Y-%m-%dT%H:%M:%S"),
                     record.level(),
                     record.args(),
                     record.file().unwrap_or("unknown"),
                     record.line().unwrap_or(0),
            )
        })
        .filter(None, level_filter)
        .parse_default_env()
        .try_init();
}
