use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const CONFIG_FILE: &str = "log4rs.yaml";
const CONSOLE_APPENDER: &str = "stderr";
const CONSOLE_PATTERN: &str = "{h({l})} {m}{n}";

#[ctor::ctor]
fn init() {
    if Path::new(CONFIG_FILE).is_file()
        && log4rs::init_file(CONFIG_FILE, Default::default()).is_ok()
    {
        return;
    }
    match console_config().map(log4rs::init_config) {
        Some(Ok(_)) => {}
        Some(Err(e)) => eprintln!("Unable to initialize logging: {}", e),
        None => eprintln!("Unable to initialize logging: invalid console configuration"),
    }
}

fn console_config() -> Option<Config> {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)))
        .build(
            Root::builder()
                .appender(CONSOLE_APPENDER)
                .build(LevelFilter::Info),
        )
        .ok()
}

pub fn log_cluster_sizes(counts: &[usize]) {
    let total: usize = counts.iter().sum();
    for (label, count) in counts.iter().enumerate() {
        let share = if total == 0 {
            0.0
        } else {
            *count as f64 * 100.0 / total as f64
        };
        log::debug!("cluster {}: {} pixels ({:.1}%)", label, count, share);
    }
}
