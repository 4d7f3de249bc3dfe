use std::fs;
use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_APPENDER_NAME: &str = "stderr";
const FALLBACK_PATTERN: &str = "{h({l})} {m}{n}";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(CONFIG_FILE, Default::default()).is_ok() {
        return;
    }
    // no log4rs.yaml in the working directory: warnings only, on stderr
    match create_fallback_config().map(log4rs::init_config) {
        Some(Ok(_)) => {}
        Some(Err(e)) => eprintln!("Logger setup failed: {}", e),
        None => eprintln!("Logger setup failed: invalid fallback configuration"),
    }
}

fn create_fallback_config() -> Option<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build(FALLBACK_APPENDER_NAME, Box::new(stderr)))
        .build(
            Root::builder()
                .appender(FALLBACK_APPENDER_NAME)
                .build(LevelFilter::Warn),
        )
        .ok()
}

pub fn log_written_file(path: &Path) {
    match fs::metadata(path) {
        Ok(metadata) => log::debug!("Wrote {} ({} bytes)", path.display(), metadata.len()),
        Err(_) => log::debug!("Wrote {}", path.display()),
    }
}

pub fn log_array_shape(path: &Path, element_type: &str, shape: &str) {
    log::debug!(
        "Loaded {} array of shape {} from {}",
        element_type,
        shape,
        path.display()
    );
}
