use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::{LOG_DIR_NAME, LOG_FILE_NAME, LOG_TO_FILE_ENV_VAR};

static LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

/// Set up tracing for the run. Diagnostics reach stderr only when RUST_LOG
/// is set, so normal runs print nothing but the gist messages.
/// GOST_LOG_TO_FILE additionally mirrors every `log_*` line to ~/.gost/gost.log.
pub fn init_logging() {
    let rust_log_present = env::var("RUST_LOG").is_ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if rust_log_present {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
    } else {
        tracing_subscriber::registry().with(env_filter).init();
    }

    if env::var(LOG_TO_FILE_ENV_VAR).is_ok()
        && let Err(e) = setup_file_logging()
    {
        eprintln!("Warning: Failed to enable file logging: {e}");
    }
}

fn setup_file_logging() -> anyhow::Result<()> {
    let log_dir = get_log_dir()?;

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)?;
    }

    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }

    log_debug(&format!(
        "File logging enabled: {}",
        log_file_path.display()
    ));

    Ok(())
}

fn get_log_dir() -> anyhow::Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    Ok(home_dir.join(LOG_DIR_NAME))
}

// No-op unless file logging was set up
fn write_to_file(level: &str, msg: &str) {
    if let Ok(mut guard) = LOG_FILE.lock()
        && let Some(ref mut file) = *guard
    {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(file, "[{}] [{}] [gost] {}", timestamp, level, msg);
        let _ = file.flush();
    }
}

pub fn log_error(msg: &str) {
    error!("{msg}");
    write_to_file("ERROR", msg);
}

pub fn log_warn(msg: &str) {
    warn!("{msg}");
    write_to_file("WARN", msg);
}

pub fn log_info(msg: &str) {
    info!("{msg}");
    write_to_file("INFO", msg);
}

pub fn log_debug(msg: &str) {
    debug!("{msg}");
    write_to_file("DEBUG", msg);
}
