mod app_context;
mod commands;
mod config;
mod gateway;
mod jobs;
mod metrics;
mod monitor;
mod sampler;
mod selection;
mod workflow;

use std::path::Path;
use std::sync::{Arc, Mutex};

use file_rotate::{ContentLimit, FileRotate, compression::Compression, suffix::AppendCount};
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::app_context::AppContext;
use crate::commands::{MyCommands, answer, answer_callback, answer_unknown};
use crate::config::{Config, LogConfig};

const CONFIG_PATH: &str = "config.toml";
const COMMAND_CONCURRENCY: usize = 2;

// JSON logs, teed to stdout and to a size-rotated file. The file is what
// /sendlog ships to the operator.
fn init_json_logging(log_config: &LogConfig) {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    if let Some(parent) = Path::new(&log_config.path).parent()
        && !parent.as_os_str().is_empty()
        && let Err(error) = std::fs::create_dir_all(parent)
    {
        eprintln!("failed to create log directory: {}", error);
    }

    let max_bytes = usize::try_from(log_config.max_file_size_bytes).unwrap_or(usize::MAX);
    let file_writer = Mutex::new(FileRotate::new(
        &log_config.path,
        AppendCount::new(log_config.keep_files as usize),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        None,
    ));

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(std::io::stdout.and(file_writer))
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

#[tokio::main]
async fn main() {
    let config = match Config::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Configuration error: {}", error);
            return;
        }
    };

    init_json_logging(&config.log);
    log::info!("PostgreSQL monitor bot is starting...");

    let bot = Bot::new(&config.bot_token);
    let app_context = Arc::new(AppContext::new(config, COMMAND_CONCURRENCY));

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<MyCommands>()
                .endpoint(answer),
        )
        .branch(Update::filter_callback_query().endpoint(answer_callback))
        .branch(Update::filter_message().endpoint(answer_unknown));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![app_context])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
