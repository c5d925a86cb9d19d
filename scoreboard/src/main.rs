use clap::Parser;
use cricket_common::config::Config;
use crossbeam_channel::bounded;
use log::{LevelFilter, error, info, warn};
#[cfg(debug_assertions)]
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::{
    append::rolling_file::{
        RollingFileAppender,
        policy::compound::{
            CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
        },
    },
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use scoreboard::{Projector, Reaction, Scoreboard, Signal};
use std::{
    io::{Write, stdout},
    path::PathBuf,
};

mod input;
mod render;

const APP_NAME: &str = "scoreboard";

#[derive(serde::Serialize, serde::Deserialize, Debug, Default)]
pub struct AppConfig {
    /// File of newline separated signals to read when none is given on the command line
    input_path: Option<PathBuf>,
    /// Display configuration to use when none is given on the command line
    display_config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,

    #[clap(long)]
    /// Directory within which log files will be placed, default is platform dependent
    log_location: Option<PathBuf>,

    #[clap(long, default_value = "5000000")]
    /// Max size in bytes that a log file is allowed to reach before being rolled over
    log_max_file_size: u64,

    #[clap(long, default_value = "3")]
    /// Number of archived logs to keep
    num_old_logs: u32,

    #[clap(long, short)]
    /// Display configuration file (TOML)
    config: Option<PathBuf>,

    #[clap(long)]
    /// Print each view as JSON instead of text
    json: bool,

    #[clap(long)]
    /// Include the full scorecard in text output
    scorecard: bool,

    /// File of newline separated JSON signals, stdin if not given
    input: Option<PathBuf>,
}

fn main() {
    let args = Cli::parse();
    init_logging(&args);

    let app_config: AppConfig = match confy::load(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to read config file, overwriting with default. Error: {e}");
            let config = AppConfig::default();
            if let Err(e) = confy::store(APP_NAME, None, &config) {
                error!("Failed to store default config: {e}");
            }
            config
        }
    };

    let config = match args.config.as_ref().or(app_config.display_config.as_ref()) {
        Some(path) => Config::new_from_file(path).unwrap_or_else(|_| {
            warn!("Using the default display configuration");
            Config::default()
        }),
        None => Config::default(),
    };

    let source = args.input.clone().or(app_config.input_path);
    let (tx, rx) = bounded::<Signal>(3);
    let reader = std::thread::spawn(move || {
        input::reading_thread(tx, source);
    });

    let mut scoreboard = Scoreboard::new(Projector::new(config));
    let mut out = stdout().lock();
    let draw = |out: &mut dyn Write, scoreboard: &Scoreboard| {
        let result = if args.json {
            render::render_json(scoreboard.view())
                .map_err(std::io::Error::other)
                .and_then(|json| writeln!(out, "{json}"))
        } else {
            writeln!(
                out,
                "{}",
                render::render_text(
                    scoreboard.view(),
                    scoreboard.connection_status(),
                    args.scorecard
                )
            )
        };
        result.unwrap_or_else(|e| error!("Failed to draw the scoreboard: {e}"));
    };

    draw(&mut out, &scoreboard);
    for signal in rx.iter() {
        match scoreboard.handle(signal) {
            Reaction::Redraw => draw(&mut out, &scoreboard),
            Reaction::Prompt(prompt) => {
                info!("Control surface prompt: {prompt}");
                if !args.json {
                    writeln!(out, ">> {prompt}")
                        .unwrap_or_else(|e| error!("Failed to draw the prompt: {e}"));
                }
            }
            Reaction::Ignored => {}
        }
    }

    if reader.join().is_err() {
        error!("Input thread panicked");
    }
}

fn init_logging(args: &Cli) {
    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let log_base_path = args.log_location.clone().unwrap_or_else(|| {
        let mut path = directories::BaseDirs::new()
            .expect("Could not find a directory to store logs")
            .data_local_dir()
            .to_path_buf();
        path.push("cricket-scoreboard-logs");
        path
    });
    let mut log_path = log_base_path.clone();
    let mut archived_log_path = log_base_path;
    log_path.push(format!("{APP_NAME}-log.txt"));
    archived_log_path.push(format!("{APP_NAME}-log-{{}}.txt.gz"));

    // Only log to the console in debug mode. Stdout carries the scoreboard itself.
    #[cfg(debug_assertions)]
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    let roller = FixedWindowRoller::builder()
        .build(
            archived_log_path
                .as_os_str()
                .to_str()
                .expect("Log path is not valid unicode"),
            args.num_old_logs,
        )
        .expect("Could not set up the log roller");
    let file_policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(args.log_max_file_size)),
        Box::new(roller),
    );
    let file_appender = RollingFileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new("[{d} {l:5} {M}] {m}{n}")))
        .build(log_path, Box::new(file_policy))
        .expect("Could not open the log file");

    // Other crates only log errors
    let root = Root::builder().appender("file_appender");
    #[cfg(debug_assertions)]
    let root = root.appender("console");
    let root = root.build(LevelFilter::Error);

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("file_appender", Box::new(file_appender)));

    #[cfg(debug_assertions)]
    let log_config = log_config.appender(Appender::builder().build("console", Box::new(console)));

    let log_config = log_config
        .logger(Logger::builder().build("scoreboard", log_level))
        .logger(Logger::builder().build("cricket_common", log_level))
        .build(root)
        .expect("Invalid logging configuration");

    log4rs::init_config(log_config).expect("Logging was already initialised");
    log_panics::init();
}
