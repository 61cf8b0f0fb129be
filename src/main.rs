use anyhow::Context;
use clap::Parser;
use mio_signals::core::ConfigProvider;
use mio_signals::utils::error::ErrorSeverity;
use mio_signals::utils::{logger, validation::Validate};
use mio_signals::{ActionHandler, AsyncSignals, CliConfig, Signals, WatchEngine};

fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting signal-watch");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.load_file().and_then(|_| config.validate()) {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let set = config.signals().context("resolving watched signals")?;

    // The runtime's worker threads inherit the signal mask of this thread,
    // so the signals have to be blocked before it is built.
    let signals = Signals::new(set).context("setting up signal handling")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    tracing::info!(
        "Watching {:?}, call `kill -s TERM {}` to stop",
        set,
        std::process::id()
    );

    let handler = ActionHandler::new(
        config.actions(),
        config.output_format(),
        std::io::stdout(),
    );
    let engine = WatchEngine::new(handler).with_max_signals(config.max_signals());

    let result = runtime.block_on(async {
        let mut source = AsyncSignals::new(signals)?;
        engine.run(&mut source).await
    });

    match result {
        Ok(summary) => {
            tracing::info!(
                "Received {} signals ({:?}), exiting with {}",
                summary.received,
                summary.per_signal,
                summary.exit_code
            );
            std::process::exit(summary.exit_code);
        }
        Err(e) => {
            tracing::error!(
                "Watching failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
