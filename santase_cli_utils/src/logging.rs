use itertools::Itertools;
pub use log::{debug, error, info, trace, warn};

#[derive(Debug, thiserror::Error)]
pub enum InitLoggingError {
    #[error("failed to install the logger: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

/// Install a `fern` logger writing to stderr.
/// `debug` lowers the level from info to debug, which also enables the search tree dumps.
pub fn init_logging(debug: bool) -> Result<(), InitLoggingError> {
    fern::Dispatch::new()
        .format(|formatcallback, fmtarguments_msg, logrecord| {
            formatcallback.finish(format_args!(
                "[{} {}({:?}) {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                logrecord.target(),
                std::thread::current().id(),
                logrecord.level(),
                fmtarguments_msg,
            ))
        })
        .level(if debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .chain(std::io::stderr())
        .apply()?;
    let fn_panic_handler_original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panicinfo| {
        error!("panic: {}", panicinfo);
        fn_panic_handler_original(panicinfo)
    }));
    info!(
        "Started: {}",
        std::env::args().format_with(" ", |str_arg, formatter| {
            formatter(&format_args!("\"{}\"", str_arg))
        }),
    );
    Ok(())
}
