use std::io;

use tracing::{error, info};

use prison_escape::app;
use prison_escape::config::Settings;
use prison_escape::error::GameError;
use prison_escape::logging;
use prison_escape::terminal::TerminalGuard;

fn main() -> Result<(), GameError> {
    let settings = Settings::from_env()?;
    let log_file = logging::setup_file_logging(&settings.log_dir)?;
    info!(?settings, "starting");

    let result = {
        let _terminal = TerminalGuard::enter(io::stdout())?;
        app::run(io::stdout(), &settings)
    };

    if let Err(err) = &result {
        error!(%err, "game aborted");
    }
    println!("Log file: {}", log_file.display());
    result
}
