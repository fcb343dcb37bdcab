//! Ghostcell -- a factory-conquest bot speaking the referee's turn protocol.
//!
//! Reads the init block and then one turn block at a time from stdin, and
//! answers each turn with a single order line on stdout. Diagnostics go to
//! stderr so they never corrupt the reply stream.

use std::env;
use std::io::{self, BufRead};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ghostcell::config::EngineConfig;
use ghostcell::engine::{Engine, EngineError};
use ghostcell::protocol::{read_init, read_turn};

fn load_config() -> EngineConfig {
    let args: Vec<String> = env::args().collect();
    match EngineConfig::locate(&args) {
        Some(path) => match EngineConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ignoring config {}: {}", path, e);
                EngineConfig::default()
            }
        },
        None => EngineConfig::default(),
    }
}

fn init_tracing(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Runs one match until stdin closes.
fn run(config: EngineConfig) -> Result<(), EngineError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut lines = stdin.lock().lines().map_while(Result::ok);

    let init = read_init(&mut lines)?;
    let mut engine = Engine::new(&init, config)?;

    loop {
        let entities = match read_turn(&mut lines) {
            Ok(Some(entities)) => entities,
            Ok(None) => break,
            Err(e) => {
                // The reply is still owed for this turn.
                warn!(error = %e, "unreadable turn block");
                Vec::new()
            }
        };
        if engine.handle_turn(entities, &mut out).is_err() {
            break;
        }
    }

    info!(turns = engine.turn(), "match over");
    Ok(())
}

fn main() {
    let config = load_config();
    init_tracing(&config);

    if let Err(e) = run(config) {
        error!(error = %e, "match aborted");
        std::process::exit(1);
    }
}
