//! Logging initialization for host builds.

use log::LevelFilter;

/// Inits logging with the given default level; `RUST_LOG` overrides it.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new().filter(None, level).parse_default_env().try_init().ok();
    log::set_max_level(level);
}
