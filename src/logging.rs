use log::Level;

/// Routes `log` records and panics to the browser console. Native builds keep
/// the facade's default no-op logger.
pub fn init(level: Level) {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    install_console(level);
}

#[cfg(target_arch = "wasm32")]
fn install_console(level: Level) {
    if console_log::init_with_level(level).is_err() {
        // Already installed by an earlier game on this page; only the level changes.
        log::set_max_level(level.to_level_filter());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install_console(_level: Level) {}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Metadata;

    #[test]
    fn native_init_leaves_logging_disabled() {
        init(Level::Info);
        init(Level::Debug);

        let info = Metadata::builder().level(Level::Info).build();
        assert!(!log::logger().enabled(&info));
    }
}
