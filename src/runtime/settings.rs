use crate::config;

/// Load settings, falling back to defaults when the file is unreadable or
/// invalid. The returned message is logged once logging is set up, which
/// itself depends on the settings.
pub fn load_settings() -> (config::Settings, Option<String>) {
    let loaded = config::Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("invalid config: {msg}")),
        });

    match loaded {
        Ok(s) => (s, None),
        Err(msg) => {
            // Config is optional; a bad file should not prevent startup.
            eprintln!("duodeck: {msg}, using defaults");
            (config::Settings::default(), Some(msg))
        }
    }
}
