//! Process-wide default configuration.
//!
//! For hosts that wire the middleware up once at start-up. Tests should build
//! their own [`Configuration`] instead of touching this.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use crate::config::Configuration;

static GLOBAL: OnceLock<ArcSwap<Configuration>> = OnceLock::new();

fn global() -> &'static ArcSwap<Configuration> {
    GLOBAL.get_or_init(|| ArcSwap::from_pointee(Configuration::new()))
}

/// The current global configuration.
pub fn configuration() -> Arc<Configuration> {
    global().load_full()
}

/// Mutate a copy of the global configuration and publish it.
///
/// Middleware built before the call keeps the instance it was built with.
pub fn configure<F>(f: F)
where
    F: FnOnce(&mut Configuration),
{
    let mut next = Configuration::clone(&global().load());
    f(&mut next);
    global().store(Arc::new(next));
}

/// Replace the global configuration with fresh defaults.
pub fn reset() {
    global().store(Arc::new(Configuration::new()));
}
