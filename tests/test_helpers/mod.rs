//! Scoped process environment overrides for integration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the environment lock and restores overridden variables on drop.
pub struct ScopedEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    /// Applies the overrides; `None` removes the variable.
    pub fn apply(overrides: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = overrides
            .iter()
            .map(|(name, value)| {
                let previous = env::var(name).ok();
                write_var(name, *value);
                (*name, previous)
            })
            .collect();

        Self { saved, _lock: lock }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (name, previous) in self.saved.drain(..) {
            write_var(name, previous.as_deref());
        }
    }
}

fn write_var(name: &str, value: Option<&str>) {
    // SAFETY: every mutation happens while `ENV_LOCK` is held.
    unsafe {
        match value {
            Some(new_value) => env::set_var(name, new_value),
            None => env::remove_var(name),
        }
    }
}
