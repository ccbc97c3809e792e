//! Environment flags honored by the example programs.
//!
//! The flags are read once at startup into a [`Settings`] value and passed
//! explicitly from there, so the harness itself never touches the process
//! environment.

use std::env;

use crate::error::{CoreError, Result};

/// Set to `yes` to run the `auto` command when no command is given.
pub const AUTO_RUN_VAR: &str = "TABLECTL_AUTO_RUN_EXAMPLES";

/// Non-empty when a local Tablestore emulator is in use.
pub const EMULATOR_HOST_VAR: &str = "TABLESTORE_EMULATOR_HOST";

/// Set to `yes` to permit the administrative examples outside the emulator.
pub const ADMIN_EXAMPLES_VAR: &str = "TABLECTL_ENABLE_ADMIN_EXAMPLES";

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub auto_run: bool,
    pub emulator_host: Option<String>,
    pub admin_examples_enabled: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            auto_run: env_is_yes(AUTO_RUN_VAR),
            emulator_host: env::var(EMULATOR_HOST_VAR).ok().filter(|v| !v.is_empty()),
            admin_examples_enabled: env_is_yes(ADMIN_EXAMPLES_VAR),
        }
    }

    pub fn using_emulator(&self) -> bool {
        self.emulator_host.is_some()
    }

    /// Whether the administrative examples may run.
    ///
    /// Always true against the emulator; in production only when explicitly
    /// enabled, to stay below admin API quota.
    pub fn run_admin_examples(&self) -> bool {
        self.using_emulator() || self.admin_examples_enabled
    }
}

fn env_is_yes(var: &str) -> bool {
    env::var(var).is_ok_and(|value| value == "yes")
}

/// Fails with an error naming the first variable that is missing or empty.
pub fn check_env_vars(vars: &[&str]) -> Result<()> {
    for var in vars {
        match env::var(var) {
            Err(_) => return Err(CoreError::MissingEnv(var.to_string())),
            Ok(value) if value.is_empty() => return Err(CoreError::EmptyEnv(var.to_string())),
            Ok(_) => {}
        }
    }
    Ok(())
}
