//! Process-wide arithmetic settings.
//!
//! The default float precision is read once when a [`BigFloat`](crate::BigFloat)
//! is constructed. Changing it never touches floats that already exist.

use std::sync::Once;

use parking_lot::{const_rwlock, RwLock};

/// Environment variable that seeds [`Config::default_prec`] on first use.
pub const DEFAULT_PREC_ENV: &str = "CAPY_BIGNUM_DEFAULT_PREC";

/// Smallest limb count the Karatsuba recursion will accept as a threshold.
pub const MIN_KARATSUBA_THRESHOLD: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Mantissa bits given to floats created without an explicit precision.
    pub default_prec: usize,
    /// Operand size in limbs from which multiplication switches to Karatsuba.
    pub karatsuba_threshold: usize,
}

impl Config {
    pub const DEFAULT: Config = Config {
        default_prec: 64,
        karatsuba_threshold: 32,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static CONFIG: RwLock<Config> = const_rwlock(Config::DEFAULT);
static ENV_INIT: Once = Once::new();

fn init_from_env() {
    ENV_INIT.call_once(|| {
        let Ok(value) = std::env::var(DEFAULT_PREC_ENV) else {
            return;
        };
        match value.trim().parse::<usize>() {
            Ok(prec) if prec > 0 => {
                log::debug!("default float precision set to {prec} bits from {DEFAULT_PREC_ENV}");
                CONFIG.write().default_prec = prec;
            }
            _ => log::warn!("ignoring {DEFAULT_PREC_ENV}={value:?}: not a positive integer"),
        }
    });
}

/// Returns a snapshot of the current settings.
pub fn get() -> Config {
    init_from_env();
    *CONFIG.read()
}

/// Applies `f` to the settings under the write lock.
pub fn update<F: FnOnce(&mut Config)>(f: F) {
    init_from_env();
    let mut config = CONFIG.write();
    f(&mut config);
    config.default_prec = config.default_prec.max(1);
    config.karatsuba_threshold = config.karatsuba_threshold.max(MIN_KARATSUBA_THRESHOLD);
    log::debug!("arithmetic config updated: {:?}", *config);
}

pub fn default_prec() -> usize {
    get().default_prec
}

/// Sets the precision for floats constructed from now on. `0` is clamped to 1.
pub fn set_default_prec(prec: usize) {
    update(|config| config.default_prec = prec);
}

pub fn karatsuba_threshold() -> usize {
    get().karatsuba_threshold
}
