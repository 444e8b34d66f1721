use crate::expander::StepLabels;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_PREVIEW_STEPS: u32 = 50;

/// Runtime settings, read from the environment (and `.env` via dotenvy in main).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub labels: StepLabels,
    /// Upper bound on `?steps=` for the preview pages.
    pub max_preview_steps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            labels: StepLabels::default(),
            max_preview_steps: DEFAULT_MAX_PREVIEW_STEPS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Bad values fall back to defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = get("BIND_ADDR").filter(|a| !a.trim().is_empty()) {
            config.bind_addr = addr.trim().to_string();
        }

        if let Some(locale) = get("STEP_LABEL_LOCALE") {
            match locale.parse::<StepLabels>() {
                Ok(labels) => config.labels = labels,
                Err(e) => log::warn!("STEP_LABEL_LOCALE: {e}, using '{}'", config.labels.code()),
            }
        }

        if let Some(raw) = get("MAX_PREVIEW_STEPS") {
            match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => config.max_preview_steps = n,
                _ => log::warn!(
                    "MAX_PREVIEW_STEPS '{raw}' is not a positive number, using {}",
                    config.max_preview_steps
                ),
            }
        }

        config
    }
}
