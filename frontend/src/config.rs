use tracing::{debug, info};

const DEFAULT_API_URL: &str = "http://localhost:54321";
const DEFAULT_API_KEY: &str = "";
const DEFAULT_WHATSAPP_PHONE: &str = "5511952801212";
const DEFAULT_STORE_NAME: &str = "TechStore";

/// Build-time settings, baked in from the environment of `trunk build`.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub api_key: String,
    pub whatsapp_phone: String,
    pub store_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: resolve(
                "STORE_API_URL",
                option_env!("STORE_API_URL"),
                DEFAULT_API_URL,
            ),
            api_key: resolve(
                "STORE_API_KEY",
                option_env!("STORE_API_KEY"),
                DEFAULT_API_KEY,
            ),
            whatsapp_phone: resolve(
                "STORE_WHATSAPP_PHONE",
                option_env!("STORE_WHATSAPP_PHONE"),
                DEFAULT_WHATSAPP_PHONE,
            ),
            store_name: resolve(
                "STORE_NAME",
                option_env!("STORE_NAME"),
                DEFAULT_STORE_NAME,
            ),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn resolve(key: &str, value: Option<&str>, default: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => {
            debug!("{key} set at build time");
            v.to_string()
        }
        None => {
            info!("{key} not set, using default");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_default() {
        assert_eq!(resolve("K", None, "d"), "d");
        assert_eq!(resolve("K", Some("  "), "d"), "d");
        assert_eq!(resolve("K", Some(" v "), "d"), "v");
    }
}
