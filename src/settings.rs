use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Optional `config.toml` supplying defaults for anything not given on the
/// command line
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub observer: ObserverSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub receiver: ReceiverSettings,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ObserverSettings {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct DisplaySettings {
    pub range: Option<f64>,    // Viewing radius in degrees
    pub square: Option<bool>,
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct SourceSettings {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ReceiverSettings {
    pub path: Option<PathBuf>,  // dump1090 binary
    pub keep_log: Option<bool>,
    pub ready_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), "ignoring unreadable settings: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("adsb-radar")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn full_file() {
        let settings = Settings::parse(
            r#"
            [observer]
            lat = 51.5
            lon = -0.1

            [display]
            range = 0.5
            square = true
            interval_ms = 100

            [source]
            url = "http://radar.local:8080/data.json"
            timeout_secs = 2

            [receiver]
            path = "/usr/local/bin/dump1090"
            keep_log = false
            ready_timeout_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(settings.observer.lat, Some(51.5));
        assert_eq!(settings.observer.lon, Some(-0.1));
        assert_eq!(settings.display.range, Some(0.5));
        assert_eq!(settings.display.square, Some(true));
        assert_eq!(settings.display.interval_ms, Some(100));
        assert_eq!(settings.source.url.as_deref(), Some("http://radar.local:8080/data.json"));
        assert_eq!(settings.source.timeout_secs, Some(2));
        assert_eq!(settings.receiver.path, Some(PathBuf::from("/usr/local/bin/dump1090")));
        assert_eq!(settings.receiver.keep_log, Some(false));
        assert_eq!(settings.receiver.ready_timeout_secs, Some(60));
    }

    #[test]
    fn partial_file() {
        let settings = Settings::parse("[observer]\nlat = 40.6\n").unwrap();
        assert_eq!(settings.observer.lat, Some(40.6));
        assert_eq!(settings.observer.lon, None);
        assert_eq!(settings.display, DisplaySettings::default());
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(Settings::parse("[observer]\nlat = \"north\"\n").is_err());
    }

    #[test]
    fn config_path_is_namespaced() {
        let path = Settings::config_path();
        assert!(path.ends_with("adsb-radar/config.toml"));
    }
}
