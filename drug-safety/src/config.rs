use std::net::SocketAddr;
use std::ops::Deref;
use std::str::FromStr;
use std::time;

use common_rxnav::DEFAULT_BASE_URL;
use envconfig::Envconfig;
use once_cell::sync::Lazy;

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(default = "127.0.0.1:8000")]
    pub address: SocketAddr,

    #[envconfig(default = "https://rxnav.nlm.nih.gov/REST")]
    pub rxnav_base_url: String,

    // Applies to each RxNav call; a timeout counts as a failed lookup
    #[envconfig(default = "5000")]
    pub rxnav_timeout_ms: EnvMsDuration,

    #[envconfig(default = "4")]
    pub resolution_concurrency: usize,

    #[envconfig(default = "50")]
    pub max_drugs_per_request: usize,

    #[envconfig(default = "65536")]
    pub max_body_size: usize,

    // Falls back to the bundled table when unset
    pub hazard_table_path: Option<String>,

    #[envconfig(default = "false")]
    pub export_prometheus: bool,

    #[envconfig(from = "DEBUG", default = "false")]
    pub debug: FlexBool,

    pub otel_url: Option<String>,

    #[envconfig(default = "1.0")]
    pub otel_sampling_rate: f64,

    #[envconfig(default = "drug-safety")]
    pub otel_service_name: String,
}

impl Config {
    pub fn default_test_config() -> Self {
        Self {
            address: SocketAddr::from_str("127.0.0.1:0").unwrap(),
            rxnav_base_url: DEFAULT_BASE_URL.to_string(),
            rxnav_timeout_ms: EnvMsDuration(time::Duration::from_secs(2)),
            resolution_concurrency: 4,
            max_drugs_per_request: 50,
            max_body_size: 65536,
            hazard_table_path: None,
            export_prometheus: false,
            debug: FlexBool(false),
            otel_url: None,
            otel_sampling_rate: 1.0,
            otel_service_name: "drug-safety".to_string(),
        }
    }
}

pub static DEFAULT_TEST_CONFIG: Lazy<Config> = Lazy::new(Config::default_test_config);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvMsDuration(pub time::Duration);

#[derive(Debug, PartialEq, Eq)]
pub struct ParseEnvMsDurationError;

impl FromStr for EnvMsDuration {
    type Err = ParseEnvMsDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ms = s.parse::<u64>().map_err(|_| ParseEnvMsDurationError)?;

        Ok(EnvMsDuration(time::Duration::from_millis(ms)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexBool(pub bool);

impl FromStr for FlexBool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(FlexBool(true)),
            "false" | "0" | "no" | "off" | "" => Ok(FlexBool(false)),
            _ => Err(format!("Invalid boolean value: {}", s)),
        }
    }
}

impl Deref for FlexBool {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_apply_to_an_empty_environment() {
        let config = Config::init_from_hashmap(&HashMap::new()).unwrap();

        assert_eq!(config.address, SocketAddr::from_str("127.0.0.1:8000").unwrap());
        assert_eq!(config.rxnav_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.rxnav_timeout_ms.0, time::Duration::from_millis(5000));
        assert_eq!(config.resolution_concurrency, 4);
        assert_eq!(config.max_drugs_per_request, 50);
        assert_eq!(config.hazard_table_path, None);
        assert!(!config.export_prometheus);
        assert_eq!(config.debug, FlexBool(false));
        assert_eq!(config.otel_url, None);
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let env = HashMap::from([
            ("ADDRESS".to_string(), "0.0.0.0:9000".to_string()),
            ("RXNAV_TIMEOUT_MS".to_string(), "750".to_string()),
            ("HAZARD_TABLE_PATH".to_string(), "/etc/hazards.json".to_string()),
            ("DEBUG".to_string(), "yes".to_string()),
        ]);

        let config = Config::init_from_hashmap(&env).unwrap();

        assert_eq!(config.address, SocketAddr::from_str("0.0.0.0:9000").unwrap());
        assert_eq!(config.rxnav_timeout_ms.0, time::Duration::from_millis(750));
        assert_eq!(config.hazard_table_path.as_deref(), Some("/etc/hazards.json"));
        assert!(*config.debug);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let env = HashMap::from([("RXNAV_TIMEOUT_MS".to_string(), "soon".to_string())]);
        assert!(Config::init_from_hashmap(&env).is_err());
    }

    #[test]
    fn flex_bool_parses_common_spellings() {
        assert_eq!("ON".parse::<FlexBool>().unwrap(), FlexBool(true));
        assert_eq!("0".parse::<FlexBool>().unwrap(), FlexBool(false));
        assert!("maybe".parse::<FlexBool>().is_err());
    }
}
