#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::toml_config::TomlConfig;
    use crate::core::{ConfigProvider, Coordinate, KeySeparator, LegPolicy};
    use crate::domain::ports::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use std::path::PathBuf;
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "maps-directions")]
    #[command(about = "Fetch a driving route and print its path and distance")]
    pub struct CliConfig {
        /// Start point as "lat,lng"; falls back to route.default_origin from --config
        #[arg(long, allow_hyphen_values = true)]
        pub origin: Option<Coordinate>,

        /// End point as "lat,lng"
        #[arg(long, allow_hyphen_values = true)]
        pub destination: Coordinate,

        #[arg(long)]
        pub api_key: Option<String>,

        /// TOML file supplying defaults for anything not given on the command line
        #[arg(long)]
        pub config: Option<PathBuf>,

        #[arg(long)]
        pub base_url: Option<String>,

        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        #[arg(long, help = "Join the key with '?' like the original Android client")]
        pub legacy_key_separator: bool,

        #[arg(long, help = "Keep only the last leg's points")]
        pub restart_per_leg: bool,

        #[arg(long, help = "Print the flattened path as JSON")]
        pub json: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// Fills unset options from the `--config` file, if one was given.
        pub fn apply_file_defaults(&mut self) -> Result<()> {
            let Some(path) = self.config.as_ref() else {
                return Ok(());
            };
            let file = TomlConfig::from_file(path)?;
            self.merge(&file)
        }

        pub fn merge(&mut self, file: &TomlConfig) -> Result<()> {
            if self.api_key.is_none() {
                self.api_key = Some(file.api_key().to_string());
            }
            if self.base_url.is_none() {
                self.base_url = file.provider.base_url.clone();
            }
            if self.timeout_seconds.is_none() {
                self.timeout_seconds = file.provider.timeout_seconds;
            }
            self.legacy_key_separator |= file.key_separator() == KeySeparator::Legacy;
            self.restart_per_leg |= file.leg_policy() == LegPolicy::RestartPerLeg;
            if self.origin.is_none() {
                self.origin = file.default_origin()?;
            }
            Ok(())
        }
    }

    impl ConfigProvider for CliConfig {
        fn api_key(&self) -> &str {
            self.api_key.as_deref().unwrap_or_default()
        }

        fn base_url(&self) -> &str {
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
        }

        fn timeout(&self) -> Duration {
            self.timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT)
        }

        fn key_separator(&self) -> KeySeparator {
            if self.legacy_key_separator {
                KeySeparator::Legacy
            } else {
                KeySeparator::Ampersand
            }
        }

        fn leg_policy(&self) -> LegPolicy {
            if self.restart_per_leg {
                LegPolicy::RestartPerLeg
            } else {
                LegPolicy::Accumulate
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            let api_key = validation::validate_required_field("api_key", &self.api_key)?;
            validation::validate_api_key("api_key", api_key)?;
            validation::validate_url("base_url", self.base_url())?;
            if let Some(seconds) = self.timeout_seconds {
                validation::validate_range("timeout_seconds", seconds, 1, 120)?;
            }
            let origin = validation::validate_required_field("origin", &self.origin)?;
            validation::validate_coordinate("origin", origin)?;
            validation::validate_coordinate("destination", &self.destination)?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(args: &[&str]) -> CliConfig {
            let mut argv = vec!["maps-directions"];
            argv.extend_from_slice(args);
            CliConfig::try_parse_from(argv).unwrap()
        }

        #[test]
        fn test_parse_negative_coordinates() {
            let config = parse(&[
                "--origin",
                "-33.852,151.211",
                "--destination",
                "-33.8688,151.2093",
                "--api-key",
                "abc",
            ]);
            assert_eq!(config.origin, Some(Coordinate::new(-33.852, 151.211)));
            assert_eq!(config.destination, Coordinate::new(-33.8688, 151.2093));
            assert!(config.validate().is_ok());
            assert_eq!(config.key_separator(), KeySeparator::Ampersand);
            assert_eq!(config.leg_policy(), LegPolicy::Accumulate);
        }

        #[test]
        fn test_missing_key_or_origin_fails_validation() {
            let config = parse(&["--origin", "1,2", "--destination", "3,4"]);
            assert!(config.validate().is_err());

            let config = parse(&["--destination", "3,4", "--api-key", "abc"]);
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_bad_coordinate_is_rejected_by_parser() {
            let result = CliConfig::try_parse_from([
                "maps-directions",
                "--destination",
                "somewhere",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_merge_prefers_command_line() {
            let file = TomlConfig::from_toml_str(
                r#"
[provider]
api_key = "file-key"
base_url = "https://file.example.com"
timeout_seconds = 4
legacy_key_separator = true

[route]
leg_policy = "restart_per_leg"
default_origin = "10.5,20.5"
"#,
            )
            .unwrap();

            let mut config = parse(&["--destination", "3,4", "--api-key", "cli-key"]);
            config.merge(&file).unwrap();

            assert_eq!(config.api_key(), "cli-key");
            assert_eq!(config.base_url(), "https://file.example.com");
            assert_eq!(config.timeout(), Duration::from_secs(4));
            assert_eq!(config.key_separator(), KeySeparator::Legacy);
            assert_eq!(config.leg_policy(), LegPolicy::RestartPerLeg);
            assert_eq!(config.origin, Some(Coordinate::new(10.5, 20.5)));
            assert!(config.validate().is_ok());
        }
    }
}
