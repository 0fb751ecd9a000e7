pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{LocationType, QuoteRequest};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "apex-moves")]
#[command(about = "Instant moving estimator: describe your move, get a price range")]
pub struct CliConfig {
    /// Free-text description of what is being moved
    #[arg(short, long)]
    pub description: String,

    /// Moving distance in miles
    #[arg(long)]
    pub distance: f64,

    #[arg(long, value_enum, default_value = "apartment")]
    pub from_type: LocationType,

    #[arg(long, value_enum, default_value = "house")]
    pub to_type: LocationType,

    /// Path to a TOML file with pricing and delay settings
    #[arg(short, long)]
    pub config: Option<String>,

    /// Skip the simulated "analyzing" delay
    #[arg(long)]
    pub no_delay: bool,

    /// Print the estimate as JSON instead of a summary card
    #[arg(long)]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn to_request(&self) -> QuoteRequest {
        QuoteRequest::new(self.description.clone(), self.distance)
            .with_locations(self.from_type, self.to_type)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_args() {
        let config = CliConfig::try_parse_from([
            "apex-moves",
            "--description",
            "studio with a desk",
            "--distance",
            "12",
            "--to-type",
            "storage",
            "--no-delay",
        ])
        .unwrap();

        let request = config.to_request();
        assert_eq!(request.inventory_description, "studio with a desk");
        assert_eq!(request.distance_miles, 12.0);
        assert_eq!(request.from_type, LocationType::Apartment);
        assert_eq!(request.to_type, LocationType::Storage);
        assert!(config.no_delay);
        assert!(!config.json);
    }

    #[test]
    fn test_distance_is_required() {
        assert!(CliConfig::try_parse_from(["apex-moves", "--description", "sofa"]).is_err());
    }
}
