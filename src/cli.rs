use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan meals from what is in your pantry", long_about = None)]
pub struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub script: Option<String>,

    /// Comma-separated pantry to start with instead of the default one
    #[arg(short, long, value_delimiter = ',', conflicts_with = "empty_pantry")]
    pub pantry: Option<Vec<String>>,

    /// Start with an empty pantry
    #[arg(long)]
    pub empty_pantry: bool,

    /// Display name for the placeholder user
    #[arg(long, default_value = "Cook")]
    pub user: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pantry_list_is_split_on_commas() {
        let cli = Cli::try_parse_from(["recipe-planner", "--pantry", "rice,dal,ghee"]).unwrap();
        assert_eq!(
            cli.pantry,
            Some(vec!["rice".to_string(), "dal".to_string(), "ghee".to_string()])
        );
        assert!(!cli.empty_pantry);
    }

    #[test]
    fn test_pantry_and_empty_pantry_conflict() {
        let result = Cli::try_parse_from(["recipe-planner", "--pantry", "rice", "--empty-pantry"]);
        assert!(result.is_err());
    }
}
