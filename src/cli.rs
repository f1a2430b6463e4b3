use clap::{Parser, Subcommand};

/// CribInfo - natural-language property search
#[derive(Parser, Debug)]
#[command(name = "cribinfo")]
#[command(about = "Search properties in plain language", long_about = None)]
#[command(version)]
pub struct Cli {
    /// City to search in (bangalore, mumbai, delhi). Empty searches all cities.
    #[arg(long, global = true, default_value = "")]
    pub city: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one search and print the results
    Search {
        /// e.g. "2BHK under 1Cr with gym in Whitefield"
        query: String,
    },

    /// Interactive chat session
    Chat,

    /// List cities with listings
    Cities,

    /// Compare 2 to 5 properties by id
    Compare {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Show or toggle the dark/light preference
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}
