use clap::{Args, Parser, Subcommand};
use trip_core::TripStatus;

pub const DEFAULT_BASE_URL: &str = "https://tripplanner.free.beeceptor.com";

#[derive(Parser, Debug)]
#[command(name = "tripctl")]
#[command(about = "Plan, review and edit trips stored on a remote trip service")]
pub struct Cli {
    /// Trip service base URL
    #[arg(long, env = "TRIP_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every trip
    List,
    /// Show one trip
    Get {
        /// Trip ID
        id: String,
    },
    /// Create a trip
    Create {
        #[command(flatten)]
        fields: TripFields,
    },
    /// Replace a trip's fields; omitted flags keep their current value
    Update {
        /// Trip ID
        id: String,

        #[command(flatten)]
        fields: TripFields,

        /// New lifecycle status
        #[arg(long)]
        status: Option<TripStatus>,
    },
    /// Delete a trip
    Delete {
        /// Trip ID
        id: String,
    },
    /// Suggest destinations
    Cities {
        /// Part of a city or country name
        query: Option<String>,
    },
}

/// Form fields as typed by the user. Validation happens later, on the whole
/// form at once.
#[derive(Args, Debug, Default, Clone)]
pub struct TripFields {
    /// Where the trip goes, e.g. "Lagos, Nigeria"
    #[arg(long)]
    pub destination: Option<String>,

    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<String>,

    /// Budget in dollars
    #[arg(long, allow_hyphen_values = true)]
    pub budget: Option<String>,

    /// Number of travelers
    #[arg(long, allow_hyphen_values = true)]
    pub travelers: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub description: Option<String>,
}
