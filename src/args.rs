use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "wanderlist")]
#[command(about = "Browse the travel-planner city catalog from the terminal")]
#[command(version)]
pub struct Args {
    /// Free-text search across city names, states and descriptions
    #[arg(default_value = "")]
    pub search: String,

    /// Only show cities in this region
    #[arg(short, long)]
    pub region: Option<String>,

    /// Only show cities offering this trip type
    #[arg(short, long)]
    pub trip_type: Option<String>,

    /// Only show cities whose average daily budget is at or below this
    #[arg(short, long)]
    pub budget_max: Option<u32>,

    /// Number of pages to fetch; pages after the first are appended
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Toggle the favorite state of this city id before listing
    #[arg(long)]
    pub favorite: Option<u64>,

    /// Show a single city by id instead of the listing
    #[arg(long)]
    pub city: Option<u64>,

    /// List your trip bookings instead of the city listing
    #[arg(long)]
    pub bookings: bool,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}
