use clap::Parser;
use wanderlist::render;
use wanderlist::{Browser, Catalog, ClientConfig, FilterUpdate, LoadMoreOutcome, ToggleOutcome};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match ClientConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path, e);
                return;
            }
        },
        None => ClientConfig::default(),
    };

    ::log::info!("Using catalog at {}", config.api_base_url);

    let client = match Browser::new().with_config(config).build().await {
        Ok(client) => client,
        Err(e) => {
            ::log::error!("Failed to set up catalog client: {}", e);
            return;
        }
    };

    if let Some(id) = args.favorite {
        match client.favorites.toggle(id).await {
            Ok(ToggleOutcome::Added) => println!("Added city {} to favorites", id),
            Ok(ToggleOutcome::Removed) => println!("Removed city {} from favorites", id),
            Ok(ToggleOutcome::InFlight) => {}
            // Non-blocking: the toggle was rolled back, the listing still runs
            Err(e) => eprintln!("Failed to save favorite: {}", e),
        }
    }

    if args.bookings {
        match client.catalog.bookings().await {
            Ok(bookings) => println!("{}", render::render_bookings(&bookings)),
            Err(e) => ::log::error!("Failed to fetch bookings: {}", e),
        }
        return;
    }

    if let Some(id) = args.city {
        match client.catalog.city_by_id(id).await {
            Ok(city) => {
                let is_favorite = client.favorites.is_shown(city.id).await;
                println!("{}", render::city_card(&city, is_favorite));
            }
            Err(e) => ::log::error!("Failed to fetch city {}: {}", id, e),
        }
        return;
    }

    let mut update = FilterUpdate::new().with_search(args.search.clone());
    if let Some(region) = args.region.clone() {
        update = update.with_region(Some(region));
    }
    if let Some(trip_type) = args.trip_type.clone() {
        update = update.with_trip_type(Some(trip_type));
    }
    if let Some(budget_max) = args.budget_max {
        update = update.with_budget_max(Some(budget_max));
    }

    if let Err(e) = client.list.set_filter(update).await {
        // The controller is in its Failed state; the snapshot renders a
        // retry hint below.
        ::log::warn!("Initial load failed: {}", e);
    }

    for _ in 1..args.pages {
        match client.list.load_more().await {
            Ok(LoadMoreOutcome::Appended(n)) => ::log::debug!("appended {} cities", n),
            Ok(_) => break,
            Err(e) => {
                ::log::warn!("Load more failed: {}", e);
                break;
            }
        }
    }

    let favorites = client.favorites.shown_ids().await;
    let snapshot = client.list.snapshot().await;
    println!("{}", render::render_snapshot(&snapshot, &favorites));
}
