use crate::catalog::{Booking, City, CityId};
use crate::list::{ListPhase, ListSnapshot};
use std::collections::HashSet;

/// "Found N destination(s)" label shown above the results
pub fn results_label(count: u64) -> String {
    format!(
        "Found {} destination{}",
        count,
        if count == 1 { "" } else { "s" }
    )
}

/// Render one city as a text card
pub fn city_card(city: &City, is_favorite: bool) -> String {
    let marker = if is_favorite { "[♥]" } else { "[ ]" };

    let mut lines = Vec::new();
    if city.state.is_empty() {
        lines.push(format!("{} {}", marker, city.name));
    } else {
        lines.push(format!("{} {}, {}", marker, city.name, city.state));
    }

    if !city.description.is_empty() {
        lines.push(format!("    {}", truncate(&city.description, 100)));
    }

    let mut stats = vec![format!("₹{:.0}/day", city.avg_budget_per_day)];
    if let Some(days) = &city.recommended_days {
        stats.push(days.clone());
    }
    stats.push(
        city.best_season
            .clone()
            .unwrap_or_else(|| "Year-round".to_string()),
    );
    lines.push(format!("    {}", stats.join(" · ")));

    if !city.attractions.is_empty() {
        // The card shows at most four attraction tags
        let tags: Vec<&str> = city
            .attractions
            .iter()
            .take(4)
            .map(String::as_str)
            .collect();
        lines.push(format!("    {}", tags.join(" | ")));
    }

    lines.join("\n")
}

/// Render the full listing state for the terminal
pub fn render_snapshot(snapshot: &ListSnapshot, favorites: &HashSet<CityId>) -> String {
    match snapshot.phase {
        ListPhase::Idle => "Nothing loaded yet".to_string(),
        ListPhase::Loading => "Searching...".to_string(),
        ListPhase::Failed => {
            "Could not load cities. Check that the API server is running and retry.".to_string()
        }
        ListPhase::Loaded => {
            if snapshot.cities.is_empty() {
                return "No cities found\nTry adjusting your filters or search terms".to_string();
            }

            let mut out = vec![results_label(snapshot.count), String::new()];
            for city in &snapshot.cities {
                out.push(city_card(city, favorites.contains(&city.id)));
                out.push(String::new());
            }
            if snapshot.has_next {
                out.push("More destinations available. Run with --pages to fetch them".to_string());
            }
            out.join("\n")
        }
    }
}

/// Render one booking as a single line for the bookings listing
pub fn booking_line(booking: &Booking) -> String {
    let mut line = format!(
        "{}  {}  {} to {}  {} traveler{}  ₹{:.0}",
        booking.booking_reference,
        booking.city_name,
        booking.check_in_date,
        booking.check_out_date,
        booking.num_travelers,
        if booking.num_travelers == 1 { "" } else { "s" },
        booking.total_cost,
    );
    if let Some(status) = &booking.status {
        line.push_str(&format!("  [{}]", status));
    }
    line
}

/// Render the bookings listing
pub fn render_bookings(bookings: &[Booking]) -> String {
    if bookings.is_empty() {
        return "No bookings yet".to_string();
    }
    bookings
        .iter()
        .map(booking_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate to a character count, appending an ellipsis when cut
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}
