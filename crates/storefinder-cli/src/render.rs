//! Text rendering of the search view: form, error banner, store cards and
//! map markers.

use chrono::NaiveTime;
use storefinder_client::{SearchController, SearchFailure};
use storefinder_core::{
    City, ErrorDisplay, ParamField, Position, SearchParameters, StoreResult, LIMIT_RANGE,
    RADIUS_RANGE_KM,
};

/// Full view for the controller's current state.
pub(crate) fn render_view(controller: &SearchController, now: NaiveTime) -> String {
    let display = controller.failure().map(SearchFailure::display);
    let mut out = render_form(controller.params(), display.as_ref());
    if let Some(banner) = display.as_ref().and_then(|d| d.banner.as_deref()) {
        out.push_str(&format!("\n\u{26a0}\u{fe0f} {banner}\n"));
    }
    if controller.is_loading() {
        out.push_str("\nLoading...\n");
    }
    out.push('\n');
    out.push_str(&render_results(controller.results(), controller.is_loading(), now));
    out.push('\n');
    out.push_str(&render_markers(
        controller.results(),
        controller.params(),
        controller.user_location(),
    ));
    out
}

/// Form inputs, each followed by its validation message when the last
/// query flagged it.
pub(crate) fn render_form(params: &SearchParameters, display: Option<&ErrorDisplay>) -> String {
    let mut out = String::from("Search parameters\n");
    for field in ParamField::ALL {
        let value = match field {
            ParamField::Latitude => params.latitude.to_string(),
            ParamField::Longitude => params.longitude.to_string(),
            ParamField::MaxRadius => format!(
                "{} km (range {}-{})",
                params.max_radius_km,
                RADIUS_RANGE_KM.start(),
                RADIUS_RANGE_KM.end()
            ),
            ParamField::Limit => format!(
                "{} (range {}-{})",
                params.limit,
                LIMIT_RANGE.start(),
                LIMIT_RANGE.end()
            ),
            ParamField::OnlyOpen => params.only_open.to_string(),
        };
        let line = match display.and_then(|d| d.message_for(field)) {
            Some(message) => format!("  {:<10} {value}   <- {message}\n", field.wire_name()),
            None => format!("  {:<10} {value}\n", field.wire_name()),
        };
        out.push_str(&line);
    }
    out
}

/// Result header plus one card per store, in service order.
pub(crate) fn render_results(stores: &[StoreResult], loading: bool, now: NaiveTime) -> String {
    let mut out = format!("Found {} store(s)\n", stores.len());
    if stores.is_empty() && !loading {
        out.push_str("No stores found. Try adjusting your search parameters.\n");
    }
    for store in stores {
        out.push('\n');
        out.push_str(&render_card(store, now));
    }
    out
}

pub(crate) fn render_card(store: &StoreResult, now: NaiveTime) -> String {
    let mut lines = vec![
        store.display_name().to_string(),
        format!(
            "  Address:  {}, {} {}",
            store.street, store.city, store.postal_code
        ),
    ];
    if let Some(hours) = store.hours() {
        let state = if store.is_open_at(now) { "open now" } else { "closed" };
        lines.push(format!("  Hours:    {hours} ({state})"));
    }
    lines.push(format!("  Distance: {:.2} km", store.distance));
    if store.collection_point {
        lines.push("  Collection point available".to_string());
    }
    if store.show_warning_message {
        lines.push("  \u{26a0}\u{fe0f} Special notice for this store".to_string());
    }
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Marker list standing in for the map: centre, the user's own GPS fix
/// when there is one, then one marker per store.
pub(crate) fn render_markers(
    stores: &[StoreResult],
    centre: &SearchParameters,
    user_location: Option<&Position>,
) -> String {
    let mut out = format!(
        "Map centre ({:.4}, {:.4})\n",
        centre.latitude, centre.longitude
    );
    if let Some(you) = user_location {
        out.push_str(&format!(
            "  [you]   Your Location ({:.4}, {:.4})\n",
            you.latitude, you.longitude
        ));
    }
    for store in stores {
        out.push_str(&format!(
            "  [store] {} ({:.4}, {:.4}) {:.2} km\n",
            store.display_name(),
            store.latitude,
            store.longitude,
            store.distance
        ));
    }
    out
}

pub(crate) fn render_cities(cities: &[City]) -> String {
    cities
        .iter()
        .map(|city| {
            format!(
                "{:<14}{:>9.4}{:>9.4}\n",
                city.name, city.latitude, city.longitude
            )
        })
        .collect()
}
