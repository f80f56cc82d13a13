// src/domain/location.rs

use crate::domain::event::Location;
use url::Url;

/// Directions service; the destination goes in the `destination` query parameter.
pub const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";

/// Name to show for a location, if any.
pub fn display_name(location: &Location) -> Option<&str> {
    let name = match location {
        Location::Structured { name, .. } => name.as_str(),
        Location::Legacy(text) => text.as_str(),
        Location::Absent => return None,
    };

    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

/// Outbound map link for a location.
///
/// Precedence: an `http(s)://` address verbatim, then the address as the
/// directions destination, then the display name as the destination.
pub fn directions_link(location: &Location) -> Option<String> {
    if let Location::Structured {
        address: Some(address),
        ..
    } = location
    {
        let address = address.trim();
        if !address.is_empty() {
            if is_absolute_url(address) {
                return Some(address.to_string());
            }
            return directions_to(address);
        }
    }

    display_name(location).and_then(directions_to)
}

fn is_absolute_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn directions_to(destination: &str) -> Option<String> {
    Url::parse_with_params(DIRECTIONS_BASE_URL, &[("api", "1"), ("destination", destination)])
        .map(String::from)
        .ok()
}
