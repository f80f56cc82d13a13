// src/domain/fallback.rs

use crate::domain::event::{EventRecord, Location};
use chrono::NaiveDate;

const HOME_VENUE: &str = "Atlanta Blockchain Center";

/// Built-in events shown when the store can't be read or holds nothing.
///
/// Always starts with the weekly recurring meetup so the page is never empty.
/// Dated entries that have passed are removed later by the selector.
pub fn fallback_events() -> Vec<EventRecord> {
    vec![
        EventRecord {
            id: None,
            title: "Off The Chain Thursdays".into(),
            description: "Join us for our weekly networking event. Connect with blockchain enthusiasts, developers, and entrepreneurs in the Atlanta Web3 community.".into(),
            date: None,
            display_time: Some("6:30 PM".into()),
            recurring: true,
            location: venue(),
            image_url: None,
            link: None,
        },
        dated(
            "Blockchain 101 Workshop",
            (2025, 11, 10),
            "5:00 PM",
            "New to blockchain? This beginner-friendly workshop covers the fundamentals of blockchain technology, cryptocurrencies, and Web3.",
        ),
        dated(
            "Web3 Pitchfest Atlanta",
            (2025, 12, 5),
            "6:00 PM",
            "Annual pitching competition for Web3 startups. Watch innovative projects compete for prizes and community support.",
        ),
        dated(
            "Smart Contract Development Bootcamp",
            (2025, 12, 12),
            "2:00 PM",
            "Deep dive into Solidity and smart contract development. Learn to build, test, and deploy your first smart contracts.",
        ),
        dated(
            "DAO Governance Workshop",
            (2026, 1, 15),
            "6:00 PM",
            "Learn about decentralized governance, voting mechanisms, and how Terminus DAO operates. Open to all community members.",
        ),
    ]
}

fn venue() -> Location {
    Location::Structured {
        name: HOME_VENUE.into(),
        address: None,
    }
}

fn dated(title: &str, (y, m, d): (i32, u32, u32), time: &str, description: &str) -> EventRecord {
    EventRecord {
        id: None,
        title: title.into(),
        description: description.into(),
        date: NaiveDate::from_ymd_opt(y, m, d),
        display_time: Some(time.into()),
        recurring: false,
        location: venue(),
        image_url: None,
        link: None,
    }
}
