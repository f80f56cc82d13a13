// templates/pages/home.rs

use crate::domain::sponsors::SPONSORSHIP_TIERS;
use crate::templates::{components::events_loading, desktop_layout};
use maud::{html, Markup};

pub fn home_page(signed_in: Option<&str>) -> Markup {
    desktop_layout(
        "Home",
        signed_in,
        html! {
            section class="hero" {
                h1 { "Terminus DAO" }
                p class="lead" {
                    "Atlanta's blockchain community. Meetups, workshops and builders, every week."
                }
                a class="btn primary" href="#events" { "See upcoming events" }
            }

            section id="events" class="container" {
                h2 class="section-title" { "Upcoming Events" }
                (events_loading())
            }

            section id="sponsors" class="container" {
                h2 class="section-title" { "Sponsorship Opportunities" }
                div class="sponsorship-grid" {
                    @for tier in SPONSORSHIP_TIERS {
                        div class="sponsorship-card fade-in" data-tier=(tier.tier) {
                            h3 class="sponsorship-title" style=(format!("color: {}", tier.color)) { (tier.title) }
                            p class="sponsorship-description" { (tier.description) }
                        }
                    }
                }
            }
        },
    )
}
