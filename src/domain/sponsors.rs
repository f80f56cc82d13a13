// src/domain/sponsors.rs

#[derive(Debug, Clone, Copy)]
pub struct SponsorshipTier {
    pub tier: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// CSS color for the tier heading.
    pub color: &'static str,
}

pub const SPONSORSHIP_TIERS: &[SponsorshipTier] = &[
    SponsorshipTier {
        tier: "Platinum",
        title: "Platinum Sponsorship",
        description: "Includes premier brand visibility, VIP event access, mentorship opportunities within the Immutable Founders incubator, a chance to host workshops, and dedicated coworking space access.",
        color: "#E5E4E2",
    },
    SponsorshipTier {
        tier: "Gold",
        title: "Gold Sponsorship",
        description: "Offers notable brand exposure, participation in select events, mentoring roles within the incubator, and annual coworking passes.",
        color: "#FFD700",
    },
    SponsorshipTier {
        tier: "Silver",
        title: "Silver Sponsorship",
        description: "Provides brand mentions, access to select ABC events, and coworking passes, enabling meaningful engagement with Atlanta's blockchain community.",
        color: "#C0C0C0",
    },
    SponsorshipTier {
        tier: "Custom",
        title: "Custom Packages",
        description: "Tailored sponsorship packages designed to fit the unique needs of sponsors, including personalized workshops, exclusive Off the Chain Thursdays events, and more.",
        color: "#FFD700",
    },
];
