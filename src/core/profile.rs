/// Static configuration describing how to read budget and capacity fields
/// for one service category.
///
/// Adding a category is a data edit here, not new branching in the engine.
#[derive(Debug, Clone, Copy)]
pub struct CategoryProfile {
    pub category: &'static str,
    /// Requirement field holding the monetary budget for this category.
    pub budget_field: &'static str,
    /// Requirement field holding the required guest capacity, for categories
    /// with a capacity notion.
    pub capacity_field: Option<&'static str>,
    /// Offering attribute holding the vendor's advertised capacity.
    pub vendor_capacity_attr: Option<&'static str>,
    /// Descriptive fields fed to the text normalizer, in encounter order.
    pub descriptive_fields: &'static [&'static str],
}

/// Fallback profile for categories missing from the table: budget field
/// literally named `budget`, no capacity notion.
pub static GENERIC_PROFILE: CategoryProfile = CategoryProfile {
    category: "",
    budget_field: "budget",
    capacity_field: None,
    vendor_capacity_attr: None,
    descriptive_fields: &["preferred_area", "cuisine", "theme", "description"],
};

static PROFILES: &[CategoryProfile] = &[
    CategoryProfile {
        category: "Venue Selection",
        budget_field: "budget",
        capacity_field: Some("guest_count"),
        vendor_capacity_attr: Some("Guest Count"),
        descriptive_fields: &["preferred_area", "cuisine", "theme", "description"],
    },
    CategoryProfile {
        category: "Catering & Cuisine",
        budget_field: "catering_budget",
        capacity_field: Some("catering_guests"),
        vendor_capacity_attr: Some("Catering Guest Count"),
        descriptive_fields: &["preferred_area", "cuisine", "theme", "description"],
    },
    CategoryProfile {
        category: "Event Decoration",
        budget_field: "decoration_budget",
        capacity_field: None,
        vendor_capacity_attr: None,
        descriptive_fields: &["preferred_area", "cuisine", "theme", "description"],
    },
    CategoryProfile {
        category: "Media & Coverage",
        budget_field: "photo_video_budget",
        capacity_field: None,
        vendor_capacity_attr: None,
        descriptive_fields: &[
            "preferred_area",
            "cuisine",
            "theme",
            "description",
            "photo_style",
            "video_edit_style",
        ],
    },
    CategoryProfile {
        category: "Invitations & Announcements",
        budget_field: "invite_budget",
        capacity_field: None,
        vendor_capacity_attr: None,
        descriptive_fields: &[
            "preferred_area",
            "cuisine",
            "theme",
            "description",
            "invite_format",
            "invite_theme",
        ],
    },
    CategoryProfile {
        category: "Performances & Entertainment",
        budget_field: "entertainment_budget",
        capacity_field: None,
        vendor_capacity_attr: None,
        descriptive_fields: &[
            "preferred_area",
            "cuisine",
            "theme",
            "description",
            "entertainment_type",
            "special_requests",
        ],
    },
    CategoryProfile {
        category: "Technical Equipment",
        budget_field: "tech_budget",
        capacity_field: None,
        vendor_capacity_attr: None,
        descriptive_fields: &[
            "preferred_area",
            "cuisine",
            "theme",
            "description",
            "equipment_required",
            "installation",
        ],
    },
];

/// Look up the profile for a category, falling back to the generic one.
pub fn profile_for(category: &str) -> &'static CategoryProfile {
    PROFILES
        .iter()
        .find(|profile| profile.category == category)
        .unwrap_or(&GENERIC_PROFILE)
}
