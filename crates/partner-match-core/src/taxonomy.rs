//! Curated focus-area taxonomy.
//!
//! Organizations may use any free-text label, but profile forms offer
//! these categories and sub-areas. The taxonomy is informational: the
//! filter and scorer never consult it.

use serde::Serialize;

use crate::filter::eq_ignore_case;

/// A top-level category and its sub-areas.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FocusAreaCategory {
    pub name: &'static str,
    pub color: &'static str,
    pub areas: &'static [&'static str],
}

const CATEGORIES: &[FocusAreaCategory] = &[
    FocusAreaCategory {
        name: "Education & STEM",
        color: "#3B82F6",
        areas: &[
            "School Education",
            "Digital Education",
            "STEM / Robotics",
            "Scholarships",
            "Teacher Training",
            "Adult Literacy",
        ],
    },
    FocusAreaCategory {
        name: "Skill Development & Livelihood",
        color: "#8B5CF6",
        areas: &[
            "Vocational Training",
            "Entrepreneurship Support",
            "Self-Employment",
            "Rural Livelihood",
            "Urban Livelihood",
        ],
    },
    FocusAreaCategory {
        name: "Health & Nutrition",
        color: "#EF4444",
        areas: &[
            "Preventive Healthcare",
            "Maternal & Child Health",
            "Sanitation & Hygiene",
            "Nutrition Programs",
            "Medical Camps",
        ],
    },
    FocusAreaCategory {
        name: "Women Empowerment",
        color: "#EC4899",
        areas: &[
            "Women Skilling",
            "Women Safety & Rights",
            "Financial Inclusion (Women)",
            "Leadership Development (Women)",
        ],
    },
    FocusAreaCategory {
        name: "Environment & Sustainability",
        color: "#10B981",
        areas: &[
            "Waste Management",
            "Water Conservation",
            "Renewable Energy",
            "Energy Efficiency",
            "Climate Action",
            "Urban Green Spaces",
        ],
    },
    FocusAreaCategory {
        name: "Agriculture & Rural Development",
        color: "#92400E",
        areas: &[
            "Farmer Training",
            "Agri-Tech",
            "Supply Chain Improvement",
            "Irrigation Support",
            "Animal Husbandry",
        ],
    },
    FocusAreaCategory {
        name: "Community Development",
        color: "#6366F1",
        areas: &[
            "Village Development",
            "Infrastructure Support",
            "Slum Development",
            "Migrant Support",
            "Disaster Relief",
            "Public Utilities",
        ],
    },
    FocusAreaCategory {
        name: "Innovation, Research & Technology",
        color: "#06B6D4",
        areas: &[
            "Innovation Labs",
            "Incubation Support",
            "R&D Projects",
            "Social Innovation",
            "Startup & Entrepreneurship Programs",
            "Digital Transformation",
        ],
    },
    FocusAreaCategory {
        name: "Differently-Abled Support",
        color: "#F97316",
        areas: &[
            "Assistive Devices",
            "Special Education",
            "Accessibility Initiatives",
        ],
    },
    FocusAreaCategory {
        name: "Youth Development & Sports",
        color: "#0EA5E9",
        areas: &[
            "Sports Training",
            "Sports Infrastructure",
            "Youth Leadership Programs",
            "Volunteering Programs",
        ],
    },
    FocusAreaCategory {
        name: "Arts, Culture & Heritage",
        color: "#F59E0B",
        areas: &[
            "Cultural Preservation",
            "Museums & Heritage",
            "Cultural Programs",
        ],
    },
    FocusAreaCategory {
        name: "Governance, Policy & Civic Engagement",
        color: "#6B7280",
        areas: &[
            "Good Governance",
            "Digital Governance",
            "Transparency Initiatives",
            "Citizen Engagement Platforms",
            "RTI Awareness",
        ],
    },
];

pub fn categories() -> &'static [FocusAreaCategory] {
    CATEGORIES
}

/// The category a label belongs to. A category name maps to itself.
pub fn category_of(label: &str) -> Option<&'static FocusAreaCategory> {
    CATEGORIES.iter().find(|c| {
        eq_ignore_case(c.name, label) || c.areas.iter().any(|a| eq_ignore_case(a, label))
    })
}

pub fn is_known(label: &str) -> bool {
    category_of(label).is_some()
}
