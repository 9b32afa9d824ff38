//! Built-in slide templates.
//!
//! Templates are rebuilt on every call so each application gets fresh slide
//! and element ids.

use crate::app::domain::ids::SlideId;
use crate::app::domain::presentation::{
    ImageStyle, Placement, ShapeStyle, Slide, SlideElement, TextStyle, Transition,
};

/// Category filter value that matches every template.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    /// CSS background shown on the template card.
    pub thumbnail: &'static str,
    pub description: &'static str,
    pub slides: Vec<Slide>,
}

/// All built-in templates, in gallery order.
pub fn templates() -> Vec<Template> {
    vec![
        Template {
            id: "modern-gradient",
            name: "Modern Gradient",
            category: "business",
            thumbnail: BLUE_GRADIENT,
            description: "Professional and clean design",
            slides: modern_gradient(),
        },
        Template {
            id: "dark-elegance",
            name: "Dark Elegance",
            category: "business",
            thumbnail: "#111827",
            description: "Sophisticated dark theme",
            slides: dark_elegance(),
        },
        Template {
            id: "minimalist",
            name: "Minimalist",
            category: "minimal",
            thumbnail: "#ffffff",
            description: "Clean and simple design",
            slides: minimalist(),
        },
        Template {
            id: "academic",
            name: "Academic",
            category: "education",
            thumbnail: "#FFFBEB",
            description: "Perfect for educational content",
            slides: academic(),
        },
        Template {
            id: "data-focused",
            name: "Data Focused",
            category: "business",
            thumbnail: "#ECFDF5",
            description: "Great for data presentation",
            slides: data_focused(),
        },
        Template {
            id: "creative-vibes",
            name: "Creative Vibes",
            category: "creative",
            thumbnail: PINK_GRADIENT,
            description: "Bold and artistic design",
            slides: creative_vibes(),
        },
    ]
}

pub fn find_template(id: &str) -> Option<Template> {
    templates().into_iter().find(|t| t.id == id)
}

/// Templates in `category`; `"all"` returns every template.
pub fn templates_in(category: &str) -> Vec<Template> {
    templates()
        .into_iter()
        .filter(|t| category == ALL_CATEGORIES || t.category == category)
        .collect()
}

const BLUE_GRADIENT: &str = "linear-gradient(135deg, #3b82f6 0%, #8b5cf6 100%)";
const PINK_GRADIENT: &str = "linear-gradient(135deg, #ec4899 0%, #f97316 100%)";

fn slide(background: &str, transition: Transition, elements: Vec<SlideElement>) -> Slide {
    Slide {
        id: SlideId::generate(),
        elements,
        background: background.to_string(),
        transition,
        notes: None,
    }
}

/// Font settings for a text element: color, family, size, weight, alignment.
struct Font<'a>(&'a str, &'a str, &'a str, Option<&'a str>, Option<&'a str>);

fn text(content: &str, at: [f64; 4], z_index: i32, font: Font<'_>) -> SlideElement {
    let Font(color, family, size, weight, align) = font;
    SlideElement::text(
        content,
        Placement::new(at[0], at[1], at[2], at[3], z_index),
        TextStyle {
            color: Some(color.to_string()),
            font_family: Some(family.to_string()),
            font_size: Some(size.to_string()),
            font_weight: weight.map(str::to_string),
            text_align: align.map(str::to_string),
        },
    )
}

fn shape(
    kind: &str,
    at: [f64; 4],
    z_index: i32,
    background: &str,
    radius: Option<&str>,
) -> SlideElement {
    SlideElement::shape(
        kind,
        Placement::new(at[0], at[1], at[2], at[3], z_index),
        ShapeStyle {
            background_color: Some(background.to_string()),
            border_radius: radius.map(str::to_string),
        },
    )
}

fn image(uri: &str, at: [f64; 4], radius: &str) -> SlideElement {
    SlideElement::image(
        uri,
        Placement::new(at[0], at[1], at[2], at[3], 8),
        ImageStyle {
            border_radius: Some(radius.to_string()),
        },
    )
}

fn modern_gradient() -> Vec<Slide> {
    vec![
        slide(
            BLUE_GRADIENT,
            Transition::Fade,
            vec![
                text(
                    "Welcome to Your Presentation",
                    [400.0, 250.0, 600.0, 100.0],
                    10,
                    Font("#ffffff", "Poppins", "48px", Some("700"), Some("center")),
                ),
                text(
                    "Create beautiful presentations with PresentCraft",
                    [400.0, 370.0, 600.0, 50.0],
                    9,
                    Font("rgba(255,255,255,0.9)", "Inter", "24px", None, Some("center")),
                ),
                shape(
                    "rectangle",
                    [450.0, 450.0, 300.0, 70.0],
                    8,
                    "rgba(255,255,255,0.2)",
                    Some("35px"),
                ),
            ],
        ),
        slide(
            "#ffffff",
            Transition::Slide,
            vec![
                text(
                    "About Our Company",
                    [150.0, 100.0, 500.0, 80.0],
                    10,
                    Font("#3b82f6", "Poppins", "40px", Some("700"), None),
                ),
                text(
                    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nullam in dui mauris. \
                     Vivamus hendrerit arcu sed erat molestie vehicula.",
                    [150.0, 200.0, 500.0, 150.0],
                    9,
                    Font("#4b5563", "Inter", "18px", None, None),
                ),
                image(
                    "https://images.unsplash.com/photo-1551434678-e076c223a692?w=600",
                    [700.0, 150.0, 400.0, 300.0],
                    "8px",
                ),
            ],
        ),
    ]
}

fn dark_elegance() -> Vec<Slide> {
    let service_box = |x: f64, color: &str| {
        shape("rectangle", [x, 200.0, 250.0, 200.0], 9, color, Some("8px"))
    };
    let service_label = |label: &str, x: f64| {
        text(
            label,
            [x, 230.0, 250.0, 50.0],
            10,
            Font("#ffffff", "Inter", "22px", Some("600"), Some("center")),
        )
    };
    vec![
        slide(
            "#111827",
            Transition::Fade,
            vec![
                text(
                    "Dark Elegance",
                    [400.0, 250.0, 600.0, 100.0],
                    10,
                    Font("#ffffff", "Poppins", "52px", Some("700"), Some("center")),
                ),
                text(
                    "A sophisticated presentation template",
                    [400.0, 370.0, 600.0, 50.0],
                    9,
                    Font("rgba(255,255,255,0.7)", "Inter", "24px", None, Some("center")),
                ),
                shape("line", [500.0, 450.0, 200.0, 4.0], 8, "#8b5cf6", None),
            ],
        ),
        slide(
            "#1f2937",
            Transition::Slide,
            vec![
                text(
                    "Our Services",
                    [150.0, 100.0, 500.0, 80.0],
                    10,
                    Font("#ffffff", "Poppins", "40px", Some("600"), None),
                ),
                service_box(150.0, "rgba(139, 92, 246, 0.1)"),
                service_box(450.0, "rgba(59, 130, 246, 0.1)"),
                service_box(750.0, "rgba(16, 185, 129, 0.1)"),
                service_label("Service 1", 150.0),
                service_label("Service 2", 450.0),
                service_label("Service 3", 750.0),
            ],
        ),
    ]
}

fn minimalist() -> Vec<Slide> {
    let rule = |at: [f64; 4], z_index: i32| shape("rectangle", at, z_index, "#111827", None);
    vec![
        slide(
            "#ffffff",
            Transition::None,
            vec![
                text(
                    "Minimalist Design",
                    [400.0, 250.0, 600.0, 100.0],
                    10,
                    Font("#111827", "Inter", "48px", Some("700"), Some("center")),
                ),
                text(
                    "Clean and simple presentation template",
                    [400.0, 370.0, 600.0, 50.0],
                    9,
                    Font("#4b5563", "Inter", "20px", None, Some("center")),
                ),
                rule([400.0, 100.0, 400.0, 2.0], 8),
                rule([400.0, 450.0, 400.0, 2.0], 8),
            ],
        ),
        slide(
            "#ffffff",
            Transition::None,
            vec![
                text(
                    "Portfolio",
                    [150.0, 100.0, 300.0, 80.0],
                    10,
                    Font("#111827", "Inter", "36px", Some("700"), None),
                ),
                rule([150.0, 190.0, 50.0, 2.0], 9),
                image(
                    "https://images.unsplash.com/photo-1558655146-d09347e92766?w=600",
                    [150.0, 220.0, 300.0, 200.0],
                    "0px",
                ),
                image(
                    "https://images.unsplash.com/photo-1620912189866-894181705ea2?w=600",
                    [480.0, 220.0, 300.0, 200.0],
                    "0px",
                ),
                image(
                    "https://images.unsplash.com/photo-1600132806370-bf17e6e2dce1?w=600",
                    [810.0, 220.0, 300.0, 200.0],
                    "0px",
                ),
            ],
        ),
    ]
}

fn academic() -> Vec<Slide> {
    vec![
        slide(
            "#FFFBEB",
            Transition::Fade,
            vec![
                text(
                    "Research Presentation",
                    [400.0, 200.0, 600.0, 100.0],
                    10,
                    Font("#1e3a8a", "Poppins", "44px", Some("700"), Some("center")),
                ),
                text(
                    "By John Doe, PhD",
                    [400.0, 300.0, 600.0, 50.0],
                    9,
                    Font("#4b5563", "Inter", "22px", None, Some("center")),
                ),
                text(
                    "Department of Computer Science",
                    [400.0, 350.0, 600.0, 50.0],
                    9,
                    Font("#4b5563", "Inter", "18px", None, Some("center")),
                ),
                shape("rectangle", [400.0, 100.0, 600.0, 10.0], 8, "#f59e0b", Some("5px")),
            ],
        ),
        slide(
            "#ffffff",
            Transition::Slide,
            vec![
                text(
                    "Research Objectives",
                    [150.0, 100.0, 900.0, 80.0],
                    10,
                    Font("#1e3a8a", "Poppins", "36px", Some("600"), None),
                ),
                shape("rectangle", [150.0, 190.0, 5.0, 250.0], 9, "#f59e0b", None),
                text(
                    "• To investigate the relationship between X and Y\n\
                     • To develop a new framework for understanding Z\n\
                     • To evaluate the effectiveness of existing methods\n\
                     • To propose improvements to the current model",
                    [180.0, 200.0, 800.0, 200.0],
                    9,
                    Font("#4b5563", "Inter", "20px", None, None),
                ),
            ],
        ),
    ]
}

fn data_focused() -> Vec<Slide> {
    let mut banner = shape("rectangle", [300.0, 400.0, 600.0, 100.0], 8, "#10b981", Some("8px"));
    banner.placement.opacity = Some(0.2);

    let kpi_box = |x: f64| {
        shape(
            "rectangle",
            [x, 200.0, 280.0, 200.0],
            9,
            "rgba(16, 185, 129, 0.1)",
            Some("8px"),
        )
    };
    let kpi = |label: &str, x: f64| {
        text(
            label,
            [x, 250.0, 280.0, 100.0],
            10,
            Font("#065f46", "Inter", "24px", Some("600"), Some("center")),
        )
    };
    vec![
        slide(
            "#ECFDF5",
            Transition::Fade,
            vec![
                text(
                    "Data Analysis Report",
                    [400.0, 200.0, 600.0, 100.0],
                    10,
                    Font("#065f46", "Poppins", "44px", Some("700"), Some("center")),
                ),
                text(
                    "Q3 2023 Performance",
                    [400.0, 300.0, 600.0, 50.0],
                    9,
                    Font("#4b5563", "Inter", "24px", None, Some("center")),
                ),
                banner,
                text(
                    "Prepared by Business Analytics Team",
                    [400.0, 425.0, 600.0, 50.0],
                    9,
                    Font("#065f46", "Inter", "18px", Some("500"), Some("center")),
                ),
            ],
        ),
        slide(
            "#ffffff",
            Transition::Fade,
            vec![
                text(
                    "Key Performance Indicators",
                    [150.0, 100.0, 900.0, 80.0],
                    10,
                    Font("#065f46", "Poppins", "36px", Some("600"), None),
                ),
                kpi_box(150.0),
                kpi_box(460.0),
                kpi_box(770.0),
                kpi("Revenue\n$8.2M", 290.0),
                kpi("Growth\n+12.3%", 600.0),
                kpi("Customers\n12,458", 910.0),
            ],
        ),
    ]
}

fn creative_vibes() -> Vec<Slide> {
    vec![
        slide(
            PINK_GRADIENT,
            Transition::Zoom,
            vec![
                text(
                    "Creative Portfolio",
                    [400.0, 250.0, 600.0, 100.0],
                    10,
                    Font("#ffffff", "Poppins", "52px", Some("700"), Some("center")),
                ),
                text(
                    "Showcase your work with style",
                    [400.0, 350.0, 600.0, 50.0],
                    9,
                    Font("rgba(255,255,255,0.9)", "Inter", "24px", None, Some("center")),
                ),
                shape("circle", [200.0, 200.0, 150.0, 150.0], 8, "rgba(255,255,255,0.2)", None),
                shape("circle", [800.0, 300.0, 100.0, 100.0], 8, "rgba(255,255,255,0.15)", None),
            ],
        ),
        slide(
            "#ffffff",
            Transition::Slide,
            vec![
                text(
                    "My Work",
                    [150.0, 100.0, 500.0, 80.0],
                    10,
                    Font("#ec4899", "Poppins", "40px", Some("700"), None),
                ),
                image(
                    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?w=600",
                    [150.0, 200.0, 350.0, 250.0],
                    "16px",
                ),
                image(
                    "https://images.unsplash.com/photo-1547119957-637f8679db1e?w=600",
                    [550.0, 200.0, 500.0, 250.0],
                    "16px",
                ),
                text(
                    "Design is not just what it looks like and feels like. Design is how it works.",
                    [400.0, 500.0, 600.0, 100.0],
                    9,
                    Font("#4b5563", "Inter", "18px", None, Some("center")),
                ),
            ],
        ),
    ]
}
