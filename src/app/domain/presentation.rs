use serde::{Deserialize, Serialize};

use super::ids::{ElementId, PresentationId, SlideId};
use crate::app::infrastructure::clock::now_millis;

pub const DEFAULT_TITLE: &str = "Untitled Presentation";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Canvas width in document units; height follows the 16:9 aspect ratio.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
pub const SLIDE_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Animation effects offered by the animation panel.
pub const ANIMATION_TYPES: [&str; 5] = ["none", "fadeIn", "slideIn", "scaleIn", "bounce"];

/// Background palette offered for slides.
pub const SLIDE_BACKGROUNDS: [&str; 15] = [
    "#FFFFFF", "#EFF6FF", "#ECFDF5", "#FFFBEB", "#F5F3FF", "#FEF2F2", "#F0FDFA", "#F8FAFC",
    "#F3F4F6", "#FFF7ED", "#111827", "#1E293B", "#0F172A", "#18181B", "#292524",
];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    #[default]
    None,
    Fade,
    Slide,
    Zoom,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::Zoom => "zoom",
        }
    }

    pub fn from_str(s: &str) -> Option<Transition> {
        match s {
            "none" => Some(Self::None),
            "fade" => Some(Self::Fade),
            "slide" => Some(Self::Slide),
            "zoom" => Some(Self::Zoom),
            _ => None,
        }
    }

    pub fn all() -> &'static [Transition] {
        &[Self::None, Self::Fade, Self::Slide, Self::Zoom]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    #[serde(rename = "type")]
    pub kind: String,
    /// Seconds.
    pub duration: f64,
    /// Seconds.
    pub delay: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Shape,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
        }
    }

    pub fn from_str(s: &str) -> Option<ElementKind> {
        match s {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "shape" => Some(Self::Shape),
            _ => None,
        }
    }
}

/// Geometry and paint order shared by every element type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placement {
    pub position: Position,
    pub size: Size,
    /// Degrees.
    pub rotation: Option<f64>,
    /// Paint order, larger on top.
    pub z_index: i32,
    pub opacity: Option<f64>,
}

impl Placement {
    pub fn new(x: f64, y: f64, width: f64, height: f64, z_index: i32) -> Self {
        Self {
            position: Position { x, y },
            size: Size { width, height },
            rotation: None,
            z_index,
            opacity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub text_align: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageStyle {
    pub border_radius: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeStyle {
    pub background_color: Option<String>,
    pub border_radius: Option<String>,
}

/// Type-specific visual payload of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    Text(TextStyle),
    Image(ImageStyle),
    Shape(ShapeStyle),
}

impl Appearance {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Image(_) => ElementKind::Image,
            Self::Shape(_) => ElementKind::Shape,
        }
    }
}

/// One object on a slide. `content` is the literal text, the image URI or the
/// shape tag (`rectangle`, `line`, ...) depending on the appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ElementRecord", into = "ElementRecord")]
pub struct SlideElement {
    pub id: ElementId,
    pub content: String,
    pub placement: Placement,
    pub appearance: Appearance,
    pub animation: Option<Animation>,
    /// Live text-editing flag, meaningless outside an editing session.
    pub is_editing: bool,
}

impl SlideElement {
    pub fn new(content: impl Into<String>, placement: Placement, appearance: Appearance) -> Self {
        Self {
            id: ElementId::generate(),
            content: content.into(),
            placement,
            appearance,
            animation: None,
            is_editing: false,
        }
    }

    pub fn text(content: impl Into<String>, placement: Placement, style: TextStyle) -> Self {
        Self::new(content, placement, Appearance::Text(style))
    }

    pub fn image(uri: impl Into<String>, placement: Placement, style: ImageStyle) -> Self {
        Self::new(uri, placement, Appearance::Image(style))
    }

    pub fn shape(shape: impl Into<String>, placement: Placement, style: ShapeStyle) -> Self {
        Self::new(shape, placement, Appearance::Shape(style))
    }

    /// Text box as inserted from the toolbar.
    pub fn default_text_box() -> Self {
        Self::text(
            "Click to edit text",
            Placement::new(400.0, 300.0, 400.0, 100.0, 10),
            TextStyle {
                color: Some("#000000".to_string()),
                font_family: Some("Inter".to_string()),
                font_size: Some("24px".to_string()),
                font_weight: None,
                text_align: Some("left".to_string()),
            },
        )
    }

    /// Image as inserted from the toolbar, `uri` usually a data URI.
    pub fn default_image(uri: impl Into<String>) -> Self {
        Self::image(
            uri,
            Placement::new(400.0, 300.0, 400.0, 300.0, 5),
            ImageStyle::default(),
        )
    }

    /// Rectangle as inserted from the toolbar.
    pub fn default_shape() -> Self {
        Self::shape(
            "rectangle",
            Placement::new(400.0, 300.0, 200.0, 150.0, 5),
            ShapeStyle {
                background_color: Some("#3B82F6".to_string()),
                border_radius: Some("4px".to_string()),
            },
        )
    }

    pub fn kind(&self) -> ElementKind {
        self.appearance.kind()
    }

    /// Hidden elements carry an opacity of exactly 0.
    pub fn is_hidden(&self) -> bool {
        self.placement.opacity == Some(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    pub elements: Vec<SlideElement>,
    pub background: String,
    pub transition: Transition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Slide {
    /// Empty white slide without transition.
    pub fn blank() -> Self {
        Self {
            id: SlideId::generate(),
            elements: Vec::new(),
            background: DEFAULT_BACKGROUND.to_string(),
            transition: Transition::None,
            notes: None,
        }
    }

    pub fn element(&self, id: &ElementId) -> Option<&SlideElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Elements sorted back to front; ties keep array order.
    pub fn paint_order(&self) -> Vec<&SlideElement> {
        let mut ordered: Vec<&SlideElement> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.placement.z_index);
        ordered
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: PresentationId,
    pub title: String,
    pub slides: Vec<Slide>,
    /// Unix milliseconds.
    pub created: i64,
    /// Unix milliseconds, never decreases.
    pub updated: i64,
    pub current_slide_index: usize,
}

impl Presentation {
    /// A presentation with one title slide holding two placeholder text boxes.
    pub fn new(title: impl Into<String>) -> Self {
        Self::new_at(title, now_millis())
    }

    pub fn new_at(title: impl Into<String>, now: i64) -> Self {
        let mut slide = Slide::blank();
        slide.elements = vec![
            SlideElement::text(
                "Click to edit title",
                Placement::new(400.0, 250.0, 600.0, 100.0, 10),
                TextStyle {
                    color: Some("#111827".to_string()),
                    font_family: Some("Poppins".to_string()),
                    font_size: Some("44px".to_string()),
                    font_weight: Some("600".to_string()),
                    text_align: Some("center".to_string()),
                },
            ),
            SlideElement::text(
                "Click to edit subtitle",
                Placement::new(400.0, 350.0, 600.0, 50.0, 9),
                TextStyle {
                    color: Some("#4b5563".to_string()),
                    font_family: Some("Inter".to_string()),
                    font_size: Some("24px".to_string()),
                    font_weight: None,
                    text_align: Some("center".to_string()),
                },
            ),
        ];

        Self {
            id: PresentationId::generate(),
            title: title.into(),
            slides: vec![slide],
            created: now,
            updated: now,
            current_slide_index: 0,
        }
    }

    pub fn slide(&self, id: &SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| &s.id == id)
    }

    pub fn slide_index(&self, id: &SlideId) -> Option<usize> {
        self.slides.iter().position(|s| &s.id == id)
    }

    /// The slide under `current_slide_index`, or the first slide if the index
    /// is stale.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides
            .get(self.current_slide_index)
            .or_else(|| self.slides.first())
    }

    /// Bring a document read from an outside source back within the
    /// structural invariants: at least one slide and a valid current index.
    pub fn repair(&mut self) {
        if self.slides.is_empty() {
            self.slides.push(Slide::blank());
        }
        if self.current_slide_index >= self.slides.len() {
            self.current_slide_index = self.slides.len() - 1;
        }
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

// Flat wire layout: a single `style` object carries the fields of every
// element type; the ones that don't apply to `type` are dropped on read.

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementRecord {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    content: String,
    style: StyleRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    animation: Option<Animation>,
    // Shared files sometimes carry an explicit null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_editing: Option<bool>,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StyleRecord {
    position: Position,
    size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotation: Option<f64>,
    z_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opacity: Option<f64>,
}

impl From<ElementRecord> for SlideElement {
    fn from(record: ElementRecord) -> Self {
        let style = record.style;
        let appearance = match record.kind {
            ElementKind::Text => Appearance::Text(TextStyle {
                color: style.color,
                font_family: style.font_family,
                font_size: style.font_size,
                font_weight: style.font_weight,
                text_align: style.text_align,
            }),
            ElementKind::Image => Appearance::Image(ImageStyle {
                border_radius: style.border_radius,
            }),
            ElementKind::Shape => Appearance::Shape(ShapeStyle {
                background_color: style.background_color,
                border_radius: style.border_radius,
            }),
        };

        Self {
            id: record.id,
            content: record.content,
            placement: Placement {
                position: style.position,
                size: style.size,
                rotation: style.rotation,
                z_index: style.z_index,
                opacity: style.opacity,
            },
            appearance,
            animation: record.animation,
            is_editing: record.is_editing.unwrap_or_default(),
        }
    }
}

impl From<SlideElement> for ElementRecord {
    fn from(element: SlideElement) -> Self {
        let kind = element.kind();
        let placement = element.placement;
        let mut style = StyleRecord {
            position: placement.position,
            size: placement.size,
            rotation: placement.rotation,
            z_index: placement.z_index,
            opacity: placement.opacity,
            ..StyleRecord::default()
        };
        match element.appearance {
            Appearance::Text(text) => {
                style.color = text.color;
                style.font_family = text.font_family;
                style.font_size = text.font_size;
                style.font_weight = text.font_weight;
                style.text_align = text.text_align;
            }
            Appearance::Image(image) => {
                style.border_radius = image.border_radius;
            }
            Appearance::Shape(shape) => {
                style.background_color = shape.background_color;
                style.border_radius = shape.border_radius;
            }
        }

        Self {
            id: element.id,
            kind,
            content: element.content,
            style,
            animation: element.animation,
            is_editing: element.is_editing.then_some(true),
        }
    }
}
