//! Drawing primitives and the surface they are issued to.

use serde::{Deserialize, Serialize};
use stance_core::Point2D;

/// RGBA colour, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Fill style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Brush {
    pub color: Color,
}

impl Brush {
    pub const fn solid(color: Color) -> Self {
        Self { color }
    }
}

/// Stroke style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub color: Color,
    pub thickness: f64,
}

impl Pen {
    pub fn new(color: Color, thickness: f64) -> Self {
        Self { color, thickness }
    }
}

/// Axis-aligned rectangle, origin at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A presentation surface
pub trait DrawingContext {
    fn draw_rectangle(&mut self, brush: Brush, rect: Rect);

    fn draw_ellipse(&mut self, brush: Brush, center: Point2D, radius_x: f64, radius_y: f64);

    fn draw_line(&mut self, pen: Pen, from: Point2D, to: Point2D);
}

/// One recorded drawing call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Rectangle {
        brush: Brush,
        rect: Rect,
    },
    Ellipse {
        brush: Brush,
        center: Point2D,
        radius_x: f64,
        radius_y: f64,
    },
    Line {
        pen: Pen,
        from: Point2D,
        to: Point2D,
    },
}

/// Drawing context that records commands in issue order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Pen, &Point2D, &Point2D)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { pen, from, to } => Some((pen, from, to)),
            _ => None,
        })
    }

    pub fn ellipses(&self) -> impl Iterator<Item = (&Brush, &Point2D)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Ellipse { brush, center, .. } => Some((brush, center)),
            _ => None,
        })
    }

    pub fn rectangles(&self) -> impl Iterator<Item = (&Brush, &Rect)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Rectangle { brush, rect } => Some((brush, rect)),
            _ => None,
        })
    }
}

impl DrawingContext for DisplayList {
    fn draw_rectangle(&mut self, brush: Brush, rect: Rect) {
        self.commands.push(DrawCommand::Rectangle { brush, rect });
    }

    fn draw_ellipse(&mut self, brush: Brush, center: Point2D, radius_x: f64, radius_y: f64) {
        self.commands.push(DrawCommand::Ellipse {
            brush,
            center,
            radius_x,
            radius_y,
        });
    }

    fn draw_line(&mut self, pen: Pen, from: Point2D, to: Point2D) {
        self.commands.push(DrawCommand::Line { pen, from, to });
    }
}
