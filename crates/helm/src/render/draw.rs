use std::collections::BTreeSet;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One screen-space line segment for the rendering backend.
/// 10 floats = 40 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
    pub width: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    /// Padding to keep the stride a multiple of 8 bytes.
    pub _pad: f32,
}

impl LineInstance {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Self {
        Self {
            from_x: from.x,
            from_y: from.y,
            to_x: to.x,
            to_y: to.y,
            width,
            r: color[0],
            g: color[1],
            b: color[2],
            a: color[3],
            _pad: 0.0,
        }
    }
}

/// A run of text anchored at a screen position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub pos: Vec2,
    pub size: u32,
    pub color: [f32; 4],
}

/// Everything the surfaces asked to draw this frame.
#[derive(Debug, Default)]
pub struct DrawList {
    pub lines: Vec<LineInstance>,
    pub texts: Vec<TextItem>,
    /// Named conditions the main button interface is drawn with.
    pub conditions: BTreeSet<&'static str>,
    /// Surfaces drawn, bottom to top, by name.
    pub surfaces: Vec<&'static str>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.texts.clear();
        self.conditions.clear();
        self.surfaces.clear();
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
        self.lines.push(LineInstance::new(from, to, width, color));
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: u32, color: [f32; 4]) {
        self.texts.push(TextItem {
            text: text.into(),
            pos,
            size,
            color,
        });
    }

    /// Copy the lines and text of a list drawn elsewhere.
    pub fn extend_from(&mut self, other: &DrawList) {
        self.lines.extend_from_slice(&other.lines);
        self.texts.extend(other.texts.iter().cloned());
    }

    pub fn set_condition(&mut self, condition: &'static str) {
        self.conditions.insert(condition);
    }

    pub fn has_condition(&self, condition: &str) -> bool {
        self.conditions.contains(condition)
    }

    /// Line instances as raw bytes, ready for upload.
    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }
}
