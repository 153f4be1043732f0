//! Darkness overlay with the flashlight cone cut out.
//!
//! The mask is black at `overlay_alpha` everywhere and opaque white inside the
//! cone. Drawn with multiply blending, white leaves the scene untouched and
//! the dark area keeps only `1 - overlay_alpha` of it.
use raylib::prelude::*;

use crate::core::flashlight::Flashlight;
use crate::render::framebuffer::Framebuffer;

pub const LIGHT: Color = Color::new(255, 255, 255, 255);

pub fn dark_color(alpha: f32) -> Color {
    Color::new(0, 0, 0, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Repaints the whole mask for this frame.
pub fn paint_vision_mask(
    fb: &mut Framebuffer,
    flashlight: &Flashlight,
    origin: Vector2,
    pointer: Vector2,
    overlay_alpha: f32,
) {
    fb.set_background_color(dark_color(overlay_alpha));
    fb.clear();
    if flashlight.is_active() {
        let cone = flashlight.cone_polygon(origin, pointer);
        fb.set_current_color(LIGHT);
        fb.fill_polygon(&cone);
    }
}

/// Mask buffer plus the GPU texture it is uploaded to.
pub struct VisionOverlay {
    pub fb: Framebuffer,
    texture: Texture2D,
    alpha: f32,
}

impl VisionOverlay {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        width: u32,
        height: u32,
        alpha: f32,
    ) -> anyhow::Result<Self> {
        let img = Image::gen_image_color(width as i32, height as i32, dark_color(alpha));
        let texture = rl
            .load_texture_from_image(thread, &img)
            .map_err(|e| anyhow::anyhow!("vision overlay texture: {}", e))?;
        Ok(Self { fb: Framebuffer::new(width, height), texture, alpha })
    }

    pub fn update(&mut self, flashlight: &Flashlight, origin: Vector2, pointer: Vector2) {
        paint_vision_mask(&mut self.fb, flashlight, origin, pointer, self.alpha);
        self.fb.upload_to_texture(&mut self.texture);
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        let mut b = d.begin_blend_mode(BlendMode::BLEND_MULTIPLIED);
        b.draw_texture(&self.texture, 0, 0, Color::WHITE);
    }
}
