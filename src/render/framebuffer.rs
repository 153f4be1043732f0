use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;
use tracing::warn;

/// CPU pixel buffer, uploaded once per frame to a persistent texture.
pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline] pub fn set_current_color(&mut self, c: Color) { self.current_color = c; }
    #[inline] pub fn set_background_color(&mut self, c: Color) { self.background_color = c; }

    /// Horizontal run [x0, x1] on row y in the current colour, clipped.
    fn fill_span(&mut self, y: u32, x0: i64, x1: i64) {
        if y >= self.height || x1 < 0 || x0 >= self.width as i64 {
            return;
        }
        let a = x0.max(0) as u32;
        let b = x1.min(self.width as i64 - 1) as u32;
        if a > b {
            return;
        }
        let row = (y * self.width) as usize;
        let c = self.current_color;
        self.color_buffer[row + a as usize..=row + b as usize].fill(c);
    }

    /// Even-odd scanline fill, sampling at pixel centres.
    pub fn fill_polygon(&mut self, pts: &[Vector2]) {
        if pts.len() < 3 {
            return;
        }
        let (mut ymin, mut ymax) = (f32::MAX, f32::MIN);
        for p in pts {
            ymin = ymin.min(p.y);
            ymax = ymax.max(p.y);
        }
        let y_start = (ymin - 0.5).ceil().max(0.0) as i64;
        let y_end = ((ymax - 0.5).floor() as i64).min(self.height as i64 - 1);
        let mut xs: Vec<f32> = Vec::with_capacity(pts.len());

        for y in y_start..=y_end {
            let sy = y as f32 + 0.5;
            xs.clear();
            for i in 0..pts.len() {
                let a = pts[i];
                let b = pts[(i + 1) % pts.len()];
                if (a.y <= sy) != (b.y <= sy) {
                    xs.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            xs.sort_by(|p, q| p.partial_cmp(q).unwrap_or(std::cmp::Ordering::Equal));
            for pair in xs.chunks_exact(2) {
                let x0 = (pair[0] - 0.5).ceil() as i64;
                let x1 = (pair[1] - 0.5).floor() as i64;
                self.fill_span(y as u32, x0, x1);
            }
        }
    }

    /// Uploads the pixels to a *persistent* texture of the same size.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        // SAFETY: Color is repr(C) RGBA8, so the buffer is a valid byte slice.
        let bytes: &[u8] = unsafe {
            std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len)
        };
        if let Err(e) = tex.update_texture(bytes) {
            warn!(error = %e, "framebuffer upload failed");
        }
    }
}
