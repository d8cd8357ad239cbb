use panespace_base::{PixelBuffer, Result};
use panespace_scene::{TextureHandle, TextureSink};

/// Proxy textures held by egui's texture manager.
pub struct EguiTextures {
    ctx: egui::Context,
    handles: Vec<egui::TextureHandle>,
}

impl EguiTextures {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            handles: Vec::new(),
        }
    }

    pub fn id(&self, texture: TextureHandle) -> Option<egui::TextureId> {
        self.handles
            .get(texture.raw() as usize)
            .map(egui::TextureHandle::id)
    }
}

impl TextureSink for EguiTextures {
    fn upload(&mut self, pixels: PixelBuffer) -> Result<TextureHandle> {
        let texture = TextureHandle::new(self.handles.len() as u64);
        let handle = self.ctx.load_texture(
            format!("proxy-{}", texture.raw()),
            color_image(pixels),
            egui::TextureOptions::LINEAR,
        );
        self.handles.push(handle);
        Ok(texture)
    }

    fn refresh(&mut self, texture: TextureHandle, pixels: PixelBuffer) {
        let Some(handle) = self.handles.get_mut(texture.raw() as usize) else {
            return;
        };
        if handle.size() != [pixels.width() as usize, pixels.height() as usize] {
            return;
        }
        handle.set(color_image(pixels), egui::TextureOptions::LINEAR);
    }
}

fn color_image(pixels: PixelBuffer) -> egui::ColorImage {
    let size = [pixels.width() as usize, pixels.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, &pixels.into_rgba().into_bytes())
}
