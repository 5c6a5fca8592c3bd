//! Per-frame presentation: clear the surface to the theme colour and present.

use crate::gpu::{RenderContext, SurfaceError};

/// What happened to a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// Surface timed out; the frame was dropped.
    Skipped,
}

/// Converts a linear `[r, g, b]` triple into an opaque wgpu clear colour.
pub fn clear_color(rgb: [f32; 3]) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(rgb[0]),
        g: f64::from(rgb[1]),
        b: f64::from(rgb[2]),
        a: 1.0,
    }
}

/// Clears and presents frames. Scene geometry is drawn elsewhere.
pub struct SceneRenderer {
    clear: wgpu::Color,
    frames: u64,
}

impl SceneRenderer {
    pub fn new(background: [f32; 3]) -> Self {
        Self {
            clear: clear_color(background),
            frames: 0,
        }
    }

    pub fn set_background(&mut self, background: [f32; 3]) {
        self.clear = clear_color(background);
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Encode a single clear pass into the current surface texture and present it.
    pub fn render(&mut self, ctx: &RenderContext) -> Result<FrameOutcome, SurfaceError> {
        let surface_texture = match ctx.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::Timeout) => {
                log::debug!("Surface timeout, skipping frame");
                return Ok(FrameOutcome::Skipped);
            }
            Err(err) => return Err(err),
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("clear-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        ctx.queue.submit([encoder.finish()]);
        surface_texture.present();
        self.frames += 1;
        Ok(FrameOutcome::Presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_is_opaque() {
        let color = clear_color([0.0, 0.0, 0.0]);
        assert_eq!(color.a, 1.0);
        assert_eq!(color.r, 0.0);
    }

    #[test]
    fn test_clear_color_widens_channels() {
        let color = clear_color([0.5, 0.25, 1.0]);
        assert!((color.r - 0.5).abs() < 1e-9);
        assert!((color.g - 0.25).abs() < 1e-9);
        assert!((color.b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_background_replaces_clear() {
        let mut renderer = SceneRenderer::new([1.0, 0.0, 0.0]);
        renderer.set_background([0.0, 1.0, 0.0]);
        assert_eq!(renderer.clear, clear_color([0.0, 1.0, 0.0]));
        assert_eq!(renderer.frames(), 0);
    }
}
