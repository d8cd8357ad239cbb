use egui::{Align2, FontId};
use panespace_base::cgmath64::*;
use panespace_geometry::Aabb;
use panespace_interact::{Color32, SceneRenderer};
use panespace_scene::{Camera, Point2, ProxyId, QuadMesh, Rect, WindowProxy};

use super::textures::EguiTextures;

/// Grid cells per proxy edge; finer grids hide the affine texture warp.
const SUBDIVISIONS: usize = 8;
/// Lines are cut this far in front of the eye.
const NEAR_CLIP: f64 = 0.05;
const GRID_COLOR: Color32 = Color32::from_gray(190);
const LINE_WIDTH: f32 = 1.5;

enum Overlay {
    Rect {
        rect: egui::Rect,
        fill: egui::Color32,
        stroke: egui::Color32,
    },
    Text {
        pos: egui::Pos2,
        text: String,
        size: f32,
        color: egui::Color32,
    },
}

/// Projects the scene with the interaction camera and paints it as egui shapes.
///
/// Shapes are buffered and painted by `finish`: grid, proxies back to front,
/// debug markers, then the overlay.
pub struct EguiSceneRenderer<'a> {
    painter: &'a egui::Painter,
    textures: &'a EguiTextures,
    camera: Camera,
    viewport: Rect,
    offset: egui::Vec2,
    ground: Vec<egui::Shape>,
    proxies: Vec<(f64, egui::Shape)>,
    markers: Vec<egui::Shape>,
    overlay: Vec<Overlay>,
}

impl<'a> EguiSceneRenderer<'a> {
    pub fn new(
        painter: &'a egui::Painter,
        textures: &'a EguiTextures,
        camera: Camera,
        viewport: Rect,
        offset: egui::Vec2,
    ) -> Self {
        Self {
            painter,
            textures,
            camera,
            viewport,
            offset,
            ground: Vec::new(),
            proxies: Vec::new(),
            markers: Vec::new(),
            overlay: Vec::new(),
        }
    }

    pub fn finish(mut self) {
        self.proxies
            .sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        for shape in self.ground {
            self.painter.add(shape);
        }
        for (_, shape) in self.proxies {
            self.painter.add(shape);
        }
        for shape in self.markers {
            self.painter.add(shape);
        }
        for item in self.overlay {
            match item {
                Overlay::Rect { rect, fill, stroke } => {
                    self.painter.rect_filled(rect, 2.0, fill);
                    self.painter.rect_stroke(
                        rect,
                        2.0,
                        egui::Stroke::new(1.0, stroke),
                        egui::StrokeKind::Inside,
                    );
                }
                Overlay::Text {
                    pos,
                    text,
                    size,
                    color,
                } => {
                    self.painter
                        .text(pos, Align2::LEFT_TOP, text, FontId::proportional(size), color);
                }
            }
        }
    }

    fn project(&self, point: Point3) -> Option<(egui::Pos2, f64)> {
        let (pos, depth) = self.camera.project(point, self.viewport)?;
        Some((to_egui_pos(pos, self.offset), depth))
    }

    fn segment(&self, start: Point3, end: Point3, color: Color32) -> Option<egui::Shape> {
        let (start, end) = self.clip_to_view(start, end)?;
        let (start, _) = self.project(start)?;
        let (end, _) = self.project(end)?;
        Some(egui::Shape::line_segment(
            [start, end],
            egui::Stroke::new(LINE_WIDTH, to_egui_color(color)),
        ))
    }

    fn clip_to_view(&self, start: Point3, end: Point3) -> Option<(Point3, Point3)> {
        let forward = self.camera.forward();
        let d0 = (start - self.camera.position).dot(forward);
        let d1 = (end - self.camera.position).dot(forward);
        if d0 < NEAR_CLIP && d1 < NEAR_CLIP {
            return None;
        }
        let clipped_start = if d0 < NEAR_CLIP {
            start + (end - start) * ((NEAR_CLIP - d0) / (d1 - d0))
        } else {
            start
        };
        let clipped_end = if d1 < NEAR_CLIP {
            end + (start - end) * ((NEAR_CLIP - d1) / (d0 - d1))
        } else {
            end
        };
        Some((clipped_start, clipped_end))
    }
}

impl SceneRenderer for EguiSceneRenderer<'_> {
    fn grid(&mut self, slices: u32, spacing: f64) {
        let half = slices as f64 * spacing * 0.5;
        for idx in 0..=slices {
            let offset = -half + idx as f64 * spacing;
            let lines = [
                (Point3::new(offset, 0.0, -half), Point3::new(offset, 0.0, half)),
                (Point3::new(-half, 0.0, offset), Point3::new(half, 0.0, offset)),
            ];
            for (start, end) in lines {
                if let Some(shape) = self.segment(start, end, GRID_COLOR) {
                    self.ground.push(shape);
                }
            }
        }
    }

    fn proxy(&mut self, _id: ProxyId, proxy: &WindowProxy, tint: Color32) {
        let Some(texture_id) = self.textures.id(proxy.texture()) else {
            return;
        };
        let Some((_, depth)) = self.project(proxy.pose.position()) else {
            return;
        };
        let [tl, tr, br, bl] = *proxy.mesh().corners();
        let color = to_egui_color(tint);
        let step = 1.0 / SUBDIVISIONS as f64;

        let mut mesh = egui::Mesh::with_texture(texture_id);
        let mut indices = Vec::with_capacity((SUBDIVISIONS + 1) * (SUBDIVISIONS + 1));
        for row in 0..=SUBDIVISIONS {
            let v = row as f64 * step;
            for col in 0..=SUBDIVISIONS {
                let u = col as f64 * step;
                let top = tl + (tr - tl) * u;
                let bottom = bl + (br - bl) * u;
                let local = top + (bottom - top) * v;
                let index = self.project(proxy.pose.apply(local)).map(|(pos, _)| {
                    let index = mesh.vertices.len() as u32;
                    mesh.vertices.push(egui::epaint::Vertex {
                        pos,
                        uv: egui::pos2(u as f32, v as f32),
                        color,
                    });
                    index
                });
                indices.push(index);
            }
        }

        let stride = SUBDIVISIONS + 1;
        for row in 0..SUBDIVISIONS {
            for col in 0..SUBDIVISIONS {
                let cell = [
                    indices[row * stride + col],
                    indices[row * stride + col + 1],
                    indices[(row + 1) * stride + col + 1],
                    indices[(row + 1) * stride + col],
                ];
                for [a, b, c] in QuadMesh::TRIANGLES {
                    if let (Some(a), Some(b), Some(c)) = (cell[a], cell[b], cell[c]) {
                        mesh.add_triangle(a, b, c);
                    }
                }
            }
        }
        if !mesh.indices.is_empty() {
            self.proxies.push((depth, egui::Shape::mesh(mesh)));
        }
    }

    fn line(&mut self, start: Point3, end: Point3, color: Color32) {
        if let Some(shape) = self.segment(start, end, color) {
            self.markers.push(shape);
        }
    }

    fn sphere(&mut self, center: Point3, radius: f64, color: Color32) {
        let Some((pos, depth)) = self.project(center) else {
            return;
        };
        let pixels = (radius * self.camera.pixels_per_unit(depth, self.viewport)) as f32;
        self.markers.push(egui::Shape::circle_filled(
            pos,
            pixels.max(2.0),
            to_egui_color(color),
        ));
    }

    fn wire_box(&mut self, bounds: Aabb, color: Color32) {
        for (start, end) in bounds.edges() {
            if let Some(shape) = self.segment(start, end, color) {
                self.markers.push(shape);
            }
        }
    }

    fn overlay_rect(&mut self, rect: Rect, fill: Color32, stroke: Color32) {
        self.overlay.push(Overlay::Rect {
            rect: egui::Rect::from_min_max(
                to_egui_pos(rect.min, self.offset),
                to_egui_pos(rect.max, self.offset),
            ),
            fill: to_egui_color(fill),
            stroke: to_egui_color(stroke),
        });
    }

    fn overlay_text(&mut self, pos: Point2, text: String, size: f32, color: Color32) {
        self.overlay.push(Overlay::Text {
            pos: to_egui_pos(pos, self.offset),
            text,
            size,
            color: to_egui_color(color),
        });
    }
}

fn to_egui_pos(pos: Point2, offset: egui::Vec2) -> egui::Pos2 {
    egui::pos2(pos.x + offset.x, pos.y + offset.y)
}

fn to_egui_color(color: Color32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
