//! Interactive follower ring viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`FollowEngine`] and
//! implements [`eframe::App`]. The mouse drives the leader; the side panel
//! edits the packing parameters; the central panel draws the rings and
//! followers straight from the engine's ring data.

use eframe::App;
use follow_core::{
    Distribution, FollowEngine, FollowError, Layout, PackingMode, PackingParameters, geometry::polar_to_cartesian,
};
use glam::Vec2;
use rand::{Rng, rng};

/// Followers spawned by [`Viewer::reset`].
const START_FOLLOWERS: usize = 12;
/// Random follower radii are drawn from this range.
const SIZE_RANGE: std::ops::RangeInclusive<f32> = 6.0..=30.0;
const LEADER_SIZE: f32 = 5.0;

/// Main application state for the interactive viewer.
///
/// ### Fields
/// - `engine` - The follower engine being visualised.
/// - `rng` - Random number generator used for follower sizes.
/// - `running` - Whether the leader follows the mouse.
/// - `show_rings` - Whether ring bands are drawn.
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
/// - `target` - Last world position the leader was sent to.
/// - `heading` - Leader heading derived from its motion, in radians.
pub struct Viewer {
    engine: FollowEngine,

    rng: rand::rngs::ThreadRng,

    running: bool,
    show_rings: bool,
    zoom: f32,
    pan: egui::Vec2,

    target: Vec2,
    heading: f32,
}

impl Viewer {
    /// Creates a viewer with default parameters and a handful of
    /// randomly sized followers around a leader at the origin.
    pub fn new() -> Result<Self, FollowError> {
        let engine = FollowEngine::new(Vec2::ZERO, LEADER_SIZE, PackingParameters::default())?;
        let mut viewer = Self {
            engine,
            rng: rng(),
            running: true,
            show_rings: true,
            zoom: 1.0,
            pan: egui::vec2(0.0, 0.0),
            target: Vec2::ZERO,
            heading: 0.0,
        };
        viewer.reset();
        Ok(viewer)
    }

    /// Replaces all followers with a fresh random set, keeping parameters.
    fn reset(&mut self) {
        self.clear();
        for _ in 0..START_FOLLOWERS {
            self.add_random_follower();
        }
        self.step_once();
    }

    /// Removes every follower.
    fn clear(&mut self) {
        while self.engine.pop_follower(0).is_some() {}
        self.step_once();
    }

    fn add_random_follower(&mut self) {
        let size = self.rng.random_range(SIZE_RANGE);
        if let Err(e) = self.engine.add_follower(size) {
            tracing::warn!(%e, "could not add follower");
        }
    }

    fn remove_random_follower(&mut self) {
        let count = self.engine.followers().len();
        if count > 0 {
            let index = self.rng.random_range(0..count);
            self.engine.pop_follower(index);
        }
    }

    fn randomize_sizes(&mut self) {
        let ids: Vec<_> = self.engine.followers().iter().map(|f| f.id).collect();
        for id in ids {
            let size = self.rng.random_range(SIZE_RANGE);
            if let Err(e) = self.engine.resize_follower(id, size) {
                tracing::warn!(%e, "could not resize follower");
            }
        }
    }

    /// Moves the leader to `target` and turns it towards its motion.
    fn step_towards(&mut self, target: Vec2) {
        let delta = target - self.engine.leader().pos;
        if delta.length_squared() > 0.25 {
            self.heading = delta.to_angle();
        }
        self.target = target;
        self.step_once();
    }

    /// Advances the engine by one frame at the current target.
    fn step_once(&mut self) {
        self.engine.update_with_rotation(self.target, self.heading);
    }

    /// Converts a world-space position to screen-space.
    ///
    /// The y-axis is flipped so that positive y goes up in world space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    ///
    /// Returns `true` if the user edited the value this frame.
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Builds the top panel UI (follower controls, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Add").clicked() {
                    self.add_random_follower();
                }
                if ui.button("Remove").clicked() {
                    self.remove_random_follower();
                }
                if ui.button("Resize all").clicked() {
                    self.randomize_sizes();
                }
                if ui.button("Reset").clicked() {
                    self.reset();
                }
                if ui.button("Clear").clicked() {
                    self.clear();
                }

                ui.separator();
                ui.checkbox(&mut self.show_rings, "Rings");
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=10.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (followers, rings, pack state).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("state = {:?}", self.engine.state()));
                ui.separator();
                ui.label(format!("rings = {}", self.engine.ring_count()));
                ui.label(format!("followers = {}", self.engine.followers().len()));
            });
        });
    }

    /// Builds the right-hand panel for packing parameters.
    ///
    /// Edits go through [`FollowEngine::params_mut`]; the engine's cache
    /// notices them on the next frame.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Packing");

                let params = self.engine.params_mut();

                ui.separator();
                ui.label("Layout");
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut params.layout, Layout::Orbit, "Orbit");
                    ui.selectable_value(&mut params.layout, Layout::Arc, "Arc");
                });
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut params.distribution, Distribution::Uniform, "Uniform");
                    ui.selectable_value(
                        &mut params.distribution,
                        Distribution::Proportional,
                        "Proportional",
                    );
                });
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut params.packing, PackingMode::Exact, "Exact");
                    ui.selectable_value(&mut params.packing, PackingMode::Approximate, "Approx");
                });

                ui.separator();
                ui.label("Distances");
                Self::labeled_drag_f32(
                    ui,
                    "spacing:",
                    &mut params.follower_spacing,
                    0.0..=100.0,
                    0.5,
                );
                Self::labeled_drag_f32(ui, "ring gap:", &mut params.ring_gap, 1.0..=100.0, 0.5);

                ui.separator();
                ui.label("Arc");
                // Degree views; written back only on edit so the radians
                // value does not drift through the conversion every frame.
                let mut half_angle = params.arc_half_angle_deg();
                if Self::labeled_drag_f32(ui, "half angle°:", &mut half_angle, 1.0..=180.0, 1.0) {
                    *params = params.with_arc_half_angle_deg(half_angle);
                }
                let mut arc_rotation = params.arc_rotation.to_degrees();
                if Self::labeled_drag_f32(ui, "rotation°:", &mut arc_rotation, -180.0..=180.0, 1.0) {
                    params.arc_rotation = arc_rotation.to_radians();
                }
                ui.checkbox(&mut params.strong, "strong");

                ui.separator();
                ui.label("Orbit");
                Self::labeled_drag_f32(
                    ui,
                    "speed:",
                    &mut params.rotation_speed,
                    -1440.0..=1440.0,
                    1.0,
                );

                ui.separator();
                if ui.button("Reset params to default").clicked() {
                    *params = PackingParameters::default();
                }
            });
    }

    /// Builds the central panel where the leader, rings and followers are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if response.dragged() {
                self.pan += response.drag_delta();
            }

            if self.running {
                let target = response
                    .hover_pos()
                    .map(|p| self.screen_to_world(p, rect))
                    .unwrap_or(self.target);
                self.step_towards(target);
                ctx.request_repaint();
            }

            let leader = self.engine.leader().pos;

            if self.show_rings {
                let band = egui::Stroke::new(1.0, egui::Color32::from_gray(70));
                for ring in self.engine.rings() {
                    let center = self.world_to_screen(leader, rect);
                    painter.circle_stroke(center, ring.radius * self.zoom, band);
                    // Mark where each ring starts so the spin is visible.
                    let tick = leader + polar_to_cartesian(ring.radius, ring.rotation);
                    painter.circle_filled(self.world_to_screen(tick, rect), 2.0, egui::Color32::GRAY);
                }
            }

            let count = self.engine.followers().len().max(1);
            for (i, f) in self.engine.followers().iter().enumerate() {
                let p = self.world_to_screen(f.pos, rect);
                let shade = (255 * i / count) as u8;
                let color = egui::Color32::from_rgb(0, shade, 255);
                painter.circle_filled(p, (f.size * self.zoom).max(1.0), color);
            }

            let p = self.world_to_screen(leader, rect);
            painter.circle_filled(
                p,
                (self.engine.leader().size * self.zoom).max(2.0),
                egui::Color32::RED,
            );
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
