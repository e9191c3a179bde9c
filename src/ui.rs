// ui.rs - egui overlay windows: stats, tweak panel, scene selector
use crate::math::Rgb;
use crate::scenes::ScenePreset;
use crate::tunables::{Tunables, TunableValue};

/// Per-frame numbers shown in the stats window
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub fps: f32,
    pub time: f32,
    pub resolution: (u32, u32),
    pub objects: usize,
    pub triangles: usize,
    pub camera_eye: [f32; 3],
    pub camera_yaw: f32,
    pub camera_pitch: f32,
    pub hovered: Vec<String>,
}

impl FrameStats {
    pub fn frame_time_ms(&self) -> f32 {
        if self.fps > 0.0 {
            1000.0 / self.fps
        } else {
            0.0
        }
    }
}

fn section(ui: &mut egui::Ui, title: &str, color: egui::Color32) {
    ui.add_space(5.0);
    ui.separator();
    ui.add_space(5.0);
    ui.label(egui::RichText::new(title).size(16.0).color(color));
}

pub fn stats_window(ctx: &egui::Context, stats: &FrameStats, preset: ScenePreset) {
    egui::Window::new("Stats")
        .title_bar(true)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading(
                egui::RichText::new(format!("{:.0} FPS", stats.fps))
                    .size(32.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.label(
                egui::RichText::new(format!("{:.2} ms", stats.frame_time_ms()))
                    .size(14.0)
                    .color(egui::Color32::GRAY),
            );

            section(ui, "Camera", egui::Color32::from_rgb(100, 200, 100));
            let [x, y, z] = stats.camera_eye;
            ui.monospace(format!("Eye: ({:.2}, {:.2}, {:.2})", x, y, z));
            ui.monospace(format!(
                "Yaw: {:.1}° Pitch: {:.1}°",
                stats.camera_yaw.to_degrees(),
                stats.camera_pitch.to_degrees()
            ));

            section(ui, "Scene", egui::Color32::from_rgb(200, 150, 100));
            ui.monospace(format!("Name: {}", preset));
            ui.monospace(format!("Objects: {}", stats.objects));
            ui.monospace(format!("Triangles: {}", stats.triangles));
            if stats.hovered.is_empty() {
                ui.monospace("Hover: -");
            } else {
                ui.monospace(format!("Hover: {}", stats.hovered.join(", ")));
            }

            section(ui, "Rendering", egui::Color32::from_rgb(200, 100, 200));
            ui.monospace(format!("Resolution: {}x{}", stats.resolution.0, stats.resolution.1));
            ui.monospace(format!("Time: {:.2}s", stats.time));
        });
}

/// Slider per number, color button per color, in registration order.
/// Returns true when any value changed.
pub fn tweak_panel(ctx: &egui::Context, tunables: &mut Tunables, screen_width: f32) -> bool {
    let mut changed = false;

    egui::Window::new("Controls")
        .title_bar(true)
        .resizable(false)
        .default_pos(egui::pos2(screen_width - 260.0, 10.0))
        .default_width(240.0)
        .show(ctx, |ui| {
            if tunables.is_empty() {
                ui.label("Nothing to tweak");
                return;
            }

            egui::Grid::new("tunables").num_columns(2).striped(true).show(ui, |ui| {
                for (key, value) in tunables.iter_mut() {
                    ui.label(key);
                    match value {
                        TunableValue::Number(control) => {
                            let slider = egui::Slider::new(&mut control.value, control.min..=control.max)
                                .step_by(control.step as f64);
                            if ui.add(slider).changed() {
                                control.value = control.constrain(control.value);
                                changed = true;
                            }
                        }
                        TunableValue::Color(color) => {
                            let mut rgb = color.to_array();
                            if ui.color_edit_button_rgb(&mut rgb).changed() {
                                *color = Rgb::new(rgb[0], rgb[1], rgb[2]);
                                changed = true;
                            }
                            ui.monospace(color.to_string());
                        }
                    }
                    ui.end_row();
                }
            });
        });

    if changed {
        log::debug!("Tunables edited from the panel");
    }
    changed
}

/// Buttons for every preset. Returns the one picked this frame.
pub fn scene_selector(ctx: &egui::Context, current: ScenePreset) -> Option<ScenePreset> {
    let mut requested = None;

    egui::Window::new("Scene Selector")
        .title_bar(true)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 330.0))
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                for preset in ScenePreset::ALL {
                    if ui.selectable_label(preset == current, preset.label()).clicked() && preset != current {
                        requested = Some(preset);
                    }
                }
            });
        });

    requested
}
