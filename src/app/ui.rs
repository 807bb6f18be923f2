use super::FrameExtractorApp;
use crate::upload::BackendHealth;
use crate::utils::file_size::FileSizeUtils;
use crate::utils::video_types::SUPPORTED_FORMAT_NAMES;
use eframe::egui::{self, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
const FAILURE: Color32 = Color32::from_rgb(220, 50, 50);
const MUTED: Color32 = Color32::from_rgb(150, 150, 150);

impl FrameExtractorApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("🎬 MP4 to PNG Frame Extractor");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Upload a video and extract all frames as PNG images")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_file_picker(ui);

                if let Some(file) = &self.state.selected_file {
                    if self.state.result.is_none() {
                        ui.add_space(10.0);
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new("Selected:").strong());
                                ui.label(&file.name);
                            });
                            ui.horizontal(|ui| {
                                ui.label(RichText::new("Size:").strong());
                                ui.label(FileSizeUtils::format_megabytes(file.size_bytes));
                            });
                        });
                    }
                }

                ui.add_space(20.0);
                if self.state.result.is_none() {
                    self.render_extract_controls(ui);
                }

                if self.state.upload.is_uploading {
                    ui.add_space(10.0);
                    let progress = self.state.upload.progress_percent as f32 / 100.0;
                    ui.add(
                        egui::ProgressBar::new(progress)
                            .show_percentage()
                            .animate(true)
                            .fill(ACCENT),
                    );
                }

                if let Some(error) = &self.state.error_message {
                    ui.add_space(10.0);
                    ui.vertical_centered(|ui| {
                        ui.colored_label(FAILURE, format!("❌ {}", error));
                    });
                }

                if self.state.result.is_some() {
                    self.render_success(ui);
                }

                ui.add_space(20.0);
                ui.separator();
                self.render_info(ui);
            });
        });
    }

    fn render_file_picker(&mut self, ui: &mut egui::Ui) {
        let label = match &self.state.selected_file {
            Some(file) => format!("📁 {}", file.name),
            None => "📂 Choose Video File".to_string(),
        };

        ui.group(|ui| {
            ui.horizontal(|ui| {
                let enabled = !self.state.upload.is_uploading;
                if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                    self.pick_file();
                }
            });
        });
    }

    fn render_extract_controls(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let uploading = self.state.upload.is_uploading;
            let can_extract = self.state.selected_file.is_some() && !uploading;
            let text = if uploading {
                "⏳ Extracting..."
            } else {
                "🚀 Extract Frames"
            };

            ui.add_enabled_ui(can_extract, |ui| {
                let button = egui::Button::new(text).min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    self.start_upload(ui.ctx());
                }
            });

            if uploading {
                ui.add_space(5.0);
                if ui.button("✖ Cancel").clicked() {
                    self.cancel_upload();
                }
            }
        });
    }

    fn render_success(&mut self, ui: &mut egui::Ui) {
        let Some(result) = &self.state.result else {
            return;
        };
        let frame_count = result.frame_count;
        let message = result.message.clone();

        ui.add_space(10.0);
        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("✅ Extraction Complete!")
                        .heading()
                        .color(SUCCESS),
                );
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Frames extracted:").strong());
                    ui.label(frame_count.to_string());
                });
                if !message.is_empty() {
                    ui.label(message);
                }
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("⬇ Download ZIP").clicked() {
                        self.download();
                    }
                    if ui.button("🔄 Extract Another Video").clicked() {
                        self.reset();
                    }
                });
            });
        });
    }

    fn render_info(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("📋 Supported Formats").strong());
        for format in SUPPORTED_FORMAT_NAMES {
            ui.label(format!("• {}", format));
        }
        ui.add_space(5.0);
        ui.label(RichText::new("Note: Maximum file size is 500MB").color(MUTED));

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            match &self.state.backend_health {
                BackendHealth::Unknown => ui.colored_label(MUTED, "● Backend status unknown"),
                BackendHealth::Checking => ui.colored_label(MUTED, "● Checking backend..."),
                BackendHealth::Online => ui.colored_label(SUCCESS, "● Backend online"),
                BackendHealth::Offline(reason) => ui
                    .colored_label(FAILURE, "● Backend offline")
                    .on_hover_text(reason.as_str()),
            };
            let checking = matches!(self.state.backend_health, BackendHealth::Checking);
            if ui
                .add_enabled(!checking, egui::Button::new("Recheck").small())
                .clicked()
            {
                self.check_health(ui.ctx());
            }
        });
    }
}
