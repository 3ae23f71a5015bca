use crate::app::{AppState, Phase};
use crate::history::HistoryStore;
use crate::settings::Settings;
use crate::uploader::Upload;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use rfd::FileDialog;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0xe6, 0xf7, 0xff);
const TITLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x33, 0x33, 0x33);

/// Put `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let mut cb = arboard::Clipboard::new()?;
    cb.set_text(text.to_string())?;
    Ok(())
}

/// Whether `url` is an absolute web address that can be handed to a browser.
pub fn is_openable(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub struct UploaderApp {
    pub state: AppState,
    uploader: Box<dyn Upload>,
    note: String,
    toasts: Toasts,
    toast_duration: f32,
    // The uploading frame has been painted; the blocking call may run.
    upload_painted: bool,
}

impl UploaderApp {
    pub fn new(settings: Settings, uploader: Box<dyn Upload>) -> Self {
        Self {
            state: AppState::new(HistoryStore::new(settings.history_file)),
            uploader,
            note: String::new(),
            toasts: Toasts::new()
                .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
                .direction(egui::Direction::BottomUp),
            toast_duration: settings.toast_duration,
            upload_painted: false,
        }
    }

    fn toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        let text: String = text.into();
        self.toasts.add(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default().duration_in_seconds(self.toast_duration as f64),
        });
    }

    /// Serve the picker and upload requests raised by the state machine.
    fn drive(&mut self, ctx: &egui::Context) {
        match &self.state.phase {
            Phase::FilePicking => {
                let picked = FileDialog::new().pick_file();
                self.state.file_picked(picked);
                ctx.request_repaint();
            }
            Phase::Uploading(_) => {
                if self.upload_painted {
                    self.upload_painted = false;
                    self.state.perform_upload(self.uploader.as_ref());
                    if matches!(self.state.phase, Phase::NotePrompt { .. }) {
                        self.note.clear();
                    }
                } else {
                    self.upload_painted = true;
                }
                ctx.request_repaint();
            }
            _ => {}
        }
    }

    fn main_panel(&mut self, ctx: &egui::Context) {
        let idle = self.state.is_idle();
        let frame = egui::Frame::central_panel(&ctx.style())
            .fill(BACKGROUND)
            .inner_margin(15.0);
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Catbox File Uploader")
                        .size(26.0)
                        .strong()
                        .color(TITLE_COLOR),
                );
            });
            ui.add_space(10.0);

            let wide = egui::vec2(ui.available_width(), 36.0);
            if ui
                .add_enabled(idle, egui::Button::new("Upload File").min_size(wide))
                .clicked()
            {
                self.state.request_upload();
            }
            if matches!(self.state.phase, Phase::Uploading(_)) {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Uploading…");
                });
            }

            ui.add_space(10.0);
            ui.label(egui::RichText::new(self.state.result_label()).size(16.0));
            let mut copy = false;
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.url_field)
                        .desired_width(ui.available_width() - 60.0)
                        .font(egui::TextStyle::Body),
                );
                copy = ui
                    .add_enabled(!self.state.url_field.is_empty(), egui::Button::new("Copy"))
                    .clicked();
            });
            if copy {
                match copy_to_clipboard(&self.state.url_field) {
                    Ok(()) => self.toast(ToastKind::Info, "URL copied"),
                    Err(e) => {
                        tracing::error!("clipboard error: {e}");
                        self.toast(ToastKind::Error, format!("Failed to copy: {e}"));
                    }
                }
            }

            ui.add_space(10.0);
            if ui
                .add_enabled(idle, egui::Button::new("View History").min_size(wide))
                .clicked()
            {
                self.state.view_history();
            }
            ui.add_space(10.0);
            if ui.add(egui::Button::new("Quit").min_size(wide)).clicked() {
                self.state.quit();
            }
        });
    }

    fn note_dialog(&mut self, ctx: &egui::Context) {
        if !matches!(self.state.phase, Phase::NotePrompt { .. }) {
            return;
        }
        let mut answer: Option<Option<String>> = None;
        let mut open = true;
        egui::Window::new("Add Note")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Add a note for this upload:");
                let resp = ui.text_edit_singleline(&mut self.note);
                resp.request_focus();
                let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || enter {
                        answer = Some(Some(self.note.clone()));
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(None);
                    }
                });
            });
        if !open && answer.is_none() {
            answer = Some(None);
        }
        if let Some(note) = answer {
            if self.state.submit_note(note) {
                self.toast(ToastKind::Success, "Saved to history");
            }
            self.note.clear();
        }
    }

    fn error_dialog(&mut self, ctx: &egui::Context) {
        let Phase::Error { title, message } = &self.state.phase else {
            return;
        };
        let mut dismiss = false;
        let mut open = true;
        egui::Window::new(title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.colored_label(egui::Color32::RED, message.as_str());
                if ui.button("OK").clicked() {
                    dismiss = true;
                }
            });
        if dismiss || !open {
            self.state.dismiss_error();
        }
    }

    fn history_window(&mut self, ctx: &egui::Context) {
        let Some(view) = &self.state.history_view else {
            return;
        };
        let mut open = true;
        let mut failed: Option<String> = None;
        egui::Window::new("Upload History")
            .default_size((600.0, 400.0))
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("Upload History")
                            .size(18.0)
                            .strong()
                            .color(TITLE_COLOR),
                    );
                });
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut view.text.as_str())
                            .desired_width(f32::INFINITY),
                    );
                    ui.collapsing("Links", |ui| {
                        for record in view.records.iter().filter(|r| is_openable(&r.url)) {
                            ui.horizontal(|ui| {
                                if ui.button("Open").clicked() {
                                    if let Err(e) = open::that(&record.url) {
                                        tracing::error!("failed to open {}: {e}", record.url);
                                        failed = Some(format!("Failed to open {}: {e}", record.url));
                                    }
                                }
                                ui.label(&record.url);
                            });
                        }
                    });
                });
            });
        if let Some(msg) = failed {
            self.toast(ToastKind::Error, msg);
        }
        if !open {
            self.state.close_history();
        }
    }
}

impl eframe::App for UploaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive(ctx);

        self.main_panel(ctx);
        self.history_window(ctx);
        self.note_dialog(ctx);
        self.error_dialog(ctx);
        self.toasts.show(ctx);

        if self.state.quit_requested() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
