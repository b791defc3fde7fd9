//! Login gate rendering.

use crate::app::style::COLOR_DANGER;
use crate::app::FolioApp;
use eframe::egui::{self, Align2, Key, RichText, TextEdit};

impl FolioApp {
    pub(in crate::app) fn render_login(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |_ui| {});

        egui::Window::new("Sign in")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_width(300.0);
                ui.label("Email");
                ui.add(
                    TextEdit::singleline(&mut self.login_email)
                        .hint_text("admin@example.com")
                        .desired_width(f32::INFINITY),
                );
                ui.label("Password");
                let password_response = ui.add(
                    TextEdit::singleline(&mut self.login_password)
                        .password(true)
                        .desired_width(f32::INFINITY),
                );

                if let Some(error) = &self.login_error {
                    ui.add_space(4.0);
                    ui.label(RichText::new(error).color(COLOR_DANGER));
                }

                ui.add_space(8.0);
                let submit_clicked = ui
                    .add_enabled(
                        !self.signing_in,
                        egui::Button::new(if self.signing_in {
                            "Signing in..."
                        } else {
                            "Sign in"
                        }),
                    )
                    .clicked();
                let enter_pressed = password_response.lost_focus()
                    && ui.input(|input| input.key_pressed(Key::Enter));
                if submit_clicked || enter_pressed {
                    self.submit_login();
                }
            });
    }
}
