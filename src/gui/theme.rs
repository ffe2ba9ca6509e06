use egui::{Color32, Style, Visuals};

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();
    style.visuals = Visuals::dark();

    // Custom colors
    style.visuals.window_fill = Color32::from_rgb(30, 30, 30);
    style.visuals.extreme_bg_color = Color32::from_rgb(20, 20, 20);
    style.visuals.code_bg_color = Color32::from_rgb(25, 25, 25);
    style.visuals.selection.bg_fill = ACTIVE_BUTTON;

    ctx.set_style(style);
}

pub const BACKGROUND: Color32 = Color32::from_rgb(30, 30, 30);
pub const TEXT_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
// egui ships no bold face, so bold text is drawn brighter
pub const STRONG_TEXT_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const HEADING_COLOR: Color32 = Color32::from_rgb(97, 175, 239);
pub const LINK_COLOR: Color32 = Color32::from_rgb(86, 182, 194);
pub const CODE_COLOR: Color32 = Color32::from_rgb(229, 192, 123);
pub const CODE_BG: Color32 = Color32::from_rgb(25, 25, 25);
pub const IMAGE_COLOR: Color32 = Color32::from_rgb(198, 120, 221);
pub const MUTED_COLOR: Color32 = Color32::from_rgb(100, 100, 100);
pub const CURSOR_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const SELECTION_COLOR: Color32 = Color32::from_rgba_premultiplied(80, 120, 204, 80);
pub const ACTIVE_BUTTON: Color32 = Color32::from_rgb(60, 90, 150);

pub const BODY_SIZE: f32 = 16.0;

/// Font size for a heading level
pub fn heading_size(level: u8) -> f32 {
    match level {
        1 => 28.0,
        2 => 23.0,
        3 => 19.0,
        _ => 17.0,
    }
}
