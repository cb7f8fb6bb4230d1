//! Label drawing shared by the name, border and world passes.

use starmap_engine::coords::{Rect, Vec2};
use starmap_engine::paint::Color;
use starmap_engine::surface::{Saved, Surface};
use starmap_engine::text::{FontSpec, TextAnchor};

use crate::style::{LabelStyle, Stylesheet, TextBackgroundStyle};
use crate::transform::{PARSEC_SCALE_X, PARSEC_SCALE_Y};

/// Style values every label needs besides its own font and color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelEnv {
    pub background: Color,
    pub scale: f32,
    pub hex_content_scale: f32,
    pub fill_micro_borders: bool,
}

impl LabelEnv {
    pub fn new(style: &Stylesheet) -> Self {
        Self {
            background: style.background_color,
            scale: style.scale,
            hex_content_scale: style.hex_content_scale,
            fill_micro_borders: style.fill_micro_borders,
        }
    }

    /// One device pixel inside a world glyph frame.
    pub fn pixel_step(&self) -> Vec2 {
        let k = self.hex_content_scale * self.scale;
        if k <= 0.0 || !k.is_finite() {
            return Vec2::zero();
        }
        Vec2::new(PARSEC_SCALE_X / k, PARSEC_SCALE_Y / k)
    }
}

/// Box of `text` split on newlines, and the line height.
fn measure_lines(surface: &dyn Surface, text: &str, font: &FontSpec) -> (Vec2, f32) {
    let mut size = Vec2::zero();
    let mut line_height: f32 = 0.0;
    let mut lines = 0;
    for line in text.split('\n') {
        let m = surface.measure_text(line, font);
        size.x = size.x.max(m.x);
        line_height = line_height.max(m.y);
        lines += 1;
    }
    size.y = line_height * lines as f32;
    (size, line_height)
}

/// Draws possibly multi-line `text` with its box anchored at `at`; each line is
/// centered within the box.
pub fn draw_text_block(
    surface: &mut dyn Surface,
    text: &str,
    font: &FontSpec,
    at: Vec2,
    anchor: TextAnchor,
    color: Color,
) {
    if !text.contains('\n') {
        surface.draw_text(text, font, at, anchor, color);
        return;
    }
    let (size, line_height) = measure_lines(surface, text, font);
    let top_left = at + anchor.offset(size);
    for (i, line) in text.split('\n').enumerate() {
        let center = Vec2::new(
            top_left.x + size.x * 0.5,
            top_left.y + line_height * (i as f32 + 0.5),
        );
        surface.draw_text(line, font, center, TextAnchor::Center, color);
    }
}

/// Draws `text` centered on `at` over the requested background treatment.
pub fn draw_label(
    surface: &mut dyn Surface,
    text: &str,
    font: &FontSpec,
    at: Vec2,
    color: Color,
    background: TextBackgroundStyle,
    env: &LabelEnv,
) {
    if text.is_empty() {
        return;
    }
    let mut text_color = color;
    match background {
        TextBackgroundStyle::None => {}
        TextBackgroundStyle::Filled => {
            let (size, _) = measure_lines(surface, text, font);
            surface.fill_rect(Rect::from_center(at, size.x, size.y), color);
            text_color = env.background;
        }
        TextBackgroundStyle::Rectangle => {
            if !env.fill_micro_borders {
                let (size, _) = measure_lines(surface, text, font);
                surface.fill_rect(Rect::from_center(at, size.x, size.y), env.background);
            }
        }
        TextBackgroundStyle::Outline | TextBackgroundStyle::Shadow => {
            let step = env.pixel_step();
            let range = if background == TextBackgroundStyle::Outline { -2..=2 } else { 0..=2 };
            for dx in range.clone() {
                for dy in range.clone() {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let p = Vec2::new(at.x + dx as f32 * step.x, at.y + dy as f32 * step.y);
                    draw_text_block(surface, text, font, p, TextAnchor::Center, env.background);
                }
            }
        }
    }
    draw_text_block(surface, text, font, at, TextAnchor::Center, text_color);
}

/// Applies `style` to `text` and draws it as a [`draw_label`] at world point
/// `at`.
///
/// The frame is undistorted on screen: parsec scaling is undone before the
/// label's own translation, rotation and scale.
pub fn draw_styled_label(
    surface: &mut dyn Surface,
    text: &str,
    font: &FontSpec,
    at: Vec2,
    color: Color,
    style: &LabelStyle,
    background: TextBackgroundStyle,
    env: &LabelEnv,
) {
    let mut text = if style.uppercase { text.to_uppercase() } else { text.to_owned() };
    if style.wrap {
        text = text.replace(' ', "\n");
    }

    let mut g = Saved::new(surface);
    g.translate(at.x, at.y);
    g.scale(1.0 / PARSEC_SCALE_X, 1.0 / PARSEC_SCALE_Y);
    g.translate(style.translation.x, style.translation.y);
    g.rotate(style.rotation);
    g.scale(style.scale.x, style.scale.y);
    draw_label(&mut *g, &text, font, Vec2::zero(), color, background, env);
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_engine::scene::{DrawCmd, DrawList};

    fn env() -> LabelEnv {
        LabelEnv { background: Color::BLACK, scale: 64.0, hex_content_scale: 0.5, fill_micro_borders: false }
    }

    fn texts(list: &DrawList) -> Vec<(String, Color)> {
        list.items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text { text, color, .. } => Some((text.clone(), *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn plain_label_is_one_text_call() {
        let mut list = DrawList::new();
        let font = FontSpec::new("Sans", 0.2);
        draw_label(&mut list, "Regina", &font, Vec2::zero(), Color::WHITE, TextBackgroundStyle::None, &env());
        assert_eq!(texts(&list), vec![("Regina".to_owned(), Color::WHITE)]);
    }

    #[test]
    fn filled_label_swaps_colors() {
        let mut list = DrawList::new();
        let font = FontSpec::new("Sans", 0.2);
        draw_label(&mut list, "A", &font, Vec2::zero(), Color::WHITE, TextBackgroundStyle::Filled, &env());
        let DrawCmd::Fill { color, .. } = &list.items()[0].cmd else { panic!("expected fill") };
        assert_eq!(*color, Color::WHITE);
        assert_eq!(texts(&list), vec![("A".to_owned(), Color::BLACK)]);
    }

    #[test]
    fn rectangle_background_skipped_with_filled_borders() {
        let font = FontSpec::new("Sans", 0.2);
        let mut list = DrawList::new();
        draw_label(&mut list, "A", &font, Vec2::zero(), Color::WHITE, TextBackgroundStyle::Rectangle, &env());
        assert_eq!(list.paint_items().count(), 2);

        let mut list = DrawList::new();
        let filled = LabelEnv { fill_micro_borders: true, ..env() };
        draw_label(&mut list, "A", &font, Vec2::zero(), Color::WHITE, TextBackgroundStyle::Rectangle, &filled);
        assert_eq!(list.paint_items().count(), 1);
    }

    #[test]
    fn outline_and_shadow_ring_sizes() {
        let font = FontSpec::new("Sans", 0.2);
        let mut list = DrawList::new();
        draw_label(&mut list, "A", &font, Vec2::zero(), Color::WHITE, TextBackgroundStyle::Outline, &env());
        assert_eq!(texts(&list).len(), 24 + 1);

        let mut list = DrawList::new();
        draw_label(&mut list, "A", &font, Vec2::zero(), Color::WHITE, TextBackgroundStyle::Shadow, &env());
        assert_eq!(texts(&list).len(), 8 + 1);
        assert_eq!(texts(&list).last().map(|t| t.1), Some(Color::WHITE));
    }

    #[test]
    fn multi_line_text_is_centered_per_line() {
        let mut list = DrawList::new();
        let font = FontSpec::new("Sans", 1.0);
        draw_text_block(&mut list, "AB\nABCD", &font, Vec2::zero(), TextAnchor::Center, Color::WHITE);
        let origins: Vec<Vec2> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text { origin, size, .. } => Some(*origin + *size * 0.5),
                _ => None,
            })
            .collect();
        assert_eq!(origins.len(), 2);
        assert!(origins[0].x.abs() < 1e-5 && origins[1].x.abs() < 1e-5);
        assert!((origins[0].y + 0.5).abs() < 1e-5 && (origins[1].y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn styled_label_wraps_and_restores() {
        let mut list = DrawList::new();
        let font = FontSpec::new("Sans", 1.0);
        let style = LabelStyle { uppercase: true, wrap: true, rotation: -30.0, ..LabelStyle::default() };
        draw_styled_label(
            &mut list,
            "spinward marches",
            &font,
            Vec2::new(5.0, 5.0),
            Color::WHITE,
            &style,
            TextBackgroundStyle::None,
            &env(),
        );
        let t: Vec<String> = texts(&list).into_iter().map(|t| t.0).collect();
        assert_eq!(t, vec!["SPINWARD", "MARCHES"]);
        assert_eq!(list.depth(), 0);
    }
}
