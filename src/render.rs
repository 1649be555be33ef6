//! Drawing helpers shared by every screen
//!
//! The simulation works in `f32` world rectangles; SDL2 wants integer
//! rectangles and `Color`s. Everything that crosses that line goes through
//! here, including the solid-colour fallback used when a texture is missing.

use crate::collision::Rect;
use crate::math::Vec2;
use sdl2::pixels::Color;
use sdl2::render::{BlendMode, Canvas, Texture};
use sdl2::video::Window;

/// Converts a float rectangle to an SDL2 one, rounding the position.
///
/// Width and height are at least 1 pixel; SDL2 rejects empty rectangles.
pub fn to_sdl_rect(rect: &Rect) -> sdl2::rect::Rect {
    sdl2::rect::Rect::new(
        rect.x.round() as i32,
        rect.y.round() as i32,
        rect.w.round().max(1.0) as u32,
        rect.h.round().max(1.0) as u32,
    )
}

pub fn to_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::RGB(r, g, b)
}

/// Scales a colour's channels by `factor` (clamped to `[0, 1]`)
pub fn dim(color: Color, factor: f32) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * factor) as u8;
    Color::RGBA(scale(color.r), scale(color.g), scale(color.b), color.a)
}

pub fn fill_rect(canvas: &mut Canvas<Window>, rect: &Rect, color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    canvas.fill_rect(to_sdl_rect(rect))
}

/// Fills `rect` with a translucent colour
pub fn fill_rect_alpha(canvas: &mut Canvas<Window>, rect: &Rect, color: Color, alpha: u8) -> Result<(), String> {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(color.r, color.g, color.b, alpha));
    let result = canvas.fill_rect(to_sdl_rect(rect));
    canvas.set_blend_mode(BlendMode::None);
    result
}

/// Darkens (or tints) the whole screen
pub fn fill_overlay(canvas: &mut Canvas<Window>, color: Color, alpha: u8) -> Result<(), String> {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(color.r, color.g, color.b, alpha));
    let result = canvas.fill_rect(None);
    canvas.set_blend_mode(BlendMode::None);
    result
}

/// Draws `texture` stretched over `dest`, or fills `dest` with `fallback`
/// when the texture failed to load
pub fn draw_texture_or_fill(
    canvas: &mut Canvas<Window>,
    texture: Option<&Texture>,
    dest: &Rect,
    flip_horizontal: bool,
    fallback: Color,
) -> Result<(), String> {
    match texture {
        Some(texture) => canvas.copy_ex(texture, None, to_sdl_rect(dest), 0.0, None, flip_horizontal, false),
        None => fill_rect(canvas, dest, fallback),
    }
}

/// Draws a line `width` pixels thick from `start` to `end`.
///
/// SDL2 lines are one pixel wide, so thicker lines are stacked copies
/// offset along the perpendicular.
pub fn draw_thick_line(
    canvas: &mut Canvas<Window>,
    start: Vec2,
    end: Vec2,
    width: u32,
    color: Color,
) -> Result<(), String> {
    canvas.set_draw_color(color);
    let normal = (end - start).normalize_or(Vec2::new(1.0, 0.0));
    let perpendicular = Vec2::new(-normal.y, normal.x);
    let half = (width.max(1) as f32 - 1.0) / 2.0;

    for i in 0..width.max(1) {
        let offset = perpendicular * (i as f32 - half);
        let a = start + offset;
        let b = end + offset;
        canvas.draw_line(
            (a.x.round() as i32, a.y.round() as i32),
            (b.x.round() as i32, b.y.round() as i32),
        )?;
    }
    Ok(())
}
