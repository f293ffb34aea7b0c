use super::model::{DrawerState, RowLayout};
use super::{
    BUBBLE_FONT_FACTOR, INDICATOR_INSET, INDICATOR_SPAN, RING_WIDTH, ROW_FILL, ROW_FONT_SIZE,
    ROW_WIDTH_FACTOR,
};
use crate::config::DrawerStyle;
use crate::gui::theme::{ThemeColors, faded};
use cairo::Context;
use crown::cloud::BubbleSprite;
use crown::geom::Point;
use palette::Srgba;
use std::f64::consts::{PI, TAU};

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn centered_text(cr: &Context, text: &str, at: Point, size: f64) -> Result<(), cairo::Error> {
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    let ext = cr.text_extents(text)?;
    cr.move_to(
        at.x - ext.width() / 2.0 - ext.x_bearing(),
        at.y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

fn rounded_rect(cr: &Context, center: Point, width: f64, height: f64) {
    let r = height / 2.0;
    let (left, right) = (center.x - width / 2.0 + r, center.x + width / 2.0 - r);
    cr.new_sub_path();
    cr.arc(right, center.y, r, -PI / 2.0, PI / 2.0);
    cr.arc(left, center.y, r, PI / 2.0, 3.0 * PI / 2.0);
    cr.close_path();
}

struct RowRenderer<'a> {
    row: &'a RowLayout<'a>,
    extent: f64,
    width: f64,
}

impl RowRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let RowLayout {
            center,
            scale,
            alpha,
            entry,
            ..
        } = self.row;
        let height = self.extent * ROW_FILL * scale;

        set_color(cr, faded(colors.row, *alpha));
        rounded_rect(cr, *center, self.width * scale, height);
        cr.fill()?;

        set_color(cr, faded(colors.text, *alpha));
        centered_text(cr, entry.name.as_str(), *center, ROW_FONT_SIZE * scale)
    }
}

fn draw_face(cr: &Context, state: &DrawerState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let size = state.size();
    let c = size.center();
    set_color(cr, colors.face);
    cr.arc(c.x, c.y, size.inner_radius(), 0.0, TAU);
    cr.fill()
}

fn draw_list(cr: &Context, state: &DrawerState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let size = state.size();
    let c = size.center();

    cr.save()?;
    cr.arc(c.x, c.y, size.inner_radius(), 0.0, TAU);
    cr.clip();
    let width = size.inner_radius() * ROW_WIDTH_FACTOR;
    for row in state.rows() {
        RowRenderer {
            row: &row,
            extent: state.list().item_extent(),
            width,
        }
        .draw(cr, colors)?;
    }
    cr.restore()?;

    draw_scroll_indicator(cr, state, colors)
}

/// Short arc on the right edge whose thumb tracks the list position.
fn draw_scroll_indicator(
    cr: &Context,
    state: &DrawerState,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let count = state.list().item_count();
    if count == 0 {
        return Ok(());
    }
    let size = state.size();
    let c = size.center();
    let r = size.inner_radius() - INDICATOR_INSET;
    let start = -INDICATOR_SPAN / 2.0;

    cr.set_line_width(4.0);
    cr.set_line_cap(cairo::LineCap::Round);
    set_color(cr, colors.track);
    cr.arc(c.x, c.y, r, start, start + INDICATOR_SPAN);
    cr.stroke()?;

    let thumb = INDICATOR_SPAN / count as f64;
    let progress = state.list().offset() / state.list().item_extent();
    let from = start + thumb * progress.clamp(0.0, (count - 1) as f64);
    set_color(cr, colors.accent);
    cr.arc(c.x, c.y, r, from, from + thumb.max(0.05));
    cr.stroke()
}

fn draw_bubble(
    cr: &Context,
    sprite: &BubbleSprite,
    label: &str,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let fill = if sprite.dragging {
        colors.accent
    } else {
        colors.bubble
    };
    set_color(cr, fill);
    cr.arc(sprite.center.x, sprite.center.y, sprite.radius, 0.0, TAU);
    cr.fill()?;

    set_color(cr, colors.text);
    centered_text(cr, label, sprite.center, sprite.radius * BUBBLE_FONT_FACTOR)
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

fn draw_bubbles(
    cr: &Context,
    state: &DrawerState,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let size = state.size();
    let c = size.center();
    cr.save()?;
    cr.arc(c.x, c.y, size.inner_radius(), 0.0, TAU);
    cr.clip();

    // Dragged bubbles last so they stay on top.
    let (dragged, resting): (Vec<_>, Vec<_>) = state.sprites().partition(|s| s.dragging);
    for sprite in resting.iter().chain(dragged.iter()) {
        let label = state
            .entry(sprite.key)
            .map(|e| initials(e.name.as_str()))
            .unwrap_or_default();
        draw_bubble(cr, sprite, &label, colors)?;
    }
    cr.restore()
}

/// Band marking where a rotary gesture can start, fading with the capture state.
fn draw_bezel_ring(
    cr: &Context,
    state: &DrawerState,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let alpha = state.ring_alpha();
    if alpha <= 0.0 {
        return Ok(());
    }
    let size = state.size();
    let c = size.center();
    let outer = size.inner_radius() - RING_WIDTH / 2.0;

    set_color(cr, faded(colors.accent, alpha * 0.25));
    cr.set_line_width(outer - state.bezel_inner_radius());
    cr.arc(c.x, c.y, (outer + state.bezel_inner_radius()) / 2.0, 0.0, TAU);
    cr.stroke()?;

    set_color(cr, faded(colors.accent, alpha));
    cr.set_line_width(RING_WIDTH);
    cr.arc(c.x, c.y, outer, 0.0, TAU);
    cr.stroke()
}

pub fn draw(cr: &Context, state: &DrawerState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    draw_face(cr, state, colors)?;
    match state.style() {
        DrawerStyle::List => draw_list(cr, state, colors)?,
        DrawerStyle::Bubble => draw_bubbles(cr, state, colors)?,
    }
    draw_bezel_ring(cr, state, colors)
}
