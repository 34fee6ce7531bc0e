use super::{
    ARROW_HEAD, ARROW_WIDTH, BOUNDS_DASH, FONT_SIZE, HANDLE_RADIUS, READOUT_MARGIN, ROSE_GAP,
    ROSE_TICK, SELECTED_HANDLE_RADIUS, TRACK_WIDTH, knots_to_pixels, readout_lines,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::{PI, TAU};
use telltale::geometry::{Point, PolarVector};
use telltale::ring::{Ring, RingId};
use telltale::wind::Compass;
use telltale::Diagram;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct RingRenderer<'a> {
    ring: &'a Ring,
    center: Point,
    selected: bool,
}

impl<'a> RingRenderer<'a> {
    fn new(ring: &'a Ring, center: Point, selected: bool) -> Self {
        Self {
            ring,
            center,
            selected,
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self.ring.id {
            RingId::Wind => colors.wind,
            RingId::Boat => colors.boat,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_bounds(cr, colors)?;
        self.draw_track(cr, colors)?;
        self.draw_handles(cr, colors)
    }

    fn circle(&self, cr: &Context, radius: f64) {
        cr.new_sub_path();
        cr.arc(self.center.x, self.center.y, radius, 0.0, TAU);
    }

    fn draw_bounds(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        set_color(cr, colors.track);
        cr.set_line_width(1.0);
        cr.set_dash(BOUNDS_DASH, 0.0);
        self.circle(cr, self.ring.min_radius());
        self.circle(cr, self.ring.max_radius());
        cr.stroke()?;
        cr.restore()
    }

    fn draw_track(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color = self.color(colors);
        set_color(cr, Srgba::new(color.red, color.green, color.blue, 0.45));
        cr.set_line_width(TRACK_WIDTH);
        self.circle(cr, self.ring.radius());
        cr.stroke()
    }

    fn draw_handles(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let radius = if self.selected {
            SELECTED_HANDLE_RADIUS
        } else {
            HANDLE_RADIUS
        };

        for handle in self.ring.handles(self.center) {
            set_color(cr, self.color(colors));
            cr.new_sub_path();
            cr.arc(handle.position.x, handle.position.y, radius, 0.0, TAU);
            cr.fill_preserve()?;

            if self.selected {
                set_color(cr, colors.selected);
                cr.set_line_width(2.5);
                cr.stroke()?;
            } else {
                cr.new_path();
            }
        }
        Ok(())
    }
}

fn draw_arrow(
    cr: &Context,
    from: Point,
    vector: PolarVector,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    if vector.magnitude < 1.0 {
        return Ok(());
    }
    let tip = from.offset(vector.to_cartesian());
    let head = ARROW_HEAD.min(vector.magnitude);

    set_color(cr, color);
    cr.set_line_width(ARROW_WIDTH);
    cr.move_to(from.x, from.y);
    cr.line_to(tip.x, tip.y);
    cr.stroke()?;

    let left = tip.offset(PolarVector::new(vector.angle + PI - PI / 7.0, head).to_cartesian());
    let right = tip.offset(PolarVector::new(vector.angle + PI + PI / 7.0, head).to_cartesian());
    cr.move_to(tip.x, tip.y);
    cr.line_to(left.x, left.y);
    cr.line_to(right.x, right.y);
    cr.close_path();
    cr.fill()
}

fn draw_rose(cr: &Context, diagram: &Diagram, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = diagram.frame().center();
    let radius = diagram.wind_ring().max_radius() + ROSE_GAP;

    set_color(cr, colors.rose);
    cr.set_line_width(1.5);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(FONT_SIZE);

    for i in 0..8 {
        let angle = i as f64 * PI / 4.0;
        let inner = center.offset(PolarVector::new(angle, radius).to_cartesian());
        let outer = center.offset(PolarVector::new(angle, radius + ROSE_TICK).to_cartesian());
        cr.move_to(inner.x, inner.y);
        cr.line_to(outer.x, outer.y);
        cr.stroke()?;

        let label = Compass::from_angle(angle).to_string();
        let anchor =
            center.offset(PolarVector::new(angle, radius + ROSE_TICK + FONT_SIZE).to_cartesian());
        if let Ok(ext) = cr.text_extents(&label) {
            cr.move_to(anchor.x - ext.width() / 2.0, anchor.y + ext.height() / 2.0);
            cr.show_text(&label)?;
        }
    }
    Ok(())
}

fn draw_readout(cr: &Context, diagram: &Diagram, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.text);
    cr.select_font_face(
        "Monospace",
        cairo::FontSlant::Normal,
        cairo::FontWeight::Normal,
    );
    cr.set_font_size(FONT_SIZE);

    for (i, line) in readout_lines(diagram).iter().enumerate() {
        cr.move_to(READOUT_MARGIN, READOUT_MARGIN + (i as f64 + 1.0) * FONT_SIZE * 1.4);
        cr.show_text(line)?;
    }
    Ok(())
}

/// Paints the whole diagram. Reads the state, never changes it.
pub fn draw(cr: &Context, diagram: &Diagram, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = diagram.frame().center();
    let selected = diagram.selected();

    draw_rose(cr, diagram, colors)?;

    for id in [RingId::Wind, RingId::Boat] {
        RingRenderer::new(diagram.ring(id), center, selected == Some(id)).draw(cr, colors)?;
    }

    let scale = knots_to_pixels(diagram);
    let true_wind = diagram.true_wind();
    let boat = diagram.boat_vector();
    let apparent = diagram.apparent_wind();

    draw_arrow(
        cr,
        center,
        PolarVector::new(true_wind.angle, true_wind.speed * scale),
        colors.wind,
    )?;
    draw_arrow(
        cr,
        center,
        PolarVector::new(boat.heading, boat.speed * scale),
        colors.boat,
    )?;
    draw_arrow(
        cr,
        center,
        PolarVector::new(apparent.angle, apparent.speed * scale),
        colors.apparent,
    )?;

    draw_readout(cr, diagram, colors)
}
