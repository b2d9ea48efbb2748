use image::{ImageBuffer, Pixel};

use super::{pixel_coord, put_pixel_clipped};

pub trait DrawLine<P> {
    /// Draw a thick segment by stamping a padded cross at each step.
    ///
    /// The segment is split into `max(|dx|, |dy|)` equal increments and both
    /// endpoints are stamped. At every step a `2 * pad + 1` wide horizontal run
    /// and a `2 * pad + 1` tall vertical run are written through the current
    /// point. This is an approximation, not a Bresenham or anti-aliased line.
    ///
    /// Only the steps whose cross can reach the image are visited, so a far
    /// away endpoint costs no more than the visible part of the segment.
    fn draw_line(&mut self, start: (f32, f32), end: (f32, f32), pad: u32, color: P);
}

impl<P> DrawLine<P> for ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
{
    fn draw_line(&mut self, start: (f32, f32), end: (f32, f32), pad: u32, color: P) {
        if ![start.0, start.1, end.0, end.1].iter().all(|v| v.is_finite()) {
            log::warn!("skipping line {start:?} -> {end:?} with a non-finite coordinate");
            return;
        }
        let (x0, y0) = (f64::from(start.0), f64::from(start.1));
        let (dx, dy) = (f64::from(end.0) - x0, f64::from(end.1) - y0);
        let steps = dx.abs().max(dy.abs()).round() as i64;

        if steps == 0 {
            stamp_cross(self, start.0, start.1, pad, color);
            return;
        }

        let reach = f64::from(pad) + 1.0;
        let x_steps = visible_steps(x0, dx, steps, -reach, f64::from(self.width()) + reach);
        let y_steps = visible_steps(y0, dy, steps, -reach, f64::from(self.height()) + reach);
        let (Some((x_from, x_to)), Some((y_from, y_to))) = (x_steps, y_steps) else {
            return;
        };

        for s in x_from.max(y_from)..=x_to.min(y_to) {
            let t = s as f64 / steps as f64;
            stamp_cross(self, (x0 + dx * t) as f32, (y0 + dy * t) as f32, pad, color);
        }
    }
}

/// Steps `s` in `0..=steps` whose point `start + delta * s / steps` lies in
/// `[low, high]`, widened by one step on each side for rounding.
fn visible_steps(start: f64, delta: f64, steps: i64, low: f64, high: f64) -> Option<(i64, i64)> {
    if delta == 0.0 {
        return (low <= start && start <= high).then_some((0, steps));
    }
    let (t1, t2) = ((low - start) / delta, (high - start) / delta);
    let (t_min, t_max) = (t1.min(t2).max(0.0), t1.max(t2).min(1.0));
    if t_min > t_max {
        return None;
    }
    let total = steps as f64;
    let from = ((t_min * total).floor() as i64).saturating_sub(1).max(0);
    let to = ((t_max * total).ceil() as i64).saturating_add(1).min(steps);
    Some((from, to))
}

fn stamp_cross<P: Pixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    x: f32,
    y: f32,
    pad: u32,
    color: P,
) {
    let (x, y, pad) = (pixel_coord(x), pixel_coord(y), i64::from(pad));
    for i in x - pad..=x + pad {
        put_pixel_clipped(image, i, y, color);
    }
    for j in y - pad..=y + pad {
        put_pixel_clipped(image, x, j, color);
    }
}
