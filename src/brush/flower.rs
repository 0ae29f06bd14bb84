use std::f64::consts::{E, TAU};

use kurbo::{ParamCurve, Point, QuadBez};

use crate::brush::wetness_level;
use crate::foundation::core::{Canvas, RenderMode, Rgba8};
use crate::foundation::math::{lerp, sequence_t};
use crate::schedule::StrokeScript;
use crate::sim::stroke::Stroke;
use crate::source::{Source, shuffle};

/// Where a flower goes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bloom {
    pub center: Point,
    pub radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlowerColors {
    pub petal: Rgba8,
    pub seed: Rgba8,
}

/// Scatter non-overlapping blooms, big ones near the center first and smaller ones outwards.
///
/// Sizes are authored for a 1080px canvas and scaled to the shorter side of `canvas`.
pub fn place_blooms(canvas: Canvas, source: &mut dyn Source) -> Vec<Bloom> {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let scale = w.min(h) / 1080.0;
    let page_margin = 20.0 * scale;
    let overlap = 5.0 * scale;

    let count = source.gaussian(100.0, 10.0).max(1.0).floor() as usize;
    let tries = count * 100;
    let mut blooms: Vec<Bloom> = Vec::with_capacity(count);

    'tries: for i in 0..tries {
        if blooms.len() >= count {
            break;
        }
        let t = (blooms.len() as f64 / count as f64).max(sequence_t(i, tries));
        let x = source.gaussian(w / 2.0, lerp(w / 10.0, w / 2.0, t));
        let y = source.gaussian(h / 2.0, lerp(w / 20.0, h / 2.0, t));
        let r = source
            .gaussian(lerp(200.0, 50.0, t) * scale, 20.0 * scale)
            .max(20.0 * scale);

        if x - r < page_margin
            || x + r > w - page_margin
            || y - r < page_margin
            || y + r > h - page_margin
        {
            continue;
        }
        let center = Point::new(x, y);
        for other in &blooms {
            if center.distance(other.center) < r + other.radius - overlap {
                continue 'tries;
            }
        }
        blooms.push(Bloom { center, radius: r });
    }
    blooms
}

/// Paint one flower: a ring of seeds, a wash over the center, fibrous petals and a few spills.
///
/// Petal dabs charge `distance * ln(1 + size^2)` units of work to the throttle (1 for the first
/// dab of each petal stroke), so big, fast-moving dabs take more frames.
///
/// In draft mode petals get more, larger and fainter dabs to stand in for the spread the
/// simulation would add.
pub fn flower_script(
    canvas: Canvas,
    bloom: &Bloom,
    colors: &FlowerColors,
    mode: RenderMode,
    source: &mut dyn Source,
) -> StrokeScript {
    let (x, y) = (bloom.center.x, bloom.center.y);
    let radius = bloom.radius;
    let mut script = StrokeScript::new();

    let wateriness = source.gaussian(48.0, 8.0).clamp(32.0, 255.0);
    let face_x = source.gaussian(0.0, radius * 0.2);
    let face_y = source.gaussian(radius * -0.6, radius * 0.2);
    let seed_radius = (radius * source.gaussian(0.1, 0.05)).max(4.0);
    let seed_space = source.gaussian(3.0, 0.5);

    // seeds
    let seed_color = colors.seed.with_alpha(0.6);
    let layers = source.gaussian(2.5, 0.5).max(1.0).floor() as usize;
    let seed_count =
        ((source.random() * 2.0 * radius * 0.2).max(2.0) / layers as f64).floor() as usize;
    for i in 0..seed_count {
        let a = TAU * i as f64 / seed_count as f64;
        let edge = (sequence_t(i, seed_count) * 2.0 - 1.0).abs();
        for j in 0..layers {
            let r = seed_radius * (j + 1) as f64 / layers as f64;
            let sx = source.gaussian(a.sin() * r, r * 0.15) + face_x * 0.1 + edge * face_x * 0.1;
            let sy = source.gaussian(a.cos() * r, r * 0.15) + face_y * 0.1 + edge * face_y * 0.05;
            let size = source.gaussian(seed_radius.ln_1p() * 1.2, 1.0);
            let wet = wetness_level(source.random_range(0.0, 24.0));
            let (jx, jy) = (source.gaussian(sx, 0.5), source.gaussian(sy, 0.5));
            script
                .paint(
                    Stroke::new(canvas, seed_color, wet)
                        .circle(x + sx, y + sy, size)
                        .circle(x + jx, y + jy, size),
                )
                .wait(1);
        }
    }
    script.wait(5);

    let mut wash = Stroke::new(canvas, colors.seed.with_alpha(0.2), 16).circle(x, y, seed_radius * 1.5);
    for _ in 0..3 {
        let (cx, cy) = (source.gaussian(x, 5.0), source.gaussian(y, 5.0));
        wash = wash.circle(cx, cy, seed_radius);
    }
    script.paint(wash).wait(5);

    // petals
    source.set_detail(2, 1.0);
    let fiber_bias = source.gaussian(1.1, 0.1);
    let shape = source.random();
    let curl = source.gaussian(0.5 - fiber_bias * 0.2, 0.2).clamp(0.3, 0.7);
    let fibrousness = source.gaussian(0.5, 0.25).clamp(0.0, 1.0);
    let petal_count = source.gaussian(10.0 - 2.0 * fiber_bias, 2.0).max(5.0).floor() as usize;
    let arc_width = TAU / petal_count as f64 * 0.5;
    let arc_length = arc_width * radius;
    let angle_offset = source.random_range(0.0, TAU);

    for i in 0..petal_count {
        let petal_angle = angle_offset + TAU * i as f64 / petal_count as f64;
        let stroke_count =
            3 + source.gaussian(0.5 + fibrousness * 1.5, 1.0).max(0.0).floor() as usize * 2;
        let mut order: Vec<usize> = (0..stroke_count).collect();
        shuffle(source, &mut order);

        for j in order {
            let jt = sequence_t(j, stroke_count);
            let edge = (jt * 2.0 - 1.0).abs();
            let offset = edge.powf(0.2) * (jt - 0.5).signum() * arc_width * fiber_bias
                + source.gaussian(0.0, 0.04) * arc_width;
            let start_dist = seed_radius + seed_space;
            let end_dist = source.gaussian(
                radius * (1.0 - 0.1 * (edge - shape).max(0.0)),
                radius * 0.02 * edge,
            );

            let start_angle = petal_angle + offset * 0.5;
            let start = Point::new(
                start_angle.sin() * start_dist + source.gaussian(0.0, arc_length * 0.02),
                start_angle.cos() * start_dist + source.gaussian(0.0, arc_length * 0.02),
            );
            let ctrl_angle = petal_angle + offset * (shape * 0.8 + 0.4);
            let ctrl_dist = lerp(start_dist, radius, 0.2 + shape * 0.6);
            let control = Point::new(
                ctrl_angle.sin() * ctrl_dist
                    + source.gaussian(face_x * (1.0 - curl), arc_length * 0.03),
                ctrl_angle.cos() * ctrl_dist
                    + source.gaussian(face_y * (1.0 - curl), arc_length * 0.03),
            );
            let end_angle = petal_angle + offset * (0.4 - 0.2 * shape);
            let end = Point::new(
                end_angle.sin() * end_dist + face_x * curl,
                end_angle.cos() * end_dist + face_y * curl,
            );
            let path = QuadBez::new(start, control, end);

            let size_factor = lerp(
                1.0 / (E + stroke_count as f64 * 0.4).ln(),
                0.02,
                edge.powf(0.2),
            );
            let mut stroke_size = arc_length * size_factor;
            let mut steps = (radius * 1.2 / (E + stroke_size).ln()).max(2.0).floor() as usize;
            if mode.is_draft() {
                steps = (steps as f64 * 1.2).ceil() as usize;
                stroke_size += 8.0;
            }

            script.reset_work();
            let mut last: Option<Point> = None;
            for k in 0..steps {
                let kt = sequence_t(k, steps);
                let p = path.eval(kt);
                let (nx, ny) = (x + p.x * 0.01, y + p.y * 0.01);
                let wavy_x = (source.noise2(nx, ny) * 2.0 - 1.0) * radius * 0.06;
                let wavy_y = (source.noise3(nx, ny, 100.0) * 2.0 - 1.0) * radius * 0.06;
                let s = Point::new(
                    source.gaussian(p.x + wavy_x, 0.4),
                    source.gaussian(p.y + wavy_y, 0.4),
                );

                let size = stroke_size * (1.0 - (kt * 2.0 - 1.0).abs()).powf(1.75 - shape * 1.5);
                let nv = source.noise3(x + i as f64, y + kt * 2.0, jt * 3.0);
                let mut alpha = lerp(0.15 * nv * nv, 1.0, (1.0 - kt).powi(16));
                if mode.is_draft() {
                    alpha *= 0.2;
                }
                let sr = size * nv.powf(0.25);
                let wet = wetness_level(wateriness * lerp(0.4, 1.0, kt.sqrt()));

                script.paint(
                    Stroke::new(canvas, colors.petal.with_alpha(alpha), wet)
                        .circle(x + s.x, y + s.y, sr),
                );
                let work = last.map_or(1.0, |l| l.distance(s) * (sr * sr).ln_1p());
                script.work(work);
                last = Some(s);
            }
            script.wait(5);
        }
    }

    // spills
    while source.chance(0.4) {
        let sx = source.gaussian(x, radius);
        let sy = source.gaussian(y, radius);
        let alpha = source.gaussian(0.04, 0.04).clamp(0.0, 1.0);
        let d = source.gaussian(1.0, 0.5);
        let (jx, jy) = (source.gaussian(sx, 0.2), source.gaussian(sy, 0.2));
        let jd = source.gaussian(0.5, 0.25);
        script.paint(
            Stroke::new(canvas, colors.petal.with_alpha(alpha), 255)
                .circle(sx, sy, d)
                .circle(jx, jy, jd),
        );
    }
    script.wait(5);
    script
}

#[cfg(test)]
#[path = "../../tests/unit/brush/flower.rs"]
mod tests;
