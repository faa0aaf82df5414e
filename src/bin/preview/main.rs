// cosmic-preview - Render the cosmic background to a PNG
//
// Pipeline:
//   1. Load (optional) JSON config, seed the RNG
//   2. Generate the field and the constellation
//   3. Run the constellation loop for N frames on a manual scheduler
//   4. Sample the tween scene at the matching time
//   5. Composite nebula, scene entities and constellation over the backdrop
//
// Usage: cargo run --bin cosmic-preview -- --out sky.png [--frames N] [--seed S]

mod raster;

use std::path::PathBuf;

use clap::Parser;
use image::{Rgba as Pixel, RgbaImage, imageops};

use cosmic_engine::field::Field;
use cosmic_engine::lifecycle::{FrameSession, ManualFrames};
use cosmic_engine::parallax::{ParallaxReader, ParallaxTracker};
use cosmic_engine::render::{Rgba, Surface, draw_nebula};
use cosmic_engine::scene::{AmbientScene, EntityKind};
use cosmic_engine::sim::{Constellation, RenderLoop};
use cosmic_engine::{EngineConfig, EngineError};

use raster::RasterSurface;

const FRAME_MS: f64 = 1000.0 / 60.0;
const BACKDROP: Pixel<u8> = Pixel([6, 6, 20, 255]);
const GLOW_COLOR: Rgba = Rgba::new(147, 51, 234, 0.35);

#[derive(Parser)]
#[command(name = "cosmic-preview")]
#[command(about = "Render a still of the procedural cosmic background")]
struct Args {
    /// Output PNG
    #[arg(short, long, default_value = "cosmic.png")]
    out: PathBuf,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// RNG seed; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Frames to simulate before capturing (60 per second)
    #[arg(short, long, default_value_t = 0)]
    frames: u32,

    /// JSON engine config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pointer position as fractions of the viewport, e.g. 0.2,0.8
    #[arg(long, value_parser = parse_pointer)]
    pointer: Option<(f32, f32)>,
}

fn parse_pointer(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s.split_once(',').ok_or("expected X,Y")?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("cosmic-preview: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), EngineError> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let (w, h) = (args.width, args.height);
    println!("Rendering {}x{} after {} frames...", w, h, args.frames);

    let field = Field::generate(&config, &mut rng);
    let points = Constellation::generate(&config.constellation, w, h, &mut rng);

    let mut tracker = ParallaxTracker::new();
    if let Some((fx, fy)) = args.pointer {
        tracker.pointer_moved(fx * w as f32, fy * h as f32, w as f32, h as f32);
    }

    // Nebula
    let mut nebula = RasterSurface::new(w, h);
    draw_nebula(&mut nebula, &field.nebula);

    // Tween entities
    let time = args.frames as f32 / 60.0;
    let scene_layer = paint_scene(&field, tracker.reader(), time, w, h);

    // Constellation
    let frames = ManualFrames::new();
    let session = FrameSession::new(RenderLoop::new(RasterSurface::new(w, h), points), frames.clone());
    session.start();
    for i in 0..args.frames.max(1) {
        frames.advance(i as f64 * FRAME_MS);
    }
    session.stop();
    let links = session.with_render(|r| r.links().len());
    let constellation = session.with_render(|r| r.surface().image().clone());

    let mut out = RgbaImage::from_pixel(w, h, BACKDROP);
    imageops::overlay(&mut out, nebula.image(), 0, 0);
    imageops::overlay(&mut out, &scene_layer, 0, 0);
    imageops::overlay(&mut out, &constellation, 0, 0);
    out.save(&args.out)?;

    println!("  {} stars, {} dust, {} links", field.stars.len(), field.dust.len(), links);
    println!("Wrote {}", args.out.display());
    Ok(())
}

/// Paint every tween-driven entity at `time` seconds
fn paint_scene(field: &Field, parallax: ParallaxReader, time: f32, w: u32, h: u32) -> RgbaImage {
    let mut scene = AmbientScene::new(field, parallax);
    // Let the parallax springs catch up to the pointer
    let settle = (time - 2.0).max(0.0);
    let mut t = settle;
    while t < time {
        scene.frame(t);
        t += 1.0 / 60.0;
    }
    scene.frame(time);

    let mut layer = RasterSurface::new(w, h);
    let (wf, hf) = (w as f32, h as f32);
    let at = |x: f32, y: f32| (x / 100.0 * wf, y / 100.0 * hf);

    for slot in 0..scene.len() {
        let (Some((kind, i)), Some(s)) = (scene.kind(slot), scene.state(slot)) else { continue };
        match kind {
            EntityKind::Star => {
                let star = &field.stars[i];
                let (x, y) = at(star.x, star.y);
                let (x, y) = (x + s.dx, y + s.dy);
                let white = Rgba::WHITE.with_alpha(s.opacity);
                layer.fill_radial(x, y, star.glow() * s.scale, white.with_alpha(0.5), Rgba::TRANSPARENT, s.opacity);
                layer.fill_circle(x, y, star.size / 2.0 * s.scale, white);
            }
            EntityKind::ShootingStar => {
                if s.opacity <= 0.0 {
                    continue;
                }
                let star = &field.shooting_stars[i];
                let (x, y) = at(star.x, star.y);
                let (sin, cos) = s.rotation.to_radians().sin_cos();
                let head = (x + s.dx * cos, y + s.dx * sin);
                let tail = (head.0 - star.length * cos, head.1 - star.length * sin);
                layer.stroke_line(tail, head, 1.0, Rgba::WHITE.with_alpha(s.opacity));
            }
            EntityKind::Dust => {
                let dust = &field.dust[i];
                let (x, y) = at(dust.x, dust.y);
                let color = dust.color();
                layer.fill_circle(x + s.dx, y + s.dy, dust.size / 2.0 * s.scale, color.with_alpha(color.a * s.opacity / 0.4));
            }
            EntityKind::Celestial => {
                let object = &field.celestial[i];
                let (x, y) = at(object.x, object.y);
                let (inner, outer) = object.gradient.stops();
                layer.fill_radial(x + s.dx, y + s.dy, object.size / 2.0, inner, outer, s.opacity * 5.0);
            }
            EntityKind::Glow => {
                let radius = wf.min(hf) * 0.25 * s.scale;
                layer.fill_radial(wf / 2.0, hf / 2.0, radius, GLOW_COLOR, Rgba::TRANSPARENT, s.opacity * 0.3);
            }
        }
    }
    layer.into_image()
}
