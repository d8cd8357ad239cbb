use anyhow::{Context, Result, bail};
use panespace_interact::{Action, InputFrame, InteractionContext};
use panespace_scene::{MemoryTextures, Point2, Rect, Vec2};

use crate::capture::CaptureBackend;
use crate::cli::{HeadlessCommand, SimulateArgs};
use crate::config::AppConfig;

pub fn run_headless(command: HeadlessCommand, config: &AppConfig) -> Result<()> {
    match command {
        HeadlessCommand::Simulate(args) => simulate(config, &args),
        HeadlessCommand::Windows => list_windows(),
    }
}

fn simulate(config: &AppConfig, args: &SimulateArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("--width and --height must be positive");
    }
    let mut capture = CaptureBackend::synthetic(config);
    let mut textures = MemoryTextures::new();
    let mut ctx = InteractionContext::setup(
        config.camera(),
        &config.placements(),
        config.interaction,
        &mut capture,
        &mut textures,
    )
    .context("failed to create window proxies")?;

    let viewport = Rect::from_min_size(
        Point2::new(0.0, 0.0),
        Vec2::new(args.width as f32, args.height as f32),
    );
    let mut tick = |ctx: &mut InteractionContext, input: InputFrame| {
        ctx.update(&input, &mut capture, &mut textures)
    };

    let placements = config.placements();
    for (idx, (handle, position)) in placements.iter().enumerate() {
        let Some((cursor, _)) = ctx.camera().project(*position, viewport) else {
            println!("window {idx} ({handle}): behind the camera");
            continue;
        };
        tick(&mut ctx, InputFrame::new(viewport, cursor));
        match ctx.last_hit() {
            Some(hit) => println!(
                "window {idx} ({handle}): cursor ({:.1}, {:.1}) picks proxy {} at distance {:.4}",
                cursor.x,
                cursor.y,
                hit.id.index(),
                hit.distance
            ),
            None => println!(
                "window {idx} ({handle}): cursor ({:.1}, {:.1}) hits nothing",
                cursor.x, cursor.y
            ),
        }
    }

    let Some(selected) = ctx.selected() else {
        println!("nothing selected, skipping the scale edit");
        return Ok(());
    };
    let scale_of = |ctx: &InteractionContext| {
        ctx.proxies()
            .get(selected)
            .map(|proxy| proxy.pose.scale())
            .unwrap_or(f64::NAN)
    };
    let before = scale_of(&ctx);
    let center = viewport.center();
    tick(&mut ctx, InputFrame::new(viewport, center).with_pressed(Action::Scale));
    tick(&mut ctx, InputFrame::new(viewport, center));
    let edited = scale_of(&ctx);
    tick(&mut ctx, InputFrame::new(viewport, center).with_pressed(Action::Cancel));
    let restored = scale_of(&ctx);
    println!(
        "proxy {}: scale {before:.4} -> {edited:.4} at viewport centre -> {restored:.4} after cancel",
        selected.index()
    );
    Ok(())
}

#[cfg(feature = "xcap")]
fn list_windows() -> Result<()> {
    let windows = crate::capture::list_windows().context("failed to enumerate windows")?;
    for window in windows {
        println!(
            "{}  {}x{}{}  {} ({})",
            window.handle,
            window.width,
            window.height,
            if window.minimized { " minimized" } else { "" },
            window.title,
            window.app_name
        );
    }
    Ok(())
}

#[cfg(not(feature = "xcap"))]
fn list_windows() -> Result<()> {
    bail!("window listing needs desktop capture. Rebuild with --features xcap.");
}
