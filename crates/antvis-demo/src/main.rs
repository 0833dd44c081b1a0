//! Demo entry point: build the panel on a Vello surface and replay a pointer script.
//!
//! Usage: `antvis-demo [--style style.json] [--script events.json] [--icons strip.png]`

mod panel;
mod script;

use std::error::Error;

use antvis_core::{ButtonStyle, WidgetManager};
use antvis_render::VelloSurface;

fn main() {
    env_logger::init();
    log::info!("Starting antvis button demo");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut style_path = None;
    let mut script_path = None;
    let mut icons_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--style" => style_path = args.next(),
            "--script" => script_path = args.next(),
            "--icons" => icons_path = args.next(),
            other => return Err(format!("Unknown argument: {other}").into()),
        }
    }

    let style = match style_path {
        Some(path) => ButtonStyle::from_file(path)?,
        None => ButtonStyle::default(),
    };
    let events = match script_path {
        Some(path) => script::parse(&std::fs::read_to_string(path)?)?,
        None => script::default_script(),
    };

    let mut surface = VelloSurface::new();
    let icons = match icons_path {
        Some(path) => surface.load_image(&std::fs::read(path)?)?,
        None => surface.insert_image(4 * panel::ICON_SIZE, panel::ICON_SIZE, panel::icon_strip(4))?,
    };

    let mut manager = WidgetManager::with_style(surface, style)
        .with_repaint_hook(|| log::trace!("Repaint requested"));
    let clicks = panel::ClickLog::default();
    panel::build(&mut manager, icons, &clicks)?;
    manager.draw();

    let fired = script::replay(&mut manager, &events);

    // Final frame from the settled state.
    manager.surface_mut().reset();
    manager.draw();
    let _scene = manager.surface_mut().take_scene();
    log::info!(
        "Replayed {} events, {} clicks: {:?}",
        events.len(),
        fired,
        clicks.borrow()
    );
    Ok(())
}
