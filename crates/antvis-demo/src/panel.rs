//! The demo button panel: playback speed, player toggles and a hidden debug row.

use std::cell::RefCell;
use std::rc::Rc;

use antvis_core::{Axis, ClickHandler, GroupError, GroupMode, ImageSource, Surface, WidgetManager};
use kurbo::Point;
use peniko::Color;

/// Side of one icon in the generated strip.
pub const ICON_SIZE: u32 = 32;

/// Log of clicked button names, shared with the click handlers.
pub type ClickLog = Rc<RefCell<Vec<String>>>;

fn record(log: &ClickLog, name: &str) -> Option<ClickHandler> {
    let log = log.clone();
    let name = name.to_string();
    Some(Box::new(move || {
        log::info!("Button '{}' clicked", name);
        log.borrow_mut().push(name.clone());
    }))
}

/// RGBA pixels for a strip of `count` flat-colored icons.
pub fn icon_strip(count: u32) -> Vec<u8> {
    let palette = [[220, 60, 60], [60, 160, 60], [60, 90, 220], [200, 160, 40]];
    let width = ICON_SIZE * count;
    let mut pixels = Vec::with_capacity((width * ICON_SIZE * 4) as usize);
    for _y in 0..ICON_SIZE {
        for x in 0..width {
            let [r, g, b] = palette[(x / ICON_SIZE) as usize % palette.len()];
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    pixels
}

/// Register the demo groups on `manager`, drawing icons from `icons`.
pub fn build<S: Surface>(manager: &mut WidgetManager<S>, icons: ImageSource, log: &ClickLog) -> Result<(), GroupError> {
    manager
        .add_image_group("speed", icons, Axis::Vertical, GroupMode::RadioExclusive, 0.0)
        .set_origin(Point::new(600.0, 100.0));
    for (i, name) in ["slow", "normal", "fast"].into_iter().enumerate() {
        manager.add_image_widget("speed", i, record(log, name))?;
    }

    manager.add_text_group("players", Axis::Horizontal, GroupMode::Normal, 0.0);
    let players = [
        ("Player 1", Color::from_rgba8(200, 40, 40, 255)),
        ("Player 2", Color::from_rgba8(40, 120, 200, 255)),
        ("Player 3", Color::from_rgba8(40, 160, 60, 255)),
    ];
    for (label, color) in players {
        manager.add_text_widget("players", label, color, record(log, label))?;
    }
    manager.add_text_widget("players", "turn 0", Color::BLACK, None)?;
    manager.cascade("players", 560.0)?;

    manager
        .add_image_group("debug", icons, Axis::Horizontal, GroupMode::Hidden, 2.0)
        .set_origin(Point::new(0.0, 400.0));
    manager.add_image_widget("debug", 3, record(log, "dump"))?;
    Ok(())
}
