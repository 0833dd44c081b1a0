//! Pointer scripts replayed against the panel.

use antvis_core::{Surface, WidgetManager};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One pointer event of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScriptEvent {
    Move { x: f64, y: f64 },
    Down,
    Up,
}

/// Parse a JSON array of events.
pub fn parse(json: &str) -> Result<Vec<ScriptEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Built-in script: pick a speed, toggle a player, then drag off a button.
pub fn default_script() -> Vec<ScriptEvent> {
    use ScriptEvent::*;
    vec![
        Move { x: 610.0, y: 150.0 },
        Down,
        Up,
        Move { x: 20.0, y: 10.0 },
        Down,
        Up,
        Move { x: 610.0, y: 110.0 },
        Down,
        Move { x: 300.0, y: 300.0 },
        Up,
    ]
}

/// Feed events to the manager. Returns how many clicks fired.
pub fn replay<S: Surface>(manager: &mut WidgetManager<S>, events: &[ScriptEvent]) -> usize {
    let mut clicks = 0;
    for event in events {
        match *event {
            ScriptEvent::Move { x, y } => {
                manager.pointer_move(Point::new(x, y));
            }
            ScriptEvent::Down => manager.pointer_down(),
            ScriptEvent::Up => {
                if manager.pointer_up() {
                    clicks += 1;
                }
            }
        }
    }
    clicks
}
