use crate::assets::mime::ImageInput;
use crate::foundation::core::Point;

/// Discrete requests the cropper understands, independent of where they came from.
#[derive(Clone, Debug)]
pub enum CropMessage {
    Pan { dx: f64, dy: f64 },
    Zoom { delta: f64 },
    NewImage(Option<ImageInput>),
}

/// Which raw UI events are turned into [`CropMessage`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureFlags {
    pub drop_in: bool,
    pub dblclick_in: bool,
    pub mouse_drag: bool,
    pub mouse_wheel_scale: bool,
    pub keystroke_movement: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

/// Raw events a host UI can forward.
#[derive(Clone, Debug)]
pub enum InputEvent {
    /// Vertical wheel scroll; positive grows the image.
    Wheel { delta_y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    /// Pointer released anywhere, not only over the viewport.
    PointerUp,
    Key(ArrowKey),
    /// A file dropped onto the viewport.
    Dropped(Option<ImageInput>),
    /// A file chosen in the picker opened by double-clicking the viewport.
    Picked(Option<ImageInput>),
}

/// Turns raw events into messages, tracking the drag state in between.
#[derive(Clone, Debug, Default)]
pub struct GestureTranslator {
    flags: GestureFlags,
    drag_last: Option<Point>,
}

impl GestureTranslator {
    pub fn new(flags: GestureFlags) -> Self {
        Self {
            flags,
            drag_last: None,
        }
    }

    pub fn flags(&self) -> GestureFlags {
        self.flags
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_last.is_some()
    }

    /// Translate one event. Events for disabled gestures yield `None`.
    pub fn translate(&mut self, event: InputEvent) -> Option<CropMessage> {
        match event {
            InputEvent::Wheel { delta_y } if self.flags.mouse_wheel_scale => {
                Some(CropMessage::Zoom { delta: delta_y })
            }
            InputEvent::PointerDown { x, y } if self.flags.mouse_drag => {
                self.drag_last = Some(Point::new(x, y));
                None
            }
            InputEvent::PointerMove { x, y } if self.flags.mouse_drag => {
                let last = self.drag_last?;
                self.drag_last = Some(Point::new(x, y));
                Some(CropMessage::Pan {
                    dx: x - last.x,
                    dy: y - last.y,
                })
            }
            InputEvent::PointerUp if self.flags.mouse_drag => {
                self.drag_last = None;
                None
            }
            InputEvent::Key(key) if self.flags.keystroke_movement => {
                let (dx, dy) = match key {
                    ArrowKey::Up => (0.0, -1.0),
                    ArrowKey::Down => (0.0, 1.0),
                    ArrowKey::Left => (-1.0, 0.0),
                    ArrowKey::Right => (1.0, 0.0),
                };
                Some(CropMessage::Pan { dx, dy })
            }
            InputEvent::Dropped(input) if self.flags.drop_in => Some(CropMessage::NewImage(input)),
            InputEvent::Picked(input) if self.flags.dblclick_in => {
                Some(CropMessage::NewImage(input))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/gesture.rs"]
mod tests;
