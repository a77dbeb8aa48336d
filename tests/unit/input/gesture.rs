use super::*;

fn all_on() -> GestureFlags {
    GestureFlags {
        drop_in: true,
        dblclick_in: true,
        mouse_drag: true,
        mouse_wheel_scale: true,
        keystroke_movement: true,
    }
}

#[test]
fn disabled_gestures_yield_nothing() {
    let mut t = GestureTranslator::new(GestureFlags::default());
    assert!(t.translate(InputEvent::Wheel { delta_y: 5.0 }).is_none());
    assert!(t.translate(InputEvent::PointerDown { x: 0.0, y: 0.0 }).is_none());
    assert!(t.translate(InputEvent::PointerMove { x: 9.0, y: 9.0 }).is_none());
    assert!(t.translate(InputEvent::Key(ArrowKey::Up)).is_none());
    let input = ImageInput::new("image/png", vec![]);
    assert!(t.translate(InputEvent::Dropped(Some(input.clone()))).is_none());
    assert!(t.translate(InputEvent::Picked(Some(input))).is_none());
    assert!(!t.is_dragging());
}

#[test]
fn drag_emits_incremental_pans() {
    let mut t = GestureTranslator::new(all_on());
    assert!(t.translate(InputEvent::PointerMove { x: 5.0, y: 5.0 }).is_none());
    assert!(t.translate(InputEvent::PointerDown { x: 10.0, y: 20.0 }).is_none());
    assert!(t.is_dragging());

    let Some(CropMessage::Pan { dx, dy }) = t.translate(InputEvent::PointerMove { x: 13.0, y: 18.0 })
    else {
        panic!("expected pan");
    };
    assert_eq!((dx, dy), (3.0, -2.0));

    let Some(CropMessage::Pan { dx, dy }) = t.translate(InputEvent::PointerMove { x: 14.0, y: 18.0 })
    else {
        panic!("expected pan");
    };
    assert_eq!((dx, dy), (1.0, 0.0));

    assert!(t.translate(InputEvent::PointerUp).is_none());
    assert!(!t.is_dragging());
    assert!(t.translate(InputEvent::PointerMove { x: 50.0, y: 50.0 }).is_none());
}

#[test]
fn arrows_move_one_pixel() {
    let mut t = GestureTranslator::new(all_on());
    let cases = [
        (ArrowKey::Up, (0.0, -1.0)),
        (ArrowKey::Down, (0.0, 1.0)),
        (ArrowKey::Left, (-1.0, 0.0)),
        (ArrowKey::Right, (1.0, 0.0)),
    ];
    for (key, want) in cases {
        let Some(CropMessage::Pan { dx, dy }) = t.translate(InputEvent::Key(key)) else {
            panic!("expected pan for {key:?}");
        };
        assert_eq!((dx, dy), want);
    }
}

#[test]
fn wheel_and_files_map_through() {
    let mut t = GestureTranslator::new(all_on());
    assert!(matches!(
        t.translate(InputEvent::Wheel { delta_y: -12.5 }),
        Some(CropMessage::Zoom { delta }) if delta == -12.5
    ));
    assert!(matches!(
        t.translate(InputEvent::Dropped(None)),
        Some(CropMessage::NewImage(None))
    ));
    assert!(matches!(
        t.translate(InputEvent::Picked(Some(ImageInput::new("image/png", vec![1])))),
        Some(CropMessage::NewImage(Some(_)))
    ));
}
