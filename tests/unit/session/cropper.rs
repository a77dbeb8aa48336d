use super::*;
use crate::assets::color::ColorDef;
use crate::foundation::core::Canvas;
use crate::foundation::error::ClipframeError;
use crate::input::gesture::ArrowKey;

fn png(width: u32, height: u32, px: [u8; 4]) -> ImageInput {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    ImageInput::new("image/png", bytes.into_inner())
}

fn opts() -> CropperOpts {
    CropperOpts::new(Canvas::new(300, 300).unwrap()).with_rect(200.0, 100.0)
}

fn loaded(opts: &CropperOpts, width: u32, height: u32) -> Cropper {
    let mut c = Cropper::new(opts).unwrap();
    c.incoming_image(Some(png(width, height, [255, 0, 0, 255])))
        .unwrap();
    c.wait_for_decodes();
    c
}

#[test]
fn construction_errors_are_configuration_errors() {
    let err = Cropper::new(&CropperOpts::default()).unwrap_err();
    assert!(matches!(err, ClipframeError::MissingTarget));

    let mut o = opts();
    o.target_shape = Some("hexagon".to_owned());
    let err = Cropper::new(&o).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn fresh_cropper_shows_mask_and_is_not_finished() {
    let c = Cropper::new(&opts()).unwrap();
    assert!(!c.is_painting_finished());
    assert_eq!(c.transform(), None);
    assert_eq!(c.source_size(), None);
    assert_eq!(c.viewport_frame().data, c.mask().data());
}

#[test]
fn absent_or_disallowed_input_changes_nothing() {
    let mut c = loaded(&opts(), 400, 200);
    let before = c.transform();
    assert!(c.is_painting_finished());

    assert_eq!(c.incoming_image(None), None);
    assert_eq!(
        c.incoming_image(Some(ImageInput::new("text/plain", b"hello".to_vec()))),
        None
    );
    assert_eq!(c.decodes_in_flight(), 0);
    assert!(c.is_painting_finished());
    assert_eq!(c.transform(), before);
}

#[test]
fn decode_completion_fits_and_paints() {
    let mut c = Cropper::new(&opts()).unwrap();
    let ticket = c.incoming_image(Some(png(400, 200, [0, 0, 255, 255])));
    assert_eq!(ticket, Some(DecodeTicket(1)));
    assert!(!c.is_painting_finished());

    c.wait_for_decodes();
    assert!(c.is_painting_finished());
    assert_eq!(c.decodes_in_flight(), 0);
    assert_eq!(c.source_size(), Some((400, 200)));
    assert_eq!(c.transform(), Some(Transform::new(0.0, 75.0, 300.0, 150.0)));

    // Center of the crop window shows the image unmasked.
    assert_eq!(c.viewport_frame().pixel(150, 150), Some([0, 0, 255, 255]));
}

#[test]
fn poll_eventually_applies_completion() {
    let mut c = Cropper::new(&opts()).unwrap();
    c.incoming_image(Some(png(10, 10, [0, 255, 0, 255])));
    let mut applied = 0;
    for _ in 0..2000 {
        applied += c.poll();
        if applied > 0 {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    assert_eq!(applied, 1);
    assert!(c.is_painting_finished());
    assert_eq!(c.transform(), Some(Transform::new(145.0, 145.0, 10.0, 10.0)));
}

#[test]
fn failed_decode_keeps_previous_state() {
    let mut c = loaded(&opts(), 400, 200);
    let before = c.transform();

    c.incoming_image(Some(ImageInput::new("image/png", b"not a png".to_vec())));
    assert!(!c.is_painting_finished());
    c.wait_for_decodes();

    assert!(!c.is_painting_finished());
    assert_eq!(c.transform(), before);
    assert_eq!(c.source_size(), Some((400, 200)));
}

#[test]
fn latest_submission_order_keeps_newest_image() {
    let mut o = opts();
    o.decode_order = DecodeOrder::LatestSubmission;
    let mut c = Cropper::new(&o).unwrap();
    c.incoming_image(Some(png(64, 32, [255, 0, 0, 255])));
    c.incoming_image(Some(png(20, 40, [0, 255, 0, 255])));
    c.wait_for_decodes();
    assert_eq!(c.source_size(), Some((20, 40)));
    assert!(c.is_painting_finished());
}

#[test]
fn pan_and_zoom_follow_the_scenario() {
    let mut c = loaded(&opts(), 400, 200);
    c.scaling(-20.0);
    assert_eq!(c.transform(), Some(Transform::new(10.0, 85.0, 280.0, 130.0)));
    c.moving(5.0, -5.0);
    assert_eq!(c.transform(), Some(Transform::new(15.0, 80.0, 280.0, 130.0)));
    assert!(c.is_painting_finished());
}

#[test]
fn min_image_size_limits_shrinking() {
    let mut o = opts();
    o.min_image_size = Some(100.0);
    let mut c = loaded(&o, 400, 200);
    c.scaling(-1000.0);
    let t = c.transform().unwrap();
    assert_eq!(t.height, 100.0);
    assert_eq!(t.width, 250.0);
}

#[test]
fn gestures_are_gated_by_flags() {
    let mut c = loaded(&opts(), 400, 200);
    let before = c.transform();
    assert!(!c.handle_event(InputEvent::Key(ArrowKey::Right)));
    assert!(!c.handle_event(InputEvent::Wheel { delta_y: 10.0 }));
    assert_eq!(c.transform(), before);

    let mut o = opts();
    o.should_keystroke_movement = true;
    o.should_mouse_wheel_scale = true;
    o.should_mouse_drag = true;
    let mut c = loaded(&o, 400, 200);
    assert!(c.handle_event(InputEvent::Key(ArrowKey::Right)));
    assert!(c.handle_event(InputEvent::Wheel { delta_y: 10.0 }));
    assert!(!c.handle_event(InputEvent::PointerDown { x: 0.0, y: 0.0 }));
    assert!(c.handle_event(InputEvent::PointerMove { x: 4.0, y: 6.0 }));
    c.handle_event(InputEvent::PointerUp);
    assert_eq!(c.transform(), Some(Transform::new(0.0, 76.0, 310.0, 160.0)));
}

#[test]
fn export_matches_target_size() {
    let c = loaded(&opts(), 400, 200);
    let enc = c.export(None, None).unwrap();
    assert_eq!((enc.width, enc.height), (200, 100));
    assert!(c.to_data_url(None, None).unwrap().starts_with("data:image/png;base64,"));

    let circle = CropperOpts::new(Canvas::new(300, 300).unwrap()).with_circle(40.0);
    let c = loaded(&circle, 400, 200);
    let frame = c.export_frame();
    assert_eq!((frame.width, frame.height), (80, 80));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(40, 40), Some([255, 0, 0, 255]));
}

#[test]
fn export_before_image_is_transparent() {
    let mut o = opts();
    o.mask_color = Some(ColorDef::rgba(1.0, 1.0, 1.0, 1.0));
    let c = Cropper::new(&o).unwrap();
    let frame = c.export_frame();
    assert_eq!((frame.width, frame.height), (200, 100));
    assert!(frame.data.iter().all(|&b| b == 0));
}

fn prepared(width: u32, height: u32) -> PreparedImage {
    PreparedImage {
        width,
        height,
        rgba8_premul: std::sync::Arc::new(vec![255; (width * height * 4) as usize]),
    }
}

/// Two submissions whose completions arrive newest-first.
fn late_completion(order: DecodeOrder) -> Cropper {
    let mut o = opts();
    o.decode_order = order;
    let mut c = Cropper::new(&o).unwrap();
    c.next_ticket = 2;
    c.in_flight = 2;

    c.tx.send(DecodeDone {
        ticket: DecodeTicket(2),
        result: Ok(prepared(20, 40)),
    })
    .unwrap();
    assert_eq!(c.poll(), 1);
    assert_eq!(c.source_size(), Some((20, 40)));

    c.tx.send(DecodeDone {
        ticket: DecodeTicket(1),
        result: Ok(prepared(64, 32)),
    })
    .unwrap();
    assert_eq!(c.poll(), 1);
    assert_eq!(c.decodes_in_flight(), 0);
    c
}

#[test]
fn completion_order_lets_a_late_older_decode_win() {
    let c = late_completion(DecodeOrder::Completion);
    assert_eq!(c.source_size(), Some((64, 32)));
    assert_eq!(c.transform(), Some(Transform::new(118.0, 134.0, 64.0, 32.0)));
    assert!(c.is_painting_finished());
}

#[test]
fn latest_submission_drops_a_late_older_decode() {
    let c = late_completion(DecodeOrder::LatestSubmission);
    assert_eq!(c.source_size(), Some((20, 40)));
    assert_eq!(c.transform(), Some(Transform::new(140.0, 130.0, 20.0, 40.0)));
}
