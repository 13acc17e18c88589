use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "syntropy_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn solid(width: u32, height: u32, px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied,
    }
}

#[test]
fn export_name_embeds_decimal_id() {
    assert_eq!(
        export_file_name(Identifier::new(42).unwrap()),
        "syntropy-42.jpg"
    );
    assert_eq!(
        export_file_name(Identifier::new(8191).unwrap()),
        "syntropy-8191.jpg"
    );
}

#[test]
fn default_format_is_jpeg_95() {
    assert_eq!(StillFormat::default(), StillFormat::Jpeg { quality: 95 });
}

#[test]
fn format_follows_extension() {
    assert_eq!(
        StillFormat::from_path(Path::new("a/b.PNG"), 95).unwrap(),
        StillFormat::Png
    );
    assert_eq!(
        StillFormat::from_path(Path::new("x.jpeg"), 80).unwrap(),
        StillFormat::Jpeg { quality: 80 }
    );
    assert!(StillFormat::from_path(Path::new("x.gif"), 95).is_err());
    assert!(StillFormat::from_path(Path::new("noext"), 95).is_err());
}

#[test]
fn flatten_premul_over_black_keeps_rgb() {
    let out = flatten_to_opaque_rgba8(&solid(1, 1, [128, 0, 0, 128], true)).unwrap();
    assert_eq!(out, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_straight_over_black_scales_rgb() {
    let out = flatten_to_opaque_rgba8(&solid(1, 1, [255, 0, 0, 128], false)).unwrap();
    assert_eq!(out, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_rejects_short_buffers() {
    let mut frame = solid(2, 2, [0, 0, 0, 255], true);
    frame.data.truncate(8);
    assert!(flatten_to_opaque_rgba8(&frame).is_err());
}

#[test]
fn save_frame_writes_png_and_jpeg() {
    let dir = temp_dir("save_frame");
    let frame = solid(8, 6, [255, 64, 0, 255], true);

    let png = dir.join("out.png");
    save_frame(&frame, &png, StillFormat::Png).unwrap();
    let decoded = image::open(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (8, 6));
    assert_eq!(decoded.get_pixel(3, 3).0, [255, 64, 0, 255]);

    let jpg = dir.join("nested").join("out.jpg");
    save_frame(&frame, &jpg, StillFormat::default()).unwrap();
    let decoded = image::open(&jpg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (8, 6));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_frame_rejects_zero_quality() {
    let dir = temp_dir("save_frame_quality");
    let frame = solid(2, 2, [0, 0, 0, 255], true);
    assert!(save_frame(&frame, &dir.join("q.jpg"), StillFormat::Jpeg { quality: 0 }).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
