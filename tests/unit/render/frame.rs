use super::*;

#[test]
fn new_frame_is_zeroed_and_sized() {
    let f = FrameRGBA::new(3, 2);
    assert_eq!(f.data.len(), 24);
    assert!(f.data.iter().all(|&b| b == 0));
    assert_eq!(f.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(3, 0), None);
}

#[test]
fn to_image_keeps_layout() {
    let mut f = FrameRGBA::new(2, 1);
    f.data[4..8].copy_from_slice(&[9, 8, 7, 255]);
    let img = f.to_image().unwrap();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(1, 0).0, [9, 8, 7, 255]);
}

#[test]
fn to_image_rejects_short_buffer() {
    let mut f = FrameRGBA::new(2, 2);
    f.data.truncate(4);
    assert!(matches!(
        f.to_image().unwrap_err(),
        PaintlapseError::Validation(_)
    ));
}

#[test]
fn save_png_creates_parent_directories() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_frame_png")
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("f.png");

    let mut f = FrameRGBA::new(1, 1);
    f.data.copy_from_slice(&[1, 2, 3, 255]);
    f.save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 255]);
}
