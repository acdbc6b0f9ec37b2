use std::fs;
use std::path::Path;

use boardsight_classify::{
    LibraryError, LibraryParams, PieceClassifierStrategy, Preprocessing, ReferenceLibrary,
    SsimClassifier,
};
use image::{DynamicImage, Rgba, RgbaImage};

/// A square with a filled disc of the given radius, standing in for a piece glyph.
fn glyph(size: u32, radius: f32, fg: [u8; 4]) -> DynamicImage {
    let c = size as f32 / 2.0;
    DynamicImage::ImageRgba8(RgbaImage::from_fn(size, size, |x, y| {
        let (dx, dy) = (x as f32 + 0.5 - c, y as f32 + 0.5 - c);
        if dx * dx + dy * dy <= radius * radius {
            Rgba(fg)
        } else {
            Rgba([118, 150, 86, 255])
        }
    }))
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_png(path: &Path, img: &DynamicImage) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    img.save(path).unwrap();
}

fn populate(root: &Path) {
    write_png(&root.join("white/wP.png"), &glyph(60, 12.0, [250, 250, 250, 255]));
    write_png(&root.join("white/wK.png"), &glyph(60, 26.0, [250, 250, 250, 255]));
    write_png(&root.join("black/bP.png"), &glyph(60, 12.0, [20, 20, 20, 255]));
    write_png(&root.join("empty.png"), &glyph(60, 0.0, [0, 0, 0, 255]));
    fs::write(root.join("black/broken.png"), b"definitely not a png").unwrap();
}

#[test]
fn walks_nested_directories_in_path_order_and_skips_bad_files() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());

    let lib = ReferenceLibrary::load_dir(dir.path(), &LibraryParams::default()).unwrap();
    let labels: Vec<&str> = lib.labels().collect();
    assert_eq!(labels, ["bP", "empty", "wK", "wP"]);
    assert_eq!(lib.skipped().len(), 1);
    assert!(lib.skipped()[0].path.ends_with("black/broken.png"));
    assert_eq!(lib.root(), Some(dir.path()));
}

#[test]
fn classifies_captured_cells_against_disk_library() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());
    let lib = ReferenceLibrary::load_dir(dir.path(), &LibraryParams::default()).unwrap();

    // Cells are captured at a different resolution than the references.
    let classifier = SsimClassifier::new(Preprocessing::Grayscale);
    let cases = [
        (glyph(75, 15.0, [250, 250, 250, 255]), "wP"),
        (glyph(75, 32.5, [250, 250, 250, 255]), "wK"),
        (glyph(75, 15.0, [20, 20, 20, 255]), "bP"),
        (glyph(75, 0.0, [0, 0, 0, 255]), "empty"),
    ];
    for (cell, expected) in cases {
        let res = classifier.classify(&cell, &lib).unwrap();
        assert_eq!(res.label.as_deref(), Some(expected), "score {}", res.score);
    }
}

#[test]
fn reload_picks_up_new_references() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());
    let mut lib = ReferenceLibrary::load_dir(dir.path(), &LibraryParams::default()).unwrap();
    assert_eq!(lib.len(), 4);

    write_png(&dir.path().join("black/bK.png"), &glyph(60, 26.0, [20, 20, 20, 255]));
    lib.reload().unwrap();
    assert_eq!(lib.len(), 5);
    assert_eq!(lib.labels().next(), Some("bK"));
}

#[test]
fn library_size_is_bounded() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());
    let err = ReferenceLibrary::load_dir(dir.path(), &LibraryParams { max_entries: 3 }).unwrap_err();
    assert!(matches!(
        err,
        LibraryError::TooManyReferences { found: 5, limit: 3 }
    ));
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err =
        ReferenceLibrary::load_dir(dir.path().join("nope"), &LibraryParams::default()).unwrap_err();
    assert!(matches!(err, LibraryError::NotADirectory(_)));
}
