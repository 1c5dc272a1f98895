//! Detect faces in a photo, pixelate all of them, and write the result.
//!
//! Usage:
//!   cargo run --example blur_faces --features rustface -- \
//!       seeta_fd_frontal_v1.0.bin input.jpg output.png

use faceblur::{FaceBlurSession, OutputFormat, RustfaceDetector};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [model_path, input_path, output_path] = args.as_slice() else {
        eprintln!("usage: blur_faces <model.bin> <input> <output.png>");
        std::process::exit(2);
    };

    let detector = RustfaceDetector::from_path(model_path).expect("failed to load model");
    let input = std::fs::read(input_path).unwrap();

    let mut session = FaceBlurSession::new().face_detector(Box::new(detector));
    let count = session.import(&input).unwrap();
    let image = session.image().unwrap();
    println!("=== {input_path} ({}x{}) ===", image.width(), image.height());

    if count == 0 {
        println!("  NO FACES DETECTED — writing the image unchanged");
    } else {
        println!("  Found {count} face(s):");
        let (width, height) = image.dimensions();
        let frame = faceblur::DisplayFrame::full(width, height);
        let rects = faceblur::map_faces(session.regions().as_slice(), frame);
        for (i, rect) in rects.iter().enumerate() {
            println!(
                "    face {i}: ({:.0}, {:.0}, {:.0}x{:.0})",
                rect.x, rect.y, rect.width, rect.height
            );
        }
    }

    for index in 0..count {
        session.toggle(index).unwrap();
    }

    let data = session
        .render_encoded(&OutputFormat::Png, 1.0)
        .unwrap()
        .expect("image was imported");
    std::fs::write(output_path, &data).unwrap();
    println!("  → wrote {} bytes to {output_path}", data.len());
}
