//! VDISP round-trip demo.
//!
//! Generates a deterministic synthetic animation cache — a few named
//! objects rippling with sine-wave displacements over 120 frames, with a
//! stretch of absent frames in the middle — then reopens it cold and loads
//! single frames the way a playback host would: one seek, one zlib block,
//! one object extracted while the rest are skipped.

use std::time::Instant;

use anyhow::Result;

use vdisp_core::{ObjectData, VdispHeader, VdispReader, VdispWriter};

// ── constants ──────────────────────────────────────────────────────────────

const FRAME_COUNT: i32 = 120;
const FPS: i32 = 24;

/// Objects in the synthetic scene: name + vertex count.
const OBJECTS: &[(&str, usize)] = &[
    ("ClothSim", 4096),
    ("FaceRig", 1024),
    ("OceanPatch", 16384),
];

/// Frames [50, 60) are written with no data (absent in the offset table),
/// simulating a cache exported with a gap in the simulated range.
const GAP: std::ops::Range<u32> = 50..60;

// ── data generator ──────────────────────────────────────────────────────────

/// Deterministic displacement for vertex `v` of object `obj` at `frame`.
/// The same inputs always produce the same bytes, enabling verification.
fn displacement(obj: usize, frame: u32, v: usize) -> [f32; 3] {
    let phase = v as f32 * 0.07 + obj as f32 * 1.3;
    let t = frame as f32 / FPS as f32;
    [
        (t * 2.0 + phase).sin() * 0.25,
        (t * 3.1 + phase).cos() * 0.1,
        (t * 1.7 + phase * 0.5).sin() * 0.05,
    ]
}

fn main() -> Result<()> {
    let path = std::env::temp_dir().join("vdisp_demo.vdisp");

    // ── Write the cache ────────────────────────────────────────────────────
    let t0 = Instant::now();
    let mut writer = VdispWriter::create(
        &path,
        VdispHeader {
            version: 1,
            base_frame: 0,
            frame_start: 0,
            frame_end: FRAME_COUNT - 1,
            fps: FPS,
            frame_count: FRAME_COUNT,
        },
    )?;

    let mut buffers: Vec<Vec<[f32; 3]>> = Vec::with_capacity(OBJECTS.len());
    for frame in 0..FRAME_COUNT as u32 {
        if GAP.contains(&frame) {
            continue;
        }
        buffers.clear();
        for (obj, (_, vertex_count)) in OBJECTS.iter().enumerate() {
            buffers.push((0..*vertex_count).map(|v| displacement(obj, frame, v)).collect());
        }
        let objects: Vec<ObjectData<'_>> = OBJECTS
            .iter()
            .zip(&buffers)
            .map(|(&(name, _), displacements)| ObjectData {
                name,
                displacements: displacements.as_slice(),
            })
            .collect();
        writer.write_frame(frame, &objects)?;
    }
    writer.finish()?;

    let file_size = std::fs::metadata(&path)?.len();
    println!("wrote {path:?}");
    println!("  frames      : {} ({} absent)", FRAME_COUNT, GAP.len());
    println!("  file size   : {file_size} bytes");
    println!("  elapsed     : {:.3}s", t0.elapsed().as_secs_f64());

    // ── Read back single frames ────────────────────────────────────────────
    let reader = VdispReader::open(&path)?;
    println!();
    println!("reopened: {} frames declared", reader.frame_count());

    for &(frame, object, vertices) in &[
        (17u32, "FaceRig", 1024u32),
        (90, "OceanPatch", 16384),
        (117, "ClothSim", 4096),
    ] {
        let t = Instant::now();
        let data = reader.load_frame(frame, object, vertices)?;
        let elapsed = t.elapsed();

        let obj = OBJECTS.iter().position(|(name, _)| *name == object).unwrap();
        let expected = displacement(obj, frame, 0);
        assert!(data.found, "object {object} missing from frame {frame}");
        assert_eq!(data.displacements[0], expected, "frame {frame} vertex 0 mismatch");

        println!(
            "  frame {frame:>3} {object:<10} : {} vectors in {:>7.3}ms, v0 = [{:+.4} {:+.4} {:+.4}]",
            data.displacements.len(),
            elapsed.as_secs_f64() * 1000.0,
            data.displacements[0][0],
            data.displacements[0][1],
            data.displacements[0][2],
        );
    }

    // Absent frame surfaces a typed error, not garbage.
    let gap_frame = GAP.start;
    match reader.load_frame(gap_frame, "ClothSim", 4096) {
        Err(vdisp_core::FrameError::InvalidOffset { index, .. }) => {
            println!("  frame {index:>3} is absent as expected");
        }
        other => anyhow::bail!("expected InvalidOffset for gap frame, got {other:?}"),
    }

    println!();
    println!("demo OK");
    Ok(())
}
