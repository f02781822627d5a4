use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use vdisp_core::VdispReader;

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "vdisp",
    about = "Inspect and extract frames from VDISP vertex-displacement cache files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header metadata and frame table statistics
    Inspect {
        /// VDISP file to inspect
        file: PathBuf,
        /// Print the per-frame offset table
        #[arg(long)]
        frames: bool,
    },
    /// List the object records stored in one frame
    Objects {
        /// VDISP file
        file: PathBuf,
        /// Zero-based frame index to scan
        #[arg(short, long)]
        frame: u32,
    },
    /// Extract one object's displacements from one frame
    Extract {
        /// VDISP file
        file: PathBuf,
        /// Zero-based frame index
        #[arg(short, long)]
        frame: u32,
        /// Object name to extract (byte-exact, case-sensitive)
        #[arg(short, long)]
        object: String,
        /// Target vertex count; defaults to the record's stored count
        #[arg(short, long)]
        vertices: Option<u32>,
        /// Write raw little-endian f32 triples to a file instead of printing
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Benchmark repeated random-frame loads
    Bench {
        /// VDISP file
        file: PathBuf,
        /// Object name to load each time
        #[arg(short, long)]
        object: String,
        /// Target vertex count per load
        #[arg(short, long)]
        vertices: u32,
        /// Number of random frame loads
        #[arg(short, long, default_value_t = 1000)]
        count: u64,
        /// Fixed random seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_inspect(file: PathBuf, show_frames: bool) -> anyhow::Result<()> {
    let reader = VdispReader::open(&file).with_context(|| format!("opening {file:?}"))?;
    let file_size = std::fs::metadata(&file)?.len();
    let header = reader.header();

    let present = reader.frame_offsets().iter().filter(|&&o| o > 0).count();
    let absent = reader.frame_count() as usize - present;

    println!("=== VDISP File: {file:?} ===");
    println!();
    println!("  format version : {}", header.version);
    println!("  base frame     : {}", header.base_frame);
    println!("  frame range    : {}..{}", header.frame_start, header.frame_end);
    println!("  fps            : {}", header.fps);
    println!("  frame count    : {}", reader.frame_count());
    println!("  frames present : {present}");
    println!("  frames absent  : {absent}");
    println!("  file on disk   : {file_size} bytes");

    if show_frames {
        println!();
        println!("  {:>8}  {:>14}", "frame", "file offset");
        println!("  {}", "-".repeat(24));
        for (i, offset) in reader.frame_offsets().iter().enumerate() {
            if *offset > 0 {
                println!("  {i:>8}  {offset:>14}");
            } else {
                println!("  {i:>8}  {:>14}", "absent");
            }
        }
    }

    Ok(())
}

fn run_objects(file: PathBuf, frame: u32) -> anyhow::Result<()> {
    let reader = VdispReader::open(&file).with_context(|| format!("opening {file:?}"))?;
    let objects = reader
        .frame_objects(frame)
        .with_context(|| format!("scanning frame {frame}"))?;

    if objects.is_empty() {
        println!("frame {frame}: no object records");
        return Ok(());
    }

    println!("  {:>10}  {}", "vertices", "object");
    println!("  {}", "-".repeat(40));
    for object in &objects {
        println!("  {:>10}  {}", object.vertex_count, object.name);
    }
    Ok(())
}

fn run_extract(
    file: PathBuf,
    frame: u32,
    object: String,
    vertices: Option<u32>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let reader = VdispReader::open(&file).with_context(|| format!("opening {file:?}"))?;

    // No target count given: take the stored count from the record itself.
    let target = match vertices {
        Some(v) => v,
        None => reader
            .frame_objects(frame)?
            .into_iter()
            .find(|info| info.name == object)
            .map(|info| info.vertex_count)
            .unwrap_or(0),
    };

    let t0 = Instant::now();
    let data = reader
        .load_frame(frame, &object, target)
        .with_context(|| format!("loading frame {frame}"))?;
    let elapsed = t0.elapsed();

    if !data.found {
        eprintln!("warning: object '{object}' not found in frame {frame}; output is all zeros");
    } else if let Some(stored) = data.stored_vertex_count {
        if stored != target {
            eprintln!("warning: object stores {stored} vertices but target is {target}");
        }
    }
    eprintln!(
        "  decoded {} vectors in {:.3}ms",
        data.displacements.len(),
        elapsed.as_secs_f64() * 1000.0
    );

    match output {
        Some(path) => {
            let mut dst = File::create(&path).with_context(|| format!("creating {path:?}"))?;
            for [x, y, z] in &data.displacements {
                dst.write_all(&x.to_le_bytes())?;
                dst.write_all(&y.to_le_bytes())?;
                dst.write_all(&z.to_le_bytes())?;
            }
            eprintln!("  written to {path:?}");
        }
        None => {
            for (i, [x, y, z]) in data.displacements.iter().enumerate() {
                println!("  {i:>8}  {x:>12.6}  {y:>12.6}  {z:>12.6}");
            }
        }
    }

    Ok(())
}

fn run_bench(file: PathBuf, object: String, vertices: u32, count: u64, seed: u64) -> anyhow::Result<()> {
    let reader = VdispReader::open(&file).with_context(|| format!("opening {file:?}"))?;

    let present: Vec<u32> = (0..reader.frame_count())
        .filter(|&f| reader.has_frame(f))
        .collect();
    if present.is_empty() {
        anyhow::bail!("file has no frames with data");
    }

    // Simple LCG for reproducible random frame indices (no external dep)
    let indices: Vec<u32> = {
        let mut rng = seed;
        (0..count)
            .map(|_| {
                rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                present[((rng >> 33) % present.len() as u64) as usize]
            })
            .collect()
    };

    eprintln!(
        "benchmarking {} random frame loads across {} present frames...",
        count,
        present.len()
    );

    let t0 = Instant::now();
    let mut found = 0u64;
    let mut latencies_us: Vec<u64> = Vec::with_capacity(count as usize);

    for &frame in &indices {
        let t = Instant::now();
        let data = reader.load_frame(frame, &object, vertices)?;
        latencies_us.push(t.elapsed().as_micros() as u64);
        if data.found {
            found += 1;
        }
    }

    let elapsed = t0.elapsed();
    latencies_us.sort_unstable();

    let p50 = latencies_us[latencies_us.len() / 2];
    let p95 = latencies_us[(latencies_us.len() as f64 * 0.95) as usize];
    let p99 = latencies_us[(latencies_us.len() as f64 * 0.99) as usize];

    println!();
    println!("  loads        : {count}");
    println!("  object found : {found}");
    println!("  elapsed      : {:.3}s", elapsed.as_secs_f64());
    println!("  loads/sec    : {:.0}", count as f64 / elapsed.as_secs_f64());
    println!("  p50 latency  : {p50} µs");
    println!("  p95 latency  : {p95} µs");
    println!("  p99 latency  : {p99} µs");
    println!("  min / max    : {} µs / {} µs", latencies_us[0], latencies_us[latencies_us.len() - 1]);

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect { file, frames } => run_inspect(file, frames),
        Commands::Objects { file, frame } => run_objects(file, frame),
        Commands::Extract {
            file,
            frame,
            object,
            vertices,
            output,
        } => run_extract(file, frame, object, vertices, output),
        Commands::Bench {
            file,
            object,
            vertices,
            count,
            seed,
        } => run_bench(file, object, vertices, count, seed),
    }
}
