use std::env;
use std::path::Path;
use std::process;

use file_compressor::domains::compression::compressors::{compress_file, file_extension};
use file_compressor::domains::compression::types::{reduction_percentage, DEFAULT_QUALITY};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: {} <input> <output> [quality 1-100]", args[0]);
        process::exit(1);
    }

    let input = Path::new(&args[1]);
    let output = Path::new(&args[2]);
    let quality = match args.get(3).map(|q| q.parse::<i32>()) {
        Some(Ok(q)) => q,
        Some(Err(e)) => {
            eprintln!("❌ Invalid quality '{}': {}", args[3], e);
            process::exit(1);
        }
        None => DEFAULT_QUALITY,
    };

    if let Err(e) = run(input, output, quality) {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

fn run(input: &Path, output: &Path, quality: i32) -> Result<(), Box<dyn std::error::Error>> {
    let extension = file_extension(&input.to_string_lossy());
    let original_size = std::fs::metadata(input)?.len();

    compress_file(input, output, quality, &extension)?;

    let compressed_size = std::fs::metadata(output)?.len();
    println!("📄 {}", input.display());
    println!("   original:   {}", format_bytes(original_size));
    println!("   compressed: {}", format_bytes(compressed_size));
    println!("   reduction:  {:.2}%", reduction_percentage(original_size, compressed_size));

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
