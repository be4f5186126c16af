//! Quick throughput verification - run with: cargo run --release --example throughput
use std::io::Cursor;
use std::time::Instant;

use sealframe::{open_stream, seal_stream, CodecConfig, MasterKey};

fn bench_size(size: usize, iterations: usize) {
    // Pseudo-random payload so GCM sees realistic data
    let data: Vec<u8> = (0..size).map(|i| ((i * 17 + 31) % 256) as u8).collect();

    let size_label = if size >= 1024 * 1024 {
        format!("{}MB", size / 1024 / 1024)
    } else if size >= 1024 {
        format!("{}KB", size / 1024)
    } else {
        format!("{}B", size)
    };

    println!("\n=== {} payload, {} iterations ===", size_label, iterations);

    let master = MasterKey::generate().expect("system rng");
    let config = CodecConfig::default();

    // Seal
    let mut sealed = Vec::new();
    {
        let start = Instant::now();
        for _ in 0..iterations {
            sealed.clear();
            seal_stream(Cursor::new(&data), &mut sealed, &master, "bench", &config)
                .expect("seal");
        }
        let elapsed = start.elapsed();
        let bytes_per_sec = (size * iterations) as f64 / elapsed.as_secs_f64();
        println!("seal:   {:.2} GB/s", bytes_per_sec / 1e9);
    }

    // Open
    {
        let mut opened = Vec::with_capacity(size);
        let start = Instant::now();
        for _ in 0..iterations {
            opened.clear();
            open_stream(Cursor::new(&sealed), &mut opened, &master, "bench", &config)
                .expect("open");
        }
        let elapsed = start.elapsed();
        let bytes_per_sec = (size * iterations) as f64 / elapsed.as_secs_f64();
        println!("open:   {:.2} GB/s", bytes_per_sec / 1e9);
        assert_eq!(opened, data);
    }
}

fn main() {
    bench_size(64 * 1024, 200);
    bench_size(1024 * 1024, 50);
    bench_size(16 * 1024 * 1024, 5);
}
