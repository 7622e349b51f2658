//! # Bounded Ring Demo
//!
//! Shows the two write modes and two read modes side by side.
//!
//! Run with: `cargo run --example demo`

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use bounded_ring::{BufferConfig, RingBufferError, SharedRingBuffer};

const CAPACITY: usize = 5;
const SAMPLES: usize = 40;

fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    bounded_ring::init_logging();

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║           Bounded Ring Demo                                ║");
    println!("╠════════════════════════════════════════════════════════════╣");
    println!("║ 1. A fast producer overwrites, a slow consumer polls.      ║");
    println!("║ 2. A fast producer blocks, a slow consumer waits.          ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    overwrite_and_poll()?;
    println!();
    block_and_wait()?;

    println!();
    println!("👋 Demo complete!");
    Ok(())
}

/// Producer outpaces the consumer; old samples are lost, reads may miss.
fn overwrite_and_poll() -> anyhow::Result<()> {
    let buffer = Arc::new(
        SharedRingBuffer::with_config(BufferConfig::with_capacity(CAPACITY))
            .context("building overwrite buffer")?,
    );

    let producer = {
        let buffer = Arc::clone(&buffer);
        thread::spawn(move || {
            for i in 0..SAMPLES {
                buffer.put_overwrite(i);
                thread::sleep(Duration::from_millis(5));
            }
        })
    };

    let mut consumed = Vec::new();
    for _ in 0..SAMPLES / 2 {
        thread::sleep(Duration::from_millis(12));
        match buffer.get_or_fail() {
            Ok(value) => consumed.push(value),
            Err(RingBufferError::EmptyBuffer) => println!("   (empty read)"),
            Err(e) => return Err(e).context("polling buffer"),
        }
    }

    producer
        .join()
        .map_err(|_| anyhow::anyhow!("overwrite producer panicked"))?;

    let stats = buffer.stats();
    println!("📼 put_overwrite + get_or_fail");
    println!("   Consumed: {:?}", consumed);
    println!("   Left in buffer: {:?}", buffer.snapshot());
    println!("   Writes: {}  Reads: {}", stats.writes, stats.reads);
    println!("   Overwritten: {}  Empty reads: {}", stats.overwritten, stats.empty_reads);
    Ok(())
}

/// Producer outpaces the consumer; the producer is held back instead.
fn block_and_wait() -> anyhow::Result<()> {
    let buffer = Arc::new(SharedRingBuffer::new(CAPACITY));

    let producer = {
        let buffer = Arc::clone(&buffer);
        thread::spawn(move || {
            for i in 0..SAMPLES {
                buffer.put_blocking(i);
            }
        })
    };

    let mut consumed = Vec::with_capacity(SAMPLES);
    for _ in 0..SAMPLES {
        thread::sleep(Duration::from_millis(2));
        consumed.push(buffer.get_blocking());
    }

    producer
        .join()
        .map_err(|_| anyhow::anyhow!("blocking producer panicked"))?;

    let stats = buffer.stats();
    println!("⏸️  put_blocking + get_blocking");
    println!("   Consumed {} of {} in order: {}", consumed.len(), SAMPLES, is_sorted(&consumed));
    println!("   Writes: {}  Reads: {}", stats.writes, stats.reads);
    println!("   Overwritten: {}", stats.overwritten);
    Ok(())
}

fn is_sorted(values: &[usize]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
