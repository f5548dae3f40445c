// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mean-shift refinement of a synthetic noisy image.
//!
//! Paints three noisy color bands, refines them, and recolors the clusters.
//! Optional arguments override the kernel window and stop threshold.
//!
//! Run:
//! - `cargo run -p understory_demos --example mean_shift_synthetic`
//! - `RUST_LOG=debug cargo run -p understory_demos --example mean_shift_synthetic -- 20 0.25`

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use understory_mean_shift::{ColorImage, MeanShift, MeanShiftConfig, Rgb, recolor_clusters};

const WIDTH: usize = 48;
const HEIGHT: usize = 36;

fn noisy(rng: &mut ChaCha8Rng, base: Rgb, spread: i16) -> Rgb {
    base.map(|c| {
        let v = i16::from(c) + rng.gen_range(-spread..=spread);
        u8::try_from(v.clamp(0, 255)).unwrap_or(u8::MAX)
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = MeanShiftConfig::default();
    if let Some(window) = args.next().and_then(|a| a.parse().ok()) {
        config = config.with_window(window);
    }
    if let Some(stop_delta) = args.next().and_then(|a| a.parse().ok()) {
        config = config.with_stop_delta(stop_delta);
    }

    let bands: [Rgb; 3] = [[30, 60, 150], [200, 180, 40], [90, 160, 90]];
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let pixels: Vec<Rgb> = (0..WIDTH * HEIGHT)
        .map(|i| {
            let band = (i / WIDTH) * bands.len() / HEIGHT;
            noisy(&mut rng, bands[band], 12)
        })
        .collect();
    let mut image = ColorImage::new(WIDTH, HEIGHT, pixels).expect("buffer matches dimensions");
    println!("input: {} distinct colors", image.distinct_colors());

    let shift = match MeanShift::new(config) {
        Ok(shift) => shift,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let outcome = match shift.refine(&mut image) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("refinement failed: {err}");
            std::process::exit(1);
        }
    };
    println!(
        "refined in {} iterations (converged: {}, last mean displacement {:.3})",
        outcome.iterations, outcome.converged, outcome.mean_displacement
    );

    let clusters = recolor_clusters(&mut image, &mut rng);
    println!("{clusters} clusters");
    for (y, row) in image.rows().enumerate().step_by(HEIGHT / 6) {
        println!("row {y:2}: {:?} .. {:?}", row[0], row[WIDTH - 1]);
    }
}
