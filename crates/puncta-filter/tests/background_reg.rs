//! Background subtraction regression test
//!
//! Tests:
//!   (1) a descending ramp, where the median exceeds the sample near one
//!       edge, is clamped at 0 and never wraps around
//!   (2) the residual never exceeds the input (random volumes)
//!   (3) a bright punctum on a smooth cell survives subtraction

use puncta_core::{Dims3, SampleDepth, Volume};
use puncta_filter::{median_filter_slices, subtract_background};
use puncta_test::RegParams;
use puncta_test::synth::{CellPhantom, descending_ramp};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Test 1: Descending ramp along X.
#[test]
fn background_reg_ramp() {
    let mut rp = RegParams::new("background_ramp");

    let dims = Dims3::new(2, 6, 12);
    let ramp = descending_ramp(dims, 3000, 200).unwrap();
    let spot = subtract_background(&ramp, 3).unwrap();

    let max = spot.data().iter().copied().max().unwrap_or(0);
    eprintln!("  max residual = {max}");
    rp.check(max <= 3000, "no wraparound above the input maximum");
    rp.check(
        spot.data().iter().all(|&v| v < u16::MAX / 2),
        "no sample near the unsigned maximum",
    );

    // The right edge is darker than its reflected window
    for z in 0..dims.depth {
        for y in 0..dims.height {
            rp.compare_values(0.0, spot.get(z, y, 11).unwrap_or(u16::MAX) as f64, 0.0);
        }
    }
    // Interior windows are symmetric on a linear ramp
    rp.compare_values(0.0, spot.get(0, 3, 6).unwrap_or(u16::MAX) as f64, 0.0);
    // The left edge is brighter than its reflected window
    rp.check(spot.get(0, 3, 0).unwrap_or(0) > 0, "left edge keeps a residual");

    assert!(rp.cleanup(), "background_ramp regression test failed");
}

/// Test 2: Residual bounded by the input on random volumes.
#[test]
fn background_reg_random_bounds() {
    let mut rp = RegParams::new("background_random");
    let mut rng = StdRng::seed_from_u64(42);

    for radius in [1, 2, 5] {
        let dims = Dims3::new(3, rng.random_range(4..16), rng.random_range(4..16));
        let data: Vec<u16> = (0..dims.len()).map(|_| rng.random_range(0..4096)).collect();
        let vol = Volume::from_vec(dims, SampleDepth::Bit12, data).unwrap();

        let spot = subtract_background(&vol, radius).unwrap();
        let bg = median_filter_slices(&vol, radius).unwrap();
        let ok = vol
            .data()
            .iter()
            .zip(bg.data())
            .zip(spot.data())
            .all(|((&v, &b), &s)| s == v.saturating_sub(b) && s <= v);
        rp.check(ok, &format!("radius {radius}: residual = max(v - median, 0)"));
        rp.check(spot.sample_depth() == SampleDepth::Bit12, "sample depth kept");
        rp.check(spot.dims() == dims, "shape kept");
    }

    assert!(rp.cleanup(), "background_random regression test failed");
}

/// Test 3: A punctum on a phantom cell.
#[test]
fn background_reg_phantom() {
    let mut rp = RegParams::new("background_phantom");

    let vol = CellPhantom::new(Dims3::new(5, 41, 41), 15)
        .with_spot(2, 20, 20)
        .build()
        .unwrap();
    let spot = subtract_background(&vol, 10).unwrap();

    // Spot block: 3000 above the cell level of 400
    rp.compare_values(3000.0, spot.get(2, 20, 20).unwrap_or(0) as f64, 0.0);
    // Cell body far from the spot and the rim is flat
    rp.compare_values(0.0, spot.get(0, 20, 20).unwrap_or(u16::MAX) as f64, 0.0);
    // Background far outside the cell
    rp.compare_values(0.0, spot.get(2, 0, 0).unwrap_or(u16::MAX) as f64, 0.0);

    assert!(rp.cleanup(), "background_phantom regression test failed");
}
