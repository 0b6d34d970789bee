//! Cell measurement regression test
//!
//! Tests:
//!   (1) cell masks per voxel and on the projection
//!   (2) masked intensities, their summary and skew
//!   (3) exceedance curve, raw, rescaled and on 8-bit data
//!   (4) input rejection

use puncta_core::{Dims3, SampleDepth, Volume};
use puncta_count::{
    CellMask, CellMaskOptions, CountError, ExceedanceOptions, estimate_area, exceedance_curve,
    mask_cell, masked_intensities,
};
use puncta_test::RegParams;
use puncta_test::synth::CellPhantom;
use puncta_threshold::{ThresholdError, ThresholdMethod};

/// Radius-10 cell over 5 slices with two puncta centred on z = 2.
fn phantom() -> CellPhantom {
    CellPhantom::new(Dims3::new(5, 32, 32), 10)
        .with_spot(2, 12, 12)
        .with_spot(2, 20, 20)
}

fn mask_options() -> CellMaskOptions {
    CellMaskOptions::new().with_radius(3)
}

/// Test 1: Masks of a uniform disk.
#[test]
fn measure_reg_mask() {
    let mut rp = RegParams::new("measure_mask");
    let vol = phantom().build().unwrap();

    let mask = mask_cell(&vol, &mask_options()).unwrap();
    rp.check(matches!(mask, CellMask::Volume(_)), "per-voxel mask");
    rp.compare_values(5.0 * 313.0, mask.count_foreground() as f64, 0.0);

    let plane = mask_cell(&vol, &mask_options().with_project(true)).unwrap();
    rp.check(plane.as_plane().is_some(), "projected mask");
    rp.compare_values(313.0, plane.count_foreground() as f64, 0.0);
    rp.compare_values(313.0, estimate_area(&vol, 3).unwrap() as f64, 0.0);

    // Every slice is the same disk, so projecting the 3D mask gives the
    // projected mask
    let projected = mask.as_volume().unwrap().max_project().unwrap();
    rp.check(
        Some(&projected) == plane.as_plane(),
        "projection of the voxel mask matches the projected mask",
    );

    // Opening with a small cross does not change a large disk's count much
    let opened = mask_cell(&vol, &mask_options().with_project(true).with_open(true)).unwrap();
    rp.check(
        opened.count_foreground() <= plane.count_foreground(),
        "opening never grows the mask",
    );

    assert!(rp.cleanup(), "measure_mask regression test failed");
}

/// Test 2: Intensities of the voxels inside the cell.
#[test]
fn measure_reg_intensities() {
    let mut rp = RegParams::new("measure_intensities");
    let vol = phantom().build().unwrap();
    let outline = CellPhantom::new(Dims3::new(5, 32, 32), 10).build().unwrap();

    let own = masked_intensities(&vol, None, &mask_options()).unwrap();
    let channel = masked_intensities(&vol, Some(&outline), &mask_options()).unwrap();
    rp.check(own == channel, "outline channel selects the same voxels");

    // 1511 cell voxels at 400 and the 54 punctum voxels at 3400
    rp.compare_values(1565.0, own.len() as f64, 0.0);
    let bright = own.values().iter().filter(|&&v| v == 3400).count();
    rp.compare_values(54.0, bright as f64, 0.0);

    let summary = own.summary().unwrap();
    let mean = (1511.0 * 400.0 + 54.0 * 3400.0) / 1565.0;
    let var = (1511.0 * (400.0f64 - mean).powi(2) + 54.0 * (3400.0f64 - mean).powi(2)) / 1565.0;
    rp.compare_values(mean, summary.mean, 1e-9);
    rp.compare_values(400.0, summary.median, 0.0);
    rp.compare_values(var.sqrt(), summary.std_dev, 1e-9);
    // The puncta are a bright tail: the mean sits above the median
    let skew = summary.skew().unwrap_or(f64::NAN);
    rp.compare_values((mean - 400.0) / var.sqrt(), skew, 1e-9);
    rp.compare_values(0.189, skew, 1e-3);

    let unit = own.rescaled().unwrap();
    rp.compare_values(54.0, unit.iter().filter(|&&v| v == 1.0).count() as f64, 0.0);
    rp.compare_values(1511.0, unit.iter().filter(|&&v| v == 0.0).count() as f64, 0.0);

    // Triangle with opening finds the same disk: the median leaves only the
    // 100 and 400 levels, and a cross fits everywhere along its rim
    let opts = CellMaskOptions::for_intensities().with_radius(3);
    rp.check(opts.method == ThresholdMethod::Triangle && opts.open, "intensity defaults");
    let triangle = masked_intensities(&vol, None, &opts).unwrap();
    rp.check(triangle == own, "triangle mask matches");

    // A cell without puncta has no skew
    let plain = masked_intensities(&outline, None, &mask_options()).unwrap();
    rp.check(plain.summary().unwrap().skew().is_none(), "uniform cell");

    assert!(rp.cleanup(), "measure_intensities regression test failed");
}

/// Test 3: Probability that a projected cell pixel reaches each level.
#[test]
fn measure_reg_exceedance() {
    let mut rp = RegParams::new("measure_exceedance");
    let vol = phantom().build().unwrap();
    let options = ExceedanceOptions::new().with_mask(mask_options());

    // Projection inside the mask: 295 pixels at 400, 18 at 3400
    let tail = 18.0 / 313.0;
    let curve = exceedance_curve(&vol, &options).unwrap();
    rp.compare_values(3001.0, curve.len() as f64, 0.0);
    rp.compare_values(400.0, curve[0].0, 0.0);
    rp.compare_values(1.0, curve[0].1, 1e-12);
    rp.compare_values(tail, curve[1].1, 1e-12);
    let last = curve[curve.len() - 1];
    rp.compare_values(3400.0, last.0, 0.0);
    rp.compare_values(tail, last.1, 1e-12);
    rp.check(
        curve.windows(2).all(|w| w[1].1 <= w[0].1),
        "exceedance never increases",
    );

    let rescaled = exceedance_curve(&vol, &options.with_rescale(true)).unwrap();
    let integral = 1.0 + 3000.0 * tail;
    rp.compare_values(0.0, rescaled[0].0, 0.0);
    rp.compare_values(3000.0 / integral, rescaled[3000].0, 1e-9);
    rp.compare_values(tail, rescaled[3000].1, 1e-12);

    // 8-bit stretch maps 100 -> 0, 400 -> 23 and 3400 -> 255
    let curve = exceedance_curve(&vol, &options.with_eight_bit(true)).unwrap();
    rp.compare_values(233.0, curve.len() as f64, 0.0);
    rp.compare_values(23.0, curve[0].0, 0.0);
    rp.compare_values(255.0, curve[232].0, 0.0);
    rp.compare_values(tail, curve[232].1, 1e-12);

    assert!(rp.cleanup(), "measure_exceedance regression test failed");
}

/// Test 4: Saturated, mismatched and structureless inputs.
#[test]
fn measure_reg_rejects() {
    let mut rp = RegParams::new("measure_rejects");

    let clipped = phantom()
        .with_sample_depth(SampleDepth::Bit12)
        .build()
        .unwrap();
    let mut clipped = clipped.to_mut();
    clipped.set(0, 0, 0, 4095).unwrap();
    let clipped: Volume = clipped.into();
    let err = masked_intensities(&clipped, None, &mask_options()).unwrap_err();
    rp.check(err.is_skippable(), "saturated volume is skipped");

    let vol = phantom().build().unwrap();
    let other = Volume::new(Dims3::new(4, 32, 32), SampleDepth::Bit16).unwrap();
    let err = masked_intensities(&vol, Some(&other), &mask_options()).unwrap_err();
    rp.check(
        matches!(err, CountError::Core(puncta_core::Error::ShapeMismatch { .. })),
        "mask channel shape is checked",
    );

    let flat = Volume::from_vec(
        Dims3::new(2, 8, 8),
        SampleDepth::Bit16,
        vec![250; 128],
    )
    .unwrap();
    let err = exceedance_curve(&flat, &ExceedanceOptions::new()).unwrap_err();
    rp.check(
        matches!(
            err,
            CountError::Threshold(ThresholdError::DegenerateDistribution(_))
        ),
        "flat volume has no cell",
    );

    assert!(rp.cleanup(), "measure_rejects regression test failed");
}
