//! Patch counting pipeline regression test
//!
//! Tests:
//!   (1) synthetic cell with two puncta: count, threshold, area
//!   (2) labelling connectivity decides whether touching puncta merge
//!   (3) convergence mode and pass ceilings
//!   (4) threshold restricted to the cell mask, from a second channel
//!   (5) saturated input and mismatched mask channels are rejected first
//!   (6) tiny volumes where the residual is the input itself, and a run
//!       with nothing to measure fails instead of reporting a partial result

use puncta_core::{Connectivity, Dims3, SampleDepth, Volume};
use puncta_count::{CellMaskOptions, CountError, PatchCountOptions, count_patches, estimate_area};
use puncta_test::RegParams;
use puncta_filter::subtract_background;
use puncta_morph::{ErosionOptions, erode};
use puncta_region::label_and_count;
use puncta_test::synth::{CellPhantom, binary_box};
use puncta_threshold::{ThresholdError, ThresholdMethod, binarize, threshold};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 5 slices of a radius-10 cell on a 32x32 plane.
fn cell() -> CellPhantom {
    CellPhantom::new(Dims3::new(5, 32, 32), 10)
}

/// Default options with a mask radius small enough to keep the disk whole.
fn options() -> PatchCountOptions {
    PatchCountOptions::new().with_mask(CellMaskOptions::new().with_radius(3))
}

/// Test 1: Two well separated puncta inside one cell.
#[test]
fn pipeline_reg_phantom() {
    let mut rp = RegParams::new("pipeline_phantom");
    let phantom = cell().with_spot(2, 12, 12).with_spot(2, 20, 20);
    let vol = phantom.build().unwrap();

    let report = count_patches(&vol, None, &options()).unwrap();
    rp.compare_values(2.0, report.count as f64, 0.0);
    // The residual keeps the 300-level rim of the disk; the puncta sit
    // far above it
    rp.compare_values(300.0, report.threshold, 0.0);
    rp.compare_values(54.0, report.binary.count_foreground() as f64, 0.0);
    // Every punctum voxel has at least 7 punctum neighbours
    rp.compare_binary(&report.binary, &report.eroded);
    rp.compare_values(1.0, report.erosion_passes as f64, 0.0);
    rp.check(report.erosion_converged, "nothing removed in the single pass");
    rp.compare_values(2.0, report.labels.count() as f64, 0.0);

    // The area mask is median filtered with the background radius 10,
    // which shrinks the 317-pixel disk to 205
    rp.compare_values(phantom.disk_area() as f64, 317.0, 0.0);
    rp.compare_values(205.0, report.area as f64, 0.0);

    // Otsu agrees on this residual
    let opts = options().with_method(ThresholdMethod::Otsu);
    let otsu = count_patches(&vol, None, &opts).unwrap();
    rp.compare_values(2.0, otsu.count as f64, 0.0);
    rp.compare_values(300.0, otsu.threshold, 0.0);

    // The cell mask radius only reaches the threshold domain
    let report = count_patches(&vol, None, &PatchCountOptions::new()).unwrap();
    rp.compare_values(2.0, report.count as f64, 0.0);
    rp.compare_values(205.0, report.area as f64, 0.0);

    // A radius-3 background median measures the area with radius 3 too,
    // which only rounds off 4 pixels of the disk
    let opts = PatchCountOptions::new().with_median_radius(3);
    let report = count_patches(&vol, None, &opts).unwrap();
    rp.compare_values(313.0, report.area as f64, 0.0);
    let expected = estimate_area(&vol, 3).unwrap();
    rp.compare_values(expected as f64, report.area as f64, 0.0);
    // Yen keeps the 20 rim voxels the small median leaves behind; erosion
    // strips them and the puncta remain
    rp.compare_values(0.0, report.threshold, 0.0);
    rp.compare_values(74.0, report.binary.count_foreground() as f64, 0.0);
    rp.compare_values(54.0, report.eroded.count_foreground() as f64, 0.0);
    rp.compare_values(2.0, report.count as f64, 0.0);

    assert!(rp.cleanup(), "pipeline_phantom regression test failed");
}

/// Test 2: Puncta touching along an edge or at a corner.
#[test]
fn pipeline_reg_connectivity() {
    let mut rp = RegParams::new("pipeline_connectivity");

    // Blocks sharing only an in-plane diagonal edge
    let vol = cell().with_spot(2, 12, 12).with_spot(2, 15, 15).build().unwrap();
    for (c, expected) in [
        (Connectivity::Six, 2.0),
        (Connectivity::Eighteen, 1.0),
        (Connectivity::TwentySix, 1.0),
    ] {
        let report = count_patches(&vol, None, &options().with_connectivity(c)).unwrap();
        rp.compare_values(expected, report.count as f64, 0.0);
    }

    // Blocks meeting at a single corner; the second is clipped by the last slice
    let vol = cell().with_spot(1, 12, 12).with_spot(4, 15, 15).build().unwrap();
    for (c, expected) in [
        (Connectivity::Six, 2.0),
        (Connectivity::Eighteen, 2.0),
        (Connectivity::TwentySix, 1.0),
    ] {
        let report = count_patches(&vol, None, &options().with_connectivity(c)).unwrap();
        rp.compare_values(expected, report.count as f64, 0.0);
        rp.compare_values(45.0, report.binary.count_foreground() as f64, 0.0);
    }

    assert!(rp.cleanup(), "pipeline_connectivity regression test failed");
}

/// Test 3: Erosion settings as seen through the pipeline.
#[test]
fn pipeline_reg_loop() {
    let mut rp = RegParams::new("pipeline_loop");
    let vol = cell().with_spot(2, 12, 12).with_spot(2, 20, 20).build().unwrap();

    // n = 8 strips the 8 corners of each block, then stabilises
    let opts = options().with_erosion_n(8).with_loop(true);
    let report = count_patches(&vol, None, &opts).unwrap();
    rp.compare_values(38.0, report.eroded.count_foreground() as f64, 0.0);
    rp.compare_values(2.0, report.erosion_passes as f64, 0.0);
    rp.check(report.erosion_converged, "n = 8 converges");
    rp.compare_values(2.0, report.count as f64, 0.0);

    // A single n = 12 pass leaves a 7-voxel cross per block
    let report = count_patches(&vol, None, &options().with_erosion_n(12)).unwrap();
    rp.compare_values(14.0, report.eroded.count_foreground() as f64, 0.0);
    rp.compare_values(2.0, report.count as f64, 0.0);
    rp.check(!report.erosion_converged, "the single n = 12 pass removed voxels");

    // Looping n = 12 wipes the crosses out on the second pass
    let opts = options().with_erosion_n(12).with_loop(true);
    let report = count_patches(&vol, None, &opts).unwrap();
    rp.check(report.eroded.is_all_background(), "n = 12 loop empties the volume");
    rp.compare_values(3.0, report.erosion_passes as f64, 0.0);
    rp.compare_values(0.0, report.count as f64, 0.0);

    // Capped at 2 passes it stops with the volume already empty but unconfirmed
    let capped = options().with_erosion_n(12).with_loop(true).with_max_passes(2);
    let report = count_patches(&vol, None, &capped).unwrap();
    rp.compare_values(2.0, report.erosion_passes as f64, 0.0);
    rp.check(!report.erosion_converged, "ceiling reports non-convergence");
    rp.compare_values(0.0, report.count as f64, 0.0);

    let err = count_patches(&vol, None, &options().with_loop(true).with_max_passes(0));
    rp.check(
        matches!(err, Err(CountError::Morph(_))),
        "a zero pass ceiling is rejected",
    );

    assert!(rp.cleanup(), "pipeline_loop regression test failed");
}

/// Test 4: Threshold computed on the cell interior only.
#[test]
fn pipeline_reg_mask_threshold() {
    let mut rp = RegParams::new("pipeline_mask_threshold");
    let vol = cell().with_spot(2, 12, 12).with_spot(2, 20, 20).build().unwrap();
    let outline = cell().build().unwrap();
    let opts = options().with_mask_for_threshold(true);

    let own = count_patches(&vol, None, &opts).unwrap();
    let channel = count_patches(&vol, Some(&outline), &opts).unwrap();
    for report in [&own, &channel] {
        rp.compare_values(300.0, report.threshold, 0.0);
        rp.compare_values(2.0, report.count as f64, 0.0);
        rp.compare_values(205.0, report.area as f64, 0.0);
    }

    // With a radius-2 mask the puncta outlive the median and the mask
    // shrinks onto them: the interior is a single level
    let narrow = opts.with_mask(CellMaskOptions::new().with_radius(2));
    let err = count_patches(&vol, None, &narrow).unwrap_err();
    rp.check(
        matches!(
            err,
            CountError::Threshold(ThresholdError::DegenerateDistribution(_))
        ),
        "constant interior is degenerate",
    );

    assert!(rp.cleanup(), "pipeline_mask_threshold regression test failed");
}

/// Test 5: Input rejection happens before any processing.
#[test]
fn pipeline_reg_rejects() {
    let mut rp = RegParams::new("pipeline_rejects");
    let mut rng = StdRng::seed_from_u64(4095);
    let dims = Dims3::new(3, 8, 8);

    for _ in 0..10 {
        let data = (0..dims.len()).map(|_| rng.random_range(0..4095)).collect();
        let vol = Volume::from_vec(dims, SampleDepth::Bit12, data).unwrap();
        let mut clipped = vol.to_mut();
        let (z, y, x) = (
            rng.random_range(0..dims.depth),
            rng.random_range(0..dims.height),
            rng.random_range(0..dims.width),
        );
        clipped.set(z, y, x, 4095).unwrap();
        let clipped: Volume = clipped.into();

        let err = count_patches(&clipped, None, &PatchCountOptions::new()).unwrap_err();
        rp.check(err.is_skippable(), "saturated volume is skippable");
        rp.check(
            matches!(err, CountError::SaturatedInput { max_value: 4095, count: 1, .. }),
            "saturation error carries the depth maximum",
        );
    }

    // The same value is fine at 16 bits
    let vol = cell().with_spot(2, 12, 12).build().unwrap();
    rp.check(
        count_patches(&vol, None, &options()).is_ok(),
        "16-bit phantom is accepted",
    );

    let other = Volume::new(Dims3::new(5, 32, 31), SampleDepth::Bit16).unwrap();
    let err = count_patches(&vol, Some(&other), &options()).unwrap_err();
    rp.check(!err.is_skippable(), "shape mismatch is a real error");
    rp.check(
        matches!(err, CountError::Core(puncta_core::Error::ShapeMismatch { .. })),
        "mismatched mask channel",
    );

    // Rejection does not depend on the threshold domain being used
    let err = count_patches(&vol, Some(&other), &options().with_mask_for_threshold(false));
    rp.check(err.is_err(), "mismatch rejected without mask thresholding");

    assert!(rp.cleanup(), "pipeline_rejects regression test failed");
}

/// Test 6: Volumes too small for the median to see any structure.
///
/// The radius-10 median of a 5x5 slice covers the reflected plane many
/// times, so it returns the background: the residual is the input, and the
/// projected area mask is flat.
#[test]
fn pipeline_reg_tiny() {
    let mut rp = RegParams::new("pipeline_tiny");
    let dims = Dims3::new(5, 5, 5);

    // 3x3x3 cube, n = 26: the stages keep only the centre
    let cube = binary_box(dims, (1, 1, 1), (4, 4, 4)).unwrap();
    let data = cube.data().iter().map(|&b| b as u16).collect();
    let vol = Volume::from_vec(dims, SampleDepth::Bit16, data).unwrap();
    let spot = subtract_background(&vol, 10).unwrap();
    rp.compare_volumes(&vol, &spot);
    let t = threshold(spot.data(), ThresholdMethod::Otsu).unwrap();
    rp.compare_values(0.0, t, 0.0);
    let eroded = erode(&binarize(&spot, t).unwrap(), &ErosionOptions::new(26)).unwrap();
    rp.compare_values(1.0, eroded.volume.count_foreground() as f64, 0.0);
    let (_, count) = label_and_count(&eroded.volume, Connectivity::Eighteen).unwrap();
    rp.compare_values(1.0, count as f64, 0.0);

    // Lone centre voxel, n = 1, 26-connectivity: the stages yield no patch
    let mut single = Volume::new(dims, SampleDepth::Bit16).unwrap().to_mut();
    single.set(2, 2, 2, 1).unwrap();
    let single: Volume = single.into();
    let spot = subtract_background(&single, 10).unwrap();
    rp.compare_volumes(&single, &spot);
    let t = threshold(spot.data(), ThresholdMethod::Yen).unwrap();
    rp.compare_values(0.0, t, 0.0);
    let binary = binarize(&spot, t).unwrap();
    rp.compare_values(1.0, binary.count_foreground() as f64, 0.0);
    let eroded = erode(&binary, &ErosionOptions::new(1)).unwrap();
    rp.check(eroded.volume.is_all_background(), "no neighbours, no survivor");
    let (_, count) = label_and_count(&eroded.volume, Connectivity::TwentySix).unwrap();
    rp.compare_values(0.0, count as f64, 0.0);

    // The full runs also need a cell to measure, so they fail rather than
    // report a count alone
    let cube_opts = PatchCountOptions::new()
        .with_method(ThresholdMethod::Otsu)
        .with_erosion_n(26);
    let single_opts = PatchCountOptions::new()
        .with_erosion_n(1)
        .with_connectivity(Connectivity::TwentySix);
    for (input, opts) in [(&vol, cube_opts), (&single, single_opts)] {
        match count_patches(input, None, &opts) {
            Err(CountError::Threshold(ThresholdError::DegenerateDistribution(_))) => {
                rp.check(true, "flat area mask");
            }
            other => {
                rp.check(false, &format!("unexpected outcome {other:?}"));
            }
        }
    }

    assert!(rp.cleanup(), "pipeline_tiny regression test failed");
}
