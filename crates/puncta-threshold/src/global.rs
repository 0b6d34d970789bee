//! Histogram-based global thresholds
//!
//! All four methods work on an exact integer [`Histogram`] (one bin per
//! intensity between the smallest and the largest sample) and return a
//! cutoff in the sample domain. Foreground is `sample > threshold`, so
//! Otsu and Yen return the last intensity of the lower class.
//!
//! A histogram with a single bin (no samples, or all samples equal,
//! including an all-zero residual) has no meaningful split and is
//! rejected with [`ThresholdError::DegenerateDistribution`].

use crate::error::{ThresholdError, ThresholdResult};
use crate::method::ThresholdMethod;
use puncta_core::Histogram;

/// Select a threshold for `samples` with `method`.
///
/// # Errors
///
/// Returns [`ThresholdError::DegenerateDistribution`] if `samples` is
/// empty or constant.
pub fn threshold(samples: &[u16], method: ThresholdMethod) -> ThresholdResult<f64> {
    if samples.is_empty() {
        return Err(ThresholdError::DegenerateDistribution(
            "no samples".to_string(),
        ));
    }
    let hist = Histogram::from_samples(samples)?;
    threshold_histogram(&hist, method)
}

/// Select a threshold from a prebuilt histogram.
pub fn threshold_histogram(hist: &Histogram, method: ThresholdMethod) -> ThresholdResult<f64> {
    check_spread(hist)?;
    let t = match method {
        ThresholdMethod::Li => li(hist)?,
        ThresholdMethod::Otsu => otsu(hist)?,
        ThresholdMethod::Triangle => triangle(hist)?,
        ThresholdMethod::Yen => yen(hist)?,
    };
    log::debug!(
        "{} threshold {:.3} over {} samples in [{}, {}]",
        method,
        t,
        hist.total(),
        hist.min(),
        hist.max()
    );
    Ok(t)
}

fn check_spread(hist: &Histogram) -> ThresholdResult<()> {
    if hist.is_constant() {
        return Err(ThresholdError::DegenerateDistribution(format!(
            "all {} samples equal {}",
            hist.total(),
            hist.min()
        )));
    }
    Ok(())
}

/// Index of the first maximum, ignoring NaN.
fn argmax(values: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Otsu's method.
///
/// For each split after bin `i`, the between-class variance is
/// `w0 * w1 * (m0 - m1)^2` with `w0`, `m0` the count and mean of bins
/// `0..=i` and `w1`, `m1` those of the remaining bins. The first split
/// with the largest variance wins.
pub fn otsu(hist: &Histogram) -> ThresholdResult<f64> {
    check_spread(hist)?;
    let counts = hist.counts();
    let nbins = counts.len();

    // Cumulative count and first moment from below, then from above.
    let mut w_lo = vec![0.0f64; nbins];
    let mut m_lo = vec![0.0f64; nbins];
    let (mut w, mut s) = (0.0, 0.0);
    for i in 0..nbins {
        w += counts[i] as f64;
        s += counts[i] as f64 * hist.value(i);
        w_lo[i] = w;
        m_lo[i] = s / w;
    }

    let mut w_hi = vec![0.0f64; nbins];
    let mut m_hi = vec![0.0f64; nbins];
    let (mut w, mut s) = (0.0, 0.0);
    for i in (0..nbins).rev() {
        w += counts[i] as f64;
        s += counts[i] as f64 * hist.value(i);
        w_hi[i] = w;
        m_hi[i] = s / w;
    }

    let idx = argmax((0..nbins - 1).map(|i| {
        let d = m_lo[i] - m_hi[i + 1];
        w_lo[i] * w_hi[i + 1] * d * d
    }))
    .ok_or_else(|| ThresholdError::DegenerateDistribution("otsu found no split".into()))?;

    Ok(hist.value(idx))
}

/// Yen's maximum correlation criterion.
///
/// With `P` the cumulative probability up to bin `i` and `S0`, `S1` the sums
/// of squared probabilities below and above the split, the criterion is
/// `ln((P * (1 - P))^2 / (S0 * S1))`.
pub fn yen(hist: &Histogram) -> ThresholdResult<f64> {
    check_spread(hist)?;
    let pmf = hist.probabilities();
    let nbins = pmf.len();

    let mut p1 = vec![0.0f64; nbins];
    let mut p1_sq = vec![0.0f64; nbins];
    let (mut acc, mut acc_sq) = (0.0, 0.0);
    for i in 0..nbins {
        acc += pmf[i];
        acc_sq += pmf[i] * pmf[i];
        p1[i] = acc;
        p1_sq[i] = acc_sq;
    }

    let mut p2_sq = vec![0.0f64; nbins];
    let mut acc_sq = 0.0;
    for i in (0..nbins).rev() {
        acc_sq += pmf[i] * pmf[i];
        p2_sq[i] = acc_sq;
    }

    let idx = argmax((0..nbins - 1).map(|i| {
        let spread = p1[i] * (1.0 - p1[i]);
        (spread * spread / (p1_sq[i] * p2_sq[i + 1])).ln()
    }))
    .ok_or_else(|| ThresholdError::DegenerateDistribution("yen found no split".into()))?;

    Ok(hist.value(idx))
}

/// Triangle method.
///
/// Draws a line from the histogram peak to the end of the longer tail and
/// returns the bin whose count lies furthest below that line.
pub fn triangle(hist: &Histogram) -> ThresholdResult<f64> {
    check_spread(hist)?;
    let counts = hist.counts();
    let nbins = counts.len();

    let mut peak = argmax(counts.iter().map(|&c| c as f64)).unwrap_or(0);
    let peak_height = counts[peak] as f64;

    // First and last bins are always occupied in an exact histogram.
    let (mut low, high) = (0usize, nbins - 1);

    let flip = peak - low < high - peak;
    let bin = |i: usize| {
        if flip {
            counts[nbins - 1 - i]
        } else {
            counts[i]
        }
    };
    if flip {
        low = nbins - 1 - high;
        peak = nbins - 1 - peak;
    }

    let width = (peak - low) as f64;
    let norm = (peak_height * peak_height + width * width).sqrt();
    let (ph, wd) = (peak_height / norm, width / norm);

    let rel = argmax((0..peak - low).map(|x| ph * x as f64 - wd * bin(x + low) as f64))
        .ok_or_else(|| ThresholdError::DegenerateDistribution("triangle found no split".into()))?;

    let mut level = rel + low;
    if flip {
        level = nbins - 1 - level;
    }
    Ok(hist.value(level))
}

/// Li's iterative minimum cross entropy method.
///
/// Works on intensities shifted so the minimum is 0. Starting from the
/// mean, the threshold is updated to
/// `(mb - mf) / (ln(mb) - ln(mf))` with `mb`, `mf` the background and
/// foreground means, until it moves by no more than half the smallest gap
/// between occupied intensities. Iteration also stops when the background
/// mean reaches 0 or a class empties.
pub fn li(hist: &Histogram) -> ThresholdResult<f64> {
    check_spread(hist)?;
    let counts = hist.counts();
    let offset = hist.min() as f64;

    // Occupied bins as (shifted value, count).
    let occupied: Vec<(f64, f64)> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .map(|(i, &c)| (i as f64, c as f64))
        .collect();

    let tolerance = occupied
        .windows(2)
        .map(|w| w[1].0 - w[0].0)
        .fold(f64::INFINITY, f64::min)
        / 2.0;

    let class_means = |t: f64| {
        let (mut nb, mut sb, mut nf, mut sf) = (0.0, 0.0, 0.0, 0.0);
        for &(v, c) in &occupied {
            if v > t {
                nf += c;
                sf += c * v;
            } else {
                nb += c;
                sb += c * v;
            }
        }
        let mb = if nb > 0.0 { Some(sb / nb) } else { None };
        let mf = if nf > 0.0 { Some(sf / nf) } else { None };
        (mb, mf)
    };

    let mut t_next = hist.mean() - offset;
    let mut t_curr = -2.0 * tolerance;
    while (t_next - t_curr).abs() > tolerance {
        t_curr = t_next;
        let (mb, mf) = match class_means(t_curr) {
            (Some(mb), Some(mf)) => (mb, mf),
            _ => break,
        };
        if mb == 0.0 {
            break;
        }
        t_next = (mb - mf) / (mb.ln() - mf.ln());
    }

    Ok(t_next + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(samples: &[u16]) -> Histogram {
        Histogram::from_samples(samples).unwrap()
    }

    #[test]
    fn test_degenerate() {
        for m in ThresholdMethod::ALL {
            assert!(matches!(
                threshold(&[], m),
                Err(ThresholdError::DegenerateDistribution(_))
            ));
            assert!(matches!(
                threshold(&[0, 0, 0], m),
                Err(ThresholdError::DegenerateDistribution(_))
            ));
            assert!(matches!(
                threshold(&[7; 10], m),
                Err(ThresholdError::DegenerateDistribution(_))
            ));
        }
    }

    #[test]
    fn test_otsu_two_values() {
        // Only one split exists: after the lower value.
        assert_eq!(otsu(&hist(&[3, 3, 9, 9])).unwrap(), 3.0);
    }

    #[test]
    fn test_otsu_first_max_wins() {
        // Empty bins between the clusters give equal variance; the first
        // split is the last value of the lower cluster.
        let t = otsu(&hist(&[1, 2, 2, 1, 50, 51, 50])).unwrap();
        assert_eq!(t, 2.0);
    }

    #[test]
    fn test_yen_two_clusters() {
        let t = yen(&hist(&[1, 2, 2, 1, 50, 51, 50])).unwrap();
        assert!((2.0..50.0).contains(&t), "yen threshold {t}");
    }

    #[test]
    fn test_triangle_long_right_tail() {
        // Peak at 0 with a tail to the right: the line runs from the peak
        // to the tail end and the threshold lies inside the tail.
        let mut samples = vec![0u16; 100];
        samples.extend([1, 1, 1, 1, 1, 2, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let t = triangle(&hist(&samples)).unwrap();
        assert!((1.0..=10.0).contains(&t), "triangle threshold {t}");
    }

    #[test]
    fn test_triangle_flip_symmetry() {
        // Mirroring the histogram mirrors the threshold.
        let mut a = vec![0u16; 50];
        a.extend([1, 1, 1, 2, 2, 3, 4, 6, 8, 20]);
        let b: Vec<u16> = a.iter().map(|&v| 20 - v).collect();
        let ta = triangle(&hist(&a)).unwrap();
        let tb = triangle(&hist(&b)).unwrap();
        assert_eq!(ta, 20.0 - tb);
    }

    #[test]
    fn test_li_two_values() {
        // Shifted values {0, 10}: the background mean is 0 after one step.
        let t = li(&hist(&[5, 5, 5, 15])).unwrap();
        assert!((5.0..15.0).contains(&t), "li threshold {t}");
    }

    #[test]
    fn test_li_offset_invariance() {
        let base = [0u16, 1, 1, 2, 2, 2, 40, 41, 42, 42];
        let shifted: Vec<u16> = base.iter().map(|&v| v + 1000).collect();
        let t0 = li(&hist(&base)).unwrap();
        let t1 = li(&hist(&shifted)).unwrap();
        assert!((t1 - t0 - 1000.0).abs() < 1e-6);
    }
}
