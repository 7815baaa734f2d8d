//! Dimensional fit scoring.
//!
//! The score blends a piecewise utilization curve (peak at 75-85% of the
//! container volume) with how evenly the item fills each axis.

use crate::container::ContainerSpec;
use menufit_catalog::MenuSize;

const VOLUME_WEIGHT: f64 = 0.7;
const BALANCE_WEIGHT: f64 = 0.3;

/// Item volume as a percentage of container volume
#[must_use]
pub fn utilization(container: &ContainerSpec, size: &MenuSize) -> f64 {
    size.volume() / container.volume() * 100.0
}

/// Per-axis item/container ratios in (width, length, height) order
#[must_use]
pub fn axis_ratios(container: &ContainerSpec, size: &MenuSize) -> [f64; 3] {
    let c = container.axes();
    let s = size.axes();
    [s[0] / c[0], s[1] / c[1], s[2] / c[2]]
}

/// `max(0, 1 - population_std(ratios)) * 100`
#[must_use]
pub fn balance_score(ratios: &[f64; 3]) -> f64 {
    let mean = ratios.iter().sum::<f64>() / 3.0;
    let variance = ratios.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 3.0;
    (1.0 - variance.sqrt()).max(0.0) * 100.0
}

/// Piecewise utilization curve; regimes are checked in order, so shared
/// boundaries belong to the earlier one
#[must_use]
pub fn volume_score(utilization: f64) -> f64 {
    let u = utilization;
    if (75.0..=85.0).contains(&u) {
        100.0
    } else if (60.0..75.0).contains(&u) {
        80.0 + (u - 60.0) * 1.33
    } else if u > 85.0 && u <= 90.0 {
        100.0 - (u - 85.0) * 2.0
    } else if (45.0..60.0).contains(&u) {
        50.0 + (u - 45.0) * 2.0
    } else {
        (u * 0.8).max(0.0)
    }
}

/// Fit score in [0, 100]; 0 when any item axis exceeds the container
#[must_use]
pub fn fit_score(container: &ContainerSpec, size: &MenuSize) -> f64 {
    if !container.fits(size) {
        return 0.0;
    }

    let volume = volume_score(utilization(container, size));
    let balance = balance_score(&axis_ratios(container, size));
    (volume * VOLUME_WEIGHT + balance * BALANCE_WEIGHT).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn eighty_percent_uniform_fill_scores_full_marks() {
        let container = ContainerSpec::new(10.0, 10.0, 10.0);
        let edge = 10.0 * 0.8f64.cbrt();
        let size = MenuSize::new(edge, edge, edge);
        assert!(approx(utilization(&container, &size), 80.0));
        assert!(approx(fit_score(&container, &size), 100.0));
    }

    #[test]
    fn volume_curve_breakpoints() {
        assert_eq!(volume_score(75.0), 100.0);
        assert_eq!(volume_score(85.0), 100.0);
        assert!(approx(volume_score(60.0), 80.0));
        assert!(approx(volume_score(74.0), 80.0 + 14.0 * 1.33));
        assert!(approx(volume_score(90.0), 90.0));
        assert!(approx(volume_score(45.0), 50.0));
        assert!(approx(volume_score(59.0), 78.0));
        assert!(approx(volume_score(40.0), 32.0));
        assert!(approx(volume_score(95.0), 76.0));
        assert_eq!(volume_score(0.0), 0.0);
    }

    #[test]
    fn overflow_on_any_axis_is_rejected() {
        let container = ContainerSpec::new(20.0, 20.0, 5.0);
        assert_eq!(fit_score(&container, &MenuSize::new(10.0, 10.0, 5.5)), 0.0);
        assert_eq!(fit_score(&container, &MenuSize::new(20.5, 1.0, 1.0)), 0.0);
    }

    #[test]
    fn uneven_axes_lower_balance() {
        assert!(approx(balance_score(&[0.5, 0.5, 0.5]), 100.0));
        assert!(balance_score(&[1.0, 0.1, 1.0]) < 100.0);
    }

    proptest! {
        #[test]
        fn oversized_items_score_zero(
            cw in 1.0f64..50.0, cl in 1.0f64..50.0, ch in 1.0f64..50.0,
            extra in 0.001f64..10.0, axis in 0usize..3,
        ) {
            let container = ContainerSpec::new(cw, cl, ch);
            let mut dims = [cw, cl, ch];
            dims[axis] += extra;
            let size = MenuSize::new(dims[0], dims[1], dims[2]);
            prop_assert_eq!(fit_score(&container, &size), 0.0);
        }

        #[test]
        fn eligible_items_score_within_bounds(
            cw in 1.0f64..50.0, cl in 1.0f64..50.0, ch in 1.0f64..50.0,
            fw in 0.01f64..=1.0, fl in 0.01f64..=1.0, fh in 0.01f64..=1.0,
        ) {
            let container = ContainerSpec::new(cw, cl, ch);
            let size = MenuSize::new(cw * fw, cl * fl, ch * fh);
            let score = fit_score(&container, &size);
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
