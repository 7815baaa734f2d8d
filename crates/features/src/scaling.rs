use ndarray::{Array2, ArrayView2, Axis};

/// Column-wise standardization to zero mean and unit (population) variance
///
/// Constant columns are centered but not scaled.
pub fn standardize(rows: ArrayView2<'_, f64>) -> Array2<f64> {
    let mut scaled = rows.to_owned();
    if rows.nrows() == 0 {
        return scaled;
    }

    for mut column in scaled.axis_iter_mut(Axis(1)) {
        let mean = column.mean().unwrap_or(0.0);
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / column.len() as f64;
        let std = variance.sqrt();
        let scale = if std > 0.0 { std } else { 1.0 };
        column.mapv_inplace(|v| (v - mean) / scale);
    }
    scaled
}

/// Min-max normalization into [0, 1]; a zero range maps everything to 0
pub fn min_max(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|v| if range > 0.0 { (v - min) / range } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn standardized_columns_have_zero_mean_unit_variance() {
        let rows = array![[10.0, 15.0, 8.0], [20.0, 15.0, 4.0], [30.0, 15.0, 6.0]];
        let scaled = standardize(rows.view());
        for column in scaled.axis_iter(Axis(1)).take(1) {
            assert!(column.mean().unwrap().abs() < 1e-12);
            let var = column.iter().map(|v| v * v).sum::<f64>() / 3.0;
            assert!((var - 1.0).abs() < 1e-12);
        }
        assert!(scaled.column(1).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn min_max_spans_unit_interval() {
        assert_eq!(min_max(&[1.0, 5.5, 10.0]), vec![0.0, 0.5, 1.0]);
        assert_eq!(min_max(&[3.0, 3.0]), vec![0.0, 0.0]);
        assert!(min_max(&[]).is_empty());
    }
}
