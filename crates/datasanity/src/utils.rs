//! Shared helpers for the analyzers and the suggestion engine.

use polars::prelude::*;

/// Label used for the null bucket when values are rendered as text.
pub const NULL_LABEL: &str = "null";

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a column's data type for diagnostic purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Boolean type
    Boolean,
    /// Date or datetime types
    Datetime,
    /// String/categorical text
    Text,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a floating point type.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType is boolean.
#[inline]
pub fn is_boolean_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Boolean)
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_boolean_dtype(dtype) {
        DtypeCategory::Boolean
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::Text
    } else {
        DtypeCategory::Other
    }
}

// =============================================================================
// Series Utilities
// =============================================================================

/// Number of distinct values, counting null as one extra value when present.
pub fn distinct_count_with_nulls(series: &Series) -> PolarsResult<usize> {
    let non_null = series.drop_nulls();
    let distinct = if non_null.is_empty() {
        0
    } else {
        non_null.n_unique()?
    };
    Ok(distinct + usize::from(series.null_count() > 0))
}

/// Number of missing entries: nulls, plus NaN for float columns.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    let mut missing = series.null_count();
    if is_float_dtype(series.dtype()) {
        let floats = series.cast(&DataType::Float64)?;
        missing += floats
            .f64()?
            .into_iter()
            .filter(|v| matches!(v, Some(x) if x.is_nan()))
            .count();
    }
    Ok(missing)
}

/// Values of a numeric Series as `f64`; nulls and non-finite values become `None`.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

/// Render every value of a Series as text, nulls as `None`.
pub fn text_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let strings = series.cast(&DataType::String)?;
    Ok(strings
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

// =============================================================================
// Statistics
// =============================================================================

/// Pearson correlation over the pairwise-complete observations of `x` and `y`.
///
/// Returns `None` when the correlation is undefined: fewer than two complete
/// pairs, or zero variance on either side.
pub fn pearson_correlation(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    // rounding can push |r| marginally past 1
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// =============================================================================
// Display Utilities
// =============================================================================

/// Keep the first `max_items` entries for display, appending a marker entry
/// describing how many were dropped.
pub fn truncate_entries<V: Clone>(
    entries: &[(String, V)],
    max_items: usize,
) -> (Vec<(String, V)>, Option<String>) {
    if entries.len() <= max_items {
        return (entries.to_vec(), None);
    }
    let marker = format!(
        "truncated (showing first {} of {})",
        max_items,
        entries.len()
    );
    (entries[..max_items].to_vec(), Some(marker))
}
