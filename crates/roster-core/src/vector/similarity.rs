//! Cosine similarity between embedding vectors.

use roster_types::error::VectorError;

/// Largest absolute component. Zero for empty or all-zero vectors.
fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |max, x| max.max(x.abs()))
}

/// `v` divided by `scale`, so every component lies in `[-1, 1]`.
fn rescaled(v: &[f64], scale: f64) -> Vec<f64> {
    v.iter().map(|x| x / scale).collect()
}

/// Sum of the element-wise products. Callers guarantee equal lengths.
fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]` where 1.0 means identical direction.
/// A vector with zero magnitude has no direction, so any comparison
/// involving one yields `0.0` instead of `NaN`. Vectors holding `NaN` or
/// infinite components score `0.0` as well.
///
/// # Errors
///
/// [`VectorError::DimensionMismatch`] when the lengths differ. Vectors are
/// never truncated or padded.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    // Cosine is scale-invariant. Dividing by the largest component keeps the
    // squares below from overflowing or underflowing for extreme inputs.
    let scale_a = max_abs(a);
    let scale_b = max_abs(b);
    if scale_a == 0.0 || scale_b == 0.0 {
        tracing::debug!(
            dimensions = a.len(),
            "zero magnitude vector encountered, similarity is 0"
        );
        return Ok(0.0);
    }

    let a = rescaled(a, scale_a);
    let b = rescaled(b, scale_b);
    let score = dot_product(&a, &b) / (magnitude(&a) * magnitude(&b));
    if score.is_nan() {
        tracing::debug!(
            dimensions = a.len(),
            "non-finite component encountered, similarity is 0"
        );
        return Ok(0.0);
    }
    Ok(score.clamp(-1.0, 1.0))
}
