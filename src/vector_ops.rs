use crate::config::{Number, EPSILON};
use anyhow::Result;
use wide::f32x8;

/// Dot product of two equal-length vectors using SIMD with a scalar tail.
/// Both inputs are expected to be unit-normalized (or all zero), so the
/// result is already their cosine similarity. A length mismatch is a
/// contract violation and fails instead of truncating.
pub fn dot_product(a: &[Number], b: &[Number]) -> Result<Number> {
    if a.len() != b.len() {
        anyhow::bail!("Vector dimension mismatch: {} vs {}", a.len(), b.len());
    }

    let len = a.len();
    let simd_len = len - (len % 8);
    let mut acc = f32x8::splat(0.0);

    // SIMD loop
    for i in (0..simd_len).step_by(8) {
        let va = f32x8::new([
            a[i],
            a[i + 1],
            a[i + 2],
            a[i + 3],
            a[i + 4],
            a[i + 5],
            a[i + 6],
            a[i + 7],
        ]);
        let vb = f32x8::new([
            b[i],
            b[i + 1],
            b[i + 2],
            b[i + 3],
            b[i + 4],
            b[i + 5],
            b[i + 6],
            b[i + 7],
        ]);
        acc += va * vb;
    }

    let mut dot = acc.reduce_add();

    // Handle remaining elements
    for i in simd_len..len {
        dot += a[i] * b[i];
    }

    Ok(dot)
}

pub fn normalize_vector(vector: &mut [Number]) {
    let magnitude: Number = vector.iter().map(|&x| x * x).sum::<Number>().sqrt();
    if magnitude > EPSILON {
        for x in vector.iter_mut() {
            *x /= magnitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_unit_vectors_score_one() {
        let v = vec![1.0, 0.0];
        let score = dot_product(&v, &v).unwrap();
        assert!((score - 1.0).abs() < EPSILON);
    }

    #[test]
    fn orthogonal_unit_vectors_score_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        let score = dot_product(&a, &b).unwrap();
        assert!(score.abs() < EPSILON);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert!(dot_product(&a, &b).is_err());
    }

    #[test]
    fn simd_and_tail_agree_with_scalar() {
        // 10 elements exercises one SIMD lane plus a 2-element tail.
        let a: Vec<Number> = (1..=10).map(|i| i as Number).collect();
        let b: Vec<Number> = (1..=10).map(|i| (11 - i) as Number).collect();
        let expected: Number = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        let got = dot_product(&a, &b).unwrap();
        assert!((got - expected).abs() < 1e-3);
    }

    #[test]
    fn normalize_yields_unit_magnitude() {
        let mut v = vec![3.0, 4.0];
        normalize_vector(&mut v);
        let magnitude: Number = v.iter().map(|&x| x * x).sum::<Number>().sqrt();
        assert!((magnitude - 1.0).abs() < EPSILON);
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        let mut v = vec![0.0; 10];
        normalize_vector(&mut v);
        assert!(v.iter().all(|&x| x == 0.0));
    }
}
