//! Similarity scoring between embedding vectors

/// Raw dot product over the overlapping prefix of the two vectors.
///
/// No normalization is applied. Cosine-like behavior falls out only when
/// the embedder produces unit-length vectors.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product() {
        assert_eq!(dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(dot_product(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_dot_product_empty() {
        assert_eq!(dot_product(&[], &[]), 0.0);
    }

    #[test]
    fn test_dot_product_is_not_normalized() {
        // Same direction, double the magnitude, double the score
        let a = [1.0, 1.0];
        assert_eq!(dot_product(&a, &[2.0, 2.0]), 2.0 * dot_product(&a, &a));
    }
}
