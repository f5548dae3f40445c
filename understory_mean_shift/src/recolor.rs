// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random recoloring of refined clusters.

use std::collections::BTreeMap;

use rand::Rng;

use crate::image::{ColorImage, Rgb};

/// Replace every distinct color with a random color drawn from `rng`.
///
/// After refinement each cluster is a single color, so this paints clusters
/// with contrasting labels. Distinct colors are visited in sorted order, so a
/// seeded `rng` always yields the same palette. Returns the number of clusters.
pub fn recolor_clusters<R: Rng + ?Sized>(image: &mut ColorImage, rng: &mut R) -> usize {
    let mut palette: BTreeMap<Rgb, Rgb> = image.pixels().iter().map(|&c| (c, c)).collect();
    for label in palette.values_mut() {
        *label = [
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
        ];
    }
    for pixel in image.pixels_mut() {
        *pixel = palette[&*pixel];
    }
    tracing::debug!(clusters = palette.len(), "recolored clusters");
    palette.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample() -> ColorImage {
        ColorImage::new(
            2,
            2,
            vec![[1, 1, 1], [200, 0, 0], [1, 1, 1], [200, 0, 0]],
        )
        .unwrap()
    }

    #[test]
    fn same_cluster_same_label() {
        let mut image = sample();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(recolor_clusters(&mut image, &mut rng), 2);
        let p = image.pixels();
        assert_eq!(p[0], p[2]);
        assert_eq!(p[1], p[3]);
    }

    #[test]
    fn seeded_palette_is_deterministic() {
        let mut a = sample();
        let mut b = sample();
        recolor_clusters(&mut a, &mut ChaCha8Rng::seed_from_u64(1));
        recolor_clusters(&mut b, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_image_has_no_clusters() {
        let mut image = ColorImage::new(0, 0, Vec::new()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(recolor_clusters(&mut image, &mut rng), 0);
    }
}
