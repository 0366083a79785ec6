//! Seeded 3D value noise.

/// Hashes seed text into a well-mixed 32-bit key.
fn seed_key(seed_text: &str) -> u32 {
    let mut h: u32 = 0;
    for c in seed_text.chars() {
        h = h.wrapping_mul(31).wrapping_add(c as u32);
    }
    // Two LCG mixing rounds.
    h = h.wrapping_mul(1_013_904_223).wrapping_add(1_664_525);
    h.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)
}

/// Hashes seed text into a scalar in [0, 1).
///
/// Pure and deterministic: the same text always yields the same value.
pub fn seed_hash(seed_text: &str) -> f64 {
    seed_key(seed_text) as f64 / 4_294_967_296.0
}

/// MurmurHash3 32-bit finalizer.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^ (h >> 16)
}

#[inline]
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Lattice value noise keyed by a hashed seed.
///
/// The only state is the seed; every sample is a pure function of
/// `(seed, x, y, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueNoise {
    key: u32,
    seed: f64,
}

impl ValueNoise {
    /// Creates a noise engine from seed text.
    pub fn new(seed_text: &str) -> Self {
        let key = seed_key(seed_text);
        Self {
            key,
            seed: key as f64 / 4_294_967_296.0,
        }
    }

    /// The hashed seed scalar in [0, 1).
    pub fn seed(&self) -> f64 {
        self.seed
    }

    /// Hash of one integer lattice corner, in [0, 1).
    pub fn lattice(&self, x: i32, y: i32, z: i32) -> f64 {
        self.lattice_bits(x, y, z) as f64 / 4_294_967_296.0
    }

    fn lattice_bits(&self, x: i32, y: i32, z: i32) -> u32 {
        let h = self
            .key
            .wrapping_mul(999_999_999)
            .wrapping_add((x as u32).wrapping_mul(374_761_393))
            .wrapping_add((y as u32).wrapping_mul(668_265_263))
            .wrapping_add((z as u32).wrapping_mul(1_274_126_177));
        fmix32(fmix32(h) ^ self.key.rotate_left(16))
    }

    /// Samples value noise at `(x, y, z)`; the result is in [0, 1).
    ///
    /// Corner values are blended with smoothstep-eased trilinear
    /// interpolation so no crease follows the lattice planes.
    pub fn value_noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let fx = x.floor();
        let fy = y.floor();
        let fz = z.floor();
        let (ix, iy, iz) = (fx as i32, fy as i32, fz as i32);

        let sx = smoothstep(x - fx);
        let sy = smoothstep(y - fy);
        let sz = smoothstep(z - fz);

        let c000 = self.lattice(ix, iy, iz);
        let c001 = self.lattice(ix, iy, iz + 1);
        let c010 = self.lattice(ix, iy + 1, iz);
        let c011 = self.lattice(ix, iy + 1, iz + 1);
        let c100 = self.lattice(ix + 1, iy, iz);
        let c101 = self.lattice(ix + 1, iy, iz + 1);
        let c110 = self.lattice(ix + 1, iy + 1, iz);
        let c111 = self.lattice(ix + 1, iy + 1, iz + 1);

        let c00 = lerp(c000, c100, sx);
        let c01 = lerp(c001, c101, sx);
        let c10 = lerp(c010, c110, sx);
        let c11 = lerp(c011, c111, sx);

        let c0 = lerp(c00, c10, sy);
        let c1 = lerp(c01, c11, sy);

        lerp(c0, c1, sz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_hash_range_and_determinism() {
        for text in ["", "default", "a", "b", "a much longer seed string", "ünïcödé"] {
            let h = seed_hash(text);
            assert!((0.0..1.0).contains(&h), "{} -> {}", text, h);
            assert_eq!(h, seed_hash(text));
        }
        assert_ne!(seed_hash("seed1"), seed_hash("seed2"));
    }

    #[test]
    fn test_lattice_is_idempotent() {
        let noise = ValueNoise::new("default");
        assert_eq!(noise.lattice(3, -7, 11), noise.lattice(3, -7, 11));
    }

    #[test]
    fn test_lattice_avalanche() {
        let noise = ValueNoise::new("avalanche");
        let mut flipped = 0u64;
        let mut trials = 0u64;

        for i in 0..64 {
            let (x, y, z) = (i * 7 - 200, i * 13 + 5, 31 - i * 3);
            let base = noise.lattice_bits(x, y, z);
            for bit in 0..12 {
                let mask = 1 << bit;
                flipped += (base ^ noise.lattice_bits(x ^ mask, y, z)).count_ones() as u64;
                flipped += (base ^ noise.lattice_bits(x, y ^ mask, z)).count_ones() as u64;
                flipped += (base ^ noise.lattice_bits(x, y, z ^ mask)).count_ones() as u64;
                trials += 3;
            }
        }

        let mean = flipped as f64 / trials as f64;
        assert!((12.0..20.0).contains(&mean), "mean flipped bits {}", mean);
    }

    #[test]
    fn test_noise_range() {
        let noise = ValueNoise::new("range");
        for i in 0..2000 {
            let t = i as f64 * 0.173;
            let v = noise.value_noise_3d(t, -t * 0.61, t * 1.37 - 40.0);
            assert!((0.0..1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn test_noise_hits_lattice_values_at_integers() {
        let noise = ValueNoise::new("grid");
        assert_eq!(noise.value_noise_3d(2.0, -3.0, 5.0), noise.lattice(2, -3, 5));
    }

    #[test]
    fn test_noise_is_continuous_across_cell_faces() {
        let noise = ValueNoise::new("continuous");
        let below = noise.value_noise_3d(0.999_999, 0.3, 0.7);
        let above = noise.value_noise_3d(1.000_001, 0.3, 0.7);
        assert!((below - above).abs() < 1e-4);
    }

    #[test]
    fn test_different_seeds_produce_different_fields() {
        let a = ValueNoise::new("alpha");
        let b = ValueNoise::new("alphb");
        let differing = (0..100)
            .filter(|&i| {
                let p = i as f64 * 0.37;
                a.value_noise_3d(p, p * 0.5, -p) != b.value_noise_3d(p, p * 0.5, -p)
            })
            .count();
        assert!(differing > 90);
    }
}
