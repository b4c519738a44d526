/// Derive a stable per-region seed from a base seed and the region's name.
pub fn region_seed(base: u32, region_name: &str) -> u32 {
    let hash = region_name
        .bytes()
        .fold(splitmix64(base as u64), |acc, byte| splitmix64(acc ^ byte as u64));
    (hash >> 32) as u32
}

pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
