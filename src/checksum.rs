/// Two's-complement checksum: the byte that makes the wrapping sum of `bytes` zero.
pub fn checksum(bytes: &[u8]) -> u8 {
    0u8.wrapping_sub(sum(bytes))
}

/// Returns true when `bytes`, checksum byte included, sum to zero modulo 256.
pub fn verify(bytes: &[u8]) -> bool {
    sum(bytes) == 0
}

fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &byte| acc.wrapping_add(byte))
}
