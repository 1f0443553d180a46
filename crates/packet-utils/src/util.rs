pub const U24_MAX: u32 = 0x00ff_ffff;

/// Lower three octets of `value` in network byte order.
pub fn u32_u24(value: u32) -> [u8; 3] {
    [(value >> 16) as u8, (value >> 8) as u8, value as u8]
}

pub fn u24_u32(bytes: [u8; 3]) -> u32 {
    u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]])
}
