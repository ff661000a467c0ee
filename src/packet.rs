use crate::gamepad::Sample;

/// Axis slots that go on the wire, in field order. The sticks; the
/// trigger slots (2 and 5) are sampled but not sent.
const WIRE_AXES: [usize; 4] = [0, 1, 3, 4];

/// The byte that makes the whole line sum to zero mod 256.
pub fn checksum(data: &[u8]) -> u8 {
    data.iter()
        .fold(0u8, |sum, &b| sum.wrapping_add(b))
        .wrapping_neg()
}

/// Renders one sample as a complete `!J....#xx\n` line: button bitmask
/// plus four axis fields, 4 lowercase hex digits each, `|`-separated,
/// with the checksum of everything before the `#` appended.
pub fn frame(sample: &Sample) -> String {
    let mut line = format!("!J{:04x}", sample.buttons);
    for &slot in WIRE_AXES.iter() {
        // Negative axes ride as their 16-bit wraparound representation
        line.push_str(&format!("|{:04x}", sample.axes[slot] as u16));
    }
    let ck = checksum(line.as_bytes());
    line.push_str(&format!("#{ck:02x}\n"));
    line
}
