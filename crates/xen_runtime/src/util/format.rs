//! Number rendering shared by display and the string conversions.

/// Integral values print without a fraction, everything else as the shortest
/// representation that round-trips.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        let mut buf = itoa::Buffer::new();
        return buf.format(n as i64).to_string();
    }
    let mut buf = ryu::Buffer::new();
    buf.format_finite(n).to_string()
}
