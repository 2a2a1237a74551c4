use alloc::format;
use alloc::string::String;

/// Formats a counter the way the mine display shows it: zero-padded to three
/// characters, sign included, wider values left untouched.
pub fn format_counter(value: i32) -> String {
    format!("{value:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_three() {
        assert_eq!(format_counter(0), "000");
        assert_eq!(format_counter(7), "007");
        assert_eq!(format_counter(20), "020");
        assert_eq!(format_counter(100), "100");
    }

    #[test]
    fn negative_counters_keep_the_sign() {
        assert_eq!(format_counter(-1), "-01");
        assert_eq!(format_counter(-12), "-12");
    }

    #[test]
    fn width_is_not_a_clamp() {
        assert_eq!(format_counter(1234), "1234");
    }
}
