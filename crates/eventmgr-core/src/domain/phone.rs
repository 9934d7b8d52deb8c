/// Reduces a phone number to its ten significant digits.
///
/// Returns an empty string when the input does not hold exactly ten digits,
/// or eleven digits led by the `1` country code.
pub fn clean_phone_number(value: &str) -> String {
    let digits: Vec<char> = value.chars().filter(|ch| ch.is_ascii_digit()).collect();

    match digits.len() {
        10 => digits.into_iter().collect(),
        11 if digits[0] == '1' => digits[1..].iter().collect(),
        _ => String::new(),
    }
}
