pub const ZIP_LEN: usize = 5;

/// Left-pads with zeros to five characters, then keeps the first five.
pub fn clean_zip_code<T: ToString + ?Sized>(value: &T) -> String {
    let raw = value.to_string();
    let len = raw.chars().count();

    let mut out = String::with_capacity(ZIP_LEN);
    for _ in len..ZIP_LEN {
        out.push('0');
    }
    out.extend(raw.chars().take(ZIP_LEN - out.len()));
    out
}
