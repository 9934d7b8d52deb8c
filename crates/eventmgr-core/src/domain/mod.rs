pub mod attendee;
pub mod phone;
pub mod zip;

pub use attendee::{symbolize_header, Attendee};
pub use phone::clean_phone_number;
pub use zip::clean_zip_code;
