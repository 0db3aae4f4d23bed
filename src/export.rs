pub use std::borrow::ToOwned;
pub use std::default::Default;
pub use std::result::Result::{Err, Ok};
