//! The public read adapters, one module per representation.
//!
//! Each representation has a failing form (`read_as_*`) and a safe form
//! (`safe_read_as_*`) that always resolves to a [`SafeResult`](crate::SafeResult).

mod array_buffer;
mod binary_string;
mod data_url;
mod text;

pub use array_buffer::{read_as_array_buffer, safe_read_as_array_buffer};
pub use binary_string::{read_as_binary_string, safe_read_as_binary_string};
pub use data_url::{read_as_data_url, safe_read_as_data_url};
pub use text::{read_as_text, safe_read_as_text};
