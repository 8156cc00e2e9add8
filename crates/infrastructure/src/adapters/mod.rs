//! Port adapters

mod photo_file;
mod reqwest_client;
mod system_clock;

pub use photo_file::{PhotoFileError, load_photo};
pub use reqwest_client::ReqwestApiClient;
pub use system_clock::SystemClock;
