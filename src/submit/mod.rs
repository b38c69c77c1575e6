//! Shared cart submission
//!
//! Handles the workflow of turning an identifier list into a remote cart:
//! 1. Validation - refuse empty lists before any network call
//! 2. Authentication - optional, only when credentials were given
//! 3. Creation - one create-cart call, status mapped to a result

mod execute;
mod progress;
mod result;

pub use execute::submit_cart;
pub use progress::{NoopProgress, Phase, ProgressCallback};
pub use result::{cart_url, status_message, SubmissionResult};

use rand::Rng;

/// Prefix of generated cart names
pub const CART_NAME_PREFIX: &str = "nbia-";

/// Number of random digits in a generated cart name
const CART_NAME_DIGITS: usize = 18;

/// Generate a cart name like `nbia-123456789012345678`
pub fn generate_cart_name() -> String {
    let mut rng = rand::thread_rng();
    let digits: String = (0..CART_NAME_DIGITS)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    format!("{CART_NAME_PREFIX}{digits}")
}
