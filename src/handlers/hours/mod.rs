pub mod pending;
pub mod review;
pub mod submit;

pub use pending::pending_get;
pub use review::review_put;
pub use submit::submit_post;
