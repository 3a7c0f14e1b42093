pub mod accept;
pub mod apply;
pub mod pending;
pub mod reject;
pub mod status;
pub mod withdraw;

pub use accept::accept_post;
pub use apply::apply_post;
pub use pending::pending_get;
pub use reject::reject_post;
pub use status::status_get;
pub use withdraw::withdraw_delete;
