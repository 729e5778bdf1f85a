pub mod affiliate;
pub mod post;

pub use affiliate::{AffiliateItem, ResourceItem};
pub use post::Post;
