//! Pure data structures implementing the [`ActorEntity`](crate::framework::ActorEntity) trait, plus the read
//! models (views, summaries, snapshots) derived from them.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use user::*;
