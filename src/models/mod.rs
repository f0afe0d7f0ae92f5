pub mod channel;
pub mod interaction;
pub mod user;
pub mod video;

pub use channel::*;
pub use interaction::*;
pub use user::*;
pub use video::*;
