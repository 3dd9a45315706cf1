pub mod contest;
pub mod number;
pub mod record;
pub mod registration;
pub mod token;
pub mod user;

pub use contest::*;
pub use number::*;
pub use record::*;
pub use registration::*;
pub use token::*;
pub use user::*;
