mod account;
mod bank;
mod error;
mod money;
mod transaction;

pub use account::*;
pub use bank::*;
pub use error::*;
pub use money::*;
pub use transaction::*;
