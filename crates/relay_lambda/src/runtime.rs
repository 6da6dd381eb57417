pub use relay_core::{batch, contract, envelope};
