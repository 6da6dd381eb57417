pub mod consume;
pub mod publish;
