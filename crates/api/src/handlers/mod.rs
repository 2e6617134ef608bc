pub mod page;
pub mod publish;
