pub mod alu;
pub mod inst;
pub mod op;
