pub mod completion;
pub mod panels;
pub mod stack;
pub mod surface;
