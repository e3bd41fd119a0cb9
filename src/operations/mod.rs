pub mod boolean;
