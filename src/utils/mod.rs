pub mod file_ops;
