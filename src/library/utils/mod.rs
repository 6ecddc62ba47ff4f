pub mod img_ops;
