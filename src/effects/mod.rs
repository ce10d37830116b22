/// Straight-alpha compositing.
pub mod composite;
