pub mod entity;
pub mod rigidbody;
