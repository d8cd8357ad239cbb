pub use cgmath::prelude::*;
pub use cgmath::{AbsDiffEq, Deg, Rad};

pub type Vector2 = cgmath::Vector2<f64>;
pub type Vector3 = cgmath::Vector3<f64>;
pub type Vector4 = cgmath::Vector4<f64>;
pub type Point3 = cgmath::Point3<f64>;
pub type Matrix3 = cgmath::Matrix3<f64>;
pub type Matrix4 = cgmath::Matrix4<f64>;
