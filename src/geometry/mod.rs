mod aabb;
mod ray;
mod shape;

pub use aabb::Aabb;
pub use ray::{Ray, RayHit};
pub use shape::{Circle, MassData, Polygon, Segment, Shape, ShapeType};
