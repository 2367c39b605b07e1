mod block;
mod bounds;
mod camera;
mod world;

pub use block::*;
pub use bounds::*;
pub use camera::*;
pub use world::*;
