pub mod camera;
pub mod capture;
pub mod collection;
pub mod pick;
pub mod proxy;
pub mod screen;

pub use camera::Camera;
pub use capture::{
    CaptureRegion, MemoryTextures, SurfaceCapture, SurfaceInfo, SyntheticCapture, TextureHandle,
    TextureSink,
};
pub use collection::ProxyCollection;
pub use pick::{PickHit, pick};
pub use proxy::{ProxyId, QuadMesh, WindowProxy};
pub use screen::{Point2, Rect, Vec2};
