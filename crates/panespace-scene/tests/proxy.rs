use panespace_base::cgmath64::*;
use panespace_base::{Error, PixelOrder, Result, SourceHandle, assert_near};
use panespace_scene::proxy::QUAD_HEIGHT;
use panespace_scene::{Camera, MemoryTextures, ProxyCollection, SyntheticCapture, WindowProxy};

#[test]
fn creation_sizes_quad_and_faces_camera() -> Result<()> {
    let handle = SourceHandle::new(7);
    let mut capture = SyntheticCapture::new().with_surface(handle, 800, 400);
    let mut textures = MemoryTextures::new();
    let camera = Camera::default();
    let position = Point3::new(2.0, 2.25, -1.0);

    let proxy = WindowProxy::create(handle, position, &camera, &mut capture, &mut textures)?;

    assert_near!(proxy.mesh().height(), QUAD_HEIGHT);
    assert_near!(proxy.mesh().width(), 2.0 * QUAD_HEIGHT);
    assert_near!(proxy.pose.position(), position);
    assert_near!(proxy.pose.scale(), 1.0);
    assert_near!(proxy.pose.basis().front(), (camera.position - position).normalize());
    assert!(proxy.visible);

    let pixels = textures.pixels(proxy.texture()).ok_or(Error::TextureUpload("missing".into()))?;
    assert_eq!(pixels.order(), PixelOrder::Rgba);
    assert_eq!((pixels.width(), pixels.height()), (800, 400));
    Ok(())
}

#[test]
fn unknown_window_is_a_fatal_error() {
    let mut capture = SyntheticCapture::new();
    let mut textures = MemoryTextures::new();
    let result = WindowProxy::create(
        SourceHandle::new(1),
        Point3::origin(),
        &Camera::default(),
        &mut capture,
        &mut textures,
    );
    assert!(matches!(result, Err(ref err) if err.is_fatal()));
}

#[test]
fn failed_refresh_keeps_previous_texture() -> Result<()> {
    let handle = SourceHandle::new(3);
    let mut capture = SyntheticCapture::new().with_surface(handle, 16, 16);
    let mut textures = MemoryTextures::new();
    let proxy = WindowProxy::create(
        handle,
        Point3::origin(),
        &Camera::default(),
        &mut capture,
        &mut textures,
    )?;

    assert!(proxy.refresh_texture(&mut capture, &mut textures));
    assert_eq!(textures.revision(proxy.texture()), Some(1));

    capture.set_available(handle, false);
    let before = textures.pixels(proxy.texture()).cloned();
    assert!(!proxy.refresh_texture(&mut capture, &mut textures));
    assert_eq!(textures.revision(proxy.texture()), Some(1));
    assert_eq!(textures.pixels(proxy.texture()).cloned(), before);
    Ok(())
}

#[test]
fn toggle_visibility_flips_every_proxy() -> Result<()> {
    let mut capture = SyntheticCapture::new();
    let mut textures = MemoryTextures::new();
    let mut proxies = ProxyCollection::new();
    for raw in 1..=3 {
        let handle = SourceHandle::new(raw);
        capture.add_surface(handle, 32, 32);
        proxies.push(WindowProxy::create(
            handle,
            Point3::new(raw as f64, 0.0, 0.0),
            &Camera::default(),
            &mut capture,
            &mut textures,
        )?);
    }

    proxies.toggle_visibility_all();
    assert!(proxies.iter().all(|(_, proxy)| !proxy.visible));
    proxies.toggle_visibility_all();
    assert!(proxies.iter().all(|(_, proxy)| proxy.visible));
    let order: Vec<u64> = proxies.iter().map(|(_, proxy)| proxy.source.raw()).collect();
    assert_eq!(order, vec![1, 2, 3]);
    Ok(())
}
