use panespace_base::cgmath64::Point3;

use crate::proxy::{ProxyId, WindowProxy};

/// Proxies in insertion order. Proxies are never removed; hiding is done
/// through `WindowProxy::visible`.
#[derive(Clone, Debug, Default)]
pub struct ProxyCollection {
    proxies: Vec<WindowProxy>,
}

impl ProxyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, proxy: WindowProxy) -> ProxyId {
        self.proxies.push(proxy);
        ProxyId::new(self.proxies.len() - 1)
    }

    pub fn get(&self, id: ProxyId) -> Option<&WindowProxy> {
        self.proxies.get(id.index())
    }

    pub fn get_mut(&mut self, id: ProxyId) -> Option<&mut WindowProxy> {
        self.proxies.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProxyId, &WindowProxy)> {
        self.proxies
            .iter()
            .enumerate()
            .map(|(idx, proxy)| (ProxyId::new(idx), proxy))
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    pub fn toggle_visibility_all(&mut self) {
        for proxy in &mut self.proxies {
            proxy.visible = !proxy.visible;
        }
    }

    pub fn face_all_toward(&mut self, target: Point3) {
        for proxy in &mut self.proxies {
            proxy.face(target);
        }
    }
}
