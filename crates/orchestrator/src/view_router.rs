//! Current view and responsive layout selection.

use shared::view::{DeviceCategory, DeviceType, View, Viewport};

#[derive(Debug, Clone)]
pub struct ViewRouter {
    current: View,
    show_welcome_island: bool,
    viewport: Viewport,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self {
            current: View::Home,
            show_welcome_island: true,
            viewport: Viewport::default(),
        }
    }
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Returns true if the view changed
    pub fn set_view(&mut self, view: View) -> bool {
        std::mem::replace(&mut self.current, view) != view
    }

    /// Home -> Chat, hiding the welcome island. Returns true if the view changed.
    pub fn start_chat(&mut self) -> bool {
        self.show_welcome_island = false;
        self.set_view(View::Chat)
    }

    /// Back to the home screen with the welcome island, used by "new chat"
    pub fn reset(&mut self) -> bool {
        self.show_welcome_island = true;
        self.set_view(View::Home)
    }

    pub fn show_welcome_island(&self) -> bool {
        self.show_welcome_island
    }

    pub fn set_show_welcome_island(&mut self, show: bool) {
        self.show_welcome_island = show;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) -> DeviceType {
        self.viewport = Viewport::new(width, height);
        self.viewport.device_type()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn device_type(&self) -> DeviceType {
        self.viewport.device_type()
    }

    /// Which layout tree the rendering layer mounts
    pub fn layout(&self) -> DeviceCategory {
        self.device_type().category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_chat_is_one_way() {
        let mut router = ViewRouter::new();
        assert!(router.show_welcome_island());

        assert!(router.start_chat());
        assert!(!router.start_chat());
        assert_eq!(router.current(), View::Chat);
        assert!(!router.show_welcome_island());

        assert!(router.reset());
        assert_eq!(router.current(), View::Home);
        assert!(router.show_welcome_island());
    }

    #[test]
    fn test_layout_follows_viewport() {
        let mut router = ViewRouter::new();
        assert_eq!(router.layout(), DeviceCategory::Desktop);

        assert_eq!(router.set_viewport(752, 1000), DeviceType::Tablet);
        assert_eq!(router.layout(), DeviceCategory::Tablet);
        assert!(router.viewport().is_portrait());

        router.set_viewport(390, 844);
        assert_eq!(router.layout(), DeviceCategory::Mobile);
    }
}
