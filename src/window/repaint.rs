use std::{rc::Rc, sync::Arc};

/// Capability to ask the renderer for a new frame.
///
/// Animated textures call this whenever the visible frame changes. Calls are
/// fire-and-forget and must not block.
pub trait RepaintRequester {
    fn repaint(&self);
}

impl RepaintRequester for winit::window::Window {
    fn repaint(&self) {
        self.request_redraw();
    }
}

impl<T: RepaintRequester + ?Sized> RepaintRequester for Arc<T> {
    fn repaint(&self) {
        (**self).repaint();
    }
}

impl<T: RepaintRequester + ?Sized> RepaintRequester for Rc<T> {
    fn repaint(&self) {
        (**self).repaint();
    }
}

/// Repaint sink that ignores every request, for headless playback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRepaint;

impl RepaintRequester for NoRepaint {
    fn repaint(&self) {}
}
