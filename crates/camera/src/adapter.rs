use foundation::{Insets, LatLng, LatLngBounds, ZoomLevel};

/// Opaque token returned by [`MapAdapter::on_zoom_changed`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionHandle(pub u64);

/// Callback fired by the widget after its zoom level changed.
pub type ZoomHandler = Box<dyn Fn() + Send + Sync>;

/// What the camera controller needs from a map-rendering widget.
///
/// Methods take `&self`: widgets are handles to externally owned state, so
/// implementations use interior mutability. Every method must tolerate being
/// called before the widget finished loading (ignore the call or queue it).
pub trait MapAdapter: Send + Sync {
    /// `false` until the widget can accept camera commands.
    fn is_loaded(&self) -> bool {
        true
    }

    /// Current zoom, or `None` if the widget has not settled on one yet.
    fn zoom(&self) -> Option<ZoomLevel>;

    fn set_zoom(&self, level: ZoomLevel);

    /// Pans with the widget's own native animation.
    fn pan_to(&self, center: LatLng);

    fn fit_bounds(&self, bounds: LatLngBounds, insets: Insets);

    fn on_zoom_changed(&self, handler: ZoomHandler) -> SubscriptionHandle;

    fn unsubscribe(&self, handle: SubscriptionHandle);
}

/// Zoom-changed listener that unsubscribes itself when dropped.
pub struct ZoomSubscription<'a> {
    map: &'a dyn MapAdapter,
    handle: SubscriptionHandle,
}

impl<'a> ZoomSubscription<'a> {
    pub fn new(map: &'a dyn MapAdapter, handler: ZoomHandler) -> Self {
        let handle = map.on_zoom_changed(handler);
        Self { map, handle }
    }

    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }
}

impl Drop for ZoomSubscription<'_> {
    fn drop(&mut self) {
        self.map.unsubscribe(self.handle);
    }
}

impl std::fmt::Debug for ZoomSubscription<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomSubscription")
            .field("handle", &self.handle)
            .finish()
    }
}
