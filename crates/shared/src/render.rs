use std::collections::HashMap;

use crate::geometry::Rect;

/// A 2D drawing target. The widget decides the pixel size it draws at.
pub trait Surface {
    type Image;

    fn clear(&mut self);

    /// Draw the `src` region of `image` stretched into `dst`.
    fn draw_region(&mut self, image: &Self::Image, src: Rect, dst: Rect);

    /// Draw the whole `image` into `dst`.
    fn draw_image(&mut self, image: &Self::Image, dst: Rect);
}

/// Load state of one image.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSlot<I> {
    Pending,
    Ready(I),
    Failed(String),
}

impl<I> AssetSlot<I> {
    pub fn ready(&self) -> Option<&I> {
        match self {
            AssetSlot::Ready(image) => Some(image),
            _ => None,
        }
    }

    /// Why the image could not be loaded.
    pub fn failure(&self) -> Option<&str> {
        match self {
            AssetSlot::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Images for one widget: the background plus one image per pin name.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSet<I> {
    map: AssetSlot<I>,
    pins: HashMap<String, AssetSlot<I>>,
}

impl<I> AssetSet<I> {
    /// Every listed pin starts out pending.
    pub fn pending<'a>(pin_names: impl IntoIterator<Item = &'a str>) -> Self {
        AssetSet {
            map: AssetSlot::Pending,
            pins: pin_names
                .into_iter()
                .map(|n| (n.to_string(), AssetSlot::Pending))
                .collect(),
        }
    }

    pub fn map(&self) -> &AssetSlot<I> {
        &self.map
    }

    pub fn set_map(&mut self, slot: AssetSlot<I>) {
        self.map = slot;
    }

    pub fn pin(&self, name: &str) -> Option<&AssetSlot<I>> {
        self.pins.get(name)
    }

    pub fn set_pin(&mut self, name: &str, slot: AssetSlot<I>) {
        self.pins.insert(name.to_string(), slot);
    }
}

/// What a draw call achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The background is still loading; nothing was drawn.
    Deferred,
    /// The background failed to load; nothing was drawn.
    MapUnavailable(String),
    Drawn {
        pins_drawn: usize,
        pins_pending: usize,
        pins_failed: usize,
    },
}
