use crate::assets::ImageSlot;
use crate::element::Element;
use crate::layer::{ElementId, Layer};
use crate::page::LayerId;

/// Gallery state of a work page: which asset is shown, and handles to the image and
/// the `01/NN` indicator it keeps in sync.
#[derive(Debug, Clone)]
pub struct MediaViewer {
    layer: LayerId,
    image: ElementId,
    indicator: ElementId,
    slots: Vec<Option<ImageSlot>>,
    index: usize,
}

impl MediaViewer {
    pub fn new(layer: LayerId, image: ElementId, indicator: ElementId, slots: Vec<Option<ImageSlot>>) -> Self {
        Self {
            layer,
            image,
            indicator,
            slots,
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// `"03/12"`: one-based position and total, zero-padded to two digits.
    pub fn indicator_text(index: usize, count: usize) -> String {
        format!("{:02}/{:02}", index + 1, count)
    }

    /// Move by `delta` items, wrapping at both ends, and refresh the image and
    /// indicator in `layers`.
    pub fn step(&mut self, delta: i32, layers: &mut [Layer]) {
        let count = self.slots.len();
        if count == 0 {
            return;
        }
        self.index = (self.index as i64 + delta as i64).rem_euclid(count as i64) as usize;

        let Some(layer) = layers.get_mut(self.layer.index()) else {
            return;
        };
        if let Some(text) = layer.element_mut(self.indicator).and_then(Element::as_text_mut) {
            text.set_text(&Self::indicator_text(self.index, count));
        }
        if let Some(image) = layer.element_mut(self.image).and_then(Element::as_image_mut) {
            image.set_slot(self.slots[self.index].clone());
        }
    }
}
