//! The set of images the user has chosen in this session.

use crate::models::{DecorationImage, SelectedImage};

/// Handle returned by [`SelectionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&[SelectedImage]) + Send>;

/// Insertion-ordered set of [`SelectedImage`] keyed by image id.
///
/// Every mutation that changes the set calls each subscriber synchronously
/// with the new contents before returning.
#[derive(Default)]
pub struct SelectionStore {
    images: Vec<SelectedImage>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("images", &self.images)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `image` under `decoration_type_name`. No-op if already selected.
    pub fn add(&mut self, image: &DecorationImage, decoration_type_name: &str) {
        if self.is_selected(image.id) {
            return;
        }
        self.images
            .push(SelectedImage::from_image(image, decoration_type_name));
        tracing::debug!(image_id = image.id, decoration_type = decoration_type_name, "image selected");
        self.notify();
    }

    /// Deselect the image with `image_id`, if present.
    pub fn remove(&mut self, image_id: i64) {
        let before = self.images.len();
        self.images.retain(|img| img.image_id != image_id);
        if self.images.len() != before {
            tracing::debug!(image_id, "image deselected");
            self.notify();
        }
    }

    pub fn clear(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.images.clear();
        tracing::debug!("selection cleared");
        self.notify();
    }

    /// Flip membership of `image`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, image: &DecorationImage, decoration_type_name: &str) -> bool {
        if self.is_selected(image.id) {
            self.remove(image.id);
            false
        } else {
            self.add(image, decoration_type_name);
            true
        }
    }

    pub fn is_selected(&self, image_id: i64) -> bool {
        self.images.iter().any(|img| img.image_id == image_id)
    }

    /// Entries selected under `decoration_type_name`, in selection order.
    pub fn list_by_decoration_type(&self, decoration_type_name: &str) -> Vec<SelectedImage> {
        self.images
            .iter()
            .filter(|img| img.decoration_type_name == decoration_type_name)
            .cloned()
            .collect()
    }

    /// Distinct decoration-type names in order of first selection.
    pub fn decoration_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for img in &self.images {
            if !names.contains(&img.decoration_type_name.as_str()) {
                names.push(&img.decoration_type_name);
            }
        }
        names
    }

    pub fn all(&self) -> &[SelectedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&[SelectedImage]) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    fn notify(&self) {
        for (_, callback) in &self.subscribers {
            callback(&self.images);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn image(id: i64, name: &str, url: &str) -> DecorationImage {
        DecorationImage {
            id,
            name: name.to_string(),
            image_url: url.to_string(),
            description: None,
            decoration_type_id: Some(4),
            decoration_type_name: Some("Mandap".to_string()),
            is_active: Some(true),
            display_order: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn rose_arch_scenario() {
        let mut store = SelectionStore::new();
        let rose = image(7, "Rose Arch", "u1");

        store.add(&rose, "Mandap");
        assert!(store.is_selected(7));

        let mandap = store.list_by_decoration_type("Mandap");
        assert_eq!(mandap.len(), 1);
        assert_eq!(mandap[0].image_id, 7);
        assert_eq!(mandap[0].image_name, "Rose Arch");
        assert_eq!(mandap[0].image_url, "u1");

        store.add(&rose, "Mandap");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_add_keeps_first_type_name() {
        let mut store = SelectionStore::new();
        let rose = image(7, "Rose Arch", "u1");
        store.add(&rose, "Mandap");
        store.add(&rose, "Stage");
        assert_eq!(store.len(), 1);
        assert!(store.list_by_decoration_type("Stage").is_empty());
    }

    #[test]
    fn remove_then_is_selected_is_false() {
        let mut store = SelectionStore::new();
        store.remove(7);
        assert!(!store.is_selected(7));

        store.add(&image(7, "Rose Arch", "u1"), "Mandap");
        store.remove(7);
        assert!(!store.is_selected(7));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_empties_every_type() {
        let mut store = SelectionStore::new();
        store.add(&image(1, "A", "a"), "Mandap");
        store.add(&image(2, "B", "b"), "Stage");
        store.clear();
        for name in ["Mandap", "Stage", ""] {
            assert!(store.list_by_decoration_type(name).is_empty());
        }
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut store = SelectionStore::new();
        store.add(&image(3, "C", "c"), "Mandap");
        store.add(&image(1, "A", "a"), "Stage");
        store.add(&image(2, "B", "b"), "Mandap");
        let ids: Vec<i64> = store
            .list_by_decoration_type("Mandap")
            .iter()
            .map(|s| s.image_id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(store.decoration_type_names(), vec!["Mandap", "Stage"]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut store = SelectionStore::new();
        let img = image(5, "Marigold", "m");
        assert!(store.toggle(&img, "Mandap"));
        assert!(store.is_selected(5));
        assert!(!store.toggle(&img, "Mandap"));
        assert!(!store.is_selected(5));
    }

    #[test]
    fn subscribers_see_changes_only() {
        let mut store = SelectionStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let last_len = Arc::new(AtomicUsize::new(usize::MAX));
        let (c, l) = (calls.clone(), last_len.clone());
        let id = store.subscribe(move |images| {
            c.fetch_add(1, Ordering::SeqCst);
            l.store(images.len(), Ordering::SeqCst);
        });

        let img = image(7, "Rose Arch", "u1");
        store.add(&img, "Mandap");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(last_len.load(Ordering::SeqCst), 1);

        store.add(&img, "Mandap"); // duplicate
        store.remove(99); // absent
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(last_len.load(Ordering::SeqCst), 0);

        store.clear(); // already empty
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        store.unsubscribe(id);
        store.add(&img, "Mandap");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
