//! Background image loading.
//!
//! Decoding runs on a single worker thread fed through a channel. Each requested image
//! gets a write-once [`ImageSlot`]; the worker fills it once decoding succeeds, and
//! elements simply skip drawing while the slot is empty. Failures are logged and never
//! retried.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

use crate::core::pixmap::{self, Pixmap};
use crate::error::{FieldError, Result};

/// Shared write-once slot holding a decoded image.
pub type ImageSlot = Arc<OnceLock<Pixmap>>;

struct Job {
    path: PathBuf,
    slot: ImageSlot,
}

pub struct AssetLoader {
    root: PathBuf,
    cache: HashMap<String, ImageSlot>,
    tx: Option<mpsc::Sender<Job>>,
    pending: Arc<AtomicUsize>,
    worker: Option<thread::JoinHandle<()>>,
}

impl AssetLoader {
    /// Start the worker thread. Asset `src` paths resolve against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let pending = Arc::new(AtomicUsize::new(0));
        let worker_pending = Arc::clone(&pending);

        let worker = thread::Builder::new()
            .name("asset-loader".to_string())
            .spawn(move || {
                for job in rx {
                    match decode(&job.path) {
                        Ok(pixmap) => {
                            tracing::debug!(path = %job.path.display(), "asset decoded");
                            let _ = job.slot.set(pixmap);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "asset load failed");
                        }
                    }
                    worker_pending.fetch_sub(1, Ordering::AcqRel);
                }
            });

        let (tx, worker) = match worker {
            Ok(handle) => (Some(tx), Some(handle)),
            Err(e) => {
                tracing::warn!(error = %e, "asset loader thread unavailable; images disabled");
                (None, None)
            }
        };

        Self {
            root: root.into(),
            cache: HashMap::new(),
            tx,
            pending,
            worker,
        }
    }

    /// A loader that never decodes anything; every slot stays empty.
    pub fn disabled() -> Self {
        Self {
            root: PathBuf::new(),
            cache: HashMap::new(),
            tx: None,
            pending: Arc::new(AtomicUsize::new(0)),
            worker: None,
        }
    }

    /// Slot for `src`, queueing a decode the first time it is requested.
    pub fn request(&mut self, src: &str) -> ImageSlot {
        if let Some(slot) = self.cache.get(src) {
            return Arc::clone(slot);
        }
        let slot: ImageSlot = Arc::new(OnceLock::new());
        self.cache.insert(src.to_string(), Arc::clone(&slot));

        if let Some(tx) = &self.tx {
            let path = self.resolve(src);
            self.pending.fetch_add(1, Ordering::AcqRel);
            let job = Job {
                path,
                slot: Arc::clone(&slot),
            };
            if tx.send(job).is_err() {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                tracing::warn!(src, "asset loader stopped; request dropped");
            }
        }
        slot
    }

    /// Insert an already decoded image under `src`, replacing nothing already loaded.
    pub fn preload(&mut self, src: &str, pixmap: Pixmap) -> ImageSlot {
        let slot = self
            .cache
            .entry(src.to_string())
            .or_insert_with(|| Arc::new(OnceLock::new()));
        let _ = slot.set(pixmap);
        Arc::clone(slot)
    }

    /// Number of decodes queued or in progress.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Block until the queue drains or `timeout` elapses. Returns true when idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending() > 0 {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(2));
        }
        true
    }

    fn resolve(&self, src: &str) -> PathBuf {
        self.root.join(src.trim_start_matches('/'))
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Decode an image file into a [`Pixmap`].
pub fn decode(path: &Path) -> Result<Pixmap> {
    let img = image::open(path)
        .map_err(|source| FieldError::Asset {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let (w, h) = img.dimensions();
    pixmap::from_rgba8(w, h, img.as_raw()).ok_or_else(|| FieldError::Asset {
        path: path.to_path_buf(),
        source: image::ImageError::Limits(image::error::LimitError::from_kind(
            image::error::LimitErrorKind::DimensionError,
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;

    #[test]
    fn disabled_loader_hands_out_empty_slots() {
        let mut loader = AssetLoader::disabled();
        let a = loader.request("a.png");
        let b = loader.request("a.png");
        assert!(a.get().is_none());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn missing_file_leaves_slot_empty() {
        let mut loader = AssetLoader::new(std::env::temp_dir());
        let slot = loader.request("/definitely-not-here-ascii-field.png");
        assert!(loader.wait_idle(Duration::from_secs(5)));
        assert!(slot.get().is_none());
    }

    #[test]
    fn decodes_png_from_disk() {
        let dir = std::env::temp_dir().join(format!("ascii-field-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        img.save(dir.join("red.png")).unwrap();

        let mut loader = AssetLoader::new(&dir);
        let slot = loader.request("red.png");
        assert!(loader.wait_idle(Duration::from_secs(5)));
        let pm = slot.get().expect("decoded");
        assert_eq!((pm.width(), pm.height()), (2, 1));
        assert_eq!(pixmap::texel(pm, 1, 0), Some(Rgba::new(1.0, 0.0, 0.0, 1.0)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn preload_fills_slot_immediately() {
        let mut loader = AssetLoader::disabled();
        let slot = loader.preload("x", Pixmap::new(3, 3).unwrap());
        assert!(slot.get().is_some());
        assert!(loader.request("x").get().is_some());
    }
}
