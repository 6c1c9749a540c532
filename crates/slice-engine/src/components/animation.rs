//! Frame-counted animation clips.
//!
//! A clip advances one frame per simulation tick and holds each image for
//! `frame_duration` ticks. The image list is shared by every instance made
//! from the same template; playback position is per instance.

use std::sync::Arc;

use crate::assets::error::AssetError;
use crate::components::sprite::Image;

/// Playback state for one sequence of images.
#[derive(Debug, Clone)]
pub struct Clip {
    images: Arc<[Image]>,
    frame_duration: u32,
    looping: bool,
    frame: u32,
    finished: bool,
}

impl Clip {
    /// Build a clip template. `key` only names the clip in errors.
    pub fn new(
        key: &str,
        images: Vec<Image>,
        frame_duration: u32,
        looping: bool,
    ) -> Result<Self, AssetError> {
        if images.is_empty() {
            return Err(AssetError::EmptyClip(key.to_string()));
        }
        if frame_duration == 0 {
            return Err(AssetError::ZeroFrameDuration(key.to_string()));
        }
        Ok(Self {
            images: images.into(),
            frame_duration,
            looping,
            frame: 0,
            finished: false,
        })
    }

    /// A new instance sharing the image list, rewound to frame 0.
    pub fn fresh(&self) -> Self {
        Self {
            images: Arc::clone(&self.images),
            frame_duration: self.frame_duration,
            looping: self.looping,
            frame: 0,
            finished: false,
        }
    }

    /// Start playback at `frame` (clamped to the last valid frame).
    pub fn with_frame(mut self, frame: u32) -> Self {
        self.frame = frame.min(self.total_frames() - 1);
        self
    }

    /// Advance one tick.
    pub fn update(&mut self) {
        let total = self.total_frames();
        if self.looping {
            self.frame = (self.frame + 1) % total;
        } else {
            self.frame = (self.frame + 1).min(total - 1);
            if self.frame >= total - 1 {
                self.finished = true;
            }
        }
    }

    pub fn current_image(&self) -> Image {
        self.images[(self.frame / self.frame_duration) as usize]
    }

    /// Current tick within the clip, in [0, total_frames).
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Only ever true for non-looping clips that reached their last tick.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn frame_duration(&self) -> u32 {
        self.frame_duration
    }

    pub fn total_frames(&self) -> u32 {
        self.frame_duration * self.images.len() as u32
    }

    /// Whether two clips were made from the same template.
    #[cfg(test)]
    pub(crate) fn shares_images_with(&self, other: &Clip) -> bool {
        Arc::ptr_eq(&self.images, &other.images)
    }
}
