// Animation clip data

/// A fixed sequence of pose data for one animation
///
/// Pose tracks are sampled by the renderer; playback only needs the
/// clip's identity and length.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "walk", "dance")
    pub name: String,
    /// Length of one playback cycle in seconds
    pub duration: f32,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration: duration.max(0.0),
        }
    }

    /// Create a clip from a frame count and frame rate
    pub fn from_frames(name: &str, frame_count: usize, fps: f32) -> Self {
        let duration = if fps > 0.0 {
            frame_count as f32 / fps
        } else {
            0.0
        };
        Self::new(name, duration)
    }
}
