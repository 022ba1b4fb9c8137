use posesync_shared::PoseBundle;

/// Host tracking input: the local headset and both controllers.
pub trait TrackingSource {
    /// Current head, left hand and right hand poses, sampled now.
    fn capture(&mut self) -> PoseBundle;
}
