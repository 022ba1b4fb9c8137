// Vec3
/// Position in meters, in the host's world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// Quat
/// Orientation as an `(x, y, z, w)` quaternion.
///
/// Tracking input is expected to hand over unit quaternions. Nothing here
/// renormalizes on the way through the wire; a bundle decodes to exactly the
/// components that were encoded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat::from_xyzw(0.0, 0.0, 0.0, 1.0);

    pub const fn from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Returns the unit quaternion pointing the same way, or `None` when the
    /// input has zero length or non-finite components.
    pub fn normalize(&self) -> Option<Quat> {
        let length = self.length();
        if !length.is_finite() || length <= f32::EPSILON {
            return None;
        }
        Some(Quat::from_xyzw(
            self.x / length,
            self.y / length,
            self.z / length,
            self.w / length,
        ))
    }

    pub fn is_normalized(&self, tolerance: f32) -> bool {
        self.is_finite() && (self.length() - 1.0).abs() <= tolerance
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

// Pose
/// A tracked point: where it is and which way it faces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose::new(Vec3::ZERO, Quat::IDENTITY);

    /// Pairs a position with an orientation. The orientation is stored as
    /// given, without renormalizing.
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

// PoseBundle
/// One replicated snapshot of a player's tracked head and hands.
///
/// The three poses always travel together: there is no way to build, encode
/// or decode a bundle that is missing one of them. Bundles are plain values;
/// a newer snapshot is a new bundle, never an edit of an old one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseBundle {
    head: Pose,
    left_hand: Pose,
    right_hand: Pose,
}

impl PoseBundle {
    pub fn new(head: Pose, left_hand: Pose, right_hand: Pose) -> Self {
        Self {
            head,
            left_hand,
            right_hand,
        }
    }

    pub fn head(&self) -> &Pose {
        &self.head
    }

    pub fn left_hand(&self) -> &Pose {
        &self.left_hand
    }

    pub fn right_hand(&self) -> &Pose {
        &self.right_hand
    }
}
