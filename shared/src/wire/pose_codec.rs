//! Wire encoding for `PoseBundle`.
//!
//! A bundle is 21 little-endian IEEE-754 `f32` values, 84 bytes, in this
//! fixed order:
//!
//! | offset | field                                  |
//! |--------|----------------------------------------|
//! | 0      | head position `x, y, z`                |
//! | 12     | head orientation `x, y, z, w`          |
//! | 28     | left hand position `x, y, z`           |
//! | 40     | left hand orientation `x, y, z, w`     |
//! | 56     | right hand position `x, y, z`          |
//! | 68     | right hand orientation `x, y, z, w`    |
//!
//! Both transport strategies and every peer depend on this layout; there is
//! no version byte and no handshake. Each `f32` goes through naia-serde's
//! scalar impl, which writes its little-endian bytes unchanged. Finite values
//! round-trip bit-exactly, so the documented tolerance is zero. Non-finite
//! values are carried as-is and rejected later by anchor validation.

use naia_serde::{BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr};

use crate::{
    pose::{Pose, PoseBundle, Quat, Vec3},
    wire::error::DecodeError,
};

/// Encoded size of one `PoseBundle`, in bytes.
pub const POSE_BUNDLE_WIRE_SIZE: usize = 84;

/// Maximum per-component difference between an encoded and decoded bundle.
pub const POSE_BUNDLE_TOLERANCE: f32 = 0.0;

pub fn encode(bundle: &PoseBundle) -> Vec<u8> {
    let mut writer = BitWriter::new();
    bundle.ser(&mut writer);
    writer.to_bytes().to_vec()
}

pub fn decode(bytes: &[u8]) -> Result<PoseBundle, DecodeError> {
    // length is checked up front so a bad buffer never reaches the reader
    if bytes.len() < POSE_BUNDLE_WIRE_SIZE {
        return Err(DecodeError::Truncated {
            expected: POSE_BUNDLE_WIRE_SIZE,
            actual: bytes.len(),
        });
    }
    if bytes.len() > POSE_BUNDLE_WIRE_SIZE {
        return Err(DecodeError::TrailingBytes {
            expected: POSE_BUNDLE_WIRE_SIZE,
            actual: bytes.len(),
        });
    }

    let mut reader = BitReader::new(bytes);
    let bundle = PoseBundle::de(&mut reader)?;
    Ok(bundle)
}

// Vec3
impl Serde for Vec3 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.x.ser(writer);
        self.y.ser(writer);
        self.z.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let x = f32::de(reader)?;
        let y = f32::de(reader)?;
        let z = f32::de(reader)?;
        Ok(Vec3::new(x, y, z))
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for Vec3 {
    fn const_bit_length() -> u32 {
        f32::const_bit_length() * 3
    }
}

// Quat
impl Serde for Quat {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.x.ser(writer);
        self.y.ser(writer);
        self.z.ser(writer);
        self.w.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let x = f32::de(reader)?;
        let y = f32::de(reader)?;
        let z = f32::de(reader)?;
        let w = f32::de(reader)?;
        Ok(Quat::from_xyzw(x, y, z, w))
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for Quat {
    fn const_bit_length() -> u32 {
        f32::const_bit_length() * 4
    }
}

// Pose
impl Serde for Pose {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.position.ser(writer);
        self.orientation.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let position = Vec3::de(reader)?;
        let orientation = Quat::de(reader)?;
        Ok(Pose::new(position, orientation))
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for Pose {
    fn const_bit_length() -> u32 {
        Vec3::const_bit_length() + Quat::const_bit_length()
    }
}

// PoseBundle
impl Serde for PoseBundle {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.head().ser(writer);
        self.left_hand().ser(writer);
        self.right_hand().ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        // all three are read before anything is built
        let head = Pose::de(reader)?;
        let left_hand = Pose::de(reader)?;
        let right_hand = Pose::de(reader)?;
        Ok(PoseBundle::new(head, left_hand, right_hand))
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for PoseBundle {
    fn const_bit_length() -> u32 {
        Pose::const_bit_length() * 3
    }
}
