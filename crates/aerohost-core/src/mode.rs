// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Control mode values and their codec.
//!
//! A [`ControlMode`] packs three closed enumerations: the control law, the
//! yaw handling, and the reference frame. It has two wire forms:
//!
//! - a packed `u32` for transport: `control << 4 | yaw << 2 | frame`
//! - a dotted descriptor for manifests and logs: `position.yaw_angle.local_enu_frame`
//!
//! Both forms convert losslessly. Unknown sub-field values are rejected,
//! never coerced to a default.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::error::AerohostError;

const CONTROL_SHIFT: u32 = 4;
const YAW_SHIFT: u32 = 2;
const CONTROL_MASK: u32 = 0b1111;
const YAW_MASK: u32 = 0b11;
const FRAME_MASK: u32 = 0b11;
/// Highest bit pattern a valid mode can occupy.
const PACKED_MASK: u32 = 0xFF;

/// How the controller interprets its commands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    FromRepr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum ControlLaw {
    Unset = 0,
    Hover = 1,
    Position = 2,
    Speed = 3,
    #[strum(to_string = "speed_in_a_plane")]
    SpeedInAPlane = 4,
    Attitude = 5,
    Acro = 6,
    Trajectory = 7,
    Acel = 8,
}

/// How the controller handles heading.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    FromRepr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum YawMode {
    None = 0,
    YawAngle = 1,
    YawSpeed = 2,
}

/// Frame in which references are expressed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    FromRepr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum ReferenceFrame {
    UndefinedFrame = 0,
    LocalEnuFrame = 1,
    BodyFluFrame = 2,
    GlobalLatLongAsml = 3,
}

/// A sub-field of a control mode descriptor.
trait SubField: Sized + FromStr {
    const LABEL: &'static str;

    fn from_value(value: u8) -> Option<Self>;
}

impl SubField for ControlLaw {
    const LABEL: &'static str = "control law";

    fn from_value(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }
}

impl SubField for YawMode {
    const LABEL: &'static str = "yaw mode";

    fn from_value(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }
}

impl SubField for ReferenceFrame {
    const LABEL: &'static str = "reference frame";

    fn from_value(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }
}

/// A structured control mode.
///
/// Ordering follows the packed value, so sets of modes iterate in the same
/// order they would appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ControlMode {
    pub control: ControlLaw,
    pub yaw: YawMode,
    pub frame: ReferenceFrame,
}

impl ControlMode {
    /// The mode a controller reports before anything has been configured.
    pub const UNSET: ControlMode = ControlMode {
        control: ControlLaw::Unset,
        yaw: YawMode::None,
        frame: ReferenceFrame::UndefinedFrame,
    };

    pub const fn new(control: ControlLaw, yaw: YawMode, frame: ReferenceFrame) -> Self {
        Self {
            control,
            yaw,
            frame,
        }
    }

    /// Packs the mode into its transport integer.
    pub const fn pack(self) -> u32 {
        ((self.control as u32) << CONTROL_SHIFT)
            | ((self.yaw as u32) << YAW_SHIFT)
            | (self.frame as u32)
    }

    /// Unpacks a transport integer.
    ///
    /// Fails when bits above the packed range are set or when any sub-field
    /// has no mapping.
    pub fn unpack(bits: u32) -> Result<Self, AerohostError> {
        let invalid = || AerohostError::InvalidModeEncoding { bits };
        if bits & !PACKED_MASK != 0 {
            return Err(invalid());
        }
        // Each masked value fits in a u8 after the range check above.
        let control = ControlLaw::from_value(((bits >> CONTROL_SHIFT) & CONTROL_MASK) as u8)
            .ok_or_else(invalid)?;
        let yaw = YawMode::from_value(((bits >> YAW_SHIFT) & YAW_MASK) as u8).ok_or_else(invalid)?;
        let frame = ReferenceFrame::from_value((bits & FRAME_MASK) as u8).ok_or_else(invalid)?;
        Ok(Self::new(control, yaw, frame))
    }
}

impl Default for ControlMode {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.control, self.yaw, self.frame)
    }
}

impl FromStr for ControlMode {
    type Err = AerohostError;

    /// Parses a single `control.yaw.frame` descriptor. Each field is either a
    /// snake-case name (case-insensitive) or its decimal value.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let trimmed = token.trim();
        let fields: Vec<&str> = trimmed.split('.').collect();
        let [control, yaw, frame] = fields.as_slice() else {
            return Err(malformed(
                token,
                format!("expected 3 dot-separated fields, found {}", fields.len()),
            ));
        };
        Ok(Self::new(
            parse_sub_field(control, token)?,
            parse_sub_field(yaw, token)?,
            parse_sub_field(frame, token)?,
        ))
    }
}

impl TryFrom<String> for ControlMode {
    type Error = AerohostError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ControlMode> for String {
    fn from(mode: ControlMode) -> Self {
        mode.to_string()
    }
}

fn malformed(token: &str, reason: String) -> AerohostError {
    AerohostError::MalformedModeDescriptor {
        token: token.to_string(),
        reason,
    }
}

fn parse_sub_field<T: SubField>(raw: &str, token: &str) -> Result<T, AerohostError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(malformed(token, format!("empty {} field", T::LABEL)));
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<u8>()
            .ok()
            .and_then(T::from_value)
            .ok_or_else(|| malformed(token, format!("{} value {raw} is out of range", T::LABEL)));
    }
    raw.parse::<T>()
        .map_err(|_| malformed(token, format!("unknown {} `{raw}`", T::LABEL)))
}

/// Packs a mode into its transport integer.
pub fn pack(mode: ControlMode) -> u32 {
    mode.pack()
}

/// Unpacks a transport integer into a mode.
pub fn unpack(bits: u32) -> Result<ControlMode, AerohostError> {
    ControlMode::unpack(bits)
}

/// Parses a list of descriptor tokens into a [`ModeSet`].
///
/// Blank tokens are skipped. The first malformed token aborts the parse.
pub fn parse_modes<I, S>(tokens: I) -> Result<ModeSet, AerohostError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut modes = BTreeSet::new();
    for token in tokens {
        let token = token.as_ref();
        if token.trim().is_empty() {
            continue;
        }
        modes.insert(token.parse::<ControlMode>()?);
    }
    Ok(ModeSet(modes))
}

/// A set of control modes. Duplicates collapse and order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeSet(BTreeSet<ControlMode>);

impl ModeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, mode: &ControlMode) -> bool {
        self.0.contains(mode)
    }

    /// Iterates modes in packed order.
    pub fn iter(&self) -> impl Iterator<Item = &ControlMode> {
        self.0.iter()
    }

    /// The lowest mode in packed order, if any.
    pub fn first(&self) -> Option<ControlMode> {
        self.0.first().copied()
    }

    /// Packed transport values, ascending.
    pub fn packed(&self) -> Vec<u32> {
        self.0.iter().map(|m| m.pack()).collect()
    }
}

impl FromIterator<ControlMode> for ModeSet {
    fn from_iter<T: IntoIterator<Item = ControlMode>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ModeSet {
    type Item = &'a ControlMode;
    type IntoIter = std::collections::btree_set::Iter<'a, ControlMode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for mode in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{mode}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn pack_uses_nibble_and_two_bit_fields() {
        let mode = ControlMode::new(
            ControlLaw::Position,
            YawMode::YawAngle,
            ReferenceFrame::LocalEnuFrame,
        );
        assert_eq!(mode.pack(), 0b0010_0101);
        assert_eq!(ControlMode::UNSET.pack(), 0);
    }

    #[test]
    fn every_mode_round_trips() {
        for control in ControlLaw::iter() {
            for yaw in YawMode::iter() {
                for frame in ReferenceFrame::iter() {
                    let mode = ControlMode::new(control, yaw, frame);
                    assert_eq!(ControlMode::unpack(mode.pack()).unwrap(), mode);
                    assert_eq!(mode.to_string().parse::<ControlMode>().unwrap(), mode);
                }
            }
        }
    }

    #[test]
    fn unpack_rejects_unmapped_control_law() {
        let err = ControlMode::unpack(0b1001_0000).unwrap_err();
        assert!(matches!(err, AerohostError::InvalidModeEncoding { bits: 0b1001_0000 }));
    }

    #[test]
    fn unpack_rejects_unmapped_yaw() {
        assert!(ControlMode::unpack(0b0001_1100).is_err());
    }

    #[test]
    fn unpack_rejects_high_bits() {
        assert!(ControlMode::unpack(0x100).is_err());
        assert!(ControlMode::unpack(u32::MAX).is_err());
    }

    #[test]
    fn display_uses_snake_case_names() {
        let mode = ControlMode::new(
            ControlLaw::SpeedInAPlane,
            YawMode::YawSpeed,
            ReferenceFrame::GlobalLatLongAsml,
        );
        assert_eq!(mode.to_string(), "speed_in_a_plane.yaw_speed.global_lat_long_asml");
    }

    #[test]
    fn descriptor_accepts_numbers_and_mixed_case() {
        let by_name: ControlMode = "Speed.YAW_SPEED.body_flu_frame".parse().unwrap();
        let by_value: ControlMode = "3.2.2".parse().unwrap();
        assert_eq!(by_name, by_value);
    }

    #[test]
    fn descriptor_rejects_wrong_field_count() {
        let err = "hover.none".parse::<ControlMode>().unwrap_err();
        match err {
            AerohostError::MalformedModeDescriptor { token, reason } => {
                assert_eq!(token, "hover.none");
                assert!(reason.contains("found 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!("hover.none.undefined_frame.extra".parse::<ControlMode>().is_err());
    }

    #[test]
    fn descriptor_rejects_out_of_range_values() {
        assert!("9.0.0".parse::<ControlMode>().is_err());
        assert!("0.3.0".parse::<ControlMode>().is_err());
        assert!("0.0.4".parse::<ControlMode>().is_err());
        assert!("300.0.0".parse::<ControlMode>().is_err());
        assert!("warp.none.undefined_frame".parse::<ControlMode>().is_err());
        assert!("hover..undefined_frame".parse::<ControlMode>().is_err());
    }

    #[test]
    fn parse_modes_collapses_duplicates_and_skips_blanks() {
        let set = parse_modes([
            "hover.none.undefined_frame",
            " ",
            "1.0.0",
            "position.yaw_angle.local_enu_frame",
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.packed(), vec![0b0001_0000, 0b0010_0101]);
    }

    #[test]
    fn parse_modes_reports_offending_token() {
        let err = parse_modes(["hover.none.undefined_frame", "bogus"]).unwrap_err();
        assert!(err.to_string().contains("`bogus`"));
    }

    #[test]
    fn mode_serializes_as_descriptor() {
        let mode: ControlMode = "acro.yaw_speed.body_flu_frame".parse().unwrap();
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, "\"acro.yaw_speed.body_flu_frame\"");
        let back: ControlMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mode);
        assert!(serde_json::from_str::<ControlMode>("\"acro.sideways.body_flu_frame\"").is_err());
    }

    #[test]
    fn mode_set_display_is_sorted() {
        let set =
            parse_modes(["speed.none.local_enu_frame", "hover.none.undefined_frame"]).unwrap();
        assert_eq!(
            set.to_string(),
            "hover.none.undefined_frame, speed.none.local_enu_frame"
        );
        assert_eq!(set.first(), Some("hover.none.undefined_frame".parse().unwrap()));
    }
}
