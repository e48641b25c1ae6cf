// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the control mode codec.

use aerohost_core::{AerohostError, ControlLaw, ControlMode, ReferenceFrame, YawMode, parse_modes};
use proptest::prelude::*;
use proptest::sample::select;
use strum::IntoEnumIterator;

fn any_mode() -> impl Strategy<Value = ControlMode> {
    (
        select(ControlLaw::iter().collect::<Vec<_>>()),
        select(YawMode::iter().collect::<Vec<_>>()),
        select(ReferenceFrame::iter().collect::<Vec<_>>()),
    )
        .prop_map(|(control, yaw, frame)| ControlMode::new(control, yaw, frame))
}

proptest! {
    #[test]
    fn descriptor_pack_unpack_round_trip(mode in any_mode()) {
        let descriptor = mode.to_string();
        let set = parse_modes([descriptor.as_str()]).unwrap();
        let parsed = set.first().unwrap();
        prop_assert_eq!(ControlMode::unpack(parsed.pack()).unwrap(), parsed);
        prop_assert_eq!(parsed, mode);
    }

    #[test]
    fn unpack_accepts_exactly_the_packed_values(bits in any::<u32>()) {
        match ControlMode::unpack(bits) {
            Ok(mode) => prop_assert_eq!(mode.pack(), bits),
            Err(AerohostError::InvalidModeEncoding { bits: reported }) => {
                prop_assert_eq!(reported, bits)
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn wrong_field_count_is_rejected(fields in prop::collection::vec("[a-z_]{1,8}", 0..6usize)) {
        prop_assume!(fields.len() != 3);
        let token = fields.join(".");
        prop_assume!(!token.trim().is_empty());
        let is_malformed = matches!(
            parse_modes([token.as_str()]),
            Err(AerohostError::MalformedModeDescriptor { .. })
        );
        prop_assert!(is_malformed);
    }

    #[test]
    fn out_of_range_control_value_is_rejected(control in 9u32..1000, yaw in 0u32..3, frame in 0u32..4) {
        let token = format!("{control}.{yaw}.{frame}");
        prop_assert!(parse_modes([token.as_str()]).is_err());
    }

    #[test]
    fn out_of_range_yaw_or_frame_is_rejected(control in 0u32..9, yaw in 3u32..300, frame in 4u32..300) {
        let bad_yaw = format!("{control}.{yaw}.0");
        let bad_frame = format!("{control}.0.{frame}");
        prop_assert!(parse_modes([bad_yaw.as_str()]).is_err());
        prop_assert!(parse_modes([bad_frame.as_str()]).is_err());
    }

    #[test]
    fn parse_is_insensitive_to_order_and_whitespace(a in any_mode(), b in any_mode(), pad in " {0,3}") {
        let forward = vec![format!("{pad}{a}{pad}"), b.to_string()];
        let backward = vec![b.to_string(), format!("{pad}{a}")];
        prop_assert_eq!(parse_modes(&forward).unwrap(), parse_modes(&backward).unwrap());
    }
}
