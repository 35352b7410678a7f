mod common;

use audio_devices_lib::audio::devices;
use audio_devices_lib::{AudioDevicesError, Direction, TransportType};
use common::builtin_pair;
use proptest::prelude::*;

fn out_of_range() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1.0e6f64..0.0).prop_filter("strictly negative", |v| *v < 0.0),
        (1.0f64..1.0e6).prop_filter("strictly above one", |v| *v > 1.0),
    ]
}

proptest! {
    #[test]
    fn in_range_volumes_are_written_and_kept(value in 0.0f64..=1.0) {
        let hardware = builtin_pair();
        let mut speakers = devices::build(&hardware, 2).unwrap();

        speakers.set_volume(&hardware, Direction::Output, value).unwrap();

        prop_assert_eq!(speakers.output_volume, Some(value));
        prop_assert_eq!(hardware.device(2).unwrap().output_volume, Some(value as f32));
        prop_assert_eq!(hardware.writes().len(), 1);
    }

    #[test]
    fn out_of_range_volumes_are_rejected_before_writing(value in out_of_range()) {
        let hardware = builtin_pair();
        let mut speakers = devices::build(&hardware, 2).unwrap();

        let result = speakers.set_volume(&hardware, Direction::Output, value);

        prop_assert_eq!(result, Err(AudioDevicesError::InvalidVolumeValue { value }));
        prop_assert!(hardware.writes().is_empty());
        prop_assert_eq!(speakers.output_volume, Some(0.75));
    }

    #[test]
    fn transport_codes_map_to_a_variant_or_unknown(code in any::<u32>()) {
        let transport = TransportType::from_code(code);
        prop_assert!(transport == TransportType::Unknown || transport.code() == code);
    }
}
