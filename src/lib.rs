#![no_std]

pub use sixdof_mixer_geometry as geometry;
pub use sixdof_mixer_multirotor as multirotor;

pub use sixdof_mixer_core::{
    Airmode, ControlSource, Mixer, SaturationStatus, CONTROL_GROUP, INDEX_PITCH, INDEX_ROLL,
    INDEX_X_THRUST, INDEX_YAW, INDEX_Y_THRUST, INDEX_Z_THRUST,
};

pub use geometry::{find, Geometry, RotorDescriptor, MAX_ROTOR_COUNT};
pub use multirotor::{Error, MultirotorMixer};
