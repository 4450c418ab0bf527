use crate::{Geometry, RotorDescriptor};

/// Compiled-in rotor layouts.
///
/// Scale columns are (roll, pitch, yaw, x thrust, y thrust, z thrust).
/// Planar frames carry zero x/y columns; the tilted hex trades a share of
/// vertical thrust (cos 30 deg) for lateral authority.
pub static GEOMETRIES: [Geometry; 3] = [
    Geometry {
        key: "quad_x",
        rotors: &QUAD_X,
    },
    Geometry {
        key: "hex_x",
        rotors: &HEX_X,
    },
    Geometry {
        key: "6x_dof",
        rotors: &SIX_DOF_X,
    },
];

static QUAD_X: [RotorDescriptor; 4] = [
    RotorDescriptor::new(-0.707107, 0.707107, 1.000000, 0.0, 0.0, 1.000000),
    RotorDescriptor::new(0.707107, -0.707107, 1.000000, 0.0, 0.0, 1.000000),
    RotorDescriptor::new(0.707107, 0.707107, -1.000000, 0.0, 0.0, 1.000000),
    RotorDescriptor::new(-0.707107, -0.707107, -1.000000, 0.0, 0.0, 1.000000),
];

static HEX_X: [RotorDescriptor; 6] = [
    RotorDescriptor::new(-1.000000, 0.000000, 1.000000, 0.0, 0.0, 1.000000),
    RotorDescriptor::new(1.000000, 0.000000, -1.000000, 0.0, 0.0, 1.000000),
    RotorDescriptor::new(0.500000, 0.866025, 1.000000, 0.0, 0.0, 1.000000),
    RotorDescriptor::new(-0.500000, -0.866025, -1.000000, 0.0, 0.0, 1.000000),
    RotorDescriptor::new(-0.500000, 0.866025, -1.000000, 0.0, 0.0, 1.000000),
    RotorDescriptor::new(0.500000, -0.866025, 1.000000, 0.0, 0.0, 1.000000),
];

static SIX_DOF_X: [RotorDescriptor; 6] = [
    RotorDescriptor::new(0.000000, 1.000000, -0.500000, 0.000000, 0.500000, 0.866025),
    RotorDescriptor::new(-0.866025, 0.500000, 0.500000, 0.433013, -0.250000, 0.866025),
    RotorDescriptor::new(-0.866025, -0.500000, -0.500000, -0.433013, -0.250000, 0.866025),
    RotorDescriptor::new(0.000000, -1.000000, 0.500000, 0.000000, 0.500000, 0.866025),
    RotorDescriptor::new(0.866025, -0.500000, -0.500000, 0.433013, -0.250000, 0.866025),
    RotorDescriptor::new(0.866025, 0.500000, 0.500000, -0.433013, -0.250000, 0.866025),
];
