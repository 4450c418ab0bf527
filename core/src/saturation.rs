use bitflags::bitflags;

bitflags! {
    /// Packed per-axis saturation report published after every mix.
    ///
    /// The bit layout is a wire contract shared with outer control loops;
    /// consumers use it to stop winding integrators into a saturated axis.
    /// A `*_POS` flag means a positive change of the commanded axis would
    /// deepen the saturation of at least one rotor, `*_NEG` a negative one.
    pub struct SaturationStatus: u16 {
        const VALID = 1 << 0;
        const ROLL_POS = 1 << 1;
        const ROLL_NEG = 1 << 2;
        const PITCH_POS = 1 << 3;
        const PITCH_NEG = 1 << 4;
        const YAW_POS = 1 << 5;
        const YAW_NEG = 1 << 6;
        /// Legacy single-axis thrust flags, kept for layout compatibility;
        /// six-axis mixers report through the per-axis thrust flags below.
        const THRUST_POS = 1 << 7;
        const THRUST_NEG = 1 << 8;
        const X_THRUST_POS = 1 << 9;
        const X_THRUST_NEG = 1 << 10;
        const Y_THRUST_POS = 1 << 11;
        const Y_THRUST_NEG = 1 << 12;
        const Z_THRUST_POS = 1 << 13;
        const Z_THRUST_NEG = 1 << 14;
        /// Set when the x, y and z thrust axes are all controllable.
        const THRUST_AXES_VALID = 1 << 15;
    }
}

impl SaturationStatus {
    /// Positive-direction flag per command axis, indexed roll..z_thrust.
    pub const AXIS_POS: [SaturationStatus; 6] = [
        Self::ROLL_POS,
        Self::PITCH_POS,
        Self::YAW_POS,
        Self::X_THRUST_POS,
        Self::Y_THRUST_POS,
        Self::Z_THRUST_POS,
    ];

    /// Negative-direction flag per command axis, indexed roll..z_thrust.
    pub const AXIS_NEG: [SaturationStatus; 6] = [
        Self::ROLL_NEG,
        Self::PITCH_NEG,
        Self::YAW_NEG,
        Self::X_THRUST_NEG,
        Self::Y_THRUST_NEG,
        Self::Z_THRUST_NEG,
    ];
}
