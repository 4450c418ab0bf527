use heapless::Vec;
use nalgebra::Vector6;
use num_traits::Float;

use sixdof_mixer_core::{
    ControlSource, Mixer, SaturationStatus, CONTROL_GROUP, INDEX_PITCH, INDEX_ROLL,
    INDEX_X_THRUST, INDEX_YAW, INDEX_Y_THRUST, INDEX_Z_THRUST,
};
use sixdof_mixer_geometry::{find, Geometry, MAX_ROTOR_COUNT};

use crate::Error;

/// Below this, a projection step is treated as orthogonal to a rotor
/// constraint and skipped.
const PROJECTION_EPSILON: f32 = 1e-6;

/// Axis groups handed to the feasibility projection in priority order:
/// vertical thrust, then roll/pitch, then yaw, then lateral thrust.
/// Saturation costs the later groups their authority first.
const PRIORITY_AXES: [[bool; 6]; 4] = [
    [false, false, false, false, false, true],
    [true, true, false, false, false, false],
    [false, false, true, false, false, false],
    [false, false, false, true, true, false],
];

/// Mixer for multirotor frames with up to six controllable axes.
///
/// Each rotor's scale vector is the normal of a pair of half-spaces
/// `out_min <= scale . y <= out_max`; every tick the desired command is
/// projected into their intersection, mapped through the actuator model
/// and slew limited against the previous tick's outputs.
pub struct MultirotorMixer<C> {
    controls: C,
    geometry: &'static Geometry,
    roll_scale: f32,
    pitch_scale: f32,
    yaw_scale: f32,
    x_scale: f32,
    y_scale: f32,
    z_scale: f32,
    out_min: f32,
    out_max: f32,
    delta_out_max: f32,
    thrust_factor: f32,
    controlled_axes: [bool; 6],
    outputs_prev: Vec<f32, MAX_ROTOR_COUNT>,
    saturation: SaturationStatus,
}

impl<C: ControlSource> MultirotorMixer<C> {
    /// Create a mixer for a registered geometry key.
    pub fn new(
        controls: C,
        key: &str,
        roll_scale: f32,
        pitch_scale: f32,
        yaw_scale: f32,
        x_scale: f32,
        y_scale: f32,
        z_scale: f32,
        idle_speed: f32,
    ) -> Result<Self, Error> {
        let geometry = find(key).ok_or(Error::UnknownGeometry)?;
        Ok(Self::with_geometry(
            controls,
            geometry,
            roll_scale,
            pitch_scale,
            yaw_scale,
            x_scale,
            y_scale,
            z_scale,
            idle_speed,
        ))
    }

    /// Create a mixer for an explicit geometry.
    pub fn with_geometry(
        controls: C,
        geometry: &'static Geometry,
        roll_scale: f32,
        pitch_scale: f32,
        yaw_scale: f32,
        x_scale: f32,
        y_scale: f32,
        z_scale: f32,
        idle_speed: f32,
    ) -> Self {
        debug_assert!(geometry.rotor_count() <= MAX_ROTOR_COUNT);

        // Rotors rest at idle, so slew limiting on the first tick is
        // relative to the idle output.
        let mut outputs_prev = Vec::new();
        for _ in 0..geometry.rotor_count() {
            outputs_prev.push(idle_speed).ok();
        }

        Self {
            controls,
            geometry,
            roll_scale,
            pitch_scale,
            yaw_scale,
            x_scale,
            y_scale,
            z_scale,
            out_min: idle_speed,
            out_max: 1.0,
            delta_out_max: 0.0,
            thrust_factor: 0.0,
            controlled_axes: geometry.controlled_axes(),
            outputs_prev,
            saturation: SaturationStatus::empty(),
        }
    }

    pub fn rotor_count(&self) -> usize {
        self.geometry.rotor_count()
    }

    pub fn geometry(&self) -> &'static Geometry {
        self.geometry
    }

    /// Read the six commands from the bus, apply the axis gains and clamp
    /// each to [-1, 1].
    fn command(&self) -> Vector6<f32> {
        let read = |index: u8, scale: f32| {
            (self.controls.get_control(CONTROL_GROUP, index) * scale).clamp(-1.0, 1.0)
        };

        Vector6::new(
            read(INDEX_ROLL, self.roll_scale),
            read(INDEX_PITCH, self.pitch_scale),
            read(INDEX_YAW, self.yaw_scale),
            read(INDEX_X_THRUST, self.x_scale),
            read(INDEX_Y_THRUST, self.y_scale),
            read(INDEX_Z_THRUST, self.z_scale),
        )
    }

    /// Project a desired command onto the set of commands that keep every
    /// rotor inside [out_min, out_max].
    ///
    /// Starting from the zero baseline, each priority group's desired
    /// values are copied into a candidate and the candidate is stepped
    /// back towards the baseline until no rotor constraint is violated.
    /// The accepted candidate becomes the baseline for the next group, so
    /// an infeasible command sheds the low-priority axes first.
    pub fn clip_command(&self, desired: &Vector6<f32>) -> Vector6<f32> {
        let mut command: Vector6<f32> = Vector6::zeros();

        for axes in &PRIORITY_AXES {
            let mut candidate = command;
            for j in 0..6 {
                if axes[j] {
                    candidate[j] = desired[j];
                }
            }

            // Step direction from the feasible baseline to the candidate.
            // A violated constraint pulls the candidate to the point where
            // the step crosses its saturation plane; every constraint that
            // held before still holds there.
            let u = candidate - command;

            for rotor in self.geometry.rotors {
                let b = rotor.axes();
                let out = candidate.dot(&b);

                if out > self.out_max {
                    let ub = u.dot(&b);
                    if ub.abs() > PROJECTION_EPSILON {
                        let k = (self.out_max - command.dot(&b)) / ub;
                        if (0.0..=1.0).contains(&k) {
                            candidate = command + u * k;
                        }
                    }
                } else if out < self.out_min {
                    let ub = u.dot(&b);
                    if ub.abs() > PROJECTION_EPSILON {
                        let k = (self.out_min - command.dot(&b)) / ub;
                        if (0.0..=1.0).contains(&k) {
                            candidate = command + u * k;
                        }
                    }
                }
            }

            command = candidate;
        }

        command
    }

    /// Invert the static actuator model `thrust = (1 - f) * pwm + f * pwm^2`.
    /// Negative thrust enters the square root as zero and maps to zero pwm.
    fn pwm_from_thrust(&self, thrust: f32) -> f32 {
        let factor = self.thrust_factor;
        -(1.0 - factor) / (2.0 * factor)
            + ((1.0 - factor) * (1.0 - factor) / (4.0 * factor * factor)
                + thrust.max(0.0) / factor)
                .sqrt()
    }

    /// Record which axis directions are pinned by a saturated rotor.
    ///
    /// A rotor at its upper limit cannot follow a command change that its
    /// scale maps to a further increase, so the sign of each scale entry
    /// selects the flagged direction; at the lower limit the directions
    /// flip.
    fn update_saturation(&mut self, index: usize, clipping_high: bool, clipping_low: bool) {
        let rotor = &self.geometry.rotors[index];

        for j in 0..6 {
            if clipping_high {
                if rotor.scale[j] > 0.0 {
                    self.saturation.insert(SaturationStatus::AXIS_POS[j]);
                } else if rotor.scale[j] < 0.0 {
                    self.saturation.insert(SaturationStatus::AXIS_NEG[j]);
                }
            }

            if clipping_low {
                if rotor.scale[j] > 0.0 {
                    self.saturation.insert(SaturationStatus::AXIS_NEG[j]);
                } else if rotor.scale[j] < 0.0 {
                    self.saturation.insert(SaturationStatus::AXIS_POS[j]);
                }
            }
        }

        self.saturation.insert(SaturationStatus::VALID);
    }
}

impl<C: ControlSource> Mixer for MultirotorMixer<C> {
    fn mix(&mut self, outputs: &mut [f32]) -> usize {
        let count = self.geometry.rotor_count();
        if outputs.len() < count {
            return 0;
        }

        // Axes the geometry has no authority over must not consume any of
        // the feasible region.
        let mut desired = self.command();
        for j in 0..6 {
            if !self.controlled_axes[j] {
                desired[j] = 0.0;
            }
        }

        let command = self.clip_command(&desired);

        for (output, rotor) in outputs.iter_mut().zip(self.geometry.rotors) {
            let mut out = command.dot(&rotor.axes());

            if self.thrust_factor > 0.0 {
                out = self.pwm_from_thrust(out);
            }

            *output = out.clamp(self.out_min, self.out_max);
        }

        self.saturation = SaturationStatus::empty();
        if self.controlled_axes[3] && self.controlled_axes[4] && self.controlled_axes[5] {
            self.saturation.insert(SaturationStatus::THRUST_AXES_VALID);
        }

        for i in 0..count {
            let mut clipping_high = false;
            let mut clipping_low = false;

            // Saturation against the static output limits, within a 1% band.
            if outputs[i] > 0.99 {
                clipping_high = true;
            } else if outputs[i] < self.out_min + 0.01 {
                clipping_low = true;
            }

            if self.delta_out_max > 0.0 {
                let delta_out = outputs[i] - self.outputs_prev[i];

                if delta_out > self.delta_out_max {
                    outputs[i] = self.outputs_prev[i] + self.delta_out_max;
                    clipping_high = true;
                } else if delta_out < -self.delta_out_max {
                    outputs[i] = self.outputs_prev[i] - self.delta_out_max;
                    clipping_low = true;
                }
            }

            self.outputs_prev[i] = outputs[i];
            self.update_saturation(i, clipping_high, clipping_low);
        }

        // Consumed every tick; callers opt back in with set_delta_out_max.
        self.delta_out_max = 0.0;

        count
    }

    fn groups_required(&self, groups: &mut u32) {
        *groups |= 1 << CONTROL_GROUP;
    }

    fn set_delta_out_max(&mut self, delta_out_max: f32) {
        self.delta_out_max = delta_out_max;
    }

    fn set_thrust_factor(&mut self, thrust_factor: f32) {
        self.thrust_factor = thrust_factor;
    }

    fn saturation_status(&self) -> SaturationStatus {
        self.saturation
    }
}
