use log::debug;

use sixdof_mixer_core::ControlSource;

use crate::{Error, MultirotorMixer};

impl<C: ControlSource> MultirotorMixer<C> {
    /// Build a mixer from one mixer-definition line:
    ///
    /// ```text
    /// S: <geometry> <roll> <pitch> <yaw> <x> <y> <z> <idle>
    /// ```
    ///
    /// The geometry key is at most 7 characters; the integer fields are
    /// the axis gains and the idle speed scaled by 1e4. The line must be
    /// newline terminated. On success returns the mixer and the unread
    /// remainder of `buf`.
    pub fn from_text(controls: C, buf: &str) -> Result<(Self, &str), Error> {
        let end = match buf.find('\n') {
            Some(index) => index,
            None => {
                debug!("mixer definition has no line ending");
                return Err(Error::Parse);
            }
        };

        let line = &buf[..end];
        match Self::parse_line(controls, line) {
            Ok(mixer) => Ok((mixer, &buf[end + 1..])),
            Err(error) => {
                debug!("multirotor mixer rejected: '{}'", line);
                Err(error)
            }
        }
    }

    fn parse_line(controls: C, line: &str) -> Result<Self, Error> {
        let mut tokens = line.split_whitespace();

        if tokens.next() != Some("S:") {
            return Err(Error::Parse);
        }

        let key = tokens.next().ok_or(Error::Parse)?;
        if key.len() > 7 {
            return Err(Error::Parse);
        }

        let mut fields = [0.0f32; 7];
        for field in fields.iter_mut() {
            let token = tokens.next().ok_or(Error::Parse)?;
            let raw: i32 = token.parse().map_err(|_| Error::Parse)?;
            *field = raw as f32 / 10000.0;
        }

        if tokens.next().is_some() {
            return Err(Error::Parse);
        }

        Self::new(
            controls, key, fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
            fields[6],
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use sixdof_mixer_core::Mixer;

    use crate::{Error, MultirotorMixer};

    fn idle_bus(_group: u8, _index: u8) -> f32 {
        0.0
    }

    fn full_z_bus(_group: u8, index: u8) -> f32 {
        if index == 5 {
            1.0
        } else {
            0.0
        }
    }

    #[test]
    fn accepts_a_full_definition() {
        let buf = "S: hex_x 10000 10000 10000 10000 10000 10000 0\n";
        let (mixer, rest) = MultirotorMixer::from_text(idle_bus, buf).unwrap();
        assert_eq!(mixer.rotor_count(), 6);
        assert_eq!(rest, "");
    }

    #[test]
    fn returns_the_unread_remainder() {
        let buf = "S: quad_x 10000 10000 10000 0 0 10000 0\nS: hex_x 0 0 0 0 0 0 0\n";
        let (mixer, rest) = MultirotorMixer::from_text(idle_bus, buf).unwrap();
        assert_eq!(mixer.rotor_count(), 4);
        assert_eq!(rest, "S: hex_x 0 0 0 0 0 0 0\n");
    }

    #[test]
    fn gains_are_scaled_by_ten_thousand() {
        let buf = "S: hex_x 10000 10000 10000 0 0 5000 0\n";
        let (mut mixer, _) = MultirotorMixer::from_text(full_z_bus, buf).unwrap();

        let mut outputs = [0.0f32; 6];
        assert_eq!(mixer.mix(&mut outputs), 6);
        for &output in &outputs {
            assert_abs_diff_eq!(output, 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn idle_speed_comes_from_the_last_field() {
        let buf = "S: quad_x 10000 10000 10000 0 0 10000 2000\n";
        let (mut mixer, _) = MultirotorMixer::from_text(idle_bus, buf).unwrap();

        let mut outputs = [0.0f32; 4];
        mixer.mix(&mut outputs);
        for &output in &outputs {
            assert_abs_diff_eq!(output, 0.2, epsilon = 1e-6);
        }
    }

    #[test]
    fn rejects_truncated_lines() {
        let result = MultirotorMixer::from_text(idle_bus, "S: hex_x 1000 1000\n");
        assert_eq!(result.err(), Some(Error::Parse));
    }

    #[test]
    fn rejects_missing_line_ending() {
        let result =
            MultirotorMixer::from_text(idle_bus, "S: hex_x 10000 10000 10000 0 0 10000 0");
        assert_eq!(result.err(), Some(Error::Parse));
    }

    #[test]
    fn rejects_unknown_geometry() {
        let result =
            MultirotorMixer::from_text(idle_bus, "S: octo_x 10000 10000 10000 0 0 10000 0\n");
        assert_eq!(result.err(), Some(Error::UnknownGeometry));
    }

    #[test]
    fn rejects_non_integer_fields() {
        let result =
            MultirotorMixer::from_text(idle_bus, "S: hex_x 10000 10000 1e4 0 0 10000 0\n");
        assert_eq!(result.err(), Some(Error::Parse));
    }

    #[test]
    fn rejects_overlong_geometry_keys() {
        let result =
            MultirotorMixer::from_text(idle_bus, "S: hexa_dof 10000 10000 10000 0 0 10000 0\n");
        assert_eq!(result.err(), Some(Error::Parse));
    }

    #[test]
    fn rejects_other_line_kinds() {
        let result =
            MultirotorMixer::from_text(idle_bus, "M: hex_x 10000 10000 10000 0 0 10000 0\n");
        assert_eq!(result.err(), Some(Error::Parse));
    }

    #[test]
    fn rejects_trailing_tokens() {
        let result =
            MultirotorMixer::from_text(idle_bus, "S: hex_x 10000 10000 10000 0 0 10000 0 7\n");
        assert_eq!(result.err(), Some(Error::Parse));
    }
}
