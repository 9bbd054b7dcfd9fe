use std::fmt;

use float_pretty_print::PrettyPrintFloat;

use crate::imped_math::Cplx;

/// Impedance together with its polar form, ready for display.
///
/// `{}` prints with the default number width, `{:.N}` caps
/// every printed number at `N` characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpedanceReport {
    pub impedance: Cplx,
    /// |Z|, Ohm
    pub magnitude: f64,
    /// arg(Z), radians
    pub phase: f64,
}

impl ImpedanceReport {
    pub fn new(impedance: Cplx) -> Self {
        Self { impedance, magnitude: impedance.norm(), phase: impedance.arg() }
    }
}

impl From<Cplx> for ImpedanceReport {
    fn from(z: Cplx) -> Self {
        Self::new(z)
    }
}

struct Num(f64, Option<usize>);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some(width) => write!(f, "{:.*}", width, PrettyPrintFloat(self.0)),
            None => write!(f, "{}", PrettyPrintFloat(self.0)),
        }
    }
}

impl fmt::Display for ImpedanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = f.precision();
        let Cplx { re, im } = self.impedance;
        let sign = if im.is_sign_negative() { '-' } else { '+' };

        writeln!(f, "IMPEDANCE: {} {} {}j Ohm", Num(re, w), sign, Num(im.abs(), w))?;
        writeln!(f, "IMPEDANCE MAGNITUDE: {} Ohm", Num(self.magnitude, w))?;
        write!(f, "IMPEDANCE PHASE: {} rad", Num(self.phase, w))
    }
}


#[cfg(test)]
mod test {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_polar_form() {
        let r = ImpedanceReport::new(Cplx::new(100.0, 0.0));
        assert_relative_eq!(r.magnitude, 100.0);
        assert_relative_eq!(r.phase, 0.0);

        let r = ImpedanceReport::from(Cplx::new(3.0, -4.0));
        assert_relative_eq!(r.magnitude, 5.0);
        assert!(r.phase < 0.0);

        let r = ImpedanceReport::new(Cplx::new(0.0, 18.85));
        assert_relative_eq!(r.phase, FRAC_PI_2);
    }

    #[test]
    fn test_display_lines() {
        let text = format!("{}", ImpedanceReport::new(Cplx::new(3.0, -4.0)));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("IMPEDANCE: "));
        assert!(lines[0].contains(" - "));
        assert!(lines[1].starts_with("IMPEDANCE MAGNITUDE: "));
        assert!(lines[2].ends_with(" rad"));

        let narrow = format!("{:.6}", ImpedanceReport::new(Cplx::new(1.0, 2.0)));
        assert!(narrow.contains(" + "));
    }
}
