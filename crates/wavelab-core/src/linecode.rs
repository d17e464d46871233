//! Line coding (digital→digital)
//!
//! Encodes a bit sequence directly into voltage levels, with no carrier.
//! Eight classical schemes are implemented:
//!
//! | Scheme | Rule |
//! |---|---|
//! | NRZ-L | 0 → +1 V, 1 → −1 V |
//! | NRZ-I | level inverts on every 1 |
//! | Manchester | mid-bit transition: 0 high→low, 1 low→high |
//! | Differential Manchester | mid-bit transition always; start transition on 0 |
//! | AMI | 0 → 0 V, marks alternate +1/−1 |
//! | Pseudoternary | 1 → 0 V, zeros alternate +1/−1 |
//! | B8ZS | AMI with `000VB0VB` substituted for 8 zeros |
//! | HDB3 | AMI with `000V`/`B00V` substituted for 4 zeros |
//!
//! The substitution codes insert deliberate bipolar violations (`V`, a mark
//! repeating the previous mark's polarity) so long zero runs still carry
//! clocking transitions. Their scan looks ahead in the original bit
//! sequence and jumps the scan index past each substituted group, so
//! overlapping candidate runs are never substituted twice.

use crate::config::LineCodeParams;
use crate::types::{canonical_scheme_name, Bits, Point, SignalError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line coding scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineCode {
    NrzL,
    NrzI,
    Manchester,
    DiffManchester,
    Ami,
    Pseudoternary,
    B8zs,
    Hdb3,
}

impl LineCode {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            LineCode::NrzL => "NRZ-L",
            LineCode::NrzI => "NRZ-I",
            LineCode::Manchester => "Manchester",
            LineCode::DiffManchester => "Differential Manchester",
            LineCode::Ami => "AMI",
            LineCode::Pseudoternary => "Pseudoternary",
            LineCode::B8zs => "B8ZS",
            LineCode::Hdb3 => "HDB3",
        }
    }

    /// All schemes, in presentation order
    pub fn all() -> [LineCode; 8] {
        [
            LineCode::NrzL,
            LineCode::NrzI,
            LineCode::Manchester,
            LineCode::DiffManchester,
            LineCode::Ami,
            LineCode::Pseudoternary,
            LineCode::B8zs,
            LineCode::Hdb3,
        ]
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LineCode {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_scheme_name(s).as_str() {
            "NRZL" => Ok(LineCode::NrzL),
            "NRZI" => Ok(LineCode::NrzI),
            "MANCHESTER" => Ok(LineCode::Manchester),
            "DIFFMANCHESTER" | "DIFFERENTIALMANCHESTER" => Ok(LineCode::DiffManchester),
            "AMI" => Ok(LineCode::Ami),
            "PSEUDOTERNARY" => Ok(LineCode::Pseudoternary),
            "B8ZS" => Ok(LineCode::B8zs),
            "HDB3" => Ok(LineCode::Hdb3),
            _ => Err(SignalError::UnsupportedScheme(s.to_string())),
        }
    }
}

/// Line coding encoder.
///
/// A single left-to-right pass; the state carried between bits is the
/// minimum each scheme needs (current level, last-mark polarity,
/// mark count since the last substitution).
#[derive(Debug, Clone)]
pub struct LineCoder {
    bit_duration: f64,
}

impl LineCoder {
    pub fn new(params: &LineCodeParams) -> Self {
        Self {
            bit_duration: params.bit_duration,
        }
    }

    /// Encode `bits` under `scheme` into a voltage-level waveform.
    ///
    /// Flat segments are emitted as two points (start, end); the Manchester
    /// family emits four points per bit to draw the mid-bit transition.
    pub fn encode(&self, bits: &Bits, scheme: LineCode) -> Vec<Point> {
        match scheme {
            LineCode::NrzL => self.nrz_l(bits),
            LineCode::NrzI => self.nrz_i(bits),
            LineCode::Manchester => self.manchester(bits),
            LineCode::DiffManchester => self.diff_manchester(bits),
            LineCode::Ami => self.alternate_mark(bits, 1),
            LineCode::Pseudoternary => self.alternate_mark(bits, 0),
            LineCode::B8zs => self.b8zs(bits),
            LineCode::Hdb3 => self.hdb3(bits),
        }
    }

    /// Append one flat segment covering bit slot `i`.
    fn push_slot(&self, points: &mut Vec<Point>, i: usize, voltage: f64) {
        points.push(Point::new(i as f64 * self.bit_duration, voltage));
        points.push(Point::new((i + 1) as f64 * self.bit_duration, voltage));
    }

    fn nrz_l(&self, bits: &Bits) -> Vec<Point> {
        let mut points = Vec::with_capacity(bits.len() * 2);
        for (i, bit) in bits.iter().enumerate() {
            let voltage = if bit == 0 { 1.0 } else { -1.0 };
            self.push_slot(&mut points, i, voltage);
        }
        points
    }

    fn nrz_i(&self, bits: &Bits) -> Vec<Point> {
        let mut points = Vec::with_capacity(bits.len() * 2);
        let mut level = 1.0;
        for (i, bit) in bits.iter().enumerate() {
            if bit == 1 {
                level = -level;
            }
            self.push_slot(&mut points, i, level);
        }
        points
    }

    fn manchester(&self, bits: &Bits) -> Vec<Point> {
        let mut points = Vec::with_capacity(bits.len() * 4);
        for (i, bit) in bits.iter().enumerate() {
            let start = i as f64 * self.bit_duration;
            let mid = (i as f64 + 0.5) * self.bit_duration;
            let end = (i + 1) as f64 * self.bit_duration;
            // 0: high→low, 1: low→high
            let (first, second) = if bit == 0 { (1.0, -1.0) } else { (-1.0, 1.0) };
            points.push(Point::new(start, first));
            points.push(Point::new(mid, first));
            points.push(Point::new(mid, second));
            points.push(Point::new(end, second));
        }
        points
    }

    /// Convention: the level inverts at the start of the slot iff the bit
    /// is 0; the mid-bit inversion happens unconditionally.
    fn diff_manchester(&self, bits: &Bits) -> Vec<Point> {
        let mut points = Vec::with_capacity(bits.len() * 4);
        let mut level = 1.0;
        for (i, bit) in bits.iter().enumerate() {
            if bit == 0 {
                level = -level;
            }
            let start = i as f64 * self.bit_duration;
            let mid = (i as f64 + 0.5) * self.bit_duration;
            let end = (i + 1) as f64 * self.bit_duration;

            points.push(Point::new(start, level));
            points.push(Point::new(mid, level));

            level = -level;

            points.push(Point::new(mid, level));
            points.push(Point::new(end, level));
        }
        points
    }

    /// AMI when `mark_bit == 1`, pseudoternary when `mark_bit == 0`: the
    /// marked bit alternates polarity, the other maps to 0 V.
    fn alternate_mark(&self, bits: &Bits, mark_bit: u8) -> Vec<Point> {
        let mut points = Vec::with_capacity(bits.len() * 2);
        let mut polarity = -1.0;
        for (i, bit) in bits.iter().enumerate() {
            let voltage = if bit == mark_bit {
                polarity = -polarity;
                polarity
            } else {
                0.0
            };
            self.push_slot(&mut points, i, voltage);
        }
        points
    }

    fn b8zs(&self, bits: &Bits) -> Vec<Point> {
        let mut points = Vec::with_capacity(bits.len() * 2);
        let mut polarity = -1.0;

        let mut i = 0;
        while i < bits.len() {
            if bits.zero_run_at(i, 8) {
                // 000VB0VB: V violates (repeats the last mark), B restores
                let v = polarity;
                let b = -polarity;
                let pattern = [0.0, 0.0, 0.0, v, b, 0.0, v, b];
                for (j, &voltage) in pattern.iter().enumerate() {
                    self.push_slot(&mut points, i + j, voltage);
                }
                polarity = b;
                i += 8;
            } else {
                let voltage = if bits.get(i) == 1 {
                    polarity = -polarity;
                    polarity
                } else {
                    0.0
                };
                self.push_slot(&mut points, i, voltage);
                i += 1;
            }
        }
        points
    }

    fn hdb3(&self, bits: &Bits) -> Vec<Point> {
        let mut points = Vec::with_capacity(bits.len() * 2);
        let mut polarity = -1.0;
        let mut marks_since_sub = 0usize;

        let mut i = 0;
        while i < bits.len() {
            if bits.zero_run_at(i, 4) {
                // Even mark count since the last substitution: 000V keeps
                // the running DC balance; odd: B00V rebalances with B.
                let pattern = if marks_since_sub % 2 == 0 {
                    let v = polarity;
                    [0.0, 0.0, 0.0, v]
                } else {
                    let b = -polarity;
                    let v = b;
                    polarity = v;
                    [b, 0.0, 0.0, v]
                };
                for (j, &voltage) in pattern.iter().enumerate() {
                    self.push_slot(&mut points, i + j, voltage);
                }
                marks_since_sub = 0;
                i += 4;
            } else {
                let voltage = if bits.get(i) == 1 {
                    polarity = -polarity;
                    marks_since_sub += 1;
                    polarity
                } else {
                    0.0
                };
                self.push_slot(&mut points, i, voltage);
                i += 1;
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn encode(bits: &str, scheme: LineCode) -> Vec<Point> {
        let coder = LineCoder::new(&LineCodeParams::default());
        coder.encode(&Bits::parse(bits).unwrap(), scheme)
    }

    /// Voltage level of each bit slot (sampling the first point of each pair)
    fn levels(points: &[Point]) -> Vec<f64> {
        points.chunks(2).map(|pair| pair[0].y).collect()
    }

    #[test]
    fn test_point_counts() {
        for scheme in [
            LineCode::NrzL,
            LineCode::NrzI,
            LineCode::Ami,
            LineCode::Pseudoternary,
            LineCode::B8zs,
            LineCode::Hdb3,
        ] {
            assert_eq!(encode("10110", scheme).len(), 10, "{}", scheme);
        }
        for scheme in [LineCode::Manchester, LineCode::DiffManchester] {
            assert_eq!(encode("10110", scheme).len(), 20, "{}", scheme);
        }
    }

    #[test]
    fn test_duration_covers_all_bits() {
        // Substitutions must not shrink or stretch the covered duration
        for scheme in LineCode::all() {
            let points = encode("1000000001000010", scheme);
            assert_relative_eq!(points.last().unwrap().x, 16.0);
            assert_relative_eq!(points[0].x, 0.0);
        }
    }

    #[test]
    fn test_nrz_l() {
        assert_eq!(levels(&encode("0110", LineCode::NrzL)), vec![1.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_nrz_i_flips_on_ones() {
        // Initial level +1; each 1 inverts before the slot is drawn
        assert_eq!(
            levels(&encode("10110", LineCode::NrzI)),
            vec![-1.0, -1.0, 1.0, -1.0, -1.0]
        );
    }

    #[test]
    fn test_manchester_transitions() {
        let points = encode("01", LineCode::Manchester);
        // bit 0: high→low
        assert_eq!(points[0].y, 1.0);
        assert_eq!(points[1].y, 1.0);
        assert_eq!(points[2].y, -1.0);
        assert_eq!(points[3].y, -1.0);
        // bit 1: low→high
        assert_eq!(points[4].y, -1.0);
        assert_eq!(points[7].y, 1.0);
        // Mid-bit duplicate x draws the vertical edge
        assert_relative_eq!(points[1].x, 0.5);
        assert_relative_eq!(points[2].x, 0.5);
    }

    #[test]
    fn test_diff_manchester_start_transition_on_zero() {
        let points = encode("01", LineCode::DiffManchester);
        // Bit 0 inverts the +1 idle level at the slot start, then mid-bit
        assert_eq!(points[0].y, -1.0);
        assert_eq!(points[2].y, 1.0);
        // Bit 1 keeps the level entering the slot (1.0 after the mid flip)
        assert_eq!(points[4].y, 1.0);
        assert_eq!(points[6].y, -1.0);
        // Every bit has its mid-bit transition
        assert_ne!(points[1].y, points[2].y);
        assert_ne!(points[5].y, points[6].y);
    }

    #[test]
    fn test_ami_alternating_marks() {
        assert_eq!(
            levels(&encode("10110", LineCode::Ami)),
            vec![1.0, 0.0, -1.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_pseudoternary_mirrors_ami() {
        // Pseudoternary of the complement equals AMI of the original
        let bits = Bits::parse("1011001").unwrap();
        let coder = LineCoder::new(&LineCodeParams::default());
        let ami = coder.encode(&bits, LineCode::Ami);
        let pseudo = coder.encode(&bits.complement(), LineCode::Pseudoternary);
        assert_eq!(ami, pseudo);
    }

    #[test]
    fn test_b8zs_without_run_matches_ami() {
        assert_eq!(
            encode("10110", LineCode::B8zs),
            encode("10110", LineCode::Ami)
        );
    }

    #[test]
    fn test_b8zs_substitution_pattern() {
        // No prior mark: the prior polarity defaults to -1, so V=-1, B=+1
        assert_eq!(
            levels(&encode("00000000", LineCode::B8zs)),
            vec![0.0, 0.0, 0.0, -1.0, 1.0, 0.0, -1.0, 1.0]
        );
    }

    #[test]
    fn test_b8zs_violation_repeats_last_mark() {
        // Leading 1 encodes as +1; V must repeat it, B must oppose it
        assert_eq!(
            levels(&encode("100000000", LineCode::B8zs)),
            vec![1.0, 0.0, 0.0, 0.0, 1.0, -1.0, 0.0, 1.0, -1.0]
        );
    }

    #[test]
    fn test_b8zs_polarity_continues_after_substitution() {
        // After the substitution the last mark is B=+1 (from V=-1,B=+1),
        // so the next 1 flips to -1
        let lv = levels(&encode("000000001", LineCode::B8zs));
        assert_eq!(lv[8], -1.0);
    }

    #[test]
    fn test_b8zs_nine_zeros_substitutes_once() {
        // Scan jumps past the substituted 8; the ninth zero is plain AMI 0
        let lv = levels(&encode("000000000", LineCode::B8zs));
        assert_eq!(lv.len(), 9);
        assert_eq!(lv[8], 0.0);
        assert_eq!(&lv[..8], &[0.0, 0.0, 0.0, -1.0, 1.0, 0.0, -1.0, 1.0]);
    }

    #[test]
    fn test_hdb3_even_marks_000v() {
        // Two marks (+1, -1) before the run: even count → 000V with V=-1
        assert_eq!(
            levels(&encode("110000", LineCode::Hdb3)),
            vec![1.0, -1.0, 0.0, 0.0, 0.0, -1.0]
        );
    }

    #[test]
    fn test_hdb3_odd_marks_b00v() {
        // One mark (+1): odd count → B00V with B=V=-1
        assert_eq!(
            levels(&encode("10000", LineCode::Hdb3)),
            vec![1.0, -1.0, 0.0, 0.0, -1.0]
        );
    }

    #[test]
    fn test_hdb3_counter_resets_after_substitution() {
        // After a substitution the mark counter restarts at zero, so a
        // second 4-zero run with no intervening mark is treated as even
        let lv = levels(&encode("100000000", LineCode::Hdb3));
        // first run (odd): B00V = [-1,0,0,-1]; second run (even): 000V, V=-1
        assert_eq!(lv, vec![1.0, -1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("NRZ-L".parse::<LineCode>().unwrap(), LineCode::NrzL);
        assert_eq!("nrz_i".parse::<LineCode>().unwrap(), LineCode::NrzI);
        assert_eq!(
            "differential-manchester".parse::<LineCode>().unwrap(),
            LineCode::DiffManchester
        );
        assert_eq!("b8zs".parse::<LineCode>().unwrap(), LineCode::B8zs);
        assert!(matches!(
            "4B5B".parse::<LineCode>(),
            Err(SignalError::UnsupportedScheme(_))
        ));
    }
}
