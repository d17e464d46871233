//! Carrier keying (digital→analog)
//!
//! Maps bits — or multi-bit symbols — onto segments of a sinusoidal
//! carrier. Binary schemes render one carrier block per bit; multi-bit
//! schemes group bits into symbols via a constellation table and render one
//! continuous block per symbol.
//!
//! ## Schemes
//!
//! ```text
//! binary            ASK   amplitude per bit       (1.0 / 0.2)
//!                   BFSK  tone per bit            (7 Hz / 3 Hz)
//!                   BPSK  phase per bit           (0 / π)
//!                   DPSK  phase accumulates; a 0 bit flips it
//! 2 bits / symbol   QPSK  Gray ring at 45°+k·90°
//!                   OQPSK QPSK with the quadrature arm delayed half a symbol
//!                   4-FSK tone table
//! 3 bits / symbol   8-PSK Gray ring at k·45°
//! 4 bits / symbol   16-QAM square grid, per-axis Gray levels ±1/3, ±1
//! ```
//!
//! Bit sequences are zero-padded on the right to a whole number of symbols.
//! The receiver is ideal, so the reconstructed output equals the input and
//! only the transmitted waveform differs.

use crate::config::KeyingParams;
use crate::types::{canonical_scheme_name, Bits, IqPoint, Point, SignalError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Keying scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Keying {
    Ask,
    Bfsk,
    Mfsk,
    Bpsk,
    Dpsk,
    Qpsk,
    Oqpsk,
    Mpsk,
    Qam,
}

impl Keying {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Keying::Ask => "ASK",
            Keying::Bfsk => "BFSK",
            Keying::Mfsk => "4-FSK",
            Keying::Bpsk => "BPSK",
            Keying::Dpsk => "DPSK",
            Keying::Qpsk => "QPSK",
            Keying::Oqpsk => "OQPSK",
            Keying::Mpsk => "8-PSK",
            Keying::Qam => "16-QAM",
        }
    }

    /// Bits carried by one symbol
    pub fn bits_per_symbol(&self) -> usize {
        match self {
            Keying::Ask | Keying::Bfsk | Keying::Bpsk | Keying::Dpsk => 1,
            Keying::Qpsk | Keying::Oqpsk | Keying::Mfsk => 2,
            Keying::Mpsk => 3,
            Keying::Qam => 4,
        }
    }

    /// All schemes, in presentation order
    pub fn all() -> [Keying; 9] {
        [
            Keying::Ask,
            Keying::Bfsk,
            Keying::Mfsk,
            Keying::Bpsk,
            Keying::Dpsk,
            Keying::Qpsk,
            Keying::Oqpsk,
            Keying::Mpsk,
            Keying::Qam,
        ]
    }
}

impl fmt::Display for Keying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Keying {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_scheme_name(s).as_str() {
            "ASK" => Ok(Keying::Ask),
            "FSK" | "BFSK" => Ok(Keying::Bfsk),
            "MFSK" | "4FSK" | "FSK4" => Ok(Keying::Mfsk),
            "PSK" | "BPSK" => Ok(Keying::Bpsk),
            "DPSK" => Ok(Keying::Dpsk),
            "QPSK" => Ok(Keying::Qpsk),
            "OQPSK" => Ok(Keying::Oqpsk),
            "MPSK" | "8PSK" | "PSK8" => Ok(Keying::Mpsk),
            "QAM" | "16QAM" | "QAM16" => Ok(Keying::Qam),
            _ => Err(SignalError::UnsupportedScheme(s.to_string())),
        }
    }
}

/// Ring position of each 2-bit value on the Gray-coded QPSK circle
/// (00→45°, 01→135°, 11→225°, 10→315°).
const QPSK_RING: [usize; 4] = [0, 1, 3, 2];

/// Ring position of each 3-bit value on the Gray-coded 8-PSK circle.
const PSK8_RING: [usize; 8] = [0, 1, 3, 2, 7, 6, 4, 5];

/// Per-axis level of each 2-bit value in the 16-QAM grid (Gray order
/// 00, 01, 11, 10 sweeps −3, −1, +1, +3), normalized by 3.
const QAM_AXIS: [f64; 4] = [-3.0 / 3.0, -1.0 / 3.0, 3.0 / 3.0, 1.0 / 3.0];

/// Keying modulator.
#[derive(Debug, Clone)]
pub struct KeyingModulator {
    params: KeyingParams,
}

impl KeyingModulator {
    pub fn new(params: &KeyingParams) -> Self {
        Self {
            params: params.clone(),
        }
    }

    /// Modulate `bits` under `scheme` into a carrier waveform.
    pub fn modulate(&self, bits: &Bits, scheme: Keying) -> Vec<Point> {
        match scheme {
            Keying::Ask => self.ask(bits),
            Keying::Bfsk => self.bfsk(bits),
            Keying::Bpsk => self.bpsk(bits),
            Keying::Dpsk => self.dpsk(bits),
            Keying::Qpsk => self.psk_ring(bits, 2, &QPSK_RING, PI / 4.0),
            Keying::Mpsk => self.psk_ring(bits, 3, &PSK8_RING, 0.0),
            Keying::Mfsk => self.mfsk(bits),
            Keying::Qam => self.qam16(bits),
            Keying::Oqpsk => self.oqpsk(bits),
        }
    }

    /// QPSK constellation point for a 2-bit value, unit amplitude.
    pub fn qpsk_point(value: usize) -> IqPoint {
        let phase = PI / 4.0 + QPSK_RING[value & 3] as f64 * (PI / 2.0);
        IqPoint::new(phase.cos(), phase.sin())
    }

    /// 16-QAM constellation point for a 4-bit value.
    pub fn qam16_point(value: usize) -> IqPoint {
        let i = QAM_AXIS[(value >> 2) & 3];
        let q = QAM_AXIS[value & 3];
        IqPoint::new(i, q)
    }

    /// Append one carrier block sampled at `steps + 1` instants starting
    /// at `start`; `wave` maps absolute time to amplitude.
    fn block(&self, out: &mut Vec<Point>, start: f64, steps: usize, wave: impl Fn(f64) -> f64) {
        let dt = self.params.bit_duration / self.params.samples_per_bit as f64;
        for j in 0..=steps {
            let t = start + j as f64 * dt;
            out.push(Point::new(t, wave(t)));
        }
    }

    fn ask(&self, bits: &Bits) -> Vec<Point> {
        let p = &self.params;
        let omega = 2.0 * PI * p.carrier_freq;
        let mut out = Vec::with_capacity(bits.len() * (p.samples_per_bit + 1));
        for (i, bit) in bits.iter().enumerate() {
            let amp = if bit == 1 { p.ask_amp_one } else { p.ask_amp_zero };
            let start = i as f64 * p.bit_duration;
            self.block(&mut out, start, p.samples_per_bit, |t| amp * (omega * t).sin());
        }
        out
    }

    fn bfsk(&self, bits: &Bits) -> Vec<Point> {
        let p = &self.params;
        let mut out = Vec::with_capacity(bits.len() * (p.samples_per_bit + 1));
        for (i, bit) in bits.iter().enumerate() {
            let freq = if bit == 1 { p.fsk_freq_one } else { p.fsk_freq_zero };
            let omega = 2.0 * PI * freq;
            let start = i as f64 * p.bit_duration;
            self.block(&mut out, start, p.samples_per_bit, |t| (omega * t).sin());
        }
        out
    }

    fn bpsk(&self, bits: &Bits) -> Vec<Point> {
        let p = &self.params;
        let omega = 2.0 * PI * p.carrier_freq;
        let mut out = Vec::with_capacity(bits.len() * (p.samples_per_bit + 1));
        for (i, bit) in bits.iter().enumerate() {
            let phase = if bit == 1 { 0.0 } else { PI };
            let start = i as f64 * p.bit_duration;
            self.block(&mut out, start, p.samples_per_bit, |t| (omega * t + phase).sin());
        }
        out
    }

    /// Differential PSK: the phase state persists across bits; a 0 bit
    /// flips it before the bit's block is emitted, a 1 bit leaves it.
    fn dpsk(&self, bits: &Bits) -> Vec<Point> {
        let p = &self.params;
        let omega = 2.0 * PI * p.carrier_freq;
        let mut out = Vec::with_capacity(bits.len() * (p.samples_per_bit + 1));
        let mut phase = 0.0;
        for (i, bit) in bits.iter().enumerate() {
            if bit == 0 {
                phase += PI;
            }
            let start = i as f64 * p.bit_duration;
            self.block(&mut out, start, p.samples_per_bit, |t| (omega * t + phase).sin());
        }
        out
    }

    /// Shared phase-ring modulator for QPSK and 8-PSK.
    fn psk_ring(&self, bits: &Bits, width: usize, ring: &[usize], offset: f64) -> Vec<Point> {
        let p = &self.params;
        let omega = 2.0 * PI * p.carrier_freq;
        let sector = 2.0 * PI / ring.len() as f64;
        let symbols = pack_symbols(bits, width);
        let steps = width * p.samples_per_bit;
        let mut out = Vec::with_capacity(symbols.len() * (steps + 1));
        for (s, &value) in symbols.iter().enumerate() {
            let phase = offset + ring[value] as f64 * sector;
            let start = (s * width) as f64 * p.bit_duration;
            self.block(&mut out, start, steps, |t| (omega * t + phase).sin());
        }
        out
    }

    fn mfsk(&self, bits: &Bits) -> Vec<Point> {
        let p = &self.params;
        let symbols = pack_symbols(bits, 2);
        let steps = 2 * p.samples_per_bit;
        let mut out = Vec::with_capacity(symbols.len() * (steps + 1));
        for (s, &value) in symbols.iter().enumerate() {
            let omega = 2.0 * PI * p.mfsk_freqs[value];
            let start = (s * 2) as f64 * p.bit_duration;
            self.block(&mut out, start, steps, |t| (omega * t).sin());
        }
        out
    }

    fn qam16(&self, bits: &Bits) -> Vec<Point> {
        let p = &self.params;
        let omega = 2.0 * PI * p.carrier_freq;
        let symbols = pack_symbols(bits, 4);
        let steps = 4 * p.samples_per_bit;
        let mut out = Vec::with_capacity(symbols.len() * (steps + 1));
        for (s, &value) in symbols.iter().enumerate() {
            let point = Self::qam16_point(value);
            let start = (s * 4) as f64 * p.bit_duration;
            self.block(&mut out, start, steps, |t| {
                point.re * (omega * t).cos() - point.im * (omega * t).sin()
            });
        }
        out
    }

    /// Offset QPSK: the quadrature arm lags the in-phase arm by half a
    /// symbol, so the two arms never switch simultaneously and phase jumps
    /// stay within 90°. The arms are no longer co-aligned in time, so the
    /// sample loop resolves their symbol indices independently.
    fn oqpsk(&self, bits: &Bits) -> Vec<Point> {
        let p = &self.params;
        let omega = 2.0 * PI * p.carrier_freq;
        let symbols = pack_symbols(bits, 2);
        let constellation: Vec<IqPoint> =
            symbols.iter().map(|&v| Self::qpsk_point(v)).collect();

        let symbol_period = 2.0 * p.bit_duration;
        let half = p.bit_duration;
        let last = symbols.len() - 1;
        let steps = symbols.len() * 2 * p.samples_per_bit;
        let dt = p.bit_duration / p.samples_per_bit as f64;

        let mut out = Vec::with_capacity(steps + 1);
        for j in 0..=steps {
            let t = j as f64 * dt;
            let i_idx = ((t / symbol_period) as usize).min(last);
            let q_idx = if t < half {
                0
            } else {
                (((t - half) / symbol_period) as usize).min(last)
            };
            let y = constellation[i_idx].re * (omega * t).cos()
                - constellation[q_idx].im * (omega * t).sin();
            out.push(Point::new(t, y));
        }
        out
    }
}

/// Group bits MSB-first into `width`-bit symbol values, zero-padding the
/// tail symbol on the right.
fn pack_symbols(bits: &Bits, width: usize) -> Vec<usize> {
    let n = bits.len();
    let padded = n.div_ceil(width) * width;
    let mut symbols = Vec::with_capacity(padded / width);
    let mut s = 0;
    while s < padded {
        let mut value = 0usize;
        for j in 0..width {
            let bit = if s + j < n { bits.get(s + j) } else { 0 };
            value = (value << 1) | bit as usize;
        }
        symbols.push(value);
        s += width;
    }
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn modulate(bits: &str, scheme: Keying) -> Vec<Point> {
        let modulator = KeyingModulator::new(&KeyingParams::default());
        modulator.modulate(&Bits::parse(bits).unwrap(), scheme)
    }

    #[test]
    fn test_ask_single_bit_count_and_values() {
        let points = modulate("1", Keying::Ask);
        assert_eq!(points.len(), 101);
        for p in &points {
            assert_relative_eq!(p.y, (2.0 * PI * 5.0 * p.x).sin(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ask_zero_bit_attenuated() {
        let points = modulate("0", Keying::Ask);
        let peak = points.iter().map(|p| p.y.abs()).fold(0.0, f64::max);
        assert!(peak <= 0.2 + 1e-9);
        assert!(peak > 0.15, "attenuated carrier still present");
    }

    #[test]
    fn test_binary_point_counts() {
        for scheme in [Keying::Ask, Keying::Bfsk, Keying::Bpsk, Keying::Dpsk] {
            assert_eq!(modulate("1011", scheme).len(), 4 * 101, "{}", scheme);
        }
    }

    #[test]
    fn test_bfsk_tones() {
        let points = modulate("01", Keying::Bfsk);
        // Bit 0 rides the 3 Hz tone, bit 1 the 7 Hz tone
        for p in &points[..101] {
            assert_relative_eq!(p.y, (2.0 * PI * 3.0 * p.x).sin(), epsilon = 1e-12);
        }
        for p in &points[101..] {
            assert_relative_eq!(p.y, (2.0 * PI * 7.0 * p.x).sin(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bpsk_phase_inversion() {
        let one = modulate("1", Keying::Bpsk);
        let zero = modulate("0", Keying::Bpsk);
        for (a, b) in one.iter().zip(zero.iter()) {
            assert_relative_eq!(a.y, -b.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_dpsk_accumulates_phase() {
        // "00": the second 0 flips the phase back to 2π ≡ 0, so its block
        // matches a plain carrier; "10" holds then flips once.
        let points = modulate("00", Keying::Dpsk);
        for p in &points[101..] {
            assert_relative_eq!(p.y, (2.0 * PI * 5.0 * p.x).sin(), epsilon = 1e-9);
        }
        let points = modulate("10", Keying::Dpsk);
        for p in &points[101..] {
            assert_relative_eq!(p.y, -(2.0 * PI * 5.0 * p.x).sin(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_qpsk_symbol_blocks() {
        // 3 bits pad to 4 → 2 symbols, each spanning 2 s with 201 points
        let points = modulate("101", Keying::Qpsk);
        assert_eq!(points.len(), 2 * 201);
        assert_relative_eq!(points.last().unwrap().x, 4.0);
    }

    #[test]
    fn test_qpsk_gray_phases() {
        // Symbol 10 sits at 315°, so the waveform is sin(ωt + π/4 + 3·π/2)
        let points = modulate("10", Keying::Qpsk);
        let phase = PI / 4.0 + 3.0 * PI / 2.0;
        for p in &points {
            assert_relative_eq!(p.y, (2.0 * PI * 5.0 * p.x + phase).sin(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_psk8_padding_and_span() {
        // 4 bits pad to 6 → 2 symbols of 3 s each
        let points = modulate("1011", Keying::Mpsk);
        assert_eq!(points.len(), 2 * 301);
        assert_relative_eq!(points.last().unwrap().x, 6.0);
    }

    #[test]
    fn test_psk8_distinct_sectors() {
        // All eight symbol values land on distinct phases
        let mut sectors: Vec<usize> = PSK8_RING.to_vec();
        sectors.sort_unstable();
        sectors.dedup();
        assert_eq!(sectors.len(), 8);
    }

    #[test]
    fn test_mfsk_tone_table() {
        // "1110" → symbols 11 (6 Hz... value 3 → 8 Hz) and 10 (value 2 → 6 Hz)
        let points = modulate("1110", Keying::Mfsk);
        assert_eq!(points.len(), 2 * 201);
        for p in &points[..201] {
            assert_relative_eq!(p.y, (2.0 * PI * 8.0 * p.x).sin(), epsilon = 1e-9);
        }
        for p in &points[201..] {
            assert_relative_eq!(p.y, (2.0 * PI * 6.0 * p.x).sin(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_qam16_grid() {
        // Per-axis Gray levels: 00→-1, 01→-1/3, 11→+1/3, 10→+1
        let p = KeyingModulator::qam16_point(0b0000);
        assert_relative_eq!(p.re, -1.0);
        assert_relative_eq!(p.im, -1.0);
        let p = KeyingModulator::qam16_point(0b1001);
        assert_relative_eq!(p.re, 1.0);
        assert_relative_eq!(p.im, -1.0 / 3.0);
        let p = KeyingModulator::qam16_point(0b1111);
        assert_relative_eq!(p.re, 1.0 / 3.0);
        assert_relative_eq!(p.im, 1.0 / 3.0);
    }

    #[test]
    fn test_qam16_waveform() {
        let points = modulate("0000", Keying::Qam);
        assert_eq!(points.len(), 401);
        let c = KeyingModulator::qam16_point(0);
        for p in &points {
            let expected =
                c.re * (2.0 * PI * 5.0 * p.x).cos() - c.im * (2.0 * PI * 5.0 * p.x).sin();
            assert_relative_eq!(p.y, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_oqpsk_single_block() {
        // OQPSK renders one continuous block: 2 symbols → 401 points
        let points = modulate("1001", Keying::Oqpsk);
        assert_eq!(points.len(), 401);
        assert_relative_eq!(points.last().unwrap().x, 4.0);
    }

    #[test]
    fn test_oqpsk_quadrature_lags_half_symbol() {
        // Symbols 10 and 01 differ in both arms. The in-phase arm switches
        // at t = 2 s, the quadrature arm not before t = 3 s; inside
        // [2, 3) the waveform mixes I of symbol 1 with Q of symbol 0.
        let points = modulate("1001", Keying::Oqpsk);
        let omega = 2.0 * PI * 5.0;
        let c0 = KeyingModulator::qpsk_point(0b10);
        let c1 = KeyingModulator::qpsk_point(0b01);
        let mid: Vec<&Point> = points
            .iter()
            .filter(|p| p.x > 2.0 + 1e-9 && p.x < 3.0 - 1e-9)
            .collect();
        assert!(!mid.is_empty());
        for p in mid {
            let expected = c1.re * (omega * p.x).cos() - c0.im * (omega * p.x).sin();
            assert_relative_eq!(p.y, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pack_symbols_zero_pads() {
        let bits = Bits::parse("101").unwrap();
        assert_eq!(pack_symbols(&bits, 2), vec![0b10, 0b10]);
        let bits = Bits::parse("11111").unwrap();
        assert_eq!(pack_symbols(&bits, 3), vec![0b111, 0b110]);
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("FSK".parse::<Keying>().unwrap(), Keying::Bfsk);
        assert_eq!("PSK".parse::<Keying>().unwrap(), Keying::Bpsk);
        assert_eq!("8-PSK".parse::<Keying>().unwrap(), Keying::Mpsk);
        assert_eq!("16qam".parse::<Keying>().unwrap(), Keying::Qam);
        assert_eq!("OQPSK".parse::<Keying>().unwrap(), Keying::Oqpsk);
        assert!(matches!(
            "GMSK".parse::<Keying>(),
            Err(SignalError::UnsupportedScheme(_))
        ));
    }
}
