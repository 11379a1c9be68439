/// Deterministic sinusoidal-octave terrain height function.
///
/// The height at any point is a pure function of its absolute world x/z:
/// three octaves at decreasing amplitude and increasing frequency, summed.
/// The same coordinate always yields the same height, so any unloaded cell
/// regenerates bit-for-bit without persistence.
#[derive(Debug, Clone)]
pub struct Heightfield {
    period: f32,
    octaves: [(f32, f32); 3],
}

impl Default for Heightfield {
    fn default() -> Self {
        Self {
            period: 100.0,
            // (amplitude, frequency multiplier) per octave
            octaves: [(20.0, 10.0), (10.0, 20.0), (5.0, 40.0)],
        }
    }
}

impl Heightfield {
    /// Terrain height at an absolute world position.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let nx = x / self.period;
        let nz = z / self.period;
        self.octaves
            .iter()
            .map(|&(amp, freq)| amp * (nx * freq).sin() * (nz * freq).cos())
            .sum()
    }

    /// Upper bound on |height|: the sum of the octave amplitudes.
    pub fn amplitude(&self) -> f32 {
        self.octaves.iter().map(|&(amp, _)| amp).sum()
    }
}
