/// One accepted reading: seconds since acquisition start and the parsed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}
impl Sample {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}
/// Parses one serial line into a sample stamped with `timestamp`.
///
/// Returns `None` for anything that is not a single finite base-10 number;
/// the caller discards those lines and reads again.
pub fn try_parse_sample(line: &str, timestamp: f64) -> Option<Sample> {
    let value: f64 = line.trim().parse().ok()?;
    value.is_finite().then(|| Sample::new(timestamp, value))
}
/// Status line the pulse-oximeter firmware prints between samples,
/// e.g. `Heart rate: 72 bpm / SpO2: 98 %`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vitals {
    pub heart_rate_bpm: i32,
    pub spo2_percent: i32,
}
impl Vitals {
    /// The firmware reports -999 when its estimator has no valid reading.
    pub fn is_valid(&self) -> bool {
        self.heart_rate_bpm > 0 && self.spo2_percent > 0
    }
}
pub fn parse_vitals(line: &str) -> Option<Vitals> {
    let rest = line.trim().strip_prefix("Heart rate:")?;
    let (heart, spo2) = rest.split_once('/')?;
    let heart_rate_bpm = heart.trim().strip_suffix("bpm")?.trim().parse().ok()?;
    let spo2_percent = spo2
        .trim()
        .strip_prefix("SpO2:")?
        .trim()
        .strip_suffix('%')?
        .trim()
        .parse()
        .ok()?;
    Some(Vitals {
        heart_rate_bpm,
        spo2_percent,
    })
}
