//! Turn a raw reading into a 0-100 percentage
// TODO: why does the linter think this is unused when math functions on f32 are used. something about std being enabled in the linter?
#[allow(unused_imports)]
use micromath::F32Ext;

/// the same as arduino's `map`, but in floats so we can round instead of truncate
/// the output is NOT clamped. `in_lo == in_hi` divides by zero
pub fn linear_map(x: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    out_lo + (x - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

/// rescale `raw_level` from `min_level..=max_level` into a percentage.
///
/// readings outside the bounds clamp to 0 or 100. `min_level > max_level` works and gives a decreasing map.
/// equal bounds would divide by zero, so they act like a step at `max_level` instead
/// (the monitor refuses equal bounds before it gets here).
pub fn level_to_percentage(raw_level: u16, min_level: u16, max_level: u16) -> u8 {
    if min_level == max_level {
        return if raw_level >= max_level { 100 } else { 0 };
    }

    let percentage = linear_map(
        raw_level as f32,
        min_level as f32,
        max_level as f32,
        0.0,
        100.0,
    )
    .round();

    percentage.clamp(0.0, 100.0) as u8
}
