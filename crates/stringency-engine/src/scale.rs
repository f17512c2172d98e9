//! Choropleth color scale for the world map.
//!
//! Countries are shaded by a per-million metric on a sequential
//! yellow-orange-red ramp. The domain runs from zero to the largest value
//! in the dataset; countries absent from the dataset get a neutral gray.
//!
//! Positions on the ramp are exact [`Decimal`] fractions so that equal
//! inputs always map to identical colors.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use stringency_types::{CountryStats, Metric, ScaleLegend};

/// Fill for countries without data.
pub const NO_DATA_COLOR: &str = "#cccccc";

/// The 9-class `YlOrRd` sequential ramp, light to dark.
const YL_OR_RD: [[u8; 3]; 9] = [
    [0xff, 0xff, 0xcc],
    [0xff, 0xed, 0xa0],
    [0xfe, 0xd9, 0x76],
    [0xfe, 0xb2, 0x4c],
    [0xfd, 0x8d, 0x3c],
    [0xfc, 0x4e, 0x2a],
    [0xe3, 0x1a, 0x1c],
    [0xbd, 0x00, 0x26],
    [0x80, 0x00, 0x26],
];

/// A sequential color scale over one metric's per-million values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScale {
    metric: Metric,
    max: u64,
    values: BTreeMap<String, u64>,
}

impl ColorScale {
    /// Build a scale whose domain is `[0, max per-million value]`.
    pub fn sequential(countries: &[CountryStats], metric: Metric) -> Self {
        let values: BTreeMap<String, u64> = countries
            .iter()
            .map(|c| (c.code.clone(), c.per_million(metric)))
            .collect();
        let max = values.values().copied().max().unwrap_or(0);
        Self {
            metric,
            max,
            values,
        }
    }

    /// The metric this scale colors by.
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Domain endpoints `(0, max)`.
    pub const fn domain(&self) -> (u64, u64) {
        (0, self.max)
    }

    /// Per-million value for a country code, if present.
    pub fn value_for(&self, code: &str) -> Option<u64> {
        self.values.get(code).copied()
    }

    /// Position of `value` within the domain, clamped to `[0, 1]`.
    ///
    /// An all-zero domain maps everything to 0.
    pub fn normalize(&self, value: u64) -> Decimal {
        Decimal::from(value)
            .checked_div(Decimal::from(self.max))
            .map_or(Decimal::ZERO, |t| t.min(Decimal::ONE))
    }

    /// Ramp color for a raw per-million value, as `#rrggbb`.
    pub fn color_for(&self, value: u64) -> String {
        hex(interpolate(self.normalize(value)))
    }

    /// Ramp color for a country, or [`NO_DATA_COLOR`] if it is not in the
    /// dataset.
    pub fn color_for_country(&self, code: &str) -> String {
        self.value_for(code)
            .map_or_else(|| NO_DATA_COLOR.to_owned(), |v| self.color_for(v))
    }

    /// Legend endpoints and their colors.
    pub fn legend(&self) -> ScaleLegend {
        ScaleLegend {
            metric: self.metric,
            min: 0,
            max: self.max,
            min_color: self.color_for(0),
            max_color: self.color_for(self.max),
        }
    }
}

/// Linear interpolation across the ramp stops at position `t` in `[0, 1]`.
fn interpolate(t: Decimal) -> [u8; 3] {
    let segments = Decimal::from(YL_OR_RD.len().saturating_sub(1));
    let position = t
        .max(Decimal::ZERO)
        .min(Decimal::ONE)
        .checked_mul(segments)
        .unwrap_or(Decimal::ZERO);

    let last = YL_OR_RD.len().saturating_sub(2);
    let index = position.floor().to_usize().unwrap_or(0).min(last);
    let frac = position
        .checked_sub(Decimal::from(index))
        .unwrap_or(Decimal::ZERO);

    let (Some(from), Some(to)) = (YL_OR_RD.get(index), YL_OR_RD.get(index.saturating_add(1)))
    else {
        return [0xcc, 0xcc, 0xcc];
    };

    let mut rgb = [0_u8; 3];
    for ((out, &a), &b) in rgb.iter_mut().zip(from).zip(to) {
        *out = lerp(a, b, frac);
    }
    rgb
}

/// Blend two channel values, rounding to the nearest integer.
fn lerp(a: u8, b: u8, frac: Decimal) -> u8 {
    let a_dec = Decimal::from(a);
    Decimal::from(b)
        .checked_sub(a_dec)
        .and_then(|delta| delta.checked_mul(frac))
        .and_then(|step| a_dec.checked_add(step))
        .and_then(|v| v.round().to_u8())
        .unwrap_or(a)
}

fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}
