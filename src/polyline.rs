//! Legacy encoded polyline (fixed 1e-5 precision, 2D only).
//!
//! This is the format the toll API accepts. Points are kept decoded in
//! [`Polyline`] and only turned into text at the boundary.

use serde::{Deserialize, Serialize};

use crate::flexpolyline::{Coordinate, DecodeError, EncodingFault};
use crate::varint;

/// Decimal digits kept by the legacy format.
pub const PRECISION: i32 = 5;

const SCALE: f64 = 1e5;

/// Added to every 5-bit group to land in printable ASCII (`'?'`).
const CHAR_OFFSET: u8 = 63;

/// A polyline representing a route geometry as decoded coordinates.
///
/// Each point is a (latitude, longitude) tuple; any third dimension has
/// already been dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Builds a polyline from decoded coordinates, stripping elevation.
    pub fn from_coordinates<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        Self {
            points: coordinates.into_iter().map(|c| c.lat_lng()).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends the points of `other`, keeping order.
    pub fn extend_from(&mut self, other: Polyline) {
        self.points.extend(other.points);
    }

    pub fn encode(&self) -> String {
        encode(&self.points)
    }

    pub fn decode(encoded: &str) -> Result<Self, DecodeError> {
        decode(encoded)
    }
}

fn push_value(value: i64, out: &mut String) {
    let mut value = varint::zigzag(value);
    while value >= 0x20 {
        out.push((((value & 0x1F) | 0x20) as u8 + CHAR_OFFSET) as char);
        value >>= 5;
    }
    out.push((value as u8 + CHAR_OFFSET) as char);
}

/// Encodes (latitude, longitude) points at 1e-5 precision.
///
/// Values are rounded half away from zero before taking deltas, so error
/// does not accumulate along the line.
pub fn encode(points: &[(f64, f64)]) -> String {
    let mut out = String::new();
    let (mut last_lat, mut last_lng) = (0i64, 0i64);
    for &(lat, lng) in points {
        let lat = (lat * SCALE).round() as i64;
        let lng = (lng * SCALE).round() as i64;
        push_value(lat.saturating_sub(last_lat), &mut out);
        push_value(lng.saturating_sub(last_lng), &mut out);
        last_lat = lat;
        last_lng = lng;
    }
    out
}

/// Decodes a legacy polyline back into points.
pub fn decode(encoded: &str) -> Result<Polyline, DecodeError> {
    let mut values = Vec::new();
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    for (position, character) in encoded.char_indices() {
        let code = character as u32;
        if !(u32::from(CHAR_OFFSET)..=u32::from(b'~')).contains(&code) {
            return Err(EncodingFault::InvalidCharacter {
                position,
                character,
            }
            .into());
        }
        let value = u64::from(code) - u64::from(CHAR_OFFSET);
        let chunk = value & 0x1F;
        if shift >= u64::BITS || (chunk << shift) >> shift != chunk {
            return Err(EncodingFault::Overflow.into());
        }
        result |= chunk << shift;
        if value & 0x20 == 0 {
            values.push(varint::unzigzag(result));
            result = 0;
            shift = 0;
        } else {
            shift += 5;
        }
    }
    if shift > 0 {
        return Err(EncodingFault::Truncated.into());
    }
    if values.len() % 2 != 0 {
        return Err(EncodingFault::IncompleteCoordinate {
            index: values.len() / 2,
        }
        .into());
    }

    let (mut lat, mut lng) = (0i64, 0i64);
    let mut points = Vec::with_capacity(values.len() / 2);
    for pair in values.chunks_exact(2) {
        lat = lat.checked_add(pair[0]).ok_or(EncodingFault::Overflow)?;
        lng = lng.checked_add(pair[1]).ok_or(EncodingFault::Overflow)?;
        points.push((lat as f64 / SCALE, lng as f64 / SCALE));
    }
    Ok(Polyline::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_points() {
        let points = vec![(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        let polyline = Polyline::new(points.clone());
        assert_eq!(polyline.points(), &points[..]);
        assert_eq!(polyline.len(), 3);
    }

    #[test]
    fn test_into_points() {
        let points = vec![(38.5, -120.2), (40.7, -120.95)];
        let polyline = Polyline::new(points.clone());
        assert_eq!(polyline.into_points(), points);
    }

    #[test]
    fn test_empty_polyline() {
        let polyline = Polyline::default();
        assert!(polyline.is_empty());
        assert_eq!(polyline.encode(), "");
        assert_eq!(decode("").unwrap(), polyline);
    }

    #[test]
    fn test_from_coordinates_strips_elevation() {
        let polyline = Polyline::from_coordinates([
            Coordinate::with_elevation(1.5, 2.5, 100.0),
            Coordinate::new(3.5, 4.5),
        ]);
        assert_eq!(polyline.points(), &[(1.5, 2.5), (3.5, 4.5)]);
    }

    #[test]
    fn test_encode_two_points() {
        let encoded = encode(&[(38.5, -120.2), (40.7, -120.95)]);
        assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC");
    }

    #[test]
    fn test_encode_three_points() {
        let polyline = Polyline::new(vec![(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]);
        assert_eq!(polyline.encode(), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn test_encode_rounds_to_five_digits() {
        let points = [
            (50.1022829, 8.6982122),
            (50.1020076, 8.6956695),
            (50.1006313, 8.6914960),
            (50.0987800, 8.6875156),
        ];
        assert_eq!(encode(&points), "grxpHyzat@t@zNrG`YpJzW");
    }

    #[test]
    fn test_repeated_point_encodes_zero_delta() {
        assert_eq!(encode(&[(1.0, 1.0), (1.0, 1.0)]), "_ibE_ibE??");
    }

    #[test]
    fn test_decode_inverse_of_encode() {
        let polyline = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        for (actual, expected) in polyline.points().iter().zip(expected) {
            assert!((actual.0 - expected.0).abs() < 1e-9);
            assert!((actual.1 - expected.1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode("_p~iF~ps|U_ulLnnq").unwrap_err(),
            DecodeError::InvalidEncoding(EncodingFault::Truncated)
        );
        assert_eq!(
            decode("_p~iF~ps|U_ulL").unwrap_err(),
            DecodeError::InvalidEncoding(EncodingFault::IncompleteCoordinate { index: 1 })
        );
        assert_eq!(
            decode("_p~iF ").unwrap_err(),
            DecodeError::InvalidEncoding(EncodingFault::InvalidCharacter {
                position: 5,
                character: ' '
            })
        );
    }

    #[test]
    fn test_partial_eq() {
        let p1 = Polyline::new(vec![(1.0, 2.0)]);
        let p2 = Polyline::new(vec![(1.0, 2.0)]);
        let p3 = Polyline::new(vec![(1.0, 2.1)]);
        assert_eq!(p1, p2);
        assert_ne!(p1, p3);
    }
}
