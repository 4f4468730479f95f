//! Flexible polyline codec.
//!
//! A flexible polyline starts with a format version and a header value
//! describing precision and an optional third dimension, followed by
//! zig-zag encoded deltas for every coordinate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::varint::{self, UnsignedValues};

/// The only format version this codec understands.
pub const FORMAT_VERSION: u64 = 1;

/// Largest precision the 4-bit header fields can carry.
pub const MAX_PRECISION: u8 = 15;

/// Kind of the optional third value attached to each coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThirdDimension {
    #[default]
    Absent,
    Level,
    Altitude,
    Elevation,
    Reserved1,
    Reserved2,
    Custom1,
    Custom2,
}

impl ThirdDimension {
    fn from_bits(bits: u64) -> Self {
        match bits & 0x7 {
            0 => Self::Absent,
            1 => Self::Level,
            2 => Self::Altitude,
            3 => Self::Elevation,
            4 => Self::Reserved1,
            5 => Self::Reserved2,
            6 => Self::Custom1,
            _ => Self::Custom2,
        }
    }

    fn bits(self) -> u64 {
        self as u64
    }

    pub fn is_present(self) -> bool {
        self != Self::Absent
    }
}

/// Decoded header of a flexible polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolylineHeader {
    /// Decimal digits kept for latitude and longitude.
    pub precision: u8,
    pub third_dim: ThirdDimension,
    /// Decimal digits kept for the third dimension.
    pub third_dim_precision: u8,
}

impl PolylineHeader {
    /// Header for a plain latitude/longitude polyline.
    pub fn two_dimensional(precision: u8) -> Self {
        Self {
            precision,
            third_dim: ThirdDimension::Absent,
            third_dim_precision: 0,
        }
    }

    pub fn three_dimensional(precision: u8, third_dim: ThirdDimension, third_dim_precision: u8) -> Self {
        Self {
            precision,
            third_dim,
            third_dim_precision,
        }
    }

    // Bits above the third-dimension precision are ignored.
    fn from_bits(value: u64) -> Self {
        Self {
            precision: (value & 0xF) as u8,
            third_dim: ThirdDimension::from_bits(value >> 4),
            third_dim_precision: ((value >> 7) & 0xF) as u8,
        }
    }

    fn bits(&self) -> u64 {
        u64::from(self.precision)
            | (self.third_dim.bits() << 4)
            | (u64::from(self.third_dim_precision) << 7)
    }

    fn scale(&self) -> f64 {
        10f64.powi(i32::from(self.precision))
    }

    fn third_dim_scale(&self) -> f64 {
        10f64.powi(i32::from(self.third_dim_precision))
    }
}

/// A decoded point. `elevation` holds the third value, whatever its kind,
/// and is `Some` exactly when the header declared a third dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// The (latitude, longitude) pair, dropping any third value.
    pub fn lat_lng(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// What exactly was wrong with a malformed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFault {
    /// Character outside the alphabet, at a byte position of the input.
    InvalidCharacter { position: usize, character: char },
    /// Input ended while a value still expected continuation characters.
    Truncated,
    /// A value or a running coordinate no longer fits 64 bits.
    Overflow,
    /// Input ended before the version and header were read.
    MissingHeader,
    /// Input ended part way through the coordinate at `index`.
    IncompleteCoordinate { index: usize },
}

impl fmt::Display for EncodingFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingFault::InvalidCharacter {
                position,
                character,
            } => write!(f, "invalid character {:?} at byte {}", character, position),
            EncodingFault::Truncated => write!(f, "premature end of input"),
            EncodingFault::Overflow => write!(f, "value exceeds 64 bits"),
            EncodingFault::MissingHeader => write!(f, "missing header"),
            EncodingFault::IncompleteCoordinate { index } => {
                write!(f, "coordinate {} is incomplete", index)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    InvalidEncoding(EncodingFault),
    UnsupportedVersion(u64),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidEncoding(fault) => write!(f, "invalid encoding: {}", fault),
            DecodeError::UnsupportedVersion(version) => {
                write!(f, "unsupported format version {}", version)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<EncodingFault> for DecodeError {
    fn from(fault: EncodingFault) -> Self {
        DecodeError::InvalidEncoding(fault)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    InvalidPrecision(u8),
    /// The header declares a third dimension but this coordinate has none.
    MissingThirdDimension { index: usize },
    /// Non-finite value, or one too large for the requested precision.
    OutOfRange { index: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::InvalidPrecision(precision) => {
                write!(f, "precision {} exceeds {}", precision, MAX_PRECISION)
            }
            EncodeError::MissingThirdDimension { index } => {
                write!(f, "coordinate {} has no third dimension", index)
            }
            EncodeError::OutOfRange { index } => {
                write!(f, "coordinate {} is out of range", index)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

fn read_header(values: &mut UnsignedValues<'_>) -> Result<PolylineHeader, DecodeError> {
    let version = values.next().ok_or(EncodingFault::MissingHeader)??;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }
    let bits = values.next().ok_or(EncodingFault::MissingHeader)??;
    Ok(PolylineHeader::from_bits(bits))
}

/// Reads only the header of `encoded`.
pub fn decode_header(encoded: &str) -> Result<PolylineHeader, DecodeError> {
    read_header(&mut UnsignedValues::new(encoded))
}

/// Lazy coordinate iterator returned by [`iter_decode`].
///
/// Single pass; stops after the first error.
#[derive(Debug)]
pub struct Coordinates<'a> {
    values: UnsignedValues<'a>,
    header: PolylineHeader,
    scale: f64,
    third_dim_scale: f64,
    lat: i64,
    lng: i64,
    z: i64,
    index: usize,
    done: bool,
}

impl Coordinates<'_> {
    pub fn header(&self) -> PolylineHeader {
        self.header
    }

    fn next_in_group(&mut self) -> Result<u64, DecodeError> {
        match self.values.next() {
            Some(value) => value,
            None => Err(EncodingFault::IncompleteCoordinate { index: self.index }.into()),
        }
    }

    fn read_coordinate(&mut self, lat_delta: u64) -> Result<Coordinate, DecodeError> {
        self.lat = accumulate(self.lat, lat_delta)?;
        let lng_delta = self.next_in_group()?;
        self.lng = accumulate(self.lng, lng_delta)?;

        let elevation = if self.header.third_dim.is_present() {
            let z_delta = self.next_in_group()?;
            self.z = accumulate(self.z, z_delta)?;
            Some(self.z as f64 / self.third_dim_scale)
        } else {
            None
        };

        self.index += 1;
        Ok(Coordinate {
            latitude: self.lat as f64 / self.scale,
            longitude: self.lng as f64 / self.scale,
            elevation,
        })
    }
}

fn accumulate(current: i64, delta: u64) -> Result<i64, DecodeError> {
    current
        .checked_add(varint::unzigzag(delta))
        .ok_or(EncodingFault::Overflow.into())
}

impl Iterator for Coordinates<'_> {
    type Item = Result<Coordinate, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = match self.values.next()? {
            Ok(lat_delta) => self.read_coordinate(lat_delta),
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

/// Parses the header eagerly and returns a lazy iterator over the coordinates.
pub fn iter_decode(encoded: &str) -> Result<Coordinates<'_>, DecodeError> {
    let mut values = UnsignedValues::new(encoded);
    let header = read_header(&mut values)?;
    Ok(Coordinates {
        values,
        header,
        scale: header.scale(),
        third_dim_scale: header.third_dim_scale(),
        lat: 0,
        lng: 0,
        z: 0,
        index: 0,
        done: false,
    })
}

/// Decodes a flexible polyline into its coordinates, in path order.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    iter_decode(encoded)?.collect()
}

fn scaled(value: f64, scale: f64, index: usize) -> Result<i64, EncodeError> {
    let scaled = (value * scale).round();
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
        return Err(EncodeError::OutOfRange { index });
    }
    Ok(scaled as i64)
}

fn delta(current: i64, previous: i64, index: usize) -> Result<i64, EncodeError> {
    current
        .checked_sub(previous)
        .ok_or(EncodeError::OutOfRange { index })
}

/// Encodes `coordinates` as a flexible polyline described by `header`.
///
/// Elevation on the input is ignored when the header declares no third
/// dimension.
pub fn encode(coordinates: &[Coordinate], header: PolylineHeader) -> Result<String, EncodeError> {
    for precision in [header.precision, header.third_dim_precision] {
        if precision > MAX_PRECISION {
            return Err(EncodeError::InvalidPrecision(precision));
        }
    }

    let mut out = String::new();
    varint::push_unsigned(FORMAT_VERSION, &mut out);
    varint::push_unsigned(header.bits(), &mut out);

    let scale = header.scale();
    let third_dim_scale = header.third_dim_scale();
    let (mut last_lat, mut last_lng, mut last_z) = (0i64, 0i64, 0i64);

    for (index, coordinate) in coordinates.iter().enumerate() {
        let lat = scaled(coordinate.latitude, scale, index)?;
        let lng = scaled(coordinate.longitude, scale, index)?;
        varint::push_signed(delta(lat, last_lat, index)?, &mut out);
        varint::push_signed(delta(lng, last_lng, index)?, &mut out);
        last_lat = lat;
        last_lng = lng;

        if header.third_dim.is_present() {
            let elevation = coordinate
                .elevation
                .ok_or(EncodeError::MissingThirdDimension { index })?;
            let z = scaled(elevation, third_dim_scale, index)?;
            varint::push_signed(delta(z, last_z, index)?, &mut out);
            last_z = z;
        }
    }

    Ok(out)
}
